// ============================================================================
// Erreurs du client de données de marché
// ============================================================================
// CONCEPT RUST : thiserror
// - Enum d'erreurs typée : le contrôleur peut matcher chaque cas
// - #[from] : conversion automatique avec l'opérateur ?
// ============================================================================

use thiserror::Error;

/// Échec d'un fetch de données de marché
#[derive(Debug, Error)]
pub enum MarketError {
    /// Requête HTTP impossible (DNS, connexion, lecture du body...)
    #[error("Erreur réseau : {0}")]
    Network(#[from] reqwest::Error),

    /// Réponse HTTP non-2xx
    #[error("L'API a retourné une erreur : HTTP {0}")]
    HttpStatus(u16),

    /// HTTP 429 : limite de requêtes CoinGecko atteinte
    #[error("Limite de requêtes atteinte, réessayez dans un instant")]
    RateLimited,

    /// Le body n'est pas un tableau JSON de coins
    #[error("Réponse JSON invalide : {0}")]
    Parse(#[from] serde_json::Error),
}

impl MarketError {
    /// Vrai si un nouvel essai a une chance de réussir
    pub fn is_retriable(&self) -> bool {
        match self {
            MarketError::Network(_) | MarketError::RateLimited => true,
            MarketError::HttpStatus(code) => *code >= 500,
            MarketError::Parse(_) => false,
        }
    }
}
