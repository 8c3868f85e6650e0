// ============================================================================
// Module : api
// ============================================================================
// Clients pour récupérer les données de marché
// ============================================================================

pub mod coingecko; // Client API CoinGecko

use async_trait::async_trait;

use crate::error::MarketError;
use crate::models::{CoinRecord, Currency};

// Re-export des éléments principaux
pub use coingecko::{markets_url, CoinGeckoClient, DEFAULT_BASE_URL};

/// Source de données de marché
///
/// CONCEPT RUST : Trait async (async-trait)
/// - Le contrôleur dépend du trait, pas du client HTTP
/// - Les tests fournissent une source factice
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Un fetch complet du marché, prix exprimés dans `currency`
    async fn fetch_market(&self, currency: Currency) -> Result<Vec<CoinRecord>, MarketError>;
}
