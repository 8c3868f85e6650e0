// ============================================================================
// Configuration de l'application
// ============================================================================
// Valeurs par défaut construites dans le code : pas de fichier de config,
// pas de variables d'environnement (hormis RUST_LOG pour le logging)
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use num_format::Locale;

use crate::api::DEFAULT_BASE_URL;
use crate::models::Currency;

/// Nom de l'application (répertoire des logs, préfixe des fichiers)
pub const APP_NAME: &str = "coinboard";

/// Paramètres de démarrage
#[derive(Debug, Clone)]
pub struct Config {
    /// URL de base de l'API de marché
    pub api_base_url: String,

    /// Devise du premier chargement
    pub default_currency: Currency,

    /// Locale des séparateurs de milliers / décimales
    pub locale: Locale,

    /// Délai max d'attente d'un événement clavier avant de redessiner
    pub tick_rate: Duration,

    /// Répertoire des fichiers de log
    pub log_dir: PathBuf,
}

impl Config {
    /// Répertoire de logs par défaut
    ///
    /// - Linux : ~/.local/share/coinboard/logs
    /// - macOS : ~/Library/Application Support/coinboard/logs
    /// - sinon : ./logs
    pub fn default_log_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_NAME).join("logs"))
            .unwrap_or_else(|| PathBuf::from("./logs"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            default_currency: Currency::default(),
            locale: Locale::en,
            tick_rate: Duration::from_millis(250),
            log_dir: Self::default_log_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.coingecko.com/api/v3");
        assert_eq!(config.default_currency, Currency::USD);
        assert!(config.log_dir.ends_with("logs"));
    }
}
