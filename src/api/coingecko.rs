// ============================================================================
// API Client : CoinGecko
// ============================================================================
// Récupère le tableau de marché (/coins/markets) dans une devise donnée
//
// CONCEPTS RUST :
// 1. async/await : un seul point de suspension, l'attente de la réponse
// 2. Result<T, MarketError> : échec typé, jamais de panic
// 3. Serde : le JSON est désérialisé directement en Vec<CoinRecord>
// ============================================================================

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error, info, instrument, warn};

use crate::api::MarketSource;
use crate::error::MarketError;
use crate::models::{CoinRecord, Currency};

/// URL publique de l'API CoinGecko v3
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Client HTTP CoinGecko
///
/// Pas de retry ni de timeout : c'est l'appelant qui décide
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// Crée un client pointant sur `base_url` (sans slash final)
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coinboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(base_url, client))
    }

    /// Crée un client à partir d'un reqwest::Client déjà configuré
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Récupère les coins avec les prix exprimés dans `currency`
    ///
    /// CONCEPT RUST : #[instrument]
    /// - Tous les logs de la fonction portent le champ currency
    #[instrument(skip(self, currency), fields(currency = %currency))]
    pub async fn fetch_market(&self, currency: Currency) -> Result<Vec<CoinRecord>, MarketError> {
        let url = markets_url(&self.base_url, currency);
        debug!(url = %url, "Sending HTTP request to CoinGecko");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("CoinGecko rate limit reached");
            return Err(MarketError::RateLimited);
        }

        // Vérifie que la réponse est un succès HTTP (200-299)
        if !status.is_success() {
            error!(status = %status, "CoinGecko returned error status");
            return Err(MarketError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let coins = parse_markets(&body)?;

        info!(coins = coins.len(), "Successfully fetched market data");
        Ok(coins)
    }
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn fetch_market(&self, currency: Currency) -> Result<Vec<CoinRecord>, MarketError> {
        CoinGeckoClient::fetch_market(self, currency).await
    }
}

/// Construit l'URL de l'endpoint /coins/markets
pub fn markets_url(base_url: &str, currency: Currency) -> String {
    format!(
        "{}/coins/markets?vs_currency={}&price_change_percentage=1h,24h,7d",
        base_url.trim_end_matches('/'),
        currency.api_code()
    )
}

/// Parse le body JSON (tableau de coins), sans transformation
fn parse_markets(body: &str) -> Result<Vec<CoinRecord>, MarketError> {
    let coins: Vec<CoinRecord> = serde_json::from_str(body)?;
    Ok(coins)
}

// ============================================================================
// Tests unitaires
// ============================================================================
