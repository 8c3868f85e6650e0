// ============================================================================
// Structure : CoinRecord
// ============================================================================
// Instantané de marché d'une cryptomonnaie tel que retourné par
// l'endpoint CoinGecko /coins/markets
//
// CONCEPTS RUST :
// 1. Option<T> pour chaque champ numérique : CoinGecko retourne parfois
//    null (nouveau coin sans rang, variation 7j indisponible...)
// 2. #[serde(rename = "...")] : les noms JSON sont très longs, on garde
//    des noms Rust courts
// 3. Un champ Option absent du JSON est désérialisé en None
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::SortField;

/// Un coin avec ses données de marché (immuable une fois fetché)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// Identifiant CoinGecko (ex: "bitcoin")
    #[serde(default)]
    pub id: String,

    /// Symbole en minuscules tel que fourni par l'API (ex: "btc")
    pub symbol: String,

    /// Nom complet (ex: "Bitcoin")
    pub name: String,

    /// URL de l'icône du coin
    #[serde(default)]
    pub image: String,

    /// Rang par capitalisation (null pour certains coins récents)
    pub market_cap_rank: Option<u32>,

    /// Prix actuel, dans la devise demandée
    pub current_price: Option<f64>,

    #[serde(rename = "price_change_percentage_1h_in_currency")]
    pub change_1h: Option<f64>,

    #[serde(rename = "price_change_percentage_24h_in_currency")]
    pub change_24h: Option<f64>,

    #[serde(rename = "price_change_percentage_7d_in_currency")]
    pub change_7d: Option<f64>,

    /// Volume d'échange total sur 24h
    pub total_volume: Option<f64>,

    /// Capitalisation de marché
    pub market_cap: Option<f64>,
}

/// Valeur d'un champ triable
///
/// CONCEPT RUST : Enum avec données
/// - Text pour les champs chaîne (comparaison de texte)
/// - Number pour les champs numériques (None = valeur manquante)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
}

impl CoinRecord {
    /// Retourne la valeur du champ utilisé pour le tri
    ///
    /// Le match est exhaustif : ajouter une colonne triable oblige à
    /// traiter son accès ici
    pub fn field(&self, field: SortField) -> FieldValue<'_> {
        match field {
            SortField::Rank => FieldValue::Number(self.market_cap_rank.map(f64::from)),
            SortField::Name => FieldValue::Text(&self.name),
            SortField::Price => FieldValue::Number(self.current_price),
            SortField::Change1h => FieldValue::Number(self.change_1h),
            SortField::Change24h => FieldValue::Number(self.change_24h),
            SortField::Change7d => FieldValue::Number(self.change_7d),
            SortField::Volume => FieldValue::Number(self.total_volume),
            SortField::MarketCap => FieldValue::Number(self.market_cap),
        }
    }

    /// Vrai si le nom ou le symbole contient `needle` (déjà en minuscules)
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.symbol.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "bitcoin",
        "symbol": "btc",
        "name": "Bitcoin",
        "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
        "current_price": 50000,
        "market_cap": 980000000000,
        "market_cap_rank": 1,
        "total_volume": 25000000000.5,
        "price_change_percentage_1h_in_currency": 0.12,
        "price_change_percentage_24h_in_currency": -1.5,
        "price_change_percentage_7d_in_currency": null
    }"#;

    #[test]
    fn test_deserialize_coin_record() {
        let coin: CoinRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(coin.symbol, "btc");
        assert_eq!(coin.market_cap_rank, Some(1));
        assert_eq!(coin.current_price, Some(50000.0));
        assert_eq!(coin.change_24h, Some(-1.5));
        assert_eq!(coin.change_7d, None);
    }

    #[test]
    fn test_missing_fields_degrade_to_none() {
        let coin: CoinRecord =
            serde_json::from_str(r#"{"symbol": "new", "name": "Newcoin"}"#).unwrap();
        assert_eq!(coin.id, "");
        assert_eq!(coin.market_cap_rank, None);
        assert_eq!(coin.field(SortField::Change1h), FieldValue::Number(None));
    }

    #[test]
    fn test_matches_search() {
        let coin: CoinRecord = serde_json::from_str(SAMPLE).unwrap();
        assert!(coin.matches_search(""));
        assert!(coin.matches_search("bit"));
        assert!(coin.matches_search("btc"));
        assert!(!coin.matches_search("eth"));
    }
}
