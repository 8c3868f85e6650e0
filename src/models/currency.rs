// ============================================================================
// Enum : Currency
// ============================================================================
// Devises proposées par le sélecteur (paramètre vs_currency de CoinGecko)
//
// CONCEPT RUST : Enum fermée au lieu d'une String
// - Une devise invalide ne peut pas être construite
// - strum::EnumIter permet de lister toutes les devises pour le sélecteur
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Devise dans laquelle les prix sont demandés à l'API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[allow(clippy::upper_case_acronyms)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CHF,
    CAD,
    AUD,
    INR,
    KRW,
    BRL,
    BTC,
    ETH,
}

impl Currency {
    /// Code attendu par le paramètre `vs_currency` (minuscules)
    pub fn api_code(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CHF => "chf",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
            Currency::INR => "inr",
            Currency::KRW => "krw",
            Currency::BRL => "brl",
            Currency::BTC => "btc",
            Currency::ETH => "eth",
        }
    }

    /// Code affiché (ex: "USD")
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::INR => "INR",
            Currency::KRW => "KRW",
            Currency::BRL => "BRL",
            Currency::BTC => "BTC",
            Currency::ETH => "ETH",
        }
    }

    /// Symbole graphique de la devise
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::INR => "₹",
            Currency::KRW => "₩",
            Currency::BRL => "R$",
            Currency::BTC => "₿",
            Currency::ETH => "Ξ",
        }
    }

    /// Nom complet pour le sélecteur
    pub fn label(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::JPY => "Japanese Yen",
            Currency::CHF => "Swiss Franc",
            Currency::CAD => "Canadian Dollar",
            Currency::AUD => "Australian Dollar",
            Currency::INR => "Indian Rupee",
            Currency::KRW => "South Korean Won",
            Currency::BRL => "Brazilian Real",
            Currency::BTC => "Bitcoin",
            Currency::ETH => "Ether",
        }
    }

    /// Préfixe placé devant un montant
    ///
    /// Un symbole alphabétique ("CHF") est séparé du nombre par un espace
    pub fn prefix(&self) -> String {
        let symbol = self.symbol();
        if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
            format!("{} ", symbol)
        } else {
            symbol.to_string()
        }
    }

    /// Toutes les devises, dans l'ordre du sélecteur
    pub fn all() -> Vec<Currency> {
        Currency::iter().collect()
    }

    /// Position de la devise dans `all()`
    pub fn index(&self) -> usize {
        Currency::iter().position(|c| c == *self).unwrap_or(0)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_usd() {
        assert_eq!(Currency::default(), Currency::USD);
        assert_eq!(Currency::default().api_code(), "usd");
    }

    #[test]
    fn test_prefix() {
        assert_eq!(Currency::USD.prefix(), "$");
        assert_eq!(Currency::CHF.prefix(), "CHF ");
        assert_eq!(Currency::CAD.prefix(), "CA$");
    }

    #[test]
    fn test_index_matches_all() {
        for (i, currency) in Currency::all().into_iter().enumerate() {
            assert_eq!(currency.index(), i);
        }
    }
}
