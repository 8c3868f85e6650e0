// ============================================================================
// Formatage des valeurs affichées
// ============================================================================
// Fonctions pures : montant → texte, pourcentage → texte, signe → classe
//
// Règle d'arrondi des pourcentages : arrondi "half away from zero"
// (f64::round), appliqué à value * 10^precision
// ============================================================================

use num_format::{Locale, ToFormattedString};

use crate::models::Currency;

/// Texte affiché pour une valeur absente ou non finie
pub const MISSING: &str = "N/A";

/// Précision par défaut des pourcentages
pub const DEFAULT_PRECISION: u32 = 2;

/// Au-delà, 10^precision n'a plus de sens pour un f64 (~15 chiffres significatifs)
pub const MAX_PRECISION: u32 = 15;

/// Classe sémantique du signe d'une valeur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignClass {
    Positive,
    Negative,
    Neutral,
}

impl SignClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignClass::Positive => "positive",
            SignClass::Negative => "negative",
            SignClass::Neutral => "",
        }
    }
}

/// Nombre de décimales pour un montant
///
/// - sans décimales : 0
/// - montant < 1 : 5 (petits prix, ex: DOGE)
/// - sinon : 2
fn currency_decimals(value: f64, show_decimals: bool) -> usize {
    if !show_decimals {
        0
    } else if value < 1.0 {
        5
    } else {
        2
    }
}

/// Formate un montant dans la locale par défaut (en)
pub fn format_currency(value: f64, currency: Currency, show_decimals: bool) -> String {
    format_currency_in(value, currency, show_decimals, &Locale::en)
}

/// Formate un montant avec symbole de devise et séparateurs de la locale
///
/// Ex: 1234.5 USD → "$1,234.50", 0.08 USD → "$0.08000"
pub fn format_currency_in(
    value: f64,
    currency: Currency,
    show_decimals: bool,
    locale: &Locale,
) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let decimals = currency_decimals(value, show_decimals);
    let fixed = format!("{:.*}", decimals, value.abs());

    let (int_digits, frac_digits) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    // Groupement des milliers ; au-delà de u64 on garde les chiffres bruts
    let mut number = int_digits
        .parse::<u64>()
        .map(|n| n.to_formatted_string(locale))
        .unwrap_or_else(|_| int_digits.to_string());

    if let Some(frac) = frac_digits {
        number.push_str(locale.decimal());
        number.push_str(frac);
    }

    // Pas de "-$0.00" quand l'arrondi donne zéro
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    format!("{}{}{}", sign, currency.prefix(), number)
}

/// Montant optionnel (None → N/A)
pub fn format_currency_opt(
    value: Option<f64>,
    currency: Currency,
    show_decimals: bool,
    locale: &Locale,
) -> String {
    match value {
        Some(v) => format_currency_in(v, currency, show_decimals, locale),
        None => MISSING.to_string(),
    }
}

/// Formate un pourcentage arrondi à `precision` décimales
///
/// Affichage en forme courte : pas de zéros inutiles ("-1%", "12.35%")
pub fn format_percentage(value: f64, precision: u32) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let factor = 10_f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = value * factor;
    // Valeur trop grande pour être mise à l'échelle : déjà entière à cette précision
    let rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    };
    // -0 s'affiche "0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };

    format!("{}%", rounded)
}

/// Pourcentage optionnel (None → N/A)
pub fn format_percentage_opt(value: Option<f64>, precision: u32) -> String {
    match value {
        Some(v) => format_percentage(v, precision),
        None => MISSING.to_string(),
    }
}

/// Classe de signe : positive, negative, ou neutral (zéro, NaN)
pub fn sign_class(value: f64) -> SignClass {
    if value > 0.0 {
        SignClass::Positive
    } else if value < 0.0 {
        SignClass::Negative
    } else {
        SignClass::Neutral
    }
}

/// Classe de signe d'une valeur optionnelle (None → neutral)
pub fn sign_class_opt(value: Option<f64>) -> SignClass {
    value.map(sign_class).unwrap_or(SignClass::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fraction_digits(text: &str) -> usize {
        text.split_once('.').map(|(_, f)| f.len()).unwrap_or(0)
    }

    #[test]
    fn test_currency_decimal_policy() {
        assert_eq!(format_currency(0.5, Currency::USD, true), "$0.50000");
        assert_eq!(fraction_digits(&format_currency(0.5, Currency::USD, true)), 5);
        assert_eq!(format_currency(5.0, Currency::USD, true), "$5.00");
        assert_eq!(format_currency(1234.0, Currency::USD, false), "$1,234");
    }

    #[test]
    fn test_currency_grouping_and_symbols() {
        assert_eq!(format_currency(1234567.891, Currency::EUR, true), "€1,234,567.89");
        assert_eq!(format_currency(1234.5, Currency::CHF, true), "CHF 1,234.50");
        assert_eq!(format_currency(0.08, Currency::USD, true), "$0.08000");
        assert_eq!(
            format_currency(980_000_000_000.0, Currency::USD, false),
            "$980,000,000,000"
        );
    }

    #[test]
    fn test_currency_other_locale() {
        assert_eq!(
            format_currency_in(1234.5, Currency::EUR, true, &Locale::de),
            "€1.234,50"
        );
    }

    #[test]
    fn test_currency_negative_and_invalid() {
        assert_eq!(format_currency(-1500.0, Currency::USD, false), "-$1,500");
        assert_eq!(format_currency(-0.000001, Currency::USD, true), "$0.00000");
        assert_eq!(format_currency(f64::NAN, Currency::USD, true), MISSING);
        assert_eq!(format_currency_opt(None, Currency::USD, true, &Locale::en), MISSING);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(format_percentage(12.345, DEFAULT_PRECISION), "12.35%");
        assert_eq!(format_percentage(-1.0, DEFAULT_PRECISION), "-1%");
        assert_eq!(format_percentage(0.0, DEFAULT_PRECISION), "0%");
        assert_eq!(format_percentage(-0.001, DEFAULT_PRECISION), "0%");
        assert_eq!(format_percentage(3.14159, 3), "3.142%");
        assert_eq!(format_percentage(2.5, 0), "3%");
        assert_eq!(format_percentage(-2.5, 0), "-3%");
    }

    #[test]
    fn test_percentage_huge_precision_or_value() {
        assert_eq!(format_percentage(1.0, 400), "1%");
        assert_eq!(format_percentage(-2.5, u32::MAX), "-2.5%");

        let huge = format_percentage(1e300, DEFAULT_PRECISION);
        assert!(huge.ends_with('%'));
        assert!(!huge.contains("NaN") && !huge.contains("inf"));
    }

    #[test]
    fn test_percentage_missing() {
        assert_eq!(format_percentage_opt(None, DEFAULT_PRECISION), MISSING);
        assert_eq!(format_percentage_opt(Some(1.5), DEFAULT_PRECISION), "1.5%");
    }

    #[test]
    fn test_sign_class() {
        assert_eq!(sign_class(-1.0), SignClass::Negative);
        assert_eq!(sign_class(0.0), SignClass::Neutral);
        assert_eq!(sign_class(f64::NAN), SignClass::Neutral);
        assert_eq!(sign_class(0.0001), SignClass::Positive);
        assert_eq!(sign_class_opt(None), SignClass::Neutral);
        assert_eq!(SignClass::Neutral.as_str(), "");
    }

    #[test]
    fn test_sign_class_is_total() {
        for v in [f64::MIN, -1e-300, -0.0, 0.0, 1e-300, f64::MAX, f64::INFINITY] {
            let class = sign_class(v);
            let expected = if v > 0.0 {
                SignClass::Positive
            } else if v < 0.0 {
                SignClass::Negative
            } else {
                SignClass::Neutral
            };
            assert_eq!(class, expected);
        }
    }
}
