// ============================================================================
// Structure : ViewState
// ============================================================================
// Paramètres d'affichage contrôlés par l'utilisateur + dernier dataset
//
// PATTERN : une seule instance, détenue par App
// - Modifiée uniquement par le contrôleur (controller.rs)
// - Lue par le rendu du tableau (ui/table.rs)
// ============================================================================

use strum::{EnumIter, IntoEnumIterator};

use crate::models::{CoinRecord, Currency};

/// Sens du tri
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Sens inverse (asc ↔ desc)
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Indicateur affiché dans l'en-tête de la colonne active
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Colonnes triables du tableau
///
/// CONCEPT RUST : Enum fermée
/// - Remplace un nom de champ sous forme de String
/// - L'ordre des variants est l'ordre des colonnes (EnumIter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SortField {
    Rank,
    Name,
    Price,
    Change1h,
    Change24h,
    Change7d,
    Volume,
    MarketCap,
}

impl SortField {
    /// Titre de la colonne
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Rank => "#",
            SortField::Name => "Coin",
            SortField::Price => "Price",
            SortField::Change1h => "1h",
            SortField::Change24h => "24h",
            SortField::Change7d => "7d",
            SortField::Volume => "24h Volume",
            SortField::MarketCap => "Market Cap",
        }
    }

    /// Sens appliqué quand on clique sur cette colonne depuis une autre
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortField::Rank | SortField::Name => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    /// Colonnes dans l'ordre d'affichage
    pub fn columns() -> Vec<SortField> {
        SortField::iter().collect()
    }

    /// Colonne à la position `index` (0-based), None si hors limites
    pub fn from_column(index: usize) -> Option<SortField> {
        SortField::iter().nth(index)
    }
}

/// État de la vue du tableau
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Devise sélectionnée
    pub currency: Currency,

    /// Colonne de tri active
    pub sort_by: SortField,

    /// Sens du tri actif
    pub sort_direction: SortDirection,

    /// Texte de recherche (vide = tout afficher)
    pub search_text: String,

    /// Dernier dataset fetché pour `currency`, remplacé en bloc à chaque fetch
    pub last_dataset: Vec<CoinRecord>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            currency: Currency::default(),
            sort_by: SortField::Rank,
            sort_direction: SortField::Rank.default_direction(),
            search_text: String::new(),
            last_dataset: Vec::new(),
        }
    }

    /// Clic sur l'en-tête d'une colonne
    ///
    /// CONCEPT : State machine sur (sort_by, sort_direction)
    /// - même colonne : on inverse le sens
    /// - autre colonne : on prend son sens par défaut
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_by = field;
            self.sort_direction = field.default_direction();
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ViewState::new();
        assert_eq!(state.currency, Currency::USD);
        assert_eq!(state.sort_by, SortField::Rank);
        assert_eq!(state.sort_direction, SortDirection::Asc);
        assert!(state.search_text.is_empty());
        assert!(state.last_dataset.is_empty());
    }

    #[test]
    fn test_same_header_twice_restores_direction() {
        let mut state = ViewState::new();
        state.toggle_sort(SortField::Price);
        let original = state.sort_direction;

        state.toggle_sort(SortField::Price);
        assert_eq!(state.sort_direction, original.toggled());

        state.toggle_sort(SortField::Price);
        assert_eq!(state.sort_direction, original);
    }

    #[test]
    fn test_other_header_resets_to_default() {
        let mut state = ViewState::new();
        // Même colonne : Rank asc → desc
        state.toggle_sort(SortField::Rank);
        assert_eq!(state.sort_direction, SortDirection::Desc);

        state.toggle_sort(SortField::Volume);
        assert_eq!(state.sort_by, SortField::Volume);
        assert_eq!(state.sort_direction, SortDirection::Desc);

        state.toggle_sort(SortField::Name);
        assert_eq!(state.sort_by, SortField::Name);
        assert_eq!(state.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_from_column() {
        assert_eq!(SortField::from_column(0), Some(SortField::Rank));
        assert_eq!(SortField::from_column(7), Some(SortField::MarketCap));
        assert_eq!(SortField::from_column(8), None);
        assert_eq!(SortField::columns().len(), 8);
    }
}
