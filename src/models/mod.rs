// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application
// ============================================================================

pub mod coin;       // Enregistrement de marché d'un coin (coin.rs)
pub mod currency;   // Devises proposées (currency.rs)
pub mod view_state; // État de la vue : devise, tri, recherche (view_state.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use coinboard::models::coin::CoinRecord;
// On peut faire : use coinboard::models::CoinRecord;
pub use coin::{CoinRecord, FieldValue};
pub use currency::Currency;
pub use view_state::{SortDirection, SortField, ViewState};
