// ============================================================================
// CoinBoard - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;        // Client CoinGecko
pub mod app;        // État de l'application
pub mod config;     // Configuration de démarrage
pub mod controller; // Actions utilisateur → état, cycle de fetch
pub mod error;      // Erreurs du client de marché
pub mod format;     // Formatage des montants et pourcentages
pub mod input;      // Touches → navigation et actions
pub mod models;     // Structures de données
pub mod ui;         // Interface utilisateur
