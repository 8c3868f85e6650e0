// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod currency_picker; // Popups : sélecteur de devise, chargement
pub mod dashboard;       // Rendu de l'interface principale
pub mod events;          // Gestion des événements clavier
pub mod table;           // Tableau de marché : tri, filtre, rendu

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
