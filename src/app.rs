// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// PATTERN : "Application State"
// - ViewState (devise, tri, recherche, dataset) est la source de vérité
// - Les composants de l'UI lisent depuis App, sans jamais la modifier
// - Les modifications de la vue passent par le contrôleur (controller.rs)
// ============================================================================

use chrono::{DateTime, Local};
use num_format::Locale;

use crate::config::Config;
use crate::models::{CoinRecord, Currency, ViewState};
use crate::ui::table::compute_derived;

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran (mode) actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : le tableau de marché
    Table,

    /// Saisie de la recherche : chaque touche filtre le tableau en direct
    Search,

    /// Sélecteur de devise (popup)
    CurrencyPicker,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// État de la vue du tableau
    pub view: ViewState,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Index de la ligne sélectionnée dans le tableau dérivé
    pub selected_index: usize,

    /// Index surligné dans le sélecteur de devise
    pub picker_index: usize,

    /// Two-step quit : première pression de 'q' → true
    pub confirm_quit: bool,

    /// Indicateur de chargement (overlay)
    pub is_loading: bool,

    /// Message affiché dans l'overlay de chargement
    pub loading_message: Option<String>,

    /// Dernière erreur de fetch, affichée dans le footer jusqu'au prochain succès
    pub last_error: Option<String>,

    /// Heure du dernier fetch réussi
    pub last_updated: Option<DateTime<Local>>,

    /// Locale des nombres affichés
    pub locale: Locale,

    /// Identifiant de la dernière requête de fetch émise
    pub(crate) latest_generation: u64,

    /// Nombre d'affichages / masquages de l'indicateur (vérifiés en test)
    #[cfg(test)]
    pub(crate) loading_shown: usize,
    #[cfg(test)]
    pub(crate) loading_hidden: usize,
}

impl App {
    /// Crée une App avec l'état par défaut (USD, tri par rang, pas de recherche)
    pub fn new() -> Self {
        Self {
            running: true,
            view: ViewState::new(),
            current_screen: Screen::Table,
            selected_index: 0,
            picker_index: 0,
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            last_error: None,
            last_updated: None,
            locale: Locale::en,
            latest_generation: 0,
            #[cfg(test)]
            loading_shown: 0,
            #[cfg(test)]
            loading_hidden: 0,
        }
    }

    /// Crée une App à partir de la configuration de démarrage
    pub fn from_config(config: &Config) -> Self {
        let mut app = Self::new();
        app.view.currency = config.default_currency;
        app.locale = config.locale;
        app
    }

    /// Crée une App avec un dataset déjà chargé
    pub fn with_dataset(dataset: Vec<CoinRecord>) -> Self {
        let mut app = Self::new();
        app.view.last_dataset = dataset;
        app
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Tableau dérivé et sélection
    // ========================================================================

    /// Dataset trié puis filtré selon l'état courant
    pub fn derived(&self) -> Vec<CoinRecord> {
        compute_derived(
            &self.view.last_dataset,
            self.view.sort_by,
            self.view.sort_direction,
            &self.view.search_text,
        )
    }

    /// Navigue vers le haut dans le tableau
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas dans le tableau
    pub fn navigate_down(&mut self) {
        let max_index = self.derived().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Ramène la sélection dans les limites après un filtrage ou un fetch
    pub fn clamp_selection(&mut self) {
        let max_index = self.derived().len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }

    /// Coin de la ligne sélectionnée
    pub fn selected_coin(&self) -> Option<CoinRecord> {
        self.derived().into_iter().nth(self.selected_index)
    }

    // ========================================================================
    // Confirmation de quit
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Indicateur de chargement
    // ========================================================================

    /// Affiche l'indicateur de chargement
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
        #[cfg(test)]
        {
            self.loading_shown += 1;
        }
    }

    /// Masque l'indicateur de chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
        #[cfg(test)]
        {
            self.loading_hidden += 1;
        }
    }

    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    // ========================================================================
    // Modes : recherche et sélecteur de devise
    // ========================================================================

    /// Entre en mode recherche (le texte courant est conservé)
    pub fn start_search(&mut self) {
        self.current_screen = Screen::Search;
    }

    /// Quitte le mode recherche en gardant le filtre
    pub fn finish_search(&mut self) {
        self.current_screen = Screen::Table;
    }

    pub fn is_in_search_mode(&self) -> bool {
        self.current_screen == Screen::Search
    }

    /// Ouvre le sélecteur, positionné sur la devise courante
    pub fn open_currency_picker(&mut self) {
        self.picker_index = self.view.currency.index();
        self.current_screen = Screen::CurrencyPicker;
    }

    pub fn close_currency_picker(&mut self) {
        self.current_screen = Screen::Table;
    }

    pub fn is_in_currency_picker(&self) -> bool {
        self.current_screen == Screen::CurrencyPicker
    }

    pub fn picker_up(&mut self) {
        self.picker_index = self.picker_index.saturating_sub(1);
    }

    pub fn picker_down(&mut self) {
        let max_index = Currency::all().len().saturating_sub(1);
        self.picker_index = (self.picker_index + 1).min(max_index);
    }

    /// Devise surlignée dans le sélecteur
    pub fn picker_selection(&self) -> Currency {
        Currency::all()
            .get(self.picker_index)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_on_table(&self) -> bool {
        self.current_screen == Screen::Table
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(symbol: &str, name: &str, rank: u32) -> CoinRecord {
        CoinRecord {
            id: name.to_lowercase(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            image: String::new(),
            market_cap_rank: Some(rank),
            current_price: Some(1.0),
            change_1h: None,
            change_24h: None,
            change_7d: None,
            total_volume: None,
            market_cap: None,
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.is_on_table());
        assert!(!app.is_loading_data());
        assert_eq!(app.view.currency, Currency::USD);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            default_currency: Currency::EUR,
            ..Config::default()
        };
        let app = App::from_config(&config);
        assert_eq!(app.view.currency, Currency::EUR);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut app = App::with_dataset(vec![
            coin("btc", "Bitcoin", 1),
            coin("eth", "Ethereum", 2),
        ]);

        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.selected_coin().unwrap().symbol, "eth");

        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_clamp_selection_after_filter() {
        let mut app = App::with_dataset(vec![
            coin("btc", "Bitcoin", 1),
            coin("eth", "Ethereum", 2),
            coin("doge", "Dogecoin", 3),
        ]);
        app.selected_index = 2;
        app.view.search_text = "bit".to_string();

        app.clamp_selection();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_currency_picker() {
        let mut app = App::new();
        app.view.currency = Currency::GBP;

        app.open_currency_picker();
        assert!(app.is_in_currency_picker());
        assert_eq!(app.picker_selection(), Currency::GBP);

        app.picker_up();
        assert_eq!(app.picker_selection(), Currency::EUR);

        app.close_currency_picker();
        assert!(app.is_on_table());
        // Fermer le sélecteur ne change pas la devise
        assert_eq!(app.view.currency, Currency::GBP);
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }
}
