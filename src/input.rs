// ============================================================================
// Dispatch clavier
// ============================================================================
// Traduit une touche en fonction de l'écran actif :
// - navigation (sélection, modes, quit) appliquée directement à App
// - intentions sur la vue (tri, recherche, devise) retournées comme Action,
//   exécutées ensuite par controller::apply_action
// ============================================================================

use tracing::{debug, info};

use crate::app::App;
use crate::controller::Action;
use crate::models::SortField;
use crate::ui::events::{
    get_char_from_event, get_sort_column, is_backspace_event, is_currency_event, is_down_event,
    is_enter_event, is_escape_event, is_quit_event, is_refresh_event, is_reset_search_event,
    is_search_event, is_up_event, Event,
};

/// Traite un événement : met à jour l'état de navigation de l'app et
/// retourne l'action éventuelle à confier au contrôleur
pub fn handle_event(app: &mut App, event: Event) -> Option<Action> {
    // ========================================
    // Mode recherche : les caractères vont dans le filtre
    // ========================================
    if app.is_in_search_mode() {
        return match event {
            Event::Key(_) if is_escape_event(&event) => {
                debug!("User reset search");
                app.finish_search();
                Some(Action::ResetSearch)
            }
            Event::Key(_) if is_enter_event(&event) => {
                info!(search = %app.view.search_text, "User kept search filter");
                app.finish_search();
                None
            }
            Event::Key(_) if is_backspace_event(&event) => Some(Action::PopSearchChar),
            Event::Key(_) => get_char_from_event(&event).map(Action::PushSearchChar),
            Event::Tick => None,
        };
    }

    // ========================================
    // Sélecteur de devise
    // ========================================
    if app.is_in_currency_picker() {
        return match event {
            Event::Key(_) if is_escape_event(&event) => {
                app.close_currency_picker();
                None
            }
            Event::Key(_) if is_up_event(&event) => {
                app.picker_up();
                None
            }
            Event::Key(_) if is_down_event(&event) => {
                app.picker_down();
                None
            }
            Event::Key(_) if is_enter_event(&event) => {
                let currency = app.picker_selection();
                info!(currency = %currency, "User selected currency");
                app.close_currency_picker();
                Some(Action::SelectCurrency(currency))
            }
            _ => None,
        };
    }

    // ========================================
    // Tableau
    // ========================================
    match event {
        Event::Key(_) if is_quit_event(&event) => {
            // Two-step : première pression demande confirmation
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
            None
        }

        Event::Key(_) => {
            // Toute autre touche annule la confirmation de quit
            app.cancel_quit();

            if let Some(column) = get_sort_column(&event) {
                return SortField::from_column(column).map(|field| {
                    info!(field = ?field, "User clicked column header");
                    Action::SortBy(field)
                });
            }

            if is_search_event(&event) {
                debug!("User entered search mode");
                app.start_search();
                None
            } else if is_reset_search_event(&event) {
                Some(Action::ResetSearch)
            } else if is_currency_event(&event) {
                debug!("User opened currency picker");
                app.open_currency_picker();
                None
            } else if is_refresh_event(&event) {
                info!("User requested refresh");
                Some(Action::Refresh)
            } else if is_up_event(&event) {
                app.navigate_up();
                None
            } else if is_down_event(&event) {
                app.navigate_down();
                None
            } else {
                None
            }
        }

        Event::Tick => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
