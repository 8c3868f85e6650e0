// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier (crossterm) et fournit des helpers pour
// identifier les touches
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Aucun événement pendant `tick_rate` : on redessine quand même
    /// (les réponses du worker arrivent entre deux touches)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Lit le prochain événement (bloquant au plus `tick_rate`)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS on reçoit Press ET Release : on ne garde que Press
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                // Resize, souris, Release : simple rafraîchissement
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

// ============================================================================
// Helpers : identifier les touches
// ============================================================================

/// Code de la touche, sans les raccourcis Ctrl/Alt sur un caractère
/// (Ctrl+C ne doit ni ouvrir le sélecteur ni s'écrire dans la recherche)
fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key)
            if matches!(key.code, KeyCode::Char(_))
                && key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            None
        }
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// 'q' : quitter (two-step)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

pub fn is_backspace_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Backspace))
}

/// Flèche vers le haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    )
}

/// Flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    )
}

/// '/' : entrer en mode recherche
pub fn is_search_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('/')))
}

/// 'x' : reset de la recherche
pub fn is_reset_search_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('x') | KeyCode::Char('X')))
}

/// 'c' : ouvrir le sélecteur de devise
pub fn is_currency_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('c') | KeyCode::Char('C')))
}

/// 'r' : recharger les données
pub fn is_refresh_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('r') | KeyCode::Char('R')))
}

/// '1'..'9' : index (0-based) de la colonne dont on "clique" l'en-tête
pub fn get_sort_column(event: &Event) -> Option<usize> {
    match key_code(event) {
        Some(KeyCode::Char(c @ '1'..='9')) => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// Caractère saisi, pour la recherche
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match key_code(event) {
        Some(KeyCode::Char(c)) if !c.is_control() => Some(c),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_get_sort_column() {
        assert_eq!(get_sort_column(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(get_sort_column(&key(KeyCode::Char('8'))), Some(7));
        assert_eq!(get_sort_column(&key(KeyCode::Char('0'))), None);
        assert_eq!(get_sort_column(&key(KeyCode::Char('a'))), None);
        assert_eq!(get_sort_column(&Event::Tick), None);
    }

    #[test]
    fn test_get_char_from_event() {
        assert_eq!(get_char_from_event(&key(KeyCode::Char('D'))), Some('D'));
        assert_eq!(get_char_from_event(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_control_and_alt_chars_are_ignored() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(get_char_from_event(&ctrl_c), None);
        assert!(!is_currency_event(&ctrl_c));

        let alt_q = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT));
        assert!(!is_quit_event(&alt_q));

        let shift_d = Event::Key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT));
        assert_eq!(get_char_from_event(&shift_d), Some('D'));

        let ctrl_enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL));
        assert!(is_enter_event(&ctrl_enter));
    }

    #[test]
    fn test_navigation_keys() {
        assert!(is_up_event(&key(KeyCode::Up)));
        assert!(is_down_event(&key(KeyCode::Char('j'))));
        assert!(is_search_event(&key(KeyCode::Char('/'))));
        assert!(is_currency_event(&key(KeyCode::Char('c'))));
        assert!(is_refresh_event(&key(KeyCode::Char('r'))));
        assert!(is_reset_search_event(&key(KeyCode::Char('x'))));
    }
}
