// ============================================================================
// Gestion des événements
// ============================================================================
// Lecture des événements clavier (crossterm) et ticks réguliers
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching sur KeyCode et KeyModifiers
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::app::{Action, App};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (rafraîchissement)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire avec un tick de 250ms
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au maximum tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release : on garde Press
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),

                // Release, resize, souris : simple rafraîchissement
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : identifier les touches
// ============================================================================

/// Extrait le KeyEvent d'un événement
fn key_of(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) => Some(key),
        Event::Tick => None,
    }
}

/// Ctrl+C : quitter immédiatement
pub fn is_force_quit_event(event: &Event) -> bool {
    key_of(event).map_or(false, |key| {
        key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
    })
}

/// Vérifie si l'événement est Échap (quit en deux temps)
pub fn is_escape_event(event: &Event) -> bool {
    key_of(event).map_or(false, |key| key.code == KeyCode::Esc)
}

/// Vérifie si l'événement est Entrée (appui sur le bouton focalisé)
pub fn is_enter_event(event: &Event) -> bool {
    key_of(event).map_or(false, |key| key.code == KeyCode::Enter)
}

/// Tab : widget suivant
pub fn is_tab_event(event: &Event) -> bool {
    key_of(event).map_or(false, |key| key.code == KeyCode::Tab)
}

/// Shift+Tab : widget précédent
pub fn is_backtab_event(event: &Event) -> bool {
    key_of(event).map_or(false, |key| key.code == KeyCode::BackTab)
}

/// Vérifie si l'événement est Backspace
pub fn is_backspace_event(event: &Event) -> bool {
    key_of(event).map_or(false, |key| key.code == KeyCode::Backspace)
}

/// PageUp ou flèche haut : remonte dans la sortie
pub fn is_scroll_up_event(event: &Event) -> bool {
    key_of(event).map_or(false, |key| matches!(key.code, KeyCode::PageUp | KeyCode::Up))
}

/// PageDown ou flèche bas : descend dans la sortie
pub fn is_scroll_down_event(event: &Event) -> bool {
    key_of(event).map_or(false, |key| matches!(key.code, KeyCode::PageDown | KeyCode::Down))
}

/// Extrait le caractère d'un événement clavier (sans Ctrl/Alt)
///
/// Aucune validation du format ticker : tout caractère imprimable est accepté.
pub fn get_char_from_event(event: &Event) -> Option<char> {
    let key = key_of(event)?;
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

// ============================================================================
// Dispatch : événement → état de l'app
// ============================================================================

/// Traite un événement, retourne l'action à exécuter si un bouton est pressé
///
/// CONCEPT RUST : Retour Option au lieu d'effet de bord
/// - La fonction ne touche pas au réseau
/// - L'appelant exécute l'Action (GET bloquant) puis redessine
pub fn handle_event(app: &mut App, event: Event) -> Option<Action> {
    if matches!(event, Event::Tick) {
        return None;
    }

    // Ctrl+C : sortie immédiate
    if is_force_quit_event(&event) {
        info!("User forced quit");
        app.quit();
        return None;
    }

    // Esc : quit en deux temps
    if is_escape_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return None;
    }

    // Toute autre touche annule la confirmation
    app.cancel_quit();

    if is_enter_event(&event) {
        let action = app.focused_action();
        info!(?action, "User pressed button");
        return Some(action);
    }

    if is_tab_event(&event) {
        app.focus_next();
    } else if is_backtab_event(&event) {
        app.focus_previous();
    } else if is_scroll_up_event(&event) {
        app.scroll_up(1);
    } else if is_scroll_down_event(&event) {
        app.scroll_down(1);
    } else if app.is_editing() {
        if is_backspace_event(&event) {
            app.backspace();
        } else if let Some(c) = get_char_from_event(&event) {
            app.append_char(c);
        }
    }

    None
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
    fn test_force_quit_event() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(is_force_quit_event(&ctrl_c));
        assert!(!is_force_quit_event(&key(KeyCode::Char('c'))));
        assert!(!is_force_quit_event(&Event::Tick));
    }

    #[test]
    fn test_char_extraction() {
        assert_eq!(get_char_from_event(&key(KeyCode::Char('q'))), Some('q'));
        assert_eq!(get_char_from_event(&key(KeyCode::Char('.'))), Some('.'));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(get_char_from_event(&ctrl_c), None);
        assert_eq!(get_char_from_event(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_navigation_keys() {
        assert!(is_tab_event(&key(KeyCode::Tab)));
        assert!(is_backtab_event(&key(KeyCode::BackTab)));
        assert!(is_enter_event(&key(KeyCode::Enter)));
        assert!(is_escape_event(&key(KeyCode::Esc)));
        assert!(is_scroll_down_event(&key(KeyCode::PageDown)));
        assert!(is_scroll_up_event(&key(KeyCode::Up)));
    }

    // ------------------------------------------------------------------------
    // handle_event
    // ------------------------------------------------------------------------

    use crate::app::Focus;

    fn type_keys(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_event(app, key(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn test_enter_in_input_gets_quote() {
        let mut app = App::new(true);
        type_keys(&mut app, "AAPL");

        assert_eq!(handle_event(&mut app, key(KeyCode::Enter)), Some(Action::GetQuote));
        assert_eq!(app.input_buffer, "AAPL");
    }

    #[test]
    fn test_enter_on_health_button() {
        let mut app = App::new(true);
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Tab));

        assert_eq!(app.focus, Focus::HealthButton);
        assert_eq!(handle_event(&mut app, key(KeyCode::Enter)), Some(Action::GetHealth));
    }

    #[test]
    fn test_chars_ignored_when_button_focused() {
        let mut app = App::new(true);
        type_keys(&mut app, "TS");
        handle_event(&mut app, key(KeyCode::Tab));

        type_keys(&mut app, "LA");
        handle_event(&mut app, key(KeyCode::Backspace));

        assert_eq!(app.focus, Focus::QuoteButton);
        assert_eq!(app.input_buffer, "TS");
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut app = App::new(true);
        type_keys(&mut app, "msft ");
        handle_event(&mut app, key(KeyCode::Backspace));

        assert_eq!(app.input_buffer, "msft");
    }

    #[test]
    fn test_escape_twice_quits() {
        let mut app = App::new(true);

        assert_eq!(handle_event(&mut app, key(KeyCode::Esc)), None);
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.is_running());
    }

    #[test]
    fn test_other_key_cancels_quit() {
        let mut app = App::new(true);
        handle_event(&mut app, key(KeyCode::Esc));

        handle_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.is_awaiting_quit_confirmation());
        assert_eq!(app.input_buffer, "x");

        // Il faut de nouveau deux Esc
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(app.is_running());
    }

    #[test]
    fn test_tick_keeps_quit_confirmation() {
        let mut app = App::new(true);
        handle_event(&mut app, key(KeyCode::Esc));

        assert_eq!(handle_event(&mut app, Event::Tick), None);
        assert!(app.is_awaiting_quit_confirmation());
    }

    #[test]
    fn test_ctrl_c_quits_immediately() {
        let mut app = App::new(true);
        type_keys(&mut app, "AAPL");

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, ctrl_c), None);

        assert!(!app.is_running());
        assert_eq!(app.input_buffer, "AAPL");
    }

    #[test]
    fn test_tab_and_backtab_move_focus() {
        let mut app = App::new(true);

        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::QuoteButton);
        handle_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Input);
        handle_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::HealthButton);
    }

    #[test]
    fn test_backtab_skips_hidden_health() {
        let mut app = App::new(false);

        handle_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::QuoteButton);
    }

    #[test]
    fn test_arrows_scroll_output() {
        let mut app = App::new(true);
        app.apply_response(
            &crate::models::BackendRequest::Health,
            Ok(serde_json::json!({"a": 1, "b": 2})),
        );

        handle_event(&mut app, key(KeyCode::Down));
        handle_event(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.scroll, 2);
        handle_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.scroll, 1);
    }
}
