// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état du dashboard TUI
//
// CONCEPTS RUST :
// 1. State Management : tout l'état affiché vit dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
//
// PATTERN : "Application State"
// - Le rendu lit depuis App
// - Les boutons passent par press_quote() / press_health()
// - Les réponses reviennent par apply_response()
// ============================================================================

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{BackendRequest, Panel};

/// Message affiché quand on demande une quote sans symbole
pub const EMPTY_SYMBOL_WARNING: &str = "Please enter a stock symbol.";

// ============================================================================
// Enum : Focus
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul widget a le focus à la fois
// - Tab fait tourner le focus : Input → QuoteButton → HealthButton → Input
// ============================================================================

/// Widget qui reçoit les touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Champ de saisie du symbole
    Input,

    /// Bouton "Get Quote"
    QuoteButton,

    /// Bouton "Get Health" (absent en API legacy)
    HealthButton,
}

/// Action déclenchée par un bouton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetQuote,
    GetHealth,
}

/// État principal du dashboard
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    pub focus: Focus,

    /// Symbole en cours de saisie, envoyé tel quel au backend
    pub input_buffer: String,

    /// Ligne d'état au-dessus de la sortie (ex: "Fetching quote for AAPL...")
    pub status: Option<String>,

    /// Zone de sortie : JSON, warning ou erreur
    pub panel: Panel,

    /// Décalage vertical de la zone de sortie
    pub scroll: u16,

    /// Two-step quit : première pression d'Esc arme, la seconde quitte
    pub confirm_quit: bool,

    /// Affiche le bouton "Get Health"
    pub health_enabled: bool,
}

impl App {
    /// Crée un dashboard vide
    ///
    /// `health_enabled` : false en API legacy (pas de bouton health)
    pub fn new(health_enabled: bool) -> Self {
        Self {
            running: true,
            focus: Focus::Input,
            input_buffer: String::new(),
            status: None,
            panel: Panel::Empty,
            scroll: 0,
            confirm_quit: false,
            health_enabled,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Boutons
    // ========================================================================

    /// Appui sur un bouton
    pub fn press(&mut self, action: Action) -> Option<BackendRequest> {
        match action {
            Action::GetQuote => self.press_quote(),
            Action::GetHealth => self.press_health(),
        }
    }

    /// Appui sur "Get Quote"
    ///
    /// CONCEPT : Garde avant la requête
    /// - Symbole vide : warning, aucune requête (None)
    /// - Sinon : message d'attente et requête à exécuter
    pub fn press_quote(&mut self) -> Option<BackendRequest> {
        if self.input_buffer.is_empty() {
            warn!("Quote requested with an empty symbol");
            self.status = None;
            self.show(Panel::Warning(EMPTY_SYMBOL_WARNING.to_string()));
            return None;
        }

        let symbol = self.input_buffer.clone();
        debug!(ticker = %symbol, "Quote requested");
        self.status = Some(format!("Fetching quote for {}...", symbol));
        Some(BackendRequest::Quote { symbol })
    }

    /// Appui sur "Get Health"
    pub fn press_health(&mut self) -> Option<BackendRequest> {
        if !self.health_enabled {
            return None;
        }

        debug!("Health check requested");
        self.status = Some("Checking backend health...".to_string());
        Some(BackendRequest::Health)
    }

    /// Affiche le résultat d'une requête
    ///
    /// CONCEPT RUST : Result comme valeur
    /// - Ok(json) : zone JSON
    /// - Err(e) : message d'erreur, jamais de JSON
    /// - {:#} affiche toute la chaîne de contexte anyhow
    pub fn apply_response(&mut self, request: &BackendRequest, result: Result<Value>) {
        match result {
            Ok(value) => self.show(Panel::json(request.label(), value)),
            Err(e) => self.show(Panel::Error(format!("Error calling the backend: {:#}", e))),
        }
    }

    fn show(&mut self, panel: Panel) {
        self.panel = panel;
        self.scroll = 0;
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Boutons visibles, dans l'ordre d'affichage
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Input, Focus::QuoteButton];
        if self.health_enabled {
            order.push(Focus::HealthButton);
        }
        order
    }

    /// Passe au widget suivant (Tab)
    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(current + 1) % order.len()];
    }

    /// Revient au widget précédent (Shift+Tab)
    pub fn focus_previous(&mut self) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(current + order.len() - 1) % order.len()];
    }

    /// Action déclenchée par Entrée selon le focus
    ///
    /// Entrée dans le champ de saisie vaut "Get Quote".
    pub fn focused_action(&self) -> Action {
        match self.focus {
            Focus::Input | Focus::QuoteButton => Action::GetQuote,
            Focus::HealthButton => Action::GetHealth,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.focus == Focus::Input
    }

    // ========================================================================
    // Saisie
    // ========================================================================

    /// Ajoute un caractère au symbole
    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    /// Supprime le dernier caractère du symbole
    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    // ========================================================================
    // Scroll de la sortie
    // ========================================================================

    /// Descend dans la sortie, sans dépasser la dernière ligne
    ///
    /// Au-delà de u16::MAX lignes, le décalage plafonne à u16::MAX.
    pub fn scroll_down(&mut self, lines: u16) {
        let last_line = self.panel.lines().len().saturating_sub(1);
        let max = u16::try_from(last_line).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    // ========================================================================
    // Quit Confirmation Management
    // ========================================================================

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(true)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
