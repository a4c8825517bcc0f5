// ============================================================================
// Enum : Panel
// ============================================================================
// Contenu de la zone de sortie du dashboard.
//
// CONCEPT RUST : Enum avec données
// - Un seul état affiché à la fois : JSON, warning ou erreur
// - Impossible d'afficher du JSON et une erreur en même temps
// ============================================================================

use chrono::{DateTime, Local};
use serde_json::Value;

/// Zone de sortie du dashboard
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Panel {
    /// Rien à afficher (démarrage)
    #[default]
    Empty,

    /// Réponse JSON du backend, affichée telle quelle
    Json {
        title: String,
        value: Value,
        received_at: DateTime<Local>,
    },

    /// Avertissement (ex: symbole vide), aucune requête envoyée
    Warning(String),

    /// Échec de la requête (transport ou statut HTTP)
    Error(String),
}

impl Panel {
    /// Crée un panel JSON horodaté maintenant
    pub fn json(title: impl Into<String>, value: Value) -> Self {
        Panel::Json {
            title: title.into(),
            value,
            received_at: Local::now(),
        }
    }

    /// Lignes à afficher pour ce panel
    ///
    /// Le JSON est pretty-printé avec serde_json, une ligne par ligne de texte.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Panel::Empty => Vec::new(),
            Panel::Json { value, .. } => serde_json::to_string_pretty(value)
                .unwrap_or_else(|_| value.to_string())
                .lines()
                .map(str::to_string)
                .collect(),
            Panel::Warning(message) | Panel::Error(message) => vec![message.clone()],
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Panel::Json { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Panel::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Panel::Warning(_))
    }
}
