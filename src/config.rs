// ============================================================================
// Configuration du backend
// ============================================================================
// Où se trouve le backend et quelle forme d'API il expose.
//
// Deux variantes coexistent :
// - V1     : /api/v1/marketdata/quotes/{symbol} + /api/v1/health
// - Legacy : /api/marketdata/quotes/{symbol}, sans health check
//
// Les chemins sont décrits segment par segment : le client construit l'URL
// avec reqwest::Url, qui encode chaque segment.
// ============================================================================

use std::time::Duration;

use clap::ValueEnum;

/// Origine par défaut du backend
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Variante d'API exposée par le backend
///
/// CONCEPT RUST : derive(ValueEnum)
/// - clap génère le parsing "v1" / "legacy" depuis la ligne de commande
/// - Copy : enum sans données, copiée comme un entier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ApiVariant {
    /// Routes versionnées, avec health check
    #[default]
    V1,

    /// Ancienne route des quotes, sans health check
    Legacy,
}

impl ApiVariant {
    /// Segments du chemin des quotes (le symbole est ajouté à la fin)
    pub fn quote_segments(&self) -> &'static [&'static str] {
        match self {
            ApiVariant::V1 => &["api", "v1", "marketdata", "quotes"],
            ApiVariant::Legacy => &["api", "marketdata", "quotes"],
        }
    }

    /// Segments du health check, None si la variante n'en a pas
    pub fn health_segments(&self) -> Option<&'static [&'static str]> {
        match self {
            ApiVariant::V1 => Some(&["api", "v1", "health"]),
            ApiVariant::Legacy => None,
        }
    }

    /// Indique si le bouton "Get Health" doit être affiché
    pub fn has_health(&self) -> bool {
        self.health_segments().is_some()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApiVariant::V1 => "v1",
            ApiVariant::Legacy => "legacy",
        }
    }
}

/// Paramètres de connexion au backend
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Origine (schéma + hôte + port), ex: "http://localhost:8080"
    pub origin: String,

    pub variant: ApiVariant,

    /// Timeout des requêtes. None : comportement par défaut de reqwest
    pub timeout: Option<Duration>,
}

impl BackendConfig {
    /// Crée une configuration pour une origine donnée
    ///
    /// Le '/' final éventuel est retiré (origine affichée dans les logs et les erreurs).
    pub fn new(origin: impl Into<String>, variant: ApiVariant) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            variant,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN, ApiVariant::default())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
