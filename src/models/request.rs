// ============================================================================
// Enum : BackendRequest
// ============================================================================
// Une requête vers le backend, produite par un appui sur un bouton.
// Chaque requête est indépendante : aucune mémoire des précédentes.
// ============================================================================

use crate::config::ApiVariant;

/// Requête GET à envoyer au backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRequest {
    /// Quote d'un symbole, inséré tel quel dans le chemin
    Quote { symbol: String },

    /// Health check (sans paramètre)
    Health,
}

impl BackendRequest {
    /// Segments du chemin pour une variante d'API, non encodés
    ///
    /// CONCEPT RUST : Lifetime élidée
    /// - Le symbole est emprunté à self, les autres segments sont 'static
    /// - None si la variante n'expose pas l'endpoint (health en legacy)
    pub fn segments(&self, variant: ApiVariant) -> Option<Vec<&str>> {
        match self {
            BackendRequest::Quote { symbol } => {
                let mut segments = variant.quote_segments().to_vec();
                segments.push(symbol.as_str());
                Some(segments)
            }
            BackendRequest::Health => variant.health_segments().map(|segments| segments.to_vec()),
        }
    }

    /// Libellé court, utilisé comme titre de la zone JSON
    pub fn label(&self) -> String {
        match self {
            BackendRequest::Quote { symbol } => format!("Quote {}", symbol),
            BackendRequest::Health => "Health".to_string(),
        }
    }
}
