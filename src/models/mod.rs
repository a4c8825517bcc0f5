// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module public
// - Les "pub use" permettent d'écrire lazytrader::models::Panel
// ============================================================================

pub mod panel;   // Contenu de la zone de sortie (JSON, warning, erreur)
pub mod request; // Requêtes possibles vers le backend

pub use panel::Panel;
pub use request::BackendRequest;
