// ============================================================================
// Module : api
// ============================================================================
// Client HTTP vers le backend AI Investment Trader
// ============================================================================

pub mod backend; // Client du backend (quotes + health)

// Re-export du client
pub use backend::BackendClient;
