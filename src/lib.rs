// ============================================================================
// LazyTrader - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod actions; // Cycle requête → rendu
pub mod api;     // Client HTTP du backend
pub mod app;     // État du dashboard
pub mod cli;     // Ligne de commande
pub mod config;  // Origine et variante d'API
pub mod models;  // Structures de données
pub mod ui;      // Interface utilisateur

#[cfg(test)]
mod testing;     // Faux backend HTTP pour les tests
