// ============================================================================
// Ligne de commande
// ============================================================================
// Sans sous-commande : lance le dashboard TUI.
// Avec "quote" ou "health" : une seule requête, JSON sur stdout.
//
// Chaque option a un fallback sur une variable d'environnement (feature "env"
// de clap), elles-mêmes chargeables depuis un fichier .env.
// ============================================================================

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{ApiVariant, BackendConfig, DEFAULT_ORIGIN};

/// Dashboard terminal pour le backend AI Investment Trader
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Origine du backend
    #[arg(long, env = "LAZYTRADER_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Variante d'API du backend
    #[arg(long, env = "LAZYTRADER_API", value_enum, default_value_t = ApiVariant::V1)]
    pub api: ApiVariant,

    /// Timeout des requêtes en secondes (défaut : aucun)
    #[arg(long, env = "LAZYTRADER_TIMEOUT")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Récupère la quote d'un symbole et l'affiche en JSON
    Quote {
        /// Symbole du ticker (ex: AAPL)
        symbol: String,
    },

    /// Interroge le health check du backend
    Health,
}

impl Cli {
    /// Construit la configuration backend à partir des arguments
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(&self.origin, self.api)
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}
