// ============================================================================
// API Client : backend AI Investment Trader
// ============================================================================
// Une requête GET par action utilisateur, réponse JSON opaque.
//
// - 2xx : le corps est parsé en JSON et retourné tel quel
// - non-2xx ou erreur de transport : Err avec contexte
// - Pas de retry, pas de backoff
// ============================================================================

use anyhow::{Context, Result};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::config::BackendConfig;
use crate::models::BackendRequest;

/// User-Agent envoyé au backend
const USER_AGENT: &str = concat!("lazytrader/", env!("CARGO_PKG_VERSION"));

/// Client du backend
///
/// CONCEPT RUST : Composition
/// - reqwest::Client garde un pool de connexions, on le crée une seule fois
/// - La config décide de l'origine et de la forme des chemins
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Crée le client HTTP pour une configuration donnée
    pub fn new(config: BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .context("Échec de la création du client HTTP")?;

        debug!(origin = %config.origin, api = config.variant.label(), "Backend client created");
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// URL complète d'une requête
    ///
    /// CONCEPT : Encodage par segment
    /// - Chaque segment passe par path_segments_mut() : espaces, '/', '?', '#'
    ///   sont percent-encodés au lieu d'être coupés ou interprétés
    /// - Le symbole arrive donc tel quel au backend ("aapl " → "aapl%20")
    ///
    /// Erreur si la variante n'a pas l'endpoint, ou si le symbole est "." ou
    /// "..", qu'une URL HTTP ne peut pas porter comme segment.
    pub fn url_for(&self, request: &BackendRequest) -> Result<Url> {
        let segments = request.segments(self.config.variant).with_context(|| {
            format!(
                "L'API {} n'expose pas de health check",
                self.config.variant.label()
            )
        })?;

        if let BackendRequest::Quote { symbol } = request {
            if matches!(symbol.as_str(), "." | "..") {
                anyhow::bail!("Le symbole {:?} ne peut pas être placé dans une URL", symbol);
            }
        }

        let mut url = Url::parse(&self.config.origin)
            .with_context(|| format!("Origine du backend invalide : {}", self.config.origin))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("L'origine {} ne peut pas porter de chemin", self.config.origin))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// URL de la quote d'un symbole
    pub fn quote_url(&self, symbol: &str) -> Result<Url> {
        self.url_for(&BackendRequest::Quote { symbol: symbol.to_string() })
    }

    /// URL du health check (erreur en API legacy)
    pub fn health_url(&self) -> Result<Url> {
        self.url_for(&BackendRequest::Health)
    }

    /// Récupère la quote d'un symbole
    ///
    /// # Exemple
    /// let quote = client.fetch_quote("AAPL").await?;
    /// println!("{}", serde_json::to_string_pretty(&quote)?);
    #[instrument(skip(self))]
    pub async fn fetch_quote(&self, symbol: &str) -> Result<Value> {
        let url = self.quote_url(symbol)?;
        self.get_json(url).await
    }

    /// Interroge le health check du backend
    #[instrument(skip(self))]
    pub async fn fetch_health(&self) -> Result<Value> {
        let url = self.health_url()?;
        self.get_json(url).await
    }

    /// Exécute une requête, quel que soit son type
    pub async fn fetch(&self, request: &BackendRequest) -> Result<Value> {
        match request {
            BackendRequest::Quote { symbol } => self.fetch_quote(symbol).await,
            BackendRequest::Health => self.fetch_health().await,
        }
    }

    /// GET + vérification du statut + parsing JSON
    async fn get_json(&self, url: Url) -> Result<Value> {
        debug!(url = %url, "Sending HTTP request to backend");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Échec de la requête HTTP vers {}", url))?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // Vérifie que la réponse est un succès HTTP (200-299)
        if !status.is_success() {
            error!(status = %status, url = %url, "Backend returned error status");
            anyhow::bail!("Le backend a retourné une erreur : HTTP {} pour {}", status, url);
        }

        let body: Value = response
            .json()
            .await
            .context("Échec du parsing JSON de la réponse du backend")?;

        info!(url = %url, "Backend response received");
        Ok(body)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
