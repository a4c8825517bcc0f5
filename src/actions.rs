// ============================================================================
// Actions : cycle requête → rendu
// ============================================================================
// Un appui sur un bouton = une transaction indépendante :
// 1. App décide s'il y a une requête (symbole vide → warning, pas de réseau)
// 2. BackendClient exécute le GET
// 3. App affiche le JSON ou l'erreur
// ============================================================================

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::api::BackendClient;
use crate::app::{Action, App, EMPTY_SYMBOL_WARNING};
use crate::models::BackendRequest;

/// Exécute l'action d'un bouton
///
/// `on_pending` est appelé une fois la requête décidée, juste avant l'envoi :
/// le TUI s'en sert pour dessiner "Fetching quote for ..." avant de bloquer.
///
/// Retourne Ok(true) si une requête a été envoyée au backend. Une requête en
/// échec n'est pas une erreur ici : elle finit dans le Panel.
pub async fn perform<F>(
    app: &mut App,
    client: &BackendClient,
    action: Action,
    mut on_pending: F,
) -> Result<bool>
where
    F: FnMut(&App) -> Result<()>,
{
    let Some(request) = app.press(action) else {
        return Ok(false);
    };

    on_pending(app)?;

    let result = client.fetch(&request).await;
    match &result {
        Ok(_) => info!(request = %request.label(), "Request succeeded"),
        Err(e) => error!(request = %request.label(), error = ?e, "Request failed"),
    }

    app.apply_response(&request, result);
    Ok(true)
}

/// Mode non interactif : une requête, JSON pretty-printé
///
/// Même garde que le bouton "Get Quote" : symbole vide → erreur, pas de réseau.
pub async fn fetch_once(client: &BackendClient, request: &BackendRequest) -> Result<String> {
    if let BackendRequest::Quote { symbol } = request {
        if symbol.is_empty() {
            anyhow::bail!(EMPTY_SYMBOL_WARNING);
        }
    }

    let value = client
        .fetch(request)
        .await
        .context("Error calling the backend")?;

    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiVariant, BackendConfig};
    use crate::models::Panel;
    use crate::testing::{seen, spawn_backend, unreachable_origin};
    use serde_json::json;

    fn client(origin: &str) -> BackendClient {
        BackendClient::new(BackendConfig::new(origin, ApiVariant::V1)).unwrap()
    }

    #[tokio::test]
    async fn test_quote_issues_exactly_one_get() {
        let (origin, requests) =
            spawn_backend(200, r#"{"symbol":"AAPL","price":190.12}"#).await;
        let mut app = App::new(true);
        app.input_buffer = "AAPL".to_string();

        let mut pending = Vec::new();
        let sent = perform(&mut app, &client(&origin), Action::GetQuote, |app| {
            pending.push(app.status.clone());
            Ok(())
        })
        .await
        .unwrap();

        assert!(sent);
        assert_eq!(pending, vec![Some("Fetching quote for AAPL...".to_string())]);
        let lines = seen(&requests);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "GET /api/v1/marketdata/quotes/AAPL");
        assert!(app.panel.is_json());
        assert_eq!(app.status.as_deref(), Some("Fetching quote for AAPL..."));
    }

    #[tokio::test]
    async fn test_empty_symbol_issues_no_request() {
        let (origin, requests) = spawn_backend(200, "{}").await;
        let mut app = App::new(true);

        let mut pending_calls = 0;
        let sent = perform(&mut app, &client(&origin), Action::GetQuote, |_| {
            pending_calls += 1;
            Ok(())
        })
        .await
        .unwrap();

        assert!(!sent);
        assert_eq!(pending_calls, 0);

        assert!(seen(&requests).is_empty());
        assert!(app.panel.is_warning());
    }

    #[tokio::test]
    async fn test_server_error_shows_message_and_no_json() {
        let (origin, _requests) = spawn_backend(500, "{}").await;
        let mut app = App::new(true);
        app.input_buffer = "AAPL".to_string();

        perform(&mut app, &client(&origin), Action::GetQuote, |_| Ok(()))
            .await
            .unwrap();

        match &app.panel {
            Panel::Error(message) => {
                assert!(message.starts_with("Error calling the backend"));
                assert!(message.contains("500"));
            }
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_shows_error() {
        let mut app = App::new(true);
        app.input_buffer = "AAPL".to_string();

        let sent = perform(&mut app, &client(&unreachable_origin()), Action::GetQuote, |_| Ok(()))
            .await
            .unwrap();

        assert!(sent);

        assert!(app.panel.is_error());
        assert!(!app.panel.is_json());
    }

    #[tokio::test]
    async fn test_health_action() {
        let (origin, requests) = spawn_backend(200, r#"{"status":"ok"}"#).await;
        let mut app = App::new(true);
        app.input_buffer = "ignored".to_string();

        let sent = perform(&mut app, &client(&origin), Action::GetHealth, |_| Ok(()))
            .await
            .unwrap();

        assert!(sent);

        assert_eq!(seen(&requests), vec!["GET /api/v1/health".to_string()]);
        match &app.panel {
            Panel::Json { value, .. } => assert_eq!(value, &json!({"status": "ok"})),
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whitespace_symbol_sent_encoded() {
        let (origin, requests) = spawn_backend(200, "{}").await;
        let mut app = App::new(true);
        app.input_buffer = "aapl ".to_string();

        perform(&mut app, &client(&origin), Action::GetQuote, |_| Ok(()))
            .await
            .unwrap();

        assert_eq!(
            seen(&requests),
            vec!["GET /api/v1/marketdata/quotes/aapl%20".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_once_pretty_prints() {
        let (origin, requests) = spawn_backend(200, r#"{"status":"ok"}"#).await;

        let output = fetch_once(&client(&origin), &BackendRequest::Health).await.unwrap();

        assert_eq!(output, "{\n  \"status\": \"ok\"\n}");
        assert_eq!(seen(&requests).len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_once_rejects_empty_symbol() {
        let (origin, requests) = spawn_backend(200, "{}").await;

        let err = fetch_once(
            &client(&origin),
            &BackendRequest::Quote { symbol: String::new() },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), EMPTY_SYMBOL_WARNING);
        assert!(seen(&requests).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_once_reports_server_error() {
        let (origin, _requests) = spawn_backend(503, "{}").await;

        let err = fetch_once(
            &client(&origin),
            &BackendRequest::Quote { symbol: "AAPL".to_string() },
        )
        .await
        .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.starts_with("Error calling the backend"));
        assert!(message.contains("503"));
    }
}
