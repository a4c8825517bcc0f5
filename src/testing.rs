// ============================================================================
// Outils de test : faux backend HTTP
// ============================================================================
// Un Router axum avec un seul handler "fallback" : il répond toujours le même
// statut et le même corps, et enregistre "METHOD /chemin" de chaque requête.
// ============================================================================

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;

/// Requêtes reçues par le faux backend ("GET /api/v1/health")
pub type SeenRequests = Arc<Mutex<Vec<String>>>;

/// État partagé du faux backend
#[derive(Clone)]
struct FakeBackend {
    seen: SeenRequests,
    status: StatusCode,
    body: &'static str,
}

/// Handler unique : enregistre la requête et renvoie la réponse prévue
async fn record(State(backend): State<FakeBackend>, method: Method, uri: Uri) -> impl IntoResponse {
    backend.seen.lock().unwrap().push(format!("{} {}", method, uri));
    (
        backend.status,
        [(header::CONTENT_TYPE, "application/json")],
        backend.body,
    )
}

/// Lance un faux backend et retourne son origine ("http://127.0.0.1:PORT")
pub async fn spawn_backend(status: u16, body: &'static str) -> (String, SeenRequests) {
    let seen: SeenRequests = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend {
        seen: seen.clone(),
        status: StatusCode::from_u16(status).unwrap(),
        body,
    };

    let app = Router::new().fallback(record).with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

/// Origine sur laquelle plus rien n'écoute (connexion refusée)
pub fn unreachable_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Copie des requêtes reçues jusqu'ici
pub fn seen(requests: &SeenRequests) -> Vec<String> {
    requests.lock().unwrap().clone()
}
