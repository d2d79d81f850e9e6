//! HTTP boundary: a small axum service exposing lookups.
//!
//! Two routes: `GET /health` for liveness and `POST /api/search` for
//! lookups. Classification failures map to 400 with the validation
//! message verbatim; anything unexpected maps to a generic 500 so no
//! internal detail leaks to the caller.

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::query::QueryType;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

#[derive(Clone)]
struct ServerState {
    config: Arc<LookupConfig>,
}

#[derive(serde::Deserialize)]
struct SearchRequest {
    query: String,
    /// Explicit type hint. Omitted means auto-detect.
    #[serde(default, alias = "type")]
    query_type: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default, alias = "deepScan")]
    deep_scan: bool,
}

/// Build the application router.
pub fn router(config: LookupConfig) -> Router {
    let state = ServerState {
        config: Arc::new(config),
    };
    Router::new()
        .route("/health", get(health))
        .route("/api/search", post(search))
        .with_state(state)
}

/// Bind `addr` and serve lookups until the process exits.
///
/// # Errors
///
/// Returns [`LookupError::Config`] if the address cannot be bound.
pub async fn run(addr: &str, config: LookupConfig) -> crate::error::Result<()> {
    config.validate()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| LookupError::Config(format!("failed to bind {addr}: {e}")))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| LookupError::Config(format!("failed to read local address: {e}")))?;

    tracing::info!("lookup service listening on http://{local_addr}");
    axum::serve(listener, router(config))
        .await
        .map_err(|e| LookupError::Config(format!("server error: {e}")))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

async fn search(
    State(state): State<ServerState>,
    Json(body): Json<SearchRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let hint = match body.query_type.as_deref() {
        None => None,
        Some(raw) => match QueryType::parse(raw) {
            Some(t) => Some(t),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                        "error": format!("Unknown query type: {raw}")
                    })),
                );
            }
        },
    };

    match crate::lookup(
        &body.query,
        hint,
        body.state,
        body.deep_scan,
        &state.config,
    )
    .await
    {
        Ok(profile) => match serde_json::to_value(&profile) {
            Ok(value) => (StatusCode::OK, Json(value)),
            Err(e) => {
                tracing::error!("failed to serialize profile: {e}");
                internal_error()
            }
        },
        Err(LookupError::InvalidQuery(reason)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": reason})),
        ),
        Err(e) => {
            tracing::error!("lookup failed: {e}");
            internal_error()
        }
    }
}

fn internal_error() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "internal error"})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_camel_case_deep_scan() {
        let body: SearchRequest =
            serde_json::from_str(r#"{"query": "octocat", "deepScan": true}"#).expect("parse");
        assert!(body.deep_scan);
        assert!(body.query_type.is_none());
    }

    #[test]
    fn request_accepts_type_alias() {
        let body: SearchRequest =
            serde_json::from_str(r#"{"query": "a@b.com", "type": "email"}"#).expect("parse");
        assert_eq!(body.query_type.as_deref(), Some("email"));
    }

    #[test]
    fn request_defaults_are_conservative() {
        let body: SearchRequest = serde_json::from_str(r#"{"query": "octocat"}"#).expect("parse");
        assert!(!body.deep_scan);
        assert!(body.state.is_none());
    }

    fn state() -> ServerState {
        ServerState {
            config: Arc::new(LookupConfig::default()),
        }
    }

    fn request(json: &str) -> SearchRequest {
        serde_json::from_str(json).expect("parse request")
    }

    // Classification failures answer before any probe fires, so these
    // handler tests never touch the network.

    #[tokio::test]
    async fn malformed_email_answers_400_with_reason() {
        let (status, Json(body)) = search(
            State(state()),
            Json(request(r#"{"query": "not-an-email", "type": "email"}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email format");
    }

    #[tokio::test]
    async fn single_word_name_answers_400_with_reason() {
        let (status, Json(body)) = search(
            State(state()),
            Json(request(r#"{"query": "Cher", "type": "name"}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please provide first and last name");
    }

    #[tokio::test]
    async fn unknown_type_answers_400() {
        let (status, Json(body)) = search(
            State(state()),
            Json(request(r#"{"query": "octocat", "type": "carrier-pigeon"}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.contains("carrier-pigeon")));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }
}
