// HTTP request handlers
use crate::application::config_service::ConfigError;
use crate::application::ingest_service::IngestError;
use crate::infrastructure::http_response::{json_response, text_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
};
use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Receive a push report from a sensor.community device
pub async fn ingest_report(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    tracing::debug!("{} {} {}", method, uri.path(), uri.query().unwrap_or_default());
    tracing::debug!("{:?}", headers);
    tracing::debug!("{}", String::from_utf8_lossy(&body));

    match state.ingest_service.ingest(&body).await {
        Ok(outcome) if outcome.is_success() => {
            tracing::debug!(
                "Report processed: {} sensors updated, {} readings skipped",
                outcome.updated.len(),
                outcome.skipped
            );
            text_response(StatusCode::OK, "success")
        }
        Ok(outcome) => text_response(StatusCode::INTERNAL_SERVER_ERROR, outcome.error_message()),
        Err(IngestError::Report(e)) => {
            tracing::warn!("Rejected report: {}", e);
            text_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e @ IngestError::Gateway(_)) => {
            tracing::error!("{}", e);
            text_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

pub async fn get_config_description(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    json_response(StatusCode::OK, &state.config_service.description())
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    json_response(StatusCode::OK, &state.config_service.get().await)
}

pub async fn set_config(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    match state.config_service.set(&body).await {
        Ok(()) => json_response(StatusCode::OK, &json!({"success": true})),
        Err(e @ ConfigError::Store(_)) => {
            tracing::error!("{}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"success": false, "msg": e.to_string()}),
            )
        }
        Err(e) => {
            tracing::warn!("Rejected config: {}", e);
            json_response(
                StatusCode::BAD_REQUEST,
                &json!({"success": false, "msg": e.to_string()}),
            )
        }
    }
}
