//! API route handlers.
//!
//! All endpoints return JSON. The aggregator is shared via `Arc`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::error::SnapshotError;
use crate::snapshot::SnapshotAggregator;
use crate::types::SnapshotResponse;

pub type AppState = Arc<SnapshotAggregator>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A failed snapshot, rendered as a JSON error body.
///
/// Upstream problems are 502 so clients can tell "weather is down" apart
/// from a bug on our side (500).
#[derive(Debug)]
pub struct ApiError(pub SnapshotError);

impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(status = %status, error = %self.0, "Snapshot request failed");

        let message = if self.0.is_configuration() {
            "internal configuration error".to_string()
        } else {
            self.0.to_string()
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/snapshot
pub async fn get_snapshot(
    State(state): State<AppState>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let snapshot = state.build().await?;
    Ok(Json(snapshot))
}

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { ok: true })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamStage;
    use crate::types::TimePhase;

    #[test]
    fn test_upstream_errors_are_bad_gateway() {
        let err = ApiError::from(SnapshotError::upstream(UpstreamStage::Grid, "timed out"));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(SnapshotError::format(UpstreamStage::Forecast, "no periods"));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_configuration_errors_are_internal() {
        let err = ApiError::from(SnapshotError::MissingPhase(TimePhase::Dawn));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_ping_response_serializes() {
        let json = serde_json::to_string(&PingResponse { ok: true }).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_ping_handler() {
        let Json(resp) = ping().await;
        assert!(resp.ok);
    }

    #[tokio::test]
    async fn test_configuration_error_body_is_generic() {
        let resp = ApiError::from(SnapshotError::MissingPhase(TimePhase::Night)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal configuration error");
    }
}
