//! REST API endpoint handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, info, warn};
use typescale::catalog::FontCatalog;
use typescale::effect::{EffectRequest, EffectResolver, EffectResult};
use typescale::error::EffectError;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub catalog: FontCatalog,
    /// `None` when no completion credential is configured; effects then
    /// answer 503 while the catalog keeps working.
    pub resolver: Option<Arc<EffectResolver>>,
}

/// Error body: `{"error": "..."}`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// A status code plus a client-safe message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<EffectError> for ApiError {
    fn from(err: EffectError) -> Self {
        match err {
            EffectError::Validation(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            // Upstream details stay in the logs; they may echo provider
            // bodies or request metadata.
            EffectError::Upstream(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, "Failed to generate effect")
            }
        }
    }
}

/// GET /api/fonts — The full catalog, in seed order. No server-side filtering.
///
/// Serializes the shared snapshot directly; the records are never copied.
pub async fn get_fonts(State(app): State<AppState>) -> Json<FontCatalog> {
    debug!("Serving {} fonts", app.catalog.len());
    Json(app.catalog)
}

/// POST /api/effects — Resolve an effect prompt.
///
/// Returns 200 with `{styles, prompt}`, 400 when the prompt is missing or
/// the body is not JSON, 502 when the completion service fails, and 503 when
/// effects are not configured.
pub async fn post_effect(
    State(app): State<AppState>,
    body: Result<Json<EffectRequest>, JsonRejection>,
) -> Result<Json<EffectResult>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        debug!("Rejected effect body: {rejection}");
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", rejection.body_text()),
        )
    })?;

    let Some(resolver) = app.resolver else {
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "AI effects are not configured on this server",
        ));
    };

    match resolver.resolve(request).await {
        Ok(result) => {
            info!("Effect resolved with {} style(s)", result.styles.len());
            Ok(Json(result))
        }
        Err(e) => {
            if !e.is_client_error() {
                warn!("Effect request failed: {e}");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typescale::error::CompletionError;

    #[test]
    fn validation_maps_to_bad_request() {
        let err: ApiError = EffectError::Validation("prompt is required".into()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "prompt is required");
    }

    #[test]
    fn upstream_maps_to_bad_gateway_without_details() {
        let err: ApiError = EffectError::Upstream(CompletionError::Status {
            status: 401,
            body: "invalid key sk-secret".into(),
        })
        .into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(!err.message.contains("sk-secret"));
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_value(ErrorBody {
            error: "nope".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"error": "nope"}));
    }
}
