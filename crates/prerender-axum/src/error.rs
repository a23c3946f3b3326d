use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use prerender_core::error::PrerenderError;

/// JSON body returned when delegation fails.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Wrapper so we can implement `IntoResponse` for `PrerenderError`.
///
/// Delegation failures surface as 5xx responses rather than falling
/// through to normal routing: once a request is classified as a
/// crawler request, a silent fallback would hide upstream outages.
pub struct RenderError(pub PrerenderError);

impl From<PrerenderError> for RenderError {
    fn from(err: PrerenderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            PrerenderError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
            PrerenderError::NetworkError(_) | PrerenderError::HttpError(_) => {
                (StatusCode::BAD_GATEWAY, "upstream_error")
            }
            PrerenderError::HookError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "hook_error"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.0.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
