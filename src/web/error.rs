//! API error responses.
//!
//! Every failure surfaces as `{ "error": <message> }` JSON with an Italian
//! user-facing message; upstream details are logged, never leaked.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

use crate::unipa::UnipaError;

/// Message for a missing or repeated `anno` query parameter.
const MSG_MISSING_ANNO: &str = "Inserisci l'anno di ricerca";
/// Message for a malformed `anno` value.
const MSG_INVALID_ANNO: &str =
    "Anno non valido. Usa il formato YYYY o YYYY/YYYY (es. 2023 o 2023/2024)";
/// Generic message covering every upstream failure.
const MSG_UPSTREAM: &str = "Qualcosa è andato storto";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn missing_anno() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: MSG_MISSING_ANNO,
        }
    }

    pub fn invalid_anno() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: MSG_INVALID_ANNO,
        }
    }

    fn upstream() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: MSG_UPSTREAM,
        }
    }
}

/// Log an upstream failure with full context and map it to the generic 500.
pub fn upstream_error(context: &str, e: UnipaError) -> ApiError {
    match &e {
        UnipaError::MissingSessionCookie => {
            error!("{context} failed: upstream issued no session cookie");
        }
        UnipaError::UpstreamStatus { status, url } => {
            error!(
                status,
                url = url.as_str(),
                "{context} failed: unexpected upstream status"
            );
        }
        UnipaError::RequestFailed(source) => {
            error!(error = ?source, "{context} failed");
        }
    }
    ApiError::upstream()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
