//! Per-request tracing spans with request IDs.
//!
//! Honors an `X-Request-Id` header from a fronting proxy, falling back to a
//! locally generated ULID. The resolved ID is attached to the tracing span
//! of the request and echoed on the response.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::Instrument;

pub async fn request_id(req: Request, next: Next) -> Response {
    let req_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| ulid::Ulid::new().to_string());

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = tracing::info_span!("request", req_id = %req_id);
    let start = Instant::now();

    let mut response = async move {
        let response = next.run(req).await;

        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();
        // Log severity scales with the response class.
        match status {
            200..=399 => {
                tracing::debug!(method = %method, path = %path, status, duration_ms, "Response");
            }
            400..=499 => {
                tracing::info!(method = %method, path = %path, status, duration_ms, "Response");
            }
            _ => {
                tracing::warn!(method = %method, path = %path, status, duration_ms, "Response");
            }
        }

        response
    }
    .instrument(span)
    .await;

    // Attach the request ID to the response for client correlation.
    if let Ok(value) = HeaderValue::from_str(&req_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}
