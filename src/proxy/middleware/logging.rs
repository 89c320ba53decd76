// Request logging middleware

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log method, URI and outcome of every request; tag the response with a request id.
///
/// The Authorization header is never logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().simple().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    tracing::info!("[{}] Request: {} {}", request_id, method, path);

    let mut response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        tracing::warn!(
            "[{}] {} {} -> {} ({} ms)",
            request_id,
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    } else {
        tracing::info!(
            "[{}] {} {} -> {} ({} ms)",
            request_id,
            method,
            path,
            status.as_u16(),
            elapsed_ms
        );
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
