// Gateway response model

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::{json, Value};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// The only artifact returned to the caller.
///
/// `status` is either copied from the last upstream attempt or synthesized
/// (400/401/500) before any upstream call completed.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Bytes,
}

impl GatewayResponse {
    pub fn json(status: u16, value: &Value) -> Self {
        // Serialising a `Value` cannot fail: keys are always strings.
        let body = serde_json::to_vec(value).unwrap_or_default();
        Self {
            status,
            content_type: JSON_CONTENT_TYPE.to_string(),
            body: Bytes::from(body),
        }
    }

    pub fn text(status: u16, content_type: impl Into<String>, text: String) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: Bytes::from(text),
        }
    }

    /// `{"status":"error","message":...}`
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, &json!({ "status": "error", "message": message }))
    }

    pub fn bad_request(message: &str) -> Self {
        Self::error(400, message)
    }

    pub fn unauthorized() -> Self {
        Self::error(401, "Authorization header is required")
    }

    pub fn internal_error() -> Self {
        Self::error(500, "Internal server error")
    }

    /// Body parsed back as JSON, if it is JSON.
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        // reqwest already guarantees 100..=999; anything else is reported as a bad gateway.
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let content_type = HeaderValue::from_str(&self.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(TEXT_CONTENT_TYPE));

        let mut response = (status, self.body).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_shape() {
        let resp = GatewayResponse::error(400, "Club ID is required");
        assert_eq!(resp.status, 400);
        assert_eq!(resp.content_type, JSON_CONTENT_TYPE);
        assert_eq!(
            resp.json_body().unwrap(),
            json!({"status": "error", "message": "Club ID is required"})
        );
    }

    #[test]
    fn test_into_response_keeps_status_and_content_type() {
        let resp = GatewayResponse::text(418, "text/html", "<p>teapot</p>".to_string())
            .into_response();
        assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/html");
    }

    #[test]
    fn test_invalid_content_type_falls_back_to_text() {
        let resp = GatewayResponse::text(200, "bad\nvalue", "ok".to_string()).into_response();
        assert_eq!(resp.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);
    }
}
