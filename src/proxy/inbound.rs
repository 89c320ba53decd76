// Inbound request model and its axum extractor

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::header,
};
use std::collections::HashMap;

use crate::proxy::common::utils::parse_query;
use crate::proxy::common::GatewayResponse;

/// Everything the forwarder needs from one caller request.
///
/// The body is kept as raw bytes; it is only parsed to check that it is JSON.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub path_params: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: Option<Bytes>,
}

impl InboundRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authorization(mut self, value: &str) -> Self {
        self.authorization = Some(value.to_string());
        self
    }

    pub fn with_path_param(mut self, name: &str, value: &str) -> Self {
        self.path_params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

#[async_trait]
impl<S> FromRequest<S> for InboundRequest
where
    S: Send + Sync,
{
    type Rejection = GatewayResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without parameters (and trailing-slash forms) yield an empty map.
        let path_params = match Option::<Path<HashMap<String, String>>>::from_request_parts(
            &mut parts, state,
        )
        .await
        {
            Ok(Some(Path(params))) => params,
            _ => HashMap::new(),
        };

        let query = parse_query(parts.uri.query());

        // A header that is not visible ASCII is treated as absent.
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to read inbound body: {}", e);
                GatewayResponse::bad_request("Unable to read request body")
            })?;

        Ok(Self {
            path_params,
            query,
            authorization,
            body: if bytes.is_empty() { None } else { Some(bytes) },
        })
    }
}
