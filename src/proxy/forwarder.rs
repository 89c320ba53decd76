// Forwarding engine
// Precondition checks, credential selection and the bounded retry, shared by all resources

use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use crate::proxy::common::utils::{build_upstream_url, is_missing_param};
use crate::proxy::common::{derive_candidates, normalize, GatewayResponse};
use crate::proxy::config::{CredentialFallbackConfig, GatewayConfig};
use crate::proxy::diagnostics::{DiagnosticSink, GatewayEvent};
use crate::proxy::inbound::InboundRequest;
use crate::proxy::resources::{BodyRule, Resource, ResourceDescriptor};
use crate::proxy::upstream::{Upstream, UpstreamRequest};

const X_REQUESTED_WITH: &str = "x-requested-with";

pub struct Forwarder {
    upstream: Arc<dyn Upstream>,
    origin: Url,
    fallback: CredentialFallbackConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Forwarder {
    pub fn new(
        upstream: Arc<dyn Upstream>,
        origin: Url,
        fallback: CredentialFallbackConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            upstream,
            origin,
            fallback,
            diagnostics,
        }
    }

    pub fn from_config(
        config: &GatewayConfig,
        upstream: Arc<dyn Upstream>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, String> {
        config.validate()?;
        let origin = Url::parse(config.upstream_base_url.trim())
            .map_err(|e| format!("Invalid upstream_base_url: {}", e))?;
        Ok(Self::new(
            upstream,
            origin,
            config.credential_fallback.clone(),
            diagnostics,
        ))
    }

    /// Forward one inbound request. Always produces a response.
    ///
    /// At most two upstream calls are made, strictly one after the other: the
    /// second only when the first was rejected under the resource's retry
    /// policy and a distinct alternate credential exists.
    pub async fn handle(&self, resource: Resource, inbound: InboundRequest) -> GatewayResponse {
        let name = resource.name();
        let descriptor = resource.descriptor();

        if let Some(param) = descriptor.path_param {
            let value = inbound.path_params.get(param.name).map(String::as_str);
            if is_missing_param(value) {
                let message = format!("{} is required", param.label);
                return self.reject(name, GatewayResponse::bad_request(&message));
            }
        }

        // `None` stands for "send without Authorization".
        let candidates: Vec<Option<String>> = if descriptor.requires_auth {
            let derived = derive_candidates(inbound.authorization.as_deref());
            if derived.is_empty() {
                return self.reject(name, GatewayResponse::unauthorized());
            }
            derived.into_iter().map(Some).collect()
        } else {
            vec![None]
        };

        let body = match prepare_body(descriptor.body, inbound.body.as_ref()) {
            Ok(body) => body,
            Err(rejection) => return self.reject(name, rejection),
        };

        let url = match build_upstream_url(
            &self.origin,
            descriptor.upstream_path,
            &inbound.path_params,
            &inbound.query,
        ) {
            Ok(url) => url,
            Err(e) => {
                self.diagnostics.record(GatewayEvent::TransportFault {
                    resource: name,
                    attempt: 0,
                    error: e,
                });
                return GatewayResponse::internal_error();
            }
        };

        let policy = self.fallback.effective_policy(name, descriptor.retry);
        let last_attempt = candidates.len() - 1;

        for (attempt, credential) in candidates.iter().enumerate() {
            let request =
                match build_request(&descriptor, url.clone(), credential.as_deref(), body.clone()) {
                    Ok(request) => request,
                    Err(e) => {
                        self.diagnostics.record(GatewayEvent::TransportFault {
                            resource: name,
                            attempt,
                            error: e,
                        });
                        return GatewayResponse::internal_error();
                    }
                };

            let response = match self.upstream.send(request).await {
                Ok(response) => response,
                Err(e) => {
                    self.diagnostics.record(GatewayEvent::TransportFault {
                        resource: name,
                        attempt,
                        error: e.to_string(),
                    });
                    return GatewayResponse::internal_error();
                }
            };

            let normalized = normalize(&response);
            self.diagnostics.record(GatewayEvent::AttemptCompleted {
                resource: name,
                attempt,
                status: normalized.status,
            });

            if attempt < last_attempt && policy.should_retry(normalized.status) {
                self.diagnostics.record(GatewayEvent::CredentialFallback {
                    resource: name,
                    rejected_status: normalized.status,
                });
                continue;
            }

            return normalized;
        }

        // Unreachable: `candidates` always holds at least one entry.
        GatewayResponse::internal_error()
    }

    fn reject(&self, resource: &'static str, response: GatewayResponse) -> GatewayResponse {
        let reason = response
            .json_body()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default();
        self.diagnostics.record(GatewayEvent::PreconditionRejected {
            resource,
            status: response.status,
            reason,
        });
        response
    }
}

/// Validate the inbound body against the resource's rule and re-serialise it.
fn prepare_body(rule: BodyRule, body: Option<&Bytes>) -> Result<Option<Bytes>, GatewayResponse> {
    if rule == BodyRule::Ignored {
        return Ok(None);
    }

    let raw = match body {
        Some(raw) if !raw.iter().all(u8::is_ascii_whitespace) => raw,
        _ if rule == BodyRule::Required => {
            return Err(GatewayResponse::bad_request("Request body is required"));
        }
        _ => return Ok(None),
    };

    let value: Value = serde_json::from_slice(raw)
        .map_err(|_| GatewayResponse::bad_request("Invalid JSON in request body"))?;
    let bytes = serde_json::to_vec(&value)
        .map_err(|_| GatewayResponse::bad_request("Invalid JSON in request body"))?;
    Ok(Some(Bytes::from(bytes)))
}

fn build_request(
    descriptor: &ResourceDescriptor,
    url: Url,
    credential: Option<&str>,
    body: Option<Bytes>,
) -> Result<UpstreamRequest, String> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    if let Some(credential) = credential {
        let value = HeaderValue::from_str(credential)
            .map_err(|_| "Authorization value is not a valid header".to_string())?;
        headers.insert(header::AUTHORIZATION, value);
    }
    if descriptor.ajax {
        headers.insert(X_REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));
    }

    Ok(UpstreamRequest {
        method: descriptor.method.clone(),
        url,
        headers,
        body,
    })
}
