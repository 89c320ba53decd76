use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::proxy::resources::RetryPolicy;

/// Gateway service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Whether LAN access is allowed
    /// - false: bind 127.0.0.1 only (default)
    /// - true: bind 0.0.0.0
    #[serde(default)]
    pub allow_lan_access: bool,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin of the backend API, e.g. `https://api.example.com/api`
    #[serde(default)]
    pub upstream_base_url: String,

    /// Upstream request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Maximum inbound body size (bytes)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Outbound proxy for upstream calls
    #[serde(default)]
    pub upstream_proxy: UpstreamProxyConfig,

    /// Bearer / bare credential fallback behaviour
    #[serde(default)]
    pub credential_fallback: CredentialFallbackConfig,
}

/// Outbound proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamProxyConfig {
    /// Whether enabled
    pub enabled: bool,
    /// Proxy address (http://, https://, socks5://)
    pub url: String,
}

/// Credential fallback switches.
///
/// `overrides` is keyed by resource name (see [`crate::proxy::resources::Resource::name`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialFallbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub overrides: HashMap<String, RetryPolicy>,
}

impl Default for CredentialFallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            overrides: HashMap::new(),
        }
    }
}

impl CredentialFallbackConfig {
    /// Policy actually applied to a resource whose built-in policy is `declared`.
    pub fn effective_policy(&self, resource: &str, declared: RetryPolicy) -> RetryPolicy {
        if !self.enabled {
            return RetryPolicy::Never;
        }
        self.overrides.get(resource).copied().unwrap_or(declared)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            allow_lan_access: false,
            port: default_port(),
            upstream_base_url: String::new(),
            request_timeout: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
            upstream_proxy: UpstreamProxyConfig::default(),
            credential_fallback: CredentialFallbackConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    8046
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

impl GatewayConfig {
    /// Get the actual listening address
    pub fn get_bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }

    /// Check the values that cannot be defaulted.
    pub fn validate(&self) -> Result<(), String> {
        if self.upstream_base_url.trim().is_empty() {
            return Err("upstream_base_url is not configured".to_string());
        }
        let parsed = url::Url::parse(self.upstream_base_url.trim())
            .map_err(|e| format!("Invalid upstream_base_url {}: {}", self.upstream_base_url, e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!(
                "upstream_base_url must use http or https, got {}",
                parsed.scheme()
            ));
        }
        if parsed.cannot_be_a_base() {
            return Err(format!(
                "upstream_base_url cannot be used as a base: {}",
                self.upstream_base_url
            ));
        }
        if self.request_timeout == 0 {
            return Err("request_timeout must be greater than zero".to_string());
        }
        if self.upstream_proxy.enabled && !self.upstream_proxy.url.is_empty() {
            reqwest::Proxy::all(&self.upstream_proxy.url).map_err(|e| {
                format!("Invalid upstream_proxy.url {}: {}", self.upstream_proxy.url, e)
            })?;
        }
        Ok(())
    }
}
