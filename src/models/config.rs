use crate::proxy::GatewayConfig;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
