// proxy module - backend-forwarding gateway

pub mod config;
pub mod diagnostics;
pub mod forwarder;
pub mod inbound;
pub mod resources;
pub mod server;

pub mod common; // Normalizer, credential adapter, shared helpers
pub mod handlers; // Per-resource endpoint handlers
pub mod middleware; // Axum middleware
pub mod upstream; // Upstream client

pub use config::GatewayConfig;
pub use forwarder::Forwarder;
pub use server::AxumServer;
