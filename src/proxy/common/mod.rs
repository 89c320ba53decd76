// Common building blocks shared by every forwarding handler

pub mod credentials;
pub mod normalizer;
pub mod response;
pub mod utils;

pub use credentials::derive_candidates;
pub use normalizer::normalize;
pub use response::GatewayResponse;
