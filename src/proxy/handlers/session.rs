// Session handlers: login, logout, current user

use axum::extract::State;

use crate::proxy::common::GatewayResponse;
use crate::proxy::inbound::InboundRequest;
use crate::proxy::resources::Resource;
use crate::proxy::server::AppState;

/// Credentials travel in the body; no Authorization is required.
pub async fn handle_login(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::Login, inbound).await
}

pub async fn handle_logout(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::Logout, inbound).await
}

pub async fn handle_current_user(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::CurrentUser, inbound).await
}
