// Event handlers: lifecycle and registrations

use axum::extract::State;

use crate::proxy::common::GatewayResponse;
use crate::proxy::inbound::InboundRequest;
use crate::proxy::resources::Resource;
use crate::proxy::server::AppState;

pub async fn handle_create_event(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::CreateEvent, inbound).await
}

pub async fn handle_list_events(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::ListEvents, inbound).await
}

pub async fn handle_update_event(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::UpdateEvent, inbound).await
}

pub async fn handle_delete_event(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::DeleteEvent, inbound).await
}

pub async fn handle_postpone_event(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::PostponeEvent, inbound).await
}

pub async fn handle_list_event_registrations(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state
        .forwarder
        .handle(Resource::ListEventRegistrations, inbound)
        .await
}
