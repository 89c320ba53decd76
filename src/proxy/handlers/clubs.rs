// Club handlers

use axum::extract::State;

use crate::proxy::common::GatewayResponse;
use crate::proxy::inbound::InboundRequest;
use crate::proxy::resources::Resource;
use crate::proxy::server::AppState;

pub async fn handle_create_club(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::CreateClub, inbound).await
}

pub async fn handle_list_my_clubs(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::ListMyClubs, inbound).await
}

/// Also mounted on `/api/clubs/` so a missing id is answered with a 400.
pub async fn handle_update_club(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::UpdateClub, inbound).await
}

pub async fn handle_list_club_members(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    state.forwarder.handle(Resource::ListClubMembers, inbound).await
}
