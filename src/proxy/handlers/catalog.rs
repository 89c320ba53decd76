// Catalog lookups: unauthenticated passthrough with query forwarding

use axum::extract::State;

use crate::proxy::common::GatewayResponse;
use crate::proxy::inbound::InboundRequest;
use crate::proxy::resources::{CatalogKind, Resource};
use crate::proxy::server::AppState;

pub async fn handle_sports(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    lookup(&state, CatalogKind::Sports, inbound).await
}

pub async fn handle_tiers(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    lookup(&state, CatalogKind::Tiers, inbound).await
}

pub async fn handle_amenities(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    lookup(&state, CatalogKind::Amenities, inbound).await
}

pub async fn handle_facilities(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> GatewayResponse {
    lookup(&state, CatalogKind::Facilities, inbound).await
}

async fn lookup(state: &AppState, kind: CatalogKind, inbound: InboundRequest) -> GatewayResponse {
    state
        .forwarder
        .handle(Resource::Catalog(kind), inbound)
        .await
}
