use crate::proxy::forwarder::Forwarder;
use crate::proxy::handlers::{catalog, clubs, events, session};
use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Axum application state
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// Axum server instance
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

/// Build the gateway routes.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        // Session
        .route("/api/auth/login", post(session::handle_login))
        .route("/api/auth/logout", post(session::handle_logout))
        .route("/api/auth/me", get(session::handle_current_user))
        // Clubs
        .route("/api/clubs", post(clubs::handle_create_club))
        .route("/api/clubs/my-clubs", get(clubs::handle_list_my_clubs))
        .route("/api/clubs/", put(clubs::handle_update_club))
        .route("/api/clubs/:id", put(clubs::handle_update_club))
        .route(
            "/api/clubs/:id/members",
            get(clubs::handle_list_club_members),
        )
        // Events
        .route(
            "/api/events",
            get(events::handle_list_events).post(events::handle_create_event),
        )
        .route(
            "/api/events/",
            put(events::handle_update_event).delete(events::handle_delete_event),
        )
        .route(
            "/api/events/:id",
            put(events::handle_update_event).delete(events::handle_delete_event),
        )
        .route(
            "/api/events/:id/postpone",
            post(events::handle_postpone_event),
        )
        .route(
            "/api/events/:id/registrations",
            get(events::handle_list_event_registrations),
        )
        // Catalog
        .route("/api/catalog/sports", get(catalog::handle_sports))
        .route("/api/catalog/tiers", get(catalog::handle_tiers))
        .route("/api/catalog/amenities", get(catalog::handle_amenities))
        .route("/api/catalog/facilities", get(catalog::handle_facilities))
        .route("/healthz", get(health_check_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            crate::proxy::middleware::logging_middleware,
        ))
        .layer(crate::proxy::middleware::cors_layer())
        .with_state(state)
}

impl AxumServer {
    /// Start Axum server
    pub async fn start(
        host: String,
        port: u16,
        forwarder: Arc<Forwarder>,
        max_body_bytes: usize,
    ) -> Result<(Self, tokio::task::JoinHandle<()>), String> {
        let app = build_router(AppState { forwarder }, max_body_bytes);

        // Bind address
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind address {}: {}", addr, e))?;

        tracing::info!("Gateway started at http://{}", addr);

        // Create shutdown channel
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_instance = Self {
            shutdown_tx: Some(shutdown_tx),
        };

        // Start server in new task
        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Gateway stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((server_instance, handle))
    }

    /// Stop server
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Health check handler
async fn health_check_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok"
    }))
    .into_response()
}
