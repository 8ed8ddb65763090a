pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // API routes
        .nest("/api", api_routes())
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Single-operator tool; tighten if ever exposed
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(handlers::plans::list))
        .route("/members", get(handlers::members::list))
        .route("/members", post(handlers::members::register))
        .route("/members/:id", get(handlers::members::get))
        .route("/members/:id", delete(handlers::members::delete))
        .route("/members/:id/payments", get(handlers::payments::list_by_member))
        .route("/payments", post(handlers::payments::create))
        .route("/dashboard", get(handlers::dashboard::summary))
        .route("/import/members", post(handlers::import::import_members))
        .route("/import/template", get(handlers::import::download_template))
}
