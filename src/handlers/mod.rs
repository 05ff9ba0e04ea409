//! Thin HTTP glue over the project store and the permissions adapter.

pub mod permissions;
pub mod projects;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::middleware::require_json_middleware;
use crate::permissions::SupportsAcl;
use crate::project::ProjectStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProjectStore>,
    pub acl: Arc<dyn SupportsAcl>,
}

impl AppState {
    pub fn new(store: ProjectStore, acl: impl SupportsAcl + 'static) -> Self {
        Self {
            store: Arc::new(store),
            acl: Arc::new(acl),
        }
    }
}

pub fn router(state: AppState, config: &ApiConfig) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .merge(project_routes())
        .merge(permission_routes())
        .with_state(state);

    if config.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    if config.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/:id",
            get(projects::show)
                .put(projects::update)
                .patch(projects::update)
                .delete(projects::destroy),
        )
}

fn permission_routes() -> Router<AppState> {
    Router::new()
        .route("/api/permissions/*filepath", get(permissions::show))
        .route_layer(middleware::from_fn(require_json_middleware))
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}
