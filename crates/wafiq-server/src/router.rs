//! Axum router construction.
//!
//! [`build`] resolves the deployment mode into a concrete route table.
//! Standalone services answer at the root; embedded services answer only
//! under `/api/<appId>`. Building does no I/O.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use wafiq_core::ServiceConfig;

use crate::cors;
use crate::failure;
use crate::handlers;
use crate::state::{AppState, ServiceOptions};

/// A constructed service, ready to be served or mounted by a host.
#[derive(Debug, Clone)]
pub struct RoutableService {
    state: Arc<AppState>,
}

impl RoutableService {
    /// The routing configuration the service was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.state.config
    }

    /// Shared state, including the Progress Tracker.
    pub const fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Produce the complete Axum router.
    pub fn into_router(self) -> Router {
        build_router(self.state)
    }
}

/// Build a service instance with a fresh progress record.
pub fn build(config: ServiceConfig, options: ServiceOptions) -> RoutableService {
    RoutableService {
        state: Arc::new(AppState::new(config, options)),
    }
}

/// API routes, relative to the service prefix.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/progress",
            get(handlers::get_progress).post(handlers::submit_progress),
        )
        .route("/reset-progress", post(handlers::reset_progress))
        .route("/letters", get(handlers::list_letters))
        .route("/colors", get(handlers::list_colors))
        .route("/stories", get(handlers::list_stories))
        .route("/stats", get(handlers::get_stats))
        .route("/health", get(handlers::health))
}

/// Build the complete Axum router for one service instance.
///
/// The router includes:
/// - the API routes under the service prefix
/// - `GET /` -- the front-end entry page
/// - static files from the configured directory for any other path
///
/// Middleware, outermost first: request tracing, CORS, the `OPTIONS`
/// short-circuit, failure escalation, panic recovery.
pub fn build_router(state: Arc<AppState>) -> Router {
    let prefix = state.config.path_prefix();
    let api = if prefix.is_empty() {
        api_routes()
    } else {
        Router::new().nest(prefix, api_routes())
    };

    with_service_layers(api.route("/", get(handlers::index)), state)
}

/// Add the static-file fallback and the middleware stack to `routes`.
fn with_service_layers(routes: Router<Arc<AppState>>, state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors::cors_layer())
        .layer(middleware::from_fn(cors::short_circuit_options))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            failure::escalate,
        ))
        .layer(CatchPanicLayer::custom(failure::panic_response));

    routes
        .fallback_service(ServeDir::new(&state.static_dir))
        .layer(middleware)
        .with_state(state)
}
