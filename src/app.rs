use std::any::Any;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{AppConfig, ResourceKind};
use crate::errors::ApiError;
use crate::http::cors;
use crate::routes::{resource_routes, route_not_found, system_routes};
use crate::services::request_log::{log_requests, RequestLog};
use crate::state::app::AppState;
use crate::state::schema::{Posts, Schema, Tasks, Users};
use crate::state::store::{ResourceStore, SharedStore};

/// Assembles the single dispatch table from the system routes plus one
/// route set per registered collection.
///
/// Each store is owned by the router state of its own routes; nothing else
/// holds a mutable path to it.
pub struct AppBuilder {
    router: Router,
    request_log: Option<RequestLog>,
}

impl AppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            router: system_routes::routes(state),
            request_log: None,
        }
    }

    /// Mount `/{S::PATH}` and `/{S::PATH}/:id` backed by `store`.
    pub fn with_resource<S: Schema>(mut self, store: SharedStore<S>) -> Self {
        self.router = self.router.merge(resource_routes::routes(store));
        self
    }

    pub fn with_request_log(mut self, log: RequestLog) -> Self {
        self.request_log = Some(log);
        self
    }

    /// Finish the router. Layers, innermost first:
    /// request log, panic boundary, body limit, CORS/preflight, tracing.
    pub fn build(self) -> Router {
        let mut router = self.router.fallback(route_not_found);

        if let Some(log) = self.request_log {
            router = router.layer(middleware::from_fn_with_state(log, log_requests));
        }

        let router = router
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(DefaultBodyLimit::disable());

        cors::with_cors(router).layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
    }
}

/// Build the complete application described by `cfg`:
/// - `/`, `/health`, `/contact-us`
/// - one CRUD route set per configured resource
/// - request logging when `cfg.request_log` is set
pub fn build_app(cfg: &AppConfig) -> Router {
    let mut builder = AppBuilder::new(AppState::from_config(cfg));

    for kind in cfg.resource_set() {
        builder = match kind {
            ResourceKind::Users => builder.with_resource(new_store::<Users>(cfg.seed)),
            ResourceKind::Tasks => builder.with_resource(new_store::<Tasks>(cfg.seed)),
            ResourceKind::Posts => builder.with_resource(new_store::<Posts>(cfg.seed)),
        };
        tracing::debug!("Mounted {:?}", kind);
    }

    if let Some(path) = &cfg.request_log {
        builder = builder.with_request_log(RequestLog::new(path));
    }

    builder.build()
}

fn new_store<S: Schema>(seed: bool) -> SharedStore<S> {
    if seed {
        Arc::new(ResourceStore::seeded())
    } else {
        Arc::new(ResourceStore::new())
    }
}

/// Last-resort boundary: a panicking handler becomes a 500 envelope.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(details).into_response()
}
