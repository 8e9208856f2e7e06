use axum::{
    extract::State,
    routing::get,
    Router,
};
use serde::Serialize;

use crate::config::ContactInfo;
use crate::http::Envelope;
use crate::state::app::AppState;

/// Payload of `GET /health`.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub uptime: f64,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(greeting).fallback(super::route_not_found))
        .route("/health", get(health).fallback(super::route_not_found))
        .route("/contact-us", get(contact).fallback(super::route_not_found))
        .with_state(state)
}

/// GET /
async fn greeting(State(state): State<AppState>) -> String {
    state.greeting.to_string()
}

/// GET /health
async fn health(State(state): State<AppState>) -> Envelope<Health> {
    Envelope::ok(
        "Healthy",
        Health {
            status: "ok",
            uptime: state.uptime(),
        },
    )
}

/// GET /contact-us
async fn contact(State(state): State<AppState>) -> Envelope<ContactInfo> {
    Envelope::ok("Contact info", state.contact)
}
