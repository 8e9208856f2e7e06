//! hearthrest – in-memory REST collections over HTTP+JSON.
//!
//! One generic [`state::store::ResourceStore`] per resource kind, one shared
//! axum router assembled by [`app::AppBuilder`], and a uniform
//! `{ message, data }` response envelope.

pub mod app;
pub mod config;
pub mod errors;
pub mod http;
pub mod routes;
pub mod services;
pub mod state;
