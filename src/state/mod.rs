pub mod app;
pub mod schema;
pub mod store;
