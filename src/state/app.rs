use std::sync::Arc;
use std::time::Instant;

use crate::config::{AppConfig, ContactInfo};

/// Process-level state served by the system routes.
#[derive(Clone)]
pub struct AppState {
    pub started_at: Instant,
    pub greeting: Arc<str>,
    pub contact: ContactInfo,
}

impl AppState {
    pub fn new(greeting: impl Into<Arc<str>>, contact: ContactInfo) -> Self {
        Self {
            started_at: Instant::now(),
            greeting: greeting.into(),
            contact,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(cfg.greeting.as_str(), cfg.contact.clone())
    }

    /// Seconds since the state was created.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
