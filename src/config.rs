use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::errors::ConfigError;

/// Resource collections a deployment can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Users,
    Tasks,
    Posts,
}

/// Payload of `GET /contact-us`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: "contact@example.com".to_string(),
            phone: "+1-202-555-0147".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Append-only request log file. `null` disables request logging.
    #[serde(default = "default_request_log")]
    pub request_log: Option<String>,

    /// Collections mounted by this instance.
    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceKind>,

    /// Load example records at startup.
    #[serde(default = "default_seed")]
    pub seed: bool,

    /// Plain-text body of `GET /`.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    #[serde(default)]
    pub contact: ContactInfo,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_log() -> Option<String> {
    Some("logs/log.txt".to_string())
}

fn default_resources() -> Vec<ResourceKind> {
    vec![ResourceKind::Users, ResourceKind::Tasks, ResourceKind::Posts]
}

fn default_seed() -> bool {
    true
}

fn default_greeting() -> String {
    "Hello from unified server!".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            request_log: default_request_log(),
            resources: default_resources(),
            seed: default_seed(),
            greeting: default_greeting(),
            contact: ContactInfo::default(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let file = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&file).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<AppConfig>(text)
    }

    /// `host:port` string for binding.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured resources with duplicates removed, first occurrence wins.
    pub fn resource_set(&self) -> Vec<ResourceKind> {
        let mut out = Vec::with_capacity(self.resources.len());
        for kind in &self.resources {
            if !out.contains(kind) {
                out.push(*kind);
            }
        }
        out
    }
}
