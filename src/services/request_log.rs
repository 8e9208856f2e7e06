use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;

/// Append-only access log: one `<timestamp> - <METHOD> <path>` line per
/// request.
#[derive(Debug, Clone)]
pub struct RequestLog {
    path: Arc<PathBuf>,
}

impl RequestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Arc::new(path.into()) }
    }

    /// Spawn the append and return immediately.
    ///
    /// Write failures are reported through `tracing` and never reach the
    /// caller; the handle only exists so tests can wait for the write.
    pub fn record(&self, method: &Method, path: &str) -> JoinHandle<()> {
        let line = format_line(method, path, Utc::now());
        let file = Arc::clone(&self.path);

        tokio::spawn(async move {
            if let Err(e) = append(&file, &line).await {
                tracing::error!("Error writing request log {}: {}", file.display(), e);
            }
        })
    }
}

pub fn format_line(method: &Method, path: &str, at: DateTime<Utc>) -> String {
    format!(
        "{} - {} {}\n",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        method,
        path
    )
}

async fn append(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}

/// Middleware recording every request that reaches routing.
pub async fn log_requests(State(log): State<RequestLog>, req: Request, next: Next) -> Response {
    // Detached: the response never waits on the log write.
    drop(log.record(req.method(), req.uri().path()));
    next.run(req).await
}
