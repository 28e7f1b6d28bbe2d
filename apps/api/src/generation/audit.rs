//! Generation audit trail: one JSON object per line, append-only.
//!
//! Recording is best-effort: a failed append is logged and swallowed, never
//! bubbled into the request that triggered it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Serialize)]
struct AuditRecord<'a> {
    timestamp: DateTime<Utc>,
    prompt: &'a str,
    response: &'a Value,
}

/// Append-only log of prompt/response pairs. Disabled when constructed
/// without a path. The mutex serializes appends so concurrent generations
/// cannot interleave lines.
#[derive(Clone)]
pub struct GenerationLog {
    path: Option<Arc<Mutex<PathBuf>>>,
}

impl GenerationLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.map(|p| Arc::new(Mutex::new(p))),
        }
    }

    /// Appends one record with the current timestamp. Failures are warned
    /// about and dropped.
    pub async fn record(&self, prompt: &str, response: &Value) {
        let Some(path) = &self.path else {
            return;
        };

        let record = AuditRecord {
            timestamp: Utc::now(),
            prompt,
            response,
        };
        let mut line = match serde_json::to_vec(&record) {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, "failed to serialize generation audit record");
                return;
            }
        };
        line.push(b'\n');

        let path = path.lock().await;
        if let Err(error) = append_line(&path, &line).await {
            warn!(%error, file = %path.display(), "failed to append generation audit record");
        }
    }
}

async fn append_line(path: &Path, line: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await?;
    file.write_all(line).await?;
    file.flush().await
}
