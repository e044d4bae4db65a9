//! Session statistics
//!
//! Per-session operation counters, persisted as readable JSON. Writes
//! are atomic (temp file + rename) so a crash during save never leaves
//! a truncated statistics file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Statistics collected over one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    /// User the session belongs to
    pub user: String,
    /// Room joined for the session, if any
    pub room: Option<String>,
    /// Session start, seconds since the Unix epoch
    pub started_at: u64,
    /// Operation counters, keyed by operation id
    pub operations: BTreeMap<String, u64>,
}

impl Statistics {
    /// Start a new statistics record
    pub fn start(user: impl Into<String>, room: Option<String>) -> Self {
        Self {
            user: user.into(),
            room,
            started_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            operations: BTreeMap::new(),
        }
    }

    /// Count one execution of an operation
    pub fn record(&mut self, operation: &str) {
        *self.operations.entry(operation.to_string()).or_insert(0) += 1;
    }

    /// File name for this record, derived from user and session start
    pub fn file_name(&self) -> String {
        format!("{}_{}.json", sanitize(&self.user), self.started_at)
    }
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    if cleaned.is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
    }
}

/// Persist statistics to `directory`, creating it if needed.
///
/// Returns the path of the written file.
pub fn save_statistics(stats: &Statistics, directory: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(directory)?;

    let path = directory.join(stats.file_name());
    let json = serde_json::to_vec_pretty(stats)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, &json)?;
    fs::rename(&temp_path, &path)?;

    log::debug!("saved session statistics to {}", path.display());

    Ok(path)
}
