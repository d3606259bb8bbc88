use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

use crate::model::row::RowId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub timestamp: String,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_id: Option<RowId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn new_event(event_type: &str, row_id: Option<RowId>, message: Option<&str>) -> ActivityEvent {
    ActivityEvent {
        timestamp: chrono::Utc::now().to_rfc3339(),
        event: event_type.to_string(),
        row_id,
        message: message.map(String::from),
    }
}

/// Append-only JSON-lines log of what happened to the drafts.
/// A log without a path drops everything.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn append(&self, event: &ActivityEvent) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let line = serde_json::to_string(event)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Records an event, ignoring any failure to write it.
    pub fn record(&self, event_type: &str, row_id: Option<RowId>, message: Option<&str>) {
        let _ = self.append(&new_event(event_type, row_id, message));
    }

    pub fn read_events(&self, limit: Option<usize>) -> Vec<ActivityEvent> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        let mut events: Vec<ActivityEvent> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        if let Some(limit) = limit {
            let len = events.len();
            if len > limit {
                events = events.split_off(len - limit);
            }
        }

        events
    }
}
