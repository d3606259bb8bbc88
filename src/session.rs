use anyhow::Result;

use crate::activity::ActivityLog;
use crate::config::AppConfig;
use crate::model::collection::Collection;
use crate::model::row::RowId;
use crate::store::file::FileStore;
use crate::store::{self, LoadOutcome, SnapshotStore};

/// Ties a snapshot store, its key and the activity log together for the TUI
/// and the one-shot commands.
pub struct Session {
    store: Box<dyn SnapshotStore>,
    key: String,
    log: ActivityLog,
}

impl Session {
    pub fn new(store: Box<dyn SnapshotStore>, key: impl Into<String>, log: ActivityLog) -> Self {
        Self {
            store,
            key: key.into(),
            log,
        }
    }

    pub fn open(config: &AppConfig) -> Self {
        let log = if config.activity_log_enabled() {
            ActivityLog::new(config.activity_log_path())
        } else {
            ActivityLog::disabled()
        };
        Self::new(
            Box::new(FileStore::new(config.data_dir())),
            config.storage_key(),
            log,
        )
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Loads the stored collection (or a fresh one) and writes it straight
    /// back so the store always holds what is on screen. A failed write-back
    /// is logged by `save` and does not stop the load.
    pub fn load(&mut self) -> Result<Collection> {
        let (collection, outcome) = store::initialize(self.store.as_mut(), &self.key)?;
        match outcome {
            LoadOutcome::Restored => self.log.record("loaded", None, None),
            LoadOutcome::Fresh => self.log.record("fresh", None, None),
            LoadOutcome::Recovered {
                error,
                backup_error,
            } => {
                self.log.record("snapshot-malformed", None, Some(&error));
                if let Some(backup_error) = backup_error {
                    self.log.record("backup-failed", None, Some(&backup_error));
                }
            }
        }
        let _ = self.save(&collection);
        Ok(collection)
    }

    /// Writes `collection` to the store. Failures are logged and returned;
    /// the in-memory collection stays authoritative either way.
    pub fn save(&mut self, collection: &Collection) -> Result<()> {
        let result = store::persist(self.store.as_mut(), &self.key, collection);
        if let Err(e) = &result {
            self.log.record("persist-failed", None, Some(&format!("{e:#}")));
        }
        result
    }

    pub fn record(&self, event_type: &str, row_id: Option<RowId>) {
        self.log.record(event_type, row_id, None);
    }
}
