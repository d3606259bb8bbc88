pub mod file;
#[cfg(test)]
pub mod memory;

use anyhow::{Context, Result};

use crate::model::collection::Collection;

pub const DEFAULT_STORAGE_KEY: &str = "jira-bulk-sub-task-creator";

/// Key-value byte storage for collection snapshots.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// How `initialize` arrived at its collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored,
    Fresh,
    /// The stored bytes did not parse. They were copied to `<key>.corrupt`
    /// unless `backup_error` says otherwise.
    Recovered {
        error: String,
        backup_error: Option<String>,
    },
}

pub fn corrupt_key(key: &str) -> String {
    format!("{key}.corrupt")
}

/// Load the collection stored under `key`, falling back to a reset
/// collection when nothing is stored or the snapshot does not parse.
///
/// A parsed snapshot is trusted as-is. Keeping a copy of an unparseable one
/// is best-effort; a failed copy does not stop the fallback.
pub fn initialize(store: &mut dyn SnapshotStore, key: &str) -> Result<(Collection, LoadOutcome)> {
    let Some(bytes) = store.get(key)? else {
        return Ok((Collection::reset(), LoadOutcome::Fresh));
    };

    match serde_json::from_slice::<Collection>(&bytes) {
        Ok(collection) => Ok((collection, LoadOutcome::Restored)),
        Err(e) => {
            let backup_error = store
                .set(&corrupt_key(key), &bytes)
                .with_context(|| format!("Failed to keep unreadable snapshot for {key}"))
                .err()
                .map(|e| format!("{e:#}"));
            Ok((
                Collection::reset(),
                LoadOutcome::Recovered {
                    error: e.to_string(),
                    backup_error,
                },
            ))
        }
    }
}

pub fn persist(store: &mut dyn SnapshotStore, key: &str, collection: &Collection) -> Result<()> {
    let json = serde_json::to_vec(collection)?;
    store.set(key, &json)
}
