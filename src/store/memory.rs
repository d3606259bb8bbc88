use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::SnapshotStore;

/// In-memory store for tests. Clones share the same map so a test can keep a
/// handle after moving the store into an `App` or `Session`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    should_fail: Arc<Mutex<bool>>,
    read_only: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn with_failure(self) -> Self {
        self.set_failing(true);
        self
    }

    /// Reads keep working; every write fails.
    pub fn read_only(self) -> Self {
        *self.read_only.lock().unwrap() = true;
        self
    }

    pub fn set_failing(&self, failing: bool) {
        *self.should_fail.lock().unwrap() = failing;
    }

    fn failing(&self) -> bool {
        *self.should_fail.lock().unwrap()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.failing() {
            anyhow::bail!("Mock failure");
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if self.failing() || *self.read_only.lock().unwrap() {
            anyhow::bail!("Mock failure");
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
