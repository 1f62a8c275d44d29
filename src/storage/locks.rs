//! Per-table lock registry
//!
//! One `RwLock` per table name, created on first use and kept for the
//! lifetime of the registry. Locks are in-process only; another process
//! writing the same directory is not excluded.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Registry of table locks keyed by table name
#[derive(Debug, Default)]
pub struct TableLocks {
    locks: Mutex<HashMap<String, Arc<RwLock<()>>>>,
}

impl TableLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for a table
    pub fn get(&self, table: &str) -> Arc<RwLock<()>> {
        let mut locks = self.locks.lock();
        if let Some(lock) = locks.get(table) {
            return Arc::clone(lock);
        }
        let lock = Arc::new(RwLock::new(()));
        locks.insert(table.to_string(), Arc::clone(&lock));
        lock
    }

    /// Number of tables that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}
