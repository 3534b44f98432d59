//! In-process slot store for tests and ephemeral sessions.

use super::{SlotStore, StorageResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// `HashMap`-backed slots. Single-threaded by construction.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one pre-seeded slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.slots.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Returns a copy of the raw slot value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
