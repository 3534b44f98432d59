//! Persistent slot storage and the whole-document load/save adapter.
//!
//! # Responsibility
//! - Define the key-value slot port (`SlotStore`) used by core.
//! - Convert between the slot's JSON string and a typed `Document`.
//!
//! # Invariants
//! - `DocumentStore::load` never fails: absent, unreadable or unparsable
//!   slots yield an empty `Document`.
//! - `DocumentStore::save` always writes the full document; there are no
//!   partial writes.

mod memory;
mod sqlite;

pub use memory::MemorySlotStore;
pub use sqlite::SqliteSlotStore;

use crate::db::DbError;
use crate::model::document::Document;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot name used by the organizer document.
pub const DEFAULT_SLOT_KEY: &str = "db";

pub type StorageResult<T> = Result<T, StorageError>;

/// Slot read/write failures.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused the operation (missing schema, poisoned state, ...).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "slot storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value slot port (browser local storage equivalent).
pub trait SlotStore {
    /// Reads the raw slot value; `Ok(None)` when the slot was never written.
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>>;
    /// Overwrites the slot value.
    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write_slot(key, value)
    }
}

/// JSON document adapter over one slot.
pub struct DocumentStore<S: SlotStore> {
    slots: S,
    slot_key: String,
}

impl<S: SlotStore> DocumentStore<S> {
    /// Uses `DEFAULT_SLOT_KEY`.
    pub fn new(slots: S) -> Self {
        Self::with_slot_key(slots, DEFAULT_SLOT_KEY)
    }

    pub fn with_slot_key(slots: S, slot_key: impl Into<String>) -> Self {
        Self {
            slots,
            slot_key: slot_key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Underlying slot backend.
    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Loads the current document for rendering, falling back to an empty
    /// one on any failure.
    pub fn load(&self) -> Document {
        match self.load_for_update() {
            Ok(document) => document,
            Err(err) => {
                warn!(
                    "event=document_load module=storage status=error source=default reason=unreadable slot={} error={}",
                    self.slot_key, err
                );
                Document::default()
            }
        }
    }

    /// Loads the document a mutation will overwrite.
    ///
    /// Absent or unparsable slots yield an empty document, but a failed read
    /// is returned as an error so the caller never saves over data it could
    /// not see.
    pub fn load_for_update(&self) -> StorageResult<Document> {
        let Some(raw) = self.slots.read_slot(&self.slot_key)? else {
            debug!(
                "event=document_load module=storage status=ok source=default reason=absent slot={}",
                self.slot_key
            );
            return Ok(Document::default());
        };

        match serde_json::from_str::<Document>(&raw) {
            Ok(document) => Ok(document),
            Err(err) => {
                // Serde messages only carry positions, never payload text.
                warn!(
                    "event=document_load module=storage status=error source=default reason=unparsable slot={} bytes={} error={}",
                    self.slot_key,
                    raw.len(),
                    err
                );
                Ok(Document::default())
            }
        }
    }

    /// Serializes and writes the full document.
    pub fn save(&self, document: &Document) -> StorageResult<()> {
        let encoded = serde_json::to_string(document).map_err(|err| {
            StorageError::Unavailable(format!("document serialization failed: {err}"))
        })?;
        self.slots.write_slot(&self.slot_key, &encoded)?;
        info!(
            "event=document_save module=storage status=ok slot={} bytes={} areas={} projects={} resources={} notes={}",
            self.slot_key,
            encoded.len(),
            document.areas.len(),
            document.projects.len(),
            document.resources.len(),
            document.notes.len()
        );
        Ok(())
    }
}
