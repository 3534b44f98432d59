//! Entity id generation.
//!
//! # Responsibility
//! - Produce unique string ids of the form `<prefix>-...` for new entities.
//! - Keep generation injectable so repository behavior is deterministic in
//!   tests.
//!
//! # Invariants
//! - A generator never returns the same id twice during its lifetime.
//! - Ids are opaque to the rest of core; only the prefix carries meaning.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier for areas, projects, resources and notes.
///
/// Kept as a type alias so persisted documents stay plain JSON strings.
pub type EntityId = String;

/// Source of fresh entity ids.
pub trait IdGenerator {
    /// Returns a new id starting with `prefix-`.
    fn next_id(&self, prefix: &str) -> EntityId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self, prefix: &str) -> EntityId {
        (**self).next_id(prefix)
    }
}

/// Production generator: `<prefix>-<unix millis>-<counter>`.
///
/// The counter disambiguates ids minted within the same millisecond.
#[derive(Debug, Default)]
pub struct SessionIdGenerator {
    counter: AtomicU64,
}

impl SessionIdGenerator {
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SessionIdGenerator {
    fn next_id(&self, prefix: &str) -> EntityId {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        format!("{prefix}-{millis}-{sequence}")
    }
}

/// Deterministic generator producing `<prefix>-1`, `<prefix>-2`, ...
///
/// The sequence is shared across prefixes, so `area-1` is followed by
/// `proj-2`.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    counter: Cell<u64>,
}

impl SequenceIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the sequence after `start`.
    pub fn starting_after(start: u64) -> Self {
        Self {
            counter: Cell::new(start),
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self, prefix: &str) -> EntityId {
        let next = self.counter.get() + 1;
        self.counter.set(next);
        format!("{prefix}-{next}")
    }
}
