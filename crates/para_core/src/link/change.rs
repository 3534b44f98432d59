//! Change descriptions returned by domain mutations.
//!
//! Presentation adapters read these to decide what to re-render instead of
//! the domain layer touching any view state.

use crate::model::EntityRef;
use serde::Serialize;

/// One observable effect of a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    Created(EntityRef),
    Updated(EntityRef),
    Deleted(EntityRef),
    Linked { child: EntityRef, parent: EntityRef },
    Unlinked { child: EntityRef, parent: EntityRef },
    Archived(EntityRef),
    Unarchived(EntityRef),
}

impl Change {
    /// The entity primarily affected by this change.
    pub fn subject(&self) -> &EntityRef {
        match self {
            Self::Created(entity)
            | Self::Updated(entity)
            | Self::Deleted(entity)
            | Self::Archived(entity)
            | Self::Unarchived(entity) => entity,
            Self::Linked { child, .. } | Self::Unlinked { child, .. } => child,
        }
    }

    /// Stable label (`created|updated|deleted|linked|unlinked|archived|unarchived`).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Deleted(_) => "deleted",
            Self::Linked { .. } => "linked",
            Self::Unlinked { .. } => "unlinked",
            Self::Archived(_) => "archived",
            Self::Unarchived(_) => "unarchived",
        }
    }
}

/// Ordered list of changes produced by one operation.
///
/// Empty means the operation was a no-op (for example, a missing id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Pushes `change` only when `changed` is true.
    pub fn record_if(&mut self, changed: bool, change: impl FnOnce() -> Change) {
        if changed {
            self.changes.push(change());
        }
    }

    pub fn merge(&mut self, other: ChangeSet) {
        self.changes.extend(other.changes);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn contains(&self, change: &Change) -> bool {
        self.changes.contains(change)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }
}

impl From<Change> for ChangeSet {
    fn from(value: Change) -> Self {
        Self {
            changes: vec![value],
        }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
