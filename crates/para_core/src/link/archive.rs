//! Archive-index bookkeeping.
//!
//! Archiving only flags visibility: it never touches `status` or links.

use super::change::{Change, ChangeSet};
use crate::model::document::Document;
use crate::model::{ArchiveKind, EntityRef};

/// Adds an existing entity to the archive index.
pub fn archive(document: &mut Document, kind: ArchiveKind, id: &str) -> ChangeSet {
    let mut changes = ChangeSet::new();
    if !document.contains(kind.into(), id) {
        return changes;
    }
    let inserted = document.archive.insert(kind, id);
    changes.record_if(inserted, || Change::Archived(EntityRef::new(kind.into(), id)));
    changes
}

/// Removes an id from the archive index, whether or not the entity exists.
pub fn unarchive(document: &mut Document, kind: ArchiveKind, id: &str) -> ChangeSet {
    let mut changes = ChangeSet::new();
    let purged = document.archive.purge(kind, id);
    changes.record_if(purged, || Change::Unarchived(EntityRef::new(kind.into(), id)));
    changes
}
