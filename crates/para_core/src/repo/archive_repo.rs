//! Archive-index repository contract.

use super::{DocumentRepository, RepoResult};
use crate::id::{EntityId, IdGenerator};
use crate::link::{self, ChangeSet};
use crate::model::ArchiveKind;
use crate::storage::SlotStore;

/// Archive visibility operations.
pub trait ArchiveRepository {
    /// Flags an existing entity as archived. Status and links are untouched.
    fn archive(&self, kind: ArchiveKind, id: &str) -> RepoResult<ChangeSet>;
    fn unarchive(&self, kind: ArchiveKind, id: &str) -> RepoResult<ChangeSet>;
    /// Archived ids in archive order.
    fn archived_ids(&self, kind: ArchiveKind) -> Vec<EntityId>;
}

impl<S: SlotStore, G: IdGenerator> ArchiveRepository for DocumentRepository<S, G> {
    fn archive(&self, kind: ArchiveKind, id: &str) -> RepoResult<ChangeSet> {
        self.apply("archive", id, |document| Ok(link::archive(document, kind, id)))
    }

    fn unarchive(&self, kind: ArchiveKind, id: &str) -> RepoResult<ChangeSet> {
        self.apply("unarchive", id, |document| {
            Ok(link::unarchive(document, kind, id))
        })
    }

    fn archived_ids(&self, kind: ArchiveKind) -> Vec<EntityId> {
        self.store().load().archive.ids(kind).to_vec()
    }
}
