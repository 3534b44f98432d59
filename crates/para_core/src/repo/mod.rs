//! Repository layer over the single organizer document.
//!
//! # Responsibility
//! - Expose typed CRUD contracts per entity (`AreaRepository`, ...).
//! - Run every operation as load → mutate → save on the whole document.
//!
//! # Invariants
//! - Operations on missing ids are no-ops that return an empty `ChangeSet`
//!   and do not rewrite the slot.
//! - Every non-empty change set is persisted with exactly one full write.
//! - Ids handed out by `add_*` never alias a live entity.

mod area_repo;
mod archive_repo;
mod note_repo;
mod project_repo;
mod resource_repo;

pub use area_repo::AreaRepository;
pub use archive_repo::ArchiveRepository;
pub use note_repo::NoteRepository;
pub use project_repo::ProjectRepository;
pub use resource_repo::ResourceRepository;

use crate::id::{EntityId, IdGenerator};
use crate::link::{Change, ChangeSet};
use crate::model::document::Document;
use crate::model::{EntityKind, EntityRef};
use crate::storage::{DocumentStore, SlotStore, StorageError};
use log::{debug, error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_ID_ATTEMPTS: usize = 16;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failures. Missing ids are not errors.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// The id generator kept returning ids already in use.
    IdCollision(EntityId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::IdCollision(id) => write!(f, "id generator returned an id already in use: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::IdCollision(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Filter options for project/resource/note listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityListQuery {
    /// Only entities whose back-reference points at this area.
    pub area_id: Option<EntityId>,
    /// Include ids present in the archive index. Ignored for notes.
    pub include_archived: bool,
}

impl EntityListQuery {
    pub fn in_area(area_id: impl Into<EntityId>) -> Self {
        Self {
            area_id: Some(area_id.into()),
            include_archived: false,
        }
    }

    fn matches_area(&self, area_id: Option<&str>) -> bool {
        match self.area_id.as_deref() {
            Some(wanted) => area_id == Some(wanted),
            None => true,
        }
    }
}

/// Umbrella contract used by use-case services.
pub trait OrganizerRepository:
    AreaRepository + ProjectRepository + ResourceRepository + NoteRepository + ArchiveRepository
{
    /// Loads the whole document for rendering.
    fn snapshot(&self) -> Document;
}

/// Document-backed implementation of every repository contract.
pub struct DocumentRepository<S: SlotStore, G: IdGenerator> {
    store: DocumentStore<S>,
    ids: G,
}

impl<S: SlotStore, G: IdGenerator> DocumentRepository<S, G> {
    pub fn new(store: DocumentStore<S>, ids: G) -> Self {
        Self { store, ids }
    }

    /// Uses the default slot key of `DocumentStore::new`.
    pub fn with_slots(slots: S, ids: G) -> Self {
        Self::new(DocumentStore::new(slots), ids)
    }

    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    /// Runs one load → mutate → save cycle.
    ///
    /// The slot is written only when `mutate` reports at least one change.
    /// A failed read aborts before anything is written.
    fn apply(
        &self,
        event: &'static str,
        target: &str,
        mutate: impl FnOnce(&mut Document) -> RepoResult<ChangeSet>,
    ) -> RepoResult<ChangeSet> {
        let mut document = self.store.load_for_update().map_err(|err| {
            error!(
                "event={event} module=repo status=error target={target} error_code=load_failed error={err}"
            );
            RepoError::from(err)
        })?;
        let changes = mutate(&mut document)?;
        if changes.is_empty() {
            debug!("event={event} module=repo status=skipped target={target} reason=no_change");
            return Ok(changes);
        }

        if let Err(err) = self.store.save(&document) {
            error!(
                "event={event} module=repo status=error target={target} error_code=save_failed error={err}"
            );
            return Err(err.into());
        }
        info!(
            "event={event} module=repo status=ok target={target} changes={}",
            changes.len()
        );
        Ok(changes)
    }

    /// Runs a creation cycle and returns the minted id.
    fn create(
        &self,
        event: &'static str,
        kind: EntityKind,
        build: impl FnOnce(&mut Document, &EntityId) -> ChangeSet,
    ) -> RepoResult<EntityId> {
        let mut created = EntityId::new();
        self.apply(event, kind.label(), |document| {
            let id = self.mint_id(document, kind)?;
            let mut changes = ChangeSet::from(Change::Created(EntityRef::new(kind, id.clone())));
            changes.merge(build(document, &id));
            created = id;
            Ok(changes)
        })?;
        debug!("event={event} module=repo status=ok id={created}");
        Ok(created)
    }

    fn mint_id(&self, document: &Document, kind: EntityKind) -> RepoResult<EntityId> {
        let mut last = EntityId::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id(kind.id_prefix());
            if !document.id_in_use(&candidate) {
                return Ok(candidate);
            }
            last = candidate;
        }
        Err(RepoError::IdCollision(last))
    }
}

impl<S: SlotStore, G: IdGenerator> OrganizerRepository for DocumentRepository<S, G> {
    fn snapshot(&self) -> Document {
        self.store.load()
    }
}

/// Applies `edit` to the entity when present. Returns whether it changed.
fn edit_entity<E>(
    entities: &mut BTreeMap<EntityId, E>,
    id: &str,
    edit: impl FnOnce(&mut E) -> bool,
) -> bool {
    entities.get_mut(id).is_some_and(edit)
}

/// Overwrites `slot` when the value differs.
fn set_field<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn updated_if(changed: bool, entity: EntityRef) -> ChangeSet {
    let mut changes = ChangeSet::new();
    changes.record_if(changed, || Change::Updated(entity));
    changes
}

#[cfg(test)]
mod tests {
    use super::{DocumentRepository, RepoError};
    use crate::id::{IdGenerator, SequenceIdGenerator};
    use crate::repo::AreaRepository;
    use crate::storage::{
        MemorySlotStore, SlotStore, StorageError, StorageResult, DEFAULT_SLOT_KEY,
    };
    use std::cell::Cell;

    /// Memory slots whose next read can be made to fail once.
    #[derive(Default)]
    struct FlakySlots {
        inner: MemorySlotStore,
        fail_next_read: Cell<bool>,
    }

    impl SlotStore for FlakySlots {
        fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
            if self.fail_next_read.replace(false) {
                return Err(StorageError::Unavailable("database is locked".to_string()));
            }
            self.inner.read_slot(key)
        }

        fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
            self.inner.write_slot(key, value)
        }
    }

    #[test]
    fn failed_read_aborts_mutation_without_overwriting_document() {
        let slots = FlakySlots::default();
        let repo = DocumentRepository::with_slots(&slots, SequenceIdGenerator::new());
        for title in ["Health", "Home", "Finances"] {
            repo.add_area(title, Default::default()).unwrap();
        }
        let before = slots.inner.raw(DEFAULT_SLOT_KEY);

        slots.fail_next_read.set(true);
        let err = repo.add_area("Hobby", Default::default()).unwrap_err();
        assert!(matches!(err, RepoError::Storage(StorageError::Unavailable(_))));
        assert_eq!(slots.inner.raw(DEFAULT_SLOT_KEY), before);

        slots.fail_next_read.set(true);
        assert!(repo.rename_area("area-1", "Body").is_err());
        assert_eq!(slots.inner.raw(DEFAULT_SLOT_KEY), before);
        assert_eq!(repo.list_areas(true).len(), 3);
    }

    struct StuckGenerator;

    impl IdGenerator for StuckGenerator {
        fn next_id(&self, prefix: &str) -> String {
            format!("{prefix}-same")
        }
    }

    #[test]
    fn stuck_generator_reports_collision_instead_of_aliasing() {
        let repo = DocumentRepository::with_slots(MemorySlotStore::new(), StuckGenerator);
        let first = repo.add_area("One", Default::default()).unwrap();
        assert_eq!(first, "area-same");

        let err = repo.add_area("Two", Default::default()).unwrap_err();
        assert!(matches!(err, RepoError::IdCollision(ref id) if id == "area-same"));
        assert_eq!(repo.list_areas(true).len(), 1);
    }
}
