//! Core domain logic for the PARA organizer.
//!
//! Areas own projects; notes and resources can be filed under an area or a
//! project. The whole object graph is one JSON document stored in a single
//! key-value slot and rewritten on every mutation.

pub mod db;
pub mod id;
pub mod link;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod text;

pub use id::{EntityId, IdGenerator, SequenceIdGenerator, SessionIdGenerator};
pub use link::{Change, ChangeSet};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::area::{Area, NewArea};
pub use model::document::{ArchiveIndex, Document};
pub use model::note::{NewNote, Note};
pub use model::project::{NewProject, Project, ProjectStatus};
pub use model::resource::{NewResource, Resource, ResourceKind};
pub use model::{ArchiveKind, EntityKind, EntityRef};
pub use repo::{
    AreaRepository, ArchiveRepository, DocumentRepository, EntityListQuery, NoteRepository,
    OrganizerRepository, ProjectRepository, RepoError, RepoResult, ResourceRepository,
};
pub use service::area_service::{AreaDetail, AreaService, AreaServiceError, ProjectDetail};
pub use service::note_service::{NoteService, NoteServiceError};
pub use storage::{
    DocumentStore, MemorySlotStore, SlotStore, SqliteSlotStore, StorageError, StorageResult,
    DEFAULT_SLOT_KEY,
};
pub use text::escape_html;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
