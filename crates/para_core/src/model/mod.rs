//! Organizer document model.
//!
//! # Responsibility
//! - Define the persisted shape of areas, projects, resources and notes.
//! - Provide dangling-tolerant read helpers over one loaded `Document`.
//!
//! # Invariants
//! - Every entity is keyed by its own `id` inside the document maps.
//! - A back-reference is either `None` or the id of an entity that existed
//!   when it was written; readers treat missing targets as unlinked.
//! - The archive index is a visibility flag, independent of entity fields.

pub mod area;
pub mod document;
pub mod note;
pub mod project;
pub mod resource;

use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Entity category used by change descriptions and FFI envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Area,
    Project,
    Resource,
    Note,
}

impl EntityKind {
    /// Stable lowercase label (`area|project|resource|note`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Project => "project",
            Self::Resource => "resource",
            Self::Note => "note",
        }
    }

    /// Id prefix used when minting ids for this kind.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Project => "proj",
            Self::Resource => "res",
            Self::Note => "note",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Entity categories tracked by the archive index.
///
/// Notes have no archive list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveKind {
    Area,
    Project,
    Resource,
}

impl ArchiveKind {
    /// Parses `area|project|resource`, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "area" => Some(Self::Area),
            "project" => Some(Self::Project),
            "resource" => Some(Self::Resource),
            _ => None,
        }
    }
}

impl From<ArchiveKind> for EntityKind {
    fn from(value: ArchiveKind) -> Self {
        match value {
            ArchiveKind::Area => Self::Area,
            ArchiveKind::Project => Self::Project,
            ArchiveKind::Resource => Self::Resource,
        }
    }
}

/// Typed pointer to one entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<EntityId>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn area(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Area, id)
    }

    pub fn project(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Project, id)
    }

    pub fn resource(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Resource, id)
    }

    pub fn note(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Note, id)
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchiveKind, EntityKind, EntityRef};

    #[test]
    fn archive_kind_parses_labels_case_insensitively() {
        assert_eq!(ArchiveKind::parse(" Area "), Some(ArchiveKind::Area));
        assert_eq!(ArchiveKind::parse("RESOURCE"), Some(ArchiveKind::Resource));
        assert_eq!(ArchiveKind::parse("note"), None);
    }

    #[test]
    fn entity_ref_displays_kind_and_id() {
        assert_eq!(EntityRef::project("proj-7").to_string(), "project:proj-7");
        assert_eq!(EntityKind::from(ArchiveKind::Project), EntityKind::Project);
    }
}
