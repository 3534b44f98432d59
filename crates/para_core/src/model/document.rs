//! Whole-document container persisted in one storage slot.
//!
//! # Responsibility
//! - Hold every entity map plus the archive index.
//! - Resolve relationships for readers without trusting stored references.
//!
//! # Invariants
//! - Map keys equal the `id` field of the stored entity.
//! - Maps and tag sets are ordered so serialization is deterministic.

use crate::id::EntityId;
use crate::model::area::Area;
use crate::model::note::Note;
use crate::model::project::Project;
use crate::model::resource::Resource;
use crate::model::{ArchiveKind, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Archived-id lists, one per archivable kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveIndex {
    #[serde(default)]
    pub project_ids: Vec<EntityId>,
    #[serde(default)]
    pub resource_ids: Vec<EntityId>,
    #[serde(default)]
    pub area_ids: Vec<EntityId>,
}

impl ArchiveIndex {
    pub fn ids(&self, kind: ArchiveKind) -> &[EntityId] {
        match kind {
            ArchiveKind::Area => &self.area_ids,
            ArchiveKind::Project => &self.project_ids,
            ArchiveKind::Resource => &self.resource_ids,
        }
    }

    fn ids_mut(&mut self, kind: ArchiveKind) -> &mut Vec<EntityId> {
        match kind {
            ArchiveKind::Area => &mut self.area_ids,
            ArchiveKind::Project => &mut self.project_ids,
            ArchiveKind::Resource => &mut self.resource_ids,
        }
    }

    pub fn contains(&self, kind: ArchiveKind, id: &str) -> bool {
        self.ids(kind).iter().any(|archived| archived == id)
    }

    /// Appends `id` unless already present. Returns whether it changed.
    pub fn insert(&mut self, kind: ArchiveKind, id: &str) -> bool {
        if self.contains(kind, id) {
            return false;
        }
        self.ids_mut(kind).push(id.to_string());
        true
    }

    /// Removes every occurrence of `id`. Removing a non-member is a no-op.
    pub fn purge(&mut self, kind: ArchiveKind, id: &str) -> bool {
        let ids = self.ids_mut(kind);
        let before = ids.len();
        ids.retain(|archived| archived != id);
        ids.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.project_ids.is_empty() && self.resource_ids.is_empty() && self.area_ids.is_empty()
    }
}

/// The single persisted organizer document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub areas: BTreeMap<EntityId, Area>,
    #[serde(default)]
    pub projects: BTreeMap<EntityId, Project>,
    #[serde(default)]
    pub resources: BTreeMap<EntityId, Resource>,
    #[serde(default)]
    pub notes: BTreeMap<EntityId, Note>,
    #[serde(default)]
    pub archive: ArchiveIndex,
}

impl Document {
    /// Returns whether any map or archive list holds data.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
            && self.projects.is_empty()
            && self.resources.is_empty()
            && self.notes.is_empty()
            && self.archive.is_empty()
    }

    /// Returns whether an entity with `id` exists under `kind`.
    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::Area => self.areas.contains_key(id),
            EntityKind::Project => self.projects.contains_key(id),
            EntityKind::Resource => self.resources.contains_key(id),
            EntityKind::Note => self.notes.contains_key(id),
        }
    }

    /// Returns whether `id` is used by any entity of any kind.
    pub fn id_in_use(&self, id: &str) -> bool {
        self.areas.contains_key(id)
            || self.projects.contains_key(id)
            || self.resources.contains_key(id)
            || self.notes.contains_key(id)
    }

    pub fn is_archived(&self, kind: ArchiveKind, id: &str) -> bool {
        self.archive.contains(kind, id)
    }

    /// Projects listed by the area, in list order, skipping dangling ids.
    pub fn area_projects(&self, area_id: &str) -> Vec<&Project> {
        let Some(area) = self.areas.get(area_id) else {
            return Vec::new();
        };
        area.project_ids
            .iter()
            .filter_map(|project_id| self.projects.get(project_id))
            .collect()
    }

    /// Notes whose back-reference points at `area_id`.
    pub fn area_notes(&self, area_id: &str) -> Vec<&Note> {
        self.notes
            .values()
            .filter(|note| note.area_id.as_deref() == Some(area_id))
            .collect()
    }

    /// Resources whose back-reference points at `area_id`.
    pub fn area_resources(&self, area_id: &str) -> Vec<&Resource> {
        self.resources
            .values()
            .filter(|resource| resource.area_id.as_deref() == Some(area_id))
            .collect()
    }

    /// Notes whose back-reference points at `project_id`.
    pub fn project_notes(&self, project_id: &str) -> Vec<&Note> {
        self.notes
            .values()
            .filter(|note| note.project_id.as_deref() == Some(project_id))
            .collect()
    }

    /// Resources listed by the project, skipping dangling ids.
    pub fn project_resources(&self, project_id: &str) -> Vec<&Resource> {
        let Some(project) = self.projects.get(project_id) else {
            return Vec::new();
        };
        project
            .resource_ids
            .iter()
            .filter_map(|resource_id| self.resources.get(resource_id))
            .collect()
    }

    /// The owning area of a project, if the back-reference resolves.
    pub fn project_area(&self, project_id: &str) -> Option<&Area> {
        let area_id = self.projects.get(project_id)?.area_id.as_deref()?;
        self.areas.get(area_id)
    }
}
