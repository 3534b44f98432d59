//! Area repository contract.

use super::{edit_entity, set_field, updated_if, DocumentRepository, RepoResult};
use crate::id::{EntityId, IdGenerator};
use crate::link::{self, ChangeSet};
use crate::model::area::{Area, NewArea};
use crate::model::{ArchiveKind, EntityKind, EntityRef};
use crate::storage::SlotStore;

/// Area CRUD operations.
pub trait AreaRepository {
    /// Creates an area with an empty project list and returns its id.
    fn add_area(&self, title: &str, fields: NewArea) -> RepoResult<EntityId>;
    fn get_area(&self, id: &str) -> Option<Area>;
    /// Lists areas ordered by id.
    fn list_areas(&self, include_archived: bool) -> Vec<Area>;
    fn rename_area(&self, id: &str, title: &str) -> RepoResult<ChangeSet>;
    fn set_area_description(&self, id: &str, description: &str) -> RepoResult<ChangeSet>;
    /// Deletes the area and clears every reference to it.
    fn remove_area(&self, id: &str) -> RepoResult<ChangeSet>;
}

impl<S: SlotStore, G: IdGenerator> AreaRepository for DocumentRepository<S, G> {
    fn add_area(&self, title: &str, fields: NewArea) -> RepoResult<EntityId> {
        self.create("area_create", EntityKind::Area, |document, id| {
            document
                .areas
                .insert(id.clone(), Area::new(id.clone(), title, fields));
            ChangeSet::new()
        })
    }

    fn get_area(&self, id: &str) -> Option<Area> {
        self.store().load().areas.remove(id)
    }

    fn list_areas(&self, include_archived: bool) -> Vec<Area> {
        let document = self.store().load();
        let archive = document.archive;
        document
            .areas
            .into_values()
            .filter(|area| include_archived || !archive.contains(ArchiveKind::Area, &area.id))
            .collect()
    }

    fn rename_area(&self, id: &str, title: &str) -> RepoResult<ChangeSet> {
        self.apply("area_rename", id, |document| {
            let changed = edit_entity(&mut document.areas, id, |area| {
                set_field(&mut area.title, title.to_string())
            });
            Ok(updated_if(changed, EntityRef::area(id)))
        })
    }

    fn set_area_description(&self, id: &str, description: &str) -> RepoResult<ChangeSet> {
        self.apply("area_describe", id, |document| {
            let changed = edit_entity(&mut document.areas, id, |area| {
                set_field(&mut area.description, description.to_string())
            });
            Ok(updated_if(changed, EntityRef::area(id)))
        })
    }

    fn remove_area(&self, id: &str) -> RepoResult<ChangeSet> {
        self.apply("area_delete", id, |document| Ok(link::delete_area(document, id)))
    }
}
