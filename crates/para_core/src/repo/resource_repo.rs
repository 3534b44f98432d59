//! Resource repository contract.

use super::{
    edit_entity, set_field, updated_if, DocumentRepository, EntityListQuery, RepoResult,
};
use crate::id::{EntityId, IdGenerator};
use crate::link::{self, ChangeSet};
use crate::model::resource::{NewResource, Resource, ResourceKind};
use crate::model::{ArchiveKind, EntityKind, EntityRef};
use crate::storage::SlotStore;
use crate::text::normalize_tags;

/// Resource CRUD and link operations.
pub trait ResourceRepository {
    /// Creates a resource, linking the given area and projects when they
    /// exist.
    fn add_resource(&self, title: &str, fields: NewResource) -> RepoResult<EntityId>;
    fn get_resource(&self, id: &str) -> Option<Resource>;
    fn list_resources(&self, query: &EntityListQuery) -> Vec<Resource>;
    fn rename_resource(&self, id: &str, title: &str) -> RepoResult<ChangeSet>;
    fn set_resource_url(&self, id: &str, url: &str) -> RepoResult<ChangeSet>;
    fn set_resource_notes(&self, id: &str, notes: &str) -> RepoResult<ChangeSet>;
    fn set_resource_kind(&self, id: &str, kind: ResourceKind) -> RepoResult<ChangeSet>;
    /// Replaces the whole tag set after normalization.
    fn set_resource_tags(&self, id: &str, tags: &[String]) -> RepoResult<ChangeSet>;
    fn link_resource_to_area(&self, resource_id: &str, area_id: &str) -> RepoResult<ChangeSet>;
    fn unlink_resource_from_area(&self, resource_id: &str, area_id: &str)
        -> RepoResult<ChangeSet>;
    fn link_resource_to_project(&self, resource_id: &str, project_id: &str)
        -> RepoResult<ChangeSet>;
    fn unlink_resource_from_project(
        &self,
        resource_id: &str,
        project_id: &str,
    ) -> RepoResult<ChangeSet>;
    /// Deletes the resource and scrubs it from projects and the archive.
    fn remove_resource(&self, id: &str) -> RepoResult<ChangeSet>;
}

impl<S: SlotStore, G: IdGenerator> ResourceRepository for DocumentRepository<S, G> {
    fn add_resource(&self, title: &str, fields: NewResource) -> RepoResult<EntityId> {
        self.create("resource_create", EntityKind::Resource, |document, id| {
            let NewResource {
                kind,
                url,
                notes,
                tags,
                area_id,
                project_ids,
            } = fields;
            let mut resource = Resource::new(id.clone(), title, kind);
            resource.url = url;
            resource.notes = notes;
            resource.tags = normalize_tags(&tags);
            document.resources.insert(id.clone(), resource);

            let mut changes = ChangeSet::new();
            if let Some(area_id) = area_id.as_deref() {
                changes.merge(link::link_resource_to_area(document, id, area_id));
            }
            for project_id in &project_ids {
                changes.merge(link::link_resource_to_project(document, id, project_id));
            }
            changes
        })
    }

    fn get_resource(&self, id: &str) -> Option<Resource> {
        self.store().load().resources.remove(id)
    }

    fn list_resources(&self, query: &EntityListQuery) -> Vec<Resource> {
        let document = self.store().load();
        let archive = document.archive;
        document
            .resources
            .into_values()
            .filter(|resource| query.matches_area(resource.area_id.as_deref()))
            .filter(|resource| {
                query.include_archived || !archive.contains(ArchiveKind::Resource, &resource.id)
            })
            .collect()
    }

    fn rename_resource(&self, id: &str, title: &str) -> RepoResult<ChangeSet> {
        self.apply("resource_rename", id, |document| {
            let changed = edit_entity(&mut document.resources, id, |resource| {
                set_field(&mut resource.title, title.to_string())
            });
            Ok(updated_if(changed, EntityRef::resource(id)))
        })
    }

    fn set_resource_url(&self, id: &str, url: &str) -> RepoResult<ChangeSet> {
        self.apply("resource_url", id, |document| {
            let changed = edit_entity(&mut document.resources, id, |resource| {
                set_field(&mut resource.url, url.to_string())
            });
            Ok(updated_if(changed, EntityRef::resource(id)))
        })
    }

    fn set_resource_notes(&self, id: &str, notes: &str) -> RepoResult<ChangeSet> {
        self.apply("resource_notes", id, |document| {
            let changed = edit_entity(&mut document.resources, id, |resource| {
                set_field(&mut resource.notes, notes.to_string())
            });
            Ok(updated_if(changed, EntityRef::resource(id)))
        })
    }

    fn set_resource_kind(&self, id: &str, kind: ResourceKind) -> RepoResult<ChangeSet> {
        self.apply("resource_kind", id, |document| {
            let changed = edit_entity(&mut document.resources, id, |resource| {
                set_field(&mut resource.kind, kind)
            });
            Ok(updated_if(changed, EntityRef::resource(id)))
        })
    }

    fn set_resource_tags(&self, id: &str, tags: &[String]) -> RepoResult<ChangeSet> {
        let normalized = normalize_tags(tags);
        self.apply("resource_tags", id, |document| {
            let changed = edit_entity(&mut document.resources, id, |resource| {
                set_field(&mut resource.tags, normalized)
            });
            Ok(updated_if(changed, EntityRef::resource(id)))
        })
    }

    fn link_resource_to_area(&self, resource_id: &str, area_id: &str) -> RepoResult<ChangeSet> {
        self.apply("resource_link_area", resource_id, |document| {
            Ok(link::link_resource_to_area(document, resource_id, area_id))
        })
    }

    fn unlink_resource_from_area(
        &self,
        resource_id: &str,
        area_id: &str,
    ) -> RepoResult<ChangeSet> {
        self.apply("resource_unlink_area", resource_id, |document| {
            Ok(link::unlink_resource_from_area(document, resource_id, area_id))
        })
    }

    fn link_resource_to_project(
        &self,
        resource_id: &str,
        project_id: &str,
    ) -> RepoResult<ChangeSet> {
        self.apply("resource_link_project", resource_id, |document| {
            Ok(link::link_resource_to_project(document, resource_id, project_id))
        })
    }

    fn unlink_resource_from_project(
        &self,
        resource_id: &str,
        project_id: &str,
    ) -> RepoResult<ChangeSet> {
        self.apply("resource_unlink_project", resource_id, |document| {
            Ok(link::unlink_resource_from_project(document, resource_id, project_id))
        })
    }

    fn remove_resource(&self, id: &str) -> RepoResult<ChangeSet> {
        self.apply("resource_delete", id, |document| {
            Ok(link::delete_resource(document, id))
        })
    }
}
