//! Project repository contract.

use super::{
    edit_entity, set_field, updated_if, DocumentRepository, EntityListQuery, RepoResult,
};
use crate::id::{EntityId, IdGenerator};
use crate::link::{self, ChangeSet};
use crate::model::project::{NewProject, Project, ProjectStatus};
use crate::model::{ArchiveKind, EntityKind, EntityRef};
use crate::storage::SlotStore;
use serde_json::Value;

/// Project CRUD and area-link operations.
pub trait ProjectRepository {
    /// Creates a project.
    ///
    /// A given `area_id` is linked on both sides; listed `resource_ids` get
    /// the new project appended to their `projectIds`. Missing targets are
    /// skipped and leave the reference empty.
    fn add_project(&self, title: &str, fields: NewProject) -> RepoResult<EntityId>;
    fn get_project(&self, id: &str) -> Option<Project>;
    /// Lists projects ordered by id.
    fn list_projects(&self, query: &EntityListQuery) -> Vec<Project>;
    fn rename_project(&self, id: &str, title: &str) -> RepoResult<ChangeSet>;
    fn set_project_description(&self, id: &str, description: &str) -> RepoResult<ChangeSet>;
    /// Updates the stored status; the archive index is left untouched.
    fn set_project_status(&self, id: &str, status: ProjectStatus) -> RepoResult<ChangeSet>;
    /// Replaces the opaque task list.
    fn set_project_tasks(&self, id: &str, tasks: Vec<Value>) -> RepoResult<ChangeSet>;
    fn link_project_to_area(&self, project_id: &str, area_id: &str) -> RepoResult<ChangeSet>;
    fn unlink_project_from_area(&self, project_id: &str, area_id: &str)
        -> RepoResult<ChangeSet>;
    /// Deletes the project and scrubs it from areas, notes, resources and
    /// the archive index.
    fn remove_project(&self, id: &str) -> RepoResult<ChangeSet>;
}

impl<S: SlotStore, G: IdGenerator> ProjectRepository for DocumentRepository<S, G> {
    fn add_project(&self, title: &str, fields: NewProject) -> RepoResult<EntityId> {
        self.create("project_create", EntityKind::Project, |document, id| {
            let NewProject {
                area_id,
                description,
                tasks,
                resource_ids,
                status,
            } = fields;
            let mut project = Project::new(id.clone(), title, description);
            project.tasks = tasks;
            project.status = status;
            document.projects.insert(id.clone(), project);

            let mut changes = ChangeSet::new();
            if let Some(area_id) = area_id.as_deref() {
                changes.merge(link::link_project_to_area(document, id, area_id));
            }
            for resource_id in &resource_ids {
                changes.merge(link::link_resource_to_project(document, resource_id, id));
            }
            changes
        })
    }

    fn get_project(&self, id: &str) -> Option<Project> {
        self.store().load().projects.remove(id)
    }

    fn list_projects(&self, query: &EntityListQuery) -> Vec<Project> {
        let document = self.store().load();
        let archive = document.archive;
        document
            .projects
            .into_values()
            .filter(|project| query.matches_area(project.area_id.as_deref()))
            .filter(|project| {
                query.include_archived || !archive.contains(ArchiveKind::Project, &project.id)
            })
            .collect()
    }

    fn rename_project(&self, id: &str, title: &str) -> RepoResult<ChangeSet> {
        self.apply("project_rename", id, |document| {
            let changed = edit_entity(&mut document.projects, id, |project| {
                set_field(&mut project.title, title.to_string())
            });
            Ok(updated_if(changed, EntityRef::project(id)))
        })
    }

    fn set_project_description(&self, id: &str, description: &str) -> RepoResult<ChangeSet> {
        self.apply("project_describe", id, |document| {
            let changed = edit_entity(&mut document.projects, id, |project| {
                set_field(&mut project.description, description.to_string())
            });
            Ok(updated_if(changed, EntityRef::project(id)))
        })
    }

    fn set_project_status(&self, id: &str, status: ProjectStatus) -> RepoResult<ChangeSet> {
        self.apply("project_status", id, |document| {
            let changed = edit_entity(&mut document.projects, id, |project| {
                set_field(&mut project.status, status)
            });
            Ok(updated_if(changed, EntityRef::project(id)))
        })
    }

    fn set_project_tasks(&self, id: &str, tasks: Vec<Value>) -> RepoResult<ChangeSet> {
        self.apply("project_tasks", id, |document| {
            let changed = edit_entity(&mut document.projects, id, |project| {
                set_field(&mut project.tasks, tasks)
            });
            Ok(updated_if(changed, EntityRef::project(id)))
        })
    }

    fn link_project_to_area(&self, project_id: &str, area_id: &str) -> RepoResult<ChangeSet> {
        self.apply("project_link_area", project_id, |document| {
            Ok(link::link_project_to_area(document, project_id, area_id))
        })
    }

    fn unlink_project_from_area(
        &self,
        project_id: &str,
        area_id: &str,
    ) -> RepoResult<ChangeSet> {
        self.apply("project_unlink_area", project_id, |document| {
            Ok(link::unlink_project_from_area(document, project_id, area_id))
        })
    }

    fn remove_project(&self, id: &str) -> RepoResult<ChangeSet> {
        self.apply("project_delete", id, |document| {
            Ok(link::delete_project(document, id))
        })
    }
}
