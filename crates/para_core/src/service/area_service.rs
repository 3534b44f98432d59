//! Area panel use-cases.
//!
//! # Responsibility
//! - Create areas and add projects/notes/resources inside one area.
//! - Assemble the area detail view (linked projects, notes, resources).
//! - Unlink, archive and delete with full cascade.
//!
//! # Invariants
//! - Titles are trimmed; blank titles are rejected.
//! - Adding into an area requires the area to exist.
//! - Detail lists skip dangling references.

use crate::id::EntityId;
use crate::link::ChangeSet;
use crate::model::area::{Area, NewArea};
use crate::model::note::{NewNote, Note};
use crate::model::project::{NewProject, Project};
use crate::model::resource::{NewResource, Resource, ResourceKind};
use crate::model::ArchiveKind;
use crate::repo::{OrganizerRepository, RepoError};
use crate::text::normalize_title;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from area use-cases.
#[derive(Debug)]
pub enum AreaServiceError {
    /// Title is blank after trim.
    InvalidTitle,
    /// Target area does not exist.
    AreaNotFound(EntityId),
    /// Target project does not exist.
    ProjectNotFound(EntityId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AreaServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "title must not be blank"),
            Self::AreaNotFound(id) => write!(f, "area not found: {id}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AreaServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AreaServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Read model for one area panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaDetail {
    pub area: Area,
    pub archived: bool,
    /// In the area's `projectIds` order.
    pub projects: Vec<Project>,
    /// Notes filed under the area, ordered by id.
    pub notes: Vec<Note>,
    /// Resources filed under the area, ordered by id.
    pub resources: Vec<Resource>,
}

/// Read model for one project row expanded inside an area panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: Project,
    /// Owning area when the back-reference resolves.
    pub area: Option<Area>,
    pub archived: bool,
    /// Notes attached to the project, ordered by id.
    pub notes: Vec<Note>,
    /// In the project's `resourceIds` order.
    pub resources: Vec<Resource>,
}

/// Area use-case facade.
pub struct AreaService<R: OrganizerRepository> {
    repo: R,
}

impl<R: OrganizerRepository> AreaService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create_area(
        &self,
        title: &str,
        description: impl Into<String>,
    ) -> Result<EntityId, AreaServiceError> {
        let title = normalize_title(title).ok_or(AreaServiceError::InvalidTitle)?;
        let fields = NewArea {
            description: description.into(),
        };
        Ok(self.repo.add_area(&title, fields)?)
    }

    pub fn area_detail(&self, area_id: &str) -> Result<AreaDetail, AreaServiceError> {
        let document = self.repo.snapshot();
        let area = document
            .areas
            .get(area_id)
            .cloned()
            .ok_or_else(|| AreaServiceError::AreaNotFound(area_id.to_string()))?;

        Ok(AreaDetail {
            archived: document.is_archived(ArchiveKind::Area, area_id),
            projects: document.area_projects(area_id).into_iter().cloned().collect(),
            notes: document.area_notes(area_id).into_iter().cloned().collect(),
            resources: document
                .area_resources(area_id)
                .into_iter()
                .cloned()
                .collect(),
            area,
        })
    }

    pub fn project_detail(&self, project_id: &str) -> Result<ProjectDetail, AreaServiceError> {
        let document = self.repo.snapshot();
        let project = document
            .projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| AreaServiceError::ProjectNotFound(project_id.to_string()))?;

        Ok(ProjectDetail {
            area: document.project_area(project_id).cloned(),
            archived: document.is_archived(ArchiveKind::Project, project_id),
            notes: document
                .project_notes(project_id)
                .into_iter()
                .cloned()
                .collect(),
            resources: document
                .project_resources(project_id)
                .into_iter()
                .cloned()
                .collect(),
            project,
        })
    }

    /// Overwrites the description. Missing areas are a silent no-op.
    pub fn update_description(
        &self,
        area_id: &str,
        description: &str,
    ) -> Result<ChangeSet, AreaServiceError> {
        Ok(self.repo.set_area_description(area_id, description)?)
    }

    pub fn add_project(&self, area_id: &str, title: &str) -> Result<EntityId, AreaServiceError> {
        let title = self.prepare_child(area_id, title)?;
        Ok(self.repo.add_project(&title, NewProject::in_area(area_id))?)
    }

    pub fn add_note(&self, area_id: &str, title: &str) -> Result<EntityId, AreaServiceError> {
        let title = self.prepare_child(area_id, title)?;
        let fields = NewNote {
            area_id: Some(area_id.to_string()),
            ..NewNote::default()
        };
        Ok(self.repo.add_note(&title, fields)?)
    }

    pub fn add_resource(
        &self,
        area_id: &str,
        title: &str,
        kind: ResourceKind,
    ) -> Result<EntityId, AreaServiceError> {
        let title = self.prepare_child(area_id, title)?;
        let fields = NewResource {
            kind,
            area_id: Some(area_id.to_string()),
            ..NewResource::default()
        };
        Ok(self.repo.add_resource(&title, fields)?)
    }

    pub fn unlink_project(
        &self,
        area_id: &str,
        project_id: &str,
    ) -> Result<ChangeSet, AreaServiceError> {
        Ok(self.repo.unlink_project_from_area(project_id, area_id)?)
    }

    pub fn unlink_note(&self, area_id: &str, note_id: &str) -> Result<ChangeSet, AreaServiceError> {
        Ok(self.repo.unlink_note_from_area(note_id, area_id)?)
    }

    pub fn unlink_resource(
        &self,
        area_id: &str,
        resource_id: &str,
    ) -> Result<ChangeSet, AreaServiceError> {
        Ok(self.repo.unlink_resource_from_area(resource_id, area_id)?)
    }

    pub fn archive_area(&self, area_id: &str) -> Result<ChangeSet, AreaServiceError> {
        Ok(self.repo.archive(ArchiveKind::Area, area_id)?)
    }

    /// Deletes the area; linked projects, notes and resources survive
    /// unlinked.
    pub fn delete_area(&self, area_id: &str) -> Result<ChangeSet, AreaServiceError> {
        Ok(self.repo.remove_area(area_id)?)
    }

    fn prepare_child(&self, area_id: &str, title: &str) -> Result<String, AreaServiceError> {
        let title = normalize_title(title).ok_or(AreaServiceError::InvalidTitle)?;
        if self.repo.get_area(area_id).is_none() {
            return Err(AreaServiceError::AreaNotFound(area_id.to_string()));
        }
        Ok(title)
    }
}
