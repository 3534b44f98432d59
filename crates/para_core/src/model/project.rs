//! Project entity.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle flag stored on the project itself.
///
/// Independent of the archive index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

/// Finite effort, optionally owned by one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "desc")]
    pub description: String,
    /// Back-reference to the owning area.
    #[serde(default)]
    pub area_id: Option<EntityId>,
    /// Opaque task records; core never inspects them.
    #[serde(default)]
    pub tasks: Vec<Value>,
    #[serde(default)]
    pub resource_ids: Vec<EntityId>,
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Optional fields accepted when creating a project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProject {
    pub area_id: Option<EntityId>,
    pub description: String,
    pub tasks: Vec<Value>,
    pub resource_ids: Vec<EntityId>,
    pub status: ProjectStatus,
}

impl NewProject {
    /// Shorthand for a project created inside `area_id`.
    pub fn in_area(area_id: impl Into<EntityId>) -> Self {
        Self {
            area_id: Some(area_id.into()),
            ..Self::default()
        }
    }
}

impl Project {
    /// Builds a project without any links; the link manager wires
    /// `area_id` and `resource_ids` afterwards.
    pub fn new(id: EntityId, title: impl Into<String>, description: String) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            area_id: None,
            tasks: Vec::new(),
            resource_ids: Vec::new(),
            status: ProjectStatus::Active,
        }
    }

    pub fn attach_resource(&mut self, resource_id: &str) -> bool {
        if self.resource_ids.iter().any(|id| id == resource_id) {
            return false;
        }
        self.resource_ids.push(resource_id.to_string());
        true
    }

    pub fn detach_resource(&mut self, resource_id: &str) -> bool {
        let before = self.resource_ids.len();
        self.resource_ids.retain(|id| id != resource_id);
        self.resource_ids.len() != before
    }
}
