//! Resource entity.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a resource points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[default]
    Link,
    Note,
    File,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Note => "note",
            Self::File => "file",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "link" => Some(Self::Link),
            "note" => Some(Self::Note),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

/// Reference material, optionally filed under an area and used by projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    /// Persisted as `type`.
    #[serde(default, rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub area_id: Option<EntityId>,
    /// Mirrors `Project::resource_ids`.
    #[serde(default)]
    pub project_ids: Vec<EntityId>,
}

/// Optional fields accepted when creating a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewResource {
    pub kind: ResourceKind,
    pub url: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub area_id: Option<EntityId>,
    pub project_ids: Vec<EntityId>,
}

impl Resource {
    pub fn new(id: EntityId, title: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            url: String::new(),
            notes: String::new(),
            tags: BTreeSet::new(),
            area_id: None,
            project_ids: Vec::new(),
        }
    }

    pub fn attach_project(&mut self, project_id: &str) -> bool {
        if self.project_ids.iter().any(|id| id == project_id) {
            return false;
        }
        self.project_ids.push(project_id.to_string());
        true
    }

    pub fn detach_project(&mut self, project_id: &str) -> bool {
        let before = self.project_ids.len();
        self.project_ids.retain(|id| id != project_id);
        self.project_ids.len() != before
    }
}
