//! Area entity.
//!
//! # Invariants
//! - `project_ids` holds each project id at most once.
//! - A project listed here should carry `area_id == Some(area.id)`; the link
//!   manager keeps both sides in sync.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};

/// Long-lived sphere of responsibility that groups projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    /// Persisted as `desc`.
    #[serde(default, rename = "desc")]
    pub description: String,
    /// Forward list of owned projects, in insertion order.
    #[serde(default)]
    pub project_ids: Vec<EntityId>,
}

/// Optional fields accepted when creating an area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArea {
    pub description: String,
}

impl Area {
    pub fn new(id: EntityId, title: impl Into<String>, fields: NewArea) -> Self {
        Self {
            id,
            title: title.into(),
            description: fields.description,
            project_ids: Vec::new(),
        }
    }

    /// Appends `project_id` unless already listed. Returns whether it changed.
    pub fn attach_project(&mut self, project_id: &str) -> bool {
        if self.project_ids.iter().any(|id| id == project_id) {
            return false;
        }
        self.project_ids.push(project_id.to_string());
        true
    }

    /// Removes every occurrence of `project_id`. Returns whether it changed.
    pub fn detach_project(&mut self, project_id: &str) -> bool {
        let before = self.project_ids.len();
        self.project_ids.retain(|id| id != project_id);
        self.project_ids.len() != before
    }
}
