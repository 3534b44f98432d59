//! Note entity.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Free-form text, optionally filed under an area and/or a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub area_id: Option<EntityId>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Optional fields accepted when creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub content: String,
    pub area_id: Option<EntityId>,
    pub project_id: Option<EntityId>,
    pub tags: Vec<String>,
}

impl Note {
    pub fn new(id: EntityId, title: impl Into<String>, content: String) -> Self {
        Self {
            id,
            title: title.into(),
            content,
            area_id: None,
            project_id: None,
            tags: BTreeSet::new(),
        }
    }
}
