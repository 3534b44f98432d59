//! Cascade/link manager.
//!
//! # Responsibility
//! - Keep area↔project, area↔note, area↔resource, project↔note and
//!   project↔resource references consistent under every mutation.
//! - Run deletion cascades and archive-index bookkeeping.
//! - Describe every effect as a `ChangeSet`; no I/O happens here.
//!
//! # Invariants
//! - Link creation is bidirectional wherever the model stores both sides,
//!   and never duplicates a forward-list entry.
//! - Unlinking clears a back-reference only when it points at the given
//!   parent, and always scrubs the child from the parent's forward list.
//! - Every function is idempotent: a second call yields an empty change set.
//! - Links to missing entities are no-ops.

mod archive;
mod cascade;
mod change;

pub use archive::{archive, unarchive};
pub use cascade::{delete_area, delete_note, delete_project, delete_resource};
pub use change::{Change, ChangeSet};

use crate::model::document::Document;
use crate::model::EntityRef;

/// Sets the project's area, moving it out of a previous area if needed.
pub fn link_project_to_area(document: &mut Document, project_id: &str, area_id: &str) -> ChangeSet {
    let mut changes = ChangeSet::new();
    if !document.areas.contains_key(area_id) {
        return changes;
    }
    let Some(project) = document.projects.get_mut(project_id) else {
        return changes;
    };

    let previous = project.area_id.replace(area_id.to_string());
    let back_reference_changed = previous.as_deref() != Some(area_id);
    if let Some(previous_id) = previous.filter(|previous_id| previous_id != area_id) {
        if let Some(previous_area) = document.areas.get_mut(&previous_id) {
            previous_area.detach_project(project_id);
        }
        changes.push(Change::Unlinked {
            child: EntityRef::project(project_id),
            parent: EntityRef::area(previous_id),
        });
    }

    let forward_changed = document
        .areas
        .get_mut(area_id)
        .is_some_and(|area| area.attach_project(project_id));
    changes.record_if(back_reference_changed || forward_changed, || {
        Change::Linked {
            child: EntityRef::project(project_id),
            parent: EntityRef::area(area_id),
        }
    });
    changes
}

/// Removes the project from the area on both sides.
pub fn unlink_project_from_area(
    document: &mut Document,
    project_id: &str,
    area_id: &str,
) -> ChangeSet {
    let forward_changed = document
        .areas
        .get_mut(area_id)
        .is_some_and(|area| area.detach_project(project_id));
    let back_changed = document
        .projects
        .get_mut(project_id)
        .is_some_and(|project| clear_if_points_at(&mut project.area_id, area_id));

    let mut changes = ChangeSet::new();
    changes.record_if(forward_changed || back_changed, || Change::Unlinked {
        child: EntityRef::project(project_id),
        parent: EntityRef::area(area_id),
    });
    changes
}

/// Files the note under an area. Areas keep no forward list of notes.
pub fn link_note_to_area(document: &mut Document, note_id: &str, area_id: &str) -> ChangeSet {
    if !document.areas.contains_key(area_id) {
        return ChangeSet::new();
    }
    let Some(note) = document.notes.get_mut(note_id) else {
        return ChangeSet::new();
    };
    relink(&mut note.area_id, area_id, EntityRef::note(note_id), |id| {
        EntityRef::area(id)
    })
}

pub fn unlink_note_from_area(document: &mut Document, note_id: &str, area_id: &str) -> ChangeSet {
    let changed = document
        .notes
        .get_mut(note_id)
        .is_some_and(|note| clear_if_points_at(&mut note.area_id, area_id));
    unlinked_if(changed, EntityRef::note(note_id), EntityRef::area(area_id))
}

/// Attaches the note to a project. Projects keep no forward list of notes.
pub fn link_note_to_project(document: &mut Document, note_id: &str, project_id: &str) -> ChangeSet {
    if !document.projects.contains_key(project_id) {
        return ChangeSet::new();
    }
    let Some(note) = document.notes.get_mut(note_id) else {
        return ChangeSet::new();
    };
    relink(
        &mut note.project_id,
        project_id,
        EntityRef::note(note_id),
        |id| EntityRef::project(id),
    )
}

pub fn unlink_note_from_project(
    document: &mut Document,
    note_id: &str,
    project_id: &str,
) -> ChangeSet {
    let changed = document
        .notes
        .get_mut(note_id)
        .is_some_and(|note| clear_if_points_at(&mut note.project_id, project_id));
    unlinked_if(changed, EntityRef::note(note_id), EntityRef::project(project_id))
}

/// Files the resource under an area. Areas keep no forward list of resources.
pub fn link_resource_to_area(
    document: &mut Document,
    resource_id: &str,
    area_id: &str,
) -> ChangeSet {
    if !document.areas.contains_key(area_id) {
        return ChangeSet::new();
    }
    let Some(resource) = document.resources.get_mut(resource_id) else {
        return ChangeSet::new();
    };
    relink(
        &mut resource.area_id,
        area_id,
        EntityRef::resource(resource_id),
        |id| EntityRef::area(id),
    )
}

pub fn unlink_resource_from_area(
    document: &mut Document,
    resource_id: &str,
    area_id: &str,
) -> ChangeSet {
    let changed = document
        .resources
        .get_mut(resource_id)
        .is_some_and(|resource| clear_if_points_at(&mut resource.area_id, area_id));
    unlinked_if(changed, EntityRef::resource(resource_id), EntityRef::area(area_id))
}

/// Links a resource and a project on both sides (`projectIds`/`resourceIds`).
pub fn link_resource_to_project(
    document: &mut Document,
    resource_id: &str,
    project_id: &str,
) -> ChangeSet {
    if !document.resources.contains_key(resource_id) {
        return ChangeSet::new();
    }
    let Some(project) = document.projects.get_mut(project_id) else {
        return ChangeSet::new();
    };
    let forward_changed = project.attach_resource(resource_id);
    let back_changed = document
        .resources
        .get_mut(resource_id)
        .is_some_and(|resource| resource.attach_project(project_id));

    let mut changes = ChangeSet::new();
    changes.record_if(forward_changed || back_changed, || Change::Linked {
        child: EntityRef::resource(resource_id),
        parent: EntityRef::project(project_id),
    });
    changes
}

pub fn unlink_resource_from_project(
    document: &mut Document,
    resource_id: &str,
    project_id: &str,
) -> ChangeSet {
    let forward_changed = document
        .projects
        .get_mut(project_id)
        .is_some_and(|project| project.detach_resource(resource_id));
    let back_changed = document
        .resources
        .get_mut(resource_id)
        .is_some_and(|resource| resource.detach_project(project_id));
    unlinked_if(
        forward_changed || back_changed,
        EntityRef::resource(resource_id),
        EntityRef::project(project_id),
    )
}

fn relink(
    slot: &mut Option<String>,
    parent_id: &str,
    child: EntityRef,
    parent_ref: fn(String) -> EntityRef,
) -> ChangeSet {
    let mut changes = ChangeSet::new();
    if slot.as_deref() == Some(parent_id) {
        return changes;
    }
    if let Some(previous) = slot.replace(parent_id.to_string()) {
        changes.push(Change::Unlinked {
            child: child.clone(),
            parent: parent_ref(previous),
        });
    }
    changes.push(Change::Linked {
        child,
        parent: parent_ref(parent_id.to_string()),
    });
    changes
}

fn clear_if_points_at(slot: &mut Option<String>, parent_id: &str) -> bool {
    if slot.as_deref() == Some(parent_id) {
        *slot = None;
        true
    } else {
        false
    }
}

fn unlinked_if(changed: bool, child: EntityRef, parent: EntityRef) -> ChangeSet {
    let mut changes = ChangeSet::new();
    changes.record_if(changed, || Change::Unlinked { child, parent });
    changes
}

#[cfg(test)]
mod tests {
    use super::{
        link_note_to_area, link_project_to_area, link_resource_to_project,
        unlink_project_from_area, unlink_resource_from_project, Change,
    };
    use crate::model::area::{Area, NewArea};
    use crate::model::document::Document;
    use crate::model::note::Note;
    use crate::model::project::Project;
    use crate::model::resource::{Resource, ResourceKind};
    use crate::model::EntityRef;

    fn fixture() -> Document {
        let mut document = Document::default();
        for id in ["area-1", "area-2"] {
            document
                .areas
                .insert(id.to_string(), Area::new(id.to_string(), id, NewArea::default()));
        }
        document.projects.insert(
            "proj-1".to_string(),
            Project::new("proj-1".to_string(), "Run 5k", String::new()),
        );
        document.notes.insert(
            "note-1".to_string(),
            Note::new("note-1".to_string(), "Shoes", String::new()),
        );
        document.resources.insert(
            "res-1".to_string(),
            Resource::new("res-1".to_string(), "Plan", ResourceKind::Link),
        );
        document
    }

    #[test]
    fn link_project_is_bidirectional_and_idempotent() {
        let mut document = fixture();
        let first = link_project_to_area(&mut document, "proj-1", "area-1");
        assert_eq!(first.len(), 1);
        let second = link_project_to_area(&mut document, "proj-1", "area-1");
        assert!(second.is_empty());

        assert_eq!(document.areas["area-1"].project_ids, vec!["proj-1".to_string()]);
        assert_eq!(document.projects["proj-1"].area_id.as_deref(), Some("area-1"));
    }

    #[test]
    fn link_project_repairs_missing_forward_entry() {
        let mut document = fixture();
        document.projects.get_mut("proj-1").unwrap().area_id = Some("area-1".to_string());

        let changes = link_project_to_area(&mut document, "proj-1", "area-1");
        assert_eq!(changes.len(), 1);
        assert_eq!(document.areas["area-1"].project_ids, vec!["proj-1".to_string()]);
    }

    #[test]
    fn relinking_project_moves_it_between_areas() {
        let mut document = fixture();
        link_project_to_area(&mut document, "proj-1", "area-1");
        let changes = link_project_to_area(&mut document, "proj-1", "area-2");

        assert!(changes.contains(&Change::Unlinked {
            child: EntityRef::project("proj-1"),
            parent: EntityRef::area("area-1"),
        }));
        assert!(document.areas["area-1"].project_ids.is_empty());
        assert_eq!(document.areas["area-2"].project_ids, vec!["proj-1".to_string()]);
    }

    #[test]
    fn unlink_project_leaves_foreign_back_reference_untouched() {
        let mut document = fixture();
        link_project_to_area(&mut document, "proj-1", "area-2");
        document
            .areas
            .get_mut("area-1")
            .unwrap()
            .project_ids
            .push("proj-1".to_string());

        let changes = unlink_project_from_area(&mut document, "proj-1", "area-1");
        assert_eq!(changes.len(), 1);
        assert!(document.areas["area-1"].project_ids.is_empty());
        assert_eq!(document.projects["proj-1"].area_id.as_deref(), Some("area-2"));
    }

    #[test]
    fn links_to_missing_entities_are_noops() {
        let mut document = fixture();
        let before = document.clone();

        assert!(link_project_to_area(&mut document, "proj-1", "area-missing").is_empty());
        assert!(link_project_to_area(&mut document, "proj-missing", "area-1").is_empty());
        assert!(link_note_to_area(&mut document, "note-1", "area-missing").is_empty());
        assert!(link_resource_to_project(&mut document, "res-missing", "proj-1").is_empty());
        assert_eq!(document, before);
    }

    #[test]
    fn resource_project_links_are_kept_in_sync() {
        let mut document = fixture();
        link_resource_to_project(&mut document, "res-1", "proj-1");
        assert_eq!(document.projects["proj-1"].resource_ids, vec!["res-1".to_string()]);
        assert_eq!(document.resources["res-1"].project_ids, vec!["proj-1".to_string()]);

        let changes = unlink_resource_from_project(&mut document, "res-1", "proj-1");
        assert_eq!(changes.len(), 1);
        assert!(document.projects["proj-1"].resource_ids.is_empty());
        assert!(document.resources["res-1"].project_ids.is_empty());
        assert!(unlink_resource_from_project(&mut document, "res-1", "proj-1").is_empty());
    }
}
