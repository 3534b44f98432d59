//! Deletion cascades.
//!
//! Each delete scrubs every reference to the removed id before dropping the
//! entity, so no orphaned reference survives. All steps run on the in-memory
//! document; the caller persists the result in a single write.

use super::change::{Change, ChangeSet};
use crate::model::document::Document;
use crate::model::{ArchiveKind, EntityRef};
use log::debug;

/// Deletes an area.
///
/// Order: (1) clear back-references on projects, notes and resources,
/// (2) drop the area, (3) purge the id from the archive index. Step 3 runs
/// even when the area was never archived.
pub fn delete_area(document: &mut Document, area_id: &str) -> ChangeSet {
    let mut changes = ChangeSet::new();
    if !document.areas.contains_key(area_id) {
        return changes;
    }
    let parent = EntityRef::area(area_id);

    // Every project pointing at the area, whether listed by it or not.
    for project in document.projects.values_mut() {
        if project.area_id.as_deref() == Some(area_id) {
            project.area_id = None;
            changes.push(Change::Unlinked {
                child: EntityRef::project(project.id.clone()),
                parent: parent.clone(),
            });
        }
    }
    for note in document.notes.values_mut() {
        if note.area_id.as_deref() == Some(area_id) {
            note.area_id = None;
            changes.push(Change::Unlinked {
                child: EntityRef::note(note.id.clone()),
                parent: parent.clone(),
            });
        }
    }
    for resource in document.resources.values_mut() {
        if resource.area_id.as_deref() == Some(area_id) {
            resource.area_id = None;
            changes.push(Change::Unlinked {
                child: EntityRef::resource(resource.id.clone()),
                parent: parent.clone(),
            });
        }
    }

    document.areas.remove(area_id);
    changes.push(Change::Deleted(parent.clone()));

    let purged = document.archive.purge(ArchiveKind::Area, area_id);
    changes.record_if(purged, || Change::Unarchived(parent));
    changes
}

/// Deletes a project, detaching it from areas, notes and resources.
pub fn delete_project(document: &mut Document, project_id: &str) -> ChangeSet {
    let mut changes = ChangeSet::new();
    let Some(project) = document.projects.remove(project_id) else {
        return changes;
    };
    let subject = EntityRef::project(project_id);

    // Every area is scanned so a stale forward entry cannot survive.
    for area in document.areas.values_mut() {
        if area.detach_project(project_id) {
            changes.push(Change::Unlinked {
                child: subject.clone(),
                parent: EntityRef::area(area.id.clone()),
            });
        }
    }
    for note in document.notes.values_mut() {
        if note.project_id.as_deref() == Some(project_id) {
            note.project_id = None;
            changes.push(Change::Unlinked {
                child: EntityRef::note(note.id.clone()),
                parent: subject.clone(),
            });
        }
    }
    for resource in document.resources.values_mut() {
        if resource.detach_project(project_id) {
            changes.push(Change::Unlinked {
                child: EntityRef::resource(resource.id.clone()),
                parent: subject.clone(),
            });
        }
    }

    debug!(
        "event=project_delete module=link status=ok id={} had_area={} resources={}",
        project.id,
        project.area_id.is_some(),
        project.resource_ids.len()
    );
    changes.push(Change::Deleted(subject.clone()));
    let purged = document.archive.purge(ArchiveKind::Project, project_id);
    changes.record_if(purged, || Change::Unarchived(subject));
    changes
}

/// Deletes a resource, detaching it from every project.
pub fn delete_resource(document: &mut Document, resource_id: &str) -> ChangeSet {
    let mut changes = ChangeSet::new();
    if document.resources.remove(resource_id).is_none() {
        return changes;
    }
    let subject = EntityRef::resource(resource_id);

    for project in document.projects.values_mut() {
        if project.detach_resource(resource_id) {
            changes.push(Change::Unlinked {
                child: subject.clone(),
                parent: EntityRef::project(project.id.clone()),
            });
        }
    }

    changes.push(Change::Deleted(subject.clone()));
    let purged = document.archive.purge(ArchiveKind::Resource, resource_id);
    changes.record_if(purged, || Change::Unarchived(subject));
    changes
}

/// Deletes a note. Nothing references notes, so there is nothing to cascade.
pub fn delete_note(document: &mut Document, note_id: &str) -> ChangeSet {
    let mut changes = ChangeSet::new();
    changes.record_if(document.notes.remove(note_id).is_some(), || {
        Change::Deleted(EntityRef::note(note_id))
    });
    changes
}

#[cfg(test)]
mod tests {
    use super::{delete_area, delete_note, delete_project, delete_resource};
    use crate::link::{link_project_to_area, link_resource_to_project, Change};
    use crate::model::area::{Area, NewArea};
    use crate::model::document::Document;
    use crate::model::note::Note;
    use crate::model::project::Project;
    use crate::model::resource::{Resource, ResourceKind};
    use crate::model::{ArchiveKind, EntityRef};

    fn fixture() -> Document {
        let mut document = Document::default();
        document.areas.insert(
            "area-1".to_string(),
            Area::new("area-1".to_string(), "Health", NewArea::default()),
        );
        document.projects.insert(
            "proj-2".to_string(),
            Project::new("proj-2".to_string(), "Run 5k", String::new()),
        );
        let mut note = Note::new("note-3".to_string(), "Shoes", String::new());
        note.area_id = Some("area-1".to_string());
        note.project_id = Some("proj-2".to_string());
        document.notes.insert(note.id.clone(), note);
        let mut resource = Resource::new("res-4".to_string(), "Plan", ResourceKind::Link);
        resource.area_id = Some("area-1".to_string());
        document.resources.insert(resource.id.clone(), resource);

        link_project_to_area(&mut document, "proj-2", "area-1");
        link_resource_to_project(&mut document, "res-4", "proj-2");
        document
    }

    #[test]
    fn delete_area_clears_all_back_references_and_keeps_children() {
        let mut document = fixture();
        document.archive.insert(ArchiveKind::Area, "area-1");

        let changes = delete_area(&mut document, "area-1");

        assert!(document.areas.is_empty());
        assert_eq!(document.projects["proj-2"].area_id, None);
        assert_eq!(document.notes["note-3"].area_id, None);
        assert_eq!(document.resources["res-4"].area_id, None);
        assert!(document.archive.area_ids.is_empty());
        assert!(changes.contains(&Change::Deleted(EntityRef::area("area-1"))));
        assert!(changes.contains(&Change::Unarchived(EntityRef::area("area-1"))));
    }

    #[test]
    fn delete_area_clears_stray_back_reference_not_in_forward_list() {
        let mut document = fixture();
        let mut stray = Project::new("proj-9".to_string(), "Stray", String::new());
        stray.area_id = Some("area-1".to_string());
        document.projects.insert(stray.id.clone(), stray);

        delete_area(&mut document, "area-1");
        assert_eq!(document.projects["proj-9"].area_id, None);
    }

    #[test]
    fn delete_project_scrubs_every_reference() {
        let mut document = fixture();
        document.archive.insert(ArchiveKind::Project, "proj-2");

        delete_project(&mut document, "proj-2");

        assert!(document.projects.is_empty());
        assert!(document.areas["area-1"].project_ids.is_empty());
        assert_eq!(document.notes["note-3"].project_id, None);
        assert!(document.resources["res-4"].project_ids.is_empty());
        assert!(document.archive.project_ids.is_empty());
    }

    #[test]
    fn delete_resource_detaches_from_projects() {
        let mut document = fixture();
        delete_resource(&mut document, "res-4");
        assert!(document.resources.is_empty());
        assert!(document.projects["proj-2"].resource_ids.is_empty());
    }

    #[test]
    fn deletes_of_missing_ids_are_noops() {
        let mut document = fixture();
        let before = document.clone();
        assert!(delete_area(&mut document, "area-404").is_empty());
        assert!(delete_project(&mut document, "proj-404").is_empty());
        assert!(delete_resource(&mut document, "res-404").is_empty());
        assert!(delete_note(&mut document, "note-404").is_empty());
        assert_eq!(document, before);
    }
}
