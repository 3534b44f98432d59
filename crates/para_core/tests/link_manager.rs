use para_core::link::{
    delete_project, delete_resource, link_note_to_project, link_project_to_area,
    link_resource_to_area, unlink_note_from_project, unlink_resource_from_area,
};
use para_core::{
    ArchiveKind, ArchiveRepository, AreaRepository, Change, Document, DocumentRepository,
    EntityRef, MemorySlotStore, NewArea, NewNote, NewProject, NewResource, Note,
    NoteRepository, Project, ProjectRepository, Resource, ResourceKind, ResourceRepository,
    SequenceIdGenerator,
};

fn document() -> Document {
    let mut document = Document::default();
    for id in ["area-1", "area-2"] {
        document.areas.insert(
            id.to_string(),
            para_core::Area::new(id.to_string(), id, NewArea::default()),
        );
    }
    document.projects.insert(
        "proj-1".to_string(),
        Project::new("proj-1".to_string(), "Run 5k", String::new()),
    );
    document.notes.insert(
        "note-1".to_string(),
        Note::new("note-1".to_string(), "Splits", String::new()),
    );
    document.resources.insert(
        "res-1".to_string(),
        Resource::new("res-1".to_string(), "Plan", ResourceKind::Link),
    );
    document
}

#[test]
fn moving_project_between_areas_keeps_single_owner() {
    let mut document = document();
    link_project_to_area(&mut document, "proj-1", "area-1");
    link_project_to_area(&mut document, "proj-1", "area-2");

    assert!(document.areas["area-1"].project_ids.is_empty());
    assert_eq!(document.areas["area-2"].project_ids, vec!["proj-1".to_string()]);
    assert_eq!(document.project_area("proj-1").unwrap().id, "area-2");
}

#[test]
fn note_and_resource_unlinks_are_idempotent() {
    let mut document = document();
    link_note_to_project(&mut document, "note-1", "proj-1");
    link_resource_to_area(&mut document, "res-1", "area-1");

    assert_eq!(unlink_note_from_project(&mut document, "note-1", "proj-1").len(), 1);
    assert_eq!(unlink_resource_from_area(&mut document, "res-1", "area-1").len(), 1);
    let once = document.clone();

    assert!(unlink_note_from_project(&mut document, "note-1", "proj-1").is_empty());
    assert!(unlink_resource_from_area(&mut document, "res-1", "area-1").is_empty());
    assert_eq!(document, once);
}

#[test]
fn unlink_from_other_parent_keeps_back_reference() {
    let mut document = document();
    link_resource_to_area(&mut document, "res-1", "area-1");

    assert!(unlink_resource_from_area(&mut document, "res-1", "area-2").is_empty());
    assert_eq!(document.resources["res-1"].area_id.as_deref(), Some("area-1"));
}

#[test]
fn deleting_project_scrubs_every_reference() {
    let mut document = document();
    link_project_to_area(&mut document, "proj-1", "area-1");
    link_note_to_project(&mut document, "note-1", "proj-1");
    para_core::link::link_resource_to_project(&mut document, "res-1", "proj-1");
    document.archive.insert(ArchiveKind::Project, "proj-1");

    let changes = delete_project(&mut document, "proj-1");

    assert!(changes.contains(&Change::Deleted(EntityRef::project("proj-1"))));
    assert!(!document.projects.contains_key("proj-1"));
    assert!(document.areas["area-1"].project_ids.is_empty());
    assert!(document.notes["note-1"].project_id.is_none());
    assert!(document.resources["res-1"].project_ids.is_empty());
    assert!(document.archive.project_ids.is_empty());
    assert!(delete_project(&mut document, "proj-1").is_empty());
}

#[test]
fn deleting_resource_scrubs_project_lists_and_archive() {
    let mut document = document();
    para_core::link::link_resource_to_project(&mut document, "res-1", "proj-1");
    document.archive.insert(ArchiveKind::Resource, "res-1");

    delete_resource(&mut document, "res-1");

    assert!(!document.resources.contains_key("res-1"));
    assert!(document.projects["proj-1"].resource_ids.is_empty());
    assert!(document.archive.resource_ids.is_empty());
}

#[test]
fn repository_delete_cascades_are_persisted() {
    let repo = DocumentRepository::with_slots(MemorySlotStore::new(), SequenceIdGenerator::new());
    let area_id = repo.add_area("Health", NewArea::default()).unwrap();
    let project_id = repo.add_project("Run 5k", NewProject::in_area(&area_id)).unwrap();
    let resource_id = repo
        .add_resource(
            "Plan",
            NewResource {
                project_ids: vec![project_id.clone()],
                ..NewResource::default()
            },
        )
        .unwrap();
    let note_id = repo
        .add_note(
            "Splits",
            NewNote {
                project_id: Some(project_id.clone()),
                ..NewNote::default()
            },
        )
        .unwrap();
    repo.archive(ArchiveKind::Project, &project_id).unwrap();
    assert_eq!(
        repo.get_project(&project_id).unwrap().resource_ids,
        vec![resource_id.clone()]
    );

    repo.remove_project(&project_id).unwrap();

    assert!(repo.get_area(&area_id).unwrap().project_ids.is_empty());
    assert!(repo.get_resource(&resource_id).unwrap().project_ids.is_empty());
    assert!(repo.get_note(&note_id).unwrap().project_id.is_none());
    assert!(repo.archived_ids(ArchiveKind::Project).is_empty());
}
