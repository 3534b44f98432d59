use para_core::db::{open_db, open_db_in_memory};
use para_core::{
    AreaRepository, Document, DocumentRepository, DocumentStore, MemorySlotStore, NewProject,
    NewResource, ProjectRepository, ProjectStatus, ResourceKind, ResourceRepository,
    SequenceIdGenerator, SlotStore, SqliteSlotStore, DEFAULT_SLOT_KEY,
};
use serde_json::{json, Value};

#[test]
fn corrupt_slot_loads_as_empty_document() {
    for raw in ["{not json", "", "[]", "42", "null"] {
        let store = DocumentStore::new(MemorySlotStore::with_slot(DEFAULT_SLOT_KEY, raw));
        assert_eq!(store.load(), Document::default(), "input `{raw}`");
    }
}

#[test]
fn save_of_loaded_document_keeps_bytes_stable() {
    let repo = DocumentRepository::with_slots(MemorySlotStore::new(), SequenceIdGenerator::new());
    let area_id = repo.add_area("Health", Default::default()).unwrap();
    repo.add_project(
        "Run 5k",
        NewProject {
            area_id: Some(area_id),
            tasks: vec![json!({"title": "buy shoes", "done": false, "meta": {"z": 1, "a": 2}})],
            ..NewProject::default()
        },
    )
    .unwrap();
    repo.add_resource(
        "Plan",
        NewResource {
            tags: vec!["b".to_string(), "a".to_string()],
            ..NewResource::default()
        },
    )
    .unwrap();

    let store = repo.store();
    let before = store.slots().raw(DEFAULT_SLOT_KEY).unwrap();
    store.save(&store.load()).unwrap();
    let after = store.slots().raw(DEFAULT_SLOT_KEY).unwrap();
    assert_eq!(before, after);
}

#[test]
fn persisted_layout_matches_organizer_schema() {
    let repo = DocumentRepository::with_slots(MemorySlotStore::new(), SequenceIdGenerator::new());
    let area_id = repo
        .add_area(
            "Health",
            para_core::NewArea {
                description: "body".to_string(),
            },
        )
        .unwrap();
    let project_id = repo.add_project("Run 5k", NewProject::in_area(&area_id)).unwrap();

    let raw = repo.store().slots().raw(DEFAULT_SLOT_KEY).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["areas"][&area_id]["desc"], "body");
    assert_eq!(value["areas"][&area_id]["projectIds"], json!([project_id.clone()]));
    assert_eq!(value["projects"][&project_id]["areaId"], json!(area_id));
    assert_eq!(value["projects"][&project_id]["status"], "active");
    assert_eq!(value["projects"][&project_id]["resourceIds"], json!([]));
    assert_eq!(value["resources"], json!({}));
    assert_eq!(value["notes"], json!({}));
    assert_eq!(
        value["archive"],
        json!({"projectIds": [], "resourceIds": [], "areaIds": []})
    );
}

#[test]
fn camel_case_documents_with_short_field_names_load() {
    let raw = json!({
        "areas": {"area-1-1": {"id": "area-1-1", "title": "Casa", "desc": "", "projectIds": ["proj-1-2"]}},
        "projects": {"proj-1-2": {"id": "proj-1-2", "title": "Pintar", "desc": "", "areaId": "area-1-1",
            "tasks": [], "resourceIds": [], "status": "archived"}},
        "resources": {"res-1-3": {"id": "res-1-3", "title": "Tinta", "type": "file", "url": "",
            "notes": "", "tags": ["x", "x"], "areaId": null, "projectIds": []}},
        "notes": {"note-1-4": {"id": "note-1-4", "title": "Cores", "content": "azul",
            "areaId": "area-1-1", "projectId": null, "tags": []}},
        "archive": {"projectIds": [], "resourceIds": [], "areaIds": ["area-1-1"]}
    })
    .to_string();

    let store = DocumentStore::new(MemorySlotStore::with_slot(DEFAULT_SLOT_KEY, raw));
    let document = store.load();

    assert_eq!(document.areas["area-1-1"].project_ids, vec!["proj-1-2".to_string()]);
    assert_eq!(document.projects["proj-1-2"].status, ProjectStatus::Archived);
    assert_eq!(document.resources["res-1-3"].kind, ResourceKind::File);
    assert_eq!(document.resources["res-1-3"].tags.len(), 1);
    assert_eq!(document.notes["note-1-4"].area_id.as_deref(), Some("area-1-1"));
    assert_eq!(document.archive.area_ids, vec!["area-1-1".to_string()]);
}

#[test]
fn partial_document_fills_missing_sections_with_defaults() {
    let raw = r#"{"areas":{"area-1":{"id":"area-1","title":"Only"}}}"#;
    let store = DocumentStore::new(MemorySlotStore::with_slot(DEFAULT_SLOT_KEY, raw));
    let document = store.load();

    assert_eq!(document.areas["area-1"].title, "Only");
    assert!(document.areas["area-1"].project_ids.is_empty());
    assert!(document.projects.is_empty());
    assert!(document.archive.is_empty());
}

#[test]
fn sqlite_slot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("para.db");

    let area_id = {
        let conn = open_db(&path).unwrap();
        let slots = SqliteSlotStore::try_new(&conn).unwrap();
        let repo = DocumentRepository::with_slots(slots, SequenceIdGenerator::new());
        repo.add_area("Health", Default::default()).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let slots = SqliteSlotStore::try_new(&conn).unwrap();
    let repo = DocumentRepository::with_slots(slots, SequenceIdGenerator::starting_after(100));
    assert_eq!(repo.get_area(&area_id).unwrap().title, "Health");
}

#[test]
fn corrupt_sqlite_slot_recovers_on_next_write() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::try_new(&conn).unwrap();
    slots.write_slot(DEFAULT_SLOT_KEY, "{{{{").unwrap();

    let repo = DocumentRepository::with_slots(slots, SequenceIdGenerator::new());
    assert!(repo.list_areas(true).is_empty());

    let area_id = repo.add_area("Fresh", Default::default()).unwrap();
    let areas = repo.list_areas(true);
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].id, area_id);
}

#[test]
fn unreadable_sqlite_slot_fails_mutation_and_keeps_rows() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::try_new(&conn).unwrap();
    let repo = DocumentRepository::with_slots(slots, SequenceIdGenerator::new());
    repo.add_area("Health", Default::default()).unwrap();
    repo.add_area("Home", Default::default()).unwrap();

    conn.execute_batch("ALTER TABLE slots RENAME TO slots_offline;")
        .unwrap();
    assert!(repo.add_area("Hobby", Default::default()).is_err());
    assert!(repo.list_areas(true).is_empty());
    conn.execute_batch("ALTER TABLE slots_offline RENAME TO slots;")
        .unwrap();

    let titles = repo
        .list_areas(true)
        .into_iter()
        .map(|area| area.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Health".to_string(), "Home".to_string()]);
}

#[test]
fn first_save_of_hand_written_document_normalizes_then_stays_stable() {
    // Key and tag order as a browser session wrote them.
    let raw = concat!(
        r#"{"areas":{},"projects":{"proj-9":{"id":"proj-9","title":"Garden","desc":"","#,
        r#""areaId":null,"tasks":[{"title":"dig","done":false,"due":{"year":2024,"month":5}}],"#,
        r#""resourceIds":[],"status":"active"}},"resources":{"res-2":{"id":"res-2","#,
        r#""title":"Seeds","type":"link","url":"","notes":"","tags":["zinnia","basil","Basil"],"#,
        r#""areaId":null,"projectIds":[]}},"notes":{},"#,
        r#""archive":{"projectIds":[],"resourceIds":[],"areaIds":[]}}"#
    );
    let store = DocumentStore::new(MemorySlotStore::with_slot(DEFAULT_SLOT_KEY, raw));

    // The first save rewrites the layout: tags come back sorted.
    store.save(&store.load()).unwrap();
    let first = store.slots().raw(DEFAULT_SLOT_KEY).unwrap();
    assert_ne!(first, raw);
    assert!(first.contains(r#""tags":["Basil","basil","zinnia"]"#));
    let reparsed: Value = serde_json::from_str(&first).unwrap();
    assert_eq!(
        reparsed["projects"]["proj-9"]["tasks"],
        json!([{"title": "dig", "done": false, "due": {"year": 2024, "month": 5}}])
    );

    // From then on the bytes are stable.
    store.save(&store.load()).unwrap();
    assert_eq!(store.slots().raw(DEFAULT_SLOT_KEY).unwrap(), first);
}
