//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose area-panel and note-editor use-cases to Dart via FRB.
//! - Translate core change sets into flat envelopes the UI can re-render
//!   from.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every document cycle (open → load → mutate → save) runs under one
//!   process-wide lock, so concurrent callers never lose each other's writes.
//! - Titles and text are returned raw; callers escape with `escape_html`.

use log::error;
use para_core::db::open_db;
use para_core::{
    core_version as core_version_inner, escape_html as escape_html_inner,
    init_logging as init_logging_inner, ping as ping_inner, AreaDetail, AreaService, Change,
    ChangeSet, DocumentRepository, EntityId, NoteService, OrganizerRepository, ResourceKind,
    SessionIdGenerator, SqliteSlotStore,
};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

const DB_FILE_NAME: &str = "para_organizer.sqlite3";
const DB_PATH_ENV: &str = "PARA_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static ID_GENERATOR: SessionIdGenerator = SessionIdGenerator::new();
static DOCUMENT_LOCK: Mutex<()> = Mutex::new(());

type SqliteRepository<'conn> =
    DocumentRepository<SqliteSlotStore<'conn>, &'static SessionIdGenerator>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Escapes user text for interpolation into HTML markup.
#[flutter_rust_bridge::frb(sync)]
pub fn escape_html(value: String) -> String {
    escape_html_inner(&value)
}

/// One entry of a mutation's change list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeItem {
    /// `created|updated|deleted|linked|unlinked|archived|unarchived`.
    pub change: String,
    /// Kind of the affected entity (`area|project|resource|note`).
    pub kind: String,
    pub id: String,
    /// Parent side for `linked`/`unlinked`, empty otherwise.
    pub parent_kind: Option<String>,
    pub parent_id: Option<String>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created (or targeted) entity id.
    pub entity_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Effects to re-render. Empty on failure or no-op.
    pub changes: Vec<ChangeItem>,
}

impl ActionResponse {
    fn created(message: impl Into<String>, entity_id: EntityId) -> Self {
        Self {
            ok: true,
            entity_id: Some(entity_id),
            message: message.into(),
            changes: Vec::new(),
        }
    }

    fn applied(entity_id: &str, changes: ChangeSet) -> Self {
        let message = if changes.is_empty() {
            "No changes.".to_string()
        } else {
            format!("Applied {} change(s).", changes.len())
        };
        Self {
            ok: true,
            entity_id: Some(entity_id.to_string()),
            message,
            changes: changes.iter().map(to_change_item).collect(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entity_id: None,
            message: message.into(),
            changes: Vec::new(),
        }
    }
}

/// Row in one of the area detail lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaChildItem {
    pub id: String,
    pub title: String,
    /// Project status, resource type, or empty for notes.
    pub label: String,
}

/// Read model for the area panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaDetailResponse {
    pub ok: bool,
    pub message: String,
    pub area_id: String,
    pub title: String,
    pub description: String,
    pub archived: bool,
    pub projects: Vec<AreaChildItem>,
    pub notes: Vec<AreaChildItem>,
    pub resources: Vec<AreaChildItem>,
}

impl AreaDetailResponse {
    fn failure(area_id: String, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            area_id,
            title: String::new(),
            description: String::new(),
            archived: false,
            projects: Vec::new(),
            notes: Vec::new(),
            resources: Vec::new(),
        }
    }
}

impl From<AreaDetail> for AreaDetailResponse {
    fn from(detail: AreaDetail) -> Self {
        Self {
            ok: true,
            message: "Area loaded.".to_string(),
            area_id: detail.area.id,
            title: detail.area.title,
            description: detail.area.description,
            archived: detail.archived,
            projects: detail
                .projects
                .into_iter()
                .map(|project| AreaChildItem {
                    label: project.status.label().to_string(),
                    id: project.id,
                    title: project.title,
                })
                .collect(),
            notes: detail
                .notes
                .into_iter()
                .map(|note| AreaChildItem {
                    id: note.id,
                    title: note.title,
                    label: String::new(),
                })
                .collect(),
            resources: detail
                .resources
                .into_iter()
                .map(|resource| AreaChildItem {
                    label: resource.kind.label().to_string(),
                    id: resource.id,
                    title: resource.title,
                })
                .collect(),
        }
    }
}

/// Creates an area.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Blank titles are rejected with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn area_create(title: String, description: String) -> ActionResponse {
    match with_area_service(|service| service.create_area(&title, description)) {
        Ok(area_id) => ActionResponse::created("Area created.", area_id),
        Err(err) => ActionResponse::failure(format!("area_create failed: {err}")),
    }
}

/// Loads one area with its linked projects, notes and resources.
#[flutter_rust_bridge::frb(sync)]
pub fn area_detail(area_id: String) -> AreaDetailResponse {
    match with_area_service(|service| service.area_detail(&area_id)) {
        Ok(detail) => detail.into(),
        Err(err) => AreaDetailResponse::failure(area_id, format!("area_detail failed: {err}")),
    }
}

/// Overwrites an area description. Missing areas yield an empty change list.
#[flutter_rust_bridge::frb(sync)]
pub fn area_update_description(area_id: String, description: String) -> ActionResponse {
    applied(
        "area_update_description",
        &area_id,
        with_area_service(|service| service.update_description(&area_id, &description)),
    )
}

/// Creates a project inside an existing area.
#[flutter_rust_bridge::frb(sync)]
pub fn area_add_project(area_id: String, title: String) -> ActionResponse {
    match with_area_service(|service| service.add_project(&area_id, &title)) {
        Ok(project_id) => ActionResponse::created("Project created.", project_id),
        Err(err) => ActionResponse::failure(format!("area_add_project failed: {err}")),
    }
}

/// Creates a note filed under an existing area.
#[flutter_rust_bridge::frb(sync)]
pub fn area_add_note(area_id: String, title: String) -> ActionResponse {
    match with_area_service(|service| service.add_note(&area_id, &title)) {
        Ok(note_id) => ActionResponse::created("Note created.", note_id),
        Err(err) => ActionResponse::failure(format!("area_add_note failed: {err}")),
    }
}

/// Creates a resource filed under an existing area.
///
/// `kind` is one of `link|note|file` (case-insensitive).
#[flutter_rust_bridge::frb(sync)]
pub fn area_add_resource(area_id: String, title: String, kind: String) -> ActionResponse {
    let Some(kind) = ResourceKind::parse(&kind) else {
        return ActionResponse::failure(format!(
            "area_add_resource failed: unsupported resource type `{}`",
            kind.trim()
        ));
    };
    match with_area_service(|service| service.add_resource(&area_id, &title, kind)) {
        Ok(resource_id) => ActionResponse::created("Resource created.", resource_id),
        Err(err) => ActionResponse::failure(format!("area_add_resource failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn area_unlink_project(area_id: String, project_id: String) -> ActionResponse {
    applied(
        "area_unlink_project",
        &project_id,
        with_area_service(|service| service.unlink_project(&area_id, &project_id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn area_unlink_note(area_id: String, note_id: String) -> ActionResponse {
    applied(
        "area_unlink_note",
        &note_id,
        with_area_service(|service| service.unlink_note(&area_id, &note_id)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn area_unlink_resource(area_id: String, resource_id: String) -> ActionResponse {
    applied(
        "area_unlink_resource",
        &resource_id,
        with_area_service(|service| service.unlink_resource(&area_id, &resource_id)),
    )
}

/// Adds the area to the archive index. Links and fields are untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn area_archive(area_id: String) -> ActionResponse {
    applied(
        "area_archive",
        &area_id,
        with_area_service(|service| service.archive_area(&area_id)),
    )
}

/// Deletes the area; its projects, notes and resources survive unlinked.
#[flutter_rust_bridge::frb(sync)]
pub fn area_delete(area_id: String) -> ActionResponse {
    applied(
        "area_delete",
        &area_id,
        with_area_service(|service| service.delete_area(&area_id)),
    )
}

/// Saves title and content of a note. A blank title keeps the old one.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit(note_id: String, title: String, content: String) -> ActionResponse {
    applied(
        "note_edit",
        &note_id,
        with_note_service(|service| service.edit_note(&note_id, &title, &content)),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> ActionResponse {
    applied(
        "note_delete",
        &note_id,
        with_note_service(|service| service.delete_note(&note_id)),
    )
}

/// Returns the whole persisted document as compact JSON.
///
/// Falls back to `{}` (an empty document) when the database cannot be
/// opened.
#[flutter_rust_bridge::frb(sync)]
pub fn document_snapshot_json() -> String {
    let snapshot = with_repository(|repo| serde_json::to_string(&repo.snapshot()));
    match snapshot {
        Ok(json) => json,
        Err(err) => {
            error!("event=document_snapshot module=ffi status=error error={err}");
            "{}".to_string()
        }
    }
}

fn applied(operation: &str, entity_id: &str, result: Result<ChangeSet, String>) -> ActionResponse {
    match result {
        Ok(changes) => ActionResponse::applied(entity_id, changes),
        Err(err) => ActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_repository<T, E: Display>(
    f: impl FnOnce(SqliteRepository<'_>) -> Result<T, E>,
) -> Result<T, String> {
    let _guard = DOCUMENT_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("organizer DB open failed: {err}"))?;
    let slots = SqliteSlotStore::try_new(&conn)
        .map_err(|err| format!("slot store init failed: {err}"))?;
    let repo = DocumentRepository::with_slots(slots, &ID_GENERATOR);
    f(repo).map_err(|err| err.to_string())
}

fn with_area_service<T, E: Display>(
    f: impl FnOnce(&AreaService<SqliteRepository<'_>>) -> Result<T, E>,
) -> Result<T, String> {
    with_repository(|repo| f(&AreaService::new(repo)))
}

fn with_note_service<T, E: Display>(
    f: impl FnOnce(&NoteService<SqliteRepository<'_>>) -> Result<T, E>,
) -> Result<T, String> {
    with_repository(|repo| f(&NoteService::new(repo)))
}

fn to_change_item(change: &Change) -> ChangeItem {
    let subject = change.subject();
    let parent = match change {
        Change::Linked { parent, .. } | Change::Unlinked { parent, .. } => Some(parent),
        _ => None,
    };
    ChangeItem {
        change: change.label().to_string(),
        kind: subject.kind.label().to_string(),
        id: subject.id.clone(),
        parent_kind: parent.map(|parent| parent.kind.label().to_string()),
        parent_id: parent.map(|parent| parent.id.clone()),
    }
}
