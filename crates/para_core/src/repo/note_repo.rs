//! Note repository contract.

use super::{
    edit_entity, set_field, updated_if, DocumentRepository, EntityListQuery, RepoResult,
};
use crate::id::{EntityId, IdGenerator};
use crate::link::{self, ChangeSet};
use crate::model::note::{NewNote, Note};
use crate::model::{EntityKind, EntityRef};
use crate::storage::SlotStore;
use crate::text::normalize_tags;

/// Note CRUD and link operations.
pub trait NoteRepository {
    /// Creates a note, linking the given area/project when they exist.
    fn add_note(&self, title: &str, fields: NewNote) -> RepoResult<EntityId>;
    fn get_note(&self, id: &str) -> Option<Note>;
    /// Lists notes ordered by id. `include_archived` has no effect.
    fn list_notes(&self, query: &EntityListQuery) -> Vec<Note>;
    fn rename_note(&self, id: &str, title: &str) -> RepoResult<ChangeSet>;
    fn set_note_content(&self, id: &str, content: &str) -> RepoResult<ChangeSet>;
    /// Sets title and content in one write.
    fn update_note(&self, id: &str, title: &str, content: &str) -> RepoResult<ChangeSet>;
    /// Replaces the whole tag set after normalization.
    fn set_note_tags(&self, id: &str, tags: &[String]) -> RepoResult<ChangeSet>;
    fn link_note_to_area(&self, note_id: &str, area_id: &str) -> RepoResult<ChangeSet>;
    fn unlink_note_from_area(&self, note_id: &str, area_id: &str) -> RepoResult<ChangeSet>;
    fn link_note_to_project(&self, note_id: &str, project_id: &str) -> RepoResult<ChangeSet>;
    fn unlink_note_from_project(&self, note_id: &str, project_id: &str)
        -> RepoResult<ChangeSet>;
    /// Deletes the note. Nothing else references notes.
    fn remove_note(&self, id: &str) -> RepoResult<ChangeSet>;
}

impl<S: SlotStore, G: IdGenerator> NoteRepository for DocumentRepository<S, G> {
    fn add_note(&self, title: &str, fields: NewNote) -> RepoResult<EntityId> {
        self.create("note_create", EntityKind::Note, |document, id| {
            let NewNote {
                content,
                area_id,
                project_id,
                tags,
            } = fields;
            let mut note = Note::new(id.clone(), title, content);
            note.tags = normalize_tags(&tags);
            document.notes.insert(id.clone(), note);

            let mut changes = ChangeSet::new();
            if let Some(area_id) = area_id.as_deref() {
                changes.merge(link::link_note_to_area(document, id, area_id));
            }
            if let Some(project_id) = project_id.as_deref() {
                changes.merge(link::link_note_to_project(document, id, project_id));
            }
            changes
        })
    }

    fn get_note(&self, id: &str) -> Option<Note> {
        self.store().load().notes.remove(id)
    }

    fn list_notes(&self, query: &EntityListQuery) -> Vec<Note> {
        self.store()
            .load()
            .notes
            .into_values()
            .filter(|note| query.matches_area(note.area_id.as_deref()))
            .collect()
    }

    fn rename_note(&self, id: &str, title: &str) -> RepoResult<ChangeSet> {
        self.apply("note_rename", id, |document| {
            let changed = edit_entity(&mut document.notes, id, |note| {
                set_field(&mut note.title, title.to_string())
            });
            Ok(updated_if(changed, EntityRef::note(id)))
        })
    }

    fn set_note_content(&self, id: &str, content: &str) -> RepoResult<ChangeSet> {
        self.apply("note_content", id, |document| {
            let changed = edit_entity(&mut document.notes, id, |note| {
                set_field(&mut note.content, content.to_string())
            });
            Ok(updated_if(changed, EntityRef::note(id)))
        })
    }

    fn update_note(&self, id: &str, title: &str, content: &str) -> RepoResult<ChangeSet> {
        self.apply("note_update", id, |document| {
            let changed = edit_entity(&mut document.notes, id, |note| {
                let title_changed = set_field(&mut note.title, title.to_string());
                let content_changed = set_field(&mut note.content, content.to_string());
                title_changed || content_changed
            });
            Ok(updated_if(changed, EntityRef::note(id)))
        })
    }

    fn set_note_tags(&self, id: &str, tags: &[String]) -> RepoResult<ChangeSet> {
        let normalized = normalize_tags(tags);
        self.apply("note_tags", id, |document| {
            let changed = edit_entity(&mut document.notes, id, |note| {
                set_field(&mut note.tags, normalized)
            });
            Ok(updated_if(changed, EntityRef::note(id)))
        })
    }

    fn link_note_to_area(&self, note_id: &str, area_id: &str) -> RepoResult<ChangeSet> {
        self.apply("note_link_area", note_id, |document| {
            Ok(link::link_note_to_area(document, note_id, area_id))
        })
    }

    fn unlink_note_from_area(&self, note_id: &str, area_id: &str) -> RepoResult<ChangeSet> {
        self.apply("note_unlink_area", note_id, |document| {
            Ok(link::unlink_note_from_area(document, note_id, area_id))
        })
    }

    fn link_note_to_project(&self, note_id: &str, project_id: &str) -> RepoResult<ChangeSet> {
        self.apply("note_link_project", note_id, |document| {
            Ok(link::link_note_to_project(document, note_id, project_id))
        })
    }

    fn unlink_note_from_project(
        &self,
        note_id: &str,
        project_id: &str,
    ) -> RepoResult<ChangeSet> {
        self.apply("note_unlink_project", note_id, |document| {
            Ok(link::unlink_note_from_project(document, note_id, project_id))
        })
    }

    fn remove_note(&self, id: &str) -> RepoResult<ChangeSet> {
        self.apply("note_delete", id, |document| Ok(link::delete_note(document, id)))
    }
}
