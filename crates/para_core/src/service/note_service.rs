//! Note editor use-cases.
//!
//! # Invariants
//! - A blank edited title keeps the previous title.
//! - Tag input is parsed and normalized before replacement.

use crate::id::EntityId;
use crate::link::ChangeSet;
use crate::repo::{NoteRepository, RepoError};
use crate::text::{normalize_title, parse_tag_list};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(EntityId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Replaces title and content in one write.
    pub fn edit_note(
        &self,
        note_id: &str,
        title: &str,
        content: &str,
    ) -> Result<ChangeSet, NoteServiceError> {
        let current = self
            .repo
            .get_note(note_id)
            .ok_or_else(|| NoteServiceError::NoteNotFound(note_id.to_string()))?;
        let title = normalize_title(title).unwrap_or(current.title);
        Ok(self.repo.update_note(note_id, &title, content)?)
    }

    /// Replaces the tag set from free-form input such as `"work, #home"`.
    pub fn set_tags_from_input(
        &self,
        note_id: &str,
        raw: &str,
    ) -> Result<ChangeSet, NoteServiceError> {
        if self.repo.get_note(note_id).is_none() {
            return Err(NoteServiceError::NoteNotFound(note_id.to_string()));
        }
        let tags = parse_tag_list(raw).into_iter().collect::<Vec<_>>();
        Ok(self.repo.set_note_tags(note_id, &tags)?)
    }

    pub fn delete_note(&self, note_id: &str) -> Result<ChangeSet, NoteServiceError> {
        Ok(self.repo.remove_note(note_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteService, NoteServiceError};
    use crate::id::SequenceIdGenerator;
    use crate::model::note::NewNote;
    use crate::repo::{DocumentRepository, NoteRepository};
    use crate::storage::MemorySlotStore;

    fn service() -> NoteService<DocumentRepository<MemorySlotStore, SequenceIdGenerator>> {
        NoteService::new(DocumentRepository::with_slots(
            MemorySlotStore::new(),
            SequenceIdGenerator::new(),
        ))
    }

    #[test]
    fn blank_title_keeps_previous_title() {
        let service = service();
        let repo = service.repository();
        let note_id = repo.add_note("Draft", NewNote::default()).unwrap();

        let changes = service.edit_note(&note_id, "   ", "body").unwrap();
        assert_eq!(changes.len(), 1);

        let note = repo.get_note(&note_id).unwrap();
        assert_eq!(note.title, "Draft");
        assert_eq!(note.content, "body");
    }

    #[test]
    fn tag_input_replaces_whole_set() {
        let service = service();
        let note_id = service
            .repository()
            .add_note("Draft", NewNote::default())
            .unwrap();

        service.set_tags_from_input(&note_id, "Work, #urgent").unwrap();
        service.set_tags_from_input(&note_id, "home").unwrap();
        let tags = service.repository().get_note(&note_id).unwrap().tags;
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["home".to_string()]);
    }

    #[test]
    fn editing_missing_note_is_reported() {
        let service = service();
        let err = service.edit_note("note-404", "x", "y").unwrap_err();
        assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
    }
}
