use pmdash_shared::{
  NoteCreate,
  NoteDto,
  NoteUpdate
};
use tracing::info;

use crate::api::{
  ApiClient,
  HttpBackend
};
use crate::error::{
  Failure,
  FailureExt,
  InputError
};
use crate::format::format_date;
use crate::presenter::Notice;

pub const SELECT_PROJECT: &str =
  "Select a project to view notes";
pub const NO_NOTES: &str =
  "No notes found for this project";
pub const ADD_FIRST: &str = "Add First Note";
pub const DELETE_PROMPT: &str =
  "Are you sure you want to delete this note?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
  pub id:      i64,
  pub title:   String,
  pub content: String,
  pub tags:    Vec<String>,
  pub byline:  String
}

impl From<&NoteDto> for NoteCard {
  fn from(note: &NoteDto) -> Self {
    Self {
      id:      note.id,
      title:   note.title.clone(),
      content: note
        .content
        .clone()
        .unwrap_or_default(),
      tags:    split_tags(
        note.tags.as_deref().unwrap_or("")
      ),
      byline:  format!(
        "Created by {} on {}",
        note
          .created_by
          .as_deref()
          .filter(|a| !a.is_empty())
          .unwrap_or("Unknown"),
        format_date(
          note.created_date.as_deref()
        )
      )
    }
  }
}

pub fn split_tags(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_string)
    .collect()
}

/// What the notes panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesView {
  /// No project chosen yet; the panel
  /// offers a project selector.
  Placeholder,
  /// The project has no notes; the panel
  /// offers to add the first one.
  Empty,
  Notes(Vec<NoteCard>)
}

impl NotesView {
  pub fn from_notes(notes: &[NoteDto]) -> Self {
    if notes.is_empty() {
      NotesView::Empty
    } else {
      NotesView::Notes(
        notes.iter().map(NoteCard::from).collect()
      )
    }
  }
}

/// No request is made until a project is
/// chosen.
pub async fn load<B: HttpBackend>(
  client: &ApiClient<B>,
  project: Option<&str>
) -> Result<NotesView, Failure> {
  let Some(project) =
    project.filter(|p| !p.trim().is_empty())
  else {
    return Ok(NotesView::Placeholder);
  };
  let notes = client
    .notes(project)
    .await
    .or_toast("Failed to load notes")?;
  Ok(NotesView::from_notes(&notes))
}

/// Adding a note needs a current project.
pub fn require_project(
  project: Option<&str>
) -> Result<&str, InputError> {
  project
    .filter(|p| !p.trim().is_empty())
    .ok_or(InputError::Missing(
      "Please select a project first"
    ))
}

/// The add-note form.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct NoteDraft {
  pub title:      String,
  pub content:    String,
  pub tags:       String,
  pub created_by: String
}

impl NoteDraft {
  pub fn validate(
    &self,
    project: Option<&str>
  ) -> Result<NoteCreate, InputError> {
    let project = require_project(project)?;
    if self.title.trim().is_empty() {
      return Err(InputError::Missing(
        "Please enter a title"
      ));
    }
    Ok(NoteCreate {
      project_number: project.to_string(),
      title:          self.title.clone(),
      content:        self.content.clone(),
      tags:           self.tags.clone(),
      created_by:     self.created_by.clone()
    })
  }
}

pub async fn create<B: HttpBackend>(
  client: &ApiClient<B>,
  project: Option<&str>,
  draft: &NoteDraft
) -> Result<Notice, Failure> {
  let note = draft.validate(project)?;
  client
    .create_note(&note)
    .await
    .or_toast("Failed to save note")?;
  info!(project = %note.project_number, "note saved");
  Ok(Notice::success(
    "Note saved successfully"
  ))
}

/// Re-reads the project's notes and picks
/// the one being edited.
pub async fn edit_target<B: HttpBackend>(
  client: &ApiClient<B>,
  project: &str,
  id: i64
) -> Result<NoteDto, Failure> {
  let notes = client
    .notes(project)
    .await
    .or_toast("Failed to load note")?;
  notes
    .into_iter()
    .find(|n| n.id == id)
    .ok_or(InputError::NotFound(
      "Note not found"
    ))
    .map_err(Failure::from)
}

/// Edit form prefilled from the stored
/// note.
pub fn edit_form(note: &NoteDto) -> NoteUpdate {
  NoteUpdate {
    title:   note.title.clone(),
    content: note
      .content
      .clone()
      .unwrap_or_default(),
    tags:    note.tags.clone().unwrap_or_default()
  }
}

pub async fn update<B: HttpBackend>(
  client: &ApiClient<B>,
  id: i64,
  edit: &NoteUpdate
) -> Result<Notice, Failure> {
  client
    .update_note(id, edit)
    .await
    .or_toast("Failed to update note")?;
  info!(id, "note updated");
  Ok(Notice::success(
    "Note updated successfully"
  ))
}

/// `Ok(None)` when the user declines the
/// confirmation.
pub async fn delete<B, C>(
  client: &ApiClient<B>,
  id: i64,
  confirm: C
) -> Result<Option<Notice>, Failure>
where
  B: HttpBackend,
  C: FnOnce(&str) -> bool
{
  if !confirm(DELETE_PROMPT) {
    return Ok(None);
  }
  client
    .delete_note(id)
    .await
    .or_toast("Failed to delete note")?;
  info!(id, "note deleted");
  Ok(Some(Notice::success(
    "Note deleted successfully"
  )))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn card_splits_tags_and_credits_author() {
    let note: NoteDto =
      serde_json::from_value(json!({
        "id": 9,
        "project_number": "P-1",
        "title": "Kickoff",
        "content": "Agenda",
        "tags": "site, permits ,, fiber",
        "created_date": "2024-02-10"
      }))
      .expect("fixture");
    let card = NoteCard::from(&note);
    assert_eq!(
      card.tags,
      vec!["site", "permits", "fiber"]
    );
    assert_eq!(
      card.byline,
      "Created by Unknown on Feb 10, 2024"
    );
  }

  #[test]
  fn draft_needs_project_then_title() {
    let draft = NoteDraft::default();
    assert_eq!(
      draft.validate(None),
      Err(InputError::Missing(
        "Please select a project first"
      ))
    );
    assert_eq!(
      draft.validate(Some("P-1")),
      Err(InputError::Missing(
        "Please enter a title"
      ))
    );
    let ok = NoteDraft {
      title: "Risks".to_string(),
      ..NoteDraft::default()
    }
    .validate(Some("P-1"))
    .expect("valid draft");
    assert_eq!(ok.project_number, "P-1");
  }

  #[test]
  fn empty_project_shows_add_first() {
    assert_eq!(
      NotesView::from_notes(&[]),
      NotesView::Empty
    );
  }
}
