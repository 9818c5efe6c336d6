use pmdash_shared::{
  CriticalPath,
  ModelInfo,
  NoteDto,
  RetrainResult,
  TaskDto
};
use tracing::{
  debug,
  error
};

use crate::error::{
  Failure,
  Surface
};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME_MS: u32 = 3000;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ToastKind {
  Info,
  Success,
  Error
}

impl ToastKind {
  pub fn icon(self) -> &'static str {
    match self {
      | ToastKind::Success => {
        "check-circle"
      }
      | ToastKind::Error => {
        "exclamation-circle"
      }
      | ToastKind::Info => "info-circle"
    }
  }

  pub fn as_class(self) -> &'static str {
    match self {
      | ToastKind::Info => "info",
      | ToastKind::Success => "success",
      | ToastKind::Error => "error"
    }
  }
}

/// A message waiting to become a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub message: String,
  pub kind:    ToastKind
}

impl Notice {
  pub fn info(
    message: impl Into<String>
  ) -> Self {
    Self {
      message: message.into(),
      kind:    ToastKind::Info
    }
  }

  pub fn success(
    message: impl Into<String>
  ) -> Self {
    Self {
      message: message.into(),
      kind:    ToastKind::Success
    }
  }

  pub fn error(
    message: impl Into<String>
  ) -> Self {
    Self {
      message: message.into(),
      kind:    ToastKind::Error
    }
  }
}

impl Failure {
  /// Logs the failure and returns the
  /// toast to show, if its surface calls
  /// for one.
  pub fn notice(&self) -> Option<Notice> {
    error!(
      message = %self.message,
      cause = %self.cause,
      "operation failed"
    );
    match self.surface {
      | Surface::Toast => {
        Some(Notice::error(
          self.message.clone()
        ))
      }
      | Surface::LogOnly => None
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
  pub id:      u64,
  pub message: String,
  pub kind:    ToastKind
}

/// Toasts currently on screen, oldest
/// first. No cap and no queue: every push
/// is visible at once and owns its own
/// timer.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ToastStack {
  next_id: u64,
  toasts:  Vec<Toast>
}

impl ToastStack {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a toast and returns the id the
  /// caller's timer should dismiss after
  /// `TOAST_LIFETIME_MS`.
  pub fn push(
    &mut self,
    notice: Notice
  ) -> u64 {
    self.next_id += 1;
    let id = self.next_id;
    debug!(id, kind = ?notice.kind, message = %notice.message, "toast");
    self.toasts.push(Toast {
      id,
      message: notice.message,
      kind: notice.kind
    });
    id
  }

  pub fn dismiss(&mut self, id: u64) {
    self.toasts.retain(|t| t.id != id);
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &Toast> {
    self.toasts.iter()
  }

  pub fn len(&self) -> usize {
    self.toasts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.toasts.is_empty()
  }
}

/// The single modal slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSlot<M> {
  current: Option<M>
}

impl<M> Default for ModalSlot<M> {
  fn default() -> Self {
    Self {
      current: None
    }
  }
}

impl<M> ModalSlot<M> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Shows `content`, replacing whatever
  /// was open; the replaced modal is
  /// returned.
  pub fn show(
    &mut self,
    content: M
  ) -> Option<M> {
    self.current.replace(content)
  }

  pub fn close(&mut self) -> Option<M> {
    self.current.take()
  }

  pub fn current(&self) -> Option<&M> {
    self.current.as_ref()
  }

  pub fn is_open(&self) -> bool {
    self.current.is_some()
  }
}

/// Everything the dashboard ever shows in
/// its modal slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
  ProjectDetails(
    Box<crate::views::projects::ProjectDetails>
  ),
  TaskDetails(TaskDto),
  AddTask,
  AddNote,
  EditNote(NoteDto),
  CriticalPath(CriticalPath),
  Settings,
  TrainingResults(RetrainResult),
  ModelInfo(ModelInfo),
  ShareInsights(String),
  ReportPreview(String),
  ScheduleReport
}

impl Modal {
  /// Header text of the modal frame.
  pub fn title(&self) -> &'static str {
    match self {
      | Modal::ProjectDetails(_) => {
        "Project Details"
      }
      | Modal::TaskDetails(_) => {
        "Task Details"
      }
      | Modal::AddTask => "Add New Task",
      | Modal::AddNote => "Add New Note",
      | Modal::EditNote(_) => "Edit Note",
      | Modal::CriticalPath(_) => {
        "Critical Path"
      }
      | Modal::Settings => "Settings",
      | Modal::TrainingResults(_) => {
        "Training Results"
      }
      | Modal::ModelInfo(_) => {
        "Model Information"
      }
      | Modal::ShareInsights(_) => {
        "Share Insights"
      }
      | Modal::ReportPreview(_) => {
        "Report Preview"
      }
      | Modal::ScheduleReport => {
        "Schedule Report"
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::InputError;

  #[test]
  fn second_modal_replaces_first() {
    let mut slot = ModalSlot::new();
    assert!(slot.show(Modal::AddTask).is_none());
    let replaced = slot.show(Modal::Settings);
    assert_eq!(replaced, Some(Modal::AddTask));
    assert_eq!(
      slot.current(),
      Some(&Modal::Settings)
    );
    slot.close();
    assert!(!slot.is_open());
  }

  #[test]
  fn toasts_stack_and_dismiss_independently(
  ) {
    let mut stack = ToastStack::new();
    let first =
      stack.push(Notice::info("one"));
    let second =
      stack.push(Notice::success("two"));
    assert_ne!(first, second);
    assert_eq!(stack.len(), 2);

    stack.dismiss(first);
    let left: Vec<_> = stack
      .iter()
      .map(|t| t.message.as_str())
      .collect();
    assert_eq!(left, vec!["two"]);
  }

  #[test]
  fn icons_follow_kind() {
    assert_eq!(
      ToastKind::Success.icon(),
      "check-circle"
    );
    assert_eq!(
      ToastKind::Error.icon(),
      "exclamation-circle"
    );
    assert_eq!(
      ToastKind::Info.icon(),
      "info-circle"
    );
  }

  #[test]
  fn log_only_failures_produce_no_toast() {
    let quiet = Failure::log_only(
      "Failed to load dashboard",
      InputError::Missing("x")
    );
    assert_eq!(quiet.notice(), None);

    let loud = Failure::toast(
      "Failed to load tasks",
      InputError::Missing("x")
    );
    assert_eq!(
      loud.notice(),
      Some(Notice::error(
        "Failed to load tasks"
      ))
    );
  }
}
