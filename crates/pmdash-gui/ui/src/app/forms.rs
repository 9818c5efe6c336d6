use pmdash_core::Settings;
use pmdash_core::views::notes::NoteDraft;
use pmdash_core::views::tasks::{
  NewTask,
  TaskEdit
};
use pmdash_shared::{
  NoteUpdate,
  TaskFilters
};
use wasm_bindgen::JsCast;
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::Callback;

use super::handle::Ui;

/// Drafts behind every input on screen.
pub struct Forms {
  pub project_search:      String,
  pub project_status:      String,
  pub task_filters:        TaskFilters,
  pub report_type:         String,
  pub report_format:       String,
  pub schedule_type:       String,
  pub schedule_frequency:  String,
  pub schedule_recipients: String,
  pub new_task:            NewTask,
  pub task_edit:           Option<(i64, TaskEdit)>,
  pub note_draft:          NoteDraft,
  pub note_edit:           Option<(i64, NoteUpdate)>,
  pub settings:            Settings
}

impl Default for Forms {
  fn default() -> Self {
    Self {
      project_search:      String::new(),
      project_status:      String::new(),
      task_filters:        TaskFilters::default(),
      report_type:         "project_summary".to_string(),
      report_format:       "PDF".to_string(),
      schedule_type:       "project_summary".to_string(),
      schedule_frequency:  "daily".to_string(),
      schedule_recipients: String::new(),
      new_task:            NewTask::default(),
      task_edit:           None,
      note_draft:          NoteDraft::default(),
      note_edit:           None,
      settings:            Settings::default()
    }
  }
}

/// Value of the input, select or
/// textarea an event came from.
pub fn event_value(event: &Event) -> String {
  let Some(target) = event.target() else {
    return String::new();
  };
  if let Some(input) =
    target.dyn_ref::<HtmlInputElement>()
  {
    return input.value();
  }
  if let Some(select) =
    target.dyn_ref::<HtmlSelectElement>()
  {
    return select.value();
  }
  target
    .dyn_ref::<HtmlTextAreaElement>()
    .map(HtmlTextAreaElement::value)
    .unwrap_or_default()
}

/// Change handler writing the control's
/// value into one draft field.
pub fn bind(
  ui: &Ui,
  write: fn(&mut Forms, String)
) -> Callback<Event> {
  let ui = ui.clone();
  Callback::from(move |event: Event| {
    write(
      &mut ui.shared.forms.borrow_mut(),
      event_value(&event)
    );
  })
}

pub fn bind_checked(
  ui: &Ui,
  write: fn(&mut Forms, bool)
) -> Callback<Event> {
  let ui = ui.clone();
  Callback::from(move |event: Event| {
    let checked = event
      .target()
      .and_then(|t| {
        t.dyn_into::<HtmlInputElement>().ok()
      })
      .is_some_and(|input| input.checked());
    write(
      &mut ui.shared.forms.borrow_mut(),
      checked
    );
  })
}
