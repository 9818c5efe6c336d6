use pmdash_core::views::notes::{
  ADD_FIRST,
  NO_NOTES,
  NoteCard,
  NotesView,
  SELECT_PROJECT
};
use web_sys::Event;
use yew::{
  Callback,
  Html,
  html
};

use super::on_click;
use crate::app::forms::event_value;
use crate::app::handle::Ui;
use crate::app::{
  actions,
  loaders
};
use crate::components::{
  EmptyState,
  ProjectSelect
};

fn render_note(ui: &Ui, card: &NoteCard) -> Html {
  let id = card.id;
  html! {
      <div class="note-card">
          <div class="note-header">
              <h4>{ card.title.clone() }</h4>
              <div class="note-actions">
                  <button class="icon-btn" title="Edit" onclick={on_click(ui, move |ui| actions::edit_note(ui, id))}>
                      <i class="fas fa-edit"></i>
                  </button>
                  <button class="icon-btn" title="Delete" onclick={on_click(ui, move |ui| actions::delete_note(ui, id))}>
                      <i class="fas fa-trash"></i>
                  </button>
              </div>
          </div>
          <p class="note-content">{ card.content.clone() }</p>
          <div class="note-tags">
              { for card.tags.iter().map(|tag| html! { <span class="badge badge-tag">{ tag.clone() }</span> }) }
          </div>
          <div class="note-byline">{ card.byline.clone() }</div>
      </div>
  }
}

pub fn render_notes(ui: &Ui) -> Html {
  let (options, selected) = {
    let state = ui.shared.state.borrow();
    (
      state.project_options(),
      state.selected_project().map(str::to_string)
    )
  };
  let on_select = {
    let ui = ui.clone();
    Callback::from(move |event: Event| {
      actions::select_project(&ui, event_value(&event));
      loaders::load_notes(&ui);
    })
  };
  let add_note = on_click(ui, actions::add_note);

  let panels = ui.shared.panels.borrow();
  let body = match panels.notes.as_ref() {
    | None | Some(NotesView::Placeholder) => html! {
        <EmptyState message={SELECT_PROJECT} />
    },
    | Some(NotesView::Empty) => html! {
        <EmptyState message={NO_NOTES}>
            <button class="btn-primary" onclick={add_note.clone()}>{ ADD_FIRST }</button>
        </EmptyState>
    },
    | Some(NotesView::Notes(cards)) => html! {
        <div class="notes-grid">
            { for cards.iter().map(|card| render_note(ui, card)) }
        </div>
    }
  };

  html! {
      <div class="notes">
          <div class="toolbar">
              <ProjectSelect id="notesProjectSelect" options={options} selected={selected} onchange={on_select} />
              <button class="btn-primary" onclick={add_note}>
                  <i class="fas fa-plus"></i>{ " Add Note" }
              </button>
          </div>
          { body }
      </div>
  }
}
