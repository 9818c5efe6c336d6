use pmdash_core::views::tasks::TaskCard;
use pmdash_shared::{
  TaskFilters,
  TaskStatus
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
  ProjectSelect,
  StatusBadge
};

fn render_card(ui: &Ui, card: &TaskCard) -> Html {
  let id = card.id;
  html! {
      <div class="task-card" onclick={on_click(ui, move |ui| actions::task_details(ui, id))}>
          <div class="task-title">{ card.name.clone() }</div>
          <p class="task-description">{ card.description.clone() }</p>
          <div class="task-meta">
              <StatusBadge label={card.priority.clone()} badge={card.priority_badge} />
              {
                  for card.due.iter().map(|due| html! {
                      <span class="task-due"><i class="fas fa-calendar"></i>{ format!(" {due}") }</span>
                  })
              }
          </div>
      </div>
  }
}

fn filter_callback(
  ui: &Ui,
  apply: fn(&mut TaskFilters, String)
) -> Callback<Event> {
  let ui = ui.clone();
  Callback::from(move |event: Event| {
    apply(
      &mut ui.shared.forms.borrow_mut().task_filters,
      event_value(&event)
    );
    loaders::load_tasks(&ui);
  })
}

pub fn render_tasks(ui: &Ui) -> Html {
  let options = ui.shared.state.borrow().project_options();
  let (project, status) = {
    let forms = ui.shared.forms.borrow();
    (
      forms.task_filters.project_number.clone(),
      forms.task_filters.status
    )
  };
  let on_project = filter_callback(ui, |filters, value| {
    filters.project_number =
      Some(value).filter(|v| !v.is_empty());
  });
  let on_status = filter_callback(ui, |filters, value| {
    filters.status = (!value.is_empty())
      .then(|| TaskStatus::from_label(&value));
  });

  let panels = ui.shared.panels.borrow();
  let board = match panels.tasks.as_ref() {
    | None => html! { <div class="loading">{ "Loading..." }</div> },
    | Some(listing) => match listing.empty_message() {
      | Some(message) => html! { <EmptyState message={message} /> },
      | None => html! {
          <div class="kanban">
              {
                  for listing.items().iter().map(|column| html! {
                      <div class="kanban-column" data-status={column.status.label()}>
                          <h3>{ column.title.clone() }</h3>
                          { for column.cards.iter().map(|card| render_card(ui, card)) }
                      </div>
                  })
              }
          </div>
      }
    }
  };

  html! {
      <div class="tasks">
          <div class="toolbar">
              <ProjectSelect id="taskProjectFilter" options={options} selected={project} onchange={on_project} />
              <select id="taskStatusFilter" class="input-field" onchange={on_status}>
                  <option value="" selected={status.is_none()}>{ "All Statuses" }</option>
                  {
                      for TaskStatus::BOARD.into_iter().map(|s| html! {
                          <option value={s.label()} selected={status == Some(s)}>{ s.label() }</option>
                      })
                  }
              </select>
              <button class="btn-primary" onclick={on_click(ui, actions::add_task)}>
                  <i class="fas fa-plus"></i>{ " Add Task" }
              </button>
          </div>
          { board }
      </div>
  }
}
