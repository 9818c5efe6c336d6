use pmdash_core::views::projects::{
  COLUMNS,
  STATUS_FILTERS
};
use web_sys::{
  Event,
  InputEvent
};
use yew::{
  Callback,
  Html,
  html
};

use super::on_click;
use crate::app::forms::{
  bind,
  event_value
};
use crate::app::handle::Ui;
use crate::app::{
  actions,
  loaders
};
use crate::components::{
  EmptyState,
  StatusBadge
};

pub fn render_projects(ui: &Ui) -> Html {
  let (search, status) = {
    let forms = ui.shared.forms.borrow();
    (
      forms.project_search.clone(),
      forms.project_status.clone()
    )
  };
  let on_search = {
    let ui = ui.clone();
    Callback::from(move |event: InputEvent| {
      actions::search_projects(&ui, event_value(&event))
    })
  };
  let on_status = {
    let write = bind(ui, |forms, value| {
      forms.project_status = value
    });
    let ui = ui.clone();
    Callback::from(move |event: Event| {
      write.emit(event);
      loaders::load_projects(&ui);
    })
  };

  html! {
      <div class="projects">
          <div class="toolbar">
              <input
                  id="projectSearch"
                  class="input-field"
                  type="search"
                  placeholder="Search projects..."
                  value={search}
                  oninput={on_search}
              />
              <select id="projectStatusFilter" class="input-field" onchange={on_status}>
                  {
                      for STATUS_FILTERS.into_iter().map(|(value, label)| html! {
                          <option value={value} selected={status == value}>{ label }</option>
                      })
                  }
              </select>
          </div>
          { render_table(ui) }
      </div>
  }
}

fn render_table(ui: &Ui) -> Html {
  let panels = ui.shared.panels.borrow();
  let Some(listing) = panels.projects.as_ref() else {
    return html! { <div class="loading">{ "Loading..." }</div> };
  };
  if let Some(message) = listing.empty_message() {
    return html! { <EmptyState message={message} /> };
  }

  html! {
      <table class="data-table">
          <thead>
              <tr>{ for COLUMNS.into_iter().map(|column| html! { <th>{ column }</th> }) }</tr>
          </thead>
          <tbody>
              {
                  for listing.items().iter().map(|row| {
                      let number = row.number.clone();
                      html! {
                          <tr>
                              <td>{ row.number.clone() }</td>
                              <td>{ row.name.clone() }</td>
                              <td>{ row.pm_name.clone() }</td>
                              <td><StatusBadge label={row.status_label.clone()} badge={row.status_badge} /></td>
                              <td>{ row.budget.clone() }</td>
                              <td>{ row.start_date.clone() }</td>
                              <td>{ row.end_date.clone() }</td>
                              <td>
                                  <button class="btn-secondary" onclick={on_click(ui, move |ui| actions::open_project(ui, number.clone()))}>
                                      <i class="fas fa-eye"></i>{ " View" }
                                  </button>
                              </td>
                          </tr>
                      }
                  })
              }
          </tbody>
      </table>
  }
}
