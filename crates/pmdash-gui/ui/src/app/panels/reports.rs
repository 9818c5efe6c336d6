use pmdash_core::Modal;
use pmdash_core::views::reports::{
  REPORT_FORMATS,
  REPORT_TYPES
};
use yew::{
  Html,
  html
};

use super::on_click;
use crate::app::actions;
use crate::app::forms::bind;
use crate::app::handle::Ui;
use crate::components::EmptyState;

pub fn render_reports(ui: &Ui) -> Html {
  let (report_type, format) = {
    let forms = ui.shared.forms.borrow();
    (
      forms.report_type.clone(),
      forms.report_format.clone()
    )
  };

  html! {
      <div class="reports">
          <div class="card report-form">
              <h3>{ "Generate Report" }</h3>
              <select id="reportType" class="input-field"
                  onchange={bind(ui, |forms, value| forms.report_type = value)}>
                  {
                      for REPORT_TYPES.into_iter().map(|(value, label)| html! {
                          <option value={value} selected={report_type == value}>{ label }</option>
                      })
                  }
              </select>
              <select id="reportFormat" class="input-field"
                  onchange={bind(ui, |forms, value| forms.report_format = value)}>
                  {
                      for REPORT_FORMATS.into_iter().map(|value| html! {
                          <option value={value} selected={format == value}>{ value }</option>
                      })
                  }
              </select>
              <div class="form-actions">
                  <button class="btn-primary" onclick={on_click(ui, actions::generate_report)}>
                      <i class="fas fa-file-export"></i>{ " Generate" }
                  </button>
                  <button class="btn-secondary" onclick={on_click(ui, actions::preview_report)}>
                      { "Preview" }
                  </button>
                  <button class="btn-secondary"
                      onclick={on_click(ui, |ui| ui.show_modal(Modal::ScheduleReport))}>
                      { "Schedule" }
                  </button>
              </div>
          </div>
          { render_history(ui) }
      </div>
  }
}

fn render_history(ui: &Ui) -> Html {
  let panels = ui.shared.panels.borrow();
  let Some(listing) = panels.reports.as_ref() else {
    return html! {};
  };
  if let Some(message) = listing.empty_message() {
    return html! { <EmptyState message={message} /> };
  }

  html! {
      <table class="data-table">
          <thead>
              <tr>
                  <th>{ "Report Type" }</th>
                  <th>{ "Report Name" }</th>
                  <th>{ "Created By" }</th>
                  <th>{ "Created Date" }</th>
                  <th>{ "Actions" }</th>
              </tr>
          </thead>
          <tbody>
              {
                  for listing.items().iter().map(|row| html! {
                      <tr>
                          <td>{ row.report_type.clone() }</td>
                          <td>{ row.report_name.clone() }</td>
                          <td>{ row.created_by.clone() }</td>
                          <td>{ row.created_date.clone() }</td>
                          <td>
                              <button class="btn-secondary" onclick={on_click(ui, actions::download_report)}>
                                  <i class="fas fa-download"></i>
                              </button>
                          </td>
                      </tr>
                  })
              }
          </tbody>
      </table>
  }
}
