use pmdash_core::views::gantt::total_duration_label;
use pmdash_core::views::ml::{
  ModelCard,
  ModelInfoView,
  ShareTarget,
  TrainingSummary
};
use pmdash_core::views::projects::ProjectDetails;
use pmdash_core::views::reports::{
  REPORT_TYPES,
  SCHEDULE_FREQUENCIES,
  report_type_title
};
use pmdash_core::views::tasks::PRIORITIES;
use pmdash_core::{
  Modal,
  Tab,
  Theme
};
use pmdash_shared::{
  CriticalPath,
  ModelInfo,
  RetrainResult,
  TaskDto,
  TaskStatus
};
use yew::{
  Html,
  html
};

use super::actions;
use super::forms::{
  bind,
  bind_checked
};
use super::handle::Ui;
use super::panels::on_click;
use crate::components::{
  EmptyState,
  ModalFrame,
  StatusBadge
};

fn field(label: &'static str, value: Html) -> Html {
  html! {
      <div class="form-group">
          <label class="form-label">{ label }</label>
          { value }
      </div>
  }
}

fn project_details(
  ui: &Ui,
  details: &ProjectDetails
) -> Html {
  let text = |value: &String| html! { <span>{ value.clone() }</span> };
  let gantt_number = details.number.clone();
  let ml_number = details.number.clone();

  html! {
      <>
          <div class="details-grid">
              { field("Project Number", text(&details.number)) }
              { field("Project Name", text(&details.name)) }
              { field("PM Name", text(&details.pm_name)) }
              { field("Status", html! { <StatusBadge label={details.status_label.clone()} badge={details.status_badge} /> }) }
              { field("Budget", text(&details.budget)) }
              { field("Actual Cost", text(&details.actual_cost)) }
              { field("Budget Variance", text(&details.budget_variance)) }
              { field("Region", text(&details.region)) }
              { field("CCRs", text(&details.ccrs)) }
              { field("Orders", text(&details.orders)) }
              { field("Estimated Hours", text(&details.estimated_hours)) }
              { field("Actual Hours", text(&details.actual_hours)) }
          </div>
          <div class="form-actions">
              <button class="btn-primary"
                  onclick={on_click(ui, move |ui| actions::navigate(ui, Tab::Gantt, gantt_number.clone()))}>
                  <i class="fas fa-chart-gantt"></i>{ " View Gantt" }
              </button>
              <button class="btn-primary"
                  onclick={on_click(ui, move |ui| actions::navigate(ui, Tab::Ml, ml_number.clone()))}>
                  <i class="fas fa-brain"></i>{ " ML Prediction" }
              </button>
              <button class="btn-secondary" onclick={on_click(ui, Ui::close_modal)}>{ "Close" }</button>
          </div>
      </>
  }
}

fn task_details(ui: &Ui, task: &TaskDto) -> Html {
  let Some((id, edit)) =
    ui.shared.forms.borrow().task_edit.clone()
  else {
    return html! {};
  };

  html! {
      <>
          <h3>{ task.task_name.clone() }</h3>
          {
              field("Status", html! {
                  <select class="input-field" onchange={bind(ui, |forms, value| {
                      if let Some((_, edit)) = forms.task_edit.as_mut() {
                          edit.status = TaskStatus::from_label(&value);
                      }
                  })}>
                      {
                          for TaskStatus::BOARD.into_iter().map(|status| html! {
                              <option value={status.label()} selected={edit.status == status}>{ status.label() }</option>
                          })
                      }
                  </select>
              })
          }
          {
              field("Priority", html! {
                  <select class="input-field" onchange={bind(ui, |forms, value| {
                      if let Some((_, edit)) = forms.task_edit.as_mut() {
                          edit.priority = value;
                      }
                  })}>
                      {
                          for PRIORITIES.into_iter().map(|priority| html! {
                              <option value={priority} selected={edit.priority == priority}>{ priority }</option>
                          })
                      }
                  </select>
              })
          }
          {
              field("Assigned To", html! {
                  <input class="input-field" type="text" value={edit.assigned_to.clone()}
                      onchange={bind(ui, |forms, value| {
                          if let Some((_, edit)) = forms.task_edit.as_mut() {
                              edit.assigned_to = value;
                          }
                      })} />
              })
          }
          {
              field("Due Date", html! {
                  <input class="input-field" type="date" value={edit.due_date.clone()}
                      onchange={bind(ui, |forms, value| {
                          if let Some((_, edit)) = forms.task_edit.as_mut() {
                              edit.due_date = value;
                          }
                      })} />
              })
          }
          {
              field("Description", html! {
                  <textarea class="input-field" rows="3" value={edit.description.clone()}
                      onchange={bind(ui, |forms, value| {
                          if let Some((_, edit)) = forms.task_edit.as_mut() {
                              edit.description = value;
                          }
                      })} />
              })
          }
          <div class="form-actions">
              <button class="btn-primary" onclick={on_click(ui, actions::save_task)}>{ "Save" }</button>
              <button class="btn-danger" onclick={on_click(ui, move |ui| actions::delete_task(ui, id))}>{ "Delete" }</button>
              <button class="btn-secondary" onclick={on_click(ui, Ui::close_modal)}>{ "Close" }</button>
          </div>
      </>
  }
}

fn add_task(ui: &Ui) -> Html {
  let form = ui.shared.forms.borrow().new_task.clone();
  let options = ui.shared.state.borrow().project_options();

  html! {
      <>
          {
              field("Task Name *", html! {
                  <input class="input-field" type="text" value={form.task_name.clone()}
                      onchange={bind(ui, |forms, value| forms.new_task.task_name = value)} />
              })
          }
          {
              field("Project *", html! {
                  <select class="input-field" onchange={bind(ui, |forms, value| forms.new_task.project_number = value)}>
                      <option value="" selected={form.project_number.is_empty()}>{ "Select a project..." }</option>
                      {
                          for options.into_iter().map(|(number, label)| {
                              let selected = number == form.project_number;
                              html! { <option value={number} selected={selected}>{ label }</option> }
                          })
                      }
                  </select>
              })
          }
          {
              field("Priority", html! {
                  <select class="input-field" onchange={bind(ui, |forms, value| forms.new_task.priority = value)}>
                      {
                          for PRIORITIES.into_iter().map(|priority| html! {
                              <option value={priority} selected={form.priority == priority}>{ priority }</option>
                          })
                      }
                  </select>
              })
          }
          {
              field("Due Date", html! {
                  <input class="input-field" type="date" value={form.due_date.clone()}
                      onchange={bind(ui, |forms, value| forms.new_task.due_date = value)} />
              })
          }
          {
              field("Assigned To", html! {
                  <input class="input-field" type="text" value={form.assigned_to.clone()}
                      onchange={bind(ui, |forms, value| forms.new_task.assigned_to = value)} />
              })
          }
          {
              field("Description", html! {
                  <textarea class="input-field" rows="3" value={form.description.clone()}
                      onchange={bind(ui, |forms, value| forms.new_task.description = value)} />
              })
          }
          <div class="form-actions">
              <button class="btn-primary" onclick={on_click(ui, actions::create_task)}>{ "Create Task" }</button>
              <button class="btn-secondary" onclick={on_click(ui, Ui::close_modal)}>{ "Cancel" }</button>
          </div>
      </>
  }
}

fn add_note(ui: &Ui) -> Html {
  let draft = ui.shared.forms.borrow().note_draft.clone();
  html! {
      <>
          {
              field("Title *", html! {
                  <input class="input-field" type="text" value={draft.title.clone()}
                      onchange={bind(ui, |forms, value| forms.note_draft.title = value)} />
              })
          }
          {
              field("Content", html! {
                  <textarea class="input-field" rows="5" value={draft.content.clone()}
                      onchange={bind(ui, |forms, value| forms.note_draft.content = value)} />
              })
          }
          {
              field("Tags (comma-separated)", html! {
                  <input class="input-field" type="text" value={draft.tags.clone()}
                      onchange={bind(ui, |forms, value| forms.note_draft.tags = value)} />
              })
          }
          {
              field("Author", html! {
                  <input class="input-field" type="text" value={draft.created_by.clone()}
                      onchange={bind(ui, |forms, value| forms.note_draft.created_by = value)} />
              })
          }
          <div class="form-actions">
              <button class="btn-primary" onclick={on_click(ui, actions::save_note)}>{ "Save Note" }</button>
              <button class="btn-secondary" onclick={on_click(ui, Ui::close_modal)}>{ "Cancel" }</button>
          </div>
      </>
  }
}

fn edit_note(ui: &Ui) -> Html {
  let Some((_, edit)) =
    ui.shared.forms.borrow().note_edit.clone()
  else {
    return html! {};
  };

  html! {
      <>
          {
              field("Title", html! {
                  <input class="input-field" type="text" value={edit.title.clone()}
                      onchange={bind(ui, |forms, value| {
                          if let Some((_, edit)) = forms.note_edit.as_mut() {
                              edit.title = value;
                          }
                      })} />
              })
          }
          {
              field("Content", html! {
                  <textarea class="input-field" rows="5" value={edit.content.clone()}
                      onchange={bind(ui, |forms, value| {
                          if let Some((_, edit)) = forms.note_edit.as_mut() {
                              edit.content = value;
                          }
                      })} />
              })
          }
          {
              field("Tags", html! {
                  <input class="input-field" type="text" value={edit.tags.clone()}
                      onchange={bind(ui, |forms, value| {
                          if let Some((_, edit)) = forms.note_edit.as_mut() {
                              edit.tags = value;
                          }
                      })} />
              })
          }
          <div class="form-actions">
              <button class="btn-primary" onclick={on_click(ui, actions::update_note)}>{ "Update Note" }</button>
              <button class="btn-secondary" onclick={on_click(ui, Ui::close_modal)}>{ "Cancel" }</button>
          </div>
      </>
  }
}

fn critical_path(path: &CriticalPath) -> Html {
  html! {
      <>
          <p class="critical-total">
              <strong>{ "Total Duration: " }</strong>{ total_duration_label(path) }
          </p>
          <table class="data-table">
              <thead>
                  <tr>
                      <th>{ "Type" }</th>
                      <th>{ "Number" }</th>
                      <th>{ "Duration (days)" }</th>
                  </tr>
              </thead>
              <tbody>
                  {
                      for path.critical_path.iter().map(|item| html! {
                          <tr>
                              <td>{ item.kind.clone() }</td>
                              <td>{ item.number.clone() }</td>
                              <td>{ item.duration }</td>
                          </tr>
                      })
                  }
              </tbody>
          </table>
      </>
  }
}

fn settings(ui: &Ui) -> Html {
  let settings = ui.shared.forms.borrow().settings.clone();
  html! {
      <>
          {
              field("Theme", html! {
                  <select id="themeSelect" class="input-field"
                      onchange={bind(ui, |forms, value| forms.settings.theme = Theme::from_key(&value))}>
                      <option value="light" selected={settings.theme == Theme::Light}>{ "Light" }</option>
                      <option value="dark" selected={settings.theme == Theme::Dark}>{ "Dark" }</option>
                  </select>
              })
          }
          {
              field("Auto-save", html! {
                  <input id="autoSave" type="checkbox" checked={settings.auto_save}
                      onchange={bind_checked(ui, |forms, checked| forms.settings.auto_save = checked)} />
              })
          }
          {
              field("TTS Enabled", html! {
                  <input id="ttsEnabled" type="checkbox" checked={settings.text_to_speech}
                      onchange={bind_checked(ui, |forms, checked| forms.settings.text_to_speech = checked)} />
              })
          }
          <button class="btn-primary" onclick={on_click(ui, actions::save_settings)}>{ "Save Settings" }</button>
      </>
  }
}

fn training_results(result: &RetrainResult) -> Html {
  let summary = TrainingSummary::from(result);
  html! {
      <div class="training-results">
          <div class="card">
              <h4>{ "Delay Predictor" }</h4>
              <p>{ format!("Final MAE: {}", summary.final_mae) }</p>
              <p>{ format!("Training Samples: {}", summary.delay_samples) }</p>
          </div>
          <div class="card">
              <h4>{ "Risk Classifier" }</h4>
              <p>{ format!("Final Accuracy: {}", summary.final_accuracy) }</p>
              <p>{ format!("Training Samples: {}", summary.risk_samples) }</p>
          </div>
      </div>
  }
}

fn model_card(title: &'static str, card: &ModelCard) -> Html {
  html! {
      <div class="card">
          <h4>{ title }</h4>
          <p>{ format!("Type: {}", card.kind) }</p>
          <p>{ format!("Architecture: {}", card.architecture) }</p>
          <p>{ format!("Features: {}", card.features) }</p>
          <p>{ format!("Classes: {}", card.classes) }</p>
      </div>
  }
}

fn model_info(info: &ModelInfo) -> Html {
  let view = ModelInfoView::from(info);
  let history = match view.history.empty_message() {
    | Some(message) => html! { <EmptyState message={message} /> },
    | None => html! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>{ "Model" }</th>
                    <th>{ "Training Date" }</th>
                    <th>{ "Samples" }</th>
                    <th>{ "Accuracy" }</th>
                </tr>
            </thead>
            <tbody>
                {
                    for view.history.items().iter().map(|row| html! {
                        <tr>
                            <td>{ row.model.clone() }</td>
                            <td>{ row.date.clone() }</td>
                            <td>{ row.samples.clone() }</td>
                            <td>{ row.accuracy.clone() }</td>
                        </tr>
                    })
                }
            </tbody>
        </table>
    }
  };

  html! {
      <>
          <div class="model-cards">
              { model_card("Delay Predictor", &view.delay_predictor) }
              { model_card("Risk Classifier", &view.risk_classifier) }
          </div>
          <h4>{ "Training History" }</h4>
          { history }
      </>
  }
}

fn share_insights(ui: &Ui, project: &str) -> Html {
  html! {
      <>
          <p>{ format!("Share ML insights for {project}") }</p>
          <div class="share-targets">
              {
                  for ShareTarget::ALL.into_iter().map(|target| html! {
                      <button class="btn-secondary" onclick={on_click(ui, move |ui| actions::share_via(ui, target))}>
                          <i class={format!("fab {}", target.icon())}></i>
                          { format!(" {}", target.label()) }
                      </button>
                  })
              }
          </div>
      </>
  }
}

fn report_preview(ui: &Ui, report_type: &str) -> Html {
  html! {
      <>
          <h3>{ report_type_title(report_type) }</h3>
          <p>{ "The report will include project data, charts and a summary for the selected project." }</p>
          <div class="form-actions">
              <button class="btn-primary" onclick={on_click(ui, actions::generate_report)}>{ "Generate" }</button>
              <button class="btn-secondary" onclick={on_click(ui, Ui::close_modal)}>{ "Close" }</button>
          </div>
      </>
  }
}

fn schedule_report(ui: &Ui) -> Html {
  let (report_type, frequency, recipients) = {
    let forms = ui.shared.forms.borrow();
    (
      forms.schedule_type.clone(),
      forms.schedule_frequency.clone(),
      forms.schedule_recipients.clone()
    )
  };

  html! {
      <>
          {
              field("Report Type", html! {
                  <select class="input-field" onchange={bind(ui, |forms, value| forms.schedule_type = value)}>
                      {
                          for REPORT_TYPES.into_iter().map(|(value, label)| html! {
                              <option value={value} selected={report_type == value}>{ label }</option>
                          })
                      }
                  </select>
              })
          }
          {
              field("Frequency", html! {
                  <select class="input-field" onchange={bind(ui, |forms, value| forms.schedule_frequency = value)}>
                      {
                          for SCHEDULE_FREQUENCIES.into_iter().map(|(value, label)| html! {
                              <option value={value} selected={frequency == value}>{ label }</option>
                          })
                      }
                  </select>
              })
          }
          {
              field("Recipients (comma-separated)", html! {
                  <input class="input-field" type="text" value={recipients}
                      onchange={bind(ui, |forms, value| forms.schedule_recipients = value)} />
              })
          }
          <div class="form-actions">
              <button class="btn-primary" onclick={on_click(ui, actions::save_schedule)}>{ "Schedule" }</button>
              <button class="btn-secondary" onclick={on_click(ui, Ui::close_modal)}>{ "Cancel" }</button>
          </div>
      </>
  }
}

/// The modal slot: nothing when closed.
pub fn render_modal(ui: &Ui) -> Html {
  let Some(modal) = ui.shared.modal.borrow().current().cloned() else {
    return html! {};
  };

  let body = match &modal {
    | Modal::ProjectDetails(details) => project_details(ui, details),
    | Modal::TaskDetails(task) => task_details(ui, task),
    | Modal::AddTask => add_task(ui),
    | Modal::AddNote => add_note(ui),
    | Modal::EditNote(_) => edit_note(ui),
    | Modal::CriticalPath(path) => critical_path(path),
    | Modal::Settings => settings(ui),
    | Modal::TrainingResults(result) => training_results(result),
    | Modal::ModelInfo(info) => model_info(info),
    | Modal::ShareInsights(project) => share_insights(ui, project),
    | Modal::ReportPreview(report_type) => report_preview(ui, report_type),
    | Modal::ScheduleReport => schedule_report(ui)
  };

  html! {
      <ModalFrame title={modal.title()} on_close={on_click(ui, Ui::close_modal)}>
          { body }
      </ModalFrame>
  }
}
