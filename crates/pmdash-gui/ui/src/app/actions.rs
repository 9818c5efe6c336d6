//! Handlers behind buttons and selectors.

use chrono::Local;
use gloo::dialogs::{
  confirm,
  prompt
};
use gloo::file::{
  Blob,
  ObjectUrl
};
use pmdash_core::views::ml::{
  self,
  ShareTarget
};
use pmdash_core::views::projects::SearchAction;
use pmdash_core::views::reports::{
  self,
  GeneratedReport,
  ReportSchedule
};
use pmdash_core::views::tasks::{
  self,
  NewTask,
  TaskEdit
};
use pmdash_core::views::{
  gantt,
  header,
  notes,
  projects
};
use pmdash_core::{
  AppAction,
  Failure,
  Modal,
  Notice,
  Tab
};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use super::handle::Ui;
use super::loaders;

/// Health check and project list, then
/// the dashboard.
pub fn startup(ui: &Ui) {
  ui.run_session(
    |shared| async move {
      header::startup(&shared.client).await
    },
    |ui, projects| {
      ui.dispatch(AppAction::ProjectsLoaded(
        projects
      ));
      loaders::load_dashboard(ui);
    }
  );
}

pub fn switch_tab(ui: &Ui, tab: Tab) {
  ui.dispatch(AppAction::SwitchTab(tab));
}

pub fn select_project(
  ui: &Ui,
  value: String
) {
  ui.shared.panels.borrow_mut().forget_project();
  ui.dispatch(AppAction::SelectProject(
    Some(value)
  ));
}

pub fn open_project(ui: &Ui, number: String) {
  ui.run(
    move |shared| async move {
      projects::details(&shared.client, &number)
        .await
    },
    |ui, details| {
      ui.show_modal(Modal::ProjectDetails(
        Box::new(details)
      ));
    }
  );
}

/// Leaves the details modal for another
/// tab focused on the same project.
pub fn navigate(
  ui: &Ui,
  tab: Tab,
  project: String
) {
  ui.close_modal();
  ui.shared.panels.borrow_mut().forget_project();
  ui.dispatch(AppAction::Navigate {
    tab,
    project
  });
}

pub fn search_projects(ui: &Ui, term: String) {
  let min_chars =
    ui.shared.config.search_min_chars;
  ui.shared.forms.borrow_mut().project_search =
    term.clone();
  match projects::search_action(
    term.trim(),
    min_chars
  ) {
    | SearchAction::Search(term) => {
      ui.run(
        move |shared| async move {
          projects::search(&shared.client, &term)
            .await
        },
        loaders::store_projects
      )
    }
    | SearchAction::Reload => {
      loaders::load_projects(ui)
    }
    | SearchAction::Ignore => {}
  }
}

/// Searches first; only results move the
/// view to the projects tab.
pub fn header_search(ui: &Ui) {
  let Some(term) =
    prompt(header::SEARCH_PROMPT, None)
  else {
    return;
  };
  let term = term.trim().to_string();
  if term.is_empty() {
    return;
  }
  ui.run(
    move |shared| async move {
      header::search(&shared.client, &term)
        .await
    },
    |ui, (listing, action)| {
      loaders::store_projects(ui, listing);
      ui.dispatch(action);
    }
  );
}

pub fn load_gantt(ui: &Ui) {
  let selected = ui.selected_project();
  let number = match gantt::selected_project(
    selected.as_deref()
  ) {
    | Ok(number) => number.to_string(),
    | Err(err) => {
      ui.fail(&Failure::from(err));
      return;
    }
  };
  let today = Local::now().date_naive();
  ui.shared.panels.borrow_mut().gantt = None;
  ui.run(
    move |shared| async move {
      gantt::load(&shared.client, &number, today)
        .await
    },
    |ui, (view, notice)| {
      ui.shared.panels.borrow_mut().gantt =
        Some(view);
      ui.notify(notice);
    }
  );
}

pub fn critical_path(ui: &Ui) {
  let selected = ui.selected_project();
  ui.run(
    move |shared| async move {
      gantt::critical_path(
        &shared.client,
        selected.as_deref()
      )
      .await
    },
    |ui, path| {
      ui.show_modal(Modal::CriticalPath(path));
    }
  );
}

fn save_download(report: &GeneratedReport) {
  let blob = Blob::new_with_options(
    report.bytes.as_slice(),
    Some(report.mime_type)
  );
  let url = ObjectUrl::from(blob);
  let anchor = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.create_element("a").ok()
    })
    .and_then(|element| {
      element
        .dyn_into::<HtmlAnchorElement>()
        .ok()
    });

  match anchor {
    | Some(anchor) => {
      anchor.set_href(&url);
      anchor.set_download(&report.file_name);
      anchor.click();
    }
    | None => {
      warn!(file = %report.file_name, "no document to attach download to")
    }
  }
}

pub fn generate_report(ui: &Ui) {
  let (report_type, format) = {
    let forms = ui.shared.forms.borrow();
    (
      forms.report_type.clone(),
      forms.report_format.clone()
    )
  };
  let selected = ui.selected_project();
  let epoch_ms = js_sys::Date::now() as i64;

  ui.notify(reports::generating_notice());
  ui.run_session(
    move |shared| async move {
      reports::generate(
        &shared.client,
        &report_type,
        &format,
        selected.as_deref(),
        epoch_ms
      )
      .await
    },
    |ui, (report, notice)| {
      save_download(&report);
      ui.notify(notice);
      ui.close_modal();
      loaders::load_reports(ui);
    }
  );
}

pub fn download_report(ui: &Ui) {
  ui.notify(reports::download_notice());
}

pub fn preview_report(ui: &Ui) {
  let report_type =
    ui.shared.forms.borrow().report_type.clone();
  ui.show_modal(Modal::ReportPreview(
    report_type
  ));
}

pub fn save_schedule(ui: &Ui) {
  let schedule = {
    let forms = ui.shared.forms.borrow();
    ReportSchedule::new(
      &forms.schedule_type,
      &forms.schedule_frequency,
      &forms.schedule_recipients
    )
  };
  ui.notify(reports::schedule(&schedule));
  ui.close_modal();
}

pub fn task_details(ui: &Ui, id: i64) {
  ui.run(
    move |shared| async move {
      tasks::details(&shared.client, id).await
    },
    move |ui, task| {
      ui.shared.forms.borrow_mut().task_edit =
        Some((id, TaskEdit::from_task(&task)));
      ui.show_modal(Modal::TaskDetails(task));
    }
  );
}

fn after_task_write(
  ui: &Ui,
  notice: Notice
) {
  ui.notify(notice);
  ui.close_modal();
  loaders::load_tasks(ui);
}

pub fn save_task(ui: &Ui) {
  let Some((id, edit)) =
    ui.shared.forms.borrow().task_edit.clone()
  else {
    return;
  };
  ui.run_session(
    move |shared| async move {
      tasks::update(&shared.client, id, &edit)
        .await
    },
    after_task_write
  );
}

pub fn delete_task(ui: &Ui, id: i64) {
  ui.run_session(
    move |shared| async move {
      tasks::delete(&shared.client, id, confirm)
        .await
    },
    |ui, outcome| {
      if let Some(notice) = outcome {
        after_task_write(ui, notice);
      }
    }
  );
}

pub fn add_task(ui: &Ui) {
  ui.shared.forms.borrow_mut().new_task =
    NewTask {
      project_number: ui
        .selected_project()
        .unwrap_or_default(),
      ..NewTask::default()
    };
  ui.show_modal(Modal::AddTask);
}

pub fn create_task(ui: &Ui) {
  let form =
    ui.shared.forms.borrow().new_task.clone();
  ui.run_session(
    move |shared| async move {
      tasks::create(&shared.client, &form).await
    },
    after_task_write
  );
}

fn after_note_write(
  ui: &Ui,
  notice: Notice
) {
  ui.notify(notice);
  ui.close_modal();
  loaders::load_notes(ui);
}

pub fn add_note(ui: &Ui) {
  let selected = ui.selected_project();
  if let Err(err) =
    notes::require_project(selected.as_deref())
  {
    ui.fail(&Failure::from(err));
    return;
  }
  ui.shared.forms.borrow_mut().note_draft =
    Default::default();
  ui.show_modal(Modal::AddNote);
}

pub fn save_note(ui: &Ui) {
  let selected = ui.selected_project();
  let draft =
    ui.shared.forms.borrow().note_draft.clone();
  ui.run_session(
    move |shared| async move {
      notes::create(
        &shared.client,
        selected.as_deref(),
        &draft
      )
      .await
    },
    after_note_write
  );
}

pub fn edit_note(ui: &Ui, id: i64) {
  let Some(project) = ui.selected_project()
  else {
    return;
  };
  ui.run(
    move |shared| async move {
      notes::edit_target(
        &shared.client,
        &project,
        id
      )
      .await
    },
    move |ui, note| {
      ui.shared.forms.borrow_mut().note_edit =
        Some((id, notes::edit_form(&note)));
      ui.show_modal(Modal::EditNote(note));
    }
  );
}

pub fn update_note(ui: &Ui) {
  let Some((id, edit)) =
    ui.shared.forms.borrow().note_edit.clone()
  else {
    return;
  };
  ui.run_session(
    move |shared| async move {
      notes::update(&shared.client, id, &edit)
        .await
    },
    after_note_write
  );
}

pub fn delete_note(ui: &Ui, id: i64) {
  ui.run_session(
    move |shared| async move {
      notes::delete(&shared.client, id, confirm)
        .await
    },
    |ui, outcome| {
      if let Some(notice) = outcome {
        after_note_write(ui, notice);
      }
    }
  );
}

pub fn run_prediction(ui: &Ui) {
  let selected = ui.selected_project();
  ui.shared.panels.borrow_mut().ml = None;
  ui.run(
    move |shared| async move {
      ml::predict(
        &shared.client,
        selected.as_deref()
      )
      .await
    },
    |ui, insights| {
      ui.shared.panels.borrow_mut().ml =
        Some(insights);
    }
  );
}

pub fn retrain(ui: &Ui) {
  if !confirm(ml::RETRAIN_PROMPT) {
    return;
  }
  ui.notify(ml::retraining_notice());
  ui.run_session(
    |shared| async move {
      ml::retrain(&shared.client, |_| true).await
    },
    |ui, outcome| {
      if let Some((result, notice)) = outcome {
        ui.notify(notice);
        ui.show_modal(Modal::TrainingResults(
          result
        ));
      }
    }
  );
}

pub fn model_info(ui: &Ui) {
  ui.run(
    |shared| async move {
      ml::model_info(&shared.client).await
    },
    |ui, info| {
      ui.show_modal(Modal::ModelInfo(info));
    }
  );
}

pub fn share_insights(ui: &Ui) {
  ui.show_modal(Modal::ShareInsights(
    ui.selected_project().unwrap_or_default()
  ));
}

pub fn share_via(ui: &Ui, target: ShareTarget) {
  ui.notify(target.notice());
  ui.close_modal();
}

pub fn export_insights(ui: &Ui) {
  ui.notify(ml::export_notice());
}

pub fn open_settings(ui: &Ui) {
  let current =
    ui.shared.state.borrow().settings().clone();
  ui.shared.forms.borrow_mut().settings =
    current;
  ui.show_modal(Modal::Settings);
}

pub fn save_settings(ui: &Ui) {
  let settings =
    ui.shared.forms.borrow().settings.clone();
  let notice = header::save_settings(
    &mut ui.shared.state.borrow_mut(),
    settings
  );
  ui.notify(notice);
  ui.close_modal();
}
