use pmdash_core::tabs::TabLoaders;
use pmdash_core::views::projects::ProjectRow;
use pmdash_core::views::{
  Listing,
  dashboard,
  notes,
  projects,
  reports,
  tasks
};
use pmdash_core::{
  AppAction,
  Tab,
  TabSwitch
};
use tracing::debug;

use super::actions;
use super::handle::Ui;

pub type Loader = Box<dyn Fn(&TabSwitch)>;

fn loader(ui: &Ui, load: fn(&Ui)) -> Loader {
  let ui = ui.clone();
  Box::new(move |switch: &TabSwitch| {
    debug!(tab = %switch.tab, generation = switch.generation, "loading tab");
    load(&ui);
  })
}

pub fn tab_loaders(ui: &Ui) -> TabLoaders<Loader> {
  let mut loaders = TabLoaders::new();
  loaders
    .register(
      Tab::Dashboard,
      loader(ui, load_dashboard)
    )
    .register(
      Tab::Projects,
      loader(ui, load_projects)
    )
    .register(Tab::Gantt, loader(ui, load_gantt))
    .register(
      Tab::Reports,
      loader(ui, load_reports)
    )
    .register(Tab::Tasks, loader(ui, load_tasks))
    .register(Tab::Notes, loader(ui, load_notes))
    .register(Tab::Ml, loader(ui, load_ml));
  loaders
}

pub fn load_dashboard(ui: &Ui) {
  let limit = ui.shared.config.recent_projects;
  ui.run(
    move |shared| async move {
      dashboard::load(&shared.client, limit)
        .await
    },
    |ui, view| {
      ui.shared.panels.borrow_mut().dashboard =
        Some(view);
    }
  );
}

/// Shows header search results already in
/// the panel, otherwise lists projects
/// under the current status filter.
pub fn load_projects(ui: &Ui) {
  let pending = ui
    .shared
    .state
    .borrow()
    .project_query()
    .map(str::to_string);

  if let Some(term) = pending {
    debug!(term = %term, "showing header search results");
    ui.shared
      .state
      .borrow_mut()
      .apply(AppAction::ClearSearch);
    ui.shared
      .forms
      .borrow_mut()
      .project_search = term;
    return;
  }

  let filters = projects::status_filter(
    &ui.shared.forms.borrow().project_status
  );
  ui.run(
    move |shared| async move {
      projects::load(
        &shared.client,
        &filters
      )
      .await
    },
    store_projects
  );
}

pub fn store_projects(
  ui: &Ui,
  listing: Listing<ProjectRow>
) {
  ui.shared.panels.borrow_mut().projects =
    Some(listing);
}

/// The chart of the selected project; the
/// panel keeps its prompt until one is
/// chosen.
pub fn load_gantt(ui: &Ui) {
  if ui.selected_project().is_some() {
    actions::load_gantt(ui);
  } else {
    ui.shared.panels.borrow_mut().gantt = None;
  }
}

pub fn load_reports(ui: &Ui) {
  ui.run(
    |shared| async move {
      reports::history(&shared.client).await
    },
    |ui, listing| {
      ui.shared.panels.borrow_mut().reports =
        Some(listing);
    }
  );
}

pub fn load_tasks(ui: &Ui) {
  let filters =
    ui.shared.forms.borrow().task_filters.clone();
  ui.run(
    move |shared| async move {
      tasks::load(&shared.client, &filters)
        .await
    },
    |ui, board| {
      ui.shared.panels.borrow_mut().tasks =
        Some(board);
    }
  );
}

pub fn load_notes(ui: &Ui) {
  let project = ui.selected_project();
  ui.shared.panels.borrow_mut().notes = None;
  ui.run(
    move |shared| async move {
      notes::load(
        &shared.client,
        project.as_deref()
      )
      .await
    },
    |ui, view| {
      ui.shared.panels.borrow_mut().notes =
        Some(view);
    }
  );
}

/// Predicts for the selected project, if
/// any; otherwise the panel waits for the
/// Predict button.
pub fn load_ml(ui: &Ui) {
  if ui.selected_project().is_some() {
    actions::run_prediction(ui);
  }
}
