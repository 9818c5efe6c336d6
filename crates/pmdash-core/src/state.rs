use pmdash_shared::ProjectDto;
use tracing::{
  debug,
  info
};

use crate::error::TabError;
use crate::scope::RequestScope;
use crate::tabs::{
  Tab,
  TabController,
  TabSwitch
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  pub fn as_key(self) -> &'static str {
    match self {
      | Theme::Light => "light",
      | Theme::Dark => "dark"
    }
  }

  /// Anything but `dark` is light.
  pub fn from_key(key: &str) -> Theme {
    if key.eq_ignore_ascii_case("dark") {
      Theme::Dark
    } else {
      Theme::Light
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub theme:          Theme,
  pub auto_save:      bool,
  pub text_to_speech: bool
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      theme:          Theme::Light,
      auto_save:      true,
      text_to_speech: false
    }
  }
}

/// Every mutation the UI performs on the
/// application state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
  SwitchTab(Tab),
  /// Select a project and open a tab for
  /// it in one step.
  Navigate {
    tab:     Tab,
    project: String
  },
  ProjectsLoaded(Vec<ProjectDto>),
  /// Run a project search and show its
  /// results on the projects tab.
  /// Results for the term are already
  /// in hand; show them on the projects
  /// tab instead of reloading the list.
  SearchProjects(String),
  ClearSearch,
  SelectProject(Option<String>),
  SaveSettings(Settings)
}

/// The one application-state object.
/// Lives for the whole session and is
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct AppState {
  tabs:             TabController,
  projects:         Vec<ProjectDto>,
  settings:         Settings,
  selected_project: Option<String>,
  project_query:    Option<String>,
  session:          RequestScope
}

impl AppState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn tabs(&self) -> &TabController {
    &self.tabs
  }

  /// Scope for work whose outcome matters
  /// whichever tab is shown: startup and
  /// every write. Never aborted.
  pub fn session_scope(
    &self
  ) -> &RequestScope {
    &self.session
  }

  pub fn current_tab(&self) -> Tab {
    self.tabs.active()
  }

  pub fn projects(&self) -> &[ProjectDto] {
    &self.projects
  }

  pub fn settings(&self) -> &Settings {
    &self.settings
  }

  pub fn theme(&self) -> Theme {
    self.settings.theme
  }

  pub fn selected_project(
    &self
  ) -> Option<&str> {
    self.selected_project.as_deref()
  }

  /// Header search whose results are
  /// waiting on the projects tab, consumed
  /// by its loader.
  pub fn project_query(
    &self
  ) -> Option<&str> {
    self.project_query.as_deref()
  }

  /// `(number, "NUMBER - NAME")` for
  /// every cached project, in load order.
  pub fn project_options(
    &self
  ) -> Vec<(String, String)> {
    self
      .projects
      .iter()
      .map(|p| {
        (
          p.project_number.clone(),
          format!(
            "{} - {}",
            p.project_number, p.project_name
          )
        )
      })
      .collect()
  }

  pub fn switch_tab(
    &mut self,
    name: &str
  ) -> Result<TabSwitch, TabError> {
    self.tabs.switch_tab(name)
  }

  /// Applies one action. Returns the tab
  /// switch it caused, if any, so the
  /// caller can run the tab's loader.
  pub fn apply(
    &mut self,
    action: AppAction
  ) -> Option<TabSwitch> {
    match action {
      | AppAction::SwitchTab(tab) => {
        Some(self.tabs.activate(tab))
      }
      | AppAction::Navigate {
        tab,
        project
      } => {
        debug!(%tab, project = %project, "navigating");
        self.selected_project =
          Some(project);
        Some(self.tabs.activate(tab))
      }
      | AppAction::ProjectsLoaded(
        projects
      ) => {
        info!(
          count = projects.len(),
          "project list cached"
        );
        self.projects = projects;
        None
      }
      | AppAction::SearchProjects(term) => {
        self.project_query = Some(term);
        Some(
          self.tabs.activate(Tab::Projects)
        )
      }
      | AppAction::ClearSearch => {
        self.project_query = None;
        None
      }
      | AppAction::SelectProject(
        project
      ) => {
        self.selected_project = project
          .filter(|p| !p.trim().is_empty());
        None
      }
      | AppAction::SaveSettings(
        settings
      ) => {
        self.settings = settings;
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn project(
    number: &str,
    name: &str
  ) -> ProjectDto {
    serde_json::from_value(
      serde_json::json!({
        "PROJECT_NUMBER": number,
        "PROJECT_NAME": name
      })
    )
    .expect("project fixture")
  }

  #[test]
  fn navigate_selects_project_and_switches(
  ) {
    let mut state = AppState::new();
    let switch = state
      .apply(AppAction::Navigate {
        tab:     Tab::Gantt,
        project: "P-100".to_string()
      })
      .expect("navigation switches tab");
    assert_eq!(switch.tab, Tab::Gantt);
    assert_eq!(
      state.current_tab(),
      Tab::Gantt
    );
    assert_eq!(
      state.selected_project(),
      Some("P-100")
    );
  }

  #[test]
  fn search_goes_to_projects_tab() {
    let mut state = AppState::new();
    let switch = state.apply(
      AppAction::SearchProjects(
        "fiber".to_string()
      )
    );
    assert_eq!(
      switch.map(|s| s.tab),
      Some(Tab::Projects)
    );
    assert_eq!(
      state.project_query(),
      Some("fiber")
    );
    assert!(
      state
        .apply(AppAction::ClearSearch)
        .is_none()
    );
    assert_eq!(state.project_query(), None);
  }

  #[test]
  fn project_options_label_number_and_name(
  ) {
    let mut state = AppState::new();
    state.apply(AppAction::ProjectsLoaded(
      vec![project("P-1", "Tower A")]
    ));
    assert_eq!(
      state.project_options(),
      vec![(
        "P-1".to_string(),
        "P-1 - Tower A".to_string()
      )]
    );
  }

  #[test]
  fn blank_selection_clears_project() {
    let mut state = AppState::new();
    state.apply(AppAction::SelectProject(
      Some("P-9".to_string())
    ));
    state.apply(AppAction::SelectProject(
      Some(String::new())
    ));
    assert_eq!(
      state.selected_project(),
      None
    );
  }

  #[test]
  fn session_scope_outlives_tab_switches(
  ) {
    let mut state = AppState::new();
    let first_tab =
      state.tabs().current().scope;
    state.apply(AppAction::SwitchTab(
      Tab::Notes
    ));
    assert!(first_tab.is_aborted());
    assert!(
      !state.session_scope().is_aborted()
    );
  }

  #[test]
  fn theme_keys() {
    assert_eq!(
      Theme::from_key("DARK"),
      Theme::Dark
    );
    assert_eq!(
      Theme::from_key("sepia"),
      Theme::Light
    );
  }
}
