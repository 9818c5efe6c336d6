use tracing::debug;

use super::Listing;
use super::dashboard::DashboardView;
use super::gantt::GanttView;
use super::ml::MlInsights;
use super::notes::NotesView;
use super::projects::ProjectRow;
use super::reports::ReportRow;
use super::tasks::BoardColumn;

/// What each tab panel last loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panels {
  pub dashboard: Option<DashboardView>,
  pub projects:  Option<Listing<ProjectRow>>,
  pub gantt:     Option<GanttView>,
  pub reports:   Option<Listing<ReportRow>>,
  pub tasks:     Option<Listing<BoardColumn>>,
  pub notes:     Option<NotesView>,
  pub ml:        Option<MlInsights>
}

impl Panels {
  /// Drops the views drawn for one
  /// project. Called whenever the selected
  /// project changes or one of those views
  /// starts loading, so a failed load never
  /// leaves another project's data on
  /// screen.
  pub fn forget_project(&mut self) {
    debug!("clearing project panels");
    self.gantt = None;
    self.notes = None;
    self.ml = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn forgetting_a_project_keeps_global_panels(
  ) {
    let mut panels = Panels {
      projects: Some(Listing::Empty(
        "No projects found"
      )),
      notes: Some(NotesView::Placeholder),
      ..Panels::default()
    };
    panels.forget_project();
    assert_eq!(panels.notes, None);
    assert_eq!(panels.gantt, None);
    assert_eq!(panels.ml, None);
    assert!(panels.projects.is_some());
  }
}
