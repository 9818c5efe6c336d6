use pmdash_shared::{
  ProjectDto,
  ProjectFilters
};

use crate::api::{
  ApiClient,
  HttpBackend
};
use crate::error::{
  Failure,
  FailureExt
};
use crate::format::format_currency;
use crate::tabs::Tab;

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
  pub value:    String,
  pub label:    &'static str,
  /// Inline background override; the
  /// first card keeps the stylesheet's.
  pub gradient: Option<&'static str>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentProject {
  pub name:   String,
  pub number: String
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct QuickAction {
  pub label: &'static str,
  pub tab:   Tab
}

pub const QUICK_ACTIONS: [QuickAction; 3] = [
  QuickAction {
    label: "Generate Report",
    tab:   Tab::Reports
  },
  QuickAction {
    label: "View Tasks",
    tab:   Tab::Tasks
  },
  QuickAction {
    label: "ML Insights",
    tab:   Tab::Ml
  }
];

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
  pub active:       usize,
  pub completed:    usize,
  pub total_budget: f64,
  pub recent:       Vec<RecentProject>
}

impl DashboardView {
  pub fn from_projects(
    projects: &[ProjectDto],
    recent_limit: usize
  ) -> Self {
    let with_status = |status: &str| {
      projects
        .iter()
        .filter(|p| {
          p.project_status.as_deref()
            == Some(status)
        })
        .count()
    };

    Self {
      active:       with_status("ACTIVE"),
      completed:    with_status("COMPLETED"),
      total_budget: projects
        .iter()
        .map(|p| p.budget.unwrap_or(0.0))
        .sum(),
      recent:       projects
        .iter()
        .take(recent_limit)
        .map(|p| RecentProject {
          name:   p.project_name.clone(),
          number: p.project_number.clone()
        })
        .collect()
    }
  }

  pub fn stat_cards(&self) -> [StatCard; 3] {
    [
      StatCard {
        value:    self.active.to_string(),
        label:    "Active Projects",
        gradient: None
      },
      StatCard {
        value:    self
          .completed
          .to_string(),
        label:    "Completed Projects",
        gradient: Some(
          "linear-gradient(to bottom right, \
           #3b82f6, #1d4ed8)"
        )
      },
      StatCard {
        value:    format_currency(
          self.total_budget
        ),
        label:    "Total Budget",
        gradient: Some(
          "linear-gradient(to bottom right, \
           #10b981, #047857)"
        )
      }
    ]
  }
}

/// Dashboard failures are only logged.
#[tracing::instrument(skip(client))]
pub async fn load<B: HttpBackend>(
  client: &ApiClient<B>,
  recent_limit: usize
) -> Result<DashboardView, Failure> {
  let projects = client
    .projects(&ProjectFilters::default())
    .await
    .or_log("Failed to load dashboard")?;
  Ok(DashboardView::from_projects(
    &projects,
    recent_limit
  ))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn projects() -> Vec<ProjectDto> {
    serde_json::from_value(json!([
      {"PROJECT_NUMBER": "P1", "PROJECT_NAME": "North", "PROJECT_STATUS": "ACTIVE", "BUDGET": 1000.0},
      {"PROJECT_NUMBER": "P2", "PROJECT_NAME": "South", "PROJECT_STATUS": "COMPLETED", "BUDGET": 234.5},
      {"PROJECT_NUMBER": "P3", "PROJECT_NAME": "East", "PROJECT_STATUS": "ACTIVE"},
      {"PROJECT_NUMBER": "P4", "PROJECT_NAME": "West", "PROJECT_STATUS": "ON_HOLD"},
      {"PROJECT_NUMBER": "P5", "PROJECT_NAME": "Core"},
      {"PROJECT_NUMBER": "P6", "PROJECT_NAME": "Edge"}
    ]))
    .expect("fixture")
  }

  #[test]
  fn counts_and_budget_total() {
    let view = DashboardView::from_projects(
      &projects(),
      5
    );
    assert_eq!(view.active, 2);
    assert_eq!(view.completed, 1);
    let cards = view.stat_cards();
    assert_eq!(cards[0].value, "2");
    assert_eq!(cards[1].value, "1");
    assert_eq!(cards[2].value, "$1,234.50");
  }

  #[test]
  fn recent_is_capped() {
    let view = DashboardView::from_projects(
      &projects(),
      5
    );
    assert_eq!(view.recent.len(), 5);
    assert_eq!(view.recent[0].number, "P1");
    assert_eq!(view.recent[4].name, "Core");
  }

  #[test]
  fn empty_list_renders_zeroes() {
    let view =
      DashboardView::from_projects(&[], 5);
    assert_eq!(
      view.stat_cards()[2].value,
      "$0.00"
    );
    assert!(view.recent.is_empty());
  }
}
