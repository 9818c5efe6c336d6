use pmdash_shared::{
  ProjectDto,
  ProjectFilters,
  ProjectMetrics
};
use tracing::debug;

use super::Listing;
use crate::api::{
  ApiClient,
  HttpBackend
};
use crate::badges::{
  Badge,
  project_status_badge
};
use crate::error::{
  Failure,
  FailureExt
};
use crate::format::{
  NOT_AVAILABLE,
  format_currency,
  format_date,
  or_not_available
};

pub const NO_PROJECTS: &str =
  "No projects found";

pub const STATUS_FILTERS: [(&str, &str); 4] = [
  ("", "All Statuses"),
  ("ACTIVE", "Active"),
  ("COMPLETED", "Completed"),
  ("ON_HOLD", "On Hold")
];

pub const COLUMNS: [&str; 8] = [
  "Project Number",
  "Project Name",
  "PM Name",
  "Status",
  "Budget",
  "Start Date",
  "End Date",
  "Actions"
];

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
  pub number:       String,
  pub name:         String,
  pub pm_name:      String,
  pub status_label: String,
  pub status_badge: Badge,
  pub budget:       String,
  pub start_date:   String,
  pub end_date:     String
}

impl From<&ProjectDto> for ProjectRow {
  fn from(project: &ProjectDto) -> Self {
    Self {
      number:       project
        .project_number
        .clone(),
      name:         project
        .project_name
        .clone(),
      pm_name:      or_not_available(
        project.pm_name.as_deref()
      ),
      status_label: or_not_available(
        project.project_status.as_deref()
      ),
      status_badge: project_status_badge(
        project.project_status.as_deref()
      ),
      budget:       format_currency(
        project.budget.unwrap_or(0.0)
      ),
      start_date:   format_date(
        project.start_date.as_deref()
      ),
      end_date:     format_date(
        project.end_date.as_deref()
      )
    }
  }
}

pub fn rows(
  projects: &[ProjectDto]
) -> Listing<ProjectRow> {
  Listing::from_items(
    projects.iter().map(ProjectRow::from).collect(),
    NO_PROJECTS
  )
}

/// What typing into the search box does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
  Search(String),
  Reload,
  Ignore
}

/// Long enough terms search, an emptied
/// box reloads the full list, anything in
/// between waits for more input.
pub fn search_action(
  term: &str,
  min_chars: usize
) -> SearchAction {
  match term.chars().count() {
    | 0 => SearchAction::Reload,
    | n if n >= min_chars => {
      SearchAction::Search(term.to_string())
    }
    | _ => SearchAction::Ignore
  }
}

pub fn status_filter(
  status: &str
) -> ProjectFilters {
  ProjectFilters {
    status: Some(status.to_string())
      .filter(|s| !s.is_empty()),
    ..ProjectFilters::default()
  }
}

pub async fn load<B: HttpBackend>(
  client: &ApiClient<B>,
  filters: &ProjectFilters
) -> Result<Listing<ProjectRow>, Failure> {
  let projects = client
    .projects(filters)
    .await
    .or_toast("Failed to load projects")?;
  debug!(count = projects.len(), "projects loaded");
  Ok(rows(&projects))
}

pub async fn search<B: HttpBackend>(
  client: &ApiClient<B>,
  term: &str
) -> Result<Listing<ProjectRow>, Failure> {
  let projects = client
    .search_projects(term)
    .await
    .or_toast("Search failed")?;
  Ok(rows(&projects))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
  pub number:          String,
  pub name:            String,
  pub pm_name:         String,
  pub status_label:    String,
  pub status_badge:    Badge,
  pub budget:          String,
  pub actual_cost:     String,
  pub budget_variance: String,
  pub region:          String,
  pub ccrs:            String,
  pub orders:          String,
  pub estimated_hours: String,
  pub actual_hours:    String
}

impl ProjectDetails {
  pub fn new(
    project: &ProjectDto,
    metrics: &ProjectMetrics
  ) -> Self {
    Self {
      number:          project
        .project_number
        .clone(),
      name:            project
        .project_name
        .clone(),
      pm_name:         or_not_available(
        project.pm_name.as_deref()
      ),
      status_label:    project
        .project_status
        .clone()
        .unwrap_or_else(|| {
          NOT_AVAILABLE.to_string()
        }),
      status_badge:    project_status_badge(
        project.project_status.as_deref()
      ),
      budget:          format_currency(
        project.budget.unwrap_or(0.0)
      ),
      actual_cost:     format_currency(
        project.actual_cost.unwrap_or(0.0)
      ),
      budget_variance: format_currency(
        metrics.budget_variance
      ),
      region:          or_not_available(
        project.region.as_deref()
      ),
      ccrs:            format!(
        "{} / {}",
        metrics.completed_ccrs,
        metrics.total_ccrs
      ),
      orders:          format!(
        "{} / {}",
        metrics.completed_orders,
        metrics.total_orders
      ),
      estimated_hours: metrics
        .estimated_hours
        .to_string(),
      actual_hours:    metrics
        .actual_hours
        .to_string()
    }
  }
}

/// Project first, then its metrics; both
/// must succeed.
#[tracing::instrument(skip(client))]
pub async fn details<B: HttpBackend>(
  client: &ApiClient<B>,
  number: &str
) -> Result<ProjectDetails, Failure> {
  let project = client
    .project(number)
    .await
    .or_toast(
      "Failed to load project details"
    )?;
  let metrics = client
    .project_metrics(number)
    .await
    .or_toast(
      "Failed to load project details"
    )?;
  Ok(ProjectDetails::new(&project, &metrics))
}
