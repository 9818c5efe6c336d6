//! Header buttons and the startup
//! sequence.

use pmdash_shared::{
  ProjectDto,
  ProjectFilters
};
use tracing::{
  error,
  info
};

use crate::api::{
  ApiClient,
  HttpBackend
};
use crate::error::{
  Failure,
  FailureExt
};
use crate::presenter::Notice;
use crate::views::Listing;
use crate::views::projects::{
  self,
  ProjectRow
};
use crate::state::{
  AppAction,
  AppState,
  Settings
};

pub const SEARCH_PROMPT: &str =
  "Search projects:";

pub fn notifications_notice() -> Notice {
  Notice::info("No new notifications")
}

pub fn tts_notice() -> Notice {
  Notice::info("Text-to-Speech ready")
}

/// Header search. Only a search that
/// succeeds yields the action moving to the
/// projects tab; a failure toasts and the
/// current tab stays.
pub async fn search<B: HttpBackend>(
  client: &ApiClient<B>,
  term: &str
) -> Result<
  (Listing<ProjectRow>, AppAction),
  Failure
> {
  let listing =
    projects::search(client, term).await?;
  Ok((
    listing,
    AppAction::SearchProjects(
      term.to_string()
    )
  ))
}

/// Applies the settings form to the state;
/// the theme takes effect on next render.
pub fn save_settings(
  state: &mut AppState,
  settings: Settings
) -> Notice {
  info!(theme = settings.theme.as_key(), "settings saved");
  state.apply(AppAction::SaveSettings(
    settings
  ));
  Notice::success(
    "Settings saved successfully"
  )
}

/// Health check, then the project list
/// that feeds every project selector.
///
/// An unreachable backend stops startup
/// with a toast. A failed project read is
/// only logged and leaves the selectors
/// empty.
#[tracing::instrument(skip(client))]
pub async fn startup<B: HttpBackend>(
  client: &ApiClient<B>
) -> Result<Vec<ProjectDto>, Failure> {
  let health = client
    .health()
    .await
    .or_toast("Failed to connect to API")?;
  info!(
    status = %health.status,
    version = health.version.as_deref().unwrap_or("unknown"),
    "API status"
  );

  match client
    .projects(&ProjectFilters::default())
    .await
  {
    | Ok(projects) => Ok(projects),
    | Err(err) => {
      error!(error = %err, "failed to load projects");
      Ok(Vec::new())
    }
  }
}
