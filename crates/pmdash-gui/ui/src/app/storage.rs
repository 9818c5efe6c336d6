use pmdash_core::DashboardConfig;

const API_BASE_STORAGE_KEY: &str =
  "pmdash.api_base";

fn stored_api_base() -> Option<String> {
  web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .and_then(|storage| {
      storage
        .get_item(API_BASE_STORAGE_KEY)
        .ok()
        .flatten()
    })
    .filter(|base| !base.trim().is_empty())
}

/// Defaults, with the API base taken from
/// localStorage when a valid one is set.
pub fn load_config() -> DashboardConfig {
  let defaults = DashboardConfig::default();
  let Some(base) = stored_api_base() else {
    return defaults;
  };

  match defaults.clone().with_api_base(base) {
    | Ok(cfg) => {
      tracing::info!(api_base = %cfg.api_base, "using stored API base");
      cfg
    }
    | Err(err) => {
      tracing::warn!(error = %err, "ignoring stored API base");
      defaults
    }
  }
}
