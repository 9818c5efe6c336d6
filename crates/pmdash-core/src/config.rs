use serde::{
  Deserialize,
  Serialize
};
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str =
  "http://127.0.0.1:8000/api";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct DashboardConfig {
  /// REST root, including the `/api`
  /// prefix.
  pub api_base:         String,
  /// Rows in the dashboard's "Recent
  /// Projects" widget.
  pub recent_projects:  usize,
  /// Shortest search term that triggers
  /// a backend search while typing.
  pub search_min_chars: usize
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      api_base:         DEFAULT_API_BASE
        .to_string(),
      recent_projects:  5,
      search_min_chars: 3
    }
  }
}

impl DashboardConfig {
  pub fn from_toml_str(
    text: &str
  ) -> Result<Self, ConfigError> {
    let cfg: DashboardConfig =
      toml::from_str(text)?;
    cfg.validated()
  }

  pub fn with_api_base(
    mut self,
    base: impl Into<String>
  ) -> Result<Self, ConfigError> {
    self.api_base = base.into();
    self.validated()
  }

  fn validated(
    mut self
  ) -> Result<Self, ConfigError> {
    let trimmed = self
      .api_base
      .trim()
      .trim_end_matches('/')
      .to_string();
    if !(trimmed.starts_with("http://")
      || trimmed.starts_with("https://"))
    {
      return Err(
        ConfigError::InvalidBase(
          self.api_base
        )
      );
    }
    debug!(api_base = %trimmed, "resolved api base");
    self.api_base = trimmed;
    Ok(self)
  }

  /// Server root that hosts `/health`:
  /// the API base without its `/api`
  /// suffix.
  pub fn server_root(&self) -> &str {
    self
      .api_base
      .strip_suffix("/api")
      .unwrap_or(&self.api_base)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_point_at_local_backend() {
    let cfg = DashboardConfig::default();
    assert_eq!(
      cfg.api_base,
      "http://127.0.0.1:8000/api"
    );
    assert_eq!(
      cfg.server_root(),
      "http://127.0.0.1:8000"
    );
    assert_eq!(cfg.recent_projects, 5);
  }

  #[test]
  fn partial_toml_keeps_defaults() {
    let cfg = DashboardConfig::from_toml_str(
      "api_base = \
       \"https://pm.example.com/api/\"\n"
    )
    .expect("parse config");
    assert_eq!(
      cfg.api_base,
      "https://pm.example.com/api"
    );
    assert_eq!(cfg.search_min_chars, 3);
  }

  #[test]
  fn rejects_non_http_base() {
    let err = DashboardConfig::default()
      .with_api_base("ftp://pm/api")
      .expect_err("ftp is rejected");
    assert!(matches!(
      err,
      ConfigError::InvalidBase(_)
    ));
  }

  #[test]
  fn base_without_api_suffix_is_its_own_root(
  ) {
    let cfg = DashboardConfig::default()
      .with_api_base(
        "http://10.0.0.5:9000"
      )
      .expect("valid base");
    assert_eq!(
      cfg.server_root(),
      "http://10.0.0.5:9000"
    );
  }
}
