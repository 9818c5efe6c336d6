use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pmdash_core::DashboardConfig;
use tracing::{debug, info};

pub const CONFIG_ENV: &str = "PMDASH_CONFIG";

/// `--config`, then `$PMDASH_CONFIG`, then `<config dir>/pmdash/config.toml`
/// when it exists.
pub fn resolve_path(path_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = path_override {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join("pmdash").join("config.toml"))
        .filter(|candidate| candidate.exists())
}

#[tracing::instrument]
pub fn load(
    path_override: Option<&Path>,
    api_override: Option<&str>,
) -> anyhow::Result<DashboardConfig> {
    let cfg = match resolve_path(path_override) {
        Some(path) => load_file(&path)?,
        None => {
            debug!("no config file, using defaults");
            DashboardConfig::default()
        }
    };

    match api_override {
        Some(base) => cfg
            .with_api_base(base)
            .with_context(|| format!("invalid --api / PMDASH_API_BASE value '{base}'")),
        None => Ok(cfg),
    }
}

fn load_file(path: &Path) -> anyhow::Result<DashboardConfig> {
    info!(config = %path.display(), "loading config");
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    DashboardConfig::from_toml_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}
