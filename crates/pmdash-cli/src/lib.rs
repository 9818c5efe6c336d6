pub mod cli;
pub mod commands;
pub mod config;
pub mod http;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use pmdash_core::ApiClient;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting pmdash CLI"
  );

  let cfg = config::load(
    cli.config.as_deref(),
    cli.api.as_deref()
  )?;
  debug!(api_base = %cfg.api_base, "configuration resolved");

  let backend =
    http::ReqwestBackend::new(
      cli.timeout_secs
    )?;
  let client =
    ApiClient::new(backend, &cfg);
  let renderer =
    render::Renderer::new(!cli.no_color);

  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context(
        "failed to start async runtime"
      )?;

  runtime.block_on(commands::dispatch(
    &client,
    &cfg,
    &renderer,
    cli.command
  ))?;

  info!("done");
  Ok(())
}
