use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{Local, Utc};
use pmdash_core::views::projects::SearchAction;
use pmdash_core::views::{dashboard, gantt, ml, notes, projects, reports, tasks};
use pmdash_core::{ApiClient, DashboardConfig, HttpBackend};
use pmdash_shared::{TaskFilters, TaskStatus};
use tracing::{debug, info};

use crate::cli::Command;
use crate::render::Renderer;

pub async fn dispatch<B: HttpBackend>(
    client: &ApiClient<B>,
    cfg: &DashboardConfig,
    renderer: &Renderer,
    command: Command,
) -> anyhow::Result<()> {
    debug!(?command, "dispatching");
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Health => {
            let health = client.health().await.context("backend health check failed")?;
            renderer.health(&mut out, &health)?;
        }
        Command::Dashboard => {
            let view = dashboard::load(client, cfg.recent_projects).await?;
            renderer.dashboard(&mut out, &view)?;
        }
        Command::Projects { status, search } => {
            let listing = match search {
                Some(term) => match projects::search_action(term.trim(), cfg.search_min_chars) {
                    SearchAction::Search(term) => projects::search(client, &term).await?,
                    SearchAction::Reload => {
                        projects::load(client, &projects::status_filter("")).await?
                    }
                    SearchAction::Ignore => bail!(
                        "search term needs at least {} characters",
                        cfg.search_min_chars
                    ),
                },
                None => {
                    let filters = projects::status_filter(status.as_deref().unwrap_or(""));
                    projects::load(client, &filters).await?
                }
            };
            renderer.projects(&mut out, &listing)?;
        }
        Command::Project { number } => {
            let details = projects::details(client, &number).await?;
            renderer.project_details(&mut out, &details)?;
        }
        Command::Tasks { project, status } => {
            let filters = TaskFilters {
                project_number: project.filter(|p| !p.is_empty()),
                status: status.as_deref().map(TaskStatus::from_label),
            };
            let board = tasks::load(client, &filters).await?;
            renderer.task_board(&mut out, &board)?;
        }
        Command::Notes { project } => {
            let view = notes::load(client, Some(&project)).await?;
            renderer.notes(&mut out, &view)?;
        }
        Command::Reports => {
            let history = reports::history(client).await?;
            renderer.reports(&mut out, &history)?;
        }
        Command::GenerateReport {
            report_type,
            format,
            project,
            output,
        } => {
            renderer.notice(&reports::generating_notice());
            let (report, notice) = reports::generate(
                client,
                &report_type,
                &format,
                project.as_deref(),
                Utc::now().timestamp_millis(),
            )
            .await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&report.file_name));
            fs::write(&path, &report.bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), mime = report.mime_type, "report saved");
            renderer.notice(&notice);
            writeln!(out, "{}", path.display())?;
        }
        Command::Gantt {
            number,
            critical_path,
        } => {
            if critical_path {
                let path = gantt::critical_path(client, Some(&number)).await?;
                renderer.critical_path(&mut out, &path)?;
            } else {
                let today = Local::now().date_naive();
                let (view, notice) = gantt::load(client, &number, today).await?;
                renderer.notice(&notice);
                renderer.gantt(&mut out, &view)?;
            }
        }
        Command::Predict { number } => {
            let insights = ml::predict(client, Some(&number)).await?;
            renderer.insights(&mut out, &insights)?;
        }
        Command::ModelInfo => {
            let info = ml::model_info(client).await?;
            renderer.model_info(&mut out, &(&info).into())?;
        }
        Command::Retrain { yes } => {
            let confirm = |prompt: &str| {
                let accepted = yes || ask(prompt);
                if accepted {
                    renderer.notice(&ml::retraining_notice());
                }
                accepted
            };
            let Some((result, notice)) = ml::retrain(client, confirm).await? else {
                info!("retrain declined");
                return Ok(());
            };
            renderer.notice(&notice);
            renderer.training(&mut out, &(&result).into())?;
        }
    }

    out.flush()?;
    Ok(())
}

/// y/N prompt on stderr. Anything but `y` or `yes` declines.
fn ask(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
