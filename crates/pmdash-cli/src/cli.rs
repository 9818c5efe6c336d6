use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pmdash",
    version,
    about = "Terminal client for the project dashboard API"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// REST base URL, `/api` suffix included.
    #[arg(long = "api", env = "PMDASH_API_BASE", global = true)]
    pub api: Option<String>,

    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long = "timeout", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check that the backend is up.
    Health,
    /// Headline numbers and the most recent projects.
    Dashboard,
    /// List projects, optionally filtered or searched.
    Projects {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Project details and metrics.
    Project { number: String },
    /// Task board.
    Tasks {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Notes of one project.
    Notes { project: String },
    /// Report history.
    Reports,
    /// Generate a report and save it to disk.
    GenerateReport {
        #[arg(long = "type", default_value = "project_summary")]
        report_type: String,
        #[arg(long, default_value = "PDF")]
        format: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Gantt rows of a project, or its critical path.
    Gantt {
        number: String,
        #[arg(long = "critical-path")]
        critical_path: bool,
    },
    /// Delay prediction and risk classification.
    Predict { number: String },
    /// Deployed model descriptions and training history.
    ModelInfo,
    /// Retrain the ML models.
    Retrain {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_report_flags() {
        let cli = GlobalCli::parse_from([
            "pmdash",
            "generate-report",
            "--type",
            "ccr_analysis",
            "--format",
            "Excel",
            "--project",
            "P-4",
        ]);
        assert_eq!(
            cli.command,
            Command::GenerateReport {
                report_type: "ccr_analysis".to_string(),
                format: "Excel".to_string(),
                project: Some("P-4".to_string()),
                output: None,
            }
        );
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = GlobalCli::parse_from(["pmdash", "gantt", "P-1", "--critical-path", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Command::Gantt {
                number: "P-1".to_string(),
                critical_path: true,
            }
        );
    }
}
