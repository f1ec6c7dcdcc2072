//! # hostelcare
//!
//! Command-line front-end for the HostelCare complaint tracker.
//!
//! Each subcommand maps to one screen action of the mobile app: students
//! sign up, file, upvote and comment on complaints; wardens list, assign and
//! resolve them and look at the insight reports. State lives in a local
//! SQLite file (or in memory with `--in-memory`).

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hostelcare_shared::HostelError;
use hostelcare_store::{KeyValueStore, MemoryStore, Repository, RepositoryConfig, SqliteStore};

use crate::commands::Command;
use crate::config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "hostelcare", version, about = "Hostel complaint tracker")]
struct Cli {
    /// SQLite database file (overrides HOSTELCARE_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Keep all data in memory for this run only.
    #[arg(long, global = true)]
    in_memory: bool,

    /// Accept any warden credentials (demo mode, no real authentication).
    #[arg(long, global = true)]
    demo_warden_login: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so command output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,hostelcare=info,hostelcare_store=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<HostelError>() {
                Some(err) => {
                    debug!(error = %err, "command failed");
                    eprintln!("error: {}", err.user_message());
                }
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CliConfig::from_env();
    if let Some(path) = cli.db {
        config.db_path = Some(path);
    }
    config.in_memory |= cli.in_memory;
    config.demo_warden_login |= cli.demo_warden_login;
    debug!(?config, "Loaded configuration");

    let backend: Arc<dyn KeyValueStore> = if config.in_memory {
        info!("using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        match &config.db_path {
            Some(path) => Arc::new(SqliteStore::open_at(path)?),
            None => Arc::new(SqliteStore::new()?),
        }
    };

    let repo = Repository::new(
        backend,
        RepositoryConfig {
            demo_warden_login: config.demo_warden_login,
        },
    );

    if !config.skip_seed {
        repo.seed().await?;
    }

    commands::execute(&repo, cli.command, cli.json).await
}
