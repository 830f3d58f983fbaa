//! `kabaddi` - command-line front end for the kabaddi organizer.
//!
//! All data lives as JSON files in one data directory (see [`config`]). Each
//! invocation opens the directory, performs one intent through
//! [`kabaddi_store::Organizer`] and prints the outcome.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kabaddi_store::{FileStore, Organizer, StorageHelper};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "kabaddi",
    version,
    about = "Organize kabaddi teams, matches and tournaments"
)]
struct Cli {
    /// Act as this user (defaults to KABADDI_USER, then "current-user").
    #[arg(long, global = true)]
    user: Option<String>,

    /// Data directory (defaults to KABADDI_DATA_DIR, then ~/.config/kabaddi/data).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print records as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage teams and their rosters.
    Team {
        #[command(subcommand)]
        action: commands::team::TeamAction,
    },
    /// Schedule, play and score matches.
    Match {
        #[command(subcommand)]
        action: commands::matches::MatchAction,
    },
    /// Manage tournaments.
    Tournament {
        #[command(subcommand)]
        action: commands::tournament::TournamentAction,
    },
    /// Browse playing grounds.
    Ground {
        #[command(subcommand)]
        action: commands::ground::GroundAction,
    },
    /// Write the sample teams, matches and grounds into the data directory.
    Seed {
        /// Overwrite collections that already exist.
        #[arg(short, long)]
        force: bool,
    },
}

/// Set up tracing. Logs go to stderr unless `KABADDI_LOG_DIR` names a
/// directory for daily log files; the returned guard must outlive `main`.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match config::log_dir() {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "kabaddi");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(true),
                )
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_tracing();
    let cli = Cli::parse();

    let data_dir = config::data_dir(cli.data_dir.as_deref());
    let user_id = config::user_id(cli.user.as_deref());
    tracing::debug!(data_dir = %data_dir.display(), user = %user_id, "Opening data directory");

    let store = FileStore::new(data_dir);
    store.ensure_dir()?;
    let ctx = commands::Context::new(Organizer::new(StorageHelper::new(store), user_id), cli.json);

    match cli.command {
        Commands::Team { action } => commands::team::run(&ctx, action).await,
        Commands::Match { action } => commands::matches::run(&ctx, action).await,
        Commands::Tournament { action } => commands::tournament::run(&ctx, action).await,
        Commands::Ground { action } => commands::ground::run(&ctx, action).await,
        Commands::Seed { force } => commands::seed(&ctx, force).await,
    }
}
