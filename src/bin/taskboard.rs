//! Command-line front end for a remote kanban board.
//!
//! Usage:
//!
//! ```text
//! taskboard [--url URL] [--collection NAME] [--sort MODE] <command>
//! ```
//!
//! Each invocation loads the board, dispatches at most one intent and prints
//! the three lanes. For example:
//!
//! ```text
//! taskboard add "Write release notes"
//! taskboard move 3 forward
//! taskboard --sort descending list
//! ```

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use taskboard::{
    board::{
        adapters::http::HttpTaskRemote,
        domain::{Direction, TaskDomainError, TaskId},
        ports::TaskRemoteError,
        services::{BoardError, BoardIntent, BoardService, BoardView, Outcome},
    },
    config::{BoardConfig, ConfigArgs, ConfigError},
    telemetry::{TelemetryError, init_logging},
};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about = "Kanban board client for a JSON task collection")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the board.
    List,
    /// Create a task.
    Add {
        /// Task text.
        text: String,
    },
    /// Replace the text of a task. Empty text reloads the board instead.
    Edit {
        /// Task identifier.
        id: String,
        /// New task text.
        text: String,
    },
    /// Move a task one lane forward or backward.
    Move {
        /// Task identifier.
        id: String,
        /// `forward` or `backward`.
        direction: String,
    },
    /// Delete a task.
    Rm {
        /// Task identifier.
        id: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Remote(#[from] TaskRemoteError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Command {
    fn into_intent(self) -> Result<Option<BoardIntent>, TaskDomainError> {
        Ok(match self {
            Self::List => None,
            Self::Add { text } => Some(BoardIntent::CreateRequested(text)),
            Self::Edit { id, text } => Some(BoardIntent::EditCommitted(TaskId::from(id), text)),
            Self::Move { id, direction } => Some(BoardIntent::MoveRequested(
                TaskId::from(id),
                Direction::try_from(direction.as_str())?,
            )),
            Self::Rm { id } => Some(BoardIntent::DeleteRequested(TaskId::from(id))),
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = io::stderr().lock();
            let _ignored = writeln!(stderr, "taskboard: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = BoardConfig::load(&cli.config)?;
    init_logging(&config.log_level)?;
    tracing::debug!(url = %config.base_url, collection = %config.collection, "starting");

    let remote = HttpTaskRemote::new(&config.base_url, &config.collection)?;
    let board = BoardService::new(Arc::new(remote), Arc::new(DefaultClock))
        .with_sort_mode(config.sort_mode);
    board.refresh().await?;

    let mut stdout = io::stdout().lock();
    if let Some(intent) = cli.command.into_intent()? {
        let outcome = board.dispatch(intent).await?;
        if let Outcome::Skipped(reason) = outcome {
            writeln!(stdout, "nothing to do: {reason}")?;
        }
    }
    render(&mut stdout, &board.view())?;
    Ok(())
}

fn render(out: &mut impl Write, view: &BoardView) -> io::Result<()> {
    writeln!(out, "[{}]", view.sort_label)?;
    for (status, tasks) in view.lanes.iter() {
        writeln!(out, "{status} ({})", tasks.len())?;
        for task in tasks {
            writeln!(
                out,
                "  {:>6}  {}  {}",
                task.id(),
                task.created_at().format("%Y-%m-%d %H:%M"),
                task.text()
            )?;
        }
    }
    Ok(())
}
