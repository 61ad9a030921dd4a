mod commands;

use clap::{Parser, Subcommand};
use commands::Session;
use kndeploy_core::Transcript;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(
    name = "kndeploy",
    about = "Build a container image from a project folder and deploy it as a Knative service"
)]
#[command(version)]
struct Cli {
    /// Project root to build and deploy from
    #[arg(long, short = 'C', global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Show debug output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, push, and deploy the project as a Knative service
    Deploy {
        /// Registry to push to, e.g. docker.io/acme (prompted when omitted)
        #[arg(long)]
        registry: Option<String>,
        /// Image name (prompted when omitted)
        #[arg(long)]
        image: Option<String>,
    },
    /// Show a deployed service
    Describe {
        /// Service name (prompted when omitted)
        name: Option<String>,
    },
    /// List deployed services
    List,
    /// Delete a deployed service
    Delete {
        /// Service name (prompted when omitted)
        name: Option<String>,
    },
    /// Check that kndeploy itself runs; touches nothing
    Ping,
    /// Scaffold a sample Python app that deploys as-is
    New {
        /// Directory to create
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("interrupted — stopping the running command");
                watcher.cancel();
            }
            Err(e) => tracing::debug!(error = %e, "ctrl-c handler unavailable"),
        }
    });

    let open = || Session::open(&cli.project_dir, cancel.clone());

    match cli.command {
        Commands::Deploy { registry, image } => {
            let session = open()?;
            session.report(commands::deploy(&session, registry, image).await)
        }
        Commands::Describe { name } => {
            let session = open()?;
            session.report(commands::describe(&session, name).await)
        }
        Commands::List => {
            let session = open()?;
            session.report(commands::list(&session).await)
        }
        Commands::Delete { name } => {
            let session = open()?;
            session.report(commands::delete(&session, name).await)
        }
        // Needs no project, so a broken config cannot fail it.
        Commands::Ping => commands::ping(&Transcript::new()),
        Commands::New { dir } => commands::new_project(&dir),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
