use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vocab_config::Config;

mod commands;
mod exit;
mod output;
mod state;

use self::exit::CliExitCode;
use self::state::AppState;

/// English vocabulary lookup with dictionary, collocation and translation enrichment
#[derive(Parser)]
#[command(name = "vocab", version, propagate_version = true)]
struct Cli {
    /// JSON profile to load instead of environment variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up a word; only the first token of the query is used
    Lookup {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Local data only, no synonyms, derived forms or translations
        #[arg(long)]
        fast: bool,

        /// Print the fast record first, then the full one
        #[arg(long, conflicts_with = "fast")]
        stream: bool,

        /// Ignore the word cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Show the current user's history
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Add a word to the current user's favorites, or remove it
    Favorite { word: String },
    /// Show the current user's favorites
    Favorites {
        #[arg(long)]
        clear: bool,
    },
    /// Word cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// User profiles
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Drop every cached record
    Clear,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Add a user and switch to it
    Add {
        name: String,
        /// 初中, 高中 or 其他 (junior, senior, other)
        #[arg(long, default_value = "其他")]
        role: String,
    },
    List,
    Switch { id: String },
    Remove { id: String },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env first so RUST_LOG and credentials can live there
    dotenvy::dotenv().ok();
    init_tracing(cli.log_json);

    let outcome = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            Ok(CliExitCode::Interrupted)
        }
    };

    match outcome {
        Ok(code) => code.into(),
        Err(e) => {
            tracing::error!("{:#}", e);
            CliExitCode::Internal.into()
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<CliExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::new(),
    };

    let mut state = AppState::new(config)?;
    commands::dispatch(&mut state, cli.command).await
}
