use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memberkit_application::ProfileUseCase;
use memberkit_core::Credential;
use memberkit_core::config::RootConfig;
use memberkit_infrastructure::{
    ConfigService, HttpIdentityTokenProvider, HttpProfileStore, SystemClipboard,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "memberkit")]
#[command(about = "memberkit - view and edit your member profile", long_about = None)]
struct Cli {
    /// Session bearer token
    #[arg(long = "token", env = "MEMBERKIT_TOKEN", hide_env_values = true)]
    credential: String,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and print the profile
    Show {
        /// Wait for the identity token before printing
        #[arg(long)]
        wait_token: bool,
        /// Print the view snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change profile fields and save them
    Edit {
        /// Field assignment, e.g. `--set phone=555` (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true, value_parser = commands::edit::parse_assignment)]
        assignments: Vec<(String, String)>,
    },
    /// Print the member identity code value
    Token {
        /// Also copy it to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

/// Used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn,memberkit_application=info,memberkit_infrastructure=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<RootConfig> {
    let service = match path {
        Some(path) => ConfigService::new(path),
        None => ConfigService::new_default().context("Failed to resolve config path")?,
    };
    service
        .load()
        .with_context(|| format!("Failed to load {}", service.config_path().display()))
}

fn build_usecase(config: &RootConfig, clipboard: SystemClipboard) -> Result<ProfileUseCase> {
    let store = HttpProfileStore::new(&config.service).context("Failed to create profile store")?;
    let provider = HttpIdentityTokenProvider::new(&config.service)
        .context("Failed to create token provider")?;

    Ok(ProfileUseCase::new(
        Arc::new(store),
        Arc::new(provider),
        Arc::new(clipboard),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config)?;
    tracing::debug!("Using profile API at {}", config.service.api_base_url);
    // The process exits right after copying
    let clipboard = SystemClipboard::waiting();
    let usecase = build_usecase(&config, clipboard)?;
    let credential = Credential::bearer(cli.credential);
    anyhow::ensure!(!credential.is_empty(), "Session token must not be empty");

    match cli.command {
        Commands::Show { wait_token, json } => {
            commands::show::run(&usecase, &credential, wait_token, json).await?
        }
        Commands::Edit { assignments } => {
            commands::edit::run(&usecase, &credential, &assignments).await?
        }
        Commands::Token { copy } => {
            let copy = copy.then(|| commands::token::CopyMode {
                holds_clipboard: clipboard.waits_for_handoff(),
            });
            commands::token::run(&usecase, &credential, copy).await?
        }
    }

    Ok(())
}
