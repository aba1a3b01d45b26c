//! gitcredits command-line tool.
//!
//! Dumps a markdown credits listing of a repository's GitHub contributors,
//! and provides helpers for generating / validating the configuration file
//! and installing git hooks.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gitcredits_core::config::AppConfig;
use gitcredits_core::engine::CreditsEngine;
use gitcredits_core::github::GitHubClient;
use gitcredits_core::hooks;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// gitcredits command-line tool.
#[derive(Parser, Debug)]
#[command(
    name = "gitcredits",
    version,
    about = "Dump a repository's GitHub contributor credits as markdown"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        short,
        long,
        global = true,
        default_value = "~/.config/gitcredits/config.toml"
    )]
    config: String,

    /// Override the log level from the config file (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch all contributors and write the credits listing to stdout.
    Dump,

    /// Generate a default configuration file.
    Init {
        /// Output path for the generated config file.
        #[arg(short, long, default_value = "./gitcredits.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file.
    Validate,

    /// Manage git hooks.
    Hooks {
        #[command(subcommand)]
        action: HooksAction,
    },
}

#[derive(Subcommand, Debug)]
enum HooksAction {
    /// Copy hook scripts into the repository's .git/hooks directory.
    Install {
        /// Directory holding the hook scripts.
        #[arg(long, default_value = "tools/hooks")]
        source: PathBuf,

        /// Repository root.
        #[arg(long, default_value = ".")]
        repo: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Dump => cmd_dump(&cli.config, cli.log_level.as_deref()).await,
        Commands::Init { output } => {
            init_tracing("warn");
            cmd_init(&output)
        }
        Commands::Validate => {
            init_tracing("warn");
            cmd_validate(&cli.config)
        }
        Commands::Hooks { action } => {
            init_tracing("warn");
            match action {
                HooksAction::Install { source, repo } => cmd_hooks_install(&source, &repo),
            }
        }
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so the credits
/// listing on stdout stays clean.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

async fn cmd_dump(config_path: &str, log_level: Option<&str>) -> Result<()> {
    let mut config = AppConfig::load_and_validate(expand_tilde(config_path))
        .context("failed to load configuration file")?;
    config.github.token_file = expand_tilde(&config.github.token_file);

    let level = log_level.unwrap_or(&config.log.level).to_string();
    init_tracing(&level);

    // Fatal: no network traffic without a credential.
    let token = config
        .read_token()
        .context("failed to read credential file")?;

    let client = GitHubClient::new(
        &config.github.api_url,
        &config.fetch.user_agent,
        config.fetch.per_page,
        token,
    );
    let engine = CreditsEngine::new(config, client);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = engine.run(&mut out).await;

    info!(
        contributors = summary.contributors_seen,
        lines = summary.lines_written,
        named = summary.names_resolved,
        skipped = summary.records_skipped,
        "credits dump complete"
    );
    Ok(())
}

fn cmd_init(output: &PathBuf) -> Result<()> {
    let default_config = r#"# gitcredits configuration

[github]
api_url = "https://api.github.com"
html_url = "https://github.com"
repo = "owner/repo"
token_file = "~/.config/gitcredits/token"

[fetch]
per_page = 100
profile_delay_ms = 500
user_agent = "gitcredits"

[log]
level = "info"
"#;

    if output.exists() {
        anyhow::bail!(
            "file already exists: {}. Use a different path or remove the existing file.",
            output.display()
        );
    }

    std::fs::write(output, default_config).context("failed to write config file")?;

    println!("Default configuration written to {}", output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit the config file with your repository details");
    println!("  2. Save your personal access token to the token file");
    println!(
        "  3. Validate with: gitcredits validate --config {}",
        output.display()
    );
    println!(
        "  4. Dump the credits: gitcredits dump --config {}",
        output.display()
    );

    Ok(())
}

fn cmd_validate(config_path: &str) -> Result<()> {
    let resolved = expand_tilde(config_path);
    println!("Validating configuration: {}", resolved);
    println!();

    let mut config =
        AppConfig::load_from_file(&resolved).context("failed to parse configuration")?;
    println!("  [OK] TOML structure is valid");

    match config.validate() {
        Ok(()) => {
            println!("  [OK] All required fields are valid");
        }
        Err(e) => {
            println!("  [FAIL] Validation error: {}", e);
            anyhow::bail!("configuration validation failed");
        }
    }

    config.github.token_file = expand_tilde(&config.github.token_file);
    let token_status = match config.read_token() {
        Ok(_) => "readable",
        Err(_) => "NOT READABLE",
    };

    println!();
    println!("Configuration summary:");
    println!("  Repository    : {}", config.github.repo);
    println!("  API URL       : {}", config.github.api_url);
    println!("  Token file    : {} ({})", config.github.token_file, token_status);
    println!("  Page size     : {}", config.fetch.per_page);
    println!("  Profile delay : {} ms", config.fetch.profile_delay_ms);

    Ok(())
}

fn cmd_hooks_install(source: &PathBuf, repo: &PathBuf) -> Result<()> {
    let installed = hooks::install_hooks(source, repo).context("failed to install hooks")?;
    println!(
        "Copied {} hook(s) from {} to .git/hooks",
        installed,
        source.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).display().to_string();
        }
    }
    path.to_string()
}
