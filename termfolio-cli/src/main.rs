//! termfolio: a terminal-styled portfolio shell.
//!
//! Runs one command line and exits, or starts the interactive shell.

mod commands;
mod render;
mod repl;
mod theme;

use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use termfolio_core::builtins::default_registry;
use termfolio_core::{Profile, ShellConfig};
use tracing::{debug, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::render::Renderer;

/// termfolio: browse a portfolio from your terminal
#[derive(Parser, Debug)]
#[command(
    name = "termfolio",
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Command line to run (starts the interactive shell if omitted)
    #[arg(trailing_var_arg = true)]
    line: Vec<String>,

    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Profile file (TOML or JSON)
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Color theme: matrix, vscode, dracula, nord, ubuntu, cyberpunk
    #[arg(short, long)]
    theme: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List every available command
    Commands {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// List color themes
    Themes,
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Write a default config to <workspace>/.termfolio/config.toml
    Init,
    /// Show the effective configuration
    Show,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Human-readable stderr stays quiet by default so it doesn't interleave
    // with the prompt; the JSON file gets everything from debug up.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "termfolio", "termfolio")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "termfolio.log");
    let (non_blocking, log_guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    // Handler panics are caught and reported by the dispatcher, so only the
    // log file hears about them. Anything else is a real crash: restore the
    // terminal and let the default hook print it.
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        if termfolio_core::in_handler() {
            debug!(%panic, "Handler panic captured");
            return;
        }
        let _ = crossterm::terminal::disable_raw_mode();
        error!(%panic, "Unexpected panic");
        previous_hook(panic);
    }));

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut config = termfolio_core::load_config(Some(&workspace), cli.config.as_deref(), None)
        .context("Configuration error")?;

    // Apply CLI overrides
    if let Some(theme) = &cli.theme {
        config.ui.theme = theme.clone();
    }
    if let Some(profile) = &cli.profile {
        config.profile.path = Some(profile.clone());
    }

    let profile = load_profile(&config, &workspace)?;
    let registry = Arc::new(default_registry(profile));
    info!(commands = registry.len(), workspace = %workspace.display(), "Registry ready");

    let theme = theme::resolve(&config.ui.theme);
    let width = crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80);
    let mut renderer = Renderer::new(theme).with_width(width.saturating_sub(2));
    if !std::io::stdout().is_terminal() {
        renderer = renderer.plain();
    }

    if let Some(command) = cli.command {
        return commands::handle_command(command, &workspace, &config, &registry, &renderer);
    }

    if cli.line.is_empty() {
        repl::run_interactive(registry, &config, &renderer)
    } else {
        let line = cli.line.join(" ");
        if !repl::run_once(registry, &config, &renderer, &line)? {
            drop(log_guard);
            std::process::exit(1);
        }
        Ok(())
    }
}

/// Load the configured profile, or the bundled one. Validation problems
/// are logged and the profile is used anyway.
fn load_profile(config: &ShellConfig, workspace: &Path) -> anyhow::Result<Profile> {
    let profile = match &config.profile.path {
        Some(path) => {
            let path = if path.is_relative() {
                workspace.join(path)
            } else {
                path.clone()
            };
            Profile::load(&path)
                .with_context(|| format!("Failed to load profile {}", path.display()))?
        }
        None => Profile::bundled().context("Bundled profile is invalid")?,
    };
    if let Err(e) = profile.validate() {
        error!(error = %e, "Profile failed validation; continuing");
    }
    Ok(profile)
}
