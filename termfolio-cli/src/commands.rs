//! CLI subcommand handlers.

use std::path::Path;

use crossterm::style::Stylize;
use termfolio_core::CommandRegistry;
use termfolio_core::config::{self, ShellConfig};

use crate::render::Renderer;
use crate::theme;
use crate::{Commands, ConfigAction};

/// Handle a CLI subcommand.
pub fn handle_command(
    command: Commands,
    workspace: &Path,
    config: &ShellConfig,
    registry: &CommandRegistry,
    renderer: &Renderer,
) -> anyhow::Result<()> {
    match command {
        Commands::Config { action } => handle_config(action, workspace, config),
        Commands::Commands { json } => {
            let listing = registry.help_listing();
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for line in renderer.render(&termfolio_core::Output::Commands(listing)) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        Commands::Themes => {
            let current = renderer.theme().name;
            for t in theme::all() {
                let marker = if t.name == current { "*" } else { " " };
                let swatch = format!(" {} ", t.name).with(t.text).on(t.bg);
                println!(
                    "{marker} {swatch} {}  {}",
                    t.display_name,
                    "■".with(t.accent)
                );
            }
            Ok(())
        }
    }
}

fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    current: &ShellConfig,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config::init_workspace_config(workspace)?;
            println!("Created configuration at {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            if !config::config_exists(Some(workspace)) {
                println!("# No configuration file found; showing defaults");
            }
            print!("{}", toml::to_string_pretty(current)?);
            Ok(())
        }
    }
}
