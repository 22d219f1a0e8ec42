//! Configuration system for termfolio.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from `~/.config/termfolio/config.toml` and/or
//! `.termfolio/config.toml` in the workspace directory.

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::completion::DEFAULT_MAX_SUGGESTIONS;
use crate::error::ConfigError;
use crate::session::{DEFAULT_HISTORY_CAPACITY, SessionOptions};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    pub history: HistoryConfig,
    pub completion: CompletionConfig,
    pub ui: UiConfig,
    pub profile: ProfileConfig,
}

/// Command history settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of remembered lines; the oldest are evicted first.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Autocomplete settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub max_suggestions: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// Presentation settings consumed by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme name.
    pub theme: String,
    /// Prompt shown before the input buffer and each transcript entry.
    pub prompt: String,
    /// Whether to print the welcome banner when the transcript is empty.
    pub show_welcome: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "cyberpunk".to_string(),
            prompt: "guest@portfolio:~$".to_string(),
            show_welcome: true,
        }
    }
}

/// Where to read profile data from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// TOML or JSON profile file. The bundled profile is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ShellConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            history_capacity: self.history.max_entries,
            max_suggestions: self.completion.max_suggestions,
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "termfolio", "termfolio")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".termfolio").join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `TERMFOLIO_`)
/// 3. An explicit config file (`--config`, TOML or `.json`)
/// 4. Workspace-local config (`.termfolio/config.toml`)
/// 5. User config (`~/.config/termfolio/config.toml`)
/// 6. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&ShellConfig>,
) -> Result<ShellConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(ShellConfig::default()));

    if let Some(user_config) = user_config_path()
        && user_config.exists()
    {
        figment = figment.merge(Toml::file(&user_config));
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = config_file {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        figment = if is_json {
            figment.merge(Json::file(path))
        } else {
            figment.merge(Toml::file(path))
        };
    }

    // Environment variables (TERMFOLIO_UI__THEME, TERMFOLIO_HISTORY__MAX_ENTRIES, etc.)
    figment = figment.merge(Env::prefixed("TERMFOLIO_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    let config: ShellConfig = figment.extract().map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ShellConfig) -> Result<(), ConfigError> {
    if config.history.max_entries == 0 {
        return Err(ConfigError::Invalid {
            message: "history.max_entries must be at least 1".into(),
        });
    }
    if config.completion.max_suggestions == 0 {
        return Err(ConfigError::Invalid {
            message: "completion.max_suggestions must be at least 1".into(),
        });
    }
    Ok(())
}

/// Check whether any termfolio configuration file exists (user-level or workspace-level).
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if user_config_path().is_some_and(|p| p.exists()) {
        return true;
    }
    workspace.is_some_and(|ws| workspace_config_path(ws).exists())
}

/// Default configuration rendered as TOML, for `config init`.
pub fn default_config_toml() -> Result<String, ConfigError> {
    toml::to_string_pretty(&ShellConfig::default()).map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })
}

/// Write the default configuration into `<workspace>/.termfolio/config.toml`.
///
/// Refuses to overwrite an existing file. Returns the path written.
pub fn init_workspace_config(workspace: &Path) -> Result<PathBuf, ConfigError> {
    let path = workspace_config_path(workspace);
    if path.exists() {
        return Err(ConfigError::Invalid {
            message: format!("{} already exists", path.display()),
        });
    }
    let content = default_config_toml()?;
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
    };
    write().map_err(|e| ConfigError::Invalid {
        message: format!("cannot write {}: {e}", path.display()),
    })?;
    Ok(path)
}
