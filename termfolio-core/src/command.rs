//! Command definitions: metadata plus a handler.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::output::{CommandSummary, Output};
use crate::registry::CommandRegistry;

/// What a handler returns. `Err` is converted to an error output by the
/// dispatcher and never reaches the caller.
pub type CommandResult = std::result::Result<Output, CommandError>;

/// Shared handler function.
pub type Handler = Arc<dyn Fn(&Invocation<'_>) -> CommandResult + Send + Sync>;

/// Categories for grouping commands in `help` output. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    Navigation,
    Info,
    System,
    Social,
}

impl CommandCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CommandCategory::Navigation => "Navigation",
            CommandCategory::Info => "Info",
            CommandCategory::System => "System",
            CommandCategory::Social => "Social",
        }
    }

    pub fn all() -> &'static [CommandCategory] {
        &[
            CommandCategory::Navigation,
            CommandCategory::Info,
            CommandCategory::System,
            CommandCategory::Social,
        ]
    }
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Everything a handler may read while it runs.
///
/// The registry and history are borrowed immutably: handlers can list
/// commands or show past input but cannot change either.
pub struct Invocation<'a> {
    /// Canonical name of the command being run (not the alias typed).
    pub name: &'a str,
    /// Tokens after the command word, unmodified.
    pub args: &'a [String],
    pub registry: &'a CommandRegistry,
    /// Submitted lines, oldest first. Empty when dispatched outside a session.
    pub history: &'a [String],
}

/// A named command with its aliases, help text and handler.
#[derive(Clone)]
pub struct CommandDefinition {
    /// Canonical lower-case name.
    pub name: String,
    pub description: String,
    /// Usage pattern, e.g. `echo <text>`.
    pub usage: String,
    /// Alternate lower-case tokens resolving to this command.
    pub aliases: Vec<String>,
    pub category: Option<CommandCategory>,
    handler: Handler,
}

impl CommandDefinition {
    /// Create a definition whose usage defaults to its bare name.
    pub fn new<F>(name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> CommandResult + Send + Sync + 'static,
    {
        let name = canonical(name);
        Self {
            usage: name.clone(),
            name,
            description: description.to_string(),
            aliases: Vec::new(),
            category: None,
            handler: Arc::new(handler),
        }
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| canonical(a)).collect();
        self
    }

    pub fn with_category(mut self, category: CommandCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Run the handler directly, without the dispatcher's failure boundary.
    pub fn run(&self, invocation: &Invocation<'_>) -> CommandResult {
        (self.handler)(invocation)
    }

    pub fn summary(&self) -> CommandSummary {
        CommandSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            usage: self.usage.clone(),
            aliases: self.aliases.clone(),
            category: self.category,
        }
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Case-folded, trimmed form of a command token.
pub fn canonical(token: &str) -> String {
    token.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Invocation<'_>) -> CommandResult {
        Ok(Output::Empty)
    }

    #[test]
    fn test_new_canonicalizes_name_and_defaults_usage() {
        let def = CommandDefinition::new("  Help ", "Show help", noop);
        assert_eq!(def.name, "help");
        assert_eq!(def.usage, "help");
        assert!(def.aliases.is_empty());
        assert!(def.category.is_none());
    }

    #[test]
    fn test_builders() {
        let def = CommandDefinition::new("experience", "Work history", noop)
            .with_usage("experience")
            .with_aliases(&["Work", "JOBS"])
            .with_category(CommandCategory::Info);
        assert_eq!(def.aliases, vec!["work".to_string(), "jobs".to_string()]);
        assert_eq!(def.category, Some(CommandCategory::Info));
    }

    #[test]
    fn test_run_invokes_handler() {
        let registry = CommandRegistry::new();
        let def = CommandDefinition::new("echo", "Echo", |inv| {
            Ok(Output::text(inv.args.join(" ")))
        });
        let args = vec!["a".to_string(), "b".to_string()];
        let out = def
            .run(&Invocation {
                name: "echo",
                args: &args,
                registry: &registry,
                history: &[],
            })
            .unwrap();
        assert_eq!(out, Output::text("a b"));
    }

    #[test]
    fn test_summary_copies_metadata() {
        let def = CommandDefinition::new("resume", "Download my resume", noop)
            .with_aliases(&["cv"])
            .with_category(CommandCategory::Social);
        let summary = def.summary();
        assert_eq!(summary.name, "resume");
        assert_eq!(summary.aliases, vec!["cv".to_string()]);
        assert_eq!(summary.category, Some(CommandCategory::Social));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", CommandCategory::Navigation), "Navigation");
        assert_eq!(format!("{}", CommandCategory::Info), "Info");
        assert_eq!(format!("{}", CommandCategory::System), "System");
        assert_eq!(format!("{}", CommandCategory::Social), "Social");
    }
}
