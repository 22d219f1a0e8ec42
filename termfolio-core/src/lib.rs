//! # termfolio core
//!
//! Command dispatch and input-session engine for a terminal-styled
//! portfolio. Provides the command registry, the dispatcher with its
//! failure boundary, prefix autocomplete, the history/transcript session
//! state machine, structured output, configuration and profile data.

pub mod builtins;
pub mod command;
pub mod completion;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod output;
pub mod profile;
pub mod registry;
pub mod session;

// Re-export commonly used types at the crate root.
pub use command::{CommandCategory, CommandDefinition, CommandResult, Invocation};
pub use completion::Autocomplete;
pub use config::{ShellConfig, config_exists, load_config};
pub use dispatcher::{Dispatcher, ParsedInput, in_handler, tokenize};
pub use error::{CommandError, ConfigError, ProfileError, Result, TermfolioError};
pub use output::{CommandSummary, Link, Output, Section};
pub use profile::Profile;
pub use registry::{CommandRegistry, Registration};
pub use session::{
    Completion, HistoryLog, RecallState, Session, SessionOptions, Submission, Transcript,
    TranscriptEntry,
};
