//! Presentation-agnostic command output.
//!
//! Handlers never produce terminal escape codes or markup. They return an
//! [`Output`] value and the front end decides how to draw it.

use serde::{Deserialize, Serialize};

use crate::command::CommandCategory;

/// Structured result of running one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Output {
    /// A single paragraph of text.
    Text(String),
    /// Several lines shown verbatim.
    Lines(Vec<String>),
    /// A titled bullet list.
    List { title: String, items: Vec<String> },
    /// A titled block of label/value pairs.
    KeyValue {
        title: String,
        entries: Vec<(String, String)>,
    },
    /// A titled sequence of cards (jobs, degrees, projects).
    Sections {
        title: String,
        sections: Vec<Section>,
    },
    /// Command listing produced by `help`.
    Commands(Vec<CommandSummary>),
    /// The first token did not resolve to any command.
    NotFound {
        command: String,
        suggestion: Option<String>,
    },
    /// The handler failed; `message` is the best available description.
    Error { message: String },
    /// Signal to the session that the transcript should be reset.
    Clear,
    /// Nothing to show.
    Empty,
}

impl Output {
    pub fn text(text: impl Into<String>) -> Self {
        Output::Text(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Output::Error {
            message: message.into(),
        }
    }

    /// Whether this output reports a failed dispatch (unknown command or
    /// handler error).
    pub fn is_failure(&self) -> bool {
        matches!(self, Output::NotFound { .. } | Output::Error { .. })
    }
}

/// One card inside [`Output::Sections`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    /// Right-aligned detail such as a date range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Display metadata for one registered command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSummary {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CommandCategory>,
}
