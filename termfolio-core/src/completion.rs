//! Prefix autocomplete over command names and aliases.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::registry::CommandRegistry;

/// Default cap on returned suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Resolves partial input to matching command names.
///
/// Suggestions are canonical names in lexicographic order: an alias match
/// surfaces its command's primary name, and a command matched through
/// several keys appears once.
#[derive(Debug, Clone)]
pub struct Autocomplete {
    registry: Arc<CommandRegistry>,
    max_suggestions: usize,
}

impl Autocomplete {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self::with_limit(registry, DEFAULT_MAX_SUGGESTIONS)
    }

    pub fn with_limit(registry: Arc<CommandRegistry>, max_suggestions: usize) -> Self {
        Self {
            registry,
            max_suggestions,
        }
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    /// Matching names for `partial`. Empty input yields no suggestions.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        if partial.is_empty() {
            return Vec::new();
        }
        let prefix = partial.to_lowercase();

        let names: BTreeSet<&str> = self
            .registry
            .entries()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, def)| def.name.as_str())
            .collect();

        names
            .into_iter()
            .take(self.max_suggestions)
            .map(str::to_string)
            .collect()
    }
}
