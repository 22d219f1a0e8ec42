//! Command registry: maps command names and aliases to definitions.
//!
//! The registry is built once at startup and then only read. Names and
//! aliases share one case-insensitive key space. A primary name always wins
//! over an alias; an alias that collides with any existing key is skipped.
//! Both situations are logged, never silently merged.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::{CommandDefinition, canonical};
use crate::output::CommandSummary;

/// Maximum edit distance for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// What happened while registering one definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    /// A definition with the same name was replaced.
    pub overwritten: bool,
    /// Aliases that were not bound because their key was taken or blank.
    pub skipped_aliases: Vec<String>,
    /// The definition had a blank name and was not registered.
    pub rejected: bool,
}

/// Registry holding every command reachable by name or alias.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    keys: HashMap<String, Arc<CommandDefinition>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Register a command, overwriting any previous command of the same name.
    ///
    /// Keys still bound to a replaced definition are released first, so its
    /// old aliases do not keep resolving to stale behaviour. Aliases whose
    /// key is already taken are dropped from the stored definition.
    ///
    /// Name and aliases are canonicalized here as well, since both fields
    /// are public. A blank name rejects the whole definition.
    pub fn register(&mut self, mut definition: CommandDefinition) -> Registration {
        let mut report = Registration::default();
        definition.name = canonical(&definition.name);
        if definition.name.is_empty() {
            warn!("Command with an empty name, skipping");
            report.rejected = true;
            return report;
        }
        let name = definition.name.clone();

        match self.keys.get(&name).cloned() {
            Some(previous) if previous.name == name => {
                warn!(command = %name, "Command is already registered, overwriting");
                report.overwritten = true;
                self.keys.retain(|_, bound| !Arc::ptr_eq(bound, &previous));
            }
            Some(previous) => {
                warn!(
                    command = %name,
                    alias_of = %previous.name,
                    "Command name shadows an existing alias, rebinding"
                );
                let mut trimmed = (*previous).clone();
                trimmed.aliases.retain(|alias| alias != &name);
                let trimmed = Arc::new(trimmed);
                for bound in self.keys.values_mut() {
                    if Arc::ptr_eq(bound, &previous) {
                        *bound = Arc::clone(&trimmed);
                    }
                }
            }
            None => {}
        }

        let mut accepted = Vec::with_capacity(definition.aliases.len());
        let mut seen = HashSet::new();
        for alias in definition.aliases.drain(..).map(|a| canonical(&a)) {
            let taken = alias.is_empty()
                || alias == name
                || self.keys.contains_key(&alias)
                || !seen.insert(alias.clone());
            if taken {
                warn!(
                    alias = %alias,
                    command = %name,
                    "Alias conflicts with an existing command, skipping"
                );
                report.skipped_aliases.push(alias);
            } else {
                accepted.push(alias);
            }
        }
        definition.aliases = accepted;

        let definition = Arc::new(definition);
        self.keys.insert(name.clone(), Arc::clone(&definition));
        for alias in &definition.aliases {
            self.keys.insert(alias.clone(), Arc::clone(&definition));
        }
        debug!(command = %name, aliases = definition.aliases.len(), "Registered command");

        report
    }

    /// Look up a command by name or alias, case-insensitively.
    pub fn lookup(&self, token: &str) -> Option<&Arc<CommandDefinition>> {
        self.keys.get(&canonical(token))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    /// Distinct definitions sorted by name. A command reachable through
    /// several aliases appears once.
    pub fn list_all(&self) -> Vec<Arc<CommandDefinition>> {
        let distinct: BTreeMap<&str, &Arc<CommandDefinition>> = self
            .keys
            .values()
            .map(|def| (def.name.as_str(), def))
            .collect();
        distinct.into_values().cloned().collect()
    }

    /// Every bound key (names and aliases), sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Iterate `(key, definition)` pairs in key order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &Arc<CommandDefinition>)> {
        let mut entries: Vec<_> = self.keys.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Summaries for `help`, sorted by name.
    pub fn help_listing(&self) -> Vec<CommandSummary> {
        self.list_all().iter().map(|def| def.summary()).collect()
    }

    /// Number of distinct commands.
    pub fn len(&self) -> usize {
        self.list_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Suggest the closest command name for an unknown token using edit
    /// distance.
    pub fn closest(&self, token: &str) -> Option<&str> {
        let token = canonical(token);
        let mut best: Option<(&str, usize)> = None;

        for (key, def) in self.entries() {
            let dist = edit_distance(&token, key);
            if dist <= MAX_SUGGESTION_DISTANCE && best.is_none_or(|(_, d)| dist < d) {
                best = Some((def.name.as_str(), dist));
            }
        }

        best.map(|(name, _)| name)
    }
}

/// Levenshtein edit distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev = (0..=b.len()).collect::<Vec<_>>();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandResult, Invocation};
    use crate::output::Output;
    use pretty_assertions::assert_eq;

    fn reply(text: &'static str) -> impl Fn(&Invocation<'_>) -> CommandResult + Send + Sync {
        move |_| Ok(Output::text(text))
    }

    fn run(registry: &CommandRegistry, token: &str) -> Output {
        let def = registry.lookup(token).expect("command registered");
        def.run(&Invocation {
            name: &def.name,
            args: &[],
            registry,
            history: &[],
        })
        .unwrap()
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_by_name_and_alias_returns_same_definition() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDefinition::new("education", "Schooling", reply("edu"))
                .with_aliases(&["edu", "school"]),
        );

        let by_name = registry.lookup("education").unwrap();
        for alias in ["edu", "school"] {
            let by_alias = registry.lookup(alias).unwrap();
            assert!(Arc::ptr_eq(by_name, by_alias), "alias {alias} diverged");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDefinition::new("help", "Help", reply("help")));
        assert!(registry.lookup("HELP").is_some());
        assert!(registry.lookup("  Help ").is_some());
    }

    #[test]
    fn test_lookup_unknown_returns_none() {
        let registry = CommandRegistry::new();
        assert!(registry.lookup("nonexistent").is_none());
        assert!(!registry.contains("nonexistent"));
    }

    #[test]
    fn test_overwrite_replaces_definition() {
        let mut registry = CommandRegistry::new();
        let first = registry.register(CommandDefinition::new("whoami", "short", reply("first")));
        assert!(!first.overwritten);
        let second = registry.register(CommandDefinition::new("whoami", "long", reply("second")));
        assert!(second.overwritten);

        assert_eq!(run(&registry, "whoami"), Output::text("second"));
        let all = registry.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "long");
    }

    #[test]
    fn test_overwrite_releases_stale_aliases() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDefinition::new("resume", "old", reply("old")).with_aliases(&["cv", "resumé"]),
        );
        registry.register(
            CommandDefinition::new("resume", "new", reply("new")).with_aliases(&["cv"]),
        );

        assert_eq!(run(&registry, "cv"), Output::text("new"));
        assert!(registry.lookup("resumé").is_none());
        assert_eq!(registry.keys(), vec!["cv", "resume"]);
    }

    #[test]
    fn test_alias_conflict_is_skipped_and_first_binding_wins() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDefinition::new("experience", "Jobs", reply("experience"))
                .with_aliases(&["work", "jobs"]),
        );
        let report = registry.register(
            CommandDefinition::new("projects", "Projects", reply("projects"))
                .with_aliases(&["work", "portfolio"]),
        );

        assert_eq!(report.skipped_aliases, vec!["work".to_string()]);
        assert_eq!(run(&registry, "work"), Output::text("experience"));
        assert_eq!(run(&registry, "portfolio"), Output::text("projects"));
        assert_eq!(
            registry.lookup("projects").unwrap().aliases,
            vec!["portfolio".to_string()]
        );
    }

    #[test]
    fn test_alias_equal_to_own_name_is_skipped() {
        let mut registry = CommandRegistry::new();
        let report = registry.register(
            CommandDefinition::new("help", "Help", reply("help")).with_aliases(&["HELP", "h", "h"]),
        );
        assert_eq!(report.skipped_aliases, vec!["help".to_string(), "h".to_string()]);
        assert_eq!(registry.lookup("help").unwrap().aliases, vec!["h".to_string()]);
    }

    #[test]
    fn test_primary_name_wins_over_existing_alias() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDefinition::new("skills", "Skills", reply("skills")).with_aliases(&["tech"]),
        );
        let report = registry.register(CommandDefinition::new("tech", "Tech", reply("tech")));
        assert!(!report.overwritten);

        assert_eq!(run(&registry, "tech"), Output::text("tech"));
        assert_eq!(run(&registry, "skills"), Output::text("skills"));
        assert!(registry.lookup("skills").unwrap().aliases.is_empty());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_canonicalizes_directly_assigned_fields() {
        let mut registry = CommandRegistry::new();
        let mut def = CommandDefinition::new("placeholder", "", reply("foo"));
        def.name = "Foo".to_string();
        def.aliases = vec!["  Bar ".to_string(), "   ".to_string()];
        let report = registry.register(def);

        assert_eq!(report.skipped_aliases, vec![String::new()]);
        assert_eq!(registry.keys(), vec!["bar", "foo"]);
        assert_eq!(run(&registry, "FOO"), Output::text("foo"));
        assert_eq!(run(&registry, "bar"), Output::text("foo"));
        assert_eq!(registry.lookup("foo").unwrap().name, "foo");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut registry = CommandRegistry::new();
        let report = registry.register(CommandDefinition::new("   ", "", reply("")));
        assert!(report.rejected);
        assert!(registry.is_empty());

        registry.register(CommandDefinition::new("help", "", reply("")));
        let mut def = CommandDefinition::new("x", "", reply(""));
        def.name = String::new();
        assert!(registry.register(def).rejected);
        assert_eq!(registry.keys(), vec!["help"]);
        assert_ne!(registry.closest("ab"), Some(""));
    }

    #[test]
    fn test_list_all_sorted_and_distinct() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDefinition::new("whoami", "", reply("")));
        registry.register(CommandDefinition::new("help", "", reply("")).with_aliases(&["h", "?"]));
        registry.register(CommandDefinition::new("history", "", reply("")));

        let names: Vec<String> = registry.list_all().iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["help", "history", "whoami"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_help_listing_matches_list_all() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandDefinition::new("echo", "Echo text", reply("")).with_usage("echo <text>"),
        );
        registry.register(
            CommandDefinition::new("clear", "Clear", reply("")).with_aliases(&["cls"]),
        );

        let listing = registry.help_listing();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].name, "clear");
        assert_eq!(listing[0].aliases, vec!["cls".to_string()]);
        assert_eq!(listing[1].usage, "echo <text>");
    }

    #[test]
    fn test_closest_match() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDefinition::new("help", "", reply("")));
        registry.register(CommandDefinition::new("projects", "", reply("")));
        assert_eq!(registry.closest("hep"), Some("help"));
        assert_eq!(registry.closest("projcts"), Some("projects"));
    }

    #[test]
    fn test_closest_reports_canonical_name_for_alias_match() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDefinition::new("resume", "", reply("")).with_aliases(&["cv"]));
        assert_eq!(registry.closest("cvv"), Some("resume"));
    }

    #[test]
    fn test_closest_no_match() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDefinition::new("help", "", reply("")));
        assert!(registry.closest("xyzabcdef").is_none());
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("hello", "hello"), 0);
        assert_eq!(edit_distance("help", "hep"), 1);
        assert_eq!(edit_distance("abc", "xyz"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
    }
}
