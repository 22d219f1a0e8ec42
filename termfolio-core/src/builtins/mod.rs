//! Built-in commands.
//!
//! `basics` holds shell-style commands that need no profile data;
//! `portfolio` holds the commands that present a [`Profile`].

mod basics;
mod portfolio;

use std::sync::Arc;

use crate::profile::Profile;
use crate::registry::CommandRegistry;

/// Register all built-in commands.
pub fn register_defaults(registry: &mut CommandRegistry, profile: Arc<Profile>) {
    basics::register(registry);
    portfolio::register(registry, profile);
}

/// A registry pre-populated with every built-in command.
pub fn default_registry(profile: Profile) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_defaults(&mut registry, Arc::new(profile));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registry() -> CommandRegistry {
        default_registry(Profile::bundled().unwrap())
    }

    #[test]
    fn test_default_commands_present() {
        let registry = registry();
        for name in [
            "help",
            "clear",
            "echo",
            "history",
            "date",
            "whoami",
            "experience",
            "education",
            "skills",
            "projects",
            "contact",
            "resume",
        ] {
            assert!(registry.contains(name), "missing command {name}");
        }
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn test_default_aliases_resolve() {
        let registry = registry();
        for (alias, name) in [
            ("cls", "clear"),
            ("about", "whoami"),
            ("work", "experience"),
            ("jobs", "experience"),
            ("edu", "education"),
            ("school", "education"),
            ("tech", "skills"),
            ("stack", "skills"),
            ("portfolio", "projects"),
            ("proj", "projects"),
            ("cv", "resume"),
        ] {
            assert_eq!(registry.lookup(alias).unwrap().name, name, "alias {alias}");
        }
    }

    #[test]
    fn test_no_duplicate_keys_across_defaults() {
        let registry = registry();
        let mut seen = HashSet::new();
        for def in registry.list_all() {
            assert!(seen.insert(def.name.clone()), "duplicate {}", def.name);
            for alias in &def.aliases {
                assert!(seen.insert(alias.clone()), "duplicate alias {alias}");
            }
        }
    }

    #[test]
    fn test_every_default_has_category_and_description() {
        for def in registry().list_all() {
            assert!(def.category.is_some(), "{} has no category", def.name);
            assert!(!def.description.is_empty(), "{} has no description", def.name);
        }
    }
}
