//! Shell-style commands: help, clear, echo, history, date.

use chrono::Local;

use crate::command::{CommandCategory, CommandDefinition, CommandResult, Invocation};
use crate::error::CommandError;
use crate::output::Output;
use crate::registry::CommandRegistry;

pub(super) fn register(registry: &mut CommandRegistry) {
    registry.register(
        CommandDefinition::new("help", "Display available commands", help)
            .with_usage("help [command]")
            .with_category(CommandCategory::System),
    );
    // Intercepted by the session before dispatch; registered so it shows up
    // in help and autocomplete.
    registry.register(
        CommandDefinition::new("clear", "Clear the terminal screen", |_| Ok(Output::Clear))
            .with_aliases(&["cls"])
            .with_category(CommandCategory::System),
    );
    registry.register(
        CommandDefinition::new("echo", "Display a line of text", echo)
            .with_usage("echo <text>")
            .with_category(CommandCategory::System),
    );
    registry.register(
        CommandDefinition::new("history", "Show previously entered commands", history)
            .with_category(CommandCategory::System),
    );
    registry.register(
        CommandDefinition::new("date", "Show the current date and time", |_| {
            Ok(Output::text(
                Local::now().format("%a %b %e %H:%M:%S %Z %Y").to_string(),
            ))
        })
        .with_category(CommandCategory::System),
    );
}

fn help(inv: &Invocation<'_>) -> CommandResult {
    let Some(topic) = inv.args.first() else {
        return Ok(Output::Commands(inv.registry.help_listing()));
    };

    let def = inv
        .registry
        .lookup(topic)
        .ok_or_else(|| {
            CommandError::invalid_arguments("help", format!("unknown command '{topic}'"))
        })?;

    let aliases = if def.aliases.is_empty() {
        "none".to_string()
    } else {
        def.aliases.join(", ")
    };
    let mut entries = vec![
        ("Usage".to_string(), def.usage.clone()),
        ("Aliases".to_string(), aliases),
    ];
    if let Some(category) = def.category {
        entries.push(("Category".to_string(), category.label().to_string()));
    }
    entries.push(("Description".to_string(), def.description.clone()));

    Ok(Output::KeyValue {
        title: def.name.clone(),
        entries,
    })
}

fn echo(inv: &Invocation<'_>) -> CommandResult {
    if inv.args.is_empty() {
        return Ok(Output::text("Usage: echo <text>"));
    }
    Ok(Output::text(inv.args.join(" ")))
}

fn history(inv: &Invocation<'_>) -> CommandResult {
    if inv.history.is_empty() {
        return Ok(Output::text("No commands in history"));
    }
    let width = inv.history.len().to_string().len();
    Ok(Output::Lines(
        inv.history
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>width$}  {line}", i + 1))
            .collect(),
    ))
}
