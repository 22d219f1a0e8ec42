//! Dispatcher: turns one raw input line into an [`Output`].
//!
//! Every failure path ends in an output value. Unknown commands produce
//! [`Output::NotFound`]; handlers that return `Err` or panic produce
//! [`Output::Error`]. Nothing escapes to the caller.
//!
//! The reserved words `clear` and `cls` are expected to be intercepted by
//! the caller before `execute` is reached (see [`crate::session`]).

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::{Invocation, canonical};
use crate::output::Output;
use crate::registry::CommandRegistry;

/// Message used when a failure carries no readable text.
pub const UNKNOWN_ERROR: &str = "Unknown error";

thread_local! {
    static IN_HANDLER: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is running a handler inside the dispatcher's
/// failure boundary. Panic hooks use this to tell a panic that will be
/// recovered from one that will not.
pub fn in_handler() -> bool {
    IN_HANDLER.with(Cell::get)
}

/// Marks the current thread as inside the boundary until dropped.
struct HandlerScope {
    outer: bool,
}

impl HandlerScope {
    fn enter() -> Self {
        Self {
            outer: IN_HANDLER.with(|flag| flag.replace(true)),
        }
    }
}

impl Drop for HandlerScope {
    fn drop(&mut self) {
        IN_HANDLER.with(|flag| flag.set(self.outer));
    }
}

/// A tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// Lower-cased first token, used as the lookup key.
    pub command: String,
    /// Remaining tokens, unmodified.
    pub args: Vec<String>,
}

/// Split a line on runs of whitespace. Returns `None` for blank input.
///
/// There is no quoting or escaping: `echo "a b"` yields the arguments
/// `"a` and `b"`.
pub fn tokenize(raw: &str) -> Option<ParsedInput> {
    let mut tokens = raw.split_whitespace();
    let command = canonical(tokens.next()?);
    let args = tokens.map(str::to_string).collect();
    Some(ParsedInput { command, args })
}

/// Resolves input lines against a shared registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run one line. Returns `None` when the line is blank.
    pub fn execute(&self, raw: &str) -> Option<Output> {
        self.execute_with_history(raw, &[])
    }

    /// Run one line, exposing `history` read-only to the handler.
    pub fn execute_with_history(&self, raw: &str, history: &[String]) -> Option<Output> {
        let parsed = tokenize(raw)?;

        let Some(definition) = self.registry.lookup(&parsed.command) else {
            debug!(command = %parsed.command, "Command not found");
            let suggestion = self.registry.closest(&parsed.command).map(str::to_string);
            return Some(Output::NotFound {
                command: parsed.command,
                suggestion,
            });
        };

        debug!(
            command = %definition.name,
            typed = %parsed.command,
            args = parsed.args.len(),
            "Dispatching command"
        );

        let invocation = Invocation {
            name: &definition.name,
            args: &parsed.args,
            registry: &self.registry,
            history,
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _scope = HandlerScope::enter();
            definition.run(&invocation)
        }));
        let output = match outcome {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                let message = readable(err.to_string());
                warn!(command = %definition.name, error = %message, "Command failed");
                Output::Error { message }
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(command = %definition.name, error = %message, "Command panicked");
                Output::Error { message }
            }
        };

        Some(output)
    }
}

fn readable(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    };
    readable(message)
}
