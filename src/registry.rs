//! Command registry - registration, listing, and dispatch
//!
//! The registry is ordinary owned state: construct one with
//! [`Registry::new`], populate it during startup, then dispatch against it
//! any number of times. Registration takes `&mut self` and execution takes
//! `&self`, so the borrow checker already rules out registering while a
//! dispatch is in flight on the same instance.

use std::collections::HashMap;

use thiserror::Error;

use crate::command::Command;
use crate::flags::{self, FlagParseError, ParsedFlags};

/// Errors surfaced by registration and dispatch. All are recoverable; the
/// registry never logs, retries, or terminates the process on its own.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("command \"{name}\" already registered")]
    AlreadyRegistered { name: String },

    #[error("command \"{name}\" does not exist")]
    NotFound { name: String },

    #[error(transparent)]
    Flags(#[from] FlagParseError),
}

/// In-memory catalog of registered commands, keyed by unique name.
#[derive(Debug, Default)]
pub struct Registry {
    commands: HashMap<String, Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name.
    ///
    /// First registration wins: if the name is already taken the command is
    /// rejected with [`RegistryError::AlreadyRegistered`] and the existing
    /// entry is left untouched.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if self.commands.contains_key(&command.name) {
            return Err(RegistryError::AlreadyRegistered {
                name: command.name.clone(),
            });
        }

        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    /// Look up a registered command by exact name
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Iterate (name, description) pairs, sorted by name.
    ///
    /// The underlying map has no meaningful order, so listings are sorted
    /// explicitly to keep output and tests deterministic.
    pub fn commands(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|cmd| (cmd.name.as_str(), cmd.description.as_str()))
            .collect();
        pairs.sort_by_key(|(name, _)| *name);
        pairs.into_iter()
    }

    /// Render the plain-text usage listing: a fixed header, a blank line,
    /// then one "name - description" line per command.
    pub fn usage(&self) -> String {
        let mut out = String::from("Commands Available:\n\n");
        for (name, description) in self.commands() {
            out.push_str(name);
            out.push_str(" - ");
            out.push_str(description);
            out.push('\n');
        }
        out
    }

    /// Dispatch `name` against a raw process argument vector.
    ///
    /// `raw_args` follows the conventional layout: index 0 is the program
    /// name, index 1 the invoked command, flag tokens start at index 2.
    /// Argument vectors of two tokens or fewer skip flag parsing entirely
    /// and invoke the handler with empty flags and positionals; callers
    /// relying on string-flag defaults should pass at least one token after
    /// the command name.
    pub fn execute(&self, name: &str, raw_args: &[String]) -> Result<(), RegistryError> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })?;

        let (parsed, positionals) = if raw_args.len() > 2 {
            flags::parse(&command.flags, &raw_args[2..])?
        } else {
            (ParsedFlags::default(), Vec::new())
        };

        (command.entry_point)(&parsed, &positionals);
        Ok(())
    }
}
