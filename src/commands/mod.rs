//! Command registry and dispatch
//!
//! A line starting with [`COMMAND_MARKER`] is a built-in command. The
//! registry maps command names (marker included, case-sensitive) to a
//! [`CommandSpec`]; resolving a line yields a [`CommandInvocation`] which
//! checks arity before running the executor.

mod args;
mod builtins;

use std::collections::BTreeMap;
use std::fmt;

pub use args::{split_command, split_leading, tokenize};
pub use builtins::builtin_commands;

use crate::shell::{ShellError, ShellResult, TransactionHandler, VariableHolder};

/// Leading character of every built-in command
pub const COMMAND_MARKER: char = ':';

/// What a command executor may touch
pub trait CommandContext: TransactionHandler + VariableHolder {
    /// Write a line of command output
    fn print(&mut self, text: &str);

    /// Every registered command, ordered by name
    fn commands(&self) -> Vec<CommandSpec>;

    /// Input history, oldest first
    fn history(&self) -> Vec<String>;

    /// Ask the run loop to stop after the current line
    fn request_exit(&mut self);
}

/// Command body. Mutates the context; never returns a value.
pub type Executor = fn(&mut dyn CommandContext, &[String]) -> ShellResult<()>;

/// Accepted argument counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Range(usize, usize),
    /// `n` tokens, then the rest of the line as one last argument
    Leading(usize),
    Any,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Self::Exactly(n) => count == n,
            Self::Range(min, max) => (min..=max).contains(&count),
            Self::Leading(n) => count == n + 1,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{}", n),
            Self::Range(min, max) => write!(f, "{}-{}", min, max),
            Self::Leading(n) => write!(f, "{}", n + 1),
            Self::Any => write!(f, "any"),
        }
    }
}

/// One registered command
#[derive(Clone, Copy)]
pub struct CommandSpec {
    /// Name including the marker, e.g. `:set`
    pub name: &'static str,
    /// Argument synopsis, e.g. `<name> <literal>`
    pub usage: &'static str,
    /// One-line description for the command list
    pub description: &'static str,
    /// Long help for `:help <command>`
    pub help: &'static str,
    pub arity: Arity,
    pub executor: Executor,
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl CommandSpec {
    /// `:name args`
    pub fn synopsis(&self) -> String {
        if self.usage.is_empty() {
            self.name.to_string()
        } else {
            format!("{} {}", self.name, self.usage)
        }
    }
}

/// A resolved command line, ready to run
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub spec: CommandSpec,
    pub args: Vec<String>,
}

impl CommandInvocation {
    /// Check arity, then run the executor against `ctx`
    pub fn invoke(&self, ctx: &mut dyn CommandContext) -> ShellResult<()> {
        if !self.spec.arity.accepts(self.args.len()) {
            return Err(ShellError::ArgumentCount {
                command: self.spec.name.to_string(),
                expected: self.spec.arity.to_string(),
                actual: self.args.len(),
                usage: self.spec.synopsis(),
            });
        }
        (self.spec.executor)(ctx, &self.args)
    }
}

/// Command name → spec
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, CommandSpec>,
}

impl CommandRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for spec in builtin_commands() {
            registry.replace(spec);
        }
        registry
    }

    /// Add a command. A name can only be registered once.
    pub fn register(&mut self, spec: CommandSpec) -> ShellResult<()> {
        if self.commands.contains_key(spec.name) {
            return Err(ShellError::DuplicateCommand(spec.name.to_string()));
        }
        self.commands.insert(spec.name, spec);
        Ok(())
    }

    /// Add or overwrite a command, returning the one it displaced
    pub fn replace(&mut self, spec: CommandSpec) -> Option<CommandSpec> {
        self.commands.insert(spec.name, spec)
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// Registered specs, sorted by name
    pub fn specs(&self) -> Vec<CommandSpec> {
        self.commands.values().copied().collect()
    }

    /// Resolve a line of input.
    ///
    /// `None` when the line is not a command line or names no registered
    /// command. Arity is not checked here.
    pub fn resolve(&self, line: &str) -> Option<CommandInvocation> {
        let (name, rest) = split_command(line)?;
        let spec = *self.commands.get(name)?;
        let args = match spec.arity {
            Arity::Leading(n) => split_leading(rest, n),
            _ => tokenize(rest),
        };
        Some(CommandInvocation { spec, args })
    }
}
