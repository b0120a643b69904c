//! Command table
//!
//! Filled once at startup, read-only afterwards. Insertion order is kept
//! for `help` listings and completion.

use heapless::Vec;

use super::commands::{ArgumentDescriptor, CommandDescriptor, Handler};
use super::RegisterError;
use crate::config::MAX_ARGS;

/// Fixed-capacity command table
pub struct Registry<const N: usize> {
    commands: Vec<CommandDescriptor, N>,
    /// Names must be shorter than this (the line buffer capacity)
    max_name_len: usize,
}

impl<const N: usize> Registry<N> {
    /// Create empty table; names must be shorter than `max_name_len`
    pub const fn new(max_name_len: usize) -> Self {
        Self {
            commands: Vec::new(),
            max_name_len,
        }
    }

    /// Validate and add a command. The table is unchanged on error.
    pub fn register(&mut self, cmd: &CommandDescriptor) -> Result<(), RegisterError> {
        if self.commands.is_full() {
            return Err(RegisterError::RegistryFull);
        }
        if !is_identifier(cmd.name) || cmd.name.len() >= self.max_name_len {
            return Err(RegisterError::InvalidName);
        }
        if cmd.args.len() > MAX_ARGS {
            return Err(RegisterError::TooManyArguments);
        }
        validate_args(cmd.args)?;
        match cmd.handler {
            Handler::NoArgs(_) if !cmd.args.is_empty() => {
                return Err(RegisterError::HandlerMismatch)
            }
            Handler::WithArgs(_) if cmd.args.is_empty() => {
                return Err(RegisterError::HandlerMismatch)
            }
            _ => {}
        }
        if self.lookup(cmd.name).is_some() {
            return Err(RegisterError::DuplicateName);
        }

        self.commands
            .push(*cmd)
            .map_err(|_| RegisterError::RegistryFull)
    }

    /// Find a command by exact, case-sensitive name
    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// All commands, in registration order
    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Command names, for completion
    pub fn names(&self) -> impl Iterator<Item = &'static str> + Clone + '_ {
        self.commands.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn capacity(&self) -> usize {
        N
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn validate_args(args: &[ArgumentDescriptor]) -> Result<(), RegisterError> {
    let last = args.len().saturating_sub(1);
    for (i, arg) in args.iter().enumerate() {
        if arg.name.is_empty() || (arg.optional && i != last) {
            return Err(RegisterError::InvalidArgument);
        }
    }
    Ok(())
}
