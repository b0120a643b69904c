//! Command line parser
//!
//! Tokens are separated by exactly one space. Leading, doubled and
//! trailing spaces are errors, not collapsed.

use heapless::Vec;

use super::codec::{parse_arg, ArgValue};
use super::commands::CommandDescriptor;
use super::ConsoleError;
use crate::config::MAX_ARGS;

/// Resolved argument slots for one dispatch
pub type ArgSlots<'a> = Vec<ArgValue<'a>, MAX_ARGS>;

/// Syntactically valid line: a command name and its argument text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// The command name (first token)
    pub command: &'a str,
    /// Everything after the first space, empty if there is none
    pub rest: &'a str,
}

impl<'a> ParsedLine<'a> {
    /// Argument tokens, in order
    pub fn args(&self) -> impl Iterator<Item = &'a str> {
        let rest = self.rest;
        rest.split(' ').filter(move |_| !rest.is_empty())
    }

    /// Number of argument tokens
    pub fn arg_count(&self) -> usize {
        self.args().count()
    }
}

/// Split a line into command and arguments.
///
/// Returns `Ok(None)` for a line that is empty or only spaces; such lines
/// are ignored without an error.
pub fn parse_line(line: &str) -> Result<Option<ParsedLine<'_>>, ConsoleError<'_>> {
    if line.bytes().all(|b| b == b' ') {
        return Ok(None);
    }
    if line.starts_with(' ') {
        return Err(ConsoleError::LeadingWhitespace);
    }
    if line.split(' ').any(str::is_empty) {
        return Err(ConsoleError::ExtraWhitespace);
    }

    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    Ok(Some(ParsedLine { command, rest }))
}

/// Bind the argument tokens of `line` to `cmd`'s declared arguments.
///
/// Tokens are checked left to right; the count of required arguments only
/// after every token was accepted. A missing optional last argument is
/// filled with its type's default sentinel.
pub fn bind_args<'a>(
    cmd: &CommandDescriptor,
    line: &ParsedLine<'a>,
) -> Result<ArgSlots<'a>, ConsoleError<'a>> {
    let mut slots = ArgSlots::new();

    for token in line.args() {
        let def = cmd
            .args
            .get(slots.len())
            .ok_or(ConsoleError::TooManyArguments)?;
        let value = parse_arg(token, def.ty).map_err(|_| ConsoleError::InvalidArgument {
            name: def.name,
            value: token,
        })?;
        slots
            .push(value)
            .map_err(|_| ConsoleError::TooManyArguments)?;
    }

    if slots.len() < cmd.required_args() {
        return Err(ConsoleError::TooFewArguments);
    }

    for def in &cmd.args[slots.len()..] {
        slots
            .push(ArgValue::default_for(def.ty))
            .map_err(|_| ConsoleError::TooManyArguments)?;
    }

    Ok(slots)
}
