//! Console error types

use core::fmt;

/// Why a command registration was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// R01: Command table is full
    RegistryFull,
    /// R02: Name empty, too long, or not an identifier
    InvalidName,
    /// R03: A command with this name already exists
    DuplicateName,
    /// R04: Unnamed argument, or optional argument that is not last
    InvalidArgument,
    /// R05: More arguments than the console can bind
    TooManyArguments,
    /// R06: Handler shape does not match the argument list
    HandlerMismatch,
}

impl RegisterError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::RegistryFull => "R01",
            Self::InvalidName => "R02",
            Self::DuplicateName => "R03",
            Self::InvalidArgument => "R04",
            Self::TooManyArguments => "R05",
            Self::HandlerMismatch => "R06",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::RegistryFull => "command table full",
            Self::InvalidName => "invalid command name",
            Self::DuplicateName => "command already registered",
            Self::InvalidArgument => "invalid argument definition",
            Self::TooManyArguments => "too many arguments",
            Self::HandlerMismatch => "handler does not match arguments",
        }
    }
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Error reported on the console for a submitted line.
///
/// Borrowed fields point into the line buffer or a command descriptor and
/// only live until the prompt is reprinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError<'a> {
    /// E01: Line starts with a space
    LeadingWhitespace,
    /// E02: Two spaces in a row, or a trailing space
    ExtraWhitespace,
    /// E03: No command with this name
    UnknownCommand(&'a str),
    /// E04: More tokens than declared arguments
    TooManyArguments,
    /// E05: Fewer tokens than required arguments
    TooFewArguments,
    /// E06: Token does not parse as the argument's type
    InvalidArgument { name: &'a str, value: &'a str },
    /// E07: Line overflowed the input buffer
    LineTooLong,
}

impl ConsoleError<'_> {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::LeadingWhitespace => "E01",
            Self::ExtraWhitespace => "E02",
            Self::UnknownCommand(_) => "E03",
            Self::TooManyArguments => "E04",
            Self::TooFewArguments => "E05",
            Self::InvalidArgument { .. } => "E06",
            Self::LineTooLong => "E07",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::LeadingWhitespace => "whitespace before command",
            Self::ExtraWhitespace => "extra whitespace between arguments",
            Self::UnknownCommand(_) => "unknown command",
            Self::TooManyArguments => "too many arguments",
            Self::TooFewArguments => "too few arguments",
            Self::InvalidArgument { .. } => "invalid value",
            Self::LineTooLong => "line too long",
        }
    }
}

impl fmt::Display for ConsoleError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR {}: {}", self.code(), self.message())?;
        match self {
            Self::UnknownCommand(name) => write!(f, " ({})", name),
            Self::InvalidArgument { name, value } => write!(f, " for '{}' ({})", name, value),
            _ => Ok(()),
        }
    }
}
