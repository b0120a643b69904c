//! Command and argument descriptors, and the context handlers run in

use core::fmt::{self, Write};

use super::codec::{ArgType, ArgValue, Int};
use crate::signal::{CancelSignal, WaitOutcome};

/// Handler for a command without arguments
pub type NoArgsHandler = fn(&mut Context<'_>);

/// Handler for a command with arguments
pub type ArgsHandler = fn(&mut Context<'_>, &Args<'_>);

/// Command handler, shaped by whether the command declares arguments
#[derive(Clone, Copy)]
pub enum Handler {
    NoArgs(NoArgsHandler),
    WithArgs(ArgsHandler),
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoArgs(_) => f.write_str("NoArgs"),
            Self::WithArgs(_) => f.write_str("WithArgs"),
        }
    }
}

/// Where tab completion takes candidates from for a command's argument
#[derive(Clone, Copy)]
pub enum Completion {
    /// Names of the registered commands
    Commands,
    /// Fixed word list
    List(&'static [&'static str]),
    /// Candidate `i`, or `None` past the last one. Must be restartable:
    /// index 0 always starts the sequence again.
    Fn(fn(usize) -> Option<&'static str>),
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commands => f.write_str("Commands"),
            Self::List(words) => f.debug_tuple("List").field(words).finish(),
            Self::Fn(_) => f.write_str("Fn"),
        }
    }
}

/// Argument declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub ty: ArgType,
    /// Only allowed on the last argument
    pub optional: bool,
}

impl ArgumentDescriptor {
    /// Required integer argument
    pub const fn int(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description: Some(description),
            ty: ArgType::Int,
            optional: false,
        }
    }

    /// Required string argument
    pub const fn str(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description: Some(description),
            ty: ArgType::Str,
            optional: false,
        }
    }

    /// Make this argument optional. It then defaults to
    /// [`ArgValue::default_for`] its type when left out.
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Drop the help text
    pub const fn undocumented(mut self) -> Self {
        self.description = None;
        self
    }
}

/// Command declaration
#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub handler: Handler,
    pub completion: Option<Completion>,
    pub args: &'static [ArgumentDescriptor],
}

impl CommandDescriptor {
    /// Command without arguments
    pub const fn new(name: &'static str, handler: NoArgsHandler) -> Self {
        Self {
            name,
            description: None,
            handler: Handler::NoArgs(handler),
            completion: None,
            args: &[],
        }
    }

    /// Command taking `args`
    pub const fn with_args(
        name: &'static str,
        args: &'static [ArgumentDescriptor],
        handler: ArgsHandler,
    ) -> Self {
        Self {
            name,
            description: None,
            handler: Handler::WithArgs(handler),
            completion: None,
            args,
        }
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub const fn completion(mut self, completion: Completion) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Number of arguments that must be given
    pub fn required_args(&self) -> usize {
        match self.args.last() {
            Some(last) if last.optional => self.args.len() - 1,
            _ => self.args.len(),
        }
    }
}

/// Resolved arguments, one slot per declared argument
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [ArgValue<'a>],
}

impl<'a> Args<'a> {
    pub fn new(values: &'a [ArgValue<'a>]) -> Self {
        Self { values }
    }

    /// Slot by index (0-based, in declaration order)
    pub fn get(&self, idx: usize) -> Option<ArgValue<'a>> {
        self.values.get(idx).copied()
    }

    /// Integer at `idx`, `None` if omitted
    pub fn int(&self, idx: usize) -> Option<Int> {
        self.get(idx).and_then(|v| v.as_int())
    }

    /// String at `idx`, `None` if omitted
    pub fn str(&self, idx: usize) -> Option<&'a str> {
        self.get(idx).and_then(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &'a [ArgValue<'a>] {
        self.values
    }
}

/// What a handler sees while it runs
///
/// Writing to the context writes to the console output. Use
/// [`Context::newline`] to end lines with the configured terminator.
pub struct Context<'a> {
    out: &'a mut dyn Write,
    commands: &'a [CommandDescriptor],
    newline: &'static str,
    signal: &'a CancelSignal,
}

impl<'a> Context<'a> {
    pub fn new(
        out: &'a mut dyn Write,
        commands: &'a [CommandDescriptor],
        newline: &'static str,
        signal: &'a CancelSignal,
    ) -> Self {
        Self {
            out,
            commands,
            newline,
            signal,
        }
    }

    /// Registered commands, in registration order
    pub fn commands(&self) -> &'a [CommandDescriptor] {
        self.commands
    }

    /// Write the configured line terminator
    pub fn newline(&mut self) {
        let _ = self.out.write_str(self.newline);
    }

    /// Write `s` followed by the line terminator
    pub fn line(&mut self, s: &str) {
        let _ = self.out.write_str(s);
        self.newline();
    }

    /// Check if Ctrl-C is pending for this command
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_raised()
    }

    /// The interrupt signal, for handlers that hand it to other code
    pub fn signal(&self) -> &'a CancelSignal {
        self.signal
    }

    /// Cooperative sleep, see [`CancelSignal::wait_until`]
    pub fn wait_until(&self, condition: impl FnMut() -> bool, idle: impl FnMut()) -> WaitOutcome {
        self.signal.wait_until(condition, idle)
    }
}

impl Write for Context<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.write_str(s)
    }
}
