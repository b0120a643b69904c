//! Console engine: input state machine, redraw, dispatch
//!
//! Fed raw bytes by the transport through [`Console::process`]. Writes echo,
//! prompts, error lines and handler output to its sink in call order.

use core::fmt::{self, Write};

use super::codec::ArgValue;
use super::commands::{Args, CommandDescriptor, Completion, Context, Handler};
use super::completion::{complete, Candidates, Completed};
use super::help::HELP;
use super::history::History;
use super::line_buffer::{LineBuffer, LineFault};
use super::parser::{bind_args, parse_line};
use super::registry::Registry;
use super::{ConsoleError, RegisterError};
use crate::config::{
    ConsoleConfig, CTRL_C, DEFAULT_HISTORY_DEPTH, DEFAULT_LINE_LENGTH, DEFAULT_MAX_COMMANDS, ESC,
};
use crate::log_globals::CONSOLE_LOG;
use crate::logging::LogStream;
use crate::signal::{CancelSignal, INTERRUPT};
use crate::{log_debug, log_info, log_warn};

const BACKSPACE: u8 = 0x08;
const DEL: u8 = 0x7F;
const TAB: u8 = b'\t';

/// Cursor key escape sequence progress (`ESC [ x`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Idle,
    SawEscape,
    SawBracket,
}

/// Output sink wrapping a plain write function
#[derive(Clone, Copy)]
pub struct WriteFn(pub fn(&str));

impl Write for WriteFn {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        (self.0)(s);
        Ok(())
    }
}

/// Console state machine
///
/// `LINE` is the line buffer capacity (longest line is `LINE - 1`),
/// `HISTORY` the number of remembered lines, `COMMANDS` the command table
/// size including `help`.
pub struct Console<
    W: Write,
    const LINE: usize = DEFAULT_LINE_LENGTH,
    const HISTORY: usize = DEFAULT_HISTORY_DEPTH,
    const COMMANDS: usize = DEFAULT_MAX_COMMANDS,
> {
    out: W,
    config: ConsoleConfig,
    registry: Registry<COMMANDS>,
    line: LineBuffer<LINE>,
    history: History<HISTORY, LINE>,
    escape: EscapeState,
    /// Start of typed characters not yet echoed
    echo_from: Option<usize>,
    /// Set while a handler runs
    busy: bool,
    signal: &'static CancelSignal,
    log: &'static LogStream,
}

impl<W: Write, const LINE: usize, const HISTORY: usize, const COMMANDS: usize>
    Console<W, LINE, HISTORY, COMMANDS>
{
    /// Create a console writing to `out`.
    ///
    /// Registers `help` first when enabled. Nothing is written until
    /// [`start`](Self::start).
    pub fn new(out: W, config: ConsoleConfig) -> Self {
        let mut console = Self {
            out,
            config,
            registry: Registry::new(LINE),
            line: LineBuffer::new(),
            history: History::new(),
            escape: EscapeState::Idle,
            echo_from: None,
            busy: false,
            signal: &INTERRUPT,
            log: &CONSOLE_LOG,
        };
        if config.help_command {
            let _ = console.register(&HELP);
        }
        console
    }

    /// Use `signal` instead of the global [`INTERRUPT`]
    pub fn with_signal(mut self, signal: &'static CancelSignal) -> Self {
        self.signal = signal;
        self
    }

    /// Log into `log` instead of the global [`CONSOLE_LOG`]
    pub fn with_log(mut self, log: &'static LogStream) -> Self {
        self.log = log;
        self
    }

    /// Add a command. Must happen before input is processed.
    pub fn register(&mut self, cmd: &CommandDescriptor) -> Result<(), RegisterError> {
        match self.registry.register(cmd) {
            Ok(()) => {
                log_debug!(self.log, "registered '{}'", cmd.name);
                Ok(())
            }
            Err(e) => {
                log_warn!(self.log, "register '{}' failed: {}", cmd.name, e);
                Err(e)
            }
        }
    }

    /// Print the first prompt
    pub fn start(&mut self) {
        let _ = self.out.write_str(self.config.newline);
        let _ = self.out.write_str(self.config.prompt);
    }

    /// Feed received bytes
    pub fn process(&mut self, bytes: &[u8]) {
        if self.config.full_control {
            for &byte in bytes {
                self.process_byte(byte);
            }
            self.flush_echo();
        } else {
            for &byte in bytes {
                self.process_reduced(byte);
            }
        }
    }

    /// Print a status line without corrupting the line being typed.
    ///
    /// The visible line is erased, `text` is printed on its own line, then
    /// the prompt and the pending input are redrawn with the cursor where it
    /// was. While a handler runs only `text` is printed.
    pub fn print_line(&mut self, text: &str) {
        let newline = self.config.newline;
        if !self.config.full_control || self.busy {
            let _ = self.out.write_str(text);
            let _ = self.out.write_str(newline);
            return;
        }

        self.flush_echo();
        erase_line(&mut self.out, &self.line, self.config.prompt.len(), text.len());
        let _ = self.out.write_str(text);
        let _ = self.out.write_str(newline);
        let _ = self.out.write_str(self.config.prompt);
        if !self.line.is_invalid() {
            let _ = self.out.write_str(self.line.as_str());
            repeat(&mut self.out, "\x08", self.line.len() - self.line.cursor());
        }
    }

    /// True while a command handler is running
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Line being edited
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    /// Cursor position in the line being edited
    pub fn cursor(&self) -> usize {
        self.line.cursor()
    }

    /// True if the line overflowed or (reduced mode) got a control byte
    pub fn line_invalid(&self) -> bool {
        self.line.is_invalid()
    }

    pub fn history(&self) -> &History<HISTORY, LINE> {
        &self.history
    }

    pub fn registry(&self) -> &Registry<COMMANDS> {
        &self.registry
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    // ------------------------------------------------------------------
    // Rich mode
    // ------------------------------------------------------------------

    fn process_byte(&mut self, byte: u8) {
        match self.escape {
            EscapeState::SawEscape => {
                self.escape = if byte == b'[' {
                    EscapeState::SawBracket
                } else {
                    EscapeState::Idle
                };
                return;
            }
            EscapeState::SawBracket => {
                self.escape = EscapeState::Idle;
                self.flush_echo();
                self.cursor_key(byte);
                return;
            }
            EscapeState::Idle => {}
        }

        let invalid = self.line.is_invalid();
        match byte {
            ESC => self.escape = EscapeState::SawEscape,
            b if b == self.config.return_key => {
                self.flush_echo();
                let _ = self.out.write_str(self.config.newline);
                self.commit();
            }
            CTRL_C => {
                self.signal.clear();
                self.flush_echo();
                let _ = self.out.write_str(self.config.newline);
                log_debug!(self.log, "line aborted");
                self.reset_line();
            }
            BACKSPACE | DEL if !invalid => {
                self.flush_echo();
                self.backspace();
            }
            TAB if !invalid && self.config.tab_complete => {
                self.flush_echo();
                self.tab_complete();
            }
            0x20..=0x7E if !invalid => self.insert(byte),
            _ => {}
        }
    }

    fn insert(&mut self, byte: u8) {
        if self.line.at_end() {
            let start = self.line.len();
            if self.line.insert(byte) {
                self.echo_from.get_or_insert(start);
            } else {
                log_warn!(self.log, "line overflow at {} chars", start);
            }
            return;
        }

        self.flush_echo();
        let start = self.line.cursor();
        if self.line.insert(byte) {
            let _ = self.out.write_str(self.line.tail(start));
            repeat(&mut self.out, "\x08", self.line.len() - self.line.cursor());
        } else {
            log_warn!(self.log, "line overflow at {} chars", self.line.len());
        }
    }

    fn backspace(&mut self) {
        if !self.line.backspace() {
            return;
        }
        let _ = self.out.write_str("\x08 \x08");
        if !self.line.at_end() {
            let cursor = self.line.cursor();
            let _ = self.out.write_str(self.line.tail(cursor));
            let _ = self.out.write_str(" ");
            repeat(&mut self.out, "\x08", self.line.len() - cursor + 1);
        }
    }

    fn cursor_key(&mut self, key: u8) {
        match key {
            b'C' => {
                if let Some(c) = self.line.at_cursor() {
                    self.line.move_right();
                    let _ = self.out.write_char(char::from(c));
                }
            }
            b'D' => {
                if self.line.move_left() {
                    let _ = self.out.write_str("\x08");
                }
            }
            b'A' => self.recall(true),
            b'B' => self.recall(false),
            _ => {}
        }
    }

    /// Replace the line with an older or newer history entry
    fn recall(&mut self, older: bool) {
        let entry = if older {
            self.history.older()
        } else {
            self.history.newer()
        };
        let Some(entry) = entry else {
            return;
        };

        let prompt = self.config.prompt;
        erase_line(&mut self.out, &self.line, prompt.len(), prompt.len() + entry.len());
        self.line.set(entry);
        let _ = self.out.write_str(prompt);
        let _ = self.out.write_str(self.line.as_str());
    }

    fn tab_complete(&mut self) {
        let (source, offset) = self.completion_source();
        let result = complete(
            &self.line.as_str()[offset..],
            Candidates::new(source, self.registry.names()),
        );

        match result {
            Completed::Nothing => {}
            Completed::Extend(extension) => {
                self.move_to_end();
                let start = self.line.len();
                for b in extension.bytes() {
                    if !self.line.insert(b) {
                        log_warn!(self.log, "line overflow at {} chars", self.line.len());
                        break;
                    }
                }
                let _ = self.out.write_str(self.line.tail(start));
            }
            Completed::Ambiguous => {
                self.move_to_end();
                let newline = self.config.newline;
                let _ = self.out.write_str(newline);

                let prefix = &self.line.as_str()[offset..];
                let matches = Candidates::new(source, self.registry.names())
                    .filter(|c| c.starts_with(prefix));
                for (i, candidate) in matches.enumerate() {
                    if i > 0 {
                        let _ = self.out.write_str(" ");
                    }
                    let _ = self.out.write_str(candidate);
                }

                let _ = self.out.write_str(newline);
                let _ = self.out.write_str(self.config.prompt);
                let _ = self.out.write_str(self.line.as_str());
            }
        }
    }

    /// Candidate source for the line and where its prefix starts.
    ///
    /// After `"<name> "` of a command with its own source, complete the rest
    /// against that source; otherwise complete the whole line as a command.
    fn completion_source(&self) -> (Completion, usize) {
        let text = self.line.as_str();
        self.registry
            .commands()
            .iter()
            .find(|c| {
                text.strip_prefix(c.name)
                    .is_some_and(|rest| rest.starts_with(' '))
            })
            .and_then(|c| c.completion.map(|source| (source, c.name.len() + 1)))
            .unwrap_or((Completion::Commands, 0))
    }

    fn move_to_end(&mut self) {
        if !self.line.at_end() {
            let cursor = self.line.cursor();
            let _ = self.out.write_str(self.line.tail(cursor));
            self.line.move_end();
        }
    }

    fn flush_echo(&mut self) {
        if let Some(start) = self.echo_from.take() {
            let _ = self.out.write_str(self.line.tail(start));
        }
    }

    // ------------------------------------------------------------------
    // Reduced mode
    // ------------------------------------------------------------------

    fn process_reduced(&mut self, byte: u8) {
        if byte == self.config.return_key {
            self.commit();
        } else if byte == CTRL_C {
            self.signal.clear();
            self.line.invalidate();
        } else if !self.line.is_invalid() && (0x20..=0x7E).contains(&byte) {
            if !self.line.insert(byte) {
                log_warn!(self.log, "line overflow at {} chars", self.line.len());
            }
        } else {
            self.line.invalidate();
        }
    }

    // ------------------------------------------------------------------
    // Commit and dispatch
    // ------------------------------------------------------------------

    fn commit(&mut self) {
        match self.line.fault() {
            Some(LineFault::Overflow) => self.report(&ConsoleError::LineTooLong),
            Some(LineFault::Corrupt) => log_debug!(self.log, "discarded corrupted line"),
            None => self.process_line(),
        }
        self.reset_line();
    }

    fn process_line(&mut self) {
        let newline = self.config.newline;
        let text = self.line.as_str();

        let parsed = match parse_line(text) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return,
            Err(e) => {
                report(&mut self.out, self.log, newline, &e);
                return;
            }
        };

        self.history.push(text);

        let Some(cmd) = self.registry.lookup(parsed.command) else {
            report(
                &mut self.out,
                self.log,
                newline,
                &ConsoleError::UnknownCommand(parsed.command),
            );
            return;
        };

        let slots = match bind_args(cmd, &parsed) {
            Ok(slots) => slots,
            Err(e) => {
                report(&mut self.out, self.log, newline, &e);
                return;
            }
        };

        log_info!(self.log, "exec '{}' ({} args)", cmd.name, parsed.arg_count());
        // A Ctrl-C already received but not yet processed belongs to this
        // command; one that aborted an earlier line was cleared then.
        self.busy = true;
        let mut ctx = Context::new(&mut self.out, self.registry.commands(), newline, self.signal);
        run(cmd.handler, &mut ctx, &slots);
        self.signal.clear();
        self.busy = false;
    }

    fn report(&mut self, err: &ConsoleError<'_>) {
        report(&mut self.out, self.log, self.config.newline, err);
    }

    /// Start a fresh line and print the prompt
    fn reset_line(&mut self) {
        self.history.reset_nav();
        self.escape = EscapeState::Idle;
        self.echo_from = None;
        self.line.clear();
        let _ = self.out.write_str(self.config.prompt);
    }
}

fn run(handler: Handler, ctx: &mut Context<'_>, slots: &[ArgValue<'_>]) {
    match handler {
        Handler::NoArgs(f) => f(ctx),
        Handler::WithArgs(f) => f(ctx, &Args::new(slots)),
    }
}

fn report<W: Write>(out: &mut W, log: &LogStream, newline: &str, err: &ConsoleError<'_>) {
    log_debug!(log, "{}", err);
    let _ = write!(out, "{}{}", err, newline);
}

/// Clear the visible prompt and line before something `new_width` columns
/// wide is drawn over it, leaving the terminal cursor in column 0.
///
/// Only the surplus columns are blanked.
fn erase_line<W: Write, const N: usize>(
    out: &mut W,
    line: &LineBuffer<N>,
    prompt_len: usize,
    new_width: usize,
) {
    let old_width = prompt_len + line.len();
    if new_width < old_width {
        let _ = out.write_str(line.tail(line.cursor()));
        let surplus = old_width - new_width;
        repeat(out, "\x08", surplus);
        repeat(out, " ", surplus);
    }
    let _ = out.write_str("\r");
}

fn repeat<W: Write>(out: &mut W, s: &str, n: usize) {
    for _ in 0..n {
        let _ = out.write_str(s);
    }
}
