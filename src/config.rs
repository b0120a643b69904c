//! Module: config
//!
//! Purpose: Console build options.
//!
//! Architecture:
//! - Capacities (line length, history depth, command table size) are const
//!   generics on [`Console`](crate::console::Console), so every buffer is
//!   sized at compile time. The defaults below are what `Console<W>` uses.
//! - Behaviour switches and wire strings live in [`ConsoleConfig`], which is
//!   `const`-constructible and can be kept in a `static`.
//!
//! Safety: read-only after the console is built.

/// Default line buffer capacity in bytes (longest line is one less).
pub const DEFAULT_LINE_LENGTH: usize = 64;

/// Default number of remembered lines (0 disables history).
pub const DEFAULT_HISTORY_DEPTH: usize = 4;

/// Default command table capacity, including the built-in `help`.
pub const DEFAULT_MAX_COMMANDS: usize = 16;

/// Maximum number of declared arguments per command.
pub const MAX_ARGS: usize = 10;

/// Ctrl-C, aborts the current line.
pub const CTRL_C: u8 = 0x03;

/// ANSI escape, starts a cursor-key sequence.
pub const ESC: u8 = 0x1B;

/// Console behaviour and wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Cursor movement, insert/delete, escape sequences, history and echo.
    /// When off, the console only collects printable characters and treats
    /// anything else as line corruption.
    pub full_control: bool,
    /// Tab completion of command names and arguments.
    pub tab_complete: bool,
    /// Register the built-in `help` command.
    pub help_command: bool,
    /// Line terminator written after echoed input and error lines.
    pub newline: &'static str,
    /// Prompt printed before each line.
    pub prompt: &'static str,
    /// Byte that submits the line.
    pub return_key: u8,
}

impl ConsoleConfig {
    /// Everything enabled, `"> "` prompt, CR submits, CRLF newline.
    pub const DEFAULT: Self = Self {
        full_control: true,
        tab_complete: true,
        help_command: true,
        newline: "\r\n",
        prompt: "> ",
        return_key: b'\r',
    };

    /// Minimal mode for transports that cannot carry an interactive terminal.
    pub const REDUCED: Self = Self {
        full_control: false,
        tab_complete: false,
        ..Self::DEFAULT
    };

    pub const fn new() -> Self {
        Self::DEFAULT
    }

    pub const fn full_control(mut self, enabled: bool) -> Self {
        self.full_control = enabled;
        self
    }

    pub const fn tab_complete(mut self, enabled: bool) -> Self {
        self.tab_complete = enabled;
        self
    }

    pub const fn help_command(mut self, enabled: bool) -> Self {
        self.help_command = enabled;
        self
    }

    pub const fn newline(mut self, newline: &'static str) -> Self {
        self.newline = newline;
        self
    }

    pub const fn prompt(mut self, prompt: &'static str) -> Self {
        self.prompt = prompt;
        self
    }

    pub const fn return_key(mut self, key: u8) -> Self {
        self.return_key = key;
        self
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_only_requested_fields() {
        const CFG: ConsoleConfig = ConsoleConfig::new().prompt("$ ").return_key(b'\n');

        assert_eq!(CFG.prompt, "$ ");
        assert_eq!(CFG.return_key, b'\n');
        assert!(CFG.full_control);
        assert_eq!(CFG.newline, "\r\n");
    }

    #[test]
    fn test_reduced_disables_editing() {
        assert!(!ConsoleConfig::REDUCED.full_control);
        assert!(!ConsoleConfig::REDUCED.tab_complete);
        assert!(ConsoleConfig::REDUCED.help_command);
    }
}
