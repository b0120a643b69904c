//! Global log stream instance.
//!
//! One stream for the whole console: the engine is the only regular
//! producer, the board's drain task (UART or stderr) the only consumer.

use crate::logging::LogStream;

/// Console diagnostic log.
///
/// Receives registration results, dispatches, rejected lines and aborts
/// from every [`Console`](crate::console::Console) built with
/// [`Console::new`](crate::console::Console::new).
pub static CONSOLE_LOG: LogStream = LogStream::new();
