//! # AcmConsole
//!
//! Line-oriented command console for small devices behind a serial or USB
//! CDC-ACM link.
//!
//! ## Architecture
//!
//! The transport feeds raw bytes into [`Console::process`]. The console
//! edits the line, and on return parses it, binds typed arguments and calls
//! the registered handler. Output goes to any [`core::fmt::Write`] sink.
//! - Fixed capacities (const generics), no heap
//! - Single-threaded engine; only [`signal::CancelSignal`] and the
//!   [`input::InputQueue`] feeding it are shared with the byte source
//! - Diagnostics go to a lock-free [`logging::LogStream`], never to the
//!   console sink

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod input;
pub mod log_globals;
pub mod logging;
pub mod signal;

#[cfg(target_os = "espidf")]
pub mod uart_logger;

pub use config::ConsoleConfig;
pub use console::{
    Args, ArgumentDescriptor, CommandDescriptor, Completion, Console, ConsoleError, Context,
    RegisterError, WriteFn,
};
pub use input::{InputQueue, INPUT};
pub use log_globals::CONSOLE_LOG;
pub use logging::{LogLevel, LogStream};
pub use signal::{CancelSignal, WaitOutcome, INTERRUPT};
