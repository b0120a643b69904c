//! Allocation-free diagnostic logging for the console.
//!
//! # Architecture
//!
//! ```text
//! Console engine          LogStream            Drain task
//! ──────────────          ─────────            ──────────
//!
//! log_warn!() ──────────▶ [L0][L1][L2] ──────▶ UART / stderr
//! never blocks            lock-free            blocking ok
//!                         ring buffer
//! ```
//!
//! # Rules
//!
//! - Logging never writes to the console sink; the user's terminal only
//!   sees prompts, echo and command output.
//! - `push` never blocks and never allocates. Messages are dropped (and
//!   counted) when the ring is full.
//! - Each accepted entry carries a sequence number so a drain can spot gaps.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 80;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 32;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Position of this entry in the stream (wraps at `u32::MAX`).
    pub seq: u32,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        seq: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text, or a placeholder if it was cut inside a UTF-8 sequence.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Lock-free log stream (multiple producers, single consumer).
///
/// - Any context can push (slots are claimed with an atomic compare-exchange)
/// - Push never blocks (drops the message if full)
/// - One drain task empties it at leisure
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    /// Per-slot commit stamp: `seq + 1` of the last entry fully written there.
    stamps: [AtomicU32; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: Producers are coordinated via compare-exchange on write_idx, each
// one owns the slot it claimed until it publishes the slot's stamp. The
// single consumer reads a slot only after seeing its stamp, and producers
// reuse it only after the consumer advanced read_idx past it.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    #[allow(clippy::declare_interior_mutable_const)]
    const UNSTAMPED: AtomicU32 = AtomicU32::new(0);

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            stamps: [Self::UNSTAMPED; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry (never blocks).
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    #[inline]
    pub fn push(&self, level: LogLevel, msg: &[u8]) -> bool {
        let mut write = self.write_idx.load(Ordering::Acquire);
        loop {
            let read = self.read_idx.load(Ordering::Acquire);
            if write.wrapping_sub(read) >= N as u32 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.write_idx.compare_exchange_weak(
                write,
                write.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(current) => write = current,
            }
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: The index was claimed by the CAS above, no other producer holds it.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.seq = write;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }
        self.stamps[idx].store(write.wrapping_add(1), Ordering::Release);

        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no entries available, or if the oldest claimed
    /// slot is still being written.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let idx = (read as usize) & Self::MASK;

        if self.stamps[idx].load(Ordering::Acquire) != read.wrapping_add(1) {
            return None;
        }

        // SAFETY: Single consumer. The stamp shows the producer finished this
        // slot, and no producer reclaims it before read_idx moves past it.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Drain every pending entry into `out`, one formatted line each.
    ///
    /// Returns the number of entries written.
    pub fn drain_to(&self, out: &mut dyn core::fmt::Write) -> usize {
        let mut buf = [0u8; MAX_MSG_LEN + 32];
        let mut count = 0;
        while let Some(entry) = self.drain() {
            let len = format_entry(&entry, &mut buf);
            if let Ok(line) = core::str::from_utf8(&buf[..len]) {
                let _ = out.write_str(line);
            }
            count += 1;
        }
        count
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Check if there are entries to drain.
    #[inline]
    pub fn has_entries(&self) -> bool {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        read != write
    }

    /// Get number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-buffer `core::fmt::Write` sink. Output past the end is cut off.
struct BufWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl core::fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Render an entry as `[seq] LEVEL: message\n`.
///
/// Returns the number of bytes written.
pub fn format_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    format_to_buffer(
        buf,
        format_args!("[{:6}] {}: {}\n", entry.seq, entry.level.as_str(), entry.message()),
    )
}

/// Log macro, formats on the stack and pushes to a [`LogStream`].
///
/// # Example
///
/// ```ignore
/// log_event!(LogLevel::Info, CONSOLE_LOG, "dispatch {}", name);
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:expr, $stream:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($level, &buf[..len]);
    }};
}

/// Info log.
#[macro_export]
macro_rules! log_info {
    ($stream:expr, $($arg:tt)*) => {
        $crate::log_event!($crate::logging::LogLevel::Info, $stream, $($arg)*)
    };
}

/// Warning log.
#[macro_export]
macro_rules! log_warn {
    ($stream:expr, $($arg:tt)*) => {
        $crate::log_event!($crate::logging::LogLevel::Warn, $stream, $($arg)*)
    };
}

/// Error log.
#[macro_export]
macro_rules! log_error {
    ($stream:expr, $($arg:tt)*) => {
        $crate::log_event!($crate::logging::LogLevel::Error, $stream, $($arg)*)
    };
}

/// Debug log.
#[macro_export]
macro_rules! log_debug {
    ($stream:expr, $($arg:tt)*) => {
        $crate::log_event!($crate::logging::LogLevel::Debug, $stream, $($arg)*)
    };
}

/// Trace log (maximum verbosity).
#[macro_export]
macro_rules! log_trace {
    ($stream:expr, $($arg:tt)*) => {
        $crate::log_event!($crate::logging::LogLevel::Trace, $stream, $($arg)*)
    };
}
