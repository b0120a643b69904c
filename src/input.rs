//! Receive queue between the byte source and the console.
//!
//! ```text
//! UART poll / reader thread      InputQueue          Console loop
//! ─────────────────────────      ──────────          ────────────
//!
//! feed(bytes) ──── Ctrl-C? ───▶ CancelSignal
//!              └─────────────▶ [b0][b1][b2] ──────▶ read() -> process()
//! ```
//!
//! The byte source keeps feeding while a handler runs inside
//! `Console::process`, so a Ctrl-C typed during a long command raises the
//! signal right away. The byte itself stays queued and reaches the line
//! editor once the handler has returned.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::signal::{CancelSignal, INTERRUPT};

/// Default queue size in bytes.
pub const INPUT_QUEUE_SIZE: usize = 256;

/// Process-wide receive queue, raising [`INTERRUPT`].
pub static INPUT: InputQueue = InputQueue::new(&INTERRUPT);

/// Lock-free SPSC byte ring that raises a [`CancelSignal`] on Ctrl-C.
///
/// # Safety
///
/// One producer calls [`feed`](Self::feed) and [`close`](Self::close), one
/// consumer calls [`read`](Self::read). Both may be the same task.
///
/// # Memory Ordering
///
/// - Producer publishes bytes with a `Release` store of `write_idx`
/// - Consumer releases space with a `Release` store of `read_idx`
/// - Each side loads the other's index with `Acquire`
pub struct InputQueue<const N: usize = INPUT_QUEUE_SIZE> {
    bytes: UnsafeCell<[u8; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
    closed: AtomicBool,
    signal: &'static CancelSignal,
}

// SAFETY: Single producer, single consumer, coordinated through the indices.
// The producer writes only free bytes, the consumer reads only published ones.
unsafe impl<const N: usize> Sync for InputQueue<N> {}
unsafe impl<const N: usize> Send for InputQueue<N> {}

impl<const N: usize> InputQueue<N> {
    const MASK: usize = N - 1;

    /// Create an empty queue that raises `signal`.
    pub const fn new(signal: &'static CancelSignal) -> Self {
        assert!(N.is_power_of_two(), "Input queue size must be power of 2");

        Self {
            bytes: UnsafeCell::new([0; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            closed: AtomicBool::new(false),
            signal,
        }
    }

    /// Queue received bytes (never blocks).
    ///
    /// Ctrl-C raises the signal before anything is queued, so it is seen
    /// even when the queue is full. Bytes that do not fit are dropped and
    /// counted. Returns the number of bytes queued.
    pub fn feed(&self, bytes: &[u8]) -> usize {
        self.signal.scan(bytes);

        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);
        let free = N - write.wrapping_sub(read) as usize;
        let count = bytes.len().min(free);

        for (i, &b) in bytes[..count].iter().enumerate() {
            let idx = (write.wrapping_add(i as u32) as usize) & Self::MASK;
            // SAFETY: Single producer, the slot is free until write_idx moves.
            unsafe { (*self.bytes.get())[idx] = b };
        }
        self.write_idx
            .store(write.wrapping_add(count as u32), Ordering::Release);

        if count < bytes.len() {
            self.dropped
                .fetch_add((bytes.len() - count) as u32, Ordering::Relaxed);
        }
        count
    }

    /// Move queued bytes into `out`. Returns how many were copied.
    pub fn read(&self, out: &mut [u8]) -> usize {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        let count = (write.wrapping_sub(read) as usize).min(out.len());

        for (i, slot) in out[..count].iter_mut().enumerate() {
            let idx = (read.wrapping_add(i as u32) as usize) & Self::MASK;
            // SAFETY: Single consumer, the byte was published before write_idx.
            *slot = unsafe { (*self.bytes.get())[idx] };
        }
        self.read_idx
            .store(read.wrapping_add(count as u32), Ordering::Release);
        count
    }

    /// Number of bytes waiting.
    pub fn pending(&self) -> usize {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read) as usize
    }

    /// Mark the source as finished (end of file, closed port).
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// True once the source closed and every byte was read.
    pub fn is_finished(&self) -> bool {
        self.closed.load(Ordering::Acquire) && self.pending() == 0
    }

    /// Bytes dropped because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}
