//! Interrupt (Ctrl-C) signal shared between the byte source and command
//! handlers.
//!
//! This is the only console state touched from an asynchronous context: the
//! receive ISR (or USB class callback) raises it, long-running handlers poll
//! it. Everything else in the engine has exactly one writer.
//!
//! A handler that waits must re-check the signal every time it wakes, not
//! only on entry, because the interrupt can arrive at any point of the wait.
//! [`CancelSignal::wait_until`] does that.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::CTRL_C;

/// Process-wide interrupt signal.
///
/// Consoles built with [`Console::new`](crate::console::Console::new) hand
/// this one to their handlers.
pub static INTERRUPT: CancelSignal = CancelSignal::new();

/// Result of a cooperative wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition became true.
    Ready,
    /// The signal was raised before the condition became true.
    Cancelled,
}

/// Interrupt-safe cancellation flag.
pub struct CancelSignal {
    /// True while an interrupt is pending.
    raised: AtomicBool,

    /// Total interrupts since boot (never cleared).
    count: AtomicU32,
}

impl CancelSignal {
    /// Create a signal in the cleared state.
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
            count: AtomicU32::new(0),
        }
    }

    /// Raise the signal. Safe from interrupt context.
    #[inline]
    pub fn raise(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.raised.store(true, Ordering::Release);
    }

    /// Raise the signal if `bytes` contain Ctrl-C.
    ///
    /// Meant for the receive path, before the bytes are queued for the
    /// console. Returns whether the signal was raised.
    #[inline]
    pub fn scan(&self, bytes: &[u8]) -> bool {
        let hit = bytes.contains(&CTRL_C);
        if hit {
            self.raise();
        }
        hit
    }

    /// Check if an interrupt is pending.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Clear the pending interrupt.
    #[inline]
    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }

    /// Consume a pending interrupt, returning whether one was pending.
    #[inline]
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }

    /// Get total interrupt count since boot.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Sleep until `condition` holds or the signal is raised.
    ///
    /// `idle` is the platform's "yield until something happens" step (WFI, a
    /// FreeRTOS delay, a thread yield). The signal and the condition are both
    /// re-evaluated after every `idle` call. The signal wins if both are true.
    pub fn wait_until(
        &self,
        mut condition: impl FnMut() -> bool,
        mut idle: impl FnMut(),
    ) -> WaitOutcome {
        loop {
            if self.is_raised() {
                return WaitOutcome::Cancelled;
            }
            if condition() {
                return WaitOutcome::Ready;
            }
            idle();
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}
