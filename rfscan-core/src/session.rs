//! Scan session state and options
//!
//! A session tracks one logical "scan for tags" operation:
//! - where the state machine currently is (sending, awaiting a frame, done)
//! - whether a cooperative stop has been requested
//!
//! The handle is clonable (Arc internally) so a stop can be signalled from
//! outside the receive loop. All state is owned by one session and scoped to
//! its lifetime.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::constants::{DEFAULT_ADDRESS, DEFAULT_SCAN_TIME};

/// How a session reached its terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    /// Last attempt completed (or polling was turned off)
    Complete,

    /// Stopped by `cancel()`
    Cancelled,

    /// An error was surfaced to the caller
    Failed,
}

/// Scan session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No scan in progress
    Idle,

    /// Command frame handed to the transport
    Sending,

    /// Receive loop waiting for response bytes
    AwaitingFrame,

    /// Session over
    Terminal(TerminalKind),
}

/// Clonable scan session handle
///
/// Cancellation is cooperative: the flag is observed at the start of each
/// poll-loop iteration and after each receive wait. It does not abort an
/// in-flight transport read; unblocking a pending read is the transport's
/// concern.
#[derive(Debug, Clone)]
pub struct ScanSession {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    cancelled: AtomicBool,
    state: parking_lot::RwLock<ScanState>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                cancelled: AtomicBool::new(false),
                state: parking_lot::RwLock::new(ScanState::Idle),
            }),
        }
    }

    pub fn state(&self) -> ScanState {
        *self.inner.state.read()
    }

    pub fn set_state(&self, state: ScanState) {
        *self.inner.state.write() = state;
    }

    /// True between `begin()` and the terminal transition
    pub fn is_active(&self) -> bool {
        matches!(self.state(), ScanState::Sending | ScanState::AwaitingFrame)
    }

    /// Request a cooperative stop; idempotent
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Arm the session for a fresh scan: clears the cancel flag
    pub fn begin(&self) {
        self.inner.cancelled.store(false, Ordering::Release);
        self.set_state(ScanState::Sending);
    }

    pub fn finish(&self, kind: TerminalKind) {
        self.set_state(ScanState::Terminal(kind));
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for one scan session
///
/// Unset fields fall back to dialect defaults.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Reader address byte
    pub address: u8,

    /// Antenna selection; `None` uses the dialect default
    pub antenna: Option<u8>,

    /// Inquiry time in units of 100 ms
    pub scan_time: u8,

    /// Keep re-issuing the scan command after each completed attempt
    pub poll: bool,

    /// Inter-attempt delay override
    pub poll_delay: Option<Duration>,

    /// Receive timeout override
    pub read_timeout: Option<Duration>,

    /// Re-verify the trailing checksum of every reassembled frame
    ///
    /// Off by default for parity with reader firmware tooling, which trusts
    /// the declared length and status byte.
    pub verify_checksum: bool,
}

impl ScanOptions {
    pub fn with_antenna(mut self, antenna: u8) -> Self {
        self.antenna = Some(antenna);
        self
    }

    pub fn with_scan_time(mut self, scan_time: u8) -> Self {
        self.scan_time = scan_time;
        self
    }

    /// Single attempt instead of a continuous poll loop
    pub fn single_shot(mut self) -> Self {
        self.poll = false;
        self
    }

    pub fn with_verify_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            antenna: None,
            scan_time: DEFAULT_SCAN_TIME,
            poll: true,
            poll_delay: None,
            read_timeout: None,
            verify_checksum: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_idle() {
        let session = ScanSession::new();
        assert_eq!(session.state(), ScanState::Idle);
        assert!(!session.is_cancelled());
        assert!(!session.is_active());
    }

    #[test]
    fn test_begin_clears_stale_cancel() {
        let session = ScanSession::new();
        session.cancel();
        assert!(session.is_cancelled());

        session.begin();
        assert!(!session.is_cancelled());
        assert_eq!(session.state(), ScanState::Sending);
        assert!(session.is_active());
    }

    #[test]
    fn test_cancel_visible_through_clone() {
        let session = ScanSession::new();
        let handle = session.clone();

        handle.cancel();
        assert!(session.is_cancelled());
    }

    #[test]
    fn test_cancel_idempotent() {
        let session = ScanSession::new();
        session.cancel();
        session.cancel();
        assert!(session.is_cancelled());
    }

    #[test]
    fn test_terminal_states() {
        let session = ScanSession::new();
        session.begin();
        session.finish(TerminalKind::Cancelled);

        assert_eq!(session.state(), ScanState::Terminal(TerminalKind::Cancelled));
        assert!(!session.is_active());
    }
}
