//! Vendor dialect capability trait
//!
//! Each reader family differs in frame layout, command construction and
//! response interpretation, but shares the checksum and reassembly
//! primitives. A dialect bundles the vendor-specific pieces behind one
//! trait so the scan session stays generic and never branches on vendor
//! identity.

use std::time::Duration;

use bytes::Bytes;

use rfscan_types::{ReaderFamily, TagRecord};

use crate::error::Result;
use crate::reassembler::FrameLayout;
use crate::session::ScanOptions;

/// What a reassembled response frame means for the scan session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Terminal frame; the attempt is done and the final progress update fires
    Complete,

    /// Continuation frame carrying tag records; more frames follow
    Continuation,

    /// Benign terminal state (inquiry timeout); end the attempt silently
    Quiet,

    /// Error status to surface through `on_error`; unrecognized codes carry
    /// the raw byte and no message
    Fault {
        code: u8,
        message: Option<&'static str>,
    },
}

/// Vendor-specific protocol behavior
pub trait Dialect: Send + Sync {
    fn family(&self) -> ReaderFamily;

    fn name(&self) -> &'static str {
        self.family().name()
    }

    /// How frames are delimited in the byte stream
    fn frame_layout(&self) -> FrameLayout;

    /// Build the scan (inventory) command frame
    fn scan_command(&self, options: &ScanOptions) -> Bytes;

    /// Classify a reassembled response frame
    fn interpret(&self, frame: &[u8]) -> Result<Verdict>;

    /// Decode the tag records of a continuation frame
    fn parse_tags(&self, frame: &[u8]) -> Result<Vec<TagRecord>>;

    /// Antenna selection used when the options leave it unset
    fn default_antenna(&self) -> u8;

    /// Delay between poll-loop attempts
    fn poll_delay(&self) -> Duration;

    /// How long the receive loop waits for the next chunk
    fn read_timeout(&self) -> Duration;

    /// Whether a receive timeout ends the attempt normally
    ///
    /// Dialects without a terminal status byte signal attempt completion by
    /// going quiet instead.
    fn idle_completes_attempt(&self) -> bool {
        false
    }
}
