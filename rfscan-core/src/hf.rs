//! HF network reader dialect (fixed-length family)
//!
//! Much simpler than the length-status family: every response frame is
//! exactly 19 bytes and carries one tag read. There is no status byte, so an
//! attempt is over when the reader goes quiet rather than when a terminal
//! frame arrives.

use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};

use rfscan_types::{ReaderFamily, TagRecord};

use crate::checksum;
use crate::constants::{FIXED_FRAME_LEN, HF_SCAN_HEADER};
use crate::dialect::{Dialect, Verdict};
use crate::error::{Error, Result};
use crate::reassembler::FrameLayout;
use crate::session::ScanOptions;
use crate::tag;

const DEFAULT_ANTENNA: u8 = 0xFF;

/// HF fixed-length dialect
#[derive(Debug, Default, Clone, Copy)]
pub struct Hf;

impl Dialect for Hf {
    fn family(&self) -> ReaderFamily {
        ReaderFamily::Hf
    }

    fn frame_layout(&self) -> FrameLayout {
        FrameLayout::Fixed(FIXED_FRAME_LEN)
    }

    /// 7-byte scan command plus checksum; the embedded length byte counts
    /// the command and the two checksum bytes
    fn scan_command(&self, options: &ScanOptions) -> Bytes {
        let antenna = options.antenna.unwrap_or(DEFAULT_ANTENNA);

        let mut buf = BytesMut::with_capacity(9);
        buf.put_slice(&HF_SCAN_HEADER);
        buf.put_u8(9); // command length + 2 checksum bytes
        buf.put_u8(antenna);
        buf.put_u8(0x01);
        buf.put_u8(0x01);

        let crc = checksum::compute(&buf);
        buf.put_u16_le(crc);

        buf.freeze()
    }

    /// Every well-formed frame is one tag read; completion comes from the
    /// reader going quiet, not from a status byte
    fn interpret(&self, frame: &[u8]) -> Result<Verdict> {
        if frame.len() != FIXED_FRAME_LEN {
            return Err(Error::FrameTooShort {
                expected: FIXED_FRAME_LEN,
                actual: frame.len(),
            });
        }

        Ok(Verdict::Continuation)
    }

    fn parse_tags(&self, frame: &[u8]) -> Result<Vec<TagRecord>> {
        Ok(vec![tag::parse_fixed_record(frame)?])
    }

    fn default_antenna(&self) -> u8 {
        DEFAULT_ANTENNA
    }

    fn poll_delay(&self) -> Duration {
        Duration::from_millis(300)
    }

    fn read_timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn idle_completes_attempt(&self) -> bool {
        true
    }
}
