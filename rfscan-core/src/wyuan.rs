//! W-Yuan UHF reader dialect (length-status family)
//!
//! Frames are length-prefixed: `[Len][Adr][...][CRC_lo][CRC_hi]` with `Len`
//! counting everything after itself. Inbound response frames are
//! `[Len][Adr][reCmd][Status][Data...][CRC]`: the status byte sits at
//! offset 3, and the tag payload of a continuation frame starts at offset 6
//! after two inquiry parameter bytes.

use std::time::Duration;

use bytes::Bytes;

use rfscan_types::{ReaderFamily, TagRecord};

use crate::constants::{CMD_INVENTORY, inventory};
use crate::dialect::{Dialect, Verdict};
use crate::error::{Error, Result};
use crate::frame;
use crate::reassembler::FrameLayout;
use crate::session::ScanOptions;
use crate::status::Status;
use crate::tag;

/// Offset of the status byte in an inbound frame
const STATUS_OFFSET: usize = 3;
/// Offset of the first tag record in a continuation frame
const PAYLOAD_OFFSET: usize = 6;
/// Smallest interpretable inbound frame: Len, Adr, reCmd, Status, CRC x2
const MIN_FRAME_LEN: usize = 6;

/// W-Yuan length-status dialect
#[derive(Debug, Default, Clone, Copy)]
pub struct WYuan;

impl Dialect for WYuan {
    fn family(&self) -> ReaderFamily {
        ReaderFamily::WYuan
    }

    fn frame_layout(&self) -> FrameLayout {
        FrameLayout::LengthPrefixed
    }

    /// Inventory command (0x01) with the EPC inquiry parameter block
    fn scan_command(&self, options: &ScanOptions) -> Bytes {
        let antenna = options.antenna.unwrap_or(inventory::DEFAULT_ANTENNA);

        let data = [
            inventory::Q_VALUE,
            inventory::SESSION,
            inventory::MASK_MEM_EPC,
            inventory::MASK_ADR[0],
            inventory::MASK_ADR[1],
            inventory::MASK_LEN,
            inventory::ADR_TID,
            inventory::LEN_TID,
            inventory::TARGET,
            antenna,
            options.scan_time,
        ];

        frame::build_command(options.address, CMD_INVENTORY, &data)
    }

    fn interpret(&self, frame: &[u8]) -> Result<Verdict> {
        if frame.len() < MIN_FRAME_LEN {
            return Err(Error::FrameTooShort {
                expected: MIN_FRAME_LEN,
                actual: frame.len(),
            });
        }

        let raw = frame[STATUS_OFFSET];
        let verdict = match Status::try_from(raw) {
            Ok(status) if status.is_complete() => Verdict::Complete,
            Ok(status) if status.is_continuation() => Verdict::Continuation,
            Ok(Status::OverTime) => Verdict::Quiet,
            Ok(status) => Verdict::Fault {
                code: raw,
                message: status.message(),
            },
            Err(raw) => Verdict::Fault {
                code: raw,
                message: None,
            },
        };

        Ok(verdict)
    }

    fn parse_tags(&self, frame: &[u8]) -> Result<Vec<TagRecord>> {
        if frame.len() < PAYLOAD_OFFSET + 2 {
            return Err(Error::FrameTooShort {
                expected: PAYLOAD_OFFSET + 2,
                actual: frame.len(),
            });
        }

        tag::parse_records(&frame[PAYLOAD_OFFSET..frame.len() - 2])
    }

    fn default_antenna(&self) -> u8 {
        inventory::DEFAULT_ANTENNA
    }

    fn poll_delay(&self) -> Duration {
        Duration::from_millis(100)
    }

    fn read_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }
}
