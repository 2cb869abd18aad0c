//! Tag record decoding
//!
//! Two layouts exist across the supported reader families:
//!
//! - A length-prefixed record list (length-status dialect): each record is
//!   `[head][TID x N][RSSI]` where the head byte packs two flag bits and the
//!   TID byte count, and records repeat until the slice is exhausted.
//! - A fixed-offset single record (fixed-length dialect): one tag per
//!   19-byte frame at hard-coded offsets.

use tracing::trace;

use rfscan_types::TagRecord;

use crate::constants::FIXED_FRAME_LEN;
use crate::error::{Error, Result};

/// Head byte: bit 7 = FastID flag
const FLAG_FAST_ID: u8 = 0x80;
/// Head byte: bit 6 = phase/frequency data present
const FLAG_PHASE_FREQ: u8 = 0x40;
/// Head byte: bits 5-0 = TID byte count
const TID_LEN_MASK: u8 = 0x3F;

/// Decode a length-prefixed sequence of tag records
///
/// Iterates a cursor over `[head][TID x N][RSSI]` records until the payload
/// is exhausted. An empty payload decodes to an empty list. A head byte whose
/// declared TID length overruns the remaining bytes is a malformed payload.
pub fn parse_records(payload: &[u8]) -> Result<Vec<TagRecord>> {
    let mut records = Vec::new();
    let mut cursor = 0;

    while cursor < payload.len() {
        let head = payload[cursor];
        let tid_len = (head & TID_LEN_MASK) as usize;

        // TID bytes plus the trailing RSSI byte must fit
        let rssi_at = cursor + 1 + tid_len;
        if rssi_at >= payload.len() {
            return Err(Error::MalformedPayload {
                offset: cursor,
                available: payload.len(),
            });
        }

        if head & (FLAG_FAST_ID | FLAG_PHASE_FREQ) != 0 {
            trace!(
                fast_id = head & FLAG_FAST_ID != 0,
                phase_freq = head & FLAG_PHASE_FREQ != 0,
                "record head flags set"
            );
        }

        let tid = hex::encode_upper(&payload[cursor + 1..rssi_at]);
        records.push(TagRecord::new(tid, payload[rssi_at]));

        cursor = rssi_at + 1;
    }

    Ok(records)
}

/// Decode the single tag record of a fixed-length (19-byte) frame
///
/// Offsets per the reader manual: antenna at byte 4, RSSI at byte 6, TID at
/// bytes 10 through 16 (everything between the header fields and the
/// checksum).
pub fn parse_fixed_record(frame: &[u8]) -> Result<TagRecord> {
    if frame.len() != FIXED_FRAME_LEN {
        return Err(Error::FrameTooShort {
            expected: FIXED_FRAME_LEN,
            actual: frame.len(),
        });
    }

    let tid = hex::encode_upper(&frame[10..FIXED_FRAME_LEN - 2]);

    Ok(TagRecord {
        tid,
        rssi: frame[6],
        antenna: Some(frame[4]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_payload_yields_no_records() {
        assert_eq!(parse_records(&[]).unwrap(), vec![]);
    }

    #[test]
    fn test_single_record() {
        // N=2, TID=ABCD, RSSI=70
        let records = parse_records(&[0x02, 0xAB, 0xCD, 70]).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tid, "ABCD");
        assert_eq!(records[0].rssi, 70);
        assert_eq!(records[0].antenna, None);
    }

    #[test]
    fn test_multiple_records() {
        let payload = [
            0x02, 0xAB, 0xCD, 70, // first record
            0x03, 0x01, 0x02, 0x03, 65, // second record
        ];
        let records = parse_records(&payload).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tid, "ABCD");
        assert_eq!(records[1].tid, "010203");
        assert_eq!(records[1].rssi, 65);
    }

    #[test]
    fn test_flag_bits_do_not_extend_tid_length() {
        // FastID + PhaseFreq flags set, N still 2
        let records = parse_records(&[0xC2, 0xAB, 0xCD, 70]).unwrap();
        assert_eq!(records[0].tid, "ABCD");
    }

    #[test]
    fn test_overrunning_length_is_malformed() {
        // Head declares 8 TID bytes, only 2 present
        let result = parse_records(&[0x08, 0xAB, 0xCD]);

        assert!(matches!(
            result,
            Err(Error::MalformedPayload {
                offset: 0,
                available: 3
            })
        ));
    }

    #[test]
    fn test_truncated_second_record_is_malformed() {
        let payload = [0x02, 0xAB, 0xCD, 70, 0x04, 0x01];
        let result = parse_records(&payload);

        assert!(matches!(
            result,
            Err(Error::MalformedPayload { offset: 4, .. })
        ));
    }

    #[test]
    fn test_missing_rssi_is_malformed() {
        // TID fits exactly but leaves no room for the RSSI byte
        assert!(parse_records(&[0x02, 0xAB, 0xCD]).is_err());
    }

    #[test]
    fn test_fixed_record_offsets() {
        let mut frame = [0u8; 19];
        frame[4] = 3; // antenna
        frame[6] = 72; // rssi
        frame[10..17].copy_from_slice(&[0xE2, 0x00, 0x47, 0x0C, 0x5A, 0x60, 0x21]);

        let record = parse_fixed_record(&frame).unwrap();
        assert_eq!(record.tid, "E200470C5A6021");
        assert_eq!(record.rssi, 72);
        assert_eq!(record.antenna, Some(3));
    }

    #[test]
    fn test_fixed_record_wrong_length() {
        assert!(parse_fixed_record(&[0u8; 18]).is_err());
    }
}
