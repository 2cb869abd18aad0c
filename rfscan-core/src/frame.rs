//! Command frame construction (length-status dialect)
//!
//! # Frame layout
//!
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────────┬─────────┬─────────┐
//! │   Len   │   Adr   │ Cmd/Sta │   Payload   │ CRC lo  │ CRC hi  │
//! │ 1 byte  │ 1 byte  │ 1 byte  │   N bytes   │ 1 byte  │ 1 byte  │
//! └─────────┴─────────┴─────────┴─────────────┴─────────┴─────────┘
//! ```
//!
//! `Len` counts every byte after itself, checksum included:
//! `Len = 4 + Payload.len()`. There is no end-of-frame delimiter; the length
//! byte is the sole authority for the frame boundary. The checksum covers
//! everything before it and is appended little-endian.

use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum;
use crate::error::{Error, Result};

/// Bytes a frame occupies beyond its payload: Len, Adr, Cmd, CRC x2
pub const FRAME_OVERHEAD: usize = 5;

/// Build an outbound command frame
///
/// # Examples
///
/// ```
/// use rfscan_core::frame;
///
/// let cmd = frame::build_command(0x00, 0x10, &[0x01, 0x02]);
/// assert_eq!(cmd[0], 6); // 4 + payload
/// assert_eq!(cmd.len(), 7);
/// ```
pub fn build_command(address: u8, command: u8, payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(FRAME_OVERHEAD + payload.len());

    buf.put_u8((4 + payload.len()) as u8);
    buf.put_u8(address);
    buf.put_u8(command);
    buf.put_slice(payload);

    let crc = checksum::compute(&buf);
    buf.put_u16_le(crc);

    buf.freeze()
}

/// Verify a received frame's trailing checksum
///
/// Opt-in: most reader firmware tooling trusts the declared length and
/// status byte without re-verifying. Callers enable this through
/// `ScanOptions::verify_checksum`.
pub fn verify(frame: &[u8]) -> Result<()> {
    if frame.len() < 2 {
        return Err(Error::FrameTooShort {
            expected: 2,
            actual: frame.len(),
        });
    }

    let body_len = frame.len() - 2;
    let expected = checksum::compute(&frame[..body_len]);
    let received = u16::from_le_bytes([frame[body_len], frame[body_len + 1]]);

    if expected != received {
        return Err(Error::ChecksumMismatch { expected, received });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_build_command_empty_payload() {
        let frame = build_command(0x00, 0x10, &[]);

        assert_eq!(frame.len(), 5);
        assert_eq!(frame[0], 4);
        assert_eq!(frame[1], 0x00);
        assert_eq!(frame[2], 0x10);
        assert!(verify(&frame).is_ok());
    }

    #[test]
    fn test_build_command_with_payload() {
        // Address 0x00, command 0x10, Data=[0x01, 0x02]
        let frame = build_command(0x00, 0x10, &[0x01, 0x02]);

        assert_eq!(frame[0], 6);
        assert_eq!(&frame[3..5], &[0x01, 0x02]);

        let crc = checksum::compute(&frame[..5]);
        assert_eq!(frame[5], (crc & 0xFF) as u8);
        assert_eq!(frame[6], (crc >> 8) as u8);
    }

    #[test]
    fn test_verify_rejects_corruption() {
        let frame = build_command(0x00, 0x01, &[0xAA, 0xBB]);
        let mut corrupted = frame.to_vec();
        corrupted[3] ^= 0x01;

        assert!(matches!(
            verify(&corrupted),
            Err(Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_too_short() {
        assert!(matches!(verify(&[0x05]), Err(Error::FrameTooShort { .. })));
    }

    proptest! {
        #[test]
        fn prop_round_trip_framing(
            address: u8,
            command: u8,
            payload in proptest::collection::vec(any::<u8>(), 0..=250),
        ) {
            let frame = build_command(address, command, &payload);

            prop_assert_eq!(frame.len(), FRAME_OVERHEAD + payload.len());
            prop_assert_eq!(frame[0] as usize, 4 + payload.len());
            prop_assert_eq!(frame[1], address);
            prop_assert_eq!(frame[2], command);
            prop_assert_eq!(&frame[3..3 + payload.len()], payload.as_slice());

            let crc = checksum::compute(&frame[..frame.len() - 2]);
            prop_assert_eq!(frame[frame.len() - 2], (crc & 0xFF) as u8);
            prop_assert_eq!(frame[frame.len() - 1], (crc >> 8) as u8);
            prop_assert!(verify(&frame).is_ok());
        }
    }
}
