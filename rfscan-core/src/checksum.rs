//! Frame checksum algorithm
//!
//! The vendor documentation calls this "CRC16 Modbus", but it is not: it is a
//! bit-reversed CRC-16/CCITT variant (reflected polynomial 0x8408, initial
//! value 0xFFFF, no final XOR). Both reader families append it to every frame
//! as two little-endian bytes. The bit-level loop below must be reproduced
//! exactly to stay wire-compatible; a table-driven textbook CRC-16 yields
//! different values.

/// Calculate the 16-bit frame checksum
///
/// # Algorithm
///
/// ```text
/// crc = 0xFFFF
/// for each byte:
///     crc ^= byte
///     repeat 8 times:
///         if crc & 1 { crc = (crc >> 1) ^ 0x8408 } else { crc >>= 1 }
/// ```
///
/// # Examples
///
/// ```
/// use rfscan_core::checksum;
///
/// assert_eq!(checksum::compute(&[]), 0xFFFF);
/// assert_eq!(checksum::compute(&[0x05, 0x00, 0x10]), 0x100F);
/// ```
pub fn compute(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;

    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ 0x8408;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

/// Verify the trailing little-endian checksum of a complete frame
///
/// Returns `false` for frames shorter than the two checksum bytes.
pub fn verify_frame(frame: &[u8]) -> bool {
    let Some(body_len) = frame.len().checked_sub(2) else {
        return false;
    };

    let expected = compute(&frame[..body_len]);
    let received = u16::from_le_bytes([frame[body_len], frame[body_len + 1]]);

    expected == received
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_initial_value() {
        assert_eq!(compute(&[]), 0xFFFF);
    }

    #[test]
    fn test_pinned_regression_vector() {
        // Known-good value for the frame header [0x05, 0x00, 0x10].
        assert_eq!(compute(&[0x05, 0x00, 0x10]), 0x100F);
    }

    #[test]
    fn test_deterministic() {
        let data = [0x0F, 0x00, 0x01, 0x2F, 0xFF, 0x01, 0x00, 0x00];
        assert_eq!(compute(&data), compute(&data));
    }

    #[test]
    fn test_single_byte_sensitivity() {
        assert_ne!(compute(&[0x00]), compute(&[0x01]));
    }

    #[test]
    fn test_verify_frame() {
        let mut frame = vec![0x05, 0x00, 0x10];
        let crc = compute(&frame);
        frame.push((crc & 0xFF) as u8);
        frame.push((crc >> 8) as u8);

        assert!(verify_frame(&frame));

        frame[1] ^= 0xFF;
        assert!(!verify_frame(&frame));
    }

    #[test]
    fn test_verify_frame_too_short() {
        assert!(!verify_frame(&[]));
        assert!(!verify_frame(&[0x01]));
    }
}
