//! Stream reassembly
//!
//! The transport delivers raw byte chunks of arbitrary size: one read may
//! carry less than a frame, exactly one frame, or several frames. The
//! reassembler owns the in-progress accumulation buffer and turns that chunk
//! stream back into discrete frames.
//!
//! For the length-status dialect the first byte of a new frame declares how
//! many bytes follow it, so the total frame size is `first + 1`. The
//! fixed-length dialect uses a constant target instead. In both cases there
//! is no end-of-frame delimiter to resynchronize on, which is why the buffer
//! and its target length are reset only on frame completion or stream end.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::error::{Error, Result};

/// How a dialect delimits frames in the byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLayout {
    /// First byte declares the count of bytes after itself
    LengthPrefixed,

    /// Every frame is exactly this many bytes
    Fixed(usize),
}

impl FrameLayout {
    fn target_for(self, first_byte: u8) -> usize {
        match self {
            // +1 for the length byte itself
            Self::LengthPrefixed => first_byte as usize + 1,
            Self::Fixed(len) => len,
        }
    }
}

/// Chunk-boundary-tolerant frame reassembler
///
/// # Examples
///
/// ```
/// use rfscan_core::reassembler::{FrameLayout, Reassembler};
///
/// let mut reasm = Reassembler::new(FrameLayout::LengthPrefixed);
/// assert!(reasm.feed(&[0x04, 0x00]).is_empty()); // partial
/// let frames = reasm.feed(&[0x01, 0xAA, 0xBB]);
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].len(), 5);
/// ```
#[derive(Debug)]
pub struct Reassembler {
    layout: FrameLayout,
    buf: BytesMut,
    target: usize,
}

impl Reassembler {
    pub fn new(layout: FrameLayout) -> Self {
        Self {
            layout,
            buf: BytesMut::new(),
            target: 0,
        }
    }

    /// Consume one transport chunk, returning every frame it completes
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        let mut frames = Vec::new();
        let mut rest = chunk;

        while !rest.is_empty() {
            if self.buf.is_empty() {
                self.target = self.layout.target_for(rest[0]);
            }

            let take = (self.target - self.buf.len()).min(rest.len());
            self.buf.put_slice(&rest[..take]);
            rest = &rest[take..];

            if self.buf.len() == self.target {
                trace!(len = self.target, "frame reassembled");
                frames.push(self.buf.split().freeze());
            }
        }

        frames
    }

    /// Signal end-of-stream; a partial frame in the buffer is an error
    ///
    /// The partial buffer is discarded either way.
    pub fn finish(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }

        let received = self.buf.len();
        self.buf.clear();

        Err(Error::TransportClosed {
            expected: self.target,
            received,
        })
    }

    /// Bytes currently buffered for an incomplete frame
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_frame() -> Vec<u8> {
        // Len=6 -> 7 bytes total
        vec![0x06, 0x00, 0x01, 0x03, 0xAA, 0x12, 0x34]
    }

    #[test]
    fn test_whole_frame_in_one_chunk() {
        let mut reasm = Reassembler::new(FrameLayout::LengthPrefixed);
        let frames = reasm.feed(&sample_frame());

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), sample_frame().as_slice());
        assert_eq!(reasm.pending(), 0);
    }

    #[test]
    fn test_single_byte_chunks() {
        let mut reasm = Reassembler::new(FrameLayout::LengthPrefixed);
        let frame = sample_frame();
        let mut frames = Vec::new();

        for &b in &frame {
            frames.extend(reasm.feed(&[b]));
        }

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), frame.as_slice());
    }

    #[test]
    fn test_arbitrary_split_points() {
        let frame = sample_frame();

        // Every possible two-chunk split yields the identical frame
        for split in 1..frame.len() {
            let mut reasm = Reassembler::new(FrameLayout::LengthPrefixed);
            assert!(reasm.feed(&frame[..split]).is_empty());
            let frames = reasm.feed(&frame[split..]);

            assert_eq!(frames.len(), 1, "split at {split}");
            assert_eq!(frames[0].as_ref(), frame.as_slice());
        }
    }

    #[test]
    fn test_two_frames_in_one_chunk() {
        let mut chunk = sample_frame();
        chunk.extend_from_slice(&[0x04, 0x00, 0x01, 0x55, 0x66]);

        let mut reasm = Reassembler::new(FrameLayout::LengthPrefixed);
        let frames = reasm.feed(&chunk);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].len(), 7);
        assert_eq!(frames[1].len(), 5);
    }

    #[test]
    fn test_frame_straddling_chunks_plus_next_frame_start() {
        let frame = sample_frame();
        let mut reasm = Reassembler::new(FrameLayout::LengthPrefixed);

        assert!(reasm.feed(&frame[..4]).is_empty());

        // Rest of frame one plus the first two bytes of frame two
        let mut second = frame[4..].to_vec();
        second.extend_from_slice(&[0x04, 0x00]);
        let frames = reasm.feed(&second);

        assert_eq!(frames.len(), 1);
        assert_eq!(reasm.pending(), 2);
    }

    #[test]
    fn test_fixed_layout() {
        let frame: Vec<u8> = (0..19).collect();
        let mut reasm = Reassembler::new(FrameLayout::Fixed(19));

        assert!(reasm.feed(&frame[..10]).is_empty());
        let frames = reasm.feed(&frame[10..]);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref(), frame.as_slice());
    }

    #[test]
    fn test_finish_clean() {
        let mut reasm = Reassembler::new(FrameLayout::LengthPrefixed);
        reasm.feed(&sample_frame());

        assert!(reasm.finish().is_ok());
    }

    #[test]
    fn test_finish_mid_frame_is_transport_closed() {
        let mut reasm = Reassembler::new(FrameLayout::LengthPrefixed);
        reasm.feed(&sample_frame()[..3]);

        let result = reasm.finish();
        assert!(matches!(
            result,
            Err(Error::TransportClosed {
                expected: 7,
                received: 3
            })
        ));

        // Partial buffer discarded
        assert_eq!(reasm.pending(), 0);
        assert!(reasm.finish().is_ok());
    }
}
