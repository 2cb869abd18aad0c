//! Error types for rfscan-core

/// Result type alias for core protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte stream ended while a frame was still being assembled
    #[error("Transport closed mid-frame: {received} of {expected} bytes received")]
    TransportClosed { expected: usize, received: usize },

    /// A recognized non-success status byte
    #[error("Reader status 0x{code:02X}: {message}")]
    ProtocolStatus { code: u8, message: &'static str },

    /// A status byte outside the known table
    #[error("Unrecognized reader status 0x{code:02X}")]
    UnrecognizedStatus { code: u8 },

    /// Tag record decoding would read past the available bytes
    #[error("Malformed tag payload: record at offset {offset} overruns {available} available bytes")]
    MalformedPayload { offset: usize, available: usize },

    /// Received checksum does not match (opt-in verification only)
    #[error("Checksum mismatch: expected 0x{expected:04X}, received 0x{received:04X}")]
    ChecksumMismatch { expected: u16, received: u16 },

    /// Frame shorter than the dialect's minimum layout
    #[error("Frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort { expected: usize, actual: usize },
}

impl Error {
    /// Check whether this error came from the wire rather than the reader
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportClosed { .. })
    }
}
