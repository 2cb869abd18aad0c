//! Transport layer for RFID readers
//!
//! Readers hang off a serial line (W-Yuan UHF units) or a TCP socket
//! (network-attached HF units and serial device servers). The core codec
//! only needs a byte pipe: send raw bytes, receive raw chunks of arbitrary
//! size, close. Reassembling frames out of those chunks is the core's job,
//! never the transport's.

pub mod error;
pub mod serial;
pub mod tcp;

pub use error::{Error, Result};
pub use serial::{SerialSettings, SerialTransport};
pub use tcp::TcpTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Byte pipe to a reader
///
/// `receive` returns whatever the underlying stream delivered: possibly less
/// than a frame, possibly several frames. A read that yields zero bytes is
/// reported as `Error::ConnectionClosed`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the connection
    async fn connect(&mut self) -> Result<()>;

    /// Close the connection; also unblocks a pending receive
    async fn close(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send raw bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive the next raw chunk, waiting at most `timeout`
    async fn receive(&mut self, timeout: Duration) -> Result<BytesMut>;

    /// Human-readable endpoint description
    fn endpoint(&self) -> String;
}
