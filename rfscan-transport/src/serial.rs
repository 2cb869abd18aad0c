//! Serial line transport
//!
//! W-Yuan UHF readers speak over a plain serial line at 57600 baud, 8N1.

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, trace};

use rfscan_core::constants::WYUAN_BAUD_RATE;

use crate::tcp::hex_pairs;
use crate::{Transport, error::*};

const RECV_BUF_CAPACITY: usize = 256;

/// Serial line parameters
#[derive(Debug, Clone)]
pub struct SerialSettings {
    pub path: String,
    pub baud_rate: u32,
    pub data_bits: tokio_serial::DataBits,
    pub stop_bits: tokio_serial::StopBits,
    pub parity: tokio_serial::Parity,
}

impl SerialSettings {
    /// 8N1 at the given baud rate
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
            data_bits: tokio_serial::DataBits::Eight,
            stop_bits: tokio_serial::StopBits::One,
            parity: tokio_serial::Parity::None,
        }
    }
}

/// Serial transport for directly attached readers
pub struct SerialTransport {
    settings: SerialSettings,
    stream: Option<SerialStream>,
}

impl SerialTransport {
    pub fn new(settings: SerialSettings) -> Self {
        Self {
            settings,
            stream: None,
        }
    }

    /// Transport for a W-Yuan reader at its stock baud rate
    pub fn for_wyuan_reader(path: impl Into<String>) -> Self {
        Self::new(SerialSettings::new(path, WYUAN_BAUD_RATE))
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        let stream = tokio_serial::new(&self.settings.path, self.settings.baud_rate)
            .data_bits(self.settings.data_bits)
            .stop_bits(self.settings.stop_bits)
            .parity(self.settings.parity)
            .open_native_async()?;

        debug!(path = %self.settings.path, baud = self.settings.baud_rate, "serial port open");
        self.stream = Some(stream);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!(path = %self.settings.path, "serial port closed");
            let _ = stream.flush().await;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        trace!(len = data.len(), bytes = %hex_pairs(data), "send");
        stream.write_all(data).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn receive(&mut self, wait: Duration) -> Result<BytesMut> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        let mut buf = BytesMut::with_capacity(RECV_BUF_CAPACITY);
        let n = timeout(wait, stream.read_buf(&mut buf))
            .await
            .map_err(|_| Error::ReadTimeout)?
            .map_err(Error::Io)?;

        if n == 0 {
            return Err(Error::ConnectionClosed);
        }

        trace!(len = n, bytes = %hex_pairs(&buf), "recv");
        Ok(buf)
    }

    fn endpoint(&self) -> String {
        format!("{}@{}", self.settings.path, self.settings.baud_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_to_8n1() {
        let settings = SerialSettings::new("/dev/ttyUSB0", 57_600);
        assert_eq!(settings.data_bits, tokio_serial::DataBits::Eight);
        assert_eq!(settings.stop_bits, tokio_serial::StopBits::One);
        assert_eq!(settings.parity, tokio_serial::Parity::None);
    }

    #[tokio::test]
    async fn test_created_disconnected() {
        let transport = SerialTransport::for_wyuan_reader("/dev/ttyUSB0");
        assert!(!transport.is_connected());
        assert_eq!(transport.endpoint(), "/dev/ttyUSB0@57600");
    }

    #[tokio::test]
    async fn test_send_requires_connection() {
        let mut transport = SerialTransport::for_wyuan_reader("/dev/ttyUSB0");
        assert!(matches!(
            transport.send(&[0x00]).await,
            Err(Error::NotConnected)
        ));
    }
}
