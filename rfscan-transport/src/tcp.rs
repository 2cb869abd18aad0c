//! TCP transport
//!
//! Network-attached HF readers listen on a raw TCP port (8899 by default);
//! serial device servers exposing a W-Yuan reader over the network look the
//! same at this level.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use rfscan_core::constants::HF_DEFAULT_PORT;

use crate::{Transport, error::*};

const RECV_BUF_CAPACITY: usize = 1024;

/// TCP transport for network-attached readers
pub struct TcpTransport {
    host: String,
    port: u16,
    resolved: Option<SocketAddr>,
    stream: Option<TcpStream>,
    connect_timeout: Duration,
}

impl TcpTransport {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            resolved: None,
            stream: None,
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Transport for an HF reader on its stock port
    pub fn for_hf_reader(host: impl Into<String>) -> Self {
        Self::new(host, HF_DEFAULT_PORT)
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    async fn resolve(&mut self) -> Result<SocketAddr> {
        if let Some(addr) = self.resolved {
            return Ok(addr);
        }

        let endpoint = format!("{}:{}", self.host, self.port);
        let addr = tokio::net::lookup_host(&endpoint)
            .await
            .map_err(|e| Error::InvalidEndpoint(format!("{endpoint}: {e}")))?
            .next()
            .ok_or_else(|| Error::InvalidEndpoint(format!("no addresses for {endpoint}")))?;

        self.resolved = Some(addr);
        Ok(addr)
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        let addr = self.resolve().await?;
        debug!(%addr, "connecting");

        let stream = timeout(self.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| Error::ConnectionTimeout)?
            .map_err(Error::Io)?;

        // Frames are small; latency matters more than throughput
        stream.set_nodelay(true)?;

        debug!(%addr, "connected");
        self.stream = Some(stream);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!(endpoint = %self.endpoint(), "closing");
            let _ = stream.shutdown().await;
        }
        self.resolved = None;
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
        self.resolved
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| format!("{}:{}", self.host, self.port))
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("TCP transport dropped while still connected");
        }
    }
}

/// Spaced hex pairs for traffic logs
pub(crate) fn hex_pairs(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
