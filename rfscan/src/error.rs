//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] rfscan_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] rfscan_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] rfscan_types::Error),

    #[error("Reader not connected")]
    NotConnected,
}
