//! # rfscan
//!
//! Multi-vendor RFID tag reader library.
//!
//! ## Features
//!
//! - Length-prefixed, checksummed frame codec (vendor CRC-16 variant)
//! - Chunk-boundary-tolerant stream reassembly
//! - Continuation-frame scan sessions with a cancellable poll loop
//! - Tag deduplication with a signal-strength admission threshold
//! - Pluggable vendor dialects (W-Yuan serial UHF, HF network readers)
//! - Async transports (serial line, TCP) via Tokio
//!
//! ## Quick Start
//!
//! ```no_run
//! use rfscan::{Scanner, aggregate};
//!
//! #[tokio::main]
//! async fn main() -> rfscan::Result<()> {
//!     let mut scanner = Scanner::hf_tcp("192.168.1.50");
//!     scanner.connect().await?;
//!
//!     scanner
//!         .start_scan(
//!             |update| {
//!                 if update.finished {
//!                     for tag in aggregate(&update.batches) {
//!                         println!("{tag}");
//!                     }
//!                 }
//!             },
//!             |fault| eprintln!("scan failed: {fault}"),
//!         )
//!         .await?;
//!
//!     scanner.close().await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod scanner;

// Re-exports
pub use error::{Error, Result};
pub use scanner::Scanner;

// Re-export protocol types
pub use rfscan_core::{
    Hf, ScanOptions, ScanSession, ScanState, WYuan, aggregate::aggregate, dialect::Dialect,
    frame::build_command,
};
pub use rfscan_transport::{SerialTransport, TcpTransport, Transport};
pub use rfscan_types::{
    AggregatedTag, FaultCode, ReaderFamily, ScanFault, ScanUpdate, TagBatch, TagRecord,
};
