//! # rfscan-core
//!
//! Protocol primitives for multi-vendor RFID tag readers:
//! - Checksum calculation (bit-reversed CRC-16 shared by all dialects)
//! - Command frame construction and opt-in verification
//! - Status byte table and error taxonomy
//! - Tag record decoding (length-prefixed lists and fixed offsets)
//! - Chunk-boundary-tolerant stream reassembly
//! - Vendor dialect trait with W-Yuan and HF implementations
//! - Scan session state/cancellation and tag aggregation

pub mod aggregate;
pub mod checksum;
pub mod constants;
pub mod dialect;
pub mod error;
pub mod frame;
pub mod hf;
pub mod reassembler;
pub mod session;
pub mod status;
pub mod tag;
pub mod wyuan;

pub use aggregate::aggregate;
pub use dialect::{Dialect, Verdict};
pub use error::{Error, Result};
pub use hf::Hf;
pub use reassembler::{FrameLayout, Reassembler};
pub use session::{ScanOptions, ScanSession, ScanState, TerminalKind};
pub use status::Status;
pub use wyuan::WYuan;
