//! Type definitions for rfscan

pub mod error;
pub mod scan;
pub mod tag;

pub use error::{Error, Result};
pub use scan::{FaultCode, ReaderFamily, ScanFault, ScanUpdate};
pub use tag::{AggregatedTag, TagBatch, TagRecord};
