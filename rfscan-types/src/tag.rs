//! Tag observation structures

use bytes::Bytes;
use std::fmt;

/// One decoded tag observation
///
/// Produced by the dialect's tag record parser from a single response frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Tag identifier, rendered as an uppercase hex string
    pub tid: String,

    /// Received signal strength indicator
    pub rssi: u8,

    /// Antenna that saw the tag (fixed-length dialect only)
    pub antenna: Option<u8>,
}

impl TagRecord {
    pub fn new(tid: String, rssi: u8) -> Self {
        Self {
            tid,
            rssi,
            antenna: None,
        }
    }
}

impl fmt::Display for TagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag[{} rssi={}]", self.tid, self.rssi)
    }
}

/// One reassembled response frame's contribution to a scan attempt
///
/// Terminal frames (success/finish) contribute their raw bytes only;
/// continuation frames also carry the decoded records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBatch {
    /// Raw frame bytes as received
    pub data: Bytes,

    /// Records decoded from the frame payload (empty for terminal frames)
    pub records: Vec<TagRecord>,
}

impl TagBatch {
    /// Batch for a terminal frame (no decoded records)
    pub fn terminal(data: Bytes) -> Self {
        Self {
            data,
            records: Vec::new(),
        }
    }

    pub fn with_records(data: Bytes, records: Vec<TagRecord>) -> Self {
        Self { data, records }
    }
}

/// Deduplicated tag, keyed by TID across all batches of a scan attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedTag {
    pub tid: String,

    /// RSSI of the first admitted observation (kept as-is on repeats)
    pub rssi: u8,

    /// Number of observations that cleared the admission threshold
    pub count: u32,
}

impl fmt::Display for AggregatedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag[{} rssi={} seen={}]", self.tid, self.rssi, self.count)
    }
}
