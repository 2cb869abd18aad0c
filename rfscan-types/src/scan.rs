//! Scan callback payloads and reader family selection

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::tag::TagBatch;

/// Progress update delivered to `on_progress` after each interpreted frame
///
/// `batches` is the splicing sequence accumulated so far for the current
/// attempt; `finished` is set on the final update of an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanUpdate {
    pub batches: Vec<TagBatch>,
    pub finished: bool,
}

/// Error category surfaced through `on_error`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    /// A non-success status byte from the reader (raw value)
    Status(u8),

    /// Transport-level failure (send/receive/close)
    Transport,

    /// Malformed frame or payload
    Protocol,
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "{code:02x}"),
            Self::Transport => write!(f, "transport"),
            Self::Protocol => write!(f, "protocol"),
        }
    }
}

/// Failure report delivered to `on_error`
///
/// Unrecognized status bytes carry the raw code and no message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFault {
    pub code: FaultCode,
    pub message: Option<String>,
}

impl ScanFault {
    pub fn status(code: u8, message: Option<&str>) -> Self {
        Self {
            code: FaultCode::Status(code),
            message: message.map(str::to_owned),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: FaultCode::Transport,
            message: Some(message.into()),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self {
            code: FaultCode::Protocol,
            message: Some(message.into()),
        }
    }
}

impl fmt::Display for ScanFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "[{}] {}", self.code, msg),
            None => write!(f, "[{}]", self.code),
        }
    }
}

/// Supported reader families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReaderFamily {
    /// W-Yuan UHF readers (length-prefixed, status-driven frames over serial)
    WYuan,

    /// HF network readers (fixed 19-byte frames over TCP)
    Hf,
}

impl ReaderFamily {
    pub fn name(self) -> &'static str {
        match self {
            Self::WYuan => "w-yuan",
            Self::Hf => "hf",
        }
    }
}

impl fmt::Display for ReaderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReaderFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w-yuan" | "wyuan" => Ok(Self::WYuan),
            "hf" => Ok(Self::Hf),
            other => Err(Error::Parse(format!("unknown reader family: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fault_code_display() {
        assert_eq!(FaultCode::Status(0xF8).to_string(), "f8");
        assert_eq!(FaultCode::Status(0x04).to_string(), "04");
        assert_eq!(FaultCode::Transport.to_string(), "transport");
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("w-yuan".parse::<ReaderFamily>().unwrap(), ReaderFamily::WYuan);
        assert_eq!("HF".parse::<ReaderFamily>().unwrap(), ReaderFamily::Hf);
        assert!("impinj".parse::<ReaderFamily>().is_err());
    }
}
