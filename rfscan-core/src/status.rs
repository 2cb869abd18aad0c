//! Status byte table (length-status dialect)
//!
//! Vendor-fixed mapping; the values and messages come from the reader's
//! protocol manual and must not be renumbered.

use std::fmt;

use crate::constants::status;

/// Recognized reader status bytes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// Operation succeeded
    Success = status::SUCCESS,

    /// Command execution finished, inventoried tag data returned
    Finish = status::FINISH,

    /// Inquiry time elapsed; benign terminal state, no error surfaced
    OverTime = status::OVER_TIME,

    /// Continuation: more tag data follows after this frame
    Extend = status::EXTEND,

    /// Reader storage full, tag quantity exceeded
    OverNumber = status::OVER_NUMBER,

    /// Antenna connection check failed
    AerialFault = status::AERIAL_FAULT,

    /// Parameter error
    ParamError = status::PARAM_ERROR,
}

impl Status {
    /// Fixed user-facing message, where the vendor table defines one
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::OverTime => Some("Inquiry timeout"),
            Self::OverNumber => Some("Tag quantity exceeded limit"),
            Self::AerialFault => {
                Some("Please check if the antenna is correctly connected to position 1.")
            }
            Self::ParamError => Some("Parameter error"),
            Self::Success | Self::Finish | Self::Extend => None,
        }
    }

    /// Terminal frame carrying the final tag data
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Success | Self::Finish)
    }

    /// Non-terminal frame; more data follows
    pub fn is_continuation(self) -> bool {
        matches!(self, Self::Extend)
    }

    /// Error status that must be surfaced to the caller
    pub fn is_fault(self) -> bool {
        matches!(self, Self::OverNumber | Self::AerialFault | Self::ParamError)
    }
}

impl TryFrom<u8> for Status {
    type Error = u8;

    /// Fails with the raw byte for codes outside the table
    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            status::SUCCESS => Ok(Self::Success),
            status::FINISH => Ok(Self::Finish),
            status::OVER_TIME => Ok(Self::OverTime),
            status::EXTEND => Ok(Self::Extend),
            status::OVER_NUMBER => Ok(Self::OverNumber),
            status::AERIAL_FAULT => Ok(Self::AerialFault),
            status::PARAM_ERROR => Ok(Self::ParamError),
            other => Err(other),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Finish => "finish",
            Self::OverTime => "overTime",
            Self::Extend => "extend",
            Self::OverNumber => "overNumber",
            Self::AerialFault => "aerialFault",
            Self::ParamError => "paramError",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_known_codes() {
        for code in [0x00, 0x01, 0x02, 0x03, 0x04, 0xF8, 0xFF] {
            let status = Status::try_from(code).unwrap();
            assert_eq!(status as u8, code);
        }
    }

    #[test]
    fn test_unknown_code_passes_raw_byte() {
        assert_eq!(Status::try_from(0x7B), Err(0x7B));
    }

    #[test]
    fn test_classification() {
        assert!(Status::Success.is_complete());
        assert!(Status::Finish.is_complete());
        assert!(Status::Extend.is_continuation());
        assert!(Status::AerialFault.is_fault());
        assert!(!Status::OverTime.is_fault());
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            Status::AerialFault.message(),
            Some("Please check if the antenna is correctly connected to position 1.")
        );
        assert_eq!(Status::Extend.message(), None);
    }
}
