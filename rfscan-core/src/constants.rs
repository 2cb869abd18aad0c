//! Protocol constants

/// Inventory (scan for tags) command code, length-status dialect
pub const CMD_INVENTORY: u8 = 0x01;

/// Default reader address (broadcast/first reader)
pub const DEFAULT_ADDRESS: u8 = 0x00;

/// Default inquiry time, in units of 100 ms
pub const DEFAULT_SCAN_TIME: u8 = 50;

/// RSSI admission threshold for aggregation; weaker observations are noise
pub const RSSI_THRESHOLD: u8 = 60;

/// Fixed-length dialect response frame size
pub const FIXED_FRAME_LEN: usize = 19;

/// Fixed-length dialect scan command header
pub const HF_SCAN_HEADER: [u8; 3] = [0xDD, 0x11, 0xEF];

/// Default TCP port for network-attached fixed-length readers
pub const HF_DEFAULT_PORT: u16 = 8899;

/// Serial baud rate for length-status readers
pub const WYUAN_BAUD_RATE: u32 = 57_600;

/// Inventory parameter block defaults (length-status dialect)
pub mod inventory {
    /// QValue: fixed-Q, Q=15
    pub const Q_VALUE: u8 = 0x2F;

    /// EPC inquiry session value
    pub const SESSION: u8 = 0xFF;

    /// Mask region: EPC memory bank
    pub const MASK_MEM_EPC: u8 = 0x01;

    /// Mask start address (word)
    pub const MASK_ADR: [u8; 2] = [0x00, 0x00];

    /// Mask length in bits (no mask)
    pub const MASK_LEN: u8 = 0x00;

    /// First TID word to read back
    pub const ADR_TID: u8 = 2;

    /// TID words to read back
    pub const LEN_TID: u8 = 4;

    /// Inquiry target value
    pub const TARGET: u8 = 0x00;

    /// Default antenna selection mask
    pub const DEFAULT_ANTENNA: u8 = 0x80;
}

/// Status byte values (length-status dialect)
pub mod status {
    /// Operation succeeded
    pub const SUCCESS: u8 = 0x00;

    /// Command finished; inventoried tag data follows
    pub const FINISH: u8 = 0x01;

    /// Inquiry time elapsed; command forcibly ended
    pub const OVER_TIME: u8 = 0x02;

    /// More tag data follows in subsequent frames
    pub const EXTEND: u8 = 0x03;

    /// Reader tag store full; some tags unread
    pub const OVER_NUMBER: u8 = 0x04;

    /// Antenna connection check failed
    pub const AERIAL_FAULT: u8 = 0xF8;

    /// Parameter error
    pub const PARAM_ERROR: u8 = 0xFF;
}
