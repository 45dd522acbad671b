//! Error types for packet parsing and construction.

use thiserror::Error;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, PacketError>;

/// Errors returned while parsing or building a PLUS packet.
///
/// Each variant names one class of failure so that callers can decide
/// whether to log, drop or report the packet without inspecting bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Buffer is shorter than the structure it declares.
    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall {
        /// Minimum number of bytes the declared structure requires
        needed: usize,
        /// Actual buffer length
        actual: usize,
    },

    /// Leading 28 bits do not match the protocol magic.
    #[error("invalid magic: expected {expected:#09x}, found {found:#09x}")]
    InvalidMagic {
        /// Magic constant the protocol requires
        expected: u32,
        /// Value found in the buffer
        found: u32,
    },

    /// PCF accessor used on a packet whose `X` flag is clear.
    #[error("not an extended packet")]
    NotExtendedPacket,

    /// PCF uses the one-byte empty form, which has no length/integrity byte.
    #[error("PCF has no length/integrity byte")]
    NoLenIntegrity,

    /// PCF value exceeds what the 6-bit length field can express.
    #[error("PCF value too long: {len} bytes (max {max})")]
    PcfValueTooLong {
        /// Requested value length
        len: usize,
        /// Maximum encodable length
        max: usize,
    },

    /// PCF type cannot be expressed by the direct or escaped tag forms.
    #[error("unrepresentable PCF type {0:#06x}")]
    UnrepresentableType(u16),

    /// PCF integrity exceeds the 2-bit field.
    #[error("invalid PCF integrity {0} (max 3)")]
    InvalidIntegrity(u8),
}

impl PacketError {
    /// Shorthand for a truncation error.
    pub(crate) const fn too_small(needed: usize, actual: usize) -> Self {
        Self::BufferTooSmall { needed, actual }
    }
}
