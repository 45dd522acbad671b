//! Harness error types.

use plus_proto::PacketError;
use thiserror::Error;

/// Result alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Failures the harness reports. Anything here is a codec bug or a
/// misconfigured run, never an expected rejection of corrupted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// Mutation bounds are inverted.
    #[error("invalid mutation bounds: min {min} > max {max}")]
    InvalidConfig {
        /// Lower bound on mutations per round
        min: usize,
        /// Upper bound on mutations per round
        max: usize,
    },

    /// A packet that passed validation could not be rebuilt.
    #[error("rebuild failed for {packet}: {source}")]
    Rebuild {
        /// Hex dump of the decoded packet
        packet: String,
        /// Builder error
        source: PacketError,
    },

    /// A freshly built packet failed validation.
    #[error("built packet {packet} failed to parse: {source}")]
    Decode {
        /// Hex dump of the built packet
        packet: String,
        /// Parse error
        source: PacketError,
    },

    /// The probe accessors found nothing where validation saw a PCF.
    #[error("probe read past the end of validated packet {packet}")]
    ProbeOutOfBounds {
        /// Hex dump of the decoded packet
        packet: String,
    },

    /// Rebuilt bytes differ from the decoded buffer.
    #[error("re-encode mismatch:\n  original {original}\n  rebuilt  {rebuilt}")]
    Mismatch {
        /// Hex dump of the decoded packet
        original: String,
        /// Hex dump of the rebuilt packet
        rebuilt: String,
    },

    /// A built packet decoded to different field values.
    #[error("field {field} changed across build/parse")]
    FieldMismatch {
        /// Name of the field that differed
        field: &'static str,
    },
}
