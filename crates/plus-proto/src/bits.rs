//! Sub-byte packing helpers.
//!
//! Two fields on the wire are narrower than a byte:
//!
//! - the first header word: 28-bit magic in the high bits, flag nibble in the
//!   low four bits
//! - the PCF length/integrity byte: 6-bit length in bits 7..2, 2-bit
//!   integrity in bits 1..0
//!
//! All shifts and masks for these live here.

use crate::flags::PacketFlags;

/// 28-bit protocol magic.
pub const MAGIC: u32 = 0x0D80_07FF;

/// Mask selecting the flag nibble in byte 3.
pub const FLAG_NIBBLE: u8 = 0x0F;

/// Largest PCF value length the 6-bit field can carry.
pub const MAX_PCF_LEN: u8 = 0x3F;

/// Largest PCF integrity value the 2-bit field can carry.
pub const MAX_PCF_INTEGRITY: u8 = 0x03;

/// Combine the magic with a flag nibble into the first header word.
pub fn pack_magic_word(flags: PacketFlags) -> u32 {
    (MAGIC << 4) | u32::from(flags.bits())
}

/// Split the first header word into its magic bits and flags.
pub const fn split_magic_word(word: u32) -> (u32, PacketFlags) {
    let flags = PacketFlags::from_bits_truncate(word.to_be_bytes()[3] & FLAG_NIBBLE);
    (word >> 4, flags)
}

/// Pack a PCF length and integrity into one byte.
///
/// Callers validate ranges first; out-of-range bits are masked off.
pub const fn pack_len_integrity(len: u8, integrity: u8) -> u8 {
    ((len & MAX_PCF_LEN) << 2) | (integrity & MAX_PCF_INTEGRITY)
}

/// Unpack a length/integrity byte into `(len, integrity)`.
pub const fn unpack_len_integrity(byte: u8) -> (u8, u8) {
    (byte >> 2, byte & MAX_PCF_INTEGRITY)
}
