//! Fixed 20-byte basic header.
//!
//! The layout is declared once as a `#[repr(C)]` struct of big-endian
//! integers so that `zerocopy` can verify at compile time that it has no
//! padding and no alignment requirement. Parsing casts the first 20 bytes of
//! the buffer in place instead of copying fields out.

use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::big_endian::{U32, U64},
};

use crate::{
    bits::{self, MAGIC},
    errors::{PacketError, Result},
    flags::PacketFlags,
};

/// PLUS basic header as it appears on the wire.
///
/// ```text
/// 0..4    magic(28) | L | R | S | X
/// 4..12   CAT
/// 12..16  PSN
/// 16..20  PSE
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
#[repr(C)]
pub struct BasicHeader {
    magic_flags: U32,
    cat: U64,
    psn: U32,
    pse: U32,
}

impl BasicHeader {
    /// Header size in bytes.
    pub const SIZE: usize = 20;

    /// Protocol magic (28 bits).
    pub const MAGIC: u32 = MAGIC;

    /// Create a header with the given flags and identifiers.
    pub fn new(flags: PacketFlags, cat: u64, psn: u32, pse: u32) -> Self {
        Self {
            magic_flags: U32::new(bits::pack_magic_word(flags)),
            cat: U64::new(cat),
            psn: U32::new(psn),
            pse: U32::new(pse),
        }
    }

    /// Borrow the header at the front of `buf`, returning it with the bytes
    /// that follow.
    ///
    /// Checks the length floor and the magic. Nothing after byte 20 is
    /// inspected.
    pub fn split_from(buf: &[u8]) -> Result<(&Self, &[u8])> {
        let (header, rest) = Self::ref_from_prefix(buf)
            .map_err(|_| PacketError::too_small(Self::SIZE, buf.len()))?;

        let found = header.magic();
        if found != MAGIC {
            return Err(PacketError::InvalidMagic { expected: MAGIC, found });
        }

        Ok((header, rest))
    }

    /// 28-bit magic as found in the buffer.
    pub fn magic(&self) -> u32 {
        bits::split_magic_word(self.magic_flags.get()).0
    }

    /// Flag nibble.
    pub fn flags(&self) -> PacketFlags {
        bits::split_magic_word(self.magic_flags.get()).1
    }

    /// Connection/association token.
    pub fn cat(&self) -> u64 {
        self.cat.get()
    }

    /// Packet sequence number.
    pub fn psn(&self) -> u32 {
        self.psn.get()
    }

    /// Packet sequence echo.
    pub fn pse(&self) -> u32 {
        self.pse.get()
    }
}
