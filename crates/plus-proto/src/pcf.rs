//! Path Communication Field (PCF) codec.
//!
//! The PCF follows the basic header when the `X` flag is set. Its first byte
//! selects one of three header forms:
//!
//! | Lead byte     | Form    | Header | Type               | Len/integrity |
//! |---------------|---------|--------|--------------------|---------------|
//! | `0xFF`        | empty   | 1      | `0xFF`             | none (0, 0)   |
//! | `0x00`        | escaped | 3      | `next << 8`        | third byte    |
//! | `0x01..=0xFE` | direct  | 2      | lead byte          | second byte   |
//!
//! [`PcfTag`] is the only place this table is spelled out. Decoding and
//! encoding both go through it.

use bytes::BufMut;

use crate::{
    bits::{self, MAX_PCF_INTEGRITY, MAX_PCF_LEN},
    errors::{PacketError, Result},
};

/// Lead byte of the empty form, also its logical type.
pub const EMPTY_TYPE: u8 = 0xFF;

/// Lead byte announcing a two-byte (escaped) type.
pub const ESCAPE_PREFIX: u8 = 0x00;

/// Type tag of a PCF, one variant per header form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PcfTag {
    /// `FF`: the field is present but carries no type, length or value.
    Empty,
    /// One-byte type in `0x01..=0xFE`.
    Direct(u8),
    /// `00 hh`: type `hh << 8`.
    Escaped(u8),
}

impl PcfTag {
    /// Longest tag, the escaped form with its length/integrity byte.
    pub const MAX_HEADER_LEN: usize = 3;

    /// Read the tag at the front of `pcf`.
    ///
    /// Returns `None` when `pcf` is too short for the form its lead byte
    /// selects.
    pub fn read(pcf: &[u8]) -> Option<Self> {
        match *pcf.first()? {
            EMPTY_TYPE => Some(Self::Empty),
            ESCAPE_PREFIX => pcf.get(1).map(|&high| Self::Escaped(high)),
            direct => Some(Self::Direct(direct)),
        }
    }

    /// Choose the tag for a logical type.
    ///
    /// `has_value` decides whether `0xFF` means the empty form (no value) or
    /// is rejected (a value needs a length byte, which the empty form lacks).
    pub fn for_type(pcf_type: u16, has_value: bool) -> Result<Self> {
        let [high, low] = pcf_type.to_be_bytes();
        match (high, low) {
            (0, EMPTY_TYPE) if !has_value => Ok(Self::Empty),
            (0, ESCAPE_PREFIX | EMPTY_TYPE) => Err(PacketError::UnrepresentableType(pcf_type)),
            (0, direct) => Ok(Self::Direct(direct)),
            (EMPTY_TYPE, 0) => Err(PacketError::UnrepresentableType(pcf_type)),
            (escaped, 0) => Ok(Self::Escaped(escaped)),
            _ => Err(PacketError::UnrepresentableType(pcf_type)),
        }
    }

    /// Number of bytes this tag occupies, including the length/integrity
    /// byte when the form has one.
    pub const fn header_len(self) -> usize {
        match self {
            Self::Empty => 1,
            Self::Direct(_) => 2,
            Self::Escaped(_) => 3,
        }
    }

    /// Offset of the length/integrity byte relative to the PCF start.
    pub const fn len_integrity_offset(self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Direct(_) => Some(1),
            Self::Escaped(_) => Some(2),
        }
    }

    /// Logical 16-bit type.
    pub fn pcf_type(self) -> u16 {
        match self {
            Self::Empty => u16::from(EMPTY_TYPE),
            Self::Direct(ty) => u16::from(ty),
            Self::Escaped(high) => u16::from_be_bytes([high, 0]),
        }
    }

    /// Write the tag bytes, excluding the length/integrity byte.
    fn put<B: BufMut>(self, out: &mut B) {
        match self {
            Self::Empty => out.put_u8(EMPTY_TYPE),
            Self::Direct(ty) => out.put_u8(ty),
            Self::Escaped(high) => {
                out.put_u8(ESCAPE_PREFIX);
                out.put_u8(high);
            },
        }
    }
}

/// A decoded PCF borrowing its value from the packet buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcf<'a> {
    tag: PcfTag,
    len_integrity: u8,
    value: &'a [u8],
}

impl<'a> Pcf<'a> {
    /// Decode the PCF at the front of `pcf`, returning it together with the
    /// bytes that follow (the payload).
    ///
    /// `offset` is the position of `pcf` within the full packet and only
    /// feeds the byte counts reported in errors.
    pub fn split(pcf: &'a [u8], offset: usize) -> Result<(Self, &'a [u8])> {
        let too_small = |needed: usize| PacketError::too_small(offset + needed, offset + pcf.len());

        let Some(tag) = PcfTag::read(pcf) else {
            let needed = if pcf.first() == Some(&ESCAPE_PREFIX) { 3 } else { 1 };
            return Err(too_small(needed));
        };

        let header_len = tag.header_len();
        let len_integrity = match tag.len_integrity_offset() {
            Some(at) => *pcf.get(at).ok_or_else(|| too_small(header_len))?,
            None => 0,
        };

        let (len, _) = bits::unpack_len_integrity(len_integrity);
        let end = header_len + usize::from(len);
        let value = pcf.get(header_len..end).ok_or_else(|| too_small(end))?;
        let rest = pcf.get(end..).unwrap_or_default();

        Ok((Self { tag, len_integrity, value }, rest))
    }

    /// Type tag as found on the wire.
    pub fn tag(&self) -> PcfTag {
        self.tag
    }

    /// Logical 16-bit type.
    pub fn pcf_type(&self) -> u16 {
        self.tag.pcf_type()
    }

    /// Value length (0 to 63).
    pub fn len(&self) -> u8 {
        bits::unpack_len_integrity(self.len_integrity).0
    }

    /// True when the field carries no value bytes.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Integrity indicator (0 to 3).
    pub fn integrity(&self) -> u8 {
        bits::unpack_len_integrity(self.len_integrity).1
    }

    /// Value bytes, exactly `len()` of them.
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    /// Encoded size of the field: tag, length/integrity byte and value.
    pub fn encoded_len(&self) -> usize {
        self.tag.header_len() + self.value.len()
    }
}

/// Encode a PCF from its logical fields.
///
/// Checks, in order: value length, the empty form (which ignores
/// `integrity`), integrity range, then type representability.
pub fn encode<B: BufMut>(pcf_type: u16, integrity: u8, value: &[u8], out: &mut B) -> Result<()> {
    let len = u8::try_from(value.len())
        .ok()
        .filter(|&len| len <= MAX_PCF_LEN)
        .ok_or(PacketError::PcfValueTooLong { len: value.len(), max: usize::from(MAX_PCF_LEN) })?;

    if pcf_type == u16::from(EMPTY_TYPE) && value.is_empty() {
        PcfTag::Empty.put(out);
        return Ok(());
    }

    if integrity > MAX_PCF_INTEGRITY {
        return Err(PacketError::InvalidIntegrity(integrity));
    }

    let tag = PcfTag::for_type(pcf_type, !value.is_empty())?;
    tag.put(out);
    out.put_u8(bits::pack_len_integrity(len, integrity));
    out.put_slice(value);
    Ok(())
}

/// Encoded size of a PCF with a value of `value_len` bytes, or `None` when
/// the type is not representable.
pub fn encoded_len(pcf_type: u16, value_len: usize) -> Option<usize> {
    PcfTag::for_type(pcf_type, value_len > 0).ok().map(|tag| tag.header_len() + value_len)
}
