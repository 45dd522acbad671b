//! Canonical packet construction.
//!
//! Builders take typed fields and return a freshly allocated, immutable
//! buffer. There is exactly one encoding per representable combination of
//! fields, so parsing a built packet and building again from the decoded
//! fields reproduces the same bytes.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;
use zerocopy::IntoBytes;

use crate::{
    errors::Result,
    flags::PacketFlags,
    header::BasicHeader,
    pcf::{self, PcfTag},
};

/// Basic header fields supplied by the caller.
///
/// Only `L`, `R` and `S` are taken from `flags`. `X` is set by the builder
/// according to the packet shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderFields {
    /// L, R and S flags
    pub flags: PacketFlags,
    /// Connection/association token
    pub cat: u64,
    /// Packet sequence number
    pub psn: u32,
    /// Packet sequence echo
    pub pse: u32,
}

impl HeaderFields {
    fn header(&self, extended: bool) -> BasicHeader {
        let mut flags = self.flags & PacketFlags::CALLER;
        flags.set(PacketFlags::X, extended);
        BasicHeader::new(flags, self.cat, self.psn, self.pse)
    }
}

/// PCF fields supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcfFields<'a> {
    /// Logical type: `0x01..=0xFE`, `0x0100..=0xFE00` with a zero low byte,
    /// or `0xFF` with an empty value
    pub pcf_type: u16,
    /// Integrity indicator, 0 to 3. Ignored for the empty form.
    pub integrity: u8,
    /// Value bytes, at most 63
    pub value: &'a [u8],
}

impl PcfFields<'_> {
    /// The empty PCF: a single `FF` byte.
    pub const EMPTY: Self = Self { pcf_type: 0xFF, integrity: 0, value: &[] };
}

/// Build a packet without a PCF.
pub fn build_basic(fields: &HeaderFields, payload: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(BasicHeader::SIZE + payload.len());
    out.put_slice(fields.header(false).as_bytes());
    out.put_slice(payload);
    out.freeze()
}

/// Build a packet with a PCF.
///
/// # Errors
///
/// - `PcfValueTooLong` if `extension.value` exceeds 63 bytes
/// - `InvalidIntegrity` if `extension.integrity` exceeds 3 (non-empty forms)
/// - `UnrepresentableType` if `extension.pcf_type` fits neither tag form
pub fn build_extended(
    fields: &HeaderFields,
    extension: &PcfFields<'_>,
    payload: &[u8],
) -> Result<Bytes> {
    let PcfFields { pcf_type, integrity, value } = *extension;
    let capacity = BasicHeader::SIZE + PcfTag::MAX_HEADER_LEN + value.len() + payload.len();
    let mut out = BytesMut::with_capacity(capacity);

    out.put_slice(fields.header(true).as_bytes());
    pcf::encode(pcf_type, integrity, value, &mut out).inspect_err(|err| {
        trace!(pcf_type, integrity, len = value.len(), %err, "rejected PCF fields");
    })?;
    out.put_slice(payload);

    Ok(out.freeze())
}
