//! Validated, read-only view over a PLUS packet buffer.

use tracing::trace;

use crate::{
    builder::HeaderFields,
    errors::{PacketError, Result},
    flags::PacketFlags,
    header::BasicHeader,
    pcf::Pcf,
};

/// Tagged result of decoding: which of the two packet shapes a buffer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    /// `X` clear: basic header followed directly by the payload.
    Basic,
    /// `X` set: basic header, PCF, payload.
    Extended(Pcf<'a>),
}

/// A PLUS packet validated in place.
///
/// Holds only references into the caller's buffer: the header cast by
/// `zerocopy` and the bytes after it. Field accessors re-derive their values
/// from those bytes on every call.
///
/// # Invariants
///
/// - the buffer is at least [`BasicHeader::SIZE`] bytes long
/// - the magic matches [`BasicHeader::MAGIC`]
/// - if `X` is set, the PCF header and value fit in the buffer
#[derive(Debug, Clone, Copy)]
pub struct PacketView<'a> {
    buf: &'a [u8],
    header: &'a BasicHeader,
    rest: &'a [u8],
}

impl<'a> PacketView<'a> {
    /// Validate `buf` as a PLUS packet.
    ///
    /// # Errors
    ///
    /// - `BufferTooSmall` if `buf` is shorter than the basic header, or the
    ///   PCF announced by the `X` flag is truncated
    /// - `InvalidMagic` if the leading 28 bits are not the protocol magic
    pub fn parse(buf: &'a [u8]) -> Result<Self> {
        let (header, rest) = BasicHeader::split_from(buf).inspect_err(|err| {
            trace!(len = buf.len(), %err, "rejected packet header");
        })?;

        let view = Self { buf, header, rest };
        if view.x_flag() {
            view.split_pcf().inspect_err(|err| {
                trace!(len = buf.len(), %err, "rejected PCF");
            })?;
        }

        Ok(view)
    }

    /// The whole packet buffer.
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// All four flags.
    pub fn flags(&self) -> PacketFlags {
        self.header.flags()
    }

    /// L flag.
    pub fn l_flag(&self) -> bool {
        self.flags().contains(PacketFlags::L)
    }

    /// R flag.
    pub fn r_flag(&self) -> bool {
        self.flags().contains(PacketFlags::R)
    }

    /// S flag.
    pub fn s_flag(&self) -> bool {
        self.flags().contains(PacketFlags::S)
    }

    /// X flag: a PCF follows the basic header.
    pub fn x_flag(&self) -> bool {
        self.flags().contains(PacketFlags::X)
    }

    /// Connection/association token.
    pub fn cat(&self) -> u64 {
        self.header.cat()
    }

    /// Packet sequence number.
    pub fn psn(&self) -> u32 {
        self.header.psn()
    }

    /// Packet sequence echo.
    pub fn pse(&self) -> u32 {
        self.header.pse()
    }

    /// Header fields in the form the builders take.
    pub fn header_fields(&self) -> HeaderFields {
        HeaderFields {
            flags: self.flags() & PacketFlags::CALLER,
            cat: self.cat(),
            psn: self.psn(),
            pse: self.pse(),
        }
    }

    /// Which shape this packet has, decided by the `X` flag.
    ///
    /// A PCF decode error is returned as-is and never reported as a basic
    /// packet.
    pub fn shape(&self) -> Result<Shape<'a>> {
        if !self.x_flag() {
            return Ok(Shape::Basic);
        }
        self.pcf().map(Shape::Extended)
    }

    /// Bytes after the basic header and, for extended packets, the PCF.
    pub fn payload(&self) -> &'a [u8] {
        if !self.x_flag() {
            return self.rest;
        }

        // `parse` checked that the PCF fits
        self.split_pcf().map_or(&[], |(_, payload)| payload)
    }

    /// Bytes after the basic header, PCF included.
    pub(crate) fn after_header(&self) -> &'a [u8] {
        self.rest
    }

    /// The decoded PCF.
    pub fn pcf(&self) -> Result<Pcf<'a>> {
        self.split_pcf().map(|(pcf, _)| pcf)
    }

    /// Logical PCF type.
    pub fn pcf_type(&self) -> Result<u16> {
        self.pcf().map(|pcf| pcf.pcf_type())
    }

    /// PCF value length.
    pub fn pcf_len(&self) -> Result<u8> {
        self.pcf().map(|pcf| pcf.len())
    }

    /// PCF integrity indicator.
    pub fn pcf_integrity(&self) -> Result<u8> {
        self.pcf().map(|pcf| pcf.integrity())
    }

    /// PCF value bytes.
    pub fn pcf_value(&self) -> Result<&'a [u8]> {
        self.pcf().map(|pcf| pcf.value())
    }

    /// Offset of the PCF length/integrity byte within the buffer.
    ///
    /// # Errors
    ///
    /// `NotExtendedPacket` for basic packets, `NoLenIntegrity` when the PCF
    /// uses the one-byte empty form.
    pub fn pcf_len_integrity_pos(&self) -> Result<usize> {
        let pcf = self.pcf()?;
        pcf.tag()
            .len_integrity_offset()
            .map(|at| BasicHeader::SIZE + at)
            .ok_or(PacketError::NoLenIntegrity)
    }

    fn split_pcf(&self) -> Result<(Pcf<'a>, &'a [u8])> {
        if !self.x_flag() {
            return Err(PacketError::NotExtendedPacket);
        }
        Pcf::split(self.rest, BasicHeader::SIZE)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::pcf::PcfTag;

    const DIRECT: [u8; 32] = hex!(
        "D8007FFF 1234567812345678 13111111 23222222"
        "01 1B 010203040506"
        "99989796"
    );

    #[test]
    fn read_extended_fields() {
        let view = PacketView::parse(&DIRECT).unwrap();

        assert!(view.l_flag());
        assert!(view.r_flag());
        assert!(view.s_flag());
        assert!(view.x_flag());
        assert_eq!(view.cat(), 0x1234_5678_1234_5678);
        assert_eq!(view.psn(), 0x1311_1111);
        assert_eq!(view.pse(), 0x2322_2222);

        assert_eq!(view.pcf_type(), Ok(0x01));
        assert_eq!(view.pcf_len(), Ok(6));
        assert_eq!(view.pcf_integrity(), Ok(3));
        assert_eq!(view.pcf_value(), Ok(&[1, 2, 3, 4, 5, 6][..]));
        assert_eq!(view.pcf_len_integrity_pos(), Ok(21));
        assert_eq!(view.payload(), hex!("99989796"));
        assert_eq!(view.buffer(), DIRECT);
    }

    #[test]
    fn read_basic_fields() {
        let buf = hex!("D8007FFA 3F2FFFFF1FFFFFFF 12345678 87654321 B1");
        let view = PacketView::parse(&buf).unwrap();

        assert!(view.l_flag());
        assert!(!view.r_flag());
        assert!(view.s_flag());
        assert!(!view.x_flag());
        assert_eq!(view.cat(), 0x3F2F_FFFF_1FFF_FFFF);
        assert_eq!(view.payload(), [0xB1]);
        assert_eq!(view.shape(), Ok(Shape::Basic));
    }

    #[test]
    fn pcf_accessors_reject_basic_packet() {
        let buf = hex!("D8007FFE 0000000000000063 00000063 00000063");
        let view = PacketView::parse(&buf).unwrap();

        assert_eq!(view.pcf_type(), Err(PacketError::NotExtendedPacket));
        assert_eq!(view.pcf_len(), Err(PacketError::NotExtendedPacket));
        assert_eq!(view.pcf_integrity(), Err(PacketError::NotExtendedPacket));
        assert_eq!(view.pcf_value(), Err(PacketError::NotExtendedPacket));
        assert_eq!(view.pcf_len_integrity_pos(), Err(PacketError::NotExtendedPacket));
        assert!(view.payload().is_empty());
    }

    #[test]
    fn empty_pcf_has_no_len_integrity_byte() {
        let buf = hex!("D8007FF1 0000000000000001 00000002 00000003 FF 99");
        let view = PacketView::parse(&buf).unwrap();

        assert_eq!(view.pcf_type(), Ok(0xFF));
        assert_eq!(view.pcf_len(), Ok(0));
        assert_eq!(view.pcf_integrity(), Ok(0));
        assert_eq!(view.pcf_len_integrity_pos(), Err(PacketError::NoLenIntegrity));
        assert_eq!(view.payload(), [0x99]);
    }

    #[test]
    fn escaped_pcf_position() {
        let buf = hex!("D8007FF1 0000000000000001 00000002 00000003 00 CC 04 AB");
        let view = PacketView::parse(&buf).unwrap();

        assert_eq!(view.pcf_type(), Ok(0xCC00));
        assert_eq!(view.pcf_len_integrity_pos(), Ok(22));
        assert_eq!(view.pcf_value(), Ok(&[0xAB][..]));
        assert!(view.payload().is_empty());
        assert!(matches!(view.shape(), Ok(Shape::Extended(pcf)) if pcf.tag() == PcfTag::Escaped(0xCC)));
    }

    #[test]
    fn shape_follows_x_flag() {
        // empty PCF: the payload byte must not turn the packet into a basic one
        let buf = hex!("D8007FF1 0000000000000001 00000002 00000003 FF 99");
        let view = PacketView::parse(&buf).unwrap();
        assert!(matches!(view.shape(), Ok(Shape::Extended(pcf)) if pcf.tag() == PcfTag::Empty));

        // same bytes with X clear: the FF is payload
        let buf = hex!("D8007FF0 0000000000000001 00000002 00000003 FF 99");
        let view = PacketView::parse(&buf).unwrap();
        assert_eq!(view.shape(), Ok(Shape::Basic));
        assert_eq!(view.payload(), [0xFF, 0x99]);
    }

    #[test]
    fn extended_without_pcf_is_too_small() {
        let buf = hex!("D8007FF1 0000000000000001 00000002 00000003");
        assert_eq!(
            PacketView::parse(&buf).map(|_| ()),
            Err(PacketError::BufferTooSmall { needed: 21, actual: 20 })
        );
    }

    #[test]
    fn truncated_pcf_value_is_too_small() {
        let buf = &DIRECT[..25];
        assert_eq!(
            PacketView::parse(buf).map(|_| ()),
            Err(PacketError::BufferTooSmall { needed: 28, actual: 25 })
        );
    }

    #[test]
    fn too_small_buffer() {
        let buf = [0u8; 16];
        assert_eq!(
            PacketView::parse(&buf).map(|_| ()),
            Err(PacketError::BufferTooSmall { needed: 20, actual: 16 })
        );
    }

    #[test]
    fn header_fields_drop_x() {
        let view = PacketView::parse(&DIRECT).unwrap();
        let fields = view.header_fields();

        assert_eq!(fields.flags, PacketFlags::L | PacketFlags::R | PacketFlags::S);
        assert_eq!(fields.cat, view.cat());
    }
}
