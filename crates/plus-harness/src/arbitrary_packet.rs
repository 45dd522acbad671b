//! Structured fuzz inputs for build/parse round trips.

use arbitrary::Arbitrary;
use bytes::Bytes;
use plus_proto::{
    BasicHeader, HeaderFields, PacketError, PacketFlags, PacketView, PcfFields, PcfTag, build_basic,
    build_extended,
};

use crate::error::{HarnessError, Result};

/// PCF inputs. Any combination is accepted here; the builder decides which
/// ones are legal.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub struct ArbitraryPcf {
    /// Logical type
    pub pcf_type: u16,
    /// Integrity indicator
    pub integrity: u8,
    /// Value bytes
    pub value: Vec<u8>,
}

/// Builder inputs for one packet.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub struct ArbitraryPacket {
    /// L flag
    pub l: bool,
    /// R flag
    pub r: bool,
    /// S flag
    pub s: bool,
    /// Connection/association token
    pub cat: u64,
    /// Packet sequence number
    pub psn: u32,
    /// Packet sequence echo
    pub pse: u32,
    /// PCF; `None` builds a basic packet
    pub pcf: Option<ArbitraryPcf>,
    /// Payload
    pub payload: Vec<u8>,
}

impl ArbitraryPacket {
    /// Header fields in builder form.
    pub fn header_fields(&self) -> HeaderFields {
        HeaderFields {
            flags: PacketFlags::from_lrs(self.l, self.r, self.s),
            cat: self.cat,
            psn: self.psn,
            pse: self.pse,
        }
    }

    /// Encode with the matching builder.
    pub fn build(&self) -> std::result::Result<Bytes, PacketError> {
        let fields = self.header_fields();
        match &self.pcf {
            None => Ok(build_basic(&fields, &self.payload)),
            Some(pcf) => {
                let extension = PcfFields {
                    pcf_type: pcf.pcf_type,
                    integrity: pcf.integrity,
                    value: &pcf.value,
                };
                build_extended(&fields, &extension, &self.payload)
            },
        }
    }

    /// Build, parse, and check every decoded field against the inputs.
    ///
    /// Inputs the builder rejects are not round-trip candidates and pass.
    pub fn check_roundtrip(&self) -> Result<()> {
        let Ok(buf) = self.build() else {
            return Ok(());
        };

        let view = PacketView::parse(&buf)
            .map_err(|source| HarnessError::Decode { packet: hex::encode(&buf), source })?;

        check_field("l_flag", view.l_flag() == self.l)?;
        check_field("r_flag", view.r_flag() == self.r)?;
        check_field("s_flag", view.s_flag() == self.s)?;
        check_field("x_flag", view.x_flag() == self.pcf.is_some())?;
        check_field("cat", view.cat() == self.cat)?;
        check_field("psn", view.psn() == self.psn)?;
        check_field("pse", view.pse() == self.pse)?;
        check_field("payload", view.payload() == self.payload.as_slice())?;

        let Some(input) = &self.pcf else {
            return check_field("pcf", view.pcf() == Err(PacketError::NotExtendedPacket));
        };

        let pcf = view
            .pcf()
            .map_err(|source| HarnessError::Decode { packet: hex::encode(&buf), source })?;
        check_field("pcf_type", pcf.pcf_type() == input.pcf_type)?;
        check_field("pcf_value", pcf.value() == input.value.as_slice())?;
        if pcf.tag() != PcfTag::Empty {
            check_field("pcf_integrity", pcf.integrity() == input.integrity)?;
        }
        let encoded_len = BasicHeader::SIZE + pcf.encoded_len() + self.payload.len();
        check_field("encoded_len", encoded_len == buf.len())
    }
}

fn check_field(field: &'static str, holds: bool) -> Result<()> {
    if holds { Ok(()) } else { Err(HarnessError::FieldMismatch { field }) }
}
