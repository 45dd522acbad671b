//! Known-answer tests against hand-assembled PLUS packets.
//!
//! Each vector is written out byte by byte so that a change in layout, flag
//! placement or PCF tag encoding shows up as a diff against fixed bytes.

use hex_literal::hex;
use plus_proto::{
    HeaderFields, PacketError, PacketFlags, PacketView, PcfFields, PcfTag, Shape, build_basic,
    build_extended,
};

const EXT_HEADER: [u8; 20] = hex!("D8007FFF 1234567812345678 13111111 23222222");
const PAYLOAD: [u8; 4] = hex!("99989796");
const VALUE: [u8; 6] = hex!("010203040506");

fn extended_fields() -> HeaderFields {
    HeaderFields {
        flags: PacketFlags::from_lrs(true, true, true),
        cat: 0x1234_5678_1234_5678,
        psn: 0x1311_1111,
        pse: 0x2322_2222,
    }
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

const BASIC_MAGIC: u32 = plus_proto::BasicHeader::MAGIC;

#[test]
fn basic_packet_bytes() {
    let fields = HeaderFields {
        flags: PacketFlags::from_lrs(true, false, true),
        cat: 0x1234_5678_2143_6587,
        psn: 0x8765_4321,
        pse: 0x1122_3344,
    };
    let payload = hex!("01020304 10203040 99909990");

    let buf = build_basic(&fields, &payload);

    assert_eq!(
        buf,
        hex!(
            "D8007FFA 1234567821436587 87654321 11223344"
            "01020304 10203040 99909990"
        )[..]
    );
    insta::assert_snapshot!(
        hex::encode(&buf),
        @"d8007ffa12345678214365878765432111223344010203041020304099909990"
    );
}

#[test]
fn direct_type_pcf_bytes() {
    let pcf = PcfFields { pcf_type: 0x01, integrity: 3, value: &VALUE };
    let buf = build_extended(&extended_fields(), &pcf, &PAYLOAD).unwrap();

    assert_eq!(buf, concat(&[&EXT_HEADER[..], &hex!("01 1B")[..], &VALUE[..], &PAYLOAD[..]]));
    assert_eq!(&buf[20..28], hex!("01 1B 010203040506"));
}

#[test]
fn escaped_type_pcf_bytes() {
    let pcf = PcfFields { pcf_type: 0xCC00, integrity: 3, value: &VALUE };
    let buf = build_extended(&extended_fields(), &pcf, &PAYLOAD).unwrap();

    assert_eq!(buf, concat(&[&EXT_HEADER[..], &hex!("00 CC 1B")[..], &VALUE[..], &PAYLOAD[..]]));
    assert_eq!(&buf[20..29], hex!("00 CC 1B 010203040506"));
}

#[test]
fn empty_pcf_bytes() {
    let pcf = PcfFields { pcf_type: 0xFF, integrity: 3, value: &[] };
    let buf = build_extended(&extended_fields(), &pcf, &PAYLOAD).unwrap();

    assert_eq!(buf, concat(&[&EXT_HEADER[..], &[0xFF][..], &PAYLOAD[..]]));
}

#[test]
fn read_handcrafted_extended_packet() {
    let buf = concat(&[&EXT_HEADER[..], &hex!("01 1B")[..], &VALUE[..], &PAYLOAD[..]]);
    let view = PacketView::parse(&buf).unwrap();

    assert_eq!(view.header_fields(), extended_fields());
    assert_eq!(view.pcf_type(), Ok(0x01));
    assert_eq!(view.pcf_len(), Ok(6));
    assert_eq!(view.pcf_integrity(), Ok(3));
    assert_eq!(view.pcf_value(), Ok(&VALUE[..]));
    assert_eq!(view.payload(), PAYLOAD);

    let Ok(Shape::Extended(pcf)) = view.shape() else {
        panic!("expected an extended packet");
    };
    assert_eq!(pcf.tag(), PcfTag::Direct(0x01));
    assert_eq!(pcf.encoded_len(), 8);
}

#[test]
fn read_handcrafted_basic_packet() {
    let mut buf = [0u8; 21];
    let flags = PacketFlags::from_lrs(true, false, true);
    buf[..4].copy_from_slice(&((BASIC_MAGIC << 4) | u32::from(flags.bits())).to_be_bytes());
    buf[4..12].copy_from_slice(&0x3F2F_FFFF_1FFF_FFFF_u64.to_be_bytes());
    buf[12..16].copy_from_slice(&0x1234_5678_u32.to_be_bytes());
    buf[16..20].copy_from_slice(&0x8765_4321_u32.to_be_bytes());
    buf[20] = 0xB1;

    let view = PacketView::parse(&buf).unwrap();

    assert!(view.l_flag());
    assert!(!view.r_flag());
    assert!(view.s_flag());
    assert!(!view.x_flag());
    assert_eq!(view.cat(), 0x3F2F_FFFF_1FFF_FFFF);
    assert_eq!(view.psn(), 0x1234_5678);
    assert_eq!(view.pse(), 0x8765_4321);
    assert_eq!(view.payload(), [0xB1]);
}

#[test]
fn pcf_reads_fail_on_basic_packet() {
    let fields = HeaderFields { flags: PacketFlags::all(), cat: 99, psn: 99, pse: 99 };
    let buf = build_basic(&fields, &[]);
    let view = PacketView::parse(&buf).unwrap();

    assert_eq!(view.pcf_type(), Err(PacketError::NotExtendedPacket));
    assert_eq!(view.pcf_len(), Err(PacketError::NotExtendedPacket));
    assert_eq!(view.pcf_integrity(), Err(PacketError::NotExtendedPacket));
    assert_eq!(view.pcf_len_integrity_pos(), Err(PacketError::NotExtendedPacket));
}

#[test]
fn short_buffer_is_rejected() {
    let buf = [0u8; 16];
    assert!(matches!(
        PacketView::parse(&buf),
        Err(PacketError::BufferTooSmall { needed: 20, actual: 16 })
    ));
}

#[test]
fn illegal_constructor_values() {
    let fields = HeaderFields { flags: PacketFlags::empty(), cat: 1234, psn: 11, pse: 12 };

    let pcf = PcfFields { pcf_type: 0x01, integrity: 0x04, value: &hex!("CAFE") };
    assert!(build_extended(&fields, &pcf, &hex!("BABE")).is_err());

    let long = [0u8; 64];
    let pcf = PcfFields { pcf_type: 0x01, integrity: 0x04, value: &long };
    assert!(build_extended(&fields, &pcf, &hex!("BABE")).is_err());
}
