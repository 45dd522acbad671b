//! Fuzz target: packet decoding and re-encoding.
//!
//! Arbitrary bytes must never panic the decoder, the probe reads or the
//! accessors. Anything that validates must rebuild byte-for-byte unless its
//! PCF type has no canonical encoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plus_proto::{PacketView, probe::PcfProbe};

fuzz_target!(|data: &[u8]| {
    if let Ok(view) = PacketView::parse(data) {
        let _ = view.flags();
        let _ = view.header_fields();
        assert!(view.shape().is_ok(), "validated packet has no shape");
        let _ = view.payload();
        let _ = view.pcf_len_integrity_pos();
        let _ = view.probe_pcf_type();
        let _ = view.probe_pcf_value();

        if view.x_flag() {
            assert!(view.pcf().is_ok(), "validated extended packet lost its PCF");
        }
    }

    if let Err(err) = plus_harness::check_reencode(data) {
        panic!("{err}");
    }
});
