//! Fuzz target: build from structured inputs, parse back, compare fields.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plus_harness::ArbitraryPacket;

fuzz_target!(|packet: ArbitraryPacket| {
    if let Err(err) = packet.check_roundtrip() {
        panic!("{packet:?}: {err}");
    }
});
