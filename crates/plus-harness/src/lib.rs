//! Deterministic mutation harness for the PLUS codec.
//!
//! Corrupts valid packets with a seeded RNG, decodes whatever survives
//! validation, rebuilds each survivor from its decoded fields and checks
//! that the rebuilt buffer is byte-for-byte identical. The same checks back
//! the cargo-fuzz targets under `fuzz/`.
//!
//! # Components
//!
//! - [`MutationConfig`]: campaign size and per-round mutation bounds
//! - [`Mutator`]: seeded byte mutator
//! - [`reencode`]: rebuild a decoded packet and compare
//! - [`run_campaign`]: mutate, decode, rebuild, tally
//! - [`ArbitraryPacket`]: structured fuzz input for build/parse round trips

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod arbitrary_packet;
pub mod campaign;
pub mod config;
pub mod error;
pub mod mutator;
pub mod reencode;

pub use arbitrary_packet::{ArbitraryPacket, ArbitraryPcf};
pub use campaign::{CampaignReport, reference_packet, run_campaign};
pub use config::MutationConfig;
pub use error::{HarnessError, Result};
pub use mutator::Mutator;
pub use reencode::{Verdict, check_reencode};
