//! Mutation campaigns over a template packet.

use bytes::Bytes;
use plus_proto::{HeaderFields, PacketError, PacketFlags, PcfFields, build_extended};
use tracing::{debug, warn};

use crate::{
    config::MutationConfig,
    error::{HarnessError, Result},
    mutator::Mutator,
    reencode::{Verdict, check_reencode},
};

/// Tallies from one campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignReport {
    /// Buffers generated
    pub rounds: usize,
    /// Buffers that failed validation
    pub rejected: usize,
    /// Extended packets with zero PCF length
    pub skipped: usize,
    /// Packets whose decoded PCF type has no canonical encoding
    pub unrepresentable: usize,
    /// Packets rebuilt byte-for-byte
    pub matched: usize,
    /// Codec bugs found, in discovery order
    pub failures: Vec<HarnessError>,
}

impl CampaignReport {
    /// True when no round exposed a codec bug.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, verdict: Result<Verdict>) {
        self.rounds += 1;
        match verdict {
            Ok(Verdict::Rejected(_)) => self.rejected += 1,
            Ok(Verdict::Skipped) => self.skipped += 1,
            Ok(Verdict::Unrepresentable(_)) => self.unrepresentable += 1,
            Ok(Verdict::Matched) => self.matched += 1,
            Err(err) => self.failures.push(err),
        }
    }
}

/// Extended packet used as the default campaign template.
///
/// All flags set, escaped PCF type `0xCC00`, integrity 3, six value bytes
/// and a four-byte payload.
pub fn reference_packet() -> std::result::Result<Bytes, PacketError> {
    let fields = HeaderFields {
        flags: PacketFlags::CALLER,
        cat: 0x1234_5678_1234_5678,
        psn: 0x1311_1111,
        pse: 0x2322_2222,
    };
    let pcf = PcfFields { pcf_type: 0xCC00, integrity: 3, value: &[1, 2, 3, 4, 5, 6] };
    build_extended(&fields, &pcf, &[0x99, 0x98, 0x97, 0x96])
}

/// Run `config.rounds` rounds: copy `template`, mutate it, re-encode check.
///
/// Fails only on an invalid config. Codec bugs are collected in
/// [`CampaignReport::failures`].
pub fn run_campaign(config: &MutationConfig, seed: u64, template: &[u8]) -> Result<CampaignReport> {
    let mut mutator = Mutator::new(config, seed)?;
    let mut report = CampaignReport::default();
    let mut buf = template.to_vec();

    for _ in 0..config.rounds {
        buf.copy_from_slice(template);
        mutator.mutate(&mut buf);
        report.record(check_reencode(&buf));
    }

    if report.is_clean() {
        debug!(
            seed,
            rounds = report.rounds,
            rejected = report.rejected,
            skipped = report.skipped,
            unrepresentable = report.unrepresentable,
            matched = report.matched,
            "campaign finished"
        );
    } else {
        warn!(seed, failures = report.failures.len(), "campaign found re-encode failures");
    }

    Ok(report)
}
