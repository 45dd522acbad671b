//! Rebuild a decoded packet from its fields and compare bytes.
//!
//! Extended packets are rebuilt from the [`PcfProbe`] reads rather than the
//! checked accessors, so the comparison exercises the relaxed read path on
//! exactly the buffers it is meant for: ones whose bytes were corrupted after
//! encoding.

use bytes::Bytes;
use plus_proto::{
    PacketError, PacketView, PcfFields, build_basic, build_extended, probe::PcfProbe,
};
use tracing::warn;

use crate::error::{HarnessError, Result};

/// Outcome of re-encoding one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Buffer failed validation; nothing to compare.
    Rejected(PacketError),
    /// Extended packet with a zero-length PCF value; not compared.
    Skipped,
    /// Decoded PCF type has no canonical encoding (escaped high byte `00` or
    /// `FF`), so the packet cannot be rebuilt.
    Unrepresentable(u16),
    /// Rebuilt bytes equal the original.
    Matched,
}

/// Rebuild a validated packet from its decoded fields.
pub fn reencode(view: &PacketView<'_>) -> Result<Bytes> {
    let fields = view.header_fields();
    if !view.x_flag() {
        return Ok(build_basic(&fields, view.payload()));
    }

    let out_of_bounds = || HarnessError::ProbeOutOfBounds { packet: hex::encode(view.buffer()) };
    let pcf = PcfFields {
        pcf_type: view.probe_pcf_type().ok_or_else(out_of_bounds)?,
        integrity: view.probe_pcf_integrity().ok_or_else(out_of_bounds)?,
        value: view.probe_pcf_value().ok_or_else(out_of_bounds)?,
    };

    build_extended(&fields, &pcf, view.payload())
        .map_err(|source| HarnessError::Rebuild { packet: hex::encode(view.buffer()), source })
}

/// Decode `buf`, rebuild it and compare.
///
/// # Errors
///
/// Returns an error only for codec bugs: a validated packet whose probe
/// reads fall outside the buffer, a rebuild failure other than an
/// unrepresentable type, or rebuilt bytes that differ from `buf`.
pub fn check_reencode(buf: &[u8]) -> Result<Verdict> {
    let view = match PacketView::parse(buf) {
        Ok(view) => view,
        Err(err) => return Ok(Verdict::Rejected(err)),
    };

    if view.x_flag() && view.probe_pcf_len() == Some(0) {
        return Ok(Verdict::Skipped);
    }

    let rebuilt = match reencode(&view) {
        Ok(rebuilt) => rebuilt,
        Err(HarnessError::Rebuild { source: PacketError::UnrepresentableType(ty), .. }) => {
            return Ok(Verdict::Unrepresentable(ty));
        },
        Err(err) => return Err(err),
    };

    if rebuilt != buf {
        let original = hex::encode(buf);
        let rebuilt = hex::encode(&rebuilt);
        warn!(%original, %rebuilt, "re-encode mismatch");
        return Err(HarnessError::Mismatch { original, rebuilt });
    }

    Ok(Verdict::Matched)
}
