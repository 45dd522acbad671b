//! Relaxed PCF reads for fuzzing and diagnostics.
//!
//! [`PcfProbe`] applies the same offset arithmetic as [`PacketView::pcf`] but
//! skips two checks: it does not look at the `X` flag, and it does not
//! require the declared PCF length to fit. It reads whatever bytes sit at the
//! computed positions. Reads stay within the buffer; a position past the end
//! yields `None`.
//!
//! The trait is implemented for [`PacketView`], which only exists after
//! [`PacketView::parse`] succeeded. When `X` is set, parsing has already
//! checked that the PCF fits, so on such a view the probe reads agree with
//! the checked accessors. The relaxed length handling only matters when `X`
//! is clear, where the bytes after the header are payload and the probe reads
//! them as if they were a PCF.
//!
//! Results on a packet with `X` clear, or on a buffer that was mutated after
//! encoding, may be meaningless. Callers opt in by importing the trait.

use crate::{bits, packet::PacketView, pcf::PcfTag};

/// PCF accessors without protocol validation.
pub trait PcfProbe<'a> {
    /// Logical PCF type read from the bytes after the basic header.
    fn probe_pcf_type(&self) -> Option<u16>;

    /// PCF value length from the length/integrity byte (0 for the empty
    /// form).
    fn probe_pcf_len(&self) -> Option<u8>;

    /// PCF integrity from the length/integrity byte (0 for the empty form).
    fn probe_pcf_integrity(&self) -> Option<u8>;

    /// The `len` bytes following the PCF header.
    fn probe_pcf_value(&self) -> Option<&'a [u8]>;
}

impl<'a> PcfProbe<'a> for PacketView<'a> {
    fn probe_pcf_type(&self) -> Option<u16> {
        PcfTag::read(self.after_header()).map(PcfTag::pcf_type)
    }

    fn probe_pcf_len(&self) -> Option<u8> {
        len_integrity(self.after_header()).map(|(len, _)| len)
    }

    fn probe_pcf_integrity(&self) -> Option<u8> {
        len_integrity(self.after_header()).map(|(_, integrity)| integrity)
    }

    fn probe_pcf_value(&self) -> Option<&'a [u8]> {
        let pcf = self.after_header();
        let tag = PcfTag::read(pcf)?;
        let (len, _) = len_integrity(pcf)?;
        let start = tag.header_len();
        pcf.get(start..start + usize::from(len))
    }
}

fn len_integrity(pcf: &[u8]) -> Option<(u8, u8)> {
    let tag = PcfTag::read(pcf)?;
    tag.len_integrity_offset()
        .map_or(Some((0, 0)), |at| pcf.get(at).map(|&byte| bits::unpack_len_integrity(byte)))
}
