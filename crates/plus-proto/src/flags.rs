//! Flag bits carried in the low nibble of the magic word.

use bitflags::bitflags;

bitflags! {
    /// The four PLUS header flags.
    ///
    /// Bit positions match the wire layout: the flags occupy the low nibble
    /// of byte 3, `L` in bit 3 down to `X` in bit 0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PacketFlags: u8 {
        /// L flag
        const L = 0b1000;
        /// R flag
        const R = 0b0100;
        /// S flag
        const S = 0b0010;
        /// Extended header: a PCF follows the basic header
        const X = 0b0001;
    }
}

impl PacketFlags {
    /// Flags a caller may choose freely. `X` is decided by the packet shape.
    pub const CALLER: Self = Self::L.union(Self::R).union(Self::S);

    /// Build flags from the three caller-controlled booleans.
    pub fn from_lrs(l: bool, r: bool, s: bool) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::L, l);
        flags.set(Self::R, r);
        flags.set(Self::S, s);
        flags
    }
}
