//! Wire codec for PLUS transport headers.
//!
//! A PLUS packet starts with a fixed 20-byte basic header (magic, flags, CAT,
//! PSN, PSE) and, when the `X` flag is set, an optional Path Communication
//! Field (PCF) before the payload. This crate parses a raw buffer into a
//! validated [`PacketView`] and builds canonical buffers from typed fields.
//!
//! ```text
//! Offset  Size  Field
//! 0       4     magic(28 bits) | L | R | S | X
//! 4       8     CAT
//! 12      4     PSN
//! 16      4     PSE
//! 20      ?     PCF (iff X): FF | type lenInteg | 00 typeHigh lenInteg
//!               value: len bytes
//! ..      ..    payload
//! ```
//!
//! All multi-byte integers are big-endian.
//!
//! # Views, not decoded copies
//!
//! [`PacketView`] holds nothing but references into the caller's buffer.
//! Every accessor re-derives its value from those bytes, so a view can never
//! drift from the buffer it describes. The borrow keeps the buffer immutable
//! for as long as the view exists.
//!
//! # Relaxed reads
//!
//! The [`probe::PcfProbe`] trait reads PCF fields without checking the `X`
//! flag or the declared lengths. It exists for fuzz and diagnostic tooling and
//! has to be imported explicitly.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bits;
pub mod builder;
pub mod errors;
pub mod flags;
pub mod header;
pub mod packet;
pub mod pcf;
pub mod probe;

pub use builder::{HeaderFields, PcfFields, build_basic, build_extended};
pub use errors::{PacketError, Result};
pub use flags::PacketFlags;
pub use header::BasicHeader;
pub use packet::{PacketView, Shape};
pub use pcf::{Pcf, PcfTag};
