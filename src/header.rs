//! One-byte transport header carried at the front of every segment.
//!
//! The header packs two framing flags and a rolling sequence number:
//!
//! ```text
//!  7     6     5 ... 0
//! +-----+-----+-----------+
//! | FIR | FIN | SEQUENCE  |
//! +-----+-----+-----------+
//! ```
//!
//! Every octet decodes to a structurally valid header; whether the decoded
//! value makes sense for the current reassembly is the receiver's concern.

use std::fmt;

use derive_more::Display;

/// Bit marking the first segment of a message.
pub const FIR_MASK: u8 = 0x80;
/// Bit marking the final segment of a message.
pub const FIN_MASK: u8 = 0x40;
/// Bits holding the sequence number.
pub const SEQ_MASK: u8 = 0x3F;

/// Six-bit rolling segment sequence number.
///
/// # Examples
///
/// ```
/// use dnp3_transport::Sequence;
/// assert_eq!(Sequence::new(63).next(), Sequence::zero());
/// assert_eq!(Sequence::new(0x45).get(), 0x05);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Sequence(u8);

impl Sequence {
    /// Construct a sequence number, discarding bits above the six-bit range.
    #[must_use]
    pub const fn new(value: u8) -> Self { Self(value & SEQ_MASK) }

    /// Return the sequence number used for the first segment of a new layer.
    #[must_use]
    pub const fn zero() -> Self { Self(0) }

    /// Return the underlying numeric value (always `0..=63`).
    #[must_use]
    pub const fn get(self) -> u8 { self.0 }

    /// Return the successor, wrapping from 63 back to 0.
    #[must_use]
    pub const fn next(self) -> Self { Self((self.0 + 1) & SEQ_MASK) }
}

impl From<u8> for Sequence {
    fn from(value: u8) -> Self { Self::new(value) }
}

impl From<Sequence> for u8 {
    fn from(value: Sequence) -> Self { value.0 }
}

/// Decoded transport header.
///
/// # Examples
///
/// ```
/// use dnp3_transport::{SegmentHeader, Sequence};
/// let header = SegmentHeader::new(true, false, Sequence::new(5));
/// assert_eq!(header.encode(), 0x85);
/// assert_eq!(SegmentHeader::decode(0x85), header);
/// assert_eq!(header.to_string(), "FIR #5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentHeader {
    first: bool,
    fin: bool,
    sequence: Sequence,
}

impl SegmentHeader {
    /// Create a header from its three fields.
    #[must_use]
    pub const fn new(first: bool, fin: bool, sequence: Sequence) -> Self {
        Self {
            first,
            fin,
            sequence,
        }
    }

    /// Whether this segment opens a message.
    #[must_use]
    pub const fn first(&self) -> bool { self.first }

    /// Whether this segment closes a message.
    #[must_use]
    pub const fn fin(&self) -> bool { self.fin }

    /// Sequence number carried by the segment.
    #[must_use]
    pub const fn sequence(&self) -> Sequence { self.sequence }

    /// Pack the header into its wire octet.
    #[must_use]
    pub const fn encode(self) -> u8 {
        let mut byte = self.sequence.get();
        if self.first {
            byte |= FIR_MASK;
        }
        if self.fin {
            byte |= FIN_MASK;
        }
        byte
    }

    /// Unpack a wire octet. Never fails.
    #[must_use]
    pub const fn decode(byte: u8) -> Self {
        Self {
            first: byte & FIR_MASK != 0,
            fin: byte & FIN_MASK != 0,
            sequence: Sequence::new(byte),
        }
    }
}

impl From<u8> for SegmentHeader {
    fn from(value: u8) -> Self { Self::decode(value) }
}

impl From<SegmentHeader> for u8 {
    fn from(value: SegmentHeader) -> Self { value.encode() }
}

impl fmt::Display for SegmentHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first {
            f.write_str("FIR ")?;
        }
        if self.fin {
            f.write_str("FIN ")?;
        }
        write!(f, "#{}", self.sequence)
    }
}

#[cfg(test)]
mod tests;
