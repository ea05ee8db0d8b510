//! Addressed byte buffers exchanged with the neighbouring layers.
//!
//! A [`Message`] is an application fragment (APDU) on the upper boundary and
//! carries the link addresses it travels between. Payloads are held in
//! [`Bytes`] so handing a message across layers never copies it.

use bytes::Bytes;
use derive_more::Display;

/// Source and destination link addresses for a transfer.
///
/// # Examples
///
/// ```
/// use dnp3_transport::Addresses;
/// let addresses = Addresses::new(1, 1024);
/// assert_eq!(addresses.source(), 1);
/// assert_eq!(addresses.to_string(), "1 -> 1024");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[display("{source} -> {destination}")]
pub struct Addresses {
    source: u16,
    destination: u16,
}

impl Addresses {
    /// Create an address pair.
    #[must_use]
    pub const fn new(source: u16, destination: u16) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Address of the sending station.
    #[must_use]
    pub const fn source(&self) -> u16 { self.source }

    /// Address of the receiving station.
    #[must_use]
    pub const fn destination(&self) -> u16 { self.destination }
}

/// An application fragment together with its link addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    addresses: Addresses,
    payload: Bytes,
}

impl Message {
    /// Construct a message from addresses and payload bytes.
    #[must_use]
    pub fn new(addresses: Addresses, payload: impl Into<Bytes>) -> Self {
        Self {
            addresses,
            payload: payload.into(),
        }
    }

    /// Link addresses the message travels between.
    #[must_use]
    pub const fn addresses(&self) -> Addresses { self.addresses }

    /// Borrow the payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Number of payload bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.payload.len() }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.payload.is_empty() }

    /// Consume the message, returning its components.
    #[must_use]
    pub fn into_parts(self) -> (Addresses, Bytes) { (self.addresses, self.payload) }
}
