//! Transmit state of the transport layer.

use derive_more::Display;

/// The single shared state slot of a [`TransportLayer`](crate::TransportLayer).
///
/// Receiving is independent of this state: inbound segments are handled the
/// same way whether or not a send is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum TransportState {
    /// No transmission in flight.
    #[default]
    Ready,
    /// One message is mid-transmission.
    Sending,
}

impl TransportState {
    /// Whether this state has a message in flight.
    #[must_use]
    pub const fn is_transmitting(self) -> bool { matches!(self, Self::Sending) }
}
