//! Boundaries to the neighbouring protocol layers.
//!
//! The transport layer sits between a link layer below and an application
//! layer above. Both are external collaborators: the transport layer calls
//! into them through these traits and they call back through the public
//! methods of [`TransportLayer`](crate::TransportLayer).

use crate::{message::Message, segment::TransportSegment};

/// Receiver of completed messages and link state from the transport layer.
pub trait UpperLayer {
    /// A message was completely reassembled.
    fn on_receive(&mut self, message: Message);

    /// The outcome of the most recent `begin_transmit`.
    fn on_send_result(&mut self, success: bool);

    /// The lower layer came online.
    fn on_lower_layer_up(&mut self);

    /// The lower layer went offline.
    fn on_lower_layer_down(&mut self);
}

/// Carrier of outbound segments.
pub trait LinkLayer {
    /// Transmit the current segment of `segment`.
    ///
    /// Implementations read [`TransportSegment::segment`] and
    /// [`TransportSegment::addresses`], copy what they need, and later report
    /// the outcome through
    /// [`TransportLayer::on_send_result`](crate::TransportLayer::on_send_result).
    /// They must not call [`TransportSegment::advance`]; the transport layer
    /// commits the cursor itself.
    fn send(&mut self, segment: &mut dyn TransportSegment);
}
