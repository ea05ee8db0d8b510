//! Outbound cursor that slices one application message into segments.
//!
//! [`TransportTx`] never copies the whole message. It keeps a cheap clone of
//! the payload and an offset, and renders only the current segment (header
//! plus one chunk) into a small scratch buffer when the link layer asks.

use std::num::NonZeroUsize;

use bytes::{BufMut, Bytes, BytesMut};
use log::error;

use crate::{
    header::{SegmentHeader, Sequence},
    message::{Addresses, Message},
    segment::TransportSegment,
};

/// Segment source for outbound messages.
///
/// The sequence number rolls on across messages; only the offset resets when
/// a new message is configured.
#[derive(Debug)]
pub struct TransportTx {
    payload_cap: NonZeroUsize,
    addresses: Addresses,
    apdu: Bytes,
    offset: usize,
    sequence: Sequence,
    tpdu: BytesMut,
}

impl TransportTx {
    /// Create a transmitter emitting at most `payload_cap` bytes per segment.
    #[must_use]
    pub fn new(payload_cap: NonZeroUsize) -> Self {
        Self {
            payload_cap,
            addresses: Addresses::default(),
            apdu: Bytes::new(),
            offset: 0,
            sequence: Sequence::zero(),
            tpdu: BytesMut::with_capacity(payload_cap.get() + 1),
        }
    }

    /// Bind a new message and rewind the cursor to its start.
    ///
    /// The previous message should have been fully consumed or reset; a
    /// partially sent one is replaced and the loss is logged.
    pub fn configure(&mut self, message: Message) {
        if self.has_value() {
            error!(
                "transmitter reconfigured with {} bytes unsent",
                self.remaining()
            );
        }
        let (addresses, apdu) = message.into_parts();
        self.addresses = addresses;
        self.apdu = apdu;
        self.offset = 0;
    }

    /// Drop whatever remains of the current message.
    pub fn reset(&mut self) {
        self.apdu = Bytes::new();
        self.offset = 0;
        self.tpdu.clear();
    }

    /// Payload bytes not yet committed.
    #[must_use]
    pub fn remaining(&self) -> usize { self.apdu.len() - self.offset }

    /// Sequence number the next segment will carry.
    #[must_use]
    pub fn sequence(&self) -> Sequence { self.sequence }

    /// Maximum payload bytes per segment.
    #[must_use]
    pub fn payload_cap(&self) -> NonZeroUsize { self.payload_cap }

    fn chunk_end(&self) -> usize { (self.offset + self.payload_cap.get()).min(self.apdu.len()) }
}

impl TransportSegment for TransportTx {
    fn addresses(&self) -> Addresses { self.addresses }

    fn has_value(&self) -> bool { self.offset < self.apdu.len() }

    fn segment(&mut self) -> &[u8] {
        self.tpdu.clear();
        if self.has_value() {
            let end = self.chunk_end();
            let header = SegmentHeader::new(self.offset == 0, end == self.apdu.len(), self.sequence);
            self.tpdu.put_u8(header.encode());
            self.tpdu.extend_from_slice(&self.apdu[self.offset..end]);
        }
        &self.tpdu
    }

    fn advance(&mut self) -> bool {
        if !self.has_value() {
            return false;
        }
        self.offset = self.chunk_end();
        self.sequence = self.sequence.next();
        if self.has_value() {
            return true;
        }
        self.reset();
        false
    }
}

#[cfg(test)]
mod tests;
