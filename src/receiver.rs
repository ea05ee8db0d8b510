//! Inbound helper that stitches segments back into application messages.
//!
//! [`TransportRx`] keeps a single bounded buffer. A `FIR` segment always opens
//! a fresh message; every following segment must carry the next sequence
//! number and the same addresses. Any violation abandons the partial message:
//! a gap cannot be repaired at this layer, so nothing partial is ever
//! delivered.

use std::num::NonZeroUsize;

use bytes::BytesMut;
use log::warn;

use crate::{
    error::ReassemblyError,
    header::{SegmentHeader, Sequence},
    message::{Addresses, Message},
};

#[derive(Clone, Copy, Debug)]
struct InProgress {
    addresses: Addresses,
    expected: Sequence,
}

/// Single-message segment re-assembler.
#[derive(Debug)]
pub struct TransportRx {
    max_fragment_size: NonZeroUsize,
    buffer: BytesMut,
    in_progress: Option<InProgress>,
    superseded: u64,
}

impl TransportRx {
    /// Create a receiver that rejects messages larger than `max_fragment_size`.
    #[must_use]
    pub fn new(max_fragment_size: NonZeroUsize) -> Self {
        Self {
            max_fragment_size,
            buffer: BytesMut::with_capacity(max_fragment_size.get()),
            in_progress: None,
            superseded: 0,
        }
    }

    /// Process one inbound segment.
    ///
    /// Returns `Ok(Some(_))` when the segment completes a message, `Ok(None)`
    /// while more segments are required.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError`] when the segment is empty, carries no
    /// payload, is orphaned, is out of sequence, comes from the wrong endpoint,
    /// or would overflow the buffer. Empty, payload-less and orphaned segments
    /// leave the receiver untouched; the rest abandon the in-progress message.
    pub fn handle_receive(
        &mut self,
        addresses: Addresses,
        tpdu: &[u8],
    ) -> Result<Option<Message>, ReassemblyError> {
        let Some((&byte, payload)) = tpdu.split_first() else {
            return Err(ReassemblyError::EmptySegment);
        };
        let header = SegmentHeader::decode(byte);
        if payload.is_empty() {
            return Err(ReassemblyError::NoPayload { header });
        }

        if header.first() {
            self.begin(addresses, header);
        }

        let Some(progress) = self.in_progress else {
            return Err(ReassemblyError::NoFirstSegment { header });
        };

        if progress.addresses != addresses {
            self.reset();
            return Err(ReassemblyError::AddressMismatch);
        }

        if header.sequence() != progress.expected {
            self.reset();
            return Err(ReassemblyError::SequenceMismatch {
                expected: progress.expected,
                found: header.sequence(),
            });
        }

        let attempted = self.buffer.len().saturating_add(payload.len());
        if attempted > self.max_fragment_size.get() {
            self.reset();
            return Err(ReassemblyError::BufferOverflow {
                attempted,
                limit: self.max_fragment_size,
            });
        }

        self.buffer.extend_from_slice(payload);

        if header.fin() {
            self.in_progress = None;
            let apdu = self.buffer.split().freeze();
            return Ok(Some(Message::new(addresses, apdu)));
        }

        self.in_progress = Some(InProgress {
            addresses,
            expected: progress.expected.next(),
        });
        Ok(None)
    }

    /// Abandon any partial message.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.in_progress = None;
    }

    /// Whether a message is partially reassembled.
    #[must_use]
    pub fn is_in_progress(&self) -> bool { self.in_progress.is_some() }

    /// Bytes accumulated for the partial message.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.buffer.len() }

    /// Number of partial messages dropped because a new `FIR` arrived.
    #[must_use]
    pub fn superseded_partials(&self) -> u64 { self.superseded }

    fn begin(&mut self, addresses: Addresses, header: SegmentHeader) {
        if self.in_progress.is_some() {
            warn!(
                "discarding {} bytes of partial message, new segment {header}",
                self.buffer.len()
            );
            self.superseded += 1;
            crate::metrics::inc_discards("superseded");
        }
        self.buffer.clear();
        self.in_progress = Some(InProgress {
            addresses,
            expected: header.sequence(),
        });
    }
}
