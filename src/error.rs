//! Error types surfaced by the transport layer.
//!
//! [`TransportError`] covers caller and lifecycle contract violations. These
//! are returned to the caller and logged; they never mutate layer state.
//! [`ReassemblyError`] covers malformed or out-of-sequence segments from the
//! peer. The layer logs and counts them, then carries on waiting for the next
//! `FIR` segment.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::header::{SegmentHeader, Sequence};

/// Contract violations reported by [`TransportLayer`](crate::TransportLayer).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The lower layer is down.
    #[error("layer offline")]
    Offline,
    /// A message is already mid-transmission.
    #[error("transmission already in progress")]
    AlreadyTransmitting,
    /// The link layer reported a send result while nothing was outstanding.
    #[error("send result received with no outstanding send")]
    NoOutstandingSend,
    /// The lower layer reported up while already online.
    #[error("layer already online")]
    AlreadyOnline,
    /// The lower layer reported down while already offline.
    #[error("layer already offline")]
    AlreadyOffline,
    /// An application layer has already been registered.
    #[error("application layer already registered")]
    AppLayerAlreadySet,
    /// A link layer has already been registered.
    #[error("link layer already registered")]
    LinkLayerAlreadySet,
    /// No link layer is registered to carry segments.
    #[error("no link layer registered")]
    NoLinkLayer,
}

/// Reasons an inbound segment was discarded.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    /// The link layer delivered zero bytes.
    #[error("received empty segment")]
    EmptySegment,
    /// The segment held a header byte and nothing else.
    #[error("segment {header} carries no payload")]
    NoPayload {
        /// Header of the payload-less segment.
        header: SegmentHeader,
    },
    /// A continuation arrived with no message in progress.
    #[error("segment {header} received with no FIR segment in progress")]
    NoFirstSegment {
        /// Header of the orphaned segment.
        header: SegmentHeader,
    },
    /// A segment skipped, repeated, or reordered the sequence.
    #[error("bad sequence number: expected {expected}, found {found}")]
    SequenceMismatch {
        /// Sequence the receiver expected next.
        expected: Sequence,
        /// Sequence carried by the segment.
        found: Sequence,
    },
    /// A continuation arrived from a different link endpoint than its `FIR`.
    #[error("segment addresses changed mid-message")]
    AddressMismatch,
    /// The reassembled message would exceed the fragment size.
    #[error("reassembly buffer overflow: {attempted} bytes > {limit} bytes")]
    BufferOverflow {
        /// Size the buffer would have reached.
        attempted: usize,
        /// Configured maximum fragment size.
        limit: NonZeroUsize,
    },
}

impl ReassemblyError {
    /// Short label naming the failure, used for metrics.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::EmptySegment => "empty",
            Self::NoPayload { .. } => "no_payload",
            Self::NoFirstSegment { .. } => "no_first",
            Self::SequenceMismatch { .. } => "sequence",
            Self::AddressMismatch => "addresses",
            Self::BufferOverflow { .. } => "overflow",
        }
    }
}

/// Errors raised while building a [`TransportConfig`](crate::TransportConfig).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The fragment size cannot hold a header byte and a payload byte.
    #[error("fragment size {requested} below minimum {minimum}")]
    FragmentSizeTooSmall {
        /// Requested fragment size.
        requested: usize,
        /// Smallest accepted fragment size.
        minimum: usize,
    },
}
