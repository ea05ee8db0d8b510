#![doc(html_root_url = "https://docs.rs/dnp3-transport/latest")]
//! Public API for the `dnp3-transport` library.
//!
//! This crate implements the DNP3 transport function: outbound application
//! fragments are split into segments that fit a link frame, each prefixed
//! with a one-byte header carrying `FIR`/`FIN` flags and a six-bit rolling
//! sequence number; inbound segments are validated and reassembled into
//! complete fragments. Segment gaps, duplicates, reordering, and oversized
//! messages are discarded rather than repaired.
//!
//! The link and application layers are external collaborators reached
//! through the [`LinkLayer`] and [`UpperLayer`] traits.

pub mod config;
pub mod error;
pub mod executor;
pub mod header;
pub mod layer;
pub mod layers;
pub mod message;
pub mod metrics;
pub mod receiver;
pub mod segment;
pub mod state;
pub mod statistics;
pub mod transmitter;

pub use config::{
    DEFAULT_MAX_FRAGMENT_SIZE,
    MAX_SEGMENT_PAYLOAD,
    MIN_FRAGMENT_SIZE,
    TransportConfig,
};
pub use error::{ConfigError, ReassemblyError, TransportError};
pub use executor::{DeferredTask, TaskQueue};
pub use header::{FIN_MASK, FIR_MASK, SEQ_MASK, SegmentHeader, Sequence};
pub use layer::TransportLayer;
pub use layers::{LinkLayer, UpperLayer};
pub use message::{Addresses, Message};
pub use receiver::TransportRx;
pub use segment::TransportSegment;
pub use state::TransportState;
pub use statistics::TransportStatistics;
pub use transmitter::TransportTx;
