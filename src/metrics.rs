//! Metric helpers for the transport layer.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to nothing.

#[cfg(feature = "metrics")]
use metrics::counter;

/// Name of the counter tracking segments by direction.
pub const SEGMENTS_TOTAL: &str = "dnp3_transport_segments_total";
/// Name of the counter tracking complete messages by direction.
pub const MESSAGES_TOTAL: &str = "dnp3_transport_messages_total";
/// Name of the counter tracking discarded inbound data by reason.
pub const DISCARDS_TOTAL: &str = "dnp3_transport_discards_total";
/// Name of the counter tracking failed sends.
pub const SEND_FAILURES_TOTAL: &str = "dnp3_transport_send_failures_total";

/// Direction of segment processing.
#[derive(Clone, Copy, Debug)]
pub enum Direction {
    /// Segments received from the link layer.
    Inbound,
    /// Segments handed to the link layer.
    Outbound,
}

impl Direction {
    /// Label value used for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

/// Record a segment for the given direction.
#[cfg(feature = "metrics")]
pub fn inc_segments(direction: Direction) {
    counter!(SEGMENTS_TOTAL, "direction" => direction.as_str()).increment(1);
}

/// Record a segment for the given direction.
#[cfg(not(feature = "metrics"))]
pub fn inc_segments(_direction: Direction) {}

/// Record a complete message for the given direction.
#[cfg(feature = "metrics")]
pub fn inc_messages(direction: Direction) {
    counter!(MESSAGES_TOTAL, "direction" => direction.as_str()).increment(1);
}

/// Record a complete message for the given direction.
#[cfg(not(feature = "metrics"))]
pub fn inc_messages(_direction: Direction) {}

/// Record discarded inbound data.
#[cfg(feature = "metrics")]
pub fn inc_discards(reason: &'static str) {
    counter!(DISCARDS_TOTAL, "reason" => reason).increment(1);
}

/// Record discarded inbound data.
#[cfg(not(feature = "metrics"))]
pub fn inc_discards(_reason: &'static str) {}

/// Record a failed send.
#[cfg(feature = "metrics")]
pub fn inc_send_failures() { counter!(SEND_FAILURES_TOTAL).increment(1); }

/// Record a failed send.
#[cfg(not(feature = "metrics"))]
pub fn inc_send_failures() {}
