//! Counters describing the traffic a transport layer has handled.

/// Snapshot of transport layer counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransportStatistics {
    /// Segments handed to the link layer.
    pub segments_tx: u64,
    /// Segments received from the link layer while online.
    pub segments_rx: u64,
    /// Messages whose every segment the link layer confirmed.
    pub messages_tx: u64,
    /// Messages completely reassembled and delivered upward.
    pub messages_rx: u64,
    /// Inbound segments discarded for any protocol violation.
    pub rx_errors: u64,
    /// Inbound segments that would have overflowed the reassembly buffer.
    pub buffer_overflows: u64,
    /// Partial messages dropped because a new `FIR` segment arrived or the
    /// lower layer went down.
    pub rx_discarded_partials: u64,
}
