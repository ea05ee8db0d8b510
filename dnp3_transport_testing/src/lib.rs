//! Utilities for driving a [`TransportLayer`](dnp3_transport::TransportLayer)
//! in tests.
//!
//! The recording doubles stand in for the link and application layers, and
//! [`online_layer`] wires them into a layer that is already online.
//!
//! ```rust
//! use dnp3_transport::{Addresses, Message};
//! use dnp3_transport_testing::{online_layer, send_all};
//!
//! let mut harness = online_layer(3);
//! harness
//!     .layer
//!     .begin_transmit(Message::new(Addresses::new(1, 2), vec![1, 2, 3]))
//!     .unwrap();
//! send_all(&mut harness.layer);
//! assert_eq!(harness.link.len(), 2);
//! ```

pub mod logging;
pub mod mocks;

use dnp3_transport::{TransportConfig, TransportLayer};
pub use logging::{LoggerHandle, logger};
pub use mocks::{RecordingLinkLayer, RecordingUpperLayer, SentSegment};

/// A transport layer wired to recording doubles.
pub struct Harness {
    /// The layer under test.
    pub layer: TransportLayer,
    /// Shared view of the registered application layer.
    pub upper: RecordingUpperLayer,
    /// Shared view of the registered link layer.
    pub link: RecordingLinkLayer,
}

/// Build an offline layer with both doubles registered.
///
/// # Panics
///
/// Panics if `max_fragment_size` is rejected by [`TransportConfig::new`].
#[must_use]
pub fn offline_layer(max_fragment_size: usize) -> Harness {
    let config = TransportConfig::new(max_fragment_size).expect("valid fragment size");
    let mut layer = TransportLayer::new(config);
    let upper = RecordingUpperLayer::new();
    let link = RecordingLinkLayer::new();
    layer
        .set_app_layer(Box::new(upper.clone()))
        .expect("fresh layer accepts an app layer");
    layer
        .set_link_layer(Box::new(link.clone()))
        .expect("fresh layer accepts a link layer");
    Harness { layer, upper, link }
}

/// Build a layer with both doubles registered and the lower layer up.
///
/// # Panics
///
/// Panics if `max_fragment_size` is rejected by [`TransportConfig::new`].
#[must_use]
pub fn online_layer(max_fragment_size: usize) -> Harness {
    let mut harness = offline_layer(max_fragment_size);
    harness
        .layer
        .on_lower_layer_up()
        .expect("fresh layer starts offline");
    harness
}

/// Confirm every segment until the layer has nothing in flight.
///
/// # Panics
///
/// Panics if the layer rejects a send result.
pub fn send_all(layer: &mut TransportLayer) {
    while layer.is_transmitting() {
        layer
            .on_send_result(true)
            .expect("send result accepted while transmitting");
    }
}
