//! Recording doubles for the layers surrounding the transport layer.
//!
//! Each double is cheap to clone and every clone shares one record, so a test
//! can box one clone into the layer and inspect another.

use std::{cell::RefCell, rc::Rc};

use dnp3_transport::{Addresses, LinkLayer, Message, TransportSegment, UpperLayer};

#[derive(Debug, Default)]
struct UpperRecord {
    received: Vec<Message>,
    send_results: Vec<bool>,
    ups: usize,
    downs: usize,
}

/// Application layer double that records every callback.
#[derive(Clone, Debug, Default)]
pub struct RecordingUpperLayer {
    record: Rc<RefCell<UpperRecord>>,
}

impl RecordingUpperLayer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Messages delivered so far.
    #[must_use]
    pub fn received(&self) -> Vec<Message> { self.record.borrow().received.clone() }

    /// Send results delivered so far.
    #[must_use]
    pub fn send_results(&self) -> Vec<bool> { self.record.borrow().send_results.clone() }

    /// Number of lower-layer-up notifications.
    #[must_use]
    pub fn up_count(&self) -> usize { self.record.borrow().ups }

    /// Number of lower-layer-down notifications.
    #[must_use]
    pub fn down_count(&self) -> usize { self.record.borrow().downs }

    /// Total number of callbacks of any kind.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        let record = self.record.borrow();
        record.received.len() + record.send_results.len() + record.ups + record.downs
    }
}

impl UpperLayer for RecordingUpperLayer {
    fn on_receive(&mut self, message: Message) { self.record.borrow_mut().received.push(message); }

    fn on_send_result(&mut self, success: bool) {
        self.record.borrow_mut().send_results.push(success);
    }

    fn on_lower_layer_up(&mut self) { self.record.borrow_mut().ups += 1; }

    fn on_lower_layer_down(&mut self) { self.record.borrow_mut().downs += 1; }
}

/// A segment captured by [`RecordingLinkLayer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentSegment {
    /// Addresses reported by the segment source.
    pub addresses: Addresses,
    /// Header byte followed by payload.
    pub tpdu: Vec<u8>,
}

/// Link layer double that copies each segment it is handed.
#[derive(Clone, Debug, Default)]
pub struct RecordingLinkLayer {
    sent: Rc<RefCell<Vec<SentSegment>>>,
}

impl RecordingLinkLayer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Every segment handed over so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SentSegment> { self.sent.borrow().clone() }

    /// Raw bytes of every segment handed over so far.
    #[must_use]
    pub fn tpdus(&self) -> Vec<Vec<u8>> {
        self.sent.borrow().iter().map(|segment| segment.tpdu.clone()).collect()
    }

    /// Number of segments handed over so far.
    #[must_use]
    pub fn len(&self) -> usize { self.sent.borrow().len() }

    /// Whether nothing has been sent.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.sent.borrow().is_empty() }
}

impl LinkLayer for RecordingLinkLayer {
    fn send(&mut self, segment: &mut dyn TransportSegment) {
        let addresses = segment.addresses();
        let tpdu = segment.segment().to_vec();
        self.sent.borrow_mut().push(SentSegment { addresses, tpdu });
    }
}
