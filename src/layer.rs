//! The transport state machine.
//!
//! [`TransportLayer`] serialises outbound messages against the lower layer's
//! online/offline lifecycle and forwards inbound segments to the
//! re-assembler. Only one message may be in flight: the layer hands the
//! current segment to the link layer, waits for
//! [`on_send_result`](TransportLayer::on_send_result), and only then commits
//! the cursor and emits the next segment.
//!
//! Every operation runs to completion on the caller's thread. Send failures
//! detected while validating `begin_transmit` are not reported inline; they
//! are queued and delivered by [`run_pending`](TransportLayer::run_pending)
//! or [`run_next`](TransportLayer::run_next).

use std::fmt;

use log::{debug, error, warn};

use crate::{
    config::TransportConfig,
    error::{ReassemblyError, TransportError},
    executor::{DeferredTask, TaskQueue},
    layers::{LinkLayer, UpperLayer},
    message::{Addresses, Message},
    metrics::{self, Direction},
    receiver::TransportRx,
    segment::TransportSegment,
    state::TransportState,
    statistics::TransportStatistics,
    transmitter::TransportTx,
};

/// DNP3 transport function sitting between a link and an application layer.
///
/// # Examples
///
/// ```
/// use dnp3_transport::{
///     Addresses,
///     LinkLayer,
///     Message,
///     TransportConfig,
///     TransportLayer,
///     TransportSegment,
/// };
///
/// struct Wire;
///
/// impl LinkLayer for Wire {
///     fn send(&mut self, segment: &mut dyn TransportSegment) {
///         assert_eq!(segment.segment(), &[0xC0, 0x01]);
///     }
/// }
///
/// let mut layer = TransportLayer::new(TransportConfig::default());
/// layer.set_link_layer(Box::new(Wire)).expect("first link layer");
/// layer.on_lower_layer_up().expect("layer starts offline");
/// layer
///     .begin_transmit(Message::new(Addresses::new(1, 1024), vec![0x01]))
///     .expect("layer is idle");
/// assert!(layer.is_transmitting());
/// layer.on_send_result(true).expect("send outstanding");
/// assert!(!layer.is_transmitting());
/// ```
pub struct TransportLayer {
    config: TransportConfig,
    online: bool,
    state: TransportState,
    transmitter: TransportTx,
    receiver: TransportRx,
    tasks: TaskQueue,
    upper: Option<Box<dyn UpperLayer>>,
    link: Option<Box<dyn LinkLayer>>,
    statistics: TransportStatistics,
}

impl TransportLayer {
    /// Create an offline layer in the `Ready` state.
    #[must_use]
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            online: false,
            state: TransportState::Ready,
            transmitter: TransportTx::new(config.segment_payload_cap()),
            receiver: TransportRx::new(config.max_fragment_size()),
            tasks: TaskQueue::new(),
            upper: None,
            link: None,
            statistics: TransportStatistics::default(),
        }
    }

    /// Register the application layer. May only be called once.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::AppLayerAlreadySet`] if one is already
    /// registered; the original registration is kept.
    pub fn set_app_layer(&mut self, upper: Box<dyn UpperLayer>) -> Result<(), TransportError> {
        if self.upper.is_some() {
            return Err(log_violation(TransportError::AppLayerAlreadySet));
        }
        self.upper = Some(upper);
        Ok(())
    }

    /// Register the link layer. May only be called once.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::LinkLayerAlreadySet`] if one is already
    /// registered; the original registration is kept.
    pub fn set_link_layer(&mut self, link: Box<dyn LinkLayer>) -> Result<(), TransportError> {
        if self.link.is_some() {
            return Err(log_violation(TransportError::LinkLayerAlreadySet));
        }
        self.link = Some(link);
        Ok(())
    }

    /// Start sending `message`.
    ///
    /// A message outside `1..=max_fragment_size` bytes is not sent; its
    /// failure is queued and reported to the upper layer on a later turn, and
    /// this call still returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Offline`] while the lower layer is down,
    /// [`TransportError::AlreadyTransmitting`] while another message is in
    /// flight, and [`TransportError::NoLinkLayer`] if no link layer is
    /// registered. None of these change any state.
    pub fn begin_transmit(&mut self, message: Message) -> Result<(), TransportError> {
        if !self.online {
            return Err(log_violation(TransportError::Offline));
        }

        let limit = self.config.max_fragment_size().get();
        if message.is_empty() || message.len() > limit {
            error!(
                "illegal APDU length {}, must be in the range [1, {limit}]",
                message.len()
            );
            self.tasks.post(DeferredTask::SendFailure);
            return Ok(());
        }

        match self.state {
            TransportState::Ready => self.start_send(message),
            TransportState::Sending => Err(log_violation(TransportError::AlreadyTransmitting)),
        }
    }

    /// Handle the link layer's verdict on the segment it was last given.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Offline`] while the lower layer is down and
    /// [`TransportError::NoOutstandingSend`] when nothing is in flight.
    pub fn on_send_result(&mut self, success: bool) -> Result<(), TransportError> {
        if !self.online {
            return Err(log_violation(TransportError::Offline));
        }

        match self.state {
            TransportState::Ready => Err(log_violation(TransportError::NoOutstandingSend)),
            TransportState::Sending if success => {
                if self.transmitter.advance() {
                    self.emit_segment();
                } else {
                    self.change_state(TransportState::Ready);
                    self.statistics.messages_tx += 1;
                    metrics::inc_messages(Direction::Outbound);
                    self.notify_send_result(true);
                }
                Ok(())
            }
            TransportState::Sending => {
                warn!(
                    "link layer send failed, abandoning {} unsent bytes",
                    self.transmitter.remaining()
                );
                self.transmitter.reset();
                self.change_state(TransportState::Ready);
                metrics::inc_send_failures();
                self.notify_send_result(false);
                Ok(())
            }
        }
    }

    /// Handle one segment delivered by the link layer.
    ///
    /// Malformed or out-of-sequence segments are logged and discarded; they
    /// are the peer's fault and are not reported to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Offline`] while the lower layer is down.
    pub fn on_receive(&mut self, addresses: Addresses, tpdu: &[u8]) -> Result<(), TransportError> {
        if !self.online {
            return Err(log_violation(TransportError::Offline));
        }

        match self.state {
            TransportState::Ready | TransportState::Sending => {
                self.receive_segment(addresses, tpdu);
            }
        }
        Ok(())
    }

    /// Mark the lower layer as online and tell the upper layer.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::AlreadyOnline`] if the layer is already up.
    pub fn on_lower_layer_up(&mut self) -> Result<(), TransportError> {
        if self.online {
            return Err(log_violation(TransportError::AlreadyOnline));
        }
        self.online = true;
        debug!("transport layer online");
        if let Some(upper) = self.upper.as_deref_mut() {
            upper.on_lower_layer_up();
        }
        Ok(())
    }

    /// Mark the lower layer as offline.
    ///
    /// Any partial reassembly and any in-flight send are dropped. The dropped
    /// send gets no result callback.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::AlreadyOffline`] if the layer is already down.
    pub fn on_lower_layer_down(&mut self) -> Result<(), TransportError> {
        if !self.online {
            return Err(log_violation(TransportError::AlreadyOffline));
        }
        self.online = false;
        if self.receiver.is_in_progress() {
            debug!(
                "dropping {} bytes of partial message, lower layer down",
                self.receiver.buffered_len()
            );
            self.statistics.rx_discarded_partials += 1;
            metrics::inc_discards("link_down");
        }
        self.receiver.reset();
        self.transmitter.reset();
        if self.state.is_transmitting() {
            debug!("dropping in-flight send, lower layer down");
        }
        self.change_state(TransportState::Ready);
        if let Some(upper) = self.upper.as_deref_mut() {
            upper.on_lower_layer_down();
        }
        Ok(())
    }

    /// Whether a message is mid-transmission. Always `false` while offline.
    #[must_use]
    pub fn is_transmitting(&self) -> bool { self.online && self.state.is_transmitting() }

    /// Whether the lower layer is up.
    #[must_use]
    pub fn is_online(&self) -> bool { self.online }

    /// Current transmit state.
    #[must_use]
    pub fn state(&self) -> TransportState { self.state }

    /// Configuration the layer was built with.
    #[must_use]
    pub fn config(&self) -> &TransportConfig { &self.config }

    /// Snapshot of the traffic counters.
    #[must_use]
    pub fn statistics(&self) -> TransportStatistics {
        TransportStatistics {
            rx_discarded_partials: self.statistics.rx_discarded_partials
                + self.receiver.superseded_partials(),
            ..self.statistics
        }
    }

    /// Run every deferred task that is ready, returning how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.tasks.try_next() {
            self.execute(task);
            ran += 1;
        }
        ran
    }

    /// Wait for the next deferred task and run it.
    pub async fn run_next(&mut self) -> Option<DeferredTask> {
        let task = self.tasks.next().await?;
        self.execute(task);
        Some(task)
    }

    fn start_send(&mut self, message: Message) -> Result<(), TransportError> {
        if self.link.is_none() {
            return Err(log_violation(TransportError::NoLinkLayer));
        }
        debug!(
            "sending {} byte APDU to {}",
            message.len(),
            message.addresses()
        );
        self.transmitter.configure(message);
        self.change_state(TransportState::Sending);
        self.emit_segment();
        Ok(())
    }

    fn emit_segment(&mut self) {
        let Some(link) = self.link.as_deref_mut() else {
            return;
        };
        link.send(&mut self.transmitter);
        self.statistics.segments_tx += 1;
        metrics::inc_segments(Direction::Outbound);
    }

    fn receive_segment(&mut self, addresses: Addresses, tpdu: &[u8]) {
        self.statistics.segments_rx += 1;
        metrics::inc_segments(Direction::Inbound);

        match self.receiver.handle_receive(addresses, tpdu) {
            Ok(Some(message)) => {
                self.statistics.messages_rx += 1;
                metrics::inc_messages(Direction::Inbound);
                if let Some(upper) = self.upper.as_deref_mut() {
                    upper.on_receive(message);
                }
            }
            Ok(None) => {}
            Err(err) => self.record_discard(err),
        }
    }

    fn record_discard(&mut self, err: ReassemblyError) {
        warn!("discarding segment: {err}");
        self.statistics.rx_errors += 1;
        if matches!(err, ReassemblyError::BufferOverflow { .. }) {
            self.statistics.buffer_overflows += 1;
        }
        metrics::inc_discards(err.reason());
    }

    fn execute(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::SendFailure => {
                metrics::inc_send_failures();
                self.notify_send_result(false);
            }
        }
    }

    fn notify_send_result(&mut self, success: bool) {
        if let Some(upper) = self.upper.as_deref_mut() {
            upper.on_send_result(success);
        }
    }

    fn change_state(&mut self, next: TransportState) {
        if self.state != next {
            tracing::debug!(from = %self.state, to = %next, "transport state change");
            self.state = next;
        }
    }
}

impl fmt::Debug for TransportLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportLayer")
            .field("config", &self.config)
            .field("online", &self.online)
            .field("state", &self.state)
            .field("transmitter", &self.transmitter)
            .field("receiver", &self.receiver)
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}

fn log_violation(err: TransportError) -> TransportError {
    error!("{err}");
    err
}
