//! Construction-time settings for the transport layer.

use std::num::NonZeroUsize;

use crate::error::ConfigError;

/// Default maximum application fragment size in bytes.
pub const DEFAULT_MAX_FRAGMENT_SIZE: usize = 2048;
/// Largest segment payload a DNP3 link frame can carry: 250 user data bytes
/// minus the transport header.
pub const MAX_SEGMENT_PAYLOAD: usize = 249;
/// Smallest fragment size that leaves room for one header and one payload byte.
pub const MIN_FRAGMENT_SIZE: usize = 2;

const DEFAULT_FRAGMENT_LIMIT: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX_FRAGMENT_SIZE) {
    Some(value) => value,
    None => panic!("default fragment size must be non-zero"),
};
const SEGMENT_PAYLOAD_LIMIT: NonZeroUsize = match NonZeroUsize::new(MAX_SEGMENT_PAYLOAD) {
    Some(value) => value,
    None => panic!("segment payload ceiling must be non-zero"),
};

/// Settings that bound segment sizes and reassembly buffer usage.
///
/// The configuration is fixed when the layer is built and never changes
/// afterwards.
///
/// # Examples
///
/// ```
/// use dnp3_transport::TransportConfig;
/// let config = TransportConfig::new(3).expect("valid fragment size");
/// assert_eq!(config.max_fragment_size().get(), 3);
/// assert_eq!(config.segment_payload_cap().get(), 2);
///
/// let config = TransportConfig::default();
/// assert_eq!(config.segment_payload_cap().get(), 249);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    max_fragment_size: NonZeroUsize,
    max_segment_payload: NonZeroUsize,
}

impl TransportConfig {
    /// Create a configuration with the given maximum fragment size and the
    /// standard segment payload ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FragmentSizeTooSmall`] when `max_fragment_size`
    /// is below [`MIN_FRAGMENT_SIZE`].
    pub fn new(max_fragment_size: usize) -> Result<Self, ConfigError> {
        let limit = NonZeroUsize::new(max_fragment_size)
            .filter(|size| size.get() >= MIN_FRAGMENT_SIZE)
            .ok_or(ConfigError::FragmentSizeTooSmall {
                requested: max_fragment_size,
                minimum: MIN_FRAGMENT_SIZE,
            })?;
        Ok(Self {
            max_fragment_size: limit,
            max_segment_payload: SEGMENT_PAYLOAD_LIMIT,
        })
    }

    /// Override the per-segment payload ceiling, for links with smaller frames.
    #[must_use]
    pub const fn with_max_segment_payload(mut self, max_segment_payload: NonZeroUsize) -> Self {
        self.max_segment_payload = max_segment_payload;
        self
    }

    /// Largest application fragment accepted for transmit or reassembly.
    #[must_use]
    pub const fn max_fragment_size(&self) -> NonZeroUsize { self.max_fragment_size }

    /// Configured per-segment payload ceiling.
    #[must_use]
    pub const fn max_segment_payload(&self) -> NonZeroUsize { self.max_segment_payload }

    /// Payload bytes carried by each outbound segment: one header byte less
    /// than the fragment size, clamped to the segment payload ceiling.
    #[must_use]
    pub fn segment_payload_cap(&self) -> NonZeroUsize {
        let available = self.max_fragment_size.get() - 1;
        NonZeroUsize::new(available.min(self.max_segment_payload.get()))
            .unwrap_or(NonZeroUsize::MIN)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_fragment_size: DEFAULT_FRAGMENT_LIMIT,
            max_segment_payload: SEGMENT_PAYLOAD_LIMIT,
        }
    }
}
