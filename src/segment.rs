//! Pull interface the link layer uses to read outbound segments.

use crate::message::Addresses;

/// Cursor over the segments of one outbound message.
///
/// Reading and committing are split: [`segment`](Self::segment) renders the
/// segment that would be sent now without moving the cursor, and
/// [`advance`](Self::advance) commits the move once the link layer has
/// accepted it. A rejected segment can therefore be read again unchanged.
pub trait TransportSegment {
    /// Link addresses shared by every segment of the message.
    fn addresses(&self) -> Addresses;

    /// Whether any payload bytes remain to be sent.
    fn has_value(&self) -> bool;

    /// Render the current segment: one header byte followed by its payload
    /// chunk. Returns an empty slice once the message is exhausted.
    fn segment(&mut self) -> &[u8];

    /// Move past the current segment, returning `true` if more remain.
    fn advance(&mut self) -> bool;
}
