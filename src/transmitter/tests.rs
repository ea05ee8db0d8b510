//! Tests for outbound segmentation.

use std::num::NonZeroUsize;

use rstest::{fixture, rstest};

use super::TransportTx;
use crate::{
    header::{SegmentHeader, Sequence},
    message::{Addresses, Message},
    segment::TransportSegment,
};

const ADDRESSES: Addresses = Addresses::new(1, 1024);

#[fixture]
fn tx() -> TransportTx { TransportTx::new(NonZeroUsize::new(2).expect("non-zero")) }

fn drain(tx: &mut TransportTx) -> Vec<Vec<u8>> {
    let mut segments = Vec::new();
    while tx.has_value() {
        segments.push(tx.segment().to_vec());
        tx.advance();
    }
    segments
}

#[rstest]
fn splits_message_into_capped_segments(mut tx: TransportTx) {
    tx.configure(Message::new(ADDRESSES, vec![0x01, 0x02, 0x03]));

    assert_eq!(drain(&mut tx), vec![vec![0x80, 0x01, 0x02], vec![0x41, 0x03]]);
    assert!(!tx.has_value());
    assert_eq!(tx.sequence(), Sequence::new(2));
}

#[rstest]
fn single_segment_carries_both_flags(mut tx: TransportTx) {
    tx.configure(Message::new(ADDRESSES, vec![0xAA]));

    let segment = tx.segment().to_vec();
    let header = SegmentHeader::decode(segment[0]);
    assert!(header.first());
    assert!(header.fin());
    assert_eq!(&segment[1..], &[0xAA]);
    assert!(!tx.advance());
}

#[rstest]
fn segment_is_stable_until_advanced(mut tx: TransportTx) {
    tx.configure(Message::new(ADDRESSES, vec![1, 2, 3, 4, 5]));

    let first = tx.segment().to_vec();
    assert_eq!(tx.segment(), first.as_slice());
    assert_eq!(tx.remaining(), 5);

    assert!(tx.advance());
    assert_eq!(tx.segment(), &[0x01, 3, 4]);
    assert_eq!(tx.remaining(), 3);
}

#[rstest]
fn middle_segments_carry_neither_flag(mut tx: TransportTx) {
    tx.configure(Message::new(ADDRESSES, vec![1, 2, 3, 4, 5]));

    let headers: Vec<_> = drain(&mut tx)
        .iter()
        .map(|segment| SegmentHeader::decode(segment[0]))
        .collect();
    assert_eq!(
        headers,
        vec![
            SegmentHeader::new(true, false, Sequence::new(0)),
            SegmentHeader::new(false, false, Sequence::new(1)),
            SegmentHeader::new(false, true, Sequence::new(2)),
        ]
    );
}

#[rstest]
fn sequence_continues_across_messages(mut tx: TransportTx) {
    tx.configure(Message::new(ADDRESSES, vec![1, 2, 3]));
    drain(&mut tx);

    tx.configure(Message::new(ADDRESSES, vec![9]));
    assert_eq!(tx.segment(), &[0xC2, 9]);
}

#[test]
fn sequence_wraps_after_63() {
    let mut tx = TransportTx::new(NonZeroUsize::new(1).expect("non-zero"));
    tx.configure(Message::new(ADDRESSES, vec![0_u8; 66]));

    let sequences: Vec<u8> = drain(&mut tx)
        .iter()
        .map(|segment| SegmentHeader::decode(segment[0]).sequence().get())
        .collect();
    assert_eq!(sequences.len(), 66);
    assert_eq!(&sequences[62..], &[62, 63, 0, 1]);
}

#[rstest]
fn reset_discards_remaining_bytes(mut tx: TransportTx) {
    tx.configure(Message::new(ADDRESSES, vec![1, 2, 3]));
    tx.reset();

    assert!(!tx.has_value());
    assert!(tx.segment().is_empty());
    assert!(!tx.advance());
}

#[rstest]
fn addresses_follow_the_configured_message(mut tx: TransportTx) {
    let addresses = Addresses::new(10, 3);
    tx.configure(Message::new(addresses, vec![1]));
    assert_eq!(tx.addresses(), addresses);
}
