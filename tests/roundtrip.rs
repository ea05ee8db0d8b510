//! Generated checks that segmentation and reassembly are inverse operations.

use std::num::NonZeroUsize;

use dnp3_transport::{
    Addresses,
    Message,
    SegmentHeader,
    Sequence,
    TransportRx,
    TransportSegment,
    TransportTx,
};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    prop_assert,
    prop_assert_eq,
    test_runner::{Config as ProptestConfig, RngAlgorithm, TestCaseError, TestRng, TestRunner},
};
use rstest::rstest;

const ADDRESSES: Addresses = Addresses::new(3, 4);

fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    let rng = TestRng::deterministic_rng(RngAlgorithm::ChaCha);
    TestRunner::new_with_rng(config, rng)
}

fn message_strategy(max_fragment_size: usize) -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 1..=max_fragment_size)
}

fn segments_of(tx: &mut TransportTx, payload: Vec<u8>) -> Vec<Vec<u8>> {
    tx.configure(Message::new(ADDRESSES, payload));
    let mut segments = Vec::new();
    while tx.has_value() {
        segments.push(tx.segment().to_vec());
        tx.advance();
    }
    segments
}

#[rstest]
#[case(2, 64)]
#[case(17, 128)]
#[case(300, 64)]
fn generated_messages_round_trip(#[case] max_fragment_size: usize, #[case] cases: u32) {
    let mut runner = deterministic_runner(cases);
    let limit = NonZeroUsize::new(max_fragment_size).expect("non-zero");
    let cap = NonZeroUsize::new((max_fragment_size - 1).min(249)).expect("non-zero");

    runner
        .run(&message_strategy(max_fragment_size), |payload| {
            let mut tx = TransportTx::new(cap);
            let mut rx = TransportRx::new(limit);
            let segments = segments_of(&mut tx, payload.clone());
            prop_assert_eq!(segments.len(), payload.len().div_ceil(cap.get()));

            let mut delivered = Vec::new();
            for segment in &segments {
                prop_assert!(segment.len() <= cap.get() + 1);
                let outcome = rx
                    .handle_receive(ADDRESSES, segment)
                    .map_err(|err| TestCaseError::fail(format!("reassembly failed: {err}")))?;
                delivered.extend(outcome);
            }

            prop_assert_eq!(delivered, vec![Message::new(ADDRESSES, payload)]);
            prop_assert!(!rx.is_in_progress());
            Ok(())
        })
        .expect("generated messages should round-trip");
}

#[test]
fn generated_streams_flag_only_first_and_last() {
    let mut runner = deterministic_runner(64);
    let cap = NonZeroUsize::new(4).expect("non-zero");

    runner
        .run(&message_strategy(200), |payload| {
            let mut tx = TransportTx::new(cap);
            let headers: Vec<SegmentHeader> = segments_of(&mut tx, payload)
                .iter()
                .map(|segment| SegmentHeader::decode(segment[0]))
                .collect();

            let last = headers.len() - 1;
            for (index, header) in headers.iter().enumerate() {
                prop_assert_eq!(header.first(), index == 0);
                prop_assert_eq!(header.fin(), index == last);
            }
            Ok(())
        })
        .expect("segment flags should mark only the ends");
}

#[test]
fn reassembly_survives_sequence_wrap_across_messages() {
    let mut tx = TransportTx::new(NonZeroUsize::new(1).expect("non-zero"));
    let mut rx = TransportRx::new(NonZeroUsize::new(64).expect("non-zero"));

    segments_of(&mut tx, vec![0; 62]);
    assert_eq!(tx.sequence(), Sequence::new(62));

    let payload: Vec<u8> = (0..5).collect();
    let mut delivered = None;
    for segment in segments_of(&mut tx, payload.clone()) {
        delivered = rx
            .handle_receive(ADDRESSES, &segment)
            .expect("wrapped sequence accepted");
    }
    assert_eq!(delivered, Some(Message::new(ADDRESSES, payload)));
}
