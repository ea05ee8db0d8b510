//! Tests for the transport header codec.

use rstest::rstest;

use super::{FIN_MASK, FIR_MASK, SegmentHeader, Sequence};

#[rstest]
#[case(true, false, 0, 0x80)]
#[case(false, true, 1, 0x41)]
#[case(true, true, 63, 0xFF)]
#[case(false, false, 0, 0x00)]
#[case(false, false, 42, 0x2A)]
fn header_encodes_flags_and_sequence(
    #[case] first: bool,
    #[case] fin: bool,
    #[case] sequence: u8,
    #[case] expected: u8,
) {
    let header = SegmentHeader::new(first, fin, Sequence::new(sequence));
    assert_eq!(header.encode(), expected);
}

#[test]
fn every_octet_decodes_and_reencodes_unchanged() {
    for byte in u8::MIN..=u8::MAX {
        let header = SegmentHeader::decode(byte);
        assert_eq!(header.first(), byte & FIR_MASK != 0);
        assert_eq!(header.fin(), byte & FIN_MASK != 0);
        assert!(header.sequence().get() <= 63);
        assert_eq!(header.encode(), byte);
    }
}

#[rstest]
#[case(0, 1)]
#[case(5, 6)]
#[case(62, 63)]
#[case(63, 0)]
fn sequence_increments_modulo_64(#[case] current: u8, #[case] expected: u8) {
    assert_eq!(Sequence::new(current).next(), Sequence::new(expected));
}

#[test]
fn sequence_masks_out_of_range_input() {
    assert_eq!(Sequence::new(64), Sequence::zero());
    assert_eq!(Sequence::from(0xC1).get(), 1);
}

#[rstest]
#[case(0xC0, "FIR FIN #0")]
#[case(0x80, "FIR #0")]
#[case(0x47, "FIN #7")]
#[case(0x3F, "#63")]
fn header_display_lists_set_flags(#[case] byte: u8, #[case] expected: &str) {
    assert_eq!(SegmentHeader::decode(byte).to_string(), expected);
}
