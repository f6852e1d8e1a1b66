use pretty_assertions::assert_eq;
use proptest::prelude::*;
use zfm_fingerprint::packet::{self, FrameBuffer, PID_COMMAND};
use zfm_fingerprint::Error;

proptest! {
    #[test]
    fn encoded_frames_decode_to_the_same_payload(
        address in any::<u32>(),
        instruction in any::<u8>(),
        params in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let mut frame = FrameBuffer::new();
        packet::encode_raw(address, instruction, &params, &mut frame).unwrap();

        let decoded = packet::decode_verified(&frame).unwrap();
        prop_assert_eq!(decoded.address, address);
        prop_assert_eq!(decoded.package_id, PID_COMMAND);
        prop_assert_eq!(decoded.payload[0], instruction);
        prop_assert_eq!(&decoded.payload[1..], &params[..]);
        prop_assert_eq!(packet::expected_frame_len(&frame), Some(frame.len()));
    }

    #[test]
    fn flipping_a_payload_bit_changes_the_checksum(
        params in proptest::collection::vec(any::<u8>(), 1..64),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut flipped = params.clone();
        let i = index.index(flipped.len());
        flipped[i] ^= 1 << bit;
        prop_assert_ne!(
            packet::checksum(PID_COMMAND, &params),
            packet::checksum(PID_COMMAND, &flipped)
        );
    }

    #[test]
    fn short_input_is_always_truncated(raw in proptest::collection::vec(any::<u8>(), 0..9)) {
        prop_assert_eq!(
            packet::decode(&raw),
            Err(Error::Truncated { expected: 9, actual: raw.len() })
        );
    }

    #[test]
    fn wrong_start_code_wins_over_everything_else(
        first in any::<u16>().prop_filter("not the start code", |s| *s != 0xEF01),
        rest in proptest::collection::vec(any::<u8>(), 7..40),
    ) {
        let mut raw = first.to_be_bytes().to_vec();
        raw.extend_from_slice(&rest);
        prop_assert_eq!(packet::decode(&raw), Err(Error::BadStartCode(first)));
    }
}

#[test]
fn flipping_a_bit_on_the_wire_is_caught() {
    let mut frame = FrameBuffer::new();
    packet::encode_raw(0xFFFF_FFFF, 0x04, &[0x01, 0x00, 0x00, 0x00, 0x14], &mut frame).unwrap();
    for i in 6..frame.len() - 2 {
        let mut corrupted = frame.to_vec();
        corrupted[i] ^= 0x10;
        let result = packet::decode_verified(&corrupted);
        assert!(result.is_err(), "corruption at byte {} went unnoticed", i);
    }
    assert_eq!(packet::decode_verified(&frame).map(|p| p.payload.len()), Ok(6));
}
