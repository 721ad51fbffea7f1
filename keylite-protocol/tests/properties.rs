//! Property tests for the receiver protocol

use keylite_protocol::{
    strip_framing, ButtonId, Codec, FrameAssembler, ReceiverStatus, BUTTON_COUNT, TERMINATOR,
};
use proptest::prelude::*;

#[test]
fn every_button_round_trips() {
    let codec = Codec::panel().unwrap();
    for raw in 0..BUTTON_COUNT as u8 {
        let cmd = codec.encode(raw).unwrap();
        let button = codec.decode(strip_framing(cmd.as_bytes()));
        assert_eq!(button, ButtonId::new(raw));
    }
}

#[test]
fn power_button_decodes_as_power_off() {
    let codec = Codec::panel().unwrap();
    let cmd = codec.encode(ButtonId::POWER.raw()).unwrap();
    assert_eq!(
        codec.decode_status(cmd.code()),
        Some(ReceiverStatus::PoweredOff)
    );
}

#[test]
fn stray_terminator_inside_a_code_is_ignored() {
    let codec = Codec::panel().unwrap();
    let mut asm = FrameAssembler::new();
    asm.feed(b"!1SLI\x1a10\x1a").unwrap();

    let frame = asm.drain().unwrap();
    let decoded: Vec<Option<ButtonId>> =
        frame.commands().map(|code| codec.decode(&code)).collect();
    assert_eq!(decoded, vec![ButtonId::new(3)]);
}

/// Build a receiver frame from button ids
fn frame_for(codec: &Codec, buttons: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for &raw in buttons {
        let button = ButtonId::new(raw).unwrap();
        bytes.push(b'!');
        bytes.extend_from_slice(codec.buttons().code(button).as_bytes());
    }
    bytes.push(TERMINATOR);
    bytes
}

proptest! {
    #[test]
    fn unmapped_keys_never_encode(key in (BUTTON_COUNT as u8)..=u8::MAX) {
        let codec = Codec::panel().unwrap();
        prop_assert!(codec.encode(key).is_none());
    }

    #[test]
    fn chunked_frame_yields_codes_in_order(
        buttons in proptest::collection::vec(0u8..BUTTON_COUNT as u8, 1..8),
        chunk in 1usize..10,
    ) {
        let codec = Codec::panel().unwrap();
        let bytes = frame_for(&codec, &buttons);
        let mut asm = FrameAssembler::new();

        let chunks: Vec<&[u8]> = bytes.chunks(chunk).collect();
        let (last, head) = chunks.split_last().unwrap();
        for piece in head {
            asm.feed(piece).unwrap();
            prop_assert!(asm.drain().is_none());
        }
        asm.feed(last).unwrap();

        let frame = asm.drain().unwrap();
        let decoded: Vec<Option<ButtonId>> =
            frame.commands().map(|code| codec.decode(&code)).collect();
        let expected: Vec<Option<ButtonId>> =
            buttons.iter().map(|&raw| ButtonId::new(raw)).collect();
        prop_assert_eq!(decoded, expected);
        prop_assert!(asm.is_empty());
    }

    #[test]
    fn terminator_free_stream_never_drains(
        chunks in proptest::collection::vec(
            proptest::collection::vec(any::<u8>().prop_filter("no terminator", |b| *b != TERMINATOR), 0..64),
            1..16,
        )
    ) {
        let mut asm = FrameAssembler::new();
        for chunk in &chunks {
            // Overflow is reported but never produces a frame
            let _ = asm.feed(chunk);
            prop_assert!(asm.drain().is_none());
        }
    }

    #[test]
    fn decode_never_panics(code in proptest::collection::vec(any::<u8>(), 0..20)) {
        let codec = Codec::panel().unwrap();
        let _ = codec.decode_status(&code);
    }
}
