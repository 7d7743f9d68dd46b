mod tests {
    use pixelmap_engine::{DecodeError, FrameDecoder, PixelChange, PixelElement};

    const ELEMENTS: [PixelElement; 3] = [
        PixelElement::rgb(0, 1, 2),
        PixelElement::mono(3),
        PixelElement::rgb16(4, 5, 6),
    ];

    #[test]
    fn test_decodes_one_command() {
        let frame = [0x00, 0x00, 0x00, 0x01, 10, 20, 30];
        let mut decoder = FrameDecoder::new(&frame, &ELEMENTS);

        let modification = decoder.next().unwrap().unwrap();
        assert_eq!(modification.pixel, 0);
        assert_eq!(modification.change, PixelChange::Set);
        assert_eq!(modification.contiguous, 1);
        assert_eq!(modification.payload.as_slice(), &[10, 20, 30]);

        assert!(decoder.next().is_none());
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_payload_size_follows_the_target_element() {
        // a one-byte mono command followed by a six-byte word command
        let frame = [
            0x01, 0x00, 0x01, 0x01, 5, // Add 5 to pixel 1
            0x02, 0x00, 0x00, 0x01, 0x04, 0x01, 0x00, 0x02, 0xFF, 0xFF,
        ];
        let mut decoder = FrameDecoder::new(&frame, &ELEMENTS);

        let first = decoder.next().unwrap().unwrap();
        assert_eq!(first.pixel, 1);
        assert_eq!(first.change, PixelChange::Add);
        assert_eq!(first.payload.as_slice(), &[5]);

        let second = decoder.next().unwrap().unwrap();
        assert_eq!(second.pixel, 2);
        assert_eq!(second.payload.len(), 6);
        assert_eq!(second.payload.as_slice(), &[0x04, 0x01, 0x00, 0x02, 0xFF, 0xFF]);

        assert!(decoder.next().is_none());
    }

    #[test]
    fn test_pixel_index_is_little_endian() {
        let frame = [0x01, 0x00, 0x00, 0x01, 7];
        let mut decoder = FrameDecoder::new(&frame, &ELEMENTS);
        let modification = decoder.next().unwrap().unwrap();
        assert_eq!(modification.pixel, 1);
    }

    #[test]
    fn test_run_count_passes_through() {
        let frame = [0x00, 0x00, 0x03, 0x05, 1, 2, 3];
        let mut decoder = FrameDecoder::new(&frame, &ELEMENTS);
        let modification = decoder.next().unwrap().unwrap();
        assert_eq!(modification.change, PixelChange::SaturatingAdd);
        assert_eq!(modification.contiguous, 5);
    }

    #[test]
    fn test_truncated_header_poisons_the_frame() {
        let frame = [0x00, 0x00, 0x00];
        let mut decoder = FrameDecoder::new(&frame, &ELEMENTS);
        assert_eq!(decoder.next(), Some(Err(DecodeError::Truncated)));
        assert!(decoder.next().is_none());
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_truncated_payload_poisons_the_frame() {
        // pixel 0 needs three payload bytes, only two present
        let frame = [0x00, 0x00, 0x00, 0x01, 10, 20];
        let mut decoder = FrameDecoder::new(&frame, &ELEMENTS);
        assert_eq!(decoder.next(), Some(Err(DecodeError::Truncated)));
        assert!(decoder.next().is_none());
    }

    #[test]
    fn test_unknown_opcode_poisons_the_frame() {
        let frame = [
            0x00, 0x00, 0x07, 0x01, 1, 2, 3, // opcode 7 does not exist
            0x01, 0x00, 0x00, 0x01, 5, // a valid command that must not run
        ];
        let mut decoder = FrameDecoder::new(&frame, &ELEMENTS);
        assert_eq!(decoder.next(), Some(Err(DecodeError::BadChange(7))));
        assert!(decoder.next().is_none());
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_unknown_pixel_poisons_the_frame() {
        let frame = [0x09, 0x00, 0x00, 0x01, 1];
        let mut decoder = FrameDecoder::new(&frame, &ELEMENTS);
        assert_eq!(decoder.next(), Some(Err(DecodeError::UnknownPixel(9))));
        assert!(decoder.next().is_none());
    }

    #[test]
    fn test_empty_frame_yields_nothing() {
        let mut decoder = FrameDecoder::new(&[], &ELEMENTS);
        assert!(decoder.next().is_none());
        assert_eq!(decoder.remaining(), 0);
    }
}
