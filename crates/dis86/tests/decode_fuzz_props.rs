#![cfg(not(target_arch = "wasm32"))]

use dis86::{decode_all, DecodeError, Decoder, LISTING_HEADER};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2048,
        .. ProptestConfig::default()
    })]

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let first = decode_all(&bytes);
        let second = decode_all(&bytes);
        prop_assert_eq!(&first, &second);

        match first {
            Ok(text) => {
                prop_assert!(text.starts_with(LISTING_HEADER));
                let lines = text.lines().count() - 2;
                prop_assert_eq!(lines, Decoder::new(&bytes).count());
            }
            Err(err) => {
                prop_assert!(err.offset < bytes.len(), "offset={} len={}", err.offset, bytes.len());
                if let DecodeError::UnexpectedEndOfInput { offset } = err.source {
                    prop_assert!(offset > err.offset && offset <= bytes.len());
                }
            }
        }
    }

    #[test]
    fn decoder_offsets_are_contiguous(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut next = 0usize;
        for decoded in Decoder::new(&bytes) {
            match decoded {
                Ok(decoded) => {
                    prop_assert_eq!(decoded.offset, next);
                    prop_assert!(decoded.len >= 1 && decoded.len <= 6);
                    next = decoded.next_offset();
                }
                Err(err) => {
                    prop_assert_eq!(err.offset, next);
                }
            }
        }
        prop_assert!(next <= bytes.len());
    }
}
