//! Property-based tests for the alphabet codec.
//!
//! The codec must be a uniquely-decodable prefix-free code over arbitrary
//! byte sequences: encoding then decoding is the identity, and any string
//! drawn from the alphabet decodes without error.

use proptest::prelude::*;
use trackport_codec::{decode, encode, ALPHABET};

proptest! {
    /// Round-trip: decode(encode(b)) == b for all byte sequences.
    #[test]
    fn encode_decode_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let text = encode(&bytes);
        let decoded = decode(&text).expect("encoded text must decode");
        prop_assert_eq!(decoded, bytes);
    }

    /// Alphabet closure: strings composed only of alphabet characters never
    /// fail with InvalidSymbol.
    #[test]
    fn alphabet_strings_always_decode(s in "[A-Za-z0-9]{0,128}") {
        prop_assert!(decode(&s).is_ok());
    }

    /// Encoder output stays inside the alphabet.
    #[test]
    fn encoder_output_is_alphabet_only(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let text = encode(&bytes);
        for ch in text.chars() {
            prop_assert!(ALPHABET.contains(&(ch as u8)), "non-alphabet output {:?}", ch);
        }
    }

    /// Any string with a character outside the alphabet fails to decode.
    #[test]
    fn non_alphabet_character_fails(
        prefix in "[A-Za-z0-9]{0,16}",
        bad in prop::char::range('\u{20}', '\u{2f}'),
        suffix in "[A-Za-z0-9]{0,16}",
    ) {
        let s = format!("{prefix}{bad}{suffix}");
        prop_assert!(decode(&s).is_err());
    }
}
