//! Round-trip properties for the codepage bridge.
//!
//! For text restricted to a codepage's representable character set,
//! `decode(encode(text))` must reproduce the input exactly.

use ldap_codec::{CodecBridge, Codepage};
use proptest::prelude::*;

proptest! {
    #[test]
    fn utf8_passthrough_round_trips(text in ".*") {
        let bridge = CodecBridge::utf8();
        let encoded = bridge.encode(&text);
        prop_assert_eq!(bridge.decode(&encoded), text);
    }

    #[test]
    fn windows1251_round_trips(text in "[ -~а-яА-ЯёЁ]*") {
        let bridge = CodecBridge::new(Codepage::Windows1251);
        let encoded = bridge.encode(&text);
        prop_assert_eq!(bridge.decode(&encoded), text);
    }

    #[test]
    fn latin1_round_trips(text in "[ -~àâçéèêëîïôùûüÀÉÈÊ]*") {
        let bridge = CodecBridge::new(Codepage::Latin1);
        let encoded = bridge.encode(&text);
        prop_assert_eq!(bridge.decode(&encoded), text);
    }

    #[test]
    fn shift_jis_round_trips(text in "[ -~ぁ-んァ-ン]*") {
        let bridge = CodecBridge::new(Codepage::ShiftJis);
        let encoded = bridge.encode(&text);
        prop_assert_eq!(bridge.decode(&encoded), text);
    }
}
