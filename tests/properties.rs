use std::collections::HashSet;

use aprs::{Callsign, ErrorKind};
use proptest::prelude::*;

fn base_callsign() -> impl Strategy<Value = String> {
    "[A-Z0-9]{1,6}"
}

proptest! {
    #[test]
    fn string_round_trip_with_ssid(call in base_callsign(), ssid in 1u8..=15) {
        let text = format!("{}-{}", call, ssid);
        prop_assert_eq!(Callsign::from_string(&text).unwrap().to_string(), text);
    }

    #[test]
    fn zero_ssid_is_omitted(call in base_callsign()) {
        prop_assert_eq!(Callsign::from_string(&call).unwrap().to_string(), call.clone());
        let zero = format!("{}-0", call);
        prop_assert_eq!(Callsign::from_string(&zero).unwrap().to_string(), call);
    }

    #[test]
    fn digipeat_marker_round_trips(call in base_callsign(), ssid in 0u8..=15) {
        let parsed = Callsign::new(&call, ssid, true).unwrap();
        let reparsed = Callsign::from_string(&parsed.to_string()).unwrap();
        prop_assert_eq!(reparsed, parsed);
    }

    #[test]
    fn wire_round_trip(call in base_callsign(), ssid in 0u8..=15, digipeat in any::<bool>()) {
        let parsed = Callsign::new(&call, ssid, digipeat).unwrap();
        let encoded = parsed.to_wire_bytes();
        prop_assert_eq!(encoded.len(), 7);
        prop_assert_eq!(encoded[6] & 0b0110_0000, 0b0110_0000);
        prop_assert_eq!(Callsign::from_wire_bytes(&encoded).unwrap(), parsed);
    }

    #[test]
    fn short_buffers_are_rejected(buf in proptest::collection::vec(any::<u8>(), 0..7)) {
        let err = Callsign::from_wire_bytes(&buf).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn any_seven_bytes_decode(buf in proptest::array::uniform7(any::<u8>())) {
        let decoded = Callsign::from_wire_bytes(&buf).unwrap();
        prop_assert!(decoded.ssid() <= 15);
        prop_assert_eq!(decoded.is_digipeated(), buf[6] & 0x80 != 0);
    }

    #[test]
    fn encoding_is_injective(
        a in (base_callsign(), 0u8..=15, any::<bool>()),
        b in (base_callsign(), 0u8..=15, any::<bool>()),
    ) {
        let a = Callsign::new(&a.0, a.1, a.2).unwrap();
        let b = Callsign::new(&b.0, b.1, b.2).unwrap();
        if a != b {
            prop_assert_ne!(a.to_wire_bytes(), b.to_wire_bytes());
        }
    }
}

#[test]
fn all_ssids_encode_distinctly() {
    let encoded: HashSet<[u8; 7]> = (0..=15u8)
        .flat_map(|ssid| [false, true].map(move |digi| (ssid, digi)))
        .map(|(ssid, digi)| Callsign::new("W2GMD", ssid, digi).unwrap().to_wire_bytes())
        .collect();
    assert_eq!(encoded.len(), 32);
}
