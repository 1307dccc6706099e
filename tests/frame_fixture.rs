use aprs::{Callsign, ErrorKind, ADDRESS_LEN};

// UI frame APRX24 <- W2GMD-6 via WIDE1-1, as captured off a KISS TNC
const TEST_FRAME: &str = include_str!("../testdata/aprx24_w2gmd-6.hex");

fn frame() -> Vec<u8> {
    hex::decode(TEST_FRAME.trim()).unwrap()
}

#[test]
fn extract_callsign_dest() {
    let dest = Callsign::from_wire_bytes(&frame()).unwrap();
    assert_eq!(dest.callsign(), "APRX24");
    assert_eq!(dest.ssid(), 0);
    assert_eq!(dest.to_string(), "APRX24");
}

#[test]
fn extract_callsign_source() {
    let frame = frame();
    let source = Callsign::from_wire_bytes(&frame[ADDRESS_LEN..]).unwrap();
    assert_eq!(source.to_string(), "W2GMD-6");
    assert_eq!(source.callsign(), "W2GMD");
    assert_eq!(source.ssid(), 6);
    assert!(!source.is_digipeated());
}

#[test]
fn extract_callsign_path_entry() {
    let frame = frame();
    let field = &frame[2 * ADDRESS_LEN..3 * ADDRESS_LEN];
    // Last address of the path: the end-of-address bit is set
    assert_eq!(field[6] & 0x01, 0x01);
    let repeater = Callsign::from_wire_bytes(field).unwrap();
    assert_eq!(repeater.to_string(), "WIDE1-1");
    assert_eq!(repeater.to_address_field(true), field);
}

#[test]
fn reencode_matches_frame() {
    let frame = frame();
    let dest = Callsign::from_wire_bytes(&frame).unwrap();
    let source = Callsign::from_wire_bytes(&frame[ADDRESS_LEN..]).unwrap();
    assert_eq!(dest.to_wire_bytes(), frame[..ADDRESS_LEN]);
    assert_eq!(source.to_wire_bytes(), frame[ADDRESS_LEN..2 * ADDRESS_LEN]);
}

#[test]
fn truncated_frame_is_rejected() {
    let frame = frame();
    let err = Callsign::from_wire_bytes(&frame[..6]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
}
