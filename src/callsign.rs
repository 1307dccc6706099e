use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::CallsignError;

/// Length of one encoded AX.25 address field.
pub const ADDRESS_LEN: usize = 7;

/// Maximum number of characters in the base callsign.
pub const CALLSIGN_LEN: usize = 6;

/// Largest SSID that fits in the 4-bit field.
pub const MAX_SSID: u8 = 15;

// Layout of the final octet: H R R S S S S L
const HAS_BEEN_REPEATED: u8 = 0b1000_0000;
const RESERVED_BITS: u8 = 0b0110_0000;
const SSID_MASK: u8 = 0b0000_1111;
const END_OF_ADDRESS: u8 = 0b0000_0001;

/// A station identifier: base callsign, SSID and whether the station has
/// already digipeated the frame it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Callsign {
    callsign: String,
    ssid: u8,
    digipeat: bool,
}

impl Callsign {
    /// Build a callsign from its parts, applying the same rules as the string parser.
    pub fn new(callsign: &str, ssid: u8, digipeat: bool) -> Result<Callsign, CallsignError> {
        if callsign.is_empty() {
            return Err(CallsignError::EmptyCallsign);
        }
        if let Some(ch) = callsign.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(CallsignError::InvalidCharacter { value: callsign.to_string(), ch });
        }
        if callsign.len() > CALLSIGN_LEN {
            return Err(CallsignError::OversizeCallsign { value: callsign.to_string() });
        }
        if ssid > MAX_SSID {
            return Err(CallsignError::InvalidSsid { value: ssid.to_string() });
        }
        Ok(Callsign { callsign: callsign.to_string(), ssid, digipeat })
    }

    /// Parse the human-readable form: `CALL`, `CALL-SSID`, optionally followed by `*`
    /// to mark the station as having digipeated.
    ///
    /// `W2GMD-0` and `W2GMD` parse to the same value. Case is preserved.
    pub fn from_string(text: &str) -> Result<Callsign, CallsignError> {
        debug!(text, "parsing callsign text");
        let (body, digipeat) = match text.strip_suffix('*') {
            Some(body) => (body, true),
            None => (text, false),
        };
        let (callsign, ssid) = match body.rsplit_once('-') {
            Some((callsign, suffix)) => (callsign, parse_ssid(suffix)?),
            None => (body, 0),
        };
        Callsign::new(callsign, ssid, digipeat)
    }

    /// Decode one AX.25 address field from the first 7 bytes of `buf`.
    ///
    /// The reserved bits and the end-of-address bit are not checked.
    pub fn from_wire_bytes(buf: &[u8]) -> Result<Callsign, CallsignError> {
        if buf.len() < ADDRESS_LEN {
            return Err(CallsignError::TruncatedInput { len: buf.len() });
        }
        let field = &buf[..ADDRESS_LEN];
        debug!(field = %hex::encode(field), "decoding address field");

        let mut callsign: Vec<u8> = field[..CALLSIGN_LEN]
            .iter()
            .rev()
            .map(|&c| c >> 1)
            .skip_while(|&c| c == b' ')
            .collect();
        callsign.reverse();

        let ssid_byte = field[CALLSIGN_LEN];
        Ok(Callsign {
            // Every byte is below 0x80 after the shift, so this is plain ASCII
            callsign: callsign.into_iter().map(char::from).collect(),
            ssid: (ssid_byte >> 1) & SSID_MASK,
            digipeat: ssid_byte & HAS_BEEN_REPEATED != 0,
        })
    }

    /// Encode as a single address field with the end-of-address bit clear.
    pub fn to_wire_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.to_address_field(false)
    }

    /// Encode as an address field, setting the end-of-address bit when this is
    /// the last address in a frame's path.
    pub fn to_address_field(&self, end_of_address: bool) -> [u8; ADDRESS_LEN] {
        // Pad with spaces up to length 6
        let mut encoded = [b' ' << 1; ADDRESS_LEN];
        // Shift by one bit as required for AX.25 address encoding
        for (slot, b) in encoded.iter_mut().zip(self.callsign.bytes().take(CALLSIGN_LEN)) {
            *slot = b << 1;
        }

        let high = if self.digipeat { HAS_BEEN_REPEATED } else { 0 };
        let low = if end_of_address { END_OF_ADDRESS } else { 0 };
        encoded[CALLSIGN_LEN] = ((self.ssid & SSID_MASK) << 1) | RESERVED_BITS | high | low;

        trace!(callsign = %self, field = %hex::encode(encoded), "encoded address field");
        encoded
    }

    /// Lowercase hex of the wire encoding, e.g. `ae648e9a884062` for `W2GMD-1`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_wire_bytes())
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn ssid(&self) -> u8 {
        self.ssid
    }

    pub fn is_digipeated(&self) -> bool {
        self.digipeat
    }
}

fn parse_ssid(suffix: &str) -> Result<u8, CallsignError> {
    let invalid = || CallsignError::InvalidSsid { value: suffix.to_string() };
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match suffix.parse::<u8>() {
        Ok(ssid) if ssid <= MAX_SSID => Ok(ssid),
        _ => Err(invalid()),
    }
}

/// Whether `text` is a plausible APRS station callsign: 2-6 uppercase letters
/// and digits with an optional SSID from 0 to 15, and no digipeat marker.
pub fn is_valid_callsign(text: &str) -> bool {
    match Callsign::from_string(text) {
        Ok(call) => {
            !call.digipeat
                && call.callsign.len() >= 2
                && call.callsign.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        Err(_) => false,
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.callsign)?;
        if self.ssid != 0 {
            write!(f, "-{}", self.ssid)?;
        }
        if self.digipeat {
            write!(f, "*")?;
        }
        Ok(())
    }
}

impl FromStr for Callsign {
    type Err = CallsignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Callsign::from_string(s)
    }
}

impl TryFrom<&[u8]> for Callsign {
    type Error = CallsignError;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        Callsign::from_wire_bytes(buf)
    }
}

impl From<&Callsign> for [u8; ADDRESS_LEN] {
    fn from(call: &Callsign) -> Self {
        call.to_wire_bytes()
    }
}

#[cfg(test)]
use crate::error::ErrorKind;

#[test]
fn test_callsign_fromstr() {
    assert_eq!(
        Callsign::from_str("VK7NTK-1").unwrap(),
        Callsign { callsign: "VK7NTK".to_string(), ssid: 1, digipeat: false }
    );
    assert_eq!(
        Callsign::from_str("ID-15").unwrap(),
        Callsign { callsign: "ID".to_string(), ssid: 15, digipeat: false }
    );
    assert_eq!(
        Callsign::from_str("W2GMD").unwrap(),
        Callsign { callsign: "W2GMD".to_string(), ssid: 0, digipeat: false }
    );
    assert_eq!(
        Callsign::from_str("W2GMD-1*").unwrap(),
        Callsign { callsign: "W2GMD".to_string(), ssid: 1, digipeat: true }
    );
    assert_eq!(Callsign::from_str("vk7ntk-5").unwrap().callsign(), "vk7ntk");
}

#[test]
fn test_callsign_fromstr_errors() {
    let kind = |s: &str| Callsign::from_str(s).unwrap_err().kind();
    assert_eq!(kind("-1"), ErrorKind::EmptyCallsign);
    assert_eq!(kind("*"), ErrorKind::EmptyCallsign);
    assert_eq!(kind("VK7N -5"), ErrorKind::InvalidCharacter);
    assert_eq!(kind("VK7NTK-16"), ErrorKind::InvalidSsid);
    assert_eq!(kind("W2GMD-A"), ErrorKind::InvalidSsid);
    assert_eq!(kind("W2GMD-"), ErrorKind::InvalidSsid);
    assert_eq!(kind("W2GMD-+1"), ErrorKind::InvalidSsid);
    assert_eq!(kind("W2GMD-300"), ErrorKind::InvalidSsid);
    assert_eq!(kind("vk7n--1"), ErrorKind::InvalidCharacter);
    assert_eq!(kind("W2GMD-1-0"), ErrorKind::InvalidCharacter);
    assert_eq!(kind("W2GMDXX"), ErrorKind::OversizeCallsign);
}

#[test]
fn test_error_echoes_input() {
    assert_eq!(
        Callsign::from_str("W2GMD-A").unwrap_err().to_string(),
        "invalid SSID \"A\": must be a number from 0 to 15"
    );
    assert_eq!(
        Callsign::from_str("W2GMDXX-1").unwrap_err(),
        CallsignError::OversizeCallsign { value: "W2GMDXX".to_string() }
    );
}

#[test]
fn test_embedded_dash_is_invalid_character() {
    assert_eq!(
        Callsign::from_str("W2GMD-1-0").unwrap_err(),
        CallsignError::InvalidCharacter { value: "W2GMD-1".to_string(), ch: '-' }
    );
    assert_eq!(
        Callsign::from_str("W2GMD-1-0").unwrap_err().to_string(),
        "callsign \"W2GMD-1\" contains invalid character '-'"
    );
}

#[test]
fn test_new() {
    assert_eq!(Callsign::new("W2GMD", 6, false).unwrap().to_string(), "W2GMD-6");
    assert_eq!(Callsign::new("W2GMD", 16, false).unwrap_err().kind(), ErrorKind::InvalidSsid);
    assert_eq!(Callsign::new("", 0, false).unwrap_err().kind(), ErrorKind::EmptyCallsign);
}

#[test]
fn test_to_string() {
    assert_eq!(Callsign::from_str("W2GMD-1").unwrap().to_string(), "W2GMD-1");
    assert_eq!(Callsign::from_str("W2GMD-0").unwrap().to_string(), "W2GMD");
    assert_eq!(Callsign::from_str("W2GMD").unwrap().to_string(), "W2GMD");
    assert_eq!(Callsign::from_str("W2GMD*").unwrap().to_string(), "W2GMD*");
    assert_eq!(Callsign::from_str("KF4LZA-15*").unwrap().to_string(), "KF4LZA-15*");
}

#[test]
fn test_encode() {
    let call = Callsign::from_str("W2GMD-1").unwrap();
    assert_eq!(call.to_wire_bytes(), [0xAE, 0x64, 0x8E, 0x9A, 0x88, 0x40, 0x62]);
    assert_eq!(call.to_hex(), "ae648e9a884062");
    assert_eq!(<[u8; ADDRESS_LEN]>::from(&call), call.to_wire_bytes());
}

#[test]
fn test_encode_digipeated() {
    let call = Callsign::from_str("W2GMD*").unwrap();
    assert_eq!(call.to_wire_bytes(), [0xAE, 0x64, 0x8E, 0x9A, 0x88, 0x40, 0xE0]);
}

#[test]
fn test_encode_end_of_address() {
    let call = Callsign::from_str("APRX24").unwrap();
    assert_eq!(call.to_address_field(true), [0x82, 0xA0, 0xA4, 0xB0, 0x64, 0x68, 0x61]);
    assert_eq!(call.to_address_field(false)[6], 0x60);
}

#[test]
fn test_decode() {
    let call = Callsign::from_wire_bytes(&[0xAE, 0x64, 0x8E, 0x9A, 0x88, 0x40, 0x62]).unwrap();
    assert_eq!(call.callsign(), "W2GMD");
    assert_eq!(call.ssid(), 1);
    assert!(!call.is_digipeated());

    let digi = Callsign::try_from(&[0xAE, 0x64, 0x8E, 0x9A, 0x88, 0x40, 0xE0][..]).unwrap();
    assert!(digi.is_digipeated());
    assert_eq!(digi.to_string(), "W2GMD*");
}

#[test]
fn test_decode_ignores_reserved_and_extension_bits() {
    // Reserved bits clear, end-of-address set
    let call = Callsign::from_wire_bytes(&[0xAE, 0x64, 0x8E, 0x9A, 0x88, 0x40, 0x0D]).unwrap();
    assert_eq!(call.to_string(), "W2GMD-6");
    // Re-encoding uses the conventional reserved pattern
    assert_eq!(call.to_wire_bytes()[6], 0x6C);
}

#[test]
fn test_decode_consumes_only_first_seven_bytes() {
    let buf = [0xAE, 0x64, 0x8E, 0x9A, 0x88, 0x40, 0x62, 0x03, 0xF0];
    assert_eq!(Callsign::from_wire_bytes(&buf).unwrap().to_string(), "W2GMD-1");
}

#[test]
fn test_decode_truncated() {
    let err = Callsign::from_wire_bytes(&[0xAE, 0x64, 0x8E, 0x9A, 0x88, 0x40]).unwrap_err();
    assert_eq!(err, CallsignError::TruncatedInput { len: 6 });
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    assert!(Callsign::from_wire_bytes(&[]).is_err());
}

#[test]
fn test_is_valid_callsign() {
    for call in ["W2GMD", "W2GMD-1", "KF4MKT", "KF4MKT-1", "KF4LZA-15"] {
        assert!(is_valid_callsign(call), "{} is a valid call", call);
    }
    for call in ["xW2GMDx", "W2GMD-16", "W2GMD-A", "W", "W2GMD-1-0", "W2GMD-123", "W2GMD*"] {
        assert!(!is_valid_callsign(call), "{} is an invalid call", call);
    }
}
