//! Callsigns for APRS in Rust.
//!
//! AX.25 (and APRS carried over KISS) identifies every station by a base
//! callsign plus a Secondary Station Identifier. This crate converts between
//! the three forms a callsign takes:
//!
//! * Human-readable text such as `W2GMD-1`, or `W2GMD-1*` once the station has digipeated
//! * The 7-octet shifted-ASCII AX.25 address field used on the wire
//! * The parsed [`Callsign`] structure
//!
//! ```
//! use aprs::Callsign;
//!
//! let call: Callsign = "W2GMD-1".parse().unwrap();
//! assert_eq!(call.to_wire_bytes(), [0xAE, 0x64, 0x8E, 0x9A, 0x88, 0x40, 0x62]);
//!
//! let decoded = Callsign::from_wire_bytes(&call.to_wire_bytes()).unwrap();
//! assert_eq!(decoded.to_string(), "W2GMD-1");
//! ```
//!
//! Frame parsing, KISS framing and TNC transports are left to other crates: they
//! hand raw address fields to [`Callsign::from_wire_bytes`] and take back the
//! encoded bytes from [`Callsign::to_address_field`].

/// Converting callsigns between text, parsed and AX.25 address field forms.
pub mod callsign;

/// Errors produced while parsing or decoding callsigns.
pub mod error;

pub use crate::callsign::{is_valid_callsign, Callsign, ADDRESS_LEN, CALLSIGN_LEN, MAX_SSID};
pub use crate::error::{CallsignError, ErrorKind};
