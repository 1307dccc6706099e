use thiserror::Error;

/// Everything that can go wrong converting a callsign to or from its
/// string and wire forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CallsignError {
    /// Fewer than 7 bytes were handed to the address decoder.
    #[error("address field truncated: got {len} bytes, need 7")]
    TruncatedInput { len: usize },

    /// The `-<ssid>` suffix was not a number from 0 to 15.
    #[error("invalid SSID \"{value}\": must be a number from 0 to 15")]
    InvalidSsid { value: String },

    /// More than 6 characters were left after removing the SSID and digipeat marker.
    #[error("callsign \"{value}\" is longer than 6 characters")]
    OversizeCallsign { value: String },

    /// Nothing was left after removing the SSID and digipeat marker.
    #[error("callsign is empty")]
    EmptyCallsign,

    /// Callsigns are letters and digits only (space padding is handled internally).
    #[error("callsign \"{value}\" contains invalid character {ch:?}")]
    InvalidCharacter { value: String, ch: char },
}

/// Fieldless category of a [`CallsignError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TruncatedInput,
    InvalidSsid,
    OversizeCallsign,
    EmptyCallsign,
    InvalidCharacter,
}

impl CallsignError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CallsignError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            CallsignError::InvalidSsid { .. } => ErrorKind::InvalidSsid,
            CallsignError::OversizeCallsign { .. } => ErrorKind::OversizeCallsign,
            CallsignError::EmptyCallsign => ErrorKind::EmptyCallsign,
            CallsignError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
        }
    }
}
