//! Error types
//!
//! Errors raised by the decoders and errors reported across the transport boundary.

use thiserror::Error;

/// Errors reported by a characteristic transport.
///
/// These are never generated by the decoders, only forwarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport is not connected")]
    NotConnected,

    #[error("characteristic {0} not found on peripheral")]
    CharacteristicNotFound(String),

    #[error("invalid characteristic uuid: {0}")]
    InvalidUuid(String),

    #[error("notification stream closed")]
    NotificationStreamClosed,

    #[error("bluetooth error: {0}")]
    Ble(String),
}

impl From<btleplug::Error> for TransportError {
    fn from(err: btleplug::Error) -> Self {
        match err {
            btleplug::Error::NotConnected => TransportError::NotConnected,
            other => TransportError::Ble(other.to_string()),
        }
    }
}

/// Errors of the heart rate driver and its decoders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeartRateError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed payload: expected at least {expected} bytes, got {actual}")]
    MalformedPayload { expected: usize, actual: usize },

    #[error("undefined location {0}")]
    UndefinedLocation(u8),

    #[error("characteristic {0} is already subscribed")]
    AlreadySubscribed(String),
}
