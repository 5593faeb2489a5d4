//! Core Events
//!
//! This module defines the events delivered to consumers of a heart rate subscription.
use crate::core::error::HeartRateError;
use crate::model::heart_rate::HeartRateMeasurement;

/// Item carried by a heart rate subscription channel.
///
/// Every inbound notification produces exactly one event, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum HeartRateEvent {
    /// A successfully decoded heart rate measurement.
    Measurement(HeartRateMeasurement),

    /// A transport error or a payload that could not be decoded.
    ///
    /// Errors do not end the subscription.
    Error(HeartRateError),
}

impl HeartRateEvent {
    /// Returns the measurement, if this event carries one.
    pub fn measurement(&self) -> Option<&HeartRateMeasurement> {
        match self {
            HeartRateEvent::Measurement(m) => Some(m),
            HeartRateEvent::Error(_) => None,
        }
    }
}

impl From<Result<HeartRateMeasurement, HeartRateError>> for HeartRateEvent {
    fn from(result: Result<HeartRateMeasurement, HeartRateError>) -> Self {
        match result {
            Ok(m) => HeartRateEvent::Measurement(m),
            Err(e) => HeartRateEvent::Error(e),
        }
    }
}
