//! Measurement Report
//!
//! Renders decoded measurements as blocks of text, one block per notification.
use crate::core::constants::REPORT_TIME_FORMAT;
use crate::model::heart_rate::HeartRateMeasurement;
use std::fmt;
use time::{OffsetDateTime, Time};

/// A measurement stamped with the time of day it was received.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartRateReport {
    pub time: Time,
    pub measurement: HeartRateMeasurement,
}

impl HeartRateReport {
    pub fn new(time: Time, measurement: HeartRateMeasurement) -> Self {
        Self { time, measurement }
    }

    /// Stamps a measurement with the current UTC time.
    pub fn now(measurement: HeartRateMeasurement) -> Self {
        Self::new(OffsetDateTime::now_utc().time(), measurement)
    }
}

impl fmt::Display for HeartRateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stamp = self.time.format(REPORT_TIME_FORMAT).map_err(|_| fmt::Error)?;
        writeln!(f, "{}", stamp)?;
        writeln!(f, "{}", self.measurement)?;
        write!(f, "--------------------")
    }
}
