//! Body Sensor Location Model

use crate::core::error::HeartRateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where on the body a heart rate sensor is worn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodySensorLocation {
    Other,
    Chest,
    Wrist,
    Finger,
    Hand,
    EarLobe,
    Foot,
}

impl BodySensorLocation {
    /// Decodes a Body Sensor Location characteristic value.
    ///
    /// Only the first byte is significant.
    pub fn decode(data: &[u8]) -> Result<Self, HeartRateError> {
        let code = data.first().ok_or(HeartRateError::MalformedPayload {
            expected: 1,
            actual: 0,
        })?;
        Self::try_from(*code)
    }

    pub fn code(self) -> u8 {
        match self {
            BodySensorLocation::Other => 0,
            BodySensorLocation::Chest => 1,
            BodySensorLocation::Wrist => 2,
            BodySensorLocation::Finger => 3,
            BodySensorLocation::Hand => 4,
            BodySensorLocation::EarLobe => 5,
            BodySensorLocation::Foot => 6,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BodySensorLocation::Other => "Other",
            BodySensorLocation::Chest => "Chest",
            BodySensorLocation::Wrist => "Wrist",
            BodySensorLocation::Finger => "Finger",
            BodySensorLocation::Hand => "Hand",
            BodySensorLocation::EarLobe => "Ear Lobe",
            BodySensorLocation::Foot => "Foot",
        }
    }
}

impl TryFrom<u8> for BodySensorLocation {
    type Error = HeartRateError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BodySensorLocation::Other),
            1 => Ok(BodySensorLocation::Chest),
            2 => Ok(BodySensorLocation::Wrist),
            3 => Ok(BodySensorLocation::Finger),
            4 => Ok(BodySensorLocation::Hand),
            5 => Ok(BodySensorLocation::EarLobe),
            6 => Ok(BodySensorLocation::Foot),
            undefined => Err(HeartRateError::UndefinedLocation(undefined)),
        }
    }
}

impl fmt::Display for BodySensorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
