//! Heart Rate Measurement Model
//!
//! This module defines the decoded form of the Heart Rate Measurement characteristic.
//! A notification starts with a flags byte whose bits are independent sub-fields:
//!
//! | bits | field                    |
//! |------|--------------------------|
//! | 0    | heart rate value format  |
//! | 1-2  | sensor contact status    |
//! | 3    | energy expended status   |
//! | 4    | RR interval status       |
//!
//! The heart rate value follows as `u8` or little-endian `u16`. Energy expended and
//! RR interval fields that may trail the value are not decoded.

use crate::bit_field;
use crate::core::error::HeartRateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the heart rate value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueFormat {
    Uint8,
    Uint16,
}

impl ValueFormat {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0b0 => ValueFormat::Uint8,
            _ => ValueFormat::Uint16,
        }
    }

    fn bits(self) -> u8 {
        match self {
            ValueFormat::Uint8 => 0b0,
            ValueFormat::Uint16 => 0b1,
        }
    }

    /// Minimum payload length, flags byte included.
    pub fn payload_len(self) -> usize {
        match self {
            ValueFormat::Uint8 => 2,
            ValueFormat::Uint16 => 3,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ValueFormat::Uint8 => "UINT8",
            ValueFormat::Uint16 => "UINT16",
        }
    }
}

/// Sensor contact status.
///
/// Both `0b00` and `0b01` mean the feature is not supported; they are kept apart
/// so that a decoded flags byte encodes back to the same bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorContactStatus {
    NotSupported,
    NotSupportedAlt,
    SupportedNoContact,
    SupportedWithContact,
}

impl SensorContactStatus {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0b00 => SensorContactStatus::NotSupported,
            0b01 => SensorContactStatus::NotSupportedAlt,
            0b10 => SensorContactStatus::SupportedNoContact,
            _ => SensorContactStatus::SupportedWithContact,
        }
    }

    fn bits(self) -> u8 {
        match self {
            SensorContactStatus::NotSupported => 0b00,
            SensorContactStatus::NotSupportedAlt => 0b01,
            SensorContactStatus::SupportedNoContact => 0b10,
            SensorContactStatus::SupportedWithContact => 0b11,
        }
    }

    /// Checks if the sensor supports contact detection.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            SensorContactStatus::SupportedNoContact | SensorContactStatus::SupportedWithContact
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            SensorContactStatus::NotSupported | SensorContactStatus::NotSupportedAlt => {
                "not supported"
            }
            SensorContactStatus::SupportedNoContact => "supported but contact is not detected",
            SensorContactStatus::SupportedWithContact => "supported and contact is detected",
        }
    }
}

/// Presence of the energy expended field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyExpendedStatus {
    Absent,
    Present,
}

impl EnergyExpendedStatus {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0b0 => EnergyExpendedStatus::Absent,
            _ => EnergyExpendedStatus::Present,
        }
    }

    fn bits(self) -> u8 {
        match self {
            EnergyExpendedStatus::Absent => 0b0,
            EnergyExpendedStatus::Present => 0b1,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EnergyExpendedStatus::Absent => "not present",
            EnergyExpendedStatus::Present => "present",
        }
    }
}

/// Presence of RR interval values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RrIntervalStatus {
    Absent,
    PresentOneOrMore,
}

impl RrIntervalStatus {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0b0 => RrIntervalStatus::Absent,
            _ => RrIntervalStatus::PresentOneOrMore,
        }
    }

    fn bits(self) -> u8 {
        match self {
            RrIntervalStatus::Absent => 0b0,
            RrIntervalStatus::PresentOneOrMore => 0b1,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RrIntervalStatus::Absent => "not present",
            RrIntervalStatus::PresentOneOrMore => "present (one or more)",
        }
    }
}

/// The four sub-fields of a Heart Rate Measurement flags byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeartRateMeasurementFlags {
    pub value_format: ValueFormat,
    pub sensor_contact_status: SensorContactStatus,
    pub energy_expended_status: EnergyExpendedStatus,
    pub rr_interval_status: RrIntervalStatus,
}

impl HeartRateMeasurementFlags {
    /// Decodes a flags byte. Every byte is valid; bits 5-7 are reserved and ignored.
    pub fn from_byte(flags: u8) -> Self {
        Self {
            value_format: ValueFormat::from_bits(bit_field!(flags, 0, 1)),
            sensor_contact_status: SensorContactStatus::from_bits(bit_field!(flags, 1, 2)),
            energy_expended_status: EnergyExpendedStatus::from_bits(bit_field!(flags, 3, 1)),
            rr_interval_status: RrIntervalStatus::from_bits(bit_field!(flags, 4, 1)),
        }
    }
}

impl From<u8> for HeartRateMeasurementFlags {
    fn from(flags: u8) -> Self {
        Self::from_byte(flags)
    }
}

impl From<HeartRateMeasurementFlags> for u8 {
    fn from(flags: HeartRateMeasurementFlags) -> Self {
        flags.value_format.bits()
            | flags.sensor_contact_status.bits() << 1
            | flags.energy_expended_status.bits() << 3
            | flags.rr_interval_status.bits() << 4
    }
}

impl fmt::Display for HeartRateMeasurementFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HeartRateFormat: {}", self.value_format.description())?;
        writeln!(
            f,
            "SensorContactStatus: {}",
            self.sensor_contact_status.description()
        )?;
        writeln!(
            f,
            "EnergyExpendedStatus: {}",
            self.energy_expended_status.description()
        )?;
        write!(f, "RR-Interval: {}", self.rr_interval_status.description())
    }
}

/// A decoded Heart Rate Measurement notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeartRateMeasurement {
    /// Heart rate in beats per minute.
    pub value: u16,
    pub flags: HeartRateMeasurementFlags,
}

impl HeartRateMeasurement {
    /// Decodes a Heart Rate Measurement characteristic value.
    ///
    /// # Arguments
    /// * `data` - The raw notification payload, flags byte first.
    ///
    /// # Errors
    /// `MalformedPayload` if `data` is shorter than the value format requires:
    /// 2 bytes for `Uint8`, 3 bytes for `Uint16`.
    pub fn decode(data: &[u8]) -> Result<Self, HeartRateError> {
        let (&flags, rest) = data.split_first().ok_or(HeartRateError::MalformedPayload {
            expected: ValueFormat::Uint8.payload_len(),
            actual: 0,
        })?;
        let flags = HeartRateMeasurementFlags::from_byte(flags);

        let malformed = HeartRateError::MalformedPayload {
            expected: flags.value_format.payload_len(),
            actual: data.len(),
        };
        let value = match flags.value_format {
            ValueFormat::Uint8 => rest.first().map(|&v| u16::from(v)),
            ValueFormat::Uint16 => rest
                .get(..2)
                .map(|b| u16::from_le_bytes([b[0], b[1]])),
        }
        .ok_or(malformed)?;

        Ok(Self { value, flags })
    }

    /// Encodes the measurement as a characteristic value.
    ///
    /// Returns `None` if the value does not fit the selected format.
    pub fn encode(&self) -> Option<Vec<u8>> {
        let mut data = vec![u8::from(self.flags)];
        match self.flags.value_format {
            ValueFormat::Uint8 => data.push(u8::try_from(self.value).ok()?),
            ValueFormat::Uint16 => data.extend_from_slice(&self.value.to_le_bytes()),
        }
        Some(data)
    }
}

impl TryFrom<&[u8]> for HeartRateMeasurement {
    type Error = HeartRateError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(data)
    }
}

impl fmt::Display for HeartRateMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.flags)?;
        write!(f, "HeartRate: {}", self.value)
    }
}
