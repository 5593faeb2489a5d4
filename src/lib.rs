//! Heart Rate Service Decoder
//!
//! This crate decodes Bluetooth Low Energy (BLE) Heart Rate Service characteristics
//! into structured measurements. It integrates the payload decoders, a subscription
//! adapter that turns transport notifications into a stream of decoded events, and a
//! transport implementation on top of an already connected `btleplug` peripheral.

/// Core utilities shared by all modules.
pub mod core {
    /// Configuration of the heart rate driver.
    pub mod config;
    /// Characteristic identifiers and formatting constants.
    pub mod constants;
    /// Error types of the decoders and the transport boundary.
    pub mod error;
    /// Events delivered to subscription consumers.
    pub mod events;
    /// Custom macros for bit field extraction.
    pub mod macros;
}

/// Traits describing the boundary to external collaborators.
pub mod api {
    /// Characteristic transport consumed by the driver.
    pub mod transport;
}

/// Decoded value objects of the Heart Rate Service.
pub mod model {
    /// Body sensor location characteristic.
    pub mod body_sensor_location;
    /// Heart rate measurement characteristic and its flags.
    pub mod heart_rate;
}

/// Components wiring decoders to a transport.
pub mod components {
    /// The heart rate driver.
    pub mod heart_rate;
    /// Transport over a connected `btleplug` peripheral.
    pub mod peripheral;
    /// Subscription adapter and its event channel.
    pub mod subscription;
}

/// Human-readable rendering of decoded values.
pub mod view {
    /// Line-oriented measurement reports.
    pub mod report;
}

pub use crate::api::transport::{CharacteristicTransport, NotificationHandler};
pub use crate::components::heart_rate::HeartRateDriver;
pub use crate::components::peripheral::PeripheralTransport;
pub use crate::components::subscription::HeartRateSubscription;
pub use crate::core::config::DriverConfig;
pub use crate::core::error::{HeartRateError, TransportError};
pub use crate::core::events::HeartRateEvent;
pub use crate::model::body_sensor_location::BodySensorLocation;
pub use crate::model::heart_rate::{
    EnergyExpendedStatus, HeartRateMeasurement, HeartRateMeasurementFlags, RrIntervalStatus,
    SensorContactStatus, ValueFormat,
};
pub use crate::view::report::HeartRateReport;
