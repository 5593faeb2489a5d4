use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// Heart Rate Service characteristics.
/// Heart Rate Measurement characteristic, notified by the sensor.
pub const HEART_RATE_MEASUREMENT_UUID: &str = "2a37";
/// Body Sensor Location characteristic, read once.
pub const BODY_SENSOR_LOCATION_UUID: &str = "2a38";
/// Heart Rate Control Point characteristic.
pub const HEART_RATE_CONTROL_POINT_UUID: &str = "2a39";

/// Name given to a driver unless configured otherwise.
pub const DEFAULT_DRIVER_NAME: &str = "Heart Rate";

/// Time-of-day stamp printed in front of every report.
pub const REPORT_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");
