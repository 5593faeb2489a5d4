//! Heart Rate Driver
//!
//! This module implements the Heart Rate Service on top of a characteristic transport.
//! It reads the body sensor location and subscribes to heart rate measurements.
use crate::api::transport::CharacteristicTransport;
use crate::components::subscription::{self, HeartRateSubscription};
use crate::core::config::DriverConfig;
use crate::core::constants::{
    BODY_SENSOR_LOCATION_UUID, DEFAULT_DRIVER_NAME, HEART_RATE_MEASUREMENT_UUID,
};
use crate::core::error::HeartRateError;
use crate::model::body_sensor_location::BodySensorLocation;

use log::{info, trace};
use std::sync::atomic::{AtomicBool, Ordering};

/// Driver for the Heart Rate Service of one peripheral.
///
/// # Type Parameters
/// - `T`: Transport giving access to the peripheral's characteristics
///
/// # Fields
/// - `name`: Display name of the driver
/// - `transport`: The connected transport
/// - `subscribed`: Set once the measurement subscription is registered
#[derive(Debug)]
pub struct HeartRateDriver<T: CharacteristicTransport> {
    name: String,
    transport: T,
    subscribed: AtomicBool,
}

impl<T: CharacteristicTransport> HeartRateDriver<T> {
    /// Creates a new `HeartRateDriver` named "Heart Rate".
    pub fn new(transport: T) -> Self {
        Self {
            name: DEFAULT_DRIVER_NAME.to_owned(),
            transport,
            subscribed: AtomicBool::new(false),
        }
    }

    /// Creates a new `HeartRateDriver` from a configuration.
    pub fn from_config(transport: T, config: &DriverConfig) -> Self {
        let mut driver = Self::new(transport);
        driver.set_name(config.name.clone());
        driver
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Reads where the sensor is worn.
    ///
    /// Transport errors are returned to the caller unchanged.
    pub async fn body_sensor_location(&self) -> Result<BodySensorLocation, HeartRateError> {
        let data = self
            .transport
            .read_characteristic(BODY_SENSOR_LOCATION_UUID)
            .await?;
        trace!("{}: body sensor location payload {:02x?}", self.name, data);
        BodySensorLocation::decode(&data)
    }

    /// Subscribes to heart rate measurement notifications.
    ///
    /// The subscription lives as long as the connection. Only one subscription per
    /// driver is allowed; a second call fails with `AlreadySubscribed`.
    pub async fn subscribe_heart_rate(&self) -> Result<HeartRateSubscription, HeartRateError> {
        if self.subscribed.swap(true, Ordering::AcqRel) {
            return Err(HeartRateError::AlreadySubscribed(
                HEART_RATE_MEASUREMENT_UUID.to_owned(),
            ));
        }

        let (handler, subscription) = subscription::channel();
        if let Err(e) = self
            .transport
            .subscribe(HEART_RATE_MEASUREMENT_UUID, handler)
            .await
        {
            self.subscribed.store(false, Ordering::Release);
            return Err(e.into());
        }
        info!("{}: subscribed to heart rate measurements", self.name);
        Ok(subscription)
    }

    /// Checks if the measurement subscription is registered.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{MockCharacteristicTransport, NotificationHandler};
    use crate::core::error::TransportError;
    use crate::core::events::HeartRateEvent;
    use std::sync::{Arc, Mutex};

    type HandlerSlot = Arc<Mutex<Option<NotificationHandler>>>;

    /// A transport that keeps the registered handler so that tests can push notifications.
    fn capturing_transport(slot: HandlerSlot) -> MockCharacteristicTransport {
        let mut transport = MockCharacteristicTransport::new();
        transport
            .expect_subscribe()
            .withf(|uuid, _| uuid.eq_ignore_ascii_case("2a37"))
            .times(1)
            .returning(move |_, handler| {
                *slot.lock().unwrap() = Some(handler);
                Ok(())
            });
        transport
    }

    fn notify(slot: &HandlerSlot, payload: Result<Vec<u8>, TransportError>) {
        let guard = slot.lock().unwrap();
        let handler = guard.as_ref().expect("no handler registered");
        handler(payload);
    }

    #[test]
    fn test_new_driver() {
        let driver = HeartRateDriver::new(MockCharacteristicTransport::new());
        assert_eq!(driver.name(), "Heart Rate");
        assert!(!driver.is_subscribed());
    }

    #[test]
    fn test_driver_from_config() {
        let config = DriverConfig {
            name: "Polar H10".into(),
            ..Default::default()
        };
        let mut driver = HeartRateDriver::from_config(MockCharacteristicTransport::new(), &config);
        assert_eq!(driver.name(), "Polar H10");
        driver.set_name("Strap");
        assert_eq!(driver.name(), "Strap");
    }

    #[tokio::test]
    async fn test_body_sensor_location() {
        let mut transport = MockCharacteristicTransport::new();
        transport
            .expect_read_characteristic()
            .withf(|uuid| uuid.eq_ignore_ascii_case("2a38"))
            .times(1)
            .returning(|_| Ok(vec![2]));
        let driver = HeartRateDriver::new(transport);
        assert_eq!(
            driver.body_sensor_location().await,
            Ok(BodySensorLocation::Wrist)
        );
    }

    #[tokio::test]
    async fn test_body_sensor_location_undefined() {
        let mut transport = MockCharacteristicTransport::new();
        transport
            .expect_read_characteristic()
            .returning(|_| Ok(vec![9]));
        let driver = HeartRateDriver::new(transport);
        assert_eq!(
            driver.body_sensor_location().await,
            Err(HeartRateError::UndefinedLocation(9))
        );
    }

    #[tokio::test]
    async fn test_body_sensor_location_transport_error() {
        let mut transport = MockCharacteristicTransport::new();
        transport
            .expect_read_characteristic()
            .returning(|_| Err(TransportError::NotConnected));
        let driver = HeartRateDriver::new(transport);
        assert_eq!(
            driver.body_sensor_location().await,
            Err(HeartRateError::Transport(TransportError::NotConnected))
        );
    }

    #[tokio::test]
    async fn test_subscription_survives_errors() {
        let slot = HandlerSlot::default();
        let driver = HeartRateDriver::new(capturing_transport(slot.clone()));
        let mut subscription = driver.subscribe_heart_rate().await.unwrap();

        notify(&slot, Err(TransportError::Ble("timeout".into())));
        notify(&slot, Ok(vec![0x00, 0x4B]));

        assert_eq!(
            subscription.recv().await,
            Some(HeartRateEvent::Error(HeartRateError::Transport(
                TransportError::Ble("timeout".into())
            )))
        );
        assert_eq!(
            subscription.recv().await.and_then(|e| e.measurement().map(|m| m.value)),
            Some(75)
        );
        assert!(subscription.try_recv().is_none());

        // still registered: later notifications keep arriving
        assert!(driver.is_subscribed());
        notify(&slot, Ok(vec![0x01, 0x50, 0x00]));
        assert_eq!(
            subscription.recv().await.and_then(|e| e.measurement().map(|m| m.value)),
            Some(80)
        );
    }

    #[tokio::test]
    async fn test_malformed_notification_reported() {
        let slot = HandlerSlot::default();
        let driver = HeartRateDriver::new(capturing_transport(slot.clone()));
        let mut subscription = driver.subscribe_heart_rate().await.unwrap();

        notify(&slot, Ok(vec![0x00]));
        notify(&slot, Ok(vec![0x00, 100]));

        assert_eq!(
            subscription.recv().await,
            Some(HeartRateEvent::Error(HeartRateError::MalformedPayload {
                expected: 2,
                actual: 1
            }))
        );
        assert_eq!(
            subscription.recv().await.and_then(|e| e.measurement().map(|m| m.value)),
            Some(100)
        );
    }

    #[tokio::test]
    async fn test_second_subscribe_rejected() {
        let slot = HandlerSlot::default();
        let driver = HeartRateDriver::new(capturing_transport(slot.clone()));
        let mut subscription = driver.subscribe_heart_rate().await.unwrap();

        assert_eq!(
            driver.subscribe_heart_rate().await.err(),
            Some(HeartRateError::AlreadySubscribed("2a37".into()))
        );

        notify(&slot, Ok(vec![0x00, 58]));
        assert_eq!(
            subscription.recv().await.and_then(|e| e.measurement().map(|m| m.value)),
            Some(58)
        );
    }

    #[tokio::test]
    async fn test_failed_registration_can_be_retried() {
        let mut transport = MockCharacteristicTransport::new();
        let mut attempt = 0;
        transport.expect_subscribe().times(2).returning(move |_, _| {
            attempt += 1;
            if attempt == 1 {
                Err(TransportError::NotConnected)
            } else {
                Ok(())
            }
        });
        let driver = HeartRateDriver::new(transport);

        assert_eq!(
            driver.subscribe_heart_rate().await.err(),
            Some(HeartRateError::Transport(TransportError::NotConnected))
        );
        assert!(!driver.is_subscribed());
        assert!(driver.subscribe_heart_rate().await.is_ok());
        assert!(driver.is_subscribed());
    }
}
