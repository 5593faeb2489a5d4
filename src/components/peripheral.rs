//! Peripheral Transport
//!
//! Implements `CharacteristicTransport` over a `btleplug` peripheral. The peripheral must
//! already be connected and its services discovered; this module never connects.
use crate::api::transport::{CharacteristicTransport, NotificationHandler};
use crate::core::error::TransportError;

use async_trait::async_trait;
use btleplug::api::{bleuuid::uuid_from_u16, Characteristic, Peripheral};
use futures::StreamExt;
use log::{trace, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Parses a characteristic UUID in 16 bit short form (`"2a37"`) or full 128 bit form.
pub fn parse_characteristic_uuid(uuid: &str) -> Result<Uuid, TransportError> {
    let invalid = || TransportError::InvalidUuid(uuid.to_owned());
    if uuid.len() == 4 {
        u16::from_str_radix(uuid, 16)
            .map(uuid_from_u16)
            .map_err(|_| invalid())
    } else {
        Uuid::parse_str(uuid).map_err(|_| invalid())
    }
}

/// Characteristic access on a connected `btleplug` peripheral.
///
/// # Fields
/// - `peripheral`: The connected peripheral
/// - `listeners`: Notification tasks, aborted when the transport is dropped
#[derive(Debug)]
pub struct PeripheralTransport<P: Peripheral> {
    peripheral: P,
    listeners: Mutex<Vec<JoinHandle<()>>>,
}

impl<P: Peripheral> Drop for PeripheralTransport<P> {
    fn drop(&mut self) {
        for handle in self.listeners.get_mut().drain(..) {
            handle.abort();
        }
    }
}

impl<P: Peripheral> PeripheralTransport<P> {
    pub fn new(peripheral: P) -> Self {
        Self {
            peripheral,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    fn find_characteristic(&self, uuid: &str) -> Result<Characteristic, TransportError> {
        let id = parse_characteristic_uuid(uuid)?;
        self.peripheral
            .characteristics()
            .into_iter()
            .find(|c| c.uuid == id)
            .ok_or_else(|| TransportError::CharacteristicNotFound(uuid.to_owned()))
    }
}

#[async_trait]
impl<P: Peripheral + 'static> CharacteristicTransport for PeripheralTransport<P> {
    async fn read_characteristic(&self, uuid: &str) -> Result<Vec<u8>, TransportError> {
        let characteristic = self.find_characteristic(uuid)?;
        let value = self.peripheral.read(&characteristic).await?;
        trace!("read {}: {:02x?}", characteristic.uuid, value);
        Ok(value)
    }

    async fn subscribe(
        &self,
        uuid: &str,
        handler: NotificationHandler,
    ) -> Result<(), TransportError> {
        let characteristic = self.find_characteristic(uuid)?;
        self.peripheral.subscribe(&characteristic).await?;
        let mut notifications = self.peripheral.notifications().await?;

        let target = characteristic.uuid;
        let listener = tokio::spawn(async move {
            while let Some(notification) = notifications.next().await {
                if notification.uuid == target {
                    handler(Ok(notification.value));
                }
            }
            warn!("notification stream of {} closed", target);
            handler(Err(TransportError::NotificationStreamClosed));
        });
        self.listeners.lock().await.push(listener);
        Ok(())
    }
}
