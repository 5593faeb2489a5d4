//! Transport Module
//!
//! This module defines the boundary to the component that owns the BLE connection.
//! The driver only consumes two operations from it: a point read of a characteristic
//! and the registration of a persistent notification handler.
use crate::core::error::TransportError;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Handler invoked by the transport once per inbound notification.
///
/// Receives either the raw characteristic value or the error the transport ran into.
/// Invocations are not guaranteed to be serialized.
pub type NotificationHandler = Box<dyn Fn(Result<Vec<u8>, TransportError>) + Send + Sync>;

/// CharacteristicTransport trait
///
/// Access to the characteristics of a connected peripheral. Characteristics are
/// addressed by their UUID string, either the 16 bit short form (`"2a37"`) or the
/// full 128 bit form.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CharacteristicTransport: Send + Sync {
    /// Read the current value of a characteristic.
    ///
    /// # Arguments
    ///
    /// * `uuid` - The characteristic to read.
    async fn read_characteristic(&self, uuid: &str) -> Result<Vec<u8>, TransportError>;

    /// Register a persistent notification handler on a characteristic.
    ///
    /// Returns an error only if the registration itself fails.
    ///
    /// # Arguments
    ///
    /// * `uuid` - The characteristic to subscribe to.
    /// * `handler` - Invoked for every notification until the connection ends.
    async fn subscribe(&self, uuid: &str, handler: NotificationHandler)
        -> Result<(), TransportError>;
}
