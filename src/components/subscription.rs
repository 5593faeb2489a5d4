//! Subscription Adapter
//!
//! Bridges the callback registered with a transport to an explicit event channel.
//! Every notification is decoded on the transport's side and pushed to the consumer
//! as a `HeartRateEvent`; failures are logged and pushed as well, so a corrupt packet
//! never ends the stream.
use crate::api::transport::NotificationHandler;
use crate::core::error::{HeartRateError, TransportError};
use crate::core::events::HeartRateEvent;
use crate::model::heart_rate::HeartRateMeasurement;

use futures::Stream;
use log::{error, trace, warn};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Turns one inbound transport event into the event delivered to the consumer.
///
/// The decoder is not invoked for transport errors.
pub fn handle_notification(payload: Result<Vec<u8>, TransportError>) -> HeartRateEvent {
    payload
        .map_err(HeartRateError::from)
        .and_then(|data| HeartRateMeasurement::decode(&data))
        .into()
}

/// Creates the handler registered with the transport and the matching consumer end.
pub fn channel() -> (NotificationHandler, HeartRateSubscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    (forwarding_handler(tx), HeartRateSubscription { rx })
}

fn forwarding_handler(tx: UnboundedSender<HeartRateEvent>) -> NotificationHandler {
    Box::new(move |payload| {
        let event = handle_notification(payload);
        match &event {
            HeartRateEvent::Measurement(m) => trace!("heart rate {} bpm", m.value),
            HeartRateEvent::Error(e) => error!("heart rate notification: {}", e),
        }
        if tx.send(event).is_err() {
            warn!("heart rate subscription dropped, discarding notification");
        }
    })
}

/// Consumer end of a heart rate subscription.
///
/// Yields one event per notification, in arrival order. The stream ends only when
/// the transport drops its handler.
#[derive(Debug)]
pub struct HeartRateSubscription {
    rx: UnboundedReceiver<HeartRateEvent>,
}

impl HeartRateSubscription {
    /// Waits for the next event.
    pub async fn recv(&mut self) -> Option<HeartRateEvent> {
        self.rx.recv().await
    }

    /// Returns the next event if one is already queued.
    pub fn try_recv(&mut self) -> Option<HeartRateEvent> {
        self.rx.try_recv().ok()
    }
}

impl Stream for HeartRateSubscription {
    type Item = HeartRateEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[test]
    fn test_handle_measurement() {
        let event = handle_notification(Ok(vec![0x00, 0x4B]));
        assert_eq!(event.measurement().map(|m| m.value), Some(75));
    }

    #[test]
    fn test_handle_transport_error() {
        assert_eq!(
            handle_notification(Err(TransportError::NotConnected)),
            HeartRateEvent::Error(HeartRateError::Transport(TransportError::NotConnected))
        );
    }

    #[test]
    fn test_handle_malformed_payload() {
        assert_eq!(
            handle_notification(Ok(vec![0x01])),
            HeartRateEvent::Error(HeartRateError::MalformedPayload {
                expected: 3,
                actual: 1
            })
        );
    }

    #[tokio::test]
    async fn test_events_delivered_in_order() {
        let (handler, mut subscription) = channel();
        handler(Ok(vec![0x00, 60]));
        handler(Err(TransportError::Ble("link lost".into())));
        handler(Ok(vec![0x01, 0x41, 0x00]));
        drop(handler);

        let events: Vec<_> = (&mut subscription).collect().await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].measurement().map(|m| m.value), Some(60));
        assert!(matches!(
            events[1],
            HeartRateEvent::Error(HeartRateError::Transport(_))
        ));
        assert_eq!(events[2].measurement().map(|m| m.value), Some(65));
    }

    #[test]
    fn test_dropped_consumer_does_not_panic() {
        let (handler, subscription) = channel();
        drop(subscription);
        handler(Ok(vec![0x00, 70]));
    }

    #[test]
    fn test_try_recv() {
        let (handler, mut subscription) = channel();
        assert!(subscription.try_recv().is_none());
        handler(Ok(vec![0x00, 90]));
        assert_eq!(
            subscription.try_recv().and_then(|e| e.measurement().map(|m| m.value)),
            Some(90)
        );
    }
}
