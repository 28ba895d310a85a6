use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::message::ApiMessage;

/// Lower-overhead single-subscriber hook, mirroring the gateway session's
/// own debug/error callback pair for hosts that only need one listener.
#[async_trait]
pub trait CacheEventHandler: Send + Sync {
    async fn on_message(&self, _message: &ApiMessage) {}
}

/// Publish-only fan-out surface. Delivery is at-least-once per event;
/// consumers tolerate absence when a referenced entity was never cached.
pub struct ApiMessageBus {
    sender: broadcast::Sender<Arc<ApiMessage>>,
    handler: Option<Arc<dyn CacheEventHandler>>,
}

impl ApiMessageBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, handler: None }
    }

    pub fn with_handler(mut self, handler: Arc<dyn CacheEventHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<ApiMessage>> {
        self.sender.subscribe()
    }

    /// Publishes a message to every subscriber and, if installed, the
    /// single-consumer callback. Broadcast send failure (no subscribers)
    /// is not an error — the message is simply unobserved.
    pub async fn publish(&self, message: ApiMessage) {
        let message = Arc::new(message);

        if let Some(handler) = &self.handler {
            handler.on_message(&message).await;
        }

        let _ = self.sender.send(message);
    }
}
