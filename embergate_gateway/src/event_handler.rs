use async_trait::async_trait;

use crate::error::TransportError;

/// Lower-overhead host callback pair alongside the structured logging
/// below: every call site here also emits a `tracing` event, so a host
/// that never installs a handler still gets structured logs on its own
/// subscriber.
#[async_trait]
pub trait GatewayEventHandler: Send + Sync {
    async fn debug(&self, _message: &str) {}
    async fn transport_error(&self, _error: &TransportError) {}
}

/// A handler that does nothing; the default when a host has no interest
/// in the raw callback surface and only consumes the API message bus.
pub struct NoopEventHandler;

#[async_trait]
impl GatewayEventHandler for NoopEventHandler {}
