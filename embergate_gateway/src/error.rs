use async_tungstenite::tungstenite::{protocol::CloseFrame, Error as TungsteniteError};
use embergate_api_types::DecodeError;
use embergate_rest::DiscoveryError;
use thiserror::Error;

/// Transient failure of the open connection itself: a read/write error, or
/// the remote closing the socket. Always recoverable by reconnecting.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    Tungstenite(#[from] TungsteniteError),

    #[error("{}", close_reason(.0))]
    Closed(Option<CloseFrame<'static>>),

    #[error("frame encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

fn close_reason(frame: &Option<CloseFrame<'static>>) -> String {
    frame.as_ref().map_or_else(
        || "gateway closed without reason".to_owned(),
        |f| format!("gateway closed: {}({})", f.code, f.reason),
    )
}

/// The taxonomy from the core's error handling design. `Decode` is part of
/// the enum for completeness but is never actually returned from a public
/// function: the wire codec's decode errors are caught, logged, and the
/// offending frame is dropped without tearing down the session.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("frame decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("gateway discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("exhausted reconnect attempts")]
    ExhaustedReconnects,
}
