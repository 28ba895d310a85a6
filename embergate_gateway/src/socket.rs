use async_trait::async_trait;
use async_tungstenite::{
    tokio::{connect_async, ConnectStream},
    tungstenite::{protocol::CloseFrame, Message},
    WebSocketStream,
};
use embergate_api_types::{decode_frame, encode_frame, GatewayEvent, GatewaySendPayload};
use futures::{SinkExt, StreamExt};
use tokio::time::{timeout, Duration};

use crate::error::TransportError;

pub type WebSocket = WebSocketStream<ConnectStream>;

/// Poll period for `recv_next`. A timeout here is not an error; it just
/// gives the caller a chance to check the outbound channel and the
/// heartbeat timer between frames.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[async_trait]
pub trait WebSocketExt: Sized {
    async fn open(url: &str) -> Result<Self, TransportError>;
    async fn recv_next(&mut self) -> Result<Option<GatewayEvent>, TransportError>;
    async fn send_frame(&mut self, payload: &GatewaySendPayload) -> Result<(), TransportError>;
    async fn close(&mut self, info: Option<CloseFrame<'static>>) -> Result<(), TransportError>;
}

#[async_trait]
impl WebSocketExt for WebSocket {
    async fn open(url: &str) -> Result<Self, TransportError> {
        let (stream, _) = connect_async(url).await?;
        Ok(stream)
    }

    async fn recv_next(&mut self) -> Result<Option<GatewayEvent>, TransportError> {
        match timeout(POLL_INTERVAL, self.next()).await {
            Ok(Some(Ok(msg))) => match get_text(msg)? {
                Some(text) => match decode_frame(&text) {
                    Ok(event) => Ok(Some(event)),
                    Err(err) => {
                        tracing::warn!(error = %err, "dropping undecodable gateway frame");
                        Ok(None)
                    }
                },
                None => Ok(None),
            },
            Ok(Some(Err(err))) => Err(TransportError::Tungstenite(err)),
            Ok(None) => Err(TransportError::Closed(None)),
            Err(_) => Ok(None),
        }
    }

    async fn send_frame(&mut self, payload: &GatewaySendPayload) -> Result<(), TransportError> {
        let text = encode_frame(payload)?;
        self.send(Message::Text(text))
            .await
            .map_err(TransportError::Tungstenite)
    }

    async fn close(&mut self, info: Option<CloseFrame<'static>>) -> Result<(), TransportError> {
        self.send(Message::Close(info))
            .await
            .map_err(TransportError::Tungstenite)?;
        SinkExt::close(self)
            .await
            .map_err(TransportError::Tungstenite)
    }
}

fn get_text(msg: Message) -> Result<Option<String>, TransportError> {
    match msg {
        Message::Text(text) => Ok(Some(text)),
        Message::Close(frame) => Err(TransportError::Closed(frame)),
        _ => Ok(None),
    }
}
