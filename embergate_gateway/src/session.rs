use std::sync::Arc;
use std::time::Duration;

use embergate_api_types::{
    DispatchPayload, GatewayEvent, GatewaySendPayload, IdentifyConnectionProperties, IdentifyData,
    RequestGuildMembersData, ResumeData, Snowflake,
};
use embergate_cache::{ApiMessage, ApiMessageBus, Registry, Snapshot};
use embergate_rest::{GatewayDiscovery, RequestManager};
use kanal::AsyncReceiver;
use rand::Rng;
use tokio::sync::broadcast;
use tokio::time::Interval;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, TransportError};
use crate::event_handler::GatewayEventHandler;
use crate::socket::{WebSocket, WebSocketExt};

const GATEWAY_VERSION: &str = "5";
const OUTBOUND_CAPACITY: usize = 64;
const API_MESSAGE_CAPACITY: usize = 256;
const RECONNECT_BASE_DELAY_MS: u64 = 1000;
const RECONNECT_MAX_DELAY_MS: u64 = 60_000;

/// Exponential backoff with jitter between reconnect attempts, capped at
/// `RECONNECT_MAX_DELAY_MS`.
fn backoff_delay(attempt: u32) -> Duration {
    let exp = RECONNECT_BASE_DELAY_MS.saturating_mul(1u64 << attempt.min(6));
    let capped = exp.min(RECONNECT_MAX_DELAY_MS);
    let jitter = rand::thread_rng().gen_range(0..=capped / 4);
    Duration::from_millis(capped + jitter)
}

/// The session-data discriminated union. `Connecting` and `Shutdown` carry
/// no payload; the other three mirror the Idle/Connected/Beating variants
/// named in the design: `Connected` is the Upgraded state awaiting Hello,
/// `Beating` is Active with heartbeats scheduled.
pub enum SessionPhase {
    Idle {
        resume: Option<ResumeData>,
    },
    Connecting,
    Connected {
        send_channel: kanal::AsyncSender<GatewaySendPayload>,
        resume: Option<ResumeData>,
    },
    Beating {
        interval_ms: u64,
        heartbeat_handle: Interval,
        ack_pending: bool,
        send_channel: kanal::AsyncSender<GatewaySendPayload>,
        resume: Option<ResumeData>,
    },
    Shutdown,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle { .. } => "Idle",
            Self::Connecting => "Connecting",
            Self::Connected { .. } => "Upgraded",
            Self::Beating { .. } => "Active",
            Self::Shutdown => "Shutdown",
        }
    }

    fn resume(&self) -> Option<&ResumeData> {
        match self {
            Self::Idle { resume }
            | Self::Connected { resume, .. }
            | Self::Beating { resume, .. } => resume.as_ref(),
            Self::Connecting | Self::Shutdown => None,
        }
    }
}

/// The gateway session: one WebSocket connection's worth of connection
/// lifecycle, heartbeating, and dispatch routing into the cache. A single
/// cooperatively-scheduled state machine — `run` is meant to be driven by
/// exactly one task.
///
/// Generic over the transport (`W`) and gateway-discovery (`D`) seams so a
/// host or test can inject a fake for either one; production code gets the
/// real types via the defaults.
pub struct Session<W = WebSocket, D = RequestManager> {
    config: GatewayConfig,
    rest: D,
    event_handler: Arc<dyn GatewayEventHandler>,
    bus: ApiMessageBus,
    snapshot: Arc<Snapshot>,
    connection: Option<W>,
    outbound_rx: Option<AsyncReceiver<GatewaySendPayload>>,
    phase: SessionPhase,
    reconnect_attempts: u32,
}

impl<W, D> Session<W, D>
where
    W: WebSocketExt,
    D: GatewayDiscovery,
{
    pub fn new(config: GatewayConfig, rest: D) -> Self {
        Self::with_event_handler(config, rest, Arc::new(crate::event_handler::NoopEventHandler))
    }

    pub fn with_event_handler(
        config: GatewayConfig,
        rest: D,
        event_handler: Arc<dyn GatewayEventHandler>,
    ) -> Self {
        Self {
            config,
            rest,
            event_handler,
            bus: ApiMessageBus::new(API_MESSAGE_CAPACITY),
            snapshot: Arc::new(Snapshot::empty()),
            connection: None,
            outbound_rx: None,
            phase: SessionPhase::Idle { resume: None },
            reconnect_attempts: 0,
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.phase.name()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<ApiMessage>> {
        self.bus.subscribe()
    }

    /// The outbound sender for application-originated commands, available
    /// only once a connection is open.
    pub fn sender(&self) -> Option<kanal::AsyncSender<GatewaySendPayload>> {
        match &self.phase {
            SessionPhase::Connected { send_channel, .. }
            | SessionPhase::Beating { send_channel, .. } => Some(send_channel.clone()),
            SessionPhase::Idle { .. } | SessionPhase::Connecting | SessionPhase::Shutdown => None,
        }
    }

    pub async fn request_guild_members(
        &self,
        guild_id: Snowflake,
        query: Option<String>,
        limit: u64,
    ) -> Result<(), GatewayError> {
        let Some(sender) = self.sender() else {
            tracing::debug!("request_guild_members ignored: no active connection");
            return Ok(());
        };

        sender
            .send(GatewaySendPayload::RequestGuildMembers(
                RequestGuildMembersData {
                    guild_id,
                    query,
                    limit,
                },
            ))
            .await
            .map_err(|_| GatewayError::Transport(TransportError::Closed(None)))
    }

    /// Drives the session until shutdown or an unrecoverable error.
    pub async fn run(&mut self) -> Result<(), GatewayError> {
        loop {
            match &self.phase {
                SessionPhase::Shutdown => return Ok(()),
                SessionPhase::Idle { .. } => {
                    if let Err(err) = self.try_connect().await {
                        if matches!(err, GatewayError::ExhaustedReconnects) {
                            return Err(err);
                        }
                        let delay = backoff_delay(self.reconnect_attempts);
                        tracing::warn!(
                            error = %err,
                            delay_ms = delay.as_millis(),
                            "reconnect attempt failed, backing off"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    continue;
                }
                SessionPhase::Connecting => continue,
                _ => {}
            }

            self.drain_outbound().await?;

            enum Next {
                Frame(Result<Option<GatewayEvent>, TransportError>),
                Heartbeat,
            }

            let next = {
                let connection = self
                    .connection
                    .as_mut()
                    .expect("Connected/Beating phase always holds an open socket");

                match &mut self.phase {
                    SessionPhase::Beating {
                        heartbeat_handle, ..
                    } => {
                        tokio::select! {
                            frame = connection.recv_next() => Next::Frame(frame),
                            _ = heartbeat_handle.tick() => Next::Heartbeat,
                        }
                    }
                    _ => Next::Frame(connection.recv_next().await),
                }
            };

            match next {
                Next::Heartbeat => self.on_send_heartbeat().await?,
                Next::Frame(Ok(Some(event))) => self.handle_event(event).await?,
                Next::Frame(Ok(None)) => {}
                Next::Frame(Err(err)) => self.on_transport_error(err).await,
            }
        }
    }

    async fn handle_event(&mut self, event: GatewayEvent) -> Result<(), GatewayError> {
        match event {
            GatewayEvent::Hello(interval_ms) => self.on_hello(interval_ms).await?,
            GatewayEvent::HeartbeatRequest => self.on_send_heartbeat().await?,
            GatewayEvent::HeartbeatAck => self.on_heartbeat_ack(),
            GatewayEvent::InvalidSession(resumable) => self.on_invalid_session(resumable).await,
            GatewayEvent::Reconnect => self.on_reconnect().await,
            GatewayEvent::Dispatch(seq, payload) => self.on_dispatch(seq, payload).await,
        }
        Ok(())
    }

    /// Idle -> Connecting -> Upgraded. Fetches the gateway URL (resetting
    /// the reconnect counter on success) and opens the socket.
    pub async fn try_connect(&mut self) -> Result<(), GatewayError> {
        let resume = match std::mem::replace(&mut self.phase, SessionPhase::Connecting) {
            SessionPhase::Idle { resume } => resume,
            other => {
                tracing::debug!(state = other.name(), "try_connect ignored outside Idle state");
                self.phase = other;
                return Ok(());
            }
        };

        if self.reconnect_attempts >= self.config.max_reconnect_attempts {
            tracing::error!("exhausted reconnect attempts");
            self.phase = SessionPhase::Shutdown;
            return Err(GatewayError::ExhaustedReconnects);
        }
        self.reconnect_attempts += 1;

        let gateway = match self.rest.get_gateway_bot().await {
            Ok(gateway) => gateway,
            Err(err) => {
                tracing::warn!(error = %err, "gateway discovery failed");
                self.phase = SessionPhase::Idle { resume };
                return Err(GatewayError::Discovery(err));
            }
        };
        self.reconnect_attempts = 0;

        let url = format!("{}?v={}&encoding=json", gateway.url, GATEWAY_VERSION);
        let connection = match W::open(&url).await {
            Ok(connection) => connection,
            Err(err) => {
                tracing::warn!(error = %err, "websocket upgrade failed");
                self.phase = SessionPhase::Idle { resume };
                return Err(GatewayError::Transport(err));
            }
        };
        self.connection = Some(connection);

        let (tx, rx) = kanal::bounded_async(OUTBOUND_CAPACITY);
        self.outbound_rx = Some(rx);

        tracing::debug!("valid upgrade");
        self.event_handler.debug("valid upgrade").await;

        self.phase = SessionPhase::Connected {
            send_channel: tx,
            resume,
        };

        Ok(())
    }

    /// Upgraded -> Active. Sends Resume or Identify and starts the
    /// heartbeat timer.
    async fn on_hello(&mut self, interval_ms: u64) -> Result<(), GatewayError> {
        let (send_channel, resume) = match std::mem::replace(&mut self.phase, SessionPhase::Shutdown)
        {
            SessionPhase::Connected {
                send_channel,
                resume,
            } => (send_channel, resume),
            other => {
                tracing::debug!(state = other.name(), "Hello ignored outside Upgraded state");
                self.phase = other;
                return Ok(());
            }
        };

        if let Some(resume) = &resume {
            self.send_now(GatewaySendPayload::Resume(resume.clone()))
                .await?;
        } else {
            let identify = IdentifyData {
                token: self.config.token.clone(),
                properties: IdentifyConnectionProperties::default(),
                compress: false,
                large_threshold: self.config.large_threshold,
                shard: (self.config.shard_num, self.config.shard_total),
                intents: Some(self.config.intents.bits()),
            };
            self.send_now(GatewaySendPayload::Identify(identify)).await?;
        }

        // Jitter the first beat so many shards reconnecting together don't
        // all heartbeat in lockstep.
        let jitter = (interval_ms as f64 * rand::thread_rng().gen::<f64>()) as u64;
        let heartbeat_handle = tokio::time::interval_at(
            tokio::time::Instant::now() + Duration::from_millis(jitter),
            Duration::from_millis(interval_ms),
        );

        self.phase = SessionPhase::Beating {
            interval_ms,
            heartbeat_handle,
            ack_pending: false,
            send_channel,
            resume,
        };

        Ok(())
    }

    fn on_heartbeat_ack(&mut self) {
        match &mut self.phase {
            SessionPhase::Beating { ack_pending, .. } => *ack_pending = false,
            _ => tracing::debug!(state = self.phase.name(), "HeartbeatAck ignored outside Active state"),
        }
    }

    /// A heartbeat timer tick, or a server-requested immediate heartbeat.
    /// A still-pending ack from the previous tick means the connection is
    /// dead; otherwise sends a heartbeat and marks one pending.
    async fn on_send_heartbeat(&mut self) -> Result<(), GatewayError> {
        let (ack_pending, seq) = match &self.phase {
            SessionPhase::Beating {
                ack_pending,
                resume,
                ..
            } => (*ack_pending, resume.as_ref().map(|r| r.seq)),
            _ => {
                tracing::debug!(state = self.phase.name(), "heartbeat tick ignored outside Active state");
                return Ok(());
            }
        };

        if ack_pending {
            tracing::warn!("missed heartbeat ack, connection considered dead");
            self.transition_to_idle_preserving_resume().await;
            return Ok(());
        }

        self.send_now(GatewaySendPayload::Heartbeat(seq)).await?;

        if let SessionPhase::Beating { ack_pending, .. } = &mut self.phase {
            *ack_pending = true;
        }

        Ok(())
    }

    /// Advances `resume.last_seq`, records fresh resume data on READY,
    /// applies the dispatch to the cache, and publishes the resulting API
    /// message.
    async fn on_dispatch(&mut self, seq: i64, payload: DispatchPayload) {
        match &mut self.phase {
            SessionPhase::Beating { resume, .. } => {
                if let DispatchPayload::Ready(ready) = &payload {
                    *resume = Some(ResumeData {
                        token: self.config.token.clone(),
                        session_id: ready.session_id.clone(),
                        seq,
                    });
                } else if let Some(resume) = resume {
                    resume.seq = seq;
                } else {
                    tracing::warn!(
                        event = payload.event_name(),
                        "dispatch advanced seq with no resume data recorded yet"
                    );
                }
            }
            _ => tracing::debug!(
                state = self.phase.name(),
                event = payload.event_name(),
                "dispatch received outside Active state"
            ),
        }

        let (next_snapshot, message) = Registry::apply(&self.snapshot, &payload);
        self.snapshot = next_snapshot;

        if let Some(message) = message {
            self.bus.publish(message).await;
        }
    }

    /// Active -> Idle, preserving resume data (gateway-initiated
    /// reconnect request).
    async fn on_reconnect(&mut self) {
        tracing::debug!("gateway requested reconnect");
        self.transition_to_idle_preserving_resume().await;
    }

    /// Active -> Idle, clearing resume data so the next connect attempt
    /// sends a fresh Identify.
    async fn on_invalid_session(&mut self, resumable: bool) {
        tracing::debug!(resumable, "invalid session");
        self.close_connection().await;
        self.phase = SessionPhase::Idle { resume: None };
    }

    async fn on_transport_error(&mut self, err: TransportError) {
        tracing::warn!(error = %err, "transport error");
        self.event_handler.transport_error(&err).await;
        self.transition_to_idle_preserving_resume().await;
    }

    pub async fn shutdown(&mut self) {
        tracing::info!("shutdown requested");
        self.close_connection().await;
        self.phase = SessionPhase::Shutdown;
    }

    async fn transition_to_idle_preserving_resume(&mut self) {
        let resume = self.phase.resume().cloned();
        self.close_connection().await;
        self.phase = SessionPhase::Idle { resume };
    }

    async fn close_connection(&mut self) {
        self.outbound_rx = None;
        if let Some(mut connection) = self.connection.take() {
            if let Err(err) = connection.close(None).await {
                tracing::warn!(error = %err, "error closing socket");
            }
        }
    }

    async fn send_now(&mut self, payload: GatewaySendPayload) -> Result<(), GatewayError> {
        let connection = self
            .connection
            .as_mut()
            .ok_or(GatewayError::Transport(TransportError::Closed(None)))?;

        connection
            .send_frame(&payload)
            .await
            .map_err(GatewayError::Transport)
    }

    async fn drain_outbound(&mut self) -> Result<(), GatewayError> {
        loop {
            let next = match &self.outbound_rx {
                Some(rx) => rx.try_recv().ok().flatten(),
                None => None,
            };

            match next {
                Some(payload) => self.send_now(payload).await?,
                None => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_tungstenite::tungstenite::protocol::CloseFrame;
    use embergate_api_types::{GatewayBotObject, GatewayIntentBits, SessionStartLimitObject};

    use super::*;

    fn test_config() -> GatewayConfig {
        GatewayConfig::new("T".into(), 100, 0, 1, 5, GatewayIntentBits::empty()).unwrap()
    }

    /// A socket fake that never actually gets used: `open` always fails, so
    /// it's only valid to pair with a discovery fake that also fails (the
    /// session never reaches the socket-open step), or used as a type
    /// parameter where discovery fails first.
    struct NeverSocket;

    #[async_trait::async_trait]
    impl WebSocketExt for NeverSocket {
        async fn open(_url: &str) -> Result<Self, TransportError> {
            Err(TransportError::Closed(None))
        }
        async fn recv_next(&mut self) -> Result<Option<GatewayEvent>, TransportError> {
            unreachable!("not exercised by discovery-failure tests")
        }
        async fn send_frame(&mut self, _payload: &GatewaySendPayload) -> Result<(), TransportError> {
            unreachable!("not exercised by discovery-failure tests")
        }
        async fn close(&mut self, _info: Option<CloseFrame<'static>>) -> Result<(), TransportError> {
            Ok(())
        }
    }

    /// A socket fake whose `open` always fails, for exercising the
    /// upgrade-rejected branch of `try_connect`.
    struct FailingSocket;

    #[async_trait::async_trait]
    impl WebSocketExt for FailingSocket {
        async fn open(_url: &str) -> Result<Self, TransportError> {
            Err(TransportError::Closed(None))
        }
        async fn recv_next(&mut self) -> Result<Option<GatewayEvent>, TransportError> {
            unreachable!("open always fails before this would be called")
        }
        async fn send_frame(&mut self, _payload: &GatewaySendPayload) -> Result<(), TransportError> {
            unreachable!("open always fails before this would be called")
        }
        async fn close(&mut self, _info: Option<CloseFrame<'static>>) -> Result<(), TransportError> {
            Ok(())
        }
    }

    /// A discovery fake that always fails with a non-2xx status.
    struct FailingDiscovery;

    #[async_trait::async_trait]
    impl GatewayDiscovery for FailingDiscovery {
        async fn get_gateway_bot(&self) -> Result<GatewayBotObject, embergate_rest::DiscoveryError> {
            Err(embergate_rest::DiscoveryError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }

    /// A discovery fake that always succeeds.
    struct SucceedingDiscovery;

    #[async_trait::async_trait]
    impl GatewayDiscovery for SucceedingDiscovery {
        async fn get_gateway_bot(&self) -> Result<GatewayBotObject, embergate_rest::DiscoveryError> {
            Ok(GatewayBotObject {
                url: "wss://gateway.invalid".into(),
                shards: 1,
                session_start_limit: SessionStartLimitObject {
                    total: 1000,
                    remaining: 1000,
                    reset_after: 0,
                    max_concurrency: 1,
                },
            })
        }
    }

    fn beating_session(resume: Option<ResumeData>, ack_pending: bool) -> Session {
        let mut session = Session::new(test_config(), RequestManager::default());
        let (send_channel, _rx) = kanal::bounded_async(OUTBOUND_CAPACITY);
        session.phase = SessionPhase::Beating {
            interval_ms: 1000,
            heartbeat_handle: tokio::time::interval(Duration::from_secs(1000)),
            ack_pending,
            send_channel,
            resume,
        };
        session
    }

    #[test]
    fn heartbeat_ack_clears_pending_flag() {
        let mut session = beating_session(None, true);
        session.on_heartbeat_ack();
        match &session.phase {
            SessionPhase::Beating { ack_pending, .. } => assert!(!ack_pending),
            _ => panic!("expected Active state"),
        }
    }

    #[tokio::test]
    async fn missed_heartbeat_ack_transitions_to_idle_preserving_resume() {
        let resume = Some(ResumeData {
            token: "T".into(),
            session_id: "S".into(),
            seq: 7,
        });
        let mut session = beating_session(resume, true);
        session.on_send_heartbeat().await.unwrap();

        assert_eq!(session.state_name(), "Idle");
        match &session.phase {
            SessionPhase::Idle { resume: Some(r) } => assert_eq!(r.seq, 7),
            _ => panic!("expected Idle with resume preserved"),
        }
    }

    #[tokio::test]
    async fn dispatch_ready_records_resume_data() {
        let mut session = beating_session(None, false);
        let frame = embergate_api_types::decode_frame(
            r#"{"op":0,"s":1,"t":"READY","d":{"v":10,"user":{"id":"U","username":"bot","discriminator":"0001","avatar":null},"session_id":"S"}}"#,
        )
        .unwrap();
        let GatewayEvent::Dispatch(seq, payload) = frame else {
            panic!("expected dispatch");
        };
        session.on_dispatch(seq, payload).await;

        match &session.phase {
            SessionPhase::Beating {
                resume: Some(r), ..
            } => {
                assert_eq!(r.session_id, "S");
                assert_eq!(r.seq, 1);
            }
            _ => panic!("expected resume data recorded from READY"),
        }
        assert!(session.snapshot().bot_user.is_some());
    }

    #[tokio::test]
    async fn dispatch_advances_existing_resume_seq() {
        let resume = Some(ResumeData {
            token: "T".into(),
            session_id: "S".into(),
            seq: 1,
        });
        let mut session = beating_session(resume, false);
        let frame = embergate_api_types::decode_frame(
            r#"{"op":0,"s":7,"t":"GUILD_CREATE","d":{"id":"1","name":"g","owner_id":"2"}}"#,
        )
        .unwrap();
        let GatewayEvent::Dispatch(seq, payload) = frame else {
            panic!("expected dispatch");
        };
        session.on_dispatch(seq, payload).await;

        match &session.phase {
            SessionPhase::Beating {
                resume: Some(r), ..
            } => assert_eq!(r.seq, 7),
            _ => panic!("expected resume seq to advance"),
        }
    }

    #[tokio::test]
    async fn invalid_session_clears_resume() {
        let resume = Some(ResumeData {
            token: "T".into(),
            session_id: "S".into(),
            seq: 7,
        });
        let mut session = beating_session(resume, false);
        session.on_invalid_session(false).await;

        assert_eq!(session.state_name(), "Idle");
        match &session.phase {
            SessionPhase::Idle { resume: None } => {}
            _ => panic!("expected resume data cleared"),
        }
    }

    #[tokio::test]
    async fn reconnect_preserves_resume() {
        let resume = Some(ResumeData {
            token: "T".into(),
            session_id: "S".into(),
            seq: 3,
        });
        let mut session = beating_session(resume, false);
        session.on_reconnect().await;

        assert_eq!(session.state_name(), "Idle");
        match &session.phase {
            SessionPhase::Idle { resume: Some(r) } => assert_eq!(r.seq, 3),
            _ => panic!("expected resume data preserved"),
        }
    }

    #[tokio::test]
    async fn try_connect_discovery_failure_returns_to_idle_preserving_resume() {
        let resume = Some(ResumeData {
            token: "T".into(),
            session_id: "S".into(),
            seq: 9,
        });
        let mut session: Session<NeverSocket, FailingDiscovery> =
            Session::new(test_config(), FailingDiscovery);
        session.phase = SessionPhase::Idle {
            resume: resume.clone(),
        };

        let err = session.try_connect().await.unwrap_err();
        assert!(matches!(err, GatewayError::Discovery(_)));
        match &session.phase {
            SessionPhase::Idle { resume: Some(r) } => assert_eq!(r.seq, 9),
            _ => panic!("expected Idle with resume preserved"),
        }
    }

    #[tokio::test]
    async fn try_connect_transport_failure_returns_to_idle_preserving_resume() {
        let resume = Some(ResumeData {
            token: "T".into(),
            session_id: "S".into(),
            seq: 4,
        });
        let mut session: Session<FailingSocket, SucceedingDiscovery> =
            Session::new(test_config(), SucceedingDiscovery);
        session.phase = SessionPhase::Idle {
            resume: resume.clone(),
        };

        let err = session.try_connect().await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
        match &session.phase {
            SessionPhase::Idle { resume: Some(r) } => assert_eq!(r.seq, 4),
            _ => panic!("expected Idle with resume preserved"),
        }
    }

    #[tokio::test]
    async fn try_connect_terminates_once_reconnect_attempts_exhausted() {
        let config = GatewayConfig::new("T".into(), 100, 0, 1, 1, GatewayIntentBits::empty()).unwrap();
        let mut session: Session<NeverSocket, FailingDiscovery> =
            Session::new(config, FailingDiscovery);

        session.try_connect().await.unwrap_err();
        assert_eq!(session.state_name(), "Idle");

        let err = session.try_connect().await.unwrap_err();
        assert!(matches!(err, GatewayError::ExhaustedReconnects));
        assert_eq!(session.state_name(), "Shutdown");
    }

    #[tokio::test(start_paused = true)]
    async fn run_retries_idle_with_backoff_then_exhausts_reconnects() {
        let config = GatewayConfig::new("T".into(), 100, 0, 1, 2, GatewayIntentBits::empty()).unwrap();
        let mut session: Session<NeverSocket, FailingDiscovery> =
            Session::new(config, FailingDiscovery);

        let result = session.run().await;
        assert!(matches!(result, Err(GatewayError::ExhaustedReconnects)));
        assert_eq!(session.state_name(), "Shutdown");
    }
}
