use std::str::FromStr;

use num_traits::FromPrimitive;
use serde_json::Value;

use crate::{
    ChannelPayload, DecodeError, DispatchEvent, GatewaySendPayload, GuildCreatePayload,
    GuildDeletePayload, GuildEmojisUpdatePayload, GuildMemberAddPayload, GuildMemberChunkPayload,
    GuildMemberRemovePayload, GuildMemberUpdatePayload, GuildRoleCreateUpdatePayload,
    GuildRoleDeletePayload, GuildUpdatePayload, MessageCreatePayload, MessageDeleteBulkPayload,
    MessageDeletePayload, MessageUpdatePayload, Opcode, PresenceUpdatePayload, ReadyPayload,
    UnhandledPayload,
};

type JsonMap = serde_json::Map<String, Value>;

/// A typed, already-decoded non-dispatch gateway event, plus `Dispatch`
/// carrying its sequence number and typed payload.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    Hello(u64),
    HeartbeatRequest,
    HeartbeatAck,
    InvalidSession(bool),
    Reconnect,
    Dispatch(i64, DispatchPayload),
}

/// The closed catalog of decoded dispatch payloads. `Unknown` is the
/// recoverable fallback for event names Discord may add in the future, or
/// for ones this core does not yet act on.
#[derive(Debug, Clone)]
pub enum DispatchPayload {
    Ready(ReadyPayload),
    Resumed,
    ChannelCreate(ChannelPayload),
    ChannelUpdate(ChannelPayload),
    ChannelDelete(ChannelPayload),
    GuildCreate(GuildCreatePayload),
    GuildUpdate(GuildUpdatePayload),
    GuildDelete(GuildDeletePayload),
    GuildBanAdd(UnhandledPayload),
    GuildBanRemove(UnhandledPayload),
    GuildEmojisUpdate(GuildEmojisUpdatePayload),
    GuildIntegrationsUpdate(UnhandledPayload),
    GuildMemberAdd(GuildMemberAddPayload),
    GuildMemberRemove(GuildMemberRemovePayload),
    GuildMemberUpdate(GuildMemberUpdatePayload),
    GuildMemberChunk(GuildMemberChunkPayload),
    GuildRoleCreate(GuildRoleCreateUpdatePayload),
    GuildRoleUpdate(GuildRoleCreateUpdatePayload),
    GuildRoleDelete(GuildRoleDeletePayload),
    MessageCreate(MessageCreatePayload),
    MessageUpdate(MessageUpdatePayload),
    MessageDelete(MessageDeletePayload),
    MessageDeleteBulk(MessageDeleteBulkPayload),
    PresenceUpdate(PresenceUpdatePayload),
    TypingStart(UnhandledPayload),
    UserUpdate(UnhandledPayload),
    VoiceStateUpdate(UnhandledPayload),
    VoiceServerUpdate(UnhandledPayload),
    Unknown(String, JsonMap),
}

impl DispatchPayload {
    /// Decodes `d` according to the event name `t`. Unknown event names are
    /// not an error: they decode into `Unknown` so the registry can drop
    /// them with a warning.
    fn decode(event_name: &str, d: Value) -> Result<Self, DecodeError> {
        let raw = as_object(d.clone())?;

        let Ok(event) = DispatchEvent::from_str(event_name) else {
            return Ok(Self::Unknown(event_name.to_owned(), raw));
        };

        let schema_err = |field: &'static str| move |_| DecodeError::SchemaMismatch(field);

        Ok(match event {
            DispatchEvent::Ready => {
                Self::Ready(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::Resumed => Self::Resumed,
            DispatchEvent::ChannelCreate => {
                Self::ChannelCreate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::ChannelUpdate => {
                Self::ChannelUpdate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::ChannelDelete => {
                Self::ChannelDelete(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildCreate => {
                Self::GuildCreate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildUpdate => {
                Self::GuildUpdate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildDelete => {
                Self::GuildDelete(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildBanAdd => Self::GuildBanAdd(UnhandledPayload { raw }),
            DispatchEvent::GuildBanRemove => Self::GuildBanRemove(UnhandledPayload { raw }),
            DispatchEvent::GuildEmojisUpdate => {
                Self::GuildEmojisUpdate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildIntegrationsUpdate => {
                Self::GuildIntegrationsUpdate(UnhandledPayload { raw })
            }
            DispatchEvent::GuildMemberAdd => {
                Self::GuildMemberAdd(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildMemberRemove => {
                Self::GuildMemberRemove(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildMemberUpdate => {
                Self::GuildMemberUpdate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildMemberChunk => {
                Self::GuildMemberChunk(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildRoleCreate => {
                Self::GuildRoleCreate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildRoleUpdate => {
                Self::GuildRoleUpdate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::GuildRoleDelete => {
                Self::GuildRoleDelete(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::MessageCreate => {
                Self::MessageCreate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::MessageUpdate => {
                Self::MessageUpdate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::MessageDelete => {
                Self::MessageDelete(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::MessageDeleteBulk => {
                Self::MessageDeleteBulk(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::PresenceUpdate => {
                Self::PresenceUpdate(serde_json::from_value(d).map_err(schema_err("d"))?)
            }
            DispatchEvent::TypingStart => Self::TypingStart(UnhandledPayload { raw }),
            DispatchEvent::UserUpdate => Self::UserUpdate(UnhandledPayload { raw }),
            DispatchEvent::VoiceStateUpdate => Self::VoiceStateUpdate(UnhandledPayload { raw }),
            DispatchEvent::VoiceServerUpdate => Self::VoiceServerUpdate(UnhandledPayload { raw }),
        })
    }

    /// The event name this payload decoded from, for logging and for the
    /// API message factory dispatch table.
    pub fn event_name(&self) -> &str {
        match self {
            Self::Ready(_) => "READY",
            Self::Resumed => "RESUMED",
            Self::ChannelCreate(_) => "CHANNEL_CREATE",
            Self::ChannelUpdate(_) => "CHANNEL_UPDATE",
            Self::ChannelDelete(_) => "CHANNEL_DELETE",
            Self::GuildCreate(_) => "GUILD_CREATE",
            Self::GuildUpdate(_) => "GUILD_UPDATE",
            Self::GuildDelete(_) => "GUILD_DELETE",
            Self::GuildBanAdd(_) => "GUILD_BAN_ADD",
            Self::GuildBanRemove(_) => "GUILD_BAN_REMOVE",
            Self::GuildEmojisUpdate(_) => "GUILD_EMOJIS_UPDATE",
            Self::GuildIntegrationsUpdate(_) => "GUILD_INTEGRATIONS_UPDATE",
            Self::GuildMemberAdd(_) => "GUILD_MEMBER_ADD",
            Self::GuildMemberRemove(_) => "GUILD_MEMBER_REMOVE",
            Self::GuildMemberUpdate(_) => "GUILD_MEMBER_UPDATE",
            Self::GuildMemberChunk(_) => "GUILD_MEMBER_CHUNK",
            Self::GuildRoleCreate(_) => "GUILD_ROLE_CREATE",
            Self::GuildRoleUpdate(_) => "GUILD_ROLE_UPDATE",
            Self::GuildRoleDelete(_) => "GUILD_ROLE_DELETE",
            Self::MessageCreate(_) => "MESSAGE_CREATE",
            Self::MessageUpdate(_) => "MESSAGE_UPDATE",
            Self::MessageDelete(_) => "MESSAGE_DELETE",
            Self::MessageDeleteBulk(_) => "MESSAGE_DELETE_BULK",
            Self::PresenceUpdate(_) => "PRESENCE_UPDATE",
            Self::TypingStart(_) => "TYPING_START",
            Self::UserUpdate(_) => "USER_UPDATE",
            Self::VoiceStateUpdate(_) => "VOICE_STATE_UPDATE",
            Self::VoiceServerUpdate(_) => "VOICE_SERVER_UPDATE",
            Self::Unknown(name, _) => name,
        }
    }
}

fn as_object(value: Value) -> Result<JsonMap, DecodeError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonMap::new()),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Decodes a single gateway text frame. Decode failures are always
/// recoverable: the caller logs and drops the frame rather than tearing
/// down the session.
pub fn decode_frame(text: &str) -> Result<GatewayEvent, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(|_| DecodeError::NotAnObject)?;
    let mut map = as_object(value)?;

    let op_raw: u64 = field!(map, "op");
    let opcode = Opcode::from_u64(op_raw).ok_or(DecodeError::UnknownOpcode(op_raw))?;

    let s = map.remove("s").and_then(|v| v.as_i64());
    let t = map
        .remove("t")
        .and_then(|v| v.as_str().map(ToOwned::to_owned));
    let d = map.remove("d").unwrap_or(Value::Null);
    let has_envelope = s.is_some() || t.is_some();

    match opcode {
        Opcode::Hello if has_envelope => Err(DecodeError::NonDispatchHasEnvelope),
        Opcode::Hello => {
            let mut d_map = as_object(d)?;
            Ok(GatewayEvent::Hello(field!(d_map, "heartbeat_interval")))
        }
        Opcode::Heartbeat if has_envelope => Err(DecodeError::NonDispatchHasEnvelope),
        Opcode::Heartbeat => Ok(GatewayEvent::HeartbeatRequest),
        Opcode::HeartbeatAck if has_envelope => Err(DecodeError::NonDispatchHasEnvelope),
        Opcode::HeartbeatAck => Ok(GatewayEvent::HeartbeatAck),
        Opcode::InvalidSession if has_envelope => Err(DecodeError::NonDispatchHasEnvelope),
        Opcode::InvalidSession => Ok(GatewayEvent::InvalidSession(d.as_bool().unwrap_or(false))),
        Opcode::Reconnect if has_envelope => Err(DecodeError::NonDispatchHasEnvelope),
        Opcode::Reconnect => Ok(GatewayEvent::Reconnect),
        Opcode::Dispatch => {
            let seq = s.ok_or(DecodeError::DispatchMissingEnvelope)?;
            let event_name = t.ok_or(DecodeError::DispatchMissingEnvelope)?;

            Ok(GatewayEvent::Dispatch(
                seq,
                DispatchPayload::decode(&event_name, d)?,
            ))
        }
        Opcode::Identify
        | Opcode::StatusUpdate
        | Opcode::VoiceStateUpdate
        | Opcode::VoiceServerPing
        | Opcode::Resume
        | Opcode::RequestGuildMembers => Err(DecodeError::UnknownOpcode(op_raw)),
    }
}

/// Encodes an outbound frame: a single JSON object, never carrying `s`/`t`.
pub fn encode_frame(payload: &GatewaySendPayload) -> Result<String, serde_json::Error> {
    serde_json::to_string(payload)
}
