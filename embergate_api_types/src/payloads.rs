#![allow(non_upper_case_globals)]

use std::env;

use bitflags::bitflags;
use serde::{ser::SerializeStruct, Deserialize, Serialize};
use serde_json::Value;

use crate::{Emoji, Opcode, Role, Snowflake, UnavailableGuild, User};

bitflags! {
    /// Gateway intents the session identifies with.
    ///
    /// [Discord documentation](https://discord.com/developers/docs/topics/gateway#list-of-intents).
    #[derive(Serialize, Deserialize, Default)]
    pub struct GatewayIntentBits: u64 {
        const Guilds = 1 << 0;
        const GuildMembers = 1 << 1;
        const GuildModeration = 1 << 2;
        const GuildEmojisAndStickers = 1 << 3;
        const GuildIntegrations = 1 << 4;
        const GuildWebhooks = 1 << 5;
        const GuildInvites = 1 << 6;
        const GuildVoiceStates = 1 << 7;
        const GuildPresences = 1 << 8;
        const GuildMessages = 1 << 9;
        const GuildMessageReactions = 1 << 10;
        const GuildMessageTyping = 1 << 11;
        const DirectMessages = 1 << 12;
        const DirectMessageReactions = 1 << 13;
        const DirectMessageTyping = 1 << 14;
        const MessageContent = 1 << 15;
    }
}

// ---------------------------------------------------------------------
// Outbound (send) payloads.
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyConnectionProperties {
    #[serde(rename = "$os")]
    pub os: String,

    #[serde(rename = "$browser")]
    pub browser: String,

    #[serde(rename = "$device")]
    pub device: String,

    #[serde(rename = "$referrer", default)]
    pub referrer: String,

    #[serde(rename = "$referring_domain", default)]
    pub referring_domain: String,
}

impl Default for IdentifyConnectionProperties {
    fn default() -> Self {
        let browser = format!("embergate {}", env!("CARGO_PKG_VERSION"));

        Self {
            os: env::consts::OS.into(),
            browser,
            device: "embergate".into(),
            referrer: String::new(),
            referring_domain: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyData {
    pub token: String,

    pub properties: IdentifyConnectionProperties,

    pub compress: bool,

    pub large_threshold: u64,

    pub shard: (u64, u64),

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intents: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeData {
    pub token: String,

    pub session_id: String,

    pub seq: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestGuildMembersData {
    pub guild_id: Snowflake,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    pub limit: u64,
}

/// Everything the session can send on the outbound channel. Serialized
/// without `s`/`t` — only `Dispatch` frames carry those.
#[derive(Debug, Clone)]
pub enum GatewaySendPayload {
    Identify(IdentifyData),
    Resume(ResumeData),
    Heartbeat(Option<i64>),
    RequestGuildMembers(RequestGuildMembersData),
}

impl Serialize for GatewaySendPayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut obj = serializer.serialize_struct("GatewaySendPayload", 2)?;

        match self {
            Self::Identify(d) => {
                obj.serialize_field("op", &(Opcode::Identify as u64))?;
                obj.serialize_field("d", d)?;
            }
            Self::Resume(d) => {
                obj.serialize_field("op", &(Opcode::Resume as u64))?;
                obj.serialize_field("d", d)?;
            }
            Self::Heartbeat(d) => {
                obj.serialize_field("op", &(Opcode::Heartbeat as u64))?;
                obj.serialize_field("d", d)?;
            }
            Self::RequestGuildMembers(d) => {
                obj.serialize_field("op", &(Opcode::RequestGuildMembers as u64))?;
                obj.serialize_field("d", d)?;
            }
        }

        obj.end()
    }
}

// ---------------------------------------------------------------------
// Inbound (receive) dispatch payloads.
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReadyPayload {
    pub v: u8,

    pub user: User,

    #[serde(default)]
    pub guilds: Vec<UnavailableGuild>,

    pub session_id: String,

    #[serde(default)]
    pub resume_gateway_url: Option<String>,

    #[serde(default)]
    pub private_channels: Vec<crate::ChannelPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberPayload {
    pub user: User,

    #[serde(default)]
    pub nick: Option<String>,

    #[serde(default)]
    pub roles: Vec<Snowflake>,

    #[serde(default)]
    pub joined_at: Option<String>,

    #[serde(default)]
    pub deaf: bool,

    #[serde(default)]
    pub mute: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMemberAddPayload {
    pub guild_id: Snowflake,

    #[serde(flatten)]
    pub member: MemberPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMemberRemovePayload {
    pub guild_id: Snowflake,

    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMemberUpdatePayload {
    pub guild_id: Snowflake,

    pub user: User,

    #[serde(default)]
    pub nick: Option<String>,

    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMemberChunkPayload {
    pub guild_id: Snowflake,

    pub members: Vec<MemberPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildCreatePayload {
    pub id: Snowflake,

    pub name: String,

    pub owner_id: Snowflake,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub large: bool,

    #[serde(default)]
    pub member_count: Option<u64>,

    #[serde(default)]
    pub roles: Vec<Role>,

    #[serde(default)]
    pub emojis: Vec<Emoji>,

    #[serde(default)]
    pub channels: Vec<crate::ChannelPayload>,

    #[serde(default)]
    pub members: Vec<MemberPayload>,
}

/// Only the scalar guild fields Discord sends on GUILD_UPDATE — no
/// members/channels/roles, so preserving the untouched collections falls
/// out of this struct's shape rather than requiring a dynamic merge.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildUpdatePayload {
    pub id: Snowflake,

    pub name: String,

    pub owner_id: Snowflake,

    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildDeletePayload {
    pub id: Snowflake,

    #[serde(default)]
    pub unavailable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildEmojisUpdatePayload {
    pub guild_id: Snowflake,

    pub emojis: Vec<Emoji>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildRoleCreateUpdatePayload {
    pub guild_id: Snowflake,

    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildRoleDeletePayload {
    pub guild_id: Snowflake,

    pub role_id: Snowflake,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreatePayload {
    pub id: Snowflake,

    pub channel_id: Snowflake,

    #[serde(default)]
    pub guild_id: Option<Snowflake>,

    pub author: User,

    pub content: String,

    pub timestamp: String,

    #[serde(default)]
    pub edited_timestamp: Option<String>,

    #[serde(default)]
    pub tts: bool,

    #[serde(default)]
    pub mention_everyone: bool,
}

/// MESSAGE_UPDATE is partial: Discord only sends the fields that changed.
/// Every field but the identifying pair is `Option`, and the handler only
/// overwrites a field when it is `Some`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageUpdatePayload {
    pub id: Snowflake,

    pub channel_id: Snowflake,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub edited_timestamp: Option<String>,

    #[serde(default)]
    pub mention_everyone: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDeletePayload {
    pub id: Snowflake,

    pub channel_id: Snowflake,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDeleteBulkPayload {
    pub ids: Vec<Snowflake>,

    pub channel_id: Snowflake,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresenceUpdatePayload {
    pub user: PartialUser,

    pub guild_id: Snowflake,

    pub status: String,

    #[serde(default)]
    pub activities: Vec<Value>,
}

/// Discord only guarantees `id` on the embedded user of a presence update;
/// the rest are present only when they changed.
#[derive(Debug, Clone, Deserialize)]
pub struct PartialUser {
    pub id: Snowflake,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub avatar: Option<String>,
}

/// A dispatch whose decoder exists but whose handler is a documented no-op:
/// TYPING_START, USER_UPDATE, VOICE_STATE_UPDATE, VOICE_SERVER_UPDATE.
#[derive(Debug, Clone, Deserialize)]
pub struct UnhandledPayload {
    #[serde(flatten)]
    pub raw: serde_json::Map<String, Value>,
}
