use std::sync::Arc;

use embergate_api_types::{DispatchPayload, Snowflake};

use crate::snapshot::Snapshot;

/// A high-level "something happened" message, one variant per dispatch
/// event family the registry marks Stateful or Acknowledged-only.
/// Carries references into the snapshot pair so consumers can resolve the
/// entities involved without re-walking the payload.
#[derive(Debug, Clone)]
pub enum ApiMessage {
    Ready { snapshot: Arc<Snapshot> },
    Resumed,
    ChannelCreate { curr: Arc<Snapshot>, channel_id: Snowflake },
    ChannelUpdate { prev: Arc<Snapshot>, curr: Arc<Snapshot>, channel_id: Snowflake },
    ChannelDelete { prev: Arc<Snapshot>, curr: Arc<Snapshot>, channel_id: Snowflake },
    GuildCreate { curr: Arc<Snapshot>, guild_id: Snowflake },
    GuildUpdate { prev: Arc<Snapshot>, curr: Arc<Snapshot>, guild_id: Snowflake },
    GuildDelete { prev: Arc<Snapshot>, curr: Arc<Snapshot>, guild_id: Snowflake },
    GuildEmojisUpdate { curr: Arc<Snapshot>, guild_id: Snowflake },
    GuildMemberAdd { curr: Arc<Snapshot>, guild_id: Snowflake, user_id: Snowflake },
    GuildMemberRemove { prev: Arc<Snapshot>, curr: Arc<Snapshot>, guild_id: Snowflake, user_id: Snowflake },
    GuildMemberUpdate { curr: Arc<Snapshot>, guild_id: Snowflake, user_id: Snowflake },
    GuildMemberChunk { curr: Arc<Snapshot>, guild_id: Snowflake, count: usize },
    GuildRoleCreate { curr: Arc<Snapshot>, guild_id: Snowflake, role_id: Snowflake },
    GuildRoleUpdate { curr: Arc<Snapshot>, guild_id: Snowflake, role_id: Snowflake },
    GuildRoleDelete { prev: Arc<Snapshot>, curr: Arc<Snapshot>, guild_id: Snowflake, role_id: Snowflake },
    MessageCreate { curr: Arc<Snapshot>, channel_id: Snowflake, message_id: Snowflake },
    MessageUpdate { curr: Arc<Snapshot>, channel_id: Snowflake, message_id: Snowflake },
    MessageDelete { prev: Arc<Snapshot>, curr: Arc<Snapshot>, channel_id: Snowflake, message_id: Snowflake },
    MessageDeleteBulk { prev: Arc<Snapshot>, curr: Arc<Snapshot>, channel_id: Snowflake, message_ids: Vec<Snowflake> },
    PresenceUpdate { curr: Arc<Snapshot>, guild_id: Snowflake, user_id: Snowflake },
}

/// Builds the API message for one applied dispatch, given the snapshot
/// pair that straddles it. Returns `None` when the referenced entity is
/// not in the snapshot — a recoverable event-ordering case, not an error —
/// or when the event carries no API-visible consequence (RESUMED, or a
/// not-yet-implemented/unknown event).
pub fn build_api_message(
    payload: &DispatchPayload,
    prev: &Arc<Snapshot>,
    curr: &Arc<Snapshot>,
) -> Option<ApiMessage> {
    match payload {
        DispatchPayload::Ready(_) => Some(ApiMessage::Ready { snapshot: curr.clone() }),
        DispatchPayload::Resumed => Some(ApiMessage::Resumed),
        DispatchPayload::ChannelCreate(p) => Some(ApiMessage::ChannelCreate {
            curr: curr.clone(),
            channel_id: p.id.clone(),
        }),
        DispatchPayload::ChannelUpdate(p) => Some(ApiMessage::ChannelUpdate {
            prev: prev.clone(),
            curr: curr.clone(),
            channel_id: p.id.clone(),
        }),
        DispatchPayload::ChannelDelete(p) => {
            prev.get_guild_channel(&p.id)?;
            Some(ApiMessage::ChannelDelete {
                prev: prev.clone(),
                curr: curr.clone(),
                channel_id: p.id.clone(),
            })
        }
        DispatchPayload::GuildCreate(p) => Some(ApiMessage::GuildCreate {
            curr: curr.clone(),
            guild_id: p.id.clone(),
        }),
        DispatchPayload::GuildUpdate(p) => {
            curr.guilds.get(&p.id)?;
            Some(ApiMessage::GuildUpdate {
                prev: prev.clone(),
                curr: curr.clone(),
                guild_id: p.id.clone(),
            })
        }
        DispatchPayload::GuildDelete(p) => Some(ApiMessage::GuildDelete {
            prev: prev.clone(),
            curr: curr.clone(),
            guild_id: p.id.clone(),
        }),
        DispatchPayload::GuildEmojisUpdate(p) => {
            curr.guilds.get(&p.guild_id)?;
            Some(ApiMessage::GuildEmojisUpdate {
                curr: curr.clone(),
                guild_id: p.guild_id.clone(),
            })
        }
        DispatchPayload::GuildMemberAdd(p) => Some(ApiMessage::GuildMemberAdd {
            curr: curr.clone(),
            guild_id: p.guild_id.clone(),
            user_id: p.member.user.id.clone(),
        }),
        DispatchPayload::GuildMemberRemove(p) => Some(ApiMessage::GuildMemberRemove {
            prev: prev.clone(),
            curr: curr.clone(),
            guild_id: p.guild_id.clone(),
            user_id: p.user.id.clone(),
        }),
        DispatchPayload::GuildMemberUpdate(p) => Some(ApiMessage::GuildMemberUpdate {
            curr: curr.clone(),
            guild_id: p.guild_id.clone(),
            user_id: p.user.id.clone(),
        }),
        DispatchPayload::GuildMemberChunk(p) => Some(ApiMessage::GuildMemberChunk {
            curr: curr.clone(),
            guild_id: p.guild_id.clone(),
            count: p.members.len(),
        }),
        DispatchPayload::GuildRoleCreate(p) => Some(ApiMessage::GuildRoleCreate {
            curr: curr.clone(),
            guild_id: p.guild_id.clone(),
            role_id: p.role.id.clone(),
        }),
        DispatchPayload::GuildRoleUpdate(p) => Some(ApiMessage::GuildRoleUpdate {
            curr: curr.clone(),
            guild_id: p.guild_id.clone(),
            role_id: p.role.id.clone(),
        }),
        DispatchPayload::GuildRoleDelete(p) => Some(ApiMessage::GuildRoleDelete {
            prev: prev.clone(),
            curr: curr.clone(),
            guild_id: p.guild_id.clone(),
            role_id: p.role_id.clone(),
        }),
        DispatchPayload::MessageCreate(p) => Some(ApiMessage::MessageCreate {
            curr: curr.clone(),
            channel_id: p.channel_id.clone(),
            message_id: p.id.clone(),
        }),
        DispatchPayload::MessageUpdate(p) => {
            curr.get_message(&p.channel_id, &p.id)?;
            Some(ApiMessage::MessageUpdate {
                curr: curr.clone(),
                channel_id: p.channel_id.clone(),
                message_id: p.id.clone(),
            })
        }
        DispatchPayload::MessageDelete(p) => {
            prev.get_message(&p.channel_id, &p.id)?;
            Some(ApiMessage::MessageDelete {
                prev: prev.clone(),
                curr: curr.clone(),
                channel_id: p.channel_id.clone(),
                message_id: p.id.clone(),
            })
        }
        DispatchPayload::MessageDeleteBulk(p) => Some(ApiMessage::MessageDeleteBulk {
            prev: prev.clone(),
            curr: curr.clone(),
            channel_id: p.channel_id.clone(),
            message_ids: p.ids.clone(),
        }),
        DispatchPayload::PresenceUpdate(p) => Some(ApiMessage::PresenceUpdate {
            curr: curr.clone(),
            guild_id: p.guild_id.clone(),
            user_id: p.user.id.clone(),
        }),
        DispatchPayload::GuildBanAdd(_)
        | DispatchPayload::GuildBanRemove(_)
        | DispatchPayload::GuildIntegrationsUpdate(_)
        | DispatchPayload::TypingStart(_)
        | DispatchPayload::UserUpdate(_)
        | DispatchPayload::VoiceStateUpdate(_)
        | DispatchPayload::VoiceServerUpdate(_)
        | DispatchPayload::Unknown(_, _) => None,
    }
}
