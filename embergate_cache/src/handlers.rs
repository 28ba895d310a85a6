use embergate_api_types::{
    ChannelPayload, ClassifiedChannel, DispatchPayload, GuildCreatePayload, GuildDeletePayload,
    GuildEmojisUpdatePayload, GuildMemberAddPayload, GuildMemberChunkPayload,
    GuildMemberRemovePayload, GuildMemberUpdatePayload, GuildRoleCreateUpdatePayload,
    GuildRoleDeletePayload, GuildUpdatePayload, MemberPayload, MessageCreatePayload,
    MessageDeleteBulkPayload, MessageDeletePayload, MessageUpdatePayload, PresenceUpdatePayload,
    ReadyPayload,
};

use crate::builder::Builder;
use crate::model::{Guild, Member, Message, Presence};

fn member_from_payload(payload: MemberPayload) -> (Member, embergate_api_types::User) {
    (
        Member {
            user_id: payload.user.id.clone(),
            nick: payload.nick,
            roles: payload.roles,
            joined_at: payload.joined_at,
            deaf: payload.deaf,
            mute: payload.mute,
        },
        payload.user,
    )
}

pub fn on_ready(builder: &mut Builder, payload: &ReadyPayload) {
    builder.bot_user = Some(payload.user.clone());

    for channel in payload.private_channels.clone() {
        match channel.classify() {
            ClassifiedChannel::Dm(dm, user) => {
                builder.users.insert(user.id.clone(), user);
                builder.dm_channels.insert(dm.id.clone(), dm);
            }
            ClassifiedChannel::Group(group) => {
                builder.group_dm_channels.insert(group.id.clone(), group);
            }
            ClassifiedChannel::Guild(_) => {}
        }
    }

    for guild in &payload.guilds {
        builder.unavailable_guilds.insert(guild.id.clone(), guild.clone());
    }
}

pub fn on_resumed(_builder: &mut Builder) {}

fn insert_channel(builder: &mut Builder, payload: ChannelPayload) {
    match payload.classify() {
        ClassifiedChannel::Guild(channel) => {
            if let Some(guild) = builder.guilds.get_mut(&channel.guild_id) {
                guild.channels.insert(channel.id.clone(), channel);
            }
        }
        ClassifiedChannel::Dm(dm, user) => {
            builder.users.insert(user.id.clone(), user);
            builder.dm_channels.insert(dm.id.clone(), dm);
        }
        ClassifiedChannel::Group(group) => {
            builder.group_dm_channels.insert(group.id.clone(), group);
        }
    }
}

pub fn on_channel_create(builder: &mut Builder, payload: &ChannelPayload) {
    insert_channel(builder, payload.clone());
}

pub fn on_channel_update(builder: &mut Builder, payload: &ChannelPayload) {
    insert_channel(builder, payload.clone());
}

pub fn on_channel_delete(builder: &mut Builder, payload: &ChannelPayload) {
    match payload.clone().classify() {
        ClassifiedChannel::Guild(channel) => {
            if let Some(guild) = builder.guilds.get_mut(&channel.guild_id) {
                guild.channels.remove(&channel.id);
            }
        }
        ClassifiedChannel::Dm(dm, _) => {
            builder.dm_channels.remove(&dm.id);
        }
        ClassifiedChannel::Group(group) => {
            builder.group_dm_channels.remove(&group.id);
        }
    }
}

pub fn on_guild_create(builder: &mut Builder, payload: &GuildCreatePayload) {
    let mut channels = std::collections::HashMap::new();
    for channel in payload.channels.clone() {
        if let ClassifiedChannel::Guild(c) = channel.classify() {
            channels.insert(c.id.clone(), c);
        }
    }

    let mut members = std::collections::HashMap::new();
    for member_payload in payload.members.clone() {
        let (member, user) = member_from_payload(member_payload);
        builder.users.insert(user.id.clone(), user.clone());
        members.insert(user.id, member);
    }

    let roles = payload
        .roles
        .iter()
        .cloned()
        .map(|r| (r.id.clone(), r))
        .collect();

    builder.guilds.insert(
        payload.id.clone(),
        Guild {
            id: payload.id.clone(),
            name: payload.name.clone(),
            owner_id: payload.owner_id.clone(),
            icon: payload.icon.clone(),
            large: payload.large,
            member_count: payload.member_count,
            roles,
            emojis: payload.emojis.clone(),
            channels,
            members,
        },
    );
    builder.mark_guild_available(&payload.id);
}

pub fn on_guild_update(builder: &mut Builder, payload: &GuildUpdatePayload) {
    if let Some(guild) = builder.guilds.get_mut(&payload.id) {
        guild.name = payload.name.clone();
        guild.owner_id = payload.owner_id.clone();
        guild.icon = payload.icon.clone();
    }
}

pub fn on_guild_delete(builder: &mut Builder, payload: &GuildDeletePayload) {
    if payload.unavailable {
        builder.mark_guild_unavailable(&payload.id);
    } else {
        builder.guilds.remove(&payload.id);
        builder.unavailable_guilds.remove(&payload.id);
    }
}

pub fn on_guild_emojis_update(builder: &mut Builder, payload: &GuildEmojisUpdatePayload) {
    if let Some(guild) = builder.guilds.get_mut(&payload.guild_id) {
        guild.emojis = payload.emojis.clone();
    }
}

pub fn on_guild_member_add(builder: &mut Builder, payload: &GuildMemberAddPayload) {
    let (member, user) = member_from_payload(payload.member.clone());
    builder.users.insert(user.id.clone(), user.clone());

    if let Some(guild) = builder.guilds.get_mut(&payload.guild_id) {
        guild.members.insert(user.id, member);
    }
}

pub fn on_guild_member_remove(builder: &mut Builder, payload: &GuildMemberRemovePayload) {
    if let Some(guild) = builder.guilds.get_mut(&payload.guild_id) {
        guild.members.remove(&payload.user.id);
    }
}

pub fn on_guild_member_update(builder: &mut Builder, payload: &GuildMemberUpdatePayload) {
    builder.users.insert(payload.user.id.clone(), payload.user.clone());

    if let Some(guild) = builder.guilds.get_mut(&payload.guild_id) {
        let entry = guild
            .members
            .entry(payload.user.id.clone())
            .or_insert_with(|| Member {
                user_id: payload.user.id.clone(),
                nick: None,
                roles: Vec::new(),
                joined_at: None,
                deaf: false,
                mute: false,
            });
        entry.nick = payload.nick.clone();
        entry.roles = payload.roles.clone();
    }
}

pub fn on_guild_member_chunk(builder: &mut Builder, payload: &GuildMemberChunkPayload) {
    let Some(guild) = builder.guilds.get_mut(&payload.guild_id) else {
        return;
    };

    let mut inserted_users = Vec::with_capacity(payload.members.len());
    for member_payload in payload.members.clone() {
        let (member, user) = member_from_payload(member_payload);
        inserted_users.push(user.clone());
        guild.members.insert(user.id.clone(), member);
    }

    for user in inserted_users {
        builder.users.insert(user.id.clone(), user);
    }
}

pub fn on_guild_role_create_or_update(builder: &mut Builder, payload: &GuildRoleCreateUpdatePayload) {
    if let Some(guild) = builder.guilds.get_mut(&payload.guild_id) {
        guild.roles.insert(payload.role.id.clone(), payload.role.clone());
    }
}

pub fn on_guild_role_delete(builder: &mut Builder, payload: &GuildRoleDeletePayload) {
    if let Some(guild) = builder.guilds.get_mut(&payload.guild_id) {
        guild.roles.remove(&payload.role_id);
    }
}

pub fn on_message_create(builder: &mut Builder, payload: &MessageCreatePayload) {
    builder.users.insert(payload.author.id.clone(), payload.author.clone());

    let message = Message {
        id: payload.id.clone(),
        channel_id: payload.channel_id.clone(),
        guild_id: payload.guild_id.clone(),
        author_id: payload.author.id.clone(),
        content: payload.content.clone(),
        timestamp: payload.timestamp.clone(),
        edited_timestamp: payload.edited_timestamp.clone(),
        tts: payload.tts,
        mention_everyone: payload.mention_everyone,
    };

    builder.messages_for_mut(&payload.channel_id).insert(message);
}

pub fn on_message_update(builder: &mut Builder, payload: &MessageUpdatePayload) {
    let Some(message) = builder
        .messages
        .get_mut(&payload.channel_id)
        .and_then(|channel| channel.get_mut(&payload.id))
    else {
        tracing::debug!(channel_id = %payload.channel_id, message_id = %payload.id, "MESSAGE_UPDATE for uncached message");
        return;
    };

    if let Some(content) = &payload.content {
        message.content = content.clone();
    }
    if let Some(edited_timestamp) = &payload.edited_timestamp {
        message.edited_timestamp = Some(edited_timestamp.clone());
    }
    if let Some(mention_everyone) = payload.mention_everyone {
        message.mention_everyone = mention_everyone;
    }
}

pub fn on_message_delete(builder: &mut Builder, payload: &MessageDeletePayload) {
    if let Some(channel) = builder.messages.get_mut(&payload.channel_id) {
        channel.remove(&payload.id);
    }
}

pub fn on_message_delete_bulk(builder: &mut Builder, payload: &MessageDeleteBulkPayload) {
    if let Some(channel) = builder.messages.get_mut(&payload.channel_id) {
        for id in &payload.ids {
            channel.remove(id);
        }
    }
}

pub fn on_presence_update(builder: &mut Builder, payload: &PresenceUpdatePayload) {
    if let Some(user) = builder.users.get_mut(&payload.user.id) {
        if let Some(username) = &payload.user.username {
            user.username = username.clone();
        }
        if payload.user.avatar.is_some() {
            user.avatar = payload.user.avatar.clone();
        }
    }

    builder
        .presences
        .entry(payload.guild_id.clone())
        .or_default()
        .insert(
            payload.user.id.clone(),
            Presence {
                user_id: payload.user.id.clone(),
                guild_id: payload.guild_id.clone(),
                status: payload.status.clone(),
                activities: payload.activities.clone(),
            },
        );
}

/// Applies one decoded dispatch to the builder. Dispositions not listed in
/// the registry's stateful set — TYPING_START, USER_UPDATE,
/// VOICE_STATE_UPDATE, VOICE_SERVER_UPDATE, and unknown event names — are
/// logged and otherwise ignored.
pub fn apply_dispatch(builder: &mut Builder, payload: &DispatchPayload) {
    match payload {
        DispatchPayload::Ready(p) => on_ready(builder, p),
        DispatchPayload::Resumed => on_resumed(builder),
        DispatchPayload::ChannelCreate(p) => on_channel_create(builder, p),
        DispatchPayload::ChannelUpdate(p) => on_channel_update(builder, p),
        DispatchPayload::ChannelDelete(p) => on_channel_delete(builder, p),
        DispatchPayload::GuildCreate(p) => on_guild_create(builder, p),
        DispatchPayload::GuildUpdate(p) => on_guild_update(builder, p),
        DispatchPayload::GuildDelete(p) => on_guild_delete(builder, p),
        DispatchPayload::GuildEmojisUpdate(p) => on_guild_emojis_update(builder, p),
        DispatchPayload::GuildMemberAdd(p) => on_guild_member_add(builder, p),
        DispatchPayload::GuildMemberRemove(p) => on_guild_member_remove(builder, p),
        DispatchPayload::GuildMemberUpdate(p) => on_guild_member_update(builder, p),
        DispatchPayload::GuildMemberChunk(p) => on_guild_member_chunk(builder, p),
        DispatchPayload::GuildRoleCreate(p) => on_guild_role_create_or_update(builder, p),
        DispatchPayload::GuildRoleUpdate(p) => on_guild_role_create_or_update(builder, p),
        DispatchPayload::GuildRoleDelete(p) => on_guild_role_delete(builder, p),
        DispatchPayload::MessageCreate(p) => on_message_create(builder, p),
        DispatchPayload::MessageUpdate(p) => on_message_update(builder, p),
        DispatchPayload::MessageDelete(p) => on_message_delete(builder, p),
        DispatchPayload::MessageDeleteBulk(p) => on_message_delete_bulk(builder, p),
        DispatchPayload::PresenceUpdate(p) => on_presence_update(builder, p),
        DispatchPayload::GuildBanAdd(_)
        | DispatchPayload::GuildBanRemove(_)
        | DispatchPayload::GuildIntegrationsUpdate(_)
        | DispatchPayload::TypingStart(_)
        | DispatchPayload::UserUpdate(_)
        | DispatchPayload::VoiceStateUpdate(_)
        | DispatchPayload::VoiceServerUpdate(_) => {
            tracing::warn!(event = payload.event_name(), "dispatch has no cache handler yet");
        }
        DispatchPayload::Unknown(name, _) => {
            tracing::warn!(event = %name, "unknown dispatch event name, dropping");
        }
    }
}
