use std::collections::HashMap;

use embergate_api_types::{DmChannel, GroupDmChannel, Snowflake, UnavailableGuild, User};

use crate::model::{ChannelMessages, Guild, Presence, DEFAULT_MESSAGE_CACHE_SIZE};
use crate::snapshot::Snapshot;

/// Mutable working copy of a `Snapshot`, held by exactly one event handler
/// between construction and finalization. Handlers never mutate a live
/// `Snapshot` directly.
pub struct Builder {
    pub bot_user: Option<User>,

    pub dm_channels: HashMap<Snowflake, DmChannel>,

    pub group_dm_channels: HashMap<Snowflake, GroupDmChannel>,

    pub guilds: HashMap<Snowflake, Guild>,

    pub unavailable_guilds: HashMap<Snowflake, UnavailableGuild>,

    pub users: HashMap<Snowflake, User>,

    pub messages: HashMap<Snowflake, ChannelMessages>,

    pub last_typed: HashMap<Snowflake, HashMap<Snowflake, String>>,

    pub presences: HashMap<Snowflake, HashMap<Snowflake, Presence>>,

    message_cache_size: usize,
}

impl Builder {
    /// Produces an isolated copy of `snapshot` — no aliasing with the
    /// source's interior containers.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            bot_user: snapshot.bot_user.clone(),
            dm_channels: snapshot.dm_channels.clone(),
            group_dm_channels: snapshot.group_dm_channels.clone(),
            guilds: snapshot.guilds.clone(),
            unavailable_guilds: snapshot.unavailable_guilds.clone(),
            users: snapshot.users.clone(),
            messages: snapshot.messages.clone(),
            last_typed: snapshot.last_typed.clone(),
            presences: snapshot.presences.clone(),
            message_cache_size: DEFAULT_MESSAGE_CACHE_SIZE,
        }
    }

    pub fn with_message_cache_size(mut self, size: usize) -> Self {
        self.message_cache_size = size;
        self
    }

    pub fn finalize(self) -> Snapshot {
        Snapshot {
            bot_user: self.bot_user,
            dm_channels: self.dm_channels,
            group_dm_channels: self.group_dm_channels,
            guilds: self.guilds,
            unavailable_guilds: self.unavailable_guilds,
            users: self.users,
            messages: self.messages,
            last_typed: self.last_typed,
            presences: self.presences,
        }
    }

    pub fn messages_for_mut(&mut self, channel_id: &Snowflake) -> &mut ChannelMessages {
        self.messages
            .entry(channel_id.clone())
            .or_insert_with(|| ChannelMessages::new(self.message_cache_size))
    }

    /// Moves a guild id between the mutually exclusive `guilds` and
    /// `unavailable_guilds` maps, upholding the at-most-one-collection
    /// invariant on a Snowflake.
    pub fn mark_guild_unavailable(&mut self, id: &Snowflake) {
        self.guilds.remove(id);
        self.unavailable_guilds.insert(
            id.clone(),
            UnavailableGuild {
                id: id.clone(),
                unavailable: true,
            },
        );
    }

    pub fn mark_guild_available(&mut self, id: &Snowflake) {
        self.unavailable_guilds.remove(id);
    }
}
