use std::collections::HashMap;

use embergate_api_types::{DmChannel, GroupDmChannel, Snowflake, UnavailableGuild, User};

use crate::model::{ChannelMessages, Guild, Presence};

/// Immutable, point-in-time view of all cached server-side state. Readers
/// see a consistent whole-snapshot view — there is no partial observable
/// state.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub bot_user: Option<User>,

    pub dm_channels: HashMap<Snowflake, DmChannel>,

    pub group_dm_channels: HashMap<Snowflake, GroupDmChannel>,

    pub guilds: HashMap<Snowflake, Guild>,

    pub unavailable_guilds: HashMap<Snowflake, UnavailableGuild>,

    pub users: HashMap<Snowflake, User>,

    pub messages: HashMap<Snowflake, ChannelMessages>,

    pub last_typed: HashMap<Snowflake, HashMap<Snowflake, String>>,

    pub presences: HashMap<Snowflake, HashMap<Snowflake, Presence>>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get_guild_channel(&self, channel_id: &Snowflake) -> Option<&embergate_api_types::GuildChannel> {
        self.guilds
            .values()
            .find_map(|guild| guild.channels.get(channel_id))
    }

    pub fn get_message(&self, channel_id: &Snowflake, message_id: &Snowflake) -> Option<&crate::model::Message> {
        self.messages.get(channel_id)?.get(message_id)
    }
}
