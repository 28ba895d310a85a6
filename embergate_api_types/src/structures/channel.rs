use serde::{Deserialize, Serialize};

use crate::{Snowflake, User};

/// The subset of Discord channel types this core distinguishes when routing
/// a decoded channel payload into `dm_channels`, `group_dm_channels`, or a
/// guild's channel map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ChannelType {
    GuildText,
    Dm,
    GuildVoice,
    GroupDm,
    GuildCategory,
    GuildAnnouncement,
    Other(u8),
}

impl From<u8> for ChannelType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Dm,
            2 => Self::GuildVoice,
            3 => Self::GroupDm,
            4 => Self::GuildCategory,
            5 => Self::GuildAnnouncement,
            other => Self::Other(other),
        }
    }
}

impl From<ChannelType> for u8 {
    fn from(value: ChannelType) -> Self {
        match value {
            ChannelType::GuildText => 0,
            ChannelType::Dm => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::GroupDm => 3,
            ChannelType::GuildCategory => 4,
            ChannelType::GuildAnnouncement => 5,
            ChannelType::Other(other) => other,
        }
    }
}

/// A channel belonging to a guild. Inserted/replaced wholesale and attached
/// to the owning guild's channel map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildChannel {
    pub id: Snowflake,

    pub guild_id: Snowflake,

    #[serde(rename = "type")]
    pub kind: ChannelType,

    pub name: Option<String>,

    #[serde(default)]
    pub position: i64,

    pub parent_id: Option<Snowflake>,

    #[serde(default)]
    pub topic: Option<String>,
}

/// A one-to-one direct message channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmChannel {
    pub id: Snowflake,

    pub recipient_id: Snowflake,

    #[serde(default)]
    pub last_message_id: Option<Snowflake>,
}

/// A multi-recipient direct message channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDmChannel {
    pub id: Snowflake,

    pub name: Option<String>,

    pub recipients: Vec<Snowflake>,

    pub owner_id: Option<Snowflake>,

    #[serde(default)]
    pub last_message_id: Option<Snowflake>,
}

/// The raw wire shape shared by CHANNEL_CREATE/UPDATE/DELETE. `classify`
/// resolves it into the concrete cache entry the handler should insert,
/// mirroring Discord's practice of sending one channel object shape for
/// every channel kind.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelPayload {
    pub id: Snowflake,

    #[serde(rename = "type")]
    pub kind: ChannelType,

    #[serde(default)]
    pub guild_id: Option<Snowflake>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub position: i64,

    #[serde(default)]
    pub parent_id: Option<Snowflake>,

    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default)]
    pub recipients: Option<Vec<User>>,

    #[serde(default)]
    pub owner_id: Option<Snowflake>,

    #[serde(default)]
    pub last_message_id: Option<Snowflake>,
}

/// The resolved destination of a decoded `ChannelPayload`.
pub enum ClassifiedChannel {
    Guild(GuildChannel),
    Dm(DmChannel, User),
    Group(GroupDmChannel),
}

impl ChannelPayload {
    pub fn classify(self) -> ClassifiedChannel {
        if let Some(guild_id) = self.guild_id {
            return ClassifiedChannel::Guild(GuildChannel {
                id: self.id,
                guild_id,
                kind: self.kind,
                name: self.name,
                position: self.position,
                parent_id: self.parent_id,
                topic: self.topic,
            });
        }

        match self.kind {
            ChannelType::GroupDm => ClassifiedChannel::Group(GroupDmChannel {
                id: self.id,
                name: self.name,
                recipients: self
                    .recipients
                    .unwrap_or_default()
                    .into_iter()
                    .map(|u| u.id)
                    .collect(),
                owner_id: self.owner_id,
                last_message_id: self.last_message_id,
            }),
            _ => {
                let recipient = self
                    .recipients
                    .unwrap_or_default()
                    .into_iter()
                    .next()
                    .unwrap_or(User {
                        id: self.id.clone(),
                        username: String::new(),
                        discriminator: "0000".into(),
                        avatar: None,
                        bot: None,
                    });

                ClassifiedChannel::Dm(
                    DmChannel {
                        id: self.id,
                        recipient_id: recipient.id.clone(),
                        last_message_id: self.last_message_id,
                    },
                    recipient,
                )
            }
        }
    }
}
