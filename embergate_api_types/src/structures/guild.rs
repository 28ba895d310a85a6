use serde::{Deserialize, Serialize};

use crate::Snowflake;

/// A guild known to exist whose contents have not been received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableGuild {
    pub id: Snowflake,

    #[serde(default)]
    pub unavailable: bool,
}

/// A guild role. Replaced wholesale on ROLE_CREATE/UPDATE; no partial-merge
/// semantics apply here.
///
/// [Discord documentation](https://discord.com/developers/docs/topics/permissions#role-object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Snowflake,

    pub name: String,

    pub color: u64,

    pub hoist: bool,

    pub position: i64,

    pub permissions: String,

    #[serde(default)]
    pub managed: bool,

    #[serde(default)]
    pub mentionable: bool,
}

/// A guild emoji. The whole per-guild set is replaced on
/// GUILD_EMOJIS_UPDATE.
///
/// [Discord documentation](https://discord.com/developers/docs/resources/emoji#emoji-object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    pub id: Option<Snowflake>,

    pub name: Option<String>,

    #[serde(default)]
    pub roles: Vec<Snowflake>,

    #[serde(default)]
    pub animated: bool,
}
