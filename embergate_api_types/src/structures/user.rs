use serde::{Deserialize, Serialize};

use crate::Snowflake;

/// A Discord user, trimmed to the fields the cache-mutation pipeline and its
/// consumers need.
///
/// [Discord documentation](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,

    pub username: String,

    pub discriminator: String,

    pub avatar: Option<String>,

    #[serde(default)]
    pub bot: Option<bool>,
}
