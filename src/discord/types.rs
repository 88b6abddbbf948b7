use serde::{Deserialize, Serialize};

use crate::purge::types::{ChannelId, GuildId, Message, MessageId, UserId};

/// Guild text channel
pub const GUILD_TEXT: u8 = 0;

#[derive(Debug, Deserialize)]
pub struct DiscordUser {
    pub id: UserId,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Deserialize)]
pub struct DiscordMessage {
    pub id: MessageId,
    pub author: DiscordUser,
    #[serde(default)]
    pub content: String,
}

impl From<DiscordMessage> for Message {
    fn from(value: DiscordMessage) -> Self {
        Message {
            id: value.id,
            author_id: value.author.id,
            is_bot_author: value.author.bot,
            text_content: value.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DiscordChannel {
    pub id: ChannelId,
    #[serde(rename = "type")]
    pub kind: u8,
    pub guild_id: Option<GuildId>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteRequest<'a> {
    pub messages: &'a [MessageId],
}

#[derive(Debug, Serialize)]
pub struct CreateMessageRequest<'a> {
    pub content: &'a str,
}

/// Body of a 429 response
#[derive(Debug, Deserialize)]
pub struct RateLimitResponse {
    pub retry_after: f64,
    #[serde(default)]
    pub global: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: u64,
    pub message: String,
}
