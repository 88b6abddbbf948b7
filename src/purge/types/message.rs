use super::ids::{ChannelId, GuildId, MessageId, UserId};

/// A message as read from channel history.
///
/// Never mutated after it is fetched; a purge owns its copies only
/// until the delete stage has consumed their ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub author_id: UserId,
    pub is_bot_author: bool,
    pub text_content: String,
}

impl Message {
    /// Builds a message from raw snowflakes.
    pub fn new(id: u64, author_id: u64, is_bot_author: bool, text_content: impl Into<String>) -> Self {
        Self {
            id: MessageId(id),
            author_id: UserId(author_id),
            is_bot_author,
            text_content: text_content.into(),
        }
    }
}

/// Unresolved location of the channel to purge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
}

impl ChannelKey {
    pub fn new(guild_id: u64, channel_id: u64) -> Self {
        Self {
            guild_id: GuildId(guild_id),
            channel_id: ChannelId(channel_id),
        }
    }
}

/// A channel the resolver confirmed to exist inside its guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub name: String,
}
