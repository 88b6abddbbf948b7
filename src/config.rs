use clap::Parser;

use crate::discord::client::DEFAULT_MAX_RETRIES;
use crate::discord::DEFAULT_API_BASE;
use crate::purge::filter::DEFAULT_TRIGGER_PREFIX;
use crate::purge::types::ChannelKey;

/// Purges messages from a Discord channel.
///
/// Every option can also be set through its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "channel-purge", version)]
pub struct Config {
    /// Bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Base URL of the Discord REST API
    #[arg(long, env = "DISCORD_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Guild that owns the channel
    #[arg(long = "guild", env = "PURGE_GUILD_ID")]
    pub guild_id: u64,

    /// Channel to purge
    #[arg(long = "channel", env = "PURGE_CHANNEL_ID")]
    pub channel_id: u64,

    /// Prefix that marks a message as a bot command
    #[arg(long, env = "PURGE_TRIGGER_PREFIX", default_value = DEFAULT_TRIGGER_PREFIX)]
    pub trigger_prefix: String,

    /// Retries for a rate-limited request
    #[arg(long, env = "PURGE_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Command text, e.g. ".wipe bot commands"
    pub command: String,
}

impl Config {
    pub fn channel_key(&self) -> ChannelKey {
        ChannelKey::new(self.guild_id, self.channel_id)
    }
}
