pub mod client;
pub mod types;

pub use client::DiscordHttp;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
