pub mod criteria;
pub mod ids;
pub mod message;

pub use criteria::PurgeCriteria;
pub use ids::{ChannelId, GuildId, MessageId, UserId};
pub use message::{ChannelKey, ChannelRef, Message};
