use crate::purge::internal::error::TransportError;
use crate::purge::types::{ChannelKey, ChannelRef, Message, MessageId};

pub mod deleter;
pub mod fetcher;
pub mod filter;
pub mod internal;
pub mod orchestrator;
pub mod types;

pub use deleter::BatchDeleter;
pub use fetcher::HistoryFetcher;
pub use filter::MessageFilter;
pub use internal::error::{PurgeError, PurgeResult};
pub use orchestrator::PurgeOrchestrator;

/// Largest page the history endpoint returns
pub const MAX_PAGE_SIZE: usize = 100;

/// Largest number of ids a single delete request accepts
pub const MAX_BATCH_SIZE: usize = 100;

/// Looks up a channel by guild and channel id.
#[async_trait::async_trait]
pub trait ChannelResolver: Send + Sync {
    /// `Ok(None)` means the guild or the channel does not exist.
    async fn resolve_channel(&self, key: ChannelKey) -> Result<Option<ChannelRef>, TransportError>;
}

/// Reads channel history one page at a time.
#[async_trait::async_trait]
pub trait FetchTransport: Send + Sync {
    /// Returns up to `limit` messages older than `before` (or the newest
    /// ones when `before` is `None`), most recent first.
    ///
    /// An empty page means the history is exhausted.
    async fn fetch_page(
        &self,
        channel: &ChannelRef,
        before: Option<MessageId>,
        limit: usize,
    ) -> Result<Vec<Message>, TransportError>;
}

/// Removes messages from a channel.
#[async_trait::async_trait]
pub trait DeleteTransport: Send + Sync {
    /// Deletes at most [`MAX_BATCH_SIZE`] messages in one request.
    async fn delete_batch(&self, channel: &ChannelRef, ids: &[MessageId]) -> Result<(), TransportError>;
}
