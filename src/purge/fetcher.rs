use std::sync::Arc;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::purge::internal::error::{PurgeError, PurgeResult};
use crate::purge::types::{ChannelRef, Message};
use crate::purge::{FetchTransport, MAX_PAGE_SIZE};

/// Walks a channel's history from newest to oldest.
pub struct HistoryFetcher {
    transport: Arc<dyn FetchTransport>,
}

impl HistoryFetcher {
    pub fn new(transport: Arc<dyn FetchTransport>) -> Self {
        Self { transport }
    }

    /// Fetches the whole history of `channel`, most recent first.
    ///
    /// Each request asks for the page older than the last message seen so
    /// far; only an empty page ends the walk. A failed page discards
    /// everything accumulated, since a truncated history would make the
    /// purge silently skip messages.
    pub async fn fetch_all(
        &self,
        channel: &ChannelRef,
        cancel: &CancellationToken,
    ) -> PurgeResult<Vec<Message>> {
        let mut messages: Vec<Message> = Vec::new();
        let mut cursor = None;
        let mut pages = 0usize;

        loop {
            if cancel.is_cancelled() {
                return Err(PurgeError::Cancelled { deleted: 0 });
            }

            let page = self
                .transport
                .fetch_page(channel, cursor, MAX_PAGE_SIZE)
                .await
                .map_err(PurgeError::RemoteFetch)?;
            pages += 1;

            // Oldest message of the page is the next cursor
            let Some(oldest) = page.last() else {
                break;
            };
            cursor = Some(oldest.id);

            debug!(
                "Fetched page {} of #{} ({} messages, cursor {})",
                pages,
                channel.name,
                page.len(),
                oldest.id
            );
            messages.extend(page);
        }

        debug!(
            "History of #{} exhausted after {} requests: {} messages",
            channel.name,
            pages,
            messages.len()
        );

        Ok(messages)
    }
}
