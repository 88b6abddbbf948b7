use std::sync::Arc;

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::purge::internal::error::{PurgeError, PurgeResult};
use crate::purge::types::{ChannelKey, MessageId, PurgeCriteria};
use crate::purge::{
    BatchDeleter, ChannelResolver, DeleteTransport, FetchTransport, HistoryFetcher, MessageFilter,
};

/// Runs a purge end to end: resolve, fetch, filter, delete.
///
/// Holds no per-purge state, so one orchestrator can serve concurrent
/// purges in different channels.
pub struct PurgeOrchestrator {
    resolver: Arc<dyn ChannelResolver>,
    fetcher: HistoryFetcher,
    filter: MessageFilter,
    deleter: BatchDeleter,
}

impl PurgeOrchestrator {
    pub fn new(
        resolver: Arc<dyn ChannelResolver>,
        fetch: Arc<dyn FetchTransport>,
        delete: Arc<dyn DeleteTransport>,
    ) -> Self {
        Self {
            resolver,
            fetcher: HistoryFetcher::new(fetch),
            filter: MessageFilter::default(),
            deleter: BatchDeleter::new(delete),
        }
    }

    pub fn with_filter(mut self, filter: MessageFilter) -> Self {
        self.filter = filter;
        self
    }

    pub async fn purge(&self, key: ChannelKey, criteria: PurgeCriteria) -> PurgeResult<()> {
        self.purge_with_cancel(key, criteria, &CancellationToken::new()).await
    }

    /// Like [`purge`](Self::purge), stopping before the next page request
    /// or delete batch once `cancel` fires.
    pub async fn purge_with_cancel(
        &self,
        key: ChannelKey,
        criteria: PurgeCriteria,
        cancel: &CancellationToken,
    ) -> PurgeResult<()> {
        if criteria.is_empty() {
            warn!("Purge of channel {} requested without any criteria", key.channel_id);
        }

        let channel = self
            .resolver
            .resolve_channel(key)
            .await
            .map_err(PurgeError::ChannelLookup)?
            .ok_or(PurgeError::ChannelNotFound {
                guild_id: key.guild_id,
                channel_id: key.channel_id,
            })?;

        let history = self.fetcher.fetch_all(&channel, cancel).await?;
        let fetched = history.len();

        let ids: Vec<MessageId> = self
            .filter
            .filter(history, &criteria)
            .into_iter()
            .map(|message| message.id)
            .collect();

        let deleted = self.deleter.delete_all(&channel, &ids, cancel).await?;

        info!(
            "Purged #{} ({}): {} of {} messages deleted",
            channel.name, channel.channel_id, deleted, fetched
        );

        Ok(())
    }
}
