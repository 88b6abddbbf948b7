use std::sync::Arc;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::purge::internal::error::{PurgeError, PurgeResult};
use crate::purge::types::{ChannelRef, MessageId};
use crate::purge::{DeleteTransport, MAX_BATCH_SIZE};

/// Deletes messages in consecutive batches of at most [`MAX_BATCH_SIZE`].
pub struct BatchDeleter {
    transport: Arc<dyn DeleteTransport>,
}

impl BatchDeleter {
    pub fn new(transport: Arc<dyn DeleteTransport>) -> Self {
        Self { transport }
    }

    /// Issues one request per batch, strictly one after another.
    ///
    /// The first failing batch stops the run. Batches sent before it stay
    /// deleted; the error reports how many messages that covers.
    pub async fn delete_all(
        &self,
        channel: &ChannelRef,
        ids: &[MessageId],
        cancel: &CancellationToken,
    ) -> PurgeResult<usize> {
        let mut deleted = 0usize;

        for (n, batch) in ids.chunks(MAX_BATCH_SIZE).enumerate() {
            if cancel.is_cancelled() {
                return Err(PurgeError::Cancelled { deleted });
            }

            self.transport
                .delete_batch(channel, batch)
                .await
                .map_err(|source| PurgeError::RemoteDelete { deleted, source })?;
            deleted += batch.len();

            debug!(
                "Deleted batch {} in #{} ({} messages, {}/{} total)",
                n + 1,
                channel.name,
                batch.len(),
                deleted,
                ids.len()
            );
        }

        Ok(deleted)
    }
}
