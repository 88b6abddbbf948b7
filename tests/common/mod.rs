#![allow(dead_code)]

use std::sync::Mutex;

use channel_purge::purge::internal::error::TransportError;
use channel_purge::purge::types::{ChannelKey, ChannelRef, Message, MessageId};
use channel_purge::purge::{ChannelResolver, DeleteTransport, FetchTransport};
use tokio_util::sync::CancellationToken;

pub const GUILD: u64 = 1;
pub const BOT: u64 = 900;
pub const HUMAN: u64 = 500;

/// In-memory channel that records every request made against it.
pub struct FakeChannel {
    key: ChannelKey,
    history: Vec<Message>,
    fail_lookup: bool,
    fail_page: Option<usize>,
    fail_batch: Option<usize>,
    cancel_after_page: Option<(usize, CancellationToken)>,
    cancel_after_batch: Option<(usize, CancellationToken)>,
    pages: Mutex<Vec<Option<MessageId>>>,
    batches: Mutex<Vec<Vec<MessageId>>>,
}

impl FakeChannel {
    /// `history` must be ordered most recent first.
    pub fn new(channel_id: u64, history: Vec<Message>) -> Self {
        Self {
            key: ChannelKey::new(GUILD, channel_id),
            history,
            fail_lookup: false,
            fail_page: None,
            fail_batch: None,
            cancel_after_page: None,
            cancel_after_batch: None,
            pages: Mutex::new(vec![]),
            batches: Mutex::new(vec![]),
        }
    }

    pub fn key(&self) -> ChannelKey {
        self.key
    }

    pub fn channel_ref(&self) -> ChannelRef {
        ChannelRef {
            guild_id: self.key.guild_id,
            channel_id: self.key.channel_id,
            name: format!("test-{}", self.key.channel_id),
        }
    }

    pub fn failing_lookup(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    /// Fails the `n`th page request (1-based).
    pub fn failing_page(mut self, n: usize) -> Self {
        self.fail_page = Some(n);
        self
    }

    /// Fails the `n`th delete request (1-based).
    pub fn failing_batch(mut self, n: usize) -> Self {
        self.fail_batch = Some(n);
        self
    }

    /// Fires `token` once the `n`th page has been served.
    pub fn cancelling_after_page(mut self, n: usize, token: CancellationToken) -> Self {
        self.cancel_after_page = Some((n, token));
        self
    }

    pub fn cancelling_after_batch(mut self, n: usize, token: CancellationToken) -> Self {
        self.cancel_after_batch = Some((n, token));
        self
    }

    /// Cursor of every page request, in order
    pub fn page_requests(&self) -> Vec<Option<MessageId>> {
        self.pages.lock().unwrap().clone()
    }

    /// Every delete request, including a failed one
    pub fn delete_requests(&self) -> Vec<Vec<MessageId>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn deleted_ids(&self) -> Vec<MessageId> {
        let mut batches = self.delete_requests();
        if let Some(n) = self.fail_batch {
            if batches.len() >= n {
                batches.truncate(n - 1);
            }
        }
        batches.into_iter().flatten().collect()
    }
}

#[async_trait::async_trait]
impl ChannelResolver for FakeChannel {
    async fn resolve_channel(&self, key: ChannelKey) -> Result<Option<ChannelRef>, TransportError> {
        if self.fail_lookup {
            return Err(TransportError::from("lookup unavailable"));
        }
        Ok((key == self.key).then(|| self.channel_ref()))
    }
}

#[async_trait::async_trait]
impl FetchTransport for FakeChannel {
    async fn fetch_page(
        &self,
        _channel: &ChannelRef,
        before: Option<MessageId>,
        limit: usize,
    ) -> Result<Vec<Message>, TransportError> {
        let n = {
            let mut pages = self.pages.lock().unwrap();
            pages.push(before);
            pages.len()
        };
        if self.fail_page == Some(n) {
            return Err(TransportError::Status {
                status: 500,
                message: format!("page {} unavailable", n),
            });
        }

        let start = match before {
            Some(cursor) => match self.history.iter().position(|m| m.id == cursor) {
                Some(index) => index + 1,
                None => self.history.len(),
            },
            None => 0,
        };

        if let Some((after, token)) = &self.cancel_after_page {
            if *after == n {
                token.cancel();
            }
        }

        Ok(self.history.iter().skip(start).take(limit).cloned().collect())
    }
}

#[async_trait::async_trait]
impl DeleteTransport for FakeChannel {
    async fn delete_batch(&self, _channel: &ChannelRef, ids: &[MessageId]) -> Result<(), TransportError> {
        let n = {
            let mut batches = self.batches.lock().unwrap();
            batches.push(ids.to_vec());
            batches.len()
        };
        if self.fail_batch == Some(n) {
            return Err(TransportError::Status {
                status: 403,
                message: format!("batch {} rejected", n),
            });
        }

        if let Some((after, token)) = &self.cancel_after_batch {
            if *after == n {
                token.cancel();
            }
        }
        Ok(())
    }
}

/// `count` messages with ids `count..=1`, most recent first, alternating
/// between a human and a bot author.
pub fn history(count: u64) -> Vec<Message> {
    (1..=count)
        .rev()
        .map(|id| {
            let bot = id % 2 == 0;
            let author = if bot { BOT } else { HUMAN };
            Message::new(id, author, bot, format!("message {}", id))
        })
        .collect()
}

pub fn ids(messages: &[Message]) -> Vec<MessageId> {
    messages.iter().map(|m| m.id).collect()
}
