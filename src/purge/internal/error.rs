use std::time::Duration;

use thiserror::Error;

use crate::purge::types::{ChannelId, GuildId};

/// Failure of a single remote call (channel lookup, page fetch or batch delete).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("remote returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for TransportError {
    fn from(value: String) -> Self {
        TransportError::Other(value)
    }
}

impl From<&str> for TransportError {
    fn from(value: &str) -> Self {
        TransportError::from(String::from(value))
    }
}

/// Why a purge did not complete.
///
/// Only [`PurgeError::RemoteDelete`] and [`PurgeError::Cancelled`] can be
/// raised after messages were already removed; `deleted` carries how many.
#[derive(Debug, Error)]
pub enum PurgeError {
    #[error("channel {channel_id} not found in guild {guild_id}")]
    ChannelNotFound {
        guild_id: GuildId,
        channel_id: ChannelId,
    },

    #[error("channel lookup failed: {0}")]
    ChannelLookup(#[source] TransportError),

    #[error("failed to fetch channel history: {0}")]
    RemoteFetch(#[source] TransportError),

    #[error("failed to delete messages after {deleted} were removed: {source}")]
    RemoteDelete {
        deleted: usize,
        #[source]
        source: TransportError,
    },

    #[error("purge cancelled after {deleted} messages were removed")]
    Cancelled { deleted: usize },
}

impl PurgeError {
    /// Whether some messages may already be gone.
    ///
    /// A failed delete request is always treated as possibly applied: the
    /// remote may have removed the batch before the response was lost.
    pub fn is_partial(&self) -> bool {
        match self {
            PurgeError::RemoteDelete { .. } => true,
            PurgeError::Cancelled { deleted } => *deleted > 0,
            _ => false,
        }
    }

    /// Messages removed before the failure
    pub fn deleted(&self) -> usize {
        match self {
            PurgeError::RemoteDelete { deleted, .. } | PurgeError::Cancelled { deleted } => {
                *deleted
            }
            _ => 0,
        }
    }
}

pub type PurgeResult<T> = Result<T, PurgeError>;
