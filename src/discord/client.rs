use std::time::Duration;

use log::{debug, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::discord::types::{
    BulkDeleteRequest, CreateMessageRequest, DiscordChannel, DiscordMessage, ErrorResponse,
    RateLimitResponse, GUILD_TEXT,
};
use crate::purge::internal::error::TransportError;
use crate::purge::types::{ChannelId, ChannelKey, ChannelRef, Message, MessageId};
use crate::purge::{ChannelResolver, DeleteTransport, FetchTransport, MAX_BATCH_SIZE};

const USER_AGENT: &str = concat!("DiscordBot (channel-purge, ", env!("CARGO_PKG_VERSION"), ")");

pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Used when a 429 carries no usable delay
const FALLBACK_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Longer delays are not waited out, the request fails instead
const MAX_RETRY_AFTER: Duration = Duration::from_secs(300);

/// Discord REST client backing every purge capability.
#[derive(Debug, Clone)]
pub struct DiscordHttp {
    http: reqwest::Client,
    api_base: String,
    token: String,
    max_retries: u32,
}

impl DiscordHttp {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// How many times a rate-limited request is retried before giving up.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Posts a plain text message to the channel.
    pub async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<(), TransportError> {
        let url = self.url(&format!("/channels/{}/messages", channel_id));
        let body = CreateMessageRequest { content };
        self.send(|| self.http.post(&url).json(&body)).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Sends the request built by `build`, rebuilding it after every 429.
    async fn send<F>(&self, build: F) -> Result<Response, TransportError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let response = build()
                .header(AUTHORIZATION, format!("Bot {}", self.token))
                .send()
                .await?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Self::check_status(response).await;
            }

            let url = response.url().path().to_string();
            let retry_after = Self::retry_after(response).await;
            if attempt >= self.max_retries || retry_after > MAX_RETRY_AFTER {
                return Err(TransportError::RateLimited { retry_after });
            }
            attempt += 1;

            warn!(
                "Rate limited on {}, retrying in {:?} (attempt {}/{})",
                url, retry_after, attempt, self.max_retries
            );
            tokio::time::sleep(retry_after).await;
        }
    }

    async fn check_status(response: Response) -> Result<Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!("Failed to read {} response body: {}", status, err);
                String::new()
            }
        };
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => format!("{} (code {})", err.message, err.code),
            Err(_) => body,
        };

        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Prefers the JSON body's `retry_after`, then the `Retry-After` header.
    async fn retry_after(response: Response) -> Duration {
        let header = response
            .headers()
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<f64>().ok());

        let body = match response.json::<RateLimitResponse>().await {
            Ok(body) => {
                if body.global {
                    debug!("Hit the global rate limit");
                }
                Some(body.retry_after)
            }
            Err(_) => None,
        };

        // Too large for a Duration still means "longer than we wait"
        body.or(header)
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
            .unwrap_or(FALLBACK_RETRY_AFTER)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
        response
            .json::<T>()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ChannelResolver for DiscordHttp {
    async fn resolve_channel(&self, key: ChannelKey) -> Result<Option<ChannelRef>, TransportError> {
        let url = self.url(&format!("/channels/{}", key.channel_id));

        let response = match self.send(|| self.http.get(&url)).await {
            Ok(response) => response,
            Err(TransportError::Status { status: 404, .. }) => return Ok(None),
            Err(err) => return Err(err),
        };
        let channel: DiscordChannel = Self::decode(response).await?;

        if channel.guild_id != Some(key.guild_id) || channel.kind != GUILD_TEXT {
            debug!(
                "Channel {} is not a text channel of guild {}",
                key.channel_id, key.guild_id
            );
            return Ok(None);
        }

        Ok(Some(ChannelRef {
            guild_id: key.guild_id,
            channel_id: channel.id,
            name: channel.name.unwrap_or_default(),
        }))
    }
}

#[async_trait::async_trait]
impl FetchTransport for DiscordHttp {
    async fn fetch_page(
        &self,
        channel: &ChannelRef,
        before: Option<MessageId>,
        limit: usize,
    ) -> Result<Vec<Message>, TransportError> {
        let url = self.url(&format!("/channels/{}/messages", channel.channel_id));

        let mut query = vec![("limit", limit.to_string())];
        if let Some(before) = before {
            query.push(("before", before.to_string()));
        }

        let response = self.send(|| self.http.get(&url).query(&query)).await?;
        let page: Vec<DiscordMessage> = Self::decode(response).await?;

        Ok(page.into_iter().map(Message::from).collect())
    }
}

#[async_trait::async_trait]
impl DeleteTransport for DiscordHttp {
    async fn delete_batch(&self, channel: &ChannelRef, ids: &[MessageId]) -> Result<(), TransportError> {
        match ids {
            [] => Ok(()),
            // The bulk endpoint only accepts 2 to 100 ids
            [id] => {
                let url = self.url(&format!("/channels/{}/messages/{}", channel.channel_id, id));
                self.send(|| self.http.delete(&url)).await?;
                Ok(())
            }
            _ if ids.len() > MAX_BATCH_SIZE => Err(TransportError::Other(format!(
                "cannot delete {} messages in one request (max {})",
                ids.len(),
                MAX_BATCH_SIZE
            ))),
            _ => {
                let url = self.url(&format!("/channels/{}/messages/bulk-delete", channel.channel_id));
                let body = BulkDeleteRequest { messages: ids };
                self.send(|| self.http.post(&url).json(&body)).await?;
                Ok(())
            }
        }
    }
}
