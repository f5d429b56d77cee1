use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::media::JokeItem;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("response did not contain a url")]
    MissingUrl,
    #[error("no joke endpoint configured")]
    JokesDisabled,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Network(e.to_string()),
        }
    }
}

/// Where media descriptors and jokes come from.
#[async_trait]
pub trait Source: Send + Sync {
    async fn media_url(&self) -> Result<String, FetchError>;
    async fn joke(&self) -> Result<JokeItem, FetchError>;
}

#[derive(Debug, Deserialize)]
struct MediaPayload {
    url: Option<String>,
}

pub fn parse_media(content: &[u8]) -> Result<String, FetchError> {
    let payload: MediaPayload = serde_json::from_slice(content)?;
    payload.url.ok_or(FetchError::MissingUrl)
}

pub fn parse_joke(content: &[u8]) -> Result<JokeItem, FetchError> {
    Ok(serde_json::from_slice(content)?)
}

#[derive(Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    media: Url,
    joke: Option<Url>,
}

impl HttpSource {
    pub fn new(media: Url, joke: Option<Url>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self::with_client(builder.build()?, media, joke))
    }

    pub fn with_client(client: reqwest::Client, media: Url, joke: Option<Url>) -> Self {
        Self { client, media, joke }
    }

    async fn get(&self, u: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(u.as_str()).send().await?;
        let status = response.status();
        debug!(%status, url = %u);
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let content = response.bytes().await?;
        Ok(content.to_vec())
    }
}

#[async_trait]
impl Source for HttpSource {
    #[instrument(skip(self))]
    async fn media_url(&self) -> Result<String, FetchError> {
        let content = self.get(&self.media).await?;
        parse_media(&content)
    }

    #[instrument(skip(self))]
    async fn joke(&self) -> Result<JokeItem, FetchError> {
        let u = self.joke.as_ref().ok_or(FetchError::JokesDisabled)?;
        let content = self.get(u).await?;
        parse_joke(&content)
    }
}

#[cfg(test)]
pub mod mock {
    use std::{collections::VecDeque, time::Duration};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::{FetchError, Source};
    use crate::media::JokeItem;

    type Script<T> = Mutex<VecDeque<(Duration, Result<T, FetchError>)>>;

    /// Replays canned results in call order, each after its own delay.
    #[derive(Default)]
    pub struct ScriptedSource {
        media: Script<String>,
        jokes: Script<JokeItem>,
    }

    impl ScriptedSource {
        pub fn media(self, delay_ms: u64, result: Result<&str, FetchError>) -> Self {
            self.media
                .lock()
                .push_back((Duration::from_millis(delay_ms), result.map(str::to_string)));
            self
        }

        pub fn joke(self, delay_ms: u64, result: Result<JokeItem, FetchError>) -> Self {
            self.jokes
                .lock()
                .push_back((Duration::from_millis(delay_ms), result));
            self
        }

        pub fn remaining_jokes(&self) -> usize {
            self.jokes.lock().len()
        }
    }

    async fn replay<T>(script: &Script<T>) -> Result<T, FetchError> {
        let next = script.lock().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Err(FetchError::Network("script exhausted".to_string())),
        }
    }

    #[async_trait]
    impl Source for ScriptedSource {
        async fn media_url(&self) -> Result<String, FetchError> {
            replay(&self.media).await
        }

        async fn joke(&self) -> Result<JokeItem, FetchError> {
            replay(&self.jokes).await
        }
    }
}
