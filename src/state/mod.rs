use std::{future::Future, sync::Arc, time::Duration};

use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    fetch::{FetchError, Source},
    media::{ExtensionMatch, JokeItem, MediaItem},
};

/// Decides which completion wins when requests overlap.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Results older than the newest applied one are dropped.
    #[default]
    LatestDispatched,
    /// Whatever finishes last is shown, even if it was dispatched first.
    LastCompleted,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
struct Sequence {
    dispatched: u64,
    applied: u64,
}

impl Sequence {
    fn next(&mut self) -> u64 {
        self.dispatched += 1;
        self.dispatched
    }

    fn accept(&mut self, seq: u64, policy: UpdatePolicy) -> bool {
        match policy {
            UpdatePolicy::LastCompleted => {
                self.applied = seq;
                true
            }
            UpdatePolicy::LatestDispatched if seq > self.applied => {
                self.applied = seq;
                true
            }
            UpdatePolicy::LatestDispatched => false,
        }
    }

    fn is_latest(&self, seq: u64) -> bool {
        seq == self.dispatched
    }

    /// A newer result is already on screen.
    fn is_superseded(&self, seq: u64, policy: UpdatePolicy) -> bool {
        policy == UpdatePolicy::LatestDispatched && seq <= self.applied
    }
}

/// Everything the UI renders that isn't static. Only `Fetcher` mutates it.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct AppState {
    pub media_item: Option<MediaItem>,
    pub joke_item: Option<JokeItem>,
    pub joke_loading: bool,
    pub media_error: Option<String>,
    pub joke_error: Option<String>,
    media_seq: Sequence,
    joke_seq: Sequence,
}

impl AppState {
    /// The error shown in the footer, media first.
    pub fn last_error(&self) -> Option<&str> {
        self.media_error.as_deref().or(self.joke_error.as_deref())
    }

    fn begin_media(&mut self) -> u64 {
        self.media_seq.next()
    }

    fn complete_media(&mut self, seq: u64, item: MediaItem, policy: UpdatePolicy) -> bool {
        if !self.media_seq.accept(seq, policy) {
            return false;
        }
        self.media_item = Some(item);
        self.media_error = None;
        true
    }

    fn begin_joke(&mut self) -> u64 {
        self.joke_loading = true;
        self.joke_seq.next()
    }

    fn complete_joke(
        &mut self,
        seq: u64,
        result: Result<JokeItem, FetchError>,
        policy: UpdatePolicy,
    ) -> bool {
        // an older request finishing must not hide a newer one still in flight
        if policy == UpdatePolicy::LastCompleted || self.joke_seq.is_latest(seq) {
            self.joke_loading = false;
        }
        match result {
            Ok(joke) if self.joke_seq.accept(seq, policy) => {
                self.joke_item = Some(joke);
                self.joke_error = None;
                true
            }
            Ok(_) => false,
            Err(e) => {
                if !self.joke_seq.is_superseded(seq, policy) {
                    self.joke_error = Some(format!("joke: {e}"));
                }
                false
            }
        }
    }

    fn fail_media(&mut self, seq: u64, e: &FetchError, policy: UpdatePolicy) {
        if !self.media_seq.is_superseded(seq, policy) {
            self.media_error = Some(format!("media: {e}"));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Stale,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub policy: UpdatePolicy,
    pub matcher: ExtensionMatch,
    pub chain_joke: bool,
    pub retries: u32,
    pub retry_backoff: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            policy: UpdatePolicy::default(),
            matcher: ExtensionMatch::default(),
            chain_joke: true,
            retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Runs the media and joke requests against a `Source` and publishes results
/// into the shared `AppState`.
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn Source>,
    state: Arc<Mutex<AppState>>,
    options: FetchOptions,
}

impl Fetcher {
    pub fn new(source: Arc<dyn Source>, options: FetchOptions) -> Self {
        Self {
            source,
            state: Arc::default(),
            options,
        }
    }

    pub fn state(&self) -> Arc<Mutex<AppState>> {
        Arc::clone(&self.state)
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> AppState {
        self.state.lock().clone()
    }

    /// Fetches and classifies a new media item. Never returns an error: failures
    /// are logged and leave the current item in place.
    #[instrument(skip(self))]
    pub async fn fetch_media(&self) -> Outcome {
        let seq = self.state.lock().begin_media();
        debug!(seq, "dispatching media request");

        let result = self.with_retry(|| self.source.media_url()).await;
        match result {
            Ok(url) => {
                let item = MediaItem::new(url, self.options.matcher);
                info!(seq, url = %item.url, kind = item.kind.label(), "media fetched");
                let applied = self
                    .state
                    .lock()
                    .complete_media(seq, item, self.options.policy);
                if !applied {
                    debug!(seq, "discarding stale media");
                    return Outcome::Stale;
                }
                if self.options.chain_joke {
                    self.fetch_joke().await;
                }
                Outcome::Applied
            }
            Err(e) => {
                error!(seq, "Error fetching media: {e}");
                self.state.lock().fail_media(seq, &e, self.options.policy);
                Outcome::Failed
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_joke(&self) -> Outcome {
        let seq = self.state.lock().begin_joke();
        debug!(seq, "dispatching joke request");

        let result = self.with_retry(|| self.source.joke()).await;
        if let Err(e) = &result {
            error!(seq, "Error fetching joke: {e}");
        }
        let failed = result.is_err();
        let applied = self
            .state
            .lock()
            .complete_joke(seq, result, self.options.policy);
        match (failed, applied) {
            (true, _) => Outcome::Failed,
            (false, true) => Outcome::Applied,
            (false, false) => {
                debug!(seq, "discarding stale joke");
                Outcome::Stale
            }
        }
    }

    async fn with_retry<T, F, Fut>(&self, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Err(e) if attempt < self.options.retries && !matches!(e, FetchError::JokesDisabled) => {
                    let backoff = self
                        .options
                        .retry_backoff
                        .saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    warn!(attempt, ?backoff, "retrying after error: {e}");
                    tokio::time::sleep(backoff).await;
                }
                res => return res,
            }
        }
    }
}
