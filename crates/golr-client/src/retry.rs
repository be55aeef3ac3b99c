//! Bounded retry with jittered backoff, and fetch cancellation.
//!
//! A fetch makes one initial attempt plus up to `retry_count` retries. Each
//! retry starts over with a fresh request after a random delay drawn from the
//! configured range. Only [`Error::Transport`] failures are retried.

use rand::Rng;
use std::future::Future;
use std::time::{Duration, Instant as StdInstant};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use golr_core::{Error, RequestObserver, Result, Transport, Url};

use crate::config::GolrConfig;

// =============================================================================
// POLICY AND STATE
// =============================================================================

/// Retry budget and backoff range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retry_count: u32,
    pub backoff_min_ms: u64,
    pub backoff_max_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&GolrConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &GolrConfig) -> Self {
        Self {
            retry_count: config.retry_count,
            backoff_min_ms: config.backoff_min_ms,
            backoff_max_ms: config.backoff_max_ms,
        }
    }

    /// A fresh state carrying this policy's full budget.
    pub fn new_state(&self) -> RetryState {
        RetryState::new(self.retry_count)
    }

    /// Uniformly random delay within the backoff range.
    pub fn backoff_delay(&self) -> Duration {
        let min = self.backoff_min_ms.min(self.backoff_max_ms);
        let max = self.backoff_min_ms.max(self.backoff_max_ms);
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

/// Remaining retries and the most recent failure of one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    remaining: u32,
    last_failure: Option<Error>,
}

impl RetryState {
    pub fn new(retries: u32) -> Self {
        Self {
            remaining: retries,
            last_failure: None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn last_failure(&self) -> Option<&Error> {
        self.last_failure.as_ref()
    }

    /// Record a failed attempt. Returns `true` and consumes one retry when
    /// another attempt is allowed.
    pub fn record_failure(&mut self, error: Error) -> bool {
        self.last_failure = Some(error);
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Take the recorded failure out of a spent state.
    fn into_failure(self) -> Error {
        self.last_failure
            .unwrap_or_else(|| Error::Transport("request failed without a recorded cause".into()))
    }
}

// =============================================================================
// CANCELLATION
// =============================================================================

/// Optional deadline and cancellation signal for a fetch.
///
/// Both the in-flight request and the backoff sleep are abandoned as soon as
/// either fires; the fetch then fails with [`Error::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct FetchControl {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

impl FetchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort once `deadline` passes.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Abort when the sender publishes `true`.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// A control paired with the sender that cancels it.
    pub fn cancellable() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self::new().with_cancellation(rx))
    }

    fn is_unbounded(&self) -> bool {
        self.deadline.is_none() && self.cancel.is_none()
    }

    /// Resolves with the reason once the deadline passes or cancellation is
    /// requested; never resolves otherwise.
    async fn interrupted(&self) -> Error {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        let cancelled = async {
            let Some(mut rx) = self.cancel.clone() else {
                return std::future::pending().await;
            };
            loop {
                if *rx.borrow_and_update() {
                    return;
                }
                if rx.changed().await.is_err() {
                    // Sender dropped without cancelling.
                    return std::future::pending().await;
                }
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Error::Cancelled("cancellation requested".to_string()),
            _ = deadline => Error::Cancelled("deadline exceeded".to_string()),
        }
    }

    /// Run `fut` unless interrupted first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_unbounded() {
            return fut.await;
        }
        tokio::select! {
            biased;
            reason = self.interrupted() => Err(reason),
            result = fut => result,
        }
    }
}

// =============================================================================
// RETRY LOOP
// =============================================================================

/// Fetch `url` through `transport`, retrying transport failures.
///
/// `on_request` fires once before the first attempt, `on_retry` after each
/// failure that will be retried, and `on_terminal_failure` when the budget in
/// `state` is spent. Cancellation and non-transport errors are returned
/// immediately.
pub async fn fetch_with_retry(
    transport: &dyn Transport,
    url: &Url,
    mut state: RetryState,
    policy: &RetryPolicy,
    observer: &dyn RequestObserver,
    control: &FetchControl,
) -> Result<String> {
    observer.on_request(url);
    let started = StdInstant::now();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        debug!(url = %url, attempt, remaining = state.remaining(), "GOlr request attempt");

        let failure = match control.run(transport.get_text(url)).await {
            Ok(body) => {
                debug!(
                    url = %url,
                    attempt,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "GOlr request succeeded"
                );
                return Ok(body);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => e,
        };

        if !state.record_failure(failure.clone()) {
            let failure = state.into_failure();
            error!(url = %url, attempt, error = %failure, "GOlr request failed, retries exhausted");
            observer.on_terminal_failure(url, &failure);
            return Err(failure);
        }

        let delay = policy.backoff_delay();
        warn!(
            url = %url,
            attempt,
            remaining = state.remaining(),
            delay_ms = delay.as_millis() as u64,
            error = %failure,
            "GOlr request failed, retrying"
        );
        observer.on_retry(url, &failure, state.remaining());

        control
            .run(async {
                tokio::time::sleep(delay).await;
                Ok(())
            })
            .await?;
    }
}
