//! Core traits for the GOlr client.
//!
//! These traits define the seams between request construction, the network,
//! and observability, so that transports can be swapped in tests.

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

// =============================================================================
// DOCUMENT SHAPES
// =============================================================================

/// A document shape stored in the GOlr index.
pub trait GolrDocument: DeserializeOwned + Send + 'static {
    /// Value of `document_category` selecting this shape.
    const CATEGORY: &'static str;

    /// Fields requested through `fl`, in order.
    fn relevant_fields() -> &'static [&'static str];
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// A single HTTP GET returning the decoded response body.
///
/// Implementations perform exactly one attempt. Any connection failure,
/// non-200 status, or body read failure is reported as
/// [`Error::Transport`]; retrying is the caller's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_text(&self, url: &Url) -> Result<String>;
}

// =============================================================================
// OBSERVER
// =============================================================================

/// Hooks invoked around request execution.
///
/// All methods default to doing nothing.
pub trait RequestObserver: Send + Sync {
    /// Called once per logical fetch, before the first attempt.
    fn on_request(&self, _url: &Url) {}

    /// Called after a failed attempt when another attempt will follow.
    fn on_retry(&self, _url: &Url, _error: &Error, _remaining: u32) {}

    /// Called when the retry budget is spent and the error is returned.
    fn on_terminal_failure(&self, _url: &Url, _error: &Error) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}
