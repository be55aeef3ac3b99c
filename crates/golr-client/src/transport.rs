//! reqwest-backed transport for the GOlr search backend.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, trace};

use golr_core::defaults::{DEFAULT_CHARSET, ERROR_BODY_SNIPPET_CHARS};
use golr_core::{Error, Result, Transport, Url};

use crate::config::GolrConfig;

/// Single-attempt HTTP transport.
///
/// reqwest's own retrying is not involved; every call issues one GET and
/// maps all failures to [`Error::Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport honoring the timeout and redirect settings.
    pub fn new(config: &GolrConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("golr-client/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect_policy(config));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            follow_redirects = config.follow_redirects,
            cross_scheme = config.allow_cross_scheme_redirects,
            timeout_secs = config.timeout_secs,
            "Initializing GOlr HTTP transport"
        );

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            // Best effort; a failing error body must not mask the status.
            let details = response.text().await.ok();
            return Err(Error::Transport(status_message(status, details.as_deref())));
        }

        let charset =
            content_type_charset(response.headers()).unwrap_or_else(|| DEFAULT_CHARSET.to_string());
        trace!(%charset, "Decoding GOlr response body");

        let body = response
            .text_with_charset(&charset)
            .await
            .map_err(|e| Error::Transport(format!("Could not read response body: {}", e)))?;

        debug!(url = %url, body_len = body.len(), "GOlr response received");
        Ok(body)
    }
}

/// Redirect policy for the configured options.
///
/// When cross-scheme redirects are disabled, a hop that changes scheme is not
/// followed and the 3xx response is returned to the caller as a non-200.
fn redirect_policy(config: &GolrConfig) -> Policy {
    if !config.follow_redirects {
        return Policy::none();
    }
    let max = config.max_redirects;
    if config.allow_cross_scheme_redirects {
        return Policy::limited(max);
    }
    Policy::custom(move |attempt| {
        let too_many = attempt.previous().len() > max;
        let scheme_changed = attempt
            .previous()
            .last()
            .is_some_and(|prev| prev.scheme() != attempt.url().scheme());
        if too_many {
            attempt.error("too many redirects")
        } else if scheme_changed {
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

/// Failure message for a non-200 status, with the error body when present.
fn status_message(status: StatusCode, body: Option<&str>) -> String {
    let mut message = format!("Unexpected HTTP status code: {}", status.as_u16());
    if let Some(details) = body.map(str::trim).filter(|b| !b.is_empty()) {
        message.push_str(" Details: ");
        message.extend(details.chars().take(ERROR_BODY_SNIPPET_CHARS));
    }
    message
}

/// The `charset` parameter of the `Content-Type` header, if any.
fn content_type_charset(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type
        .split(';')
        .map(|param| param.trim())
        .find_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"').to_string())
        })
        .filter(|charset| !charset.is_empty())
}
