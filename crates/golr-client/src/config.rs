//! Client configuration.
//!
//! Every option is a per-client field; nothing here is process-wide state,
//! so clients with different settings can run side by side.
//!
//! # Example
//!
//! ```rust
//! use golr_client::GolrConfig;
//!
//! let config = GolrConfig::default()
//!     .with_server_url("http://localhost:8080/solr")
//!     .with_page_size(500)
//!     .with_retry_count(5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::env;

use golr_core::defaults;
use golr_core::{Error, Result};

/// Configuration for a [`GolrClient`](crate::GolrClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GolrConfig {
    /// Base address of the Solr core; `/select` is appended to its path.
    pub server_url: String,
    /// Retries after the initial attempt of each request.
    pub retry_count: u32,
    /// Rows requested per page.
    pub page_size: u32,
    /// Ask the backend for indented JSON (readability only).
    pub indent_json: bool,
    /// Lower bound of the random delay between attempts.
    pub backoff_min_ms: u64,
    /// Upper bound of the random delay between attempts.
    pub backoff_max_ms: u64,
    /// Per-request timeout; `None` leaves requests unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Follow HTTP redirects.
    pub follow_redirects: bool,
    /// Maximum number of redirect hops.
    pub max_redirects: usize,
    /// Follow redirects that change scheme (for example http to https).
    pub allow_cross_scheme_redirects: bool,
}

impl Default for GolrConfig {
    fn default() -> Self {
        Self {
            server_url: defaults::GOLR_URL.to_string(),
            retry_count: defaults::RETRY_COUNT,
            page_size: defaults::PAGE_SIZE,
            indent_json: true,
            backoff_min_ms: defaults::BACKOFF_MIN_MS,
            backoff_max_ms: defaults::BACKOFF_MAX_MS,
            timeout_secs: None,
            follow_redirects: true,
            max_redirects: defaults::MAX_REDIRECTS,
            allow_cross_scheme_redirects: false,
        }
    }
}

impl GolrConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `GOLR_URL` | `https://golr.geneontology.org/solr` | Server base address |
    /// | `GOLR_RETRY_COUNT` | `3` | Retries per request |
    /// | `GOLR_PAGE_SIZE` | `100` | Rows per page |
    /// | `GOLR_INDENT` | `true` | Request indented JSON |
    /// | `GOLR_BACKOFF_MIN_MS` | `400` | Minimum retry delay |
    /// | `GOLR_BACKOFF_MAX_MS` | `1500` | Maximum retry delay |
    /// | `GOLR_TIMEOUT_SECS` | (unset) | Per-request timeout |
    /// | `GOLR_FOLLOW_REDIRECTS` | `true` | Follow redirects |
    /// | `GOLR_MAX_REDIRECTS` | `10` | Redirect hop limit |
    /// | `GOLR_ALLOW_CROSS_SCHEME_REDIRECTS` | `false` | Follow http/https switches |
    pub fn from_env() -> Self {
        let fallback = Self::default();

        Self {
            server_url: env::var("GOLR_URL").unwrap_or(fallback.server_url),
            retry_count: parse_var("GOLR_RETRY_COUNT").unwrap_or(fallback.retry_count),
            page_size: parse_var("GOLR_PAGE_SIZE").unwrap_or(fallback.page_size),
            indent_json: flag_var("GOLR_INDENT").unwrap_or(fallback.indent_json),
            backoff_min_ms: parse_var("GOLR_BACKOFF_MIN_MS").unwrap_or(fallback.backoff_min_ms),
            backoff_max_ms: parse_var("GOLR_BACKOFF_MAX_MS").unwrap_or(fallback.backoff_max_ms),
            timeout_secs: parse_var("GOLR_TIMEOUT_SECS"),
            follow_redirects: flag_var("GOLR_FOLLOW_REDIRECTS")
                .unwrap_or(fallback.follow_redirects),
            max_redirects: parse_var("GOLR_MAX_REDIRECTS").unwrap_or(fallback.max_redirects),
            allow_cross_scheme_redirects: flag_var("GOLR_ALLOW_CROSS_SCHEME_REDIRECTS")
                .unwrap_or(fallback.allow_cross_scheme_redirects),
        }
    }

    /// Set the server base address.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Set the number of retries per request.
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Enable or disable indented JSON responses.
    pub fn with_indent_json(mut self, indent: bool) -> Self {
        self.indent_json = indent;
        self
    }

    /// Set the jittered backoff range in milliseconds.
    pub fn with_backoff_ms(mut self, min: u64, max: u64) -> Self {
        self.backoff_min_ms = min;
        self.backoff_max_ms = max;
        self
    }

    /// Set a per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Configure redirect handling.
    pub fn with_redirects(mut self, follow: bool, allow_cross_scheme: bool) -> Self {
        self.follow_redirects = follow;
        self.allow_cross_scheme_redirects = allow_cross_scheme;
        self
    }

    /// Validate the configuration.
    ///
    /// [`GolrClient::new`](crate::GolrClient::new) parses the server address
    /// before calling this, so a malformed address reaches callers as
    /// [`Error::Build`] rather than [`Error::Config`].
    pub fn validate(&self) -> Result<()> {
        let server = self.server_url.trim();
        if server.is_empty() {
            return Err(Error::Config("server_url cannot be empty".to_string()));
        }

        if !(server.starts_with("http://") || server.starts_with("https://")) {
            return Err(Error::Config(format!(
                "server_url must use http or https, got: {}",
                server
            )));
        }

        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }

        if self.backoff_min_ms > self.backoff_max_ms {
            return Err(Error::Config(format!(
                "backoff_min_ms ({}) must not exceed backoff_max_ms ({})",
                self.backoff_min_ms, self.backoff_max_ms
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(Error::Config(
                "timeout_secs must be positive when set".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn flag_var(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
