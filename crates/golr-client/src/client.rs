//! The GOlr client: configuration, transport and observer wired together.

use std::fmt;
use std::sync::Arc;
use tracing::info;

use golr_core::{
    FilterConstraint, GolrDocument, NoopObserver, RequestObserver, Result, Transport, Url,
};

use crate::config::GolrConfig;
use crate::envelope::{parse_envelope, GolrEnvelope};
use crate::request::{build_select_url, parse_server_url, PageQuery};
use crate::retry::{fetch_with_retry, FetchControl, RetryPolicy};
use crate::transport::HttpTransport;

/// Client for one GOlr server.
///
/// Cheap to clone; clones share the transport and observer.
#[derive(Clone)]
pub struct GolrClient {
    config: GolrConfig,
    server: Url,
    transport: Arc<dyn Transport>,
    observer: Arc<dyn RequestObserver>,
}

impl fmt::Debug for GolrClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GolrClient")
            .field("server", &self.server.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GolrClient {
    /// Create a client using the reqwest transport.
    ///
    /// A malformed server address fails with
    /// [`Error::Build`](golr_core::Error::Build); other invalid settings fail
    /// with [`Error::Config`](golr_core::Error::Config).
    pub fn new(config: GolrConfig) -> Result<Self> {
        let server = parse_server_url(&config.server_url)?;
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::assemble(config, server, Arc::new(transport)))
    }

    /// Create a client from `GOLR_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GolrConfig::from_env())
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: GolrConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let server = parse_server_url(&config.server_url)?;
        config.validate()?;
        Ok(Self::assemble(config, server, transport))
    }

    fn assemble(config: GolrConfig, server: Url, transport: Arc<dyn Transport>) -> Self {
        info!(
            url = %server,
            page_size = config.page_size,
            retry_count = config.retry_count,
            "Initializing GOlr client"
        );
        Self {
            config,
            server,
            transport,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the request observer.
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &GolrConfig {
        &self.config
    }

    pub fn server_url(&self) -> &Url {
        &self.server
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_config(&self.config)
    }

    /// The first page of a query for documents of type `D`.
    pub fn page_query<'a, D: GolrDocument>(
        &self,
        constraints: &'a [FilterConstraint],
    ) -> PageQuery<'a> {
        PageQuery {
            category: D::CATEGORY,
            fields: D::relevant_fields(),
            constraints,
            start: 0,
            rows: self.config.page_size,
            indent: self.config.indent_json,
        }
    }

    /// Fetch `url` with the configured retry budget.
    pub async fn fetch_text(&self, url: &Url, control: &FetchControl) -> Result<String> {
        let policy = self.retry_policy();
        fetch_with_retry(
            self.transport.as_ref(),
            url,
            policy.new_state(),
            &policy,
            self.observer.as_ref(),
            control,
        )
        .await
    }

    /// Fetch and validate a single page.
    pub async fn fetch_page<D: GolrDocument>(
        &self,
        query: &PageQuery<'_>,
        control: &FetchControl,
    ) -> Result<GolrEnvelope<D>> {
        let url = build_select_url(&self.server, query)?;
        let text = self.fetch_text(&url, control).await?;
        parse_envelope(&text)
    }
}
