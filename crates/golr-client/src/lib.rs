//! # golr-client
//!
//! Client for the GOlr (Solr) annotation search backend.
//!
//! This crate provides:
//! - Request construction for the `select` handler
//! - A single-attempt reqwest transport
//! - Bounded retry with jittered backoff, deadlines and cancellation
//! - Response envelope validation
//! - Pagination over complete result sets
//! - Typed retrievals for annotations, bioentities and ontology classes
//!
//! # Example
//!
//! ```rust,no_run
//! use golr_client::{GolrClient, GolrConfig};
//!
//! #[tokio::main]
//! async fn main() -> golr_core::Result<()> {
//!     let client = GolrClient::new(GolrConfig::default())?;
//!     let annotations = client.annotations_for_gene("MGI:MGI:97290").await?;
//!     println!("{} annotations", annotations.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod logging;
pub mod observer;
pub mod paginator;
pub mod request;
pub mod retrieve;
pub mod retry;
pub mod transport;

// Scripted transport for testing
#[cfg(test)]
pub(crate) mod mock;

pub use client::GolrClient;
pub use config::GolrConfig;
pub use envelope::{parse_envelope, GolrEnvelope, ResponseBody, ResponseHeader};
pub use logging::{init_tracing, LogFormat};
pub use observer::TracingObserver;
pub use paginator::remaining_page_offsets;
pub use request::{build_select_url, parse_server_url, PageQuery};
pub use retry::{fetch_with_retry, FetchControl, RetryPolicy, RetryState};
pub use transport::HttpTransport;
