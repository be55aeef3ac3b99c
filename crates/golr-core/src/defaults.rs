//! Centralized default constants for the GOlr annotation client.
//!
//! All crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default GOlr server base address.
pub const GOLR_URL: &str = "https://golr.geneontology.org/solr";

/// Path appended to the server base address for queries.
pub const SELECT_PATH: &str = "/select";

// =============================================================================
// PAGINATION
// =============================================================================

/// Rows requested per page.
pub const PAGE_SIZE: u32 = 100;

// =============================================================================
// RETRY
// =============================================================================

/// Number of retries after the initial attempt.
pub const RETRY_COUNT: u32 = 3;

/// Lower bound of the jittered backoff between attempts.
pub const BACKOFF_MIN_MS: u64 = 400;

/// Upper bound of the jittered backoff between attempts.
pub const BACKOFF_MAX_MS: u64 = 1500;

/// Maximum characters of an error body kept in a transport failure message.
pub const ERROR_BODY_SNIPPET_CHARS: usize = 512;

// =============================================================================
// REDIRECTS
// =============================================================================

/// Maximum redirect hops followed by the transport.
pub const MAX_REDIRECTS: usize = 10;

// =============================================================================
// QUERY
// =============================================================================

/// Category filter field present on every GOlr document.
pub const DOCUMENT_CATEGORY_FIELD: &str = "document_category";

/// Success sentinel in `responseHeader.status`.
pub const STATUS_OK: &str = "0";

/// Charset assumed when the response does not declare one.
pub const DEFAULT_CHARSET: &str = "utf-8";
