//! Structured logging field name constants for the GOlr client.
//!
//! Events across the workspace use these names for their structured fields,
//! and spans declared with empty fields are filled in through them.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Terminal failure after the retry budget is spent |
//! | WARN  | Retry scheduled, result count mismatch, skipped extension payload |
//! | INFO  | Client construction, completed multi-page fetches |
//! | DEBUG | Per-request and per-page decisions |
//! | TRACE | Per-document iteration |

// ─── Request fields ────────────────────────────────────────────────────────

/// GOlr document category being queried.
pub const CATEGORY: &str = "category";

/// Fully built request URL.
pub const URL: &str = "url";

/// Row offset of a page request.
pub const START: &str = "start";

/// Rows requested per page.
pub const ROWS: &str = "rows";

/// Attempt number within one fetch (1-based).
pub const ATTEMPT: &str = "attempt";

/// Retries left after the current failure.
pub const REMAINING: &str = "remaining";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// `numFound` reported by the backend.
pub const NUM_FOUND: &str = "num_found";

/// Number of documents or annotations produced.
pub const RESULT_COUNT: &str = "result_count";

/// Backoff delay before the next attempt.
pub const DELAY_MS: &str = "delay_ms";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
