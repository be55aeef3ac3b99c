//! Request observer that reports through `tracing`.

use tracing::{error, info, warn};

use golr_core::{Error, RequestObserver, Url};

/// Emits one event per observer hook under the `golr_client::observer` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, url: &Url) {
        info!(target: "golr_client::observer", url = %url, "GOlr request");
    }

    fn on_retry(&self, url: &Url, error: &Error, remaining: u32) {
        warn!(
            target: "golr_client::observer",
            url = %url,
            remaining,
            error = %error,
            "GOlr request retry"
        );
    }

    fn on_terminal_failure(&self, url: &Url, error: &Error) {
        error!(
            target: "golr_client::observer",
            url = %url,
            error = %error,
            "GOlr request failed"
        );
    }
}
