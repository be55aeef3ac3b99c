//! Retrieval of complete result sets, one page at a time.
//!
//! Page 0 determines `numFound`; the remaining pages are requested in
//! ascending offset order, each with its own retry budget. Any failure aborts
//! the whole fetch.

use tracing::{debug, field, info, info_span, warn, Instrument};

use golr_core::logging::{NUM_FOUND, RESULT_COUNT};
use golr_core::{Error, FilterConstraint, GolrDocument, Result};

use crate::client::GolrClient;
use crate::retry::FetchControl;

/// Offsets of the pages after page 0: `P, 2P, ...` below `ceil(N/P) * P`.
pub fn remaining_page_offsets(num_found: u64, page_size: u32) -> impl Iterator<Item = u64> {
    let page_size = u64::from(page_size.max(1));
    let pages = num_found.div_ceil(page_size);
    (1..pages).map(move |page| page * page_size)
}

impl GolrClient {
    /// Fetch every document of type `D` matching `constraints`.
    pub async fn fetch_all<D: GolrDocument>(
        &self,
        constraints: &[FilterConstraint],
    ) -> Result<Vec<D>> {
        self.fetch_all_with(constraints, &FetchControl::new()).await
    }

    /// [`fetch_all`](Self::fetch_all) under a deadline or cancellation signal.
    pub async fn fetch_all_with<D: GolrDocument>(
        &self,
        constraints: &[FilterConstraint],
        control: &FetchControl,
    ) -> Result<Vec<D>> {
        let span = info_span!(
            "golr_fetch_all",
            category = D::CATEGORY,
            num_found = field::Empty,
            result_count = field::Empty,
        );

        async move {
            let query = self.page_query::<D>(constraints);
            let first = self.fetch_page::<D>(&query, control).await?;
            let num_found = first.num_found();
            tracing::Span::current().record(NUM_FOUND, num_found);

            let mut docs = first.into_docs();
            let mut pages = 1u64;

            for start in remaining_page_offsets(num_found, query.rows) {
                debug!(start, rows = query.rows, "Fetching GOlr page");
                let page = self.fetch_page::<D>(&query.at(start), control).await?;
                if page.num_found() != num_found {
                    warn!(
                        start,
                        num_found,
                        page_num_found = page.num_found(),
                        "numFound changed between pages"
                    );
                }
                docs.extend(page.into_docs());
                pages += 1;
            }

            if docs.len() as u64 != num_found {
                warn!(
                    num_found,
                    result_count = docs.len(),
                    "Fetched document count differs from numFound"
                );
            }

            tracing::Span::current().record(RESULT_COUNT, docs.len());
            if pages > 1 {
                info!(pages, result_count = docs.len(), "GOlr fetch complete");
            } else {
                debug!(result_count = docs.len(), "GOlr fetch complete");
            }
            Ok::<_, Error>(docs)
        }
        .instrument(span)
        .await
    }
}
