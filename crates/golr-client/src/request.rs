//! GOlr `select` request construction.
//!
//! Every page request carries the same fixed parameters (JSON output,
//! `edismax`, no faceting, `q=*:*`), the field projection, the paging window,
//! a mandatory `document_category` filter, and one `fq` per constraint.

use golr_core::defaults::{DOCUMENT_CATEGORY_FIELD, SELECT_PATH};
use golr_core::{Error, FilterConstraint, Result, Url};

/// One page of a GOlr query. Only `start` changes between pages of a
/// paginated fetch.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery<'a> {
    pub category: &'a str,
    pub fields: &'a [&'a str],
    pub constraints: &'a [FilterConstraint],
    pub start: u64,
    pub rows: u32,
    pub indent: bool,
}

impl<'a> PageQuery<'a> {
    /// The same query moved to another row offset.
    pub fn at(self, start: u64) -> Self {
        Self { start, ..self }
    }
}

/// Parse and check a server base address.
///
/// Only absolute `http`/`https` addresses are accepted.
pub fn parse_server_url(server: &str) -> Result<Url> {
    let url = Url::parse(server.trim())
        .map_err(|e| Error::Build(format!("Invalid server address '{}': {}", server, e)))?;
    check_server_url(&url)?;
    Ok(url)
}

fn check_server_url(url: &Url) -> Result<()> {
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Build(format!(
            "Server address must be an absolute http(s) URL, got: {}",
            url
        )));
    }
    Ok(())
}

/// Build the `select` URL for one page.
///
/// Constraints without values are skipped. Fails only when `server` is not
/// usable as a base address.
pub fn build_select_url(server: &Url, query: &PageQuery<'_>) -> Result<Url> {
    check_server_url(server)?;

    let mut url = server.clone();
    let path = format!("{}{}", server.path().trim_end_matches('/'), SELECT_PATH);
    url.set_path(&path);

    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("defType", "edismax")
            .append_pair("qt", "standard")
            .append_pair("wt", "json");
        if query.indent {
            pairs.append_pair("indent", "on");
        }
        pairs
            .append_pair("fl", &query.fields.join(","))
            .append_pair("facet", "false")
            .append_pair("json.nl", "arrarr")
            .append_pair("q", "*:*")
            .append_pair("rows", &query.rows.to_string())
            .append_pair("start", &query.start.to_string())
            .append_pair(
                "fq",
                &format!("{}:\"{}\"", DOCUMENT_CATEGORY_FIELD, query.category),
            );
        for fq in query
            .constraints
            .iter()
            .filter_map(FilterConstraint::to_filter_query)
        {
            pairs.append_pair("fq", &fq);
        }
    }

    Ok(url)
}
