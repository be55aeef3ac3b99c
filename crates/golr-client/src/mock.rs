//! Scripted transport for unit tests.
//!
//! Records every requested URL and answers from a responder closure that
//! receives the URL and the zero-based call index.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use golr_core::{Error, Result, Transport, Url};

type Responder = dyn Fn(&Url, usize) -> Result<String> + Send + Sync;

#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<Responder>,
    latency: Option<Duration>,
    calls: Arc<Mutex<Vec<Url>>>,
}

impl MockTransport {
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(&Url, usize) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            latency: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails with a transport error.
    pub fn always_failing() -> Self {
        Self::from_fn(|_, _| Err(Error::Transport("Unexpected HTTP status code: 503".into())))
    }

    /// The first `failures` calls fail, later calls return `body`.
    pub fn failing_then(body: impl Into<String>, failures: usize) -> Self {
        let body = body.into();
        Self::from_fn(move |_, call| {
            if call < failures {
                Err(Error::Transport(format!("connection reset ({})", call)))
            } else {
                Ok(body.clone())
            }
        })
    }

    /// Answer each page from `docs`, honoring `start`/`rows` and reporting
    /// `num_found` on every page.
    pub fn paged(num_found: u64, docs: Vec<Value>) -> Self {
        Self::from_fn(move |url, _| {
            let start = query_param(url, "start").unwrap_or(0) as usize;
            let rows = query_param(url, "rows").unwrap_or(0) as usize;
            let page: Vec<Value> = docs.iter().skip(start).take(rows).cloned().collect();
            Ok(envelope_json(num_found, start as u64, page))
        })
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }

    /// `start` of every recorded request, in call order.
    pub fn requested_offsets(&self) -> Vec<u64> {
        self.requested_urls()
            .iter()
            .filter_map(|url| query_param(url, "start"))
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_text(&self, url: &Url) -> Result<String> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(url.clone());
            calls.len() - 1
        };
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        (self.responder)(url, call)
    }
}

/// A successful GOlr response body.
pub fn envelope_json(num_found: u64, start: u64, docs: Vec<Value>) -> String {
    json!({
        "responseHeader": {"status": 0, "QTime": 1, "params": {}},
        "response": {"numFound": num_found, "start": start, "docs": docs}
    })
    .to_string()
}

/// Minimal annotation documents with distinct classes.
pub fn annotation_docs(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "bioentity": format!("MGI:MGI:{}", 1000 + i % 3),
                "annotation_class": format!("GO:{:07}", i),
                "evidence_type": "IDA"
            })
        })
        .collect()
}

pub fn query_param(url: &Url, key: &str) -> Option<u64> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
}

pub fn query_values(url: &Url, key: &str) -> Vec<String> {
    url.query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}
