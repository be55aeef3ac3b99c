//! GOlr response envelope parsing and validation.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use golr_core::defaults::STATUS_OK;
use golr_core::{Error, Result};

/// `responseHeader` of a GOlr response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseHeader {
    /// Solr status; `"0"` on success. Numbers are normalized to strings.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub status: String,
    #[serde(rename = "QTime", default, deserialize_with = "scalar_as_u64")]
    pub qtime: Option<u64>,
    #[serde(default)]
    pub params: Value,
}

/// `response` of a GOlr response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseBody<D> {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    #[serde(default)]
    pub start: u64,
    #[serde(default = "Vec::new")]
    pub docs: Vec<D>,
}

/// A validated GOlr response.
#[derive(Debug, Clone, PartialEq)]
pub struct GolrEnvelope<D> {
    pub response_header: ResponseHeader,
    pub response: ResponseBody<D>,
}

impl<D> GolrEnvelope<D> {
    pub fn num_found(&self) -> u64 {
        self.response.num_found
    }

    pub fn into_docs(self) -> Vec<D> {
        self.response.docs
    }
}

#[derive(Deserialize)]
struct RawEnvelope<D> {
    #[serde(rename = "responseHeader")]
    response_header: Option<ResponseHeader>,
    response: Option<ResponseBody<D>>,
}

/// Parse a response body into a validated envelope.
///
/// Both `responseHeader` and `response` must be present and the header
/// status must be `"0"`. Every rejection is [`Error::InvalidResponse`].
pub fn parse_envelope<D>(text: &str) -> Result<GolrEnvelope<D>>
where
    D: de::DeserializeOwned,
{
    let raw: Option<RawEnvelope<D>> = serde_json::from_str(text)
        .map_err(|e| Error::InvalidResponse(format!("Could not parse JSON response: {}", e)))?;

    let (Some(response_header), Some(response)) = raw
        .map(|r| (r.response_header, r.response))
        .unwrap_or((None, None))
    else {
        return Err(Error::InvalidResponse(
            "Unexpected response content in GOLR response.".to_string(),
        ));
    };

    if response_header.status != STATUS_OK {
        return Err(Error::InvalidResponse(format!(
            "Unexpected response status in GOLR response header: {}",
            response_header.status
        )));
    }

    Ok(GolrEnvelope {
        response_header,
        response,
    })
}

fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a number or string, got {}",
            other
        ))),
    }
}

fn scalar_as_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_u64()),
        Value::String(s) => Ok(s.trim().parse().ok()),
        other => Err(de::Error::custom(format!(
            "expected a number or string, got {}",
            other
        ))),
    }
}
