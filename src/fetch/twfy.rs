//! Blocking client for the TheyWorkForYou API (source A).

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::builder::twfy::RawMp;

const DEFAULT_BASE_URL: &str = "https://www.theyworkforyou.com";

pub struct TwfyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TwfyClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different host (used by tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("parl-to-sqlite")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fetch one API action as parsed JSON
    pub fn fetch(&self, action: &str, extra_query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/api/{}", self.base_url, action);
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("output", "js")])
            .query(extra_query)
            .send()
            .with_context(|| format!("Failed to fetch {}", action))?;

        let text = response.text().context("Failed to read response")?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {} response", action))
    }

    /// All constituency names, via `getConstituencies`
    pub fn constituencies(&self) -> Result<Vec<String>> {
        let value = self.fetch("getConstituencies", &[])?;
        let entries = value
            .as_array()
            .context("getConstituencies: expected an array")?;

        entries
            .iter()
            .map(|entry| {
                entry
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .context("getConstituencies: entry without a name")
            })
            .collect()
    }

    /// All sitting MPs for one party, via `getMPs`
    pub fn mps_by_party(&self, party: &str) -> Result<Vec<RawMp>> {
        let value = self.fetch("getMPs", &[("party", party)])?;
        serde_json::from_value(value)
            .with_context(|| format!("Failed to decode MP records for party {}", party))
    }

    /// The sitting MP for one constituency, via `getMP`.
    ///
    /// The API answers a vacant seat with an `error` payload; that maps to
    /// `Ok(None)` rather than a failure.
    pub fn mp_for_constituency(&self, constituency: &str) -> Result<Option<RawMp>> {
        let value = self.fetch("getMP", &[("constituency", constituency)])?;

        if value.get("error").is_some() {
            return Ok(None);
        }

        // getMP has returned both a bare object and a one-element array
        let record = match value {
            Value::Array(items) => match items.into_iter().next() {
                Some(item) => item,
                None => return Ok(None),
            },
            other => other,
        };

        serde_json::from_value(record)
            .map(Some)
            .with_context(|| format!("Failed to decode MP record for {}", constituency))
    }
}
