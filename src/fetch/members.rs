//! Blocking client for the parliament.uk members-data platform (source B).
//!
//! Returns raw XML bodies; `builder::members` owns the parsing.

use anyhow::{Context, Result};
use reqwest::blocking::Client;

const DEFAULT_BASE_URL: &str =
    "http://data.parliament.uk/membersdataplatform/services/mnis/members/query";

pub struct MembersClient {
    client: Client,
    base_url: String,
}

impl MembersClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different host (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("parl-to-sqlite")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one query scoped to a resource, returning the raw XML body
    pub fn fetch(&self, request: &str, resource: &str) -> Result<String> {
        let url = format!("{}/{}/{}", self.base_url, request, resource);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to fetch {}", request))?;

        response.text().context("Failed to read response")
    }

    /// Address records for one constituency's member
    pub fn addresses_for_constituency(&self, constituency: &str) -> Result<String> {
        self.fetch(&format!("constituency={}", constituency), "Addresses/")
    }
}
