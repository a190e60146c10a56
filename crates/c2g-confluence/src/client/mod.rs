//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence REST API
//! with HTTP basic authentication (account name + API token).

mod export;
mod pages;
mod spaces;

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::ConfluenceError;
use crate::types::PagedResponse;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - Confluence site base URL (e.g., `https://example.atlassian.net/wiki`)
    /// * `username` - Atlassian account name
    /// * `api_token` - Atlassian API token
    #[must_use]
    pub fn from_config(base_url: &str, username: &str, api_token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = STANDARD.encode(format!("{username}:{api_token}"));

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: format!("Basic {credentials}"),
        }
    }

    /// Site base URL without trailing slash.
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }

    /// Issue a GET request and decode the JSON response.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ConfluenceError> {
        let mut request = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json");
        for (key, value) in query {
            request = request.query(*key, value);
        }

        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body = body_reader.read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Collect every result of a paginated list endpoint.
    ///
    /// Requests `start=0,limit=N`, then advances `start` by the limit the
    /// server reports until no `_links.next` is present.
    fn get_all<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        limit: usize,
    ) -> Result<Vec<T>, ConfluenceError> {
        let mut entities = Vec::new();
        let mut start = 0;
        loop {
            let mut params = query.to_vec();
            params.push(("start", start.to_string()));
            params.push(("limit", limit.to_string()));

            let page: PagedResponse<T> = self.get_json(url, &params)?;
            let has_next = page.has_next();
            let page_limit = page.limit.unwrap_or(limit).max(1);
            entities.extend(page.results);
            debug!("Got {} total entities from {}", entities.len(), url);

            if !has_next {
                return Ok(entities);
            }
            start += page_limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_trims_trailing_slash() {
        let client = ConfluenceClient::from_config("https://wiki.example.com/wiki/", "me", "t");
        assert_eq!(client.base_url(), "https://wiki.example.com/wiki");
        assert_eq!(client.api_url(), "https://wiki.example.com/wiki/rest/api");
    }

    #[test]
    fn test_basic_auth_header() {
        let client = ConfluenceClient::from_config("https://wiki.example.com", "user", "pass");
        // base64("user:pass")
        assert_eq!(client.auth_header, "Basic dXNlcjpwYXNz");
    }
}
