//! People-search HTTP client
//!
//! Talks to a JSON people-search service exposing a name/location search and
//! a per-person detail endpoint. One client is one browsing session: the
//! orchestrator uses it for both searches and detail fetches, strictly one
//! request at a time.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::enrichment::domain::{Candidate, CandidateDetail, DetailRef, LeadQuery, LookupError};
use crate::enrichment::traits::{DetailFetcher, LookupProvider};

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// People-search API client
pub struct PeopleSearchClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl PeopleSearchClient {
    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` bounds each request, connection included.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search by name and "City, State".
    pub async fn search(&self, query: &LeadQuery) -> Result<Vec<Candidate>, LookupError> {
        let response: dto::SearchResponse = self.get_json(&self.search_url(query)).await?;
        adapter::to_candidates(response)
    }

    /// Fetch the listings behind a search result.
    pub async fn fetch_detail(&self, detail_ref: &DetailRef) -> Result<CandidateDetail, LookupError> {
        let url = self.detail_url(detail_ref);
        match self.get_json::<dto::PersonDetail>(&url).await {
            Ok(detail) => Ok(adapter::to_detail(detail)),
            Err(LookupError::Api(msg)) if msg.starts_with("HTTP 404") => {
                Err(LookupError::UnknownReference(detail_ref.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn search_url(&self, query: &LeadQuery) -> String {
        format!(
            "{}/search?first_name={}&last_name={}&location={}{}",
            self.base_url,
            urlencoding::encode(&query.first_name),
            urlencoding::encode(&query.last_name),
            urlencoding::encode(&query.location()),
            self.key_param('&'),
        )
    }

    fn detail_url(&self, detail_ref: &DetailRef) -> String {
        format!(
            "{}/people/{}{}",
            self.base_url,
            urlencoding::encode(detail_ref.as_str()),
            self.key_param('?'),
        )
    }

    fn key_param(&self, separator: char) -> String {
        match &self.api_key {
            Some(key) => format!("{}key={}", separator, urlencoding::encode(key)),
            None => String::new(),
        }
    }

    /// Send a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LookupError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout(self.timeout)
            } else {
                LookupError::Network(e.to_string())
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Api(format!(
                "HTTP {}: {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

#[async_trait]
impl LookupProvider for PeopleSearchClient {
    async fn search(&self, query: &LeadQuery) -> Result<Vec<Candidate>, LookupError> {
        PeopleSearchClient::search(self, query).await
    }
}

#[async_trait]
impl DetailFetcher for PeopleSearchClient {
    async fn fetch_detail(&self, detail_ref: &DetailRef) -> Result<CandidateDetail, LookupError> {
        PeopleSearchClient::fetch_detail(self, detail_ref).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(key: Option<&str>) -> PeopleSearchClient {
        PeopleSearchClient::new("http://localhost:8080/api/", key.map(String::from), Duration::from_secs(5))
            .unwrap()
    }

    fn query() -> LeadQuery {
        LeadQuery {
            first_name: "Mary Ann".to_string(),
            last_name: "O'Neil".to_string(),
            city: "St. Louis".to_string(),
            state: "MO".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(client(None).base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = client(None).search_url(&query());
        assert_eq!(
            url,
            "http://localhost:8080/api/search?first_name=Mary%20Ann&last_name=O%27Neil&location=St.%20Louis%2C%20MO"
        );
    }

    #[test]
    fn test_api_key_appended() {
        let c = client(Some("k&y"));
        assert!(c.search_url(&query()).ends_with("&key=k%26y"));
        assert_eq!(
            c.detail_url(&DetailRef::new("p 1")),
            "http://localhost:8080/api/people/p%201?key=k%26y"
        );
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("skiptrace/"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_lookup_error() {
        // Port 9 (discard) is closed on any sane test machine
        let c = PeopleSearchClient::new("http://127.0.0.1:9", None, Duration::from_secs(2)).unwrap();
        let result = c.search(&query()).await;
        assert!(matches!(
            result,
            Err(LookupError::Network(_)) | Err(LookupError::Timeout(_))
        ));
    }
}
