//! NewsAPI feed for the newsroom broadcaster.
//!
//! Fetches the newest articles matching a fixed query from the NewsAPI
//! `/v2/everything` endpoint.
//!
//! # Example
//!
//! ```no_run
//! use news_core::NewsFeed;
//! use news_feed::{NewsApiClient, NewsApiConfig};
//!
//! # async fn example() -> Result<(), news_core::FeedError> {
//! let config = NewsApiConfig::new("my-api-key").with_query("world");
//! let feed = NewsApiClient::new(config)?;
//!
//! for article in feed.fetch().await? {
//!     println!("{} - {}", article.title, article.url);
//! }
//! # Ok(())
//! # }
//! ```

mod config;

pub use config::{NewsApiConfig, DEFAULT_BASE_URL};

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use news_core::{Article, FeedError, NewsFeed};
use serde::Deserialize;
use tracing::{debug, info};

/// Timeout for a single feed request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response body of `/v2/everything`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// NewsAPI client.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    config: NewsApiConfig,
}

impl NewsApiClient {
    /// Create a client for the given configuration.
    pub fn new(config: NewsApiConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("newsroom/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FeedError::Request(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &NewsApiConfig {
        &self.config
    }

    /// Query parameters for the everything endpoint.
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.config.query.clone()),
            ("language", self.config.language.clone()),
            ("sortBy", "publishedAt".to_string()),
        ];
        if self.config.last_24_hours {
            let from = Utc::now() - chrono::Duration::hours(24);
            params.push(("from", from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        params
    }

    /// Fetch the current articles for the configured query.
    pub async fn fetch_everything(&self) -> Result<Vec<Article>, FeedError> {
        let url = self.config.everything_url();
        debug!(url = %url, query = %self.config.query, "Fetching articles");

        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.config.api_key)
            .query(&self.query_params())
            .send()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        // Error payloads carry the same envelope, so decode before checking the HTTP status
        let parsed: EverythingResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(FeedError::Request(format!("HTTP {}", status)));
            }
            Err(e) => return Err(FeedError::Decode(e.to_string())),
        };

        if parsed.status != "ok" {
            return Err(FeedError::Api {
                code: parsed.code.unwrap_or_else(|| status.as_u16().to_string()),
                message: parsed.message.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        info!(count = parsed.articles.len(), "Fetched articles");
        Ok(parsed.articles)
    }
}

#[async_trait]
impl NewsFeed for NewsApiClient {
    async fn fetch(&self) -> Result<Vec<Article>, FeedError> {
        self.fetch_everything().await
    }

    fn name(&self) -> &str {
        "NewsAPI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> NewsApiClient {
        NewsApiClient::new(NewsApiConfig::new("test-key").with_base_url(base_url)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_articles_in_order() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"source": {"id": null, "name": "Reuters"}, "title": "First", "url": "http://a", "description": "d"},
                {"source": {"id": null, "name": "AP"}, "title": "Second", "url": "http://b", "description": null}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("q", "world"))
            .and(query_param("language", "en"))
            .and(query_param("sortBy", "publishedAt"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let articles = test_client(&server.uri()).fetch().await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].url, "http://a");
        assert_eq!(articles[0].source_name(), "Reuters");
        assert_eq!(articles[1].title, "Second");
        assert!(articles[1].description.is_none());
    }

    #[tokio::test]
    async fn test_null_url_does_not_drop_batch() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "status": "ok",
            "totalResults": 3,
            "articles": [
                {"source": {"id": null, "name": "Reuters"}, "title": "First", "url": "http://a"},
                {"source": {"id": null, "name": null}, "title": "[Removed]", "url": null},
                {"source": null, "title": "Third", "url": "http://c"}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let articles = test_client(&server.uri()).fetch().await.unwrap();

        let linked: Vec<_> = articles
            .iter()
            .filter(|a| a.has_url())
            .map(|a| a.url.as_str())
            .collect();
        assert_eq!(articles.len(), 3);
        assert_eq!(linked, vec!["http://a", "http://c"]);
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid"
        });

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .respond_with(ResponseTemplate::new(401).set_body_json(&body))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).fetch().await.unwrap_err();
        match err {
            FeedError::Api { code, message } => {
                assert_eq!(code, "apiKeyInvalid");
                assert_eq!(message, "Your API key is invalid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Request(_)));
    }

    #[tokio::test]
    async fn test_malformed_ok_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[test]
    fn test_query_params_with_window() {
        let client = NewsApiClient::new(NewsApiConfig::new("k").with_last_24_hours(true)).unwrap();
        let params = client.query_params();

        assert!(params.contains(&("q", "world".to_string())));
        assert!(params.iter().any(|(k, v)| *k == "from" && v.ends_with('Z')));
    }

    #[test]
    fn test_query_params_without_window() {
        let client = NewsApiClient::new(NewsApiConfig::new("k")).unwrap();
        assert!(!client.query_params().iter().any(|(k, _)| *k == "from"));
    }
}
