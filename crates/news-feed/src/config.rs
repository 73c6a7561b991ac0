//! NewsAPI client configuration.

/// Default NewsAPI base URL.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

/// Configuration for [`crate::NewsApiClient`].
#[derive(Clone)]
pub struct NewsApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// API key, sent as the `X-Api-Key` header.
    pub api_key: String,
    /// Search query.
    pub query: String,
    /// Two-letter language code.
    pub language: String,
    /// Restrict results to the last 24 hours.
    pub last_24_hours: bool,
}

impl NewsApiConfig {
    /// Create a configuration with the default query (`world`, English).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            query: "world".to_string(),
            language: "en".to_string(),
            last_24_hours: false,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the search query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Restrict results to the last 24 hours.
    pub fn with_last_24_hours(mut self, enabled: bool) -> Self {
        self.last_24_hours = enabled;
        self
    }

    /// URL of the everything endpoint.
    pub fn everything_url(&self) -> String {
        format!("{}/v2/everything", self.base_url)
    }
}

impl std::fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("query", &self.query)
            .field("language", &self.language)
            .field("last_24_hours", &self.last_24_hours)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NewsApiConfig::new("key");
        assert_eq!(config.everything_url(), "https://newsapi.org/v2/everything");
        assert_eq!(config.query, "world");
        assert_eq!(config.language, "en");
        assert!(!config.last_24_hours);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = NewsApiConfig::new("key").with_base_url("http://localhost:9000/");
        assert_eq!(config.everything_url(), "http://localhost:9000/v2/everything");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = NewsApiConfig::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
