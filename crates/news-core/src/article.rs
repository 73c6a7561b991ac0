//! Article types.

use serde::{Deserialize, Serialize};

/// The publisher an article came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    /// Source identifier, when the feed provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable source name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A news article as returned by a feed.
///
/// Field names follow the feed's camelCase JSON so the queue file keeps
/// the same shape as the API payload. The `url` is the article's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default_source")]
    pub source: ArticleSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Article {
    /// Create an article with a url and title.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the source name.
    pub fn with_source(mut self, name: impl Into<String>) -> Self {
        self.source.name = Some(name.into());
        self
    }

    /// Source name, or an empty string when the feed omitted it.
    pub fn source_name(&self) -> &str {
        self.source.name.as_deref().unwrap_or("")
    }

    /// Whether the article carries a usable url.
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_source<'de, D>(deserializer: D) -> Result<ArticleSource, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ArticleSource>::deserialize(deserializer)?.unwrap_or_default())
}
