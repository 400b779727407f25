//! Markdown loading with a single fallback.
//!
//! Project details and timeline entries carry markdown either inline or as
//! an uploaded file. Loading prefers inline text, then the file URL, then
//! the configured fallback document, and finally a static notice. Nothing is
//! retried beyond that one fallback attempt.

use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Shown when neither the document nor the fallback could be loaded.
pub const LOAD_ERROR_NOTICE: &str = "Error while loading…";

/// Where markdown can come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownSource {
    /// Raw markdown; used as-is when present.
    pub inline: Option<String>,
    /// URL of a markdown file.
    pub url: Option<String>,
}

impl MarkdownSource {
    pub fn inline(markdown: impl Into<String>) -> Self {
        Self {
            inline: Some(markdown.into()),
            url: None,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            inline: None,
            url: Some(url.into()),
        }
    }
}

/// Loaded content, ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownContent {
    Markdown(String),
    /// Plain notice shown instead of markdown.
    Notice(&'static str),
}

/// Outcome of [`MarkdownLoader::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMarkdown {
    pub content: MarkdownContent,
    /// Set when the requested document failed, even if the fallback loaded.
    pub error: bool,
}

#[derive(Error, Debug)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("status {0}")]
    Status(u16),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Fetches markdown documents over HTTP, or from disk for local paths.
#[derive(Debug, Clone)]
pub struct MarkdownLoader {
    http: reqwest::Client,
    fallback: String,
}

impl MarkdownLoader {
    /// Create a loader that falls back to `fallback` (URL or file path).
    pub fn new(fallback: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), fallback)
    }

    pub fn with_client(http: reqwest::Client, fallback: impl Into<String>) -> Self {
        Self {
            http,
            fallback: fallback.into(),
        }
    }

    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Load markdown from `source`, falling back once on failure.
    pub async fn load(&self, source: &MarkdownSource) -> LoadedMarkdown {
        if let Some(markdown) = source.inline.as_deref().filter(|md| !md.trim().is_empty()) {
            return LoadedMarkdown {
                content: MarkdownContent::Markdown(markdown.to_string()),
                error: false,
            };
        }

        let target = source
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(&self.fallback);

        match self.fetch(target).await {
            Ok(text) => {
                return LoadedMarkdown {
                    content: MarkdownContent::Markdown(text),
                    error: false,
                };
            }
            Err(err) => warn!(name: "markdown.load.failed", location = target, error = %err, "Markdown load failed"),
        }

        let content = if target == self.fallback {
            MarkdownContent::Notice(LOAD_ERROR_NOTICE)
        } else {
            match self.fetch(&self.fallback).await {
                Ok(text) => MarkdownContent::Markdown(text),
                Err(err) => {
                    warn!(name: "markdown.fallback.failed", location = %self.fallback, error = %err, "Fallback markdown failed");
                    MarkdownContent::Notice(LOAD_ERROR_NOTICE)
                }
            }
        };

        LoadedMarkdown {
            content,
            error: true,
        }
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                let response = self.http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status.as_u16()));
                }
                Ok(response.text().await?)
            }
            _ => Ok(tokio::fs::read_to_string(PathBuf::from(location)).await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_inline_markdown_wins() {
        let loader = MarkdownLoader::new("/does/not/exist.md");
        let loaded = loader
            .load(&MarkdownSource {
                inline: Some("# Hi".into()),
                url: Some("http://127.0.0.1:1/x.md".into()),
            })
            .await;
        assert_eq!(loaded.content, MarkdownContent::Markdown("# Hi".into()));
        assert!(!loaded.error);
    }

    #[tokio::test]
    async fn test_falls_back_to_local_file() {
        let mut fallback = tempfile::NamedTempFile::new().unwrap();
        write!(fallback, "Nothing here yet.").unwrap();
        let loader = MarkdownLoader::new(fallback.path().to_string_lossy());

        let loaded = loader
            .load(&MarkdownSource::url("/missing/project.md"))
            .await;
        assert_eq!(
            loaded.content,
            MarkdownContent::Markdown("Nothing here yet.".into())
        );
        assert!(loaded.error);
    }

    #[tokio::test]
    async fn test_missing_fallback_shows_notice() {
        let loader = MarkdownLoader::new("/missing/fallback.md");
        let loaded = loader.load(&MarkdownSource::url("/missing/project.md")).await;
        assert_eq!(loaded.content, MarkdownContent::Notice(LOAD_ERROR_NOTICE));
        assert!(loaded.error);
    }

    #[tokio::test]
    async fn test_no_source_uses_fallback_once() {
        let loader = MarkdownLoader::new("/missing/fallback.md");
        let loaded = loader.load(&MarkdownSource::default()).await;
        assert_eq!(loaded.content, MarkdownContent::Notice(LOAD_ERROR_NOTICE));
    }
}
