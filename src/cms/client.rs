//! Read-only HTTP client for the headless CMS.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::backend::normalize_base;
use crate::error::{CmsError, CmsResult};

/// `data` may hold one entry (single types), many (collections) or nothing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "none")]
    data: Option<OneOrMany<T>>,
}

fn none<T>() -> Option<T> {
    None
}

/// Decode a CMS response body into a list.
///
/// `{"data": {..}}` becomes a one-element list, `{"data": [..]}` is kept
/// as-is and a null or missing `data` yields an empty list.
pub fn normalize_data<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, serde_json::Error> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    Ok(match envelope.data {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

/// Client for `GET {base}/api/...` content endpoints.
#[derive(Debug, Clone)]
pub struct CmsClient {
    base_url: Url,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl CmsClient {
    /// Create a client for the CMS at `base_url`, optionally authenticated.
    pub fn new(base_url: impl AsRef<str>, api_key: Option<String>) -> CmsResult<Self> {
        Self::with_client(base_url, api_key, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        api_key: Option<String>,
        http: reqwest::Client,
    ) -> CmsResult<Self> {
        Ok(Self {
            base_url: normalize_base(base_url.as_ref())?,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch `endpoint` (e.g. `/projects?populate=image`) as a list of `T`.
    pub async fn fetch_collection<T: DeserializeOwned>(&self, endpoint: &str) -> CmsResult<Vec<T>> {
        let url = self
            .base_url
            .join(&format!("api/{}", endpoint.trim_start_matches('/')))?;

        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(name: "cms.fetch.failed", endpoint, status = status.as_u16(), "CMS request failed");
            return Err(CmsError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let items = normalize_data(&body).map_err(|source| CmsError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })?;
        debug!(name: "cms.fetch", endpoint, count = items.len(), "CMS content fetched");
        Ok(items)
    }

    /// Fetch a single-type entry, failing with [`CmsError::Empty`] if absent.
    pub async fn fetch_single<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        what: &'static str,
    ) -> CmsResult<T> {
        self.fetch_collection(endpoint)
            .await?
            .into_iter()
            .next()
            .ok_or(CmsError::Empty(what))
    }

    /// Resolve an asset path returned by the CMS to an absolute URL.
    ///
    /// Absolute URLs (e.g. assets on an external upload provider) are returned
    /// unchanged.
    #[must_use]
    pub fn file_url(&self, path: &str) -> String {
        if Url::parse(path).is_ok() {
            return path.to_string();
        }
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_or_else(|_| format!("{}{path}", self.base_url), String::from)
    }
}
