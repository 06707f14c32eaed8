//! API Configuration
//!
//! Where the remote task collection lives.

use reqwest::Url;
use serde::Deserialize;

use crate::api::ApiError;

/// Hosted collection the board talks to unless overridden
pub const DEFAULT_BASE_URL: &str = "https://68ad68b4a0b85b2f2cf33821.mockapi.io/crm/todo";

/// Remote task collection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Collection endpoint; items live at `{base_url}/{id}`
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Build a config for `base_url`, rejecting anything that is not an absolute URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let config = Self {
            base_url: base_url.into(),
        };
        config.collection_url()?;
        Ok(config)
    }

    /// Use `override_url` when present, the default collection otherwise.
    pub fn from_override(override_url: Option<&str>) -> Result<Self, ApiError> {
        match override_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn collection_url(&self) -> Result<Url, ApiError> {
        let url = Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        Ok(url)
    }

    /// `{base_url}/{id}` with `id` encoded as one path segment
    pub(crate) fn item_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "not a hierarchical URL".to_string(),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}
