use reqwest::Url;

use crate::ApiError;

/// Base URL of the backend. Paths are appended textually so a base with a
/// sub-path (e.g. behind a reverse proxy) keeps its prefix.
#[derive(Debug, Clone)]
pub struct ApiUrl(String);

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ApiUrl {
    pub fn parse(base: &str) -> Result<Self, ApiError> {
        let trimmed = base.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base, e)))?;
        Ok(Self(trimmed.to_string()))
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", self.0, trimmed_path))
    }

    /// Add query parameters, skipping empty values.
    pub fn with_query(&self, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.0).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.0, e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
                pairs.append_pair(key, value);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    pub fn to_url(&self) -> Result<Url, ApiError> {
        self.with_query(&[])
    }
}
