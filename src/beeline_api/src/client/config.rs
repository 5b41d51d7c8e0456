use reqwest::Url;

use super::error::{ClientError, Result};
use crate::constants::BASE_URL;

/// Where the portal lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_url: String,
    /// `host[:port]` of the base url, the part redirect locations are split on.
    authority: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            authority: "my.beeline.ru".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| ClientError::InvalidBaseUrl(format!("{base_url} has no host")))?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            authority,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a `Location` header into a path on the portal.
    ///
    /// Only locations embedding the configured host are followed, anything
    /// else (relative paths, other hosts) is refused.
    pub(crate) fn redirect_path(&self, location: &str) -> Result<String> {
        match location.split_once(self.authority.as_str()) {
            Some((_, "")) => Ok("/".to_string()),
            Some((_, path)) => Ok(path.to_string()),
            None => Err(ClientError::InvalidRedirect(location.to_string())),
        }
    }
}
