use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Cookies sent to the portal, keyed by name.
///
/// Attributes (path, expiry, ...) are dropped: the portal is a single host
/// and the jar only lives for one run, or until the session file is read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar(BTreeMap<String, String>);

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge one `Set-Cookie` header value.
    ///
    /// Only the leading `name=value` pair is kept. Empty values are ignored and
    /// never clear an existing entry.
    pub fn merge_set_cookie(&mut self, header: &str) {
        let pair = header.split("; ").next().unwrap_or_default();
        let Some((name, value)) = pair.split_once('=') else {
            trace!("Ignoring malformed Set-Cookie header: {}", header);
            return;
        };
        if value.is_empty() {
            return;
        }
        self.insert(name, value);
    }

    /// Merge every `Set-Cookie` header of a response.
    pub fn merge_headers(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            match value.to_str() {
                Ok(header) => self.merge_set_cookie(header),
                Err(_) => trace!("Ignoring non UTF-8 Set-Cookie header"),
            }
        }
    }

    /// Value of the `Cookie` request header, `None` when there is nothing to send.
    pub fn to_header(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(
            self.0
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
