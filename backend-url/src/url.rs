use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Base URL of the backend API.
///
/// An empty value means "same origin as the page".
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BackendUrl(String);

impl BackendUrl {
    /// Normalize user input by removing a single trailing slash.
    ///
    /// No other validation is done; malformed URLs are kept as given.
    pub fn normalize(url: impl Into<String>) -> Self {
        let mut url = url.into();
        if url.ends_with('/') {
            url.pop();
        }
        Self(url)
    }

    /// Wrap a value exactly as it was stored.
    pub fn verbatim(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn same_origin() -> Self {
        Self(String::new())
    }

    pub fn is_same_origin(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for BackendUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<BackendUrl> for String {
    fn from(url: BackendUrl) -> Self {
        url.0
    }
}
