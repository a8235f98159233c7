//! Schema options and client tuning knobs.

use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_LANGUAGE, DEFAULT_VERSION, HttpTimeouts, STEAM_API_BASE_URL};

/// Version and language a schema was fetched with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaOptions {
    pub version: String,
    pub language: String,
}

impl SchemaOptions {
    /// Builds options, falling back to the defaults for empty values.
    #[must_use]
    pub fn new(version: impl Into<String>, language: impl Into<String>) -> Self {
        Self::default()
            .with_version(version)
            .with_language(language)
    }

    /// Overrides the API method version; empty keeps the current value.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        if !version.is_empty() {
            self.version = version;
        }
        self
    }

    /// Overrides the language; empty keeps the current value.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        if !language.is_empty() {
            self.language = language;
        }
        self
    }
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Transport-level settings for a [`SchemaClient`](super::SchemaClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the `IEconItems_440` interface.
    pub base_url: String,
    /// Upper bound on item pages; `None` follows cursors until the server stops.
    pub max_pages: Option<usize>,
    pub timeouts: HttpTimeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: STEAM_API_BASE_URL.to_string(),
            max_pages: None,
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: HttpTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}
