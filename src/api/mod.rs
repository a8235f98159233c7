//! Steam Web API plumbing: endpoint constants, query construction, wire types,
//! the HTTP transport seam, and error classification.
//!
//! # Architecture
//!
//! - [`SchemaQuery`] - Endpoint URL with overwrite-on-set query parameters
//! - [`Transport`] - Async trait for "GET a URL, return status + body"
//! - [`ApiError`] - Classified non-success response with preserved cause
//! - [`types`] - Serde models for `GetSchemaItems` / `GetSchemaOverview`

mod error;
mod transport;
pub mod types;

pub use error::{ApiError, ApiErrorKind, ErrorCause};
pub use transport::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpResponse, HttpTimeouts,
    ReqwestTransport, Transport, TransportError, redact,
};

use url::Url;

/// Base URL of the TF2 economy item interface.
pub const STEAM_API_BASE_URL: &str = "https://api.steampowered.com/IEconItems_440/";

/// Path of the paginated item list method.
pub const GET_SCHEMA_ITEMS_PATH: &str = "GetSchemaItems";

/// Path of the reference table method.
pub const GET_SCHEMA_OVERVIEW_PATH: &str = "GetSchemaOverview";

/// Query parameter carrying the pagination cursor.
pub const START_PARAMETER: &str = "start";

/// Default API method version.
pub const DEFAULT_VERSION: &str = "v0001";

/// Default ISO 639 language code.
pub const DEFAULT_LANGUAGE: &str = "en";

/// An endpoint URL whose query parameters can be overwritten between requests.
///
/// Setting a parameter that already exists replaces its value in place, so
/// re-setting the pagination cursor never accumulates duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaQuery {
    url: Url,
}

impl SchemaQuery {
    /// Joins `segments` onto `base_url` with `/`.
    ///
    /// A missing trailing slash on the base is tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the base URL or joined path is invalid.
    pub fn new(base_url: &str, segments: &[&str]) -> Result<Self, url::ParseError> {
        let base = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        let url = if segments.is_empty() {
            base
        } else {
            base.join(&segments.join("/"))?
        };
        Ok(Self { url })
    }

    /// Builds the URL for one of the schema methods.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `base_url` is not a valid URL.
    pub fn endpoint(
        base_url: &str,
        method: &str,
        version: &str,
        api_key: &str,
        language: &str,
    ) -> Result<Self, url::ParseError> {
        let mut query = Self::new(base_url, &[method, version])?;
        query.set_param("key", api_key);
        query.set_param("language", language);
        Ok(query)
    }

    /// Sets `name` to `value`, overwriting an existing value.
    pub fn set_param(&mut self, name: &str, value: &str) {
        let mut pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut replaced = false;
        pairs.retain_mut(|(key, existing)| {
            if key.as_str() != name {
                return true;
            }
            if replaced {
                return false;
            }
            value.clone_into(existing);
            replaced = true;
            true
        });
        if !replaced {
            pairs.push((name.to_string(), value.to_string()));
        }

        self.url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    /// Returns the current value of `name`, if set.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL with the API key masked, for logs.
    #[must_use]
    pub fn redacted(&self) -> String {
        redact(&self.url)
    }
}
