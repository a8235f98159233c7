//! Remote facade over the TF2 item schema endpoints.
//!
//! [`SchemaClient`] owns an API key, the schema options, and a [`Transport`].
//! It exposes each fetch step on its own and the full
//! [`get_item_schema`](SchemaClient::get_item_schema) pipeline that assembles
//! an [`ItemSchema`].

mod config;
mod error;
mod pagination;
mod request;

pub use config::{ClientConfig, SchemaOptions};
pub use error::SchemaError;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};
use url::Url;

use crate::api::types::{SchemaItemsResult, SchemaOverviewResult};
use crate::api::{
    GET_SCHEMA_ITEMS_PATH, GET_SCHEMA_OVERVIEW_PATH, ReqwestTransport, SchemaQuery, Transport,
};
use crate::parser::{ClientSchema, ClientSchemaParser, KeyValuesParser};
use crate::schema::ItemSchema;

/// Client for the `IEconItems_440` schema endpoints.
#[derive(Clone)]
pub struct SchemaClient {
    api_key: String,
    options: SchemaOptions,
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    parser: Arc<dyn ClientSchemaParser>,
}

impl SchemaClient {
    /// Creates a client against the public Steam Web API.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Transport`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, options: SchemaOptions) -> Result<Self, SchemaError> {
        Self::with_config(api_key, options, ClientConfig::default())
    }

    /// Creates a client with explicit base URL, page bound and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Transport`] if the HTTP client cannot be built.
    pub fn with_config(
        api_key: impl Into<String>,
        options: SchemaOptions,
        config: ClientConfig,
    ) -> Result<Self, SchemaError> {
        let transport = ReqwestTransport::with_timeouts(config.timeouts)?;
        Ok(Self::with_transport(
            api_key,
            options,
            config,
            Arc::new(transport),
        ))
    }

    /// Creates a client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(
        api_key: impl Into<String>,
        options: SchemaOptions,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            options,
            config,
            transport,
            parser: Arc::new(KeyValuesParser),
        }
    }

    /// Replaces the client schema parser.
    #[must_use]
    pub fn with_parser(mut self, parser: Arc<dyn ClientSchemaParser>) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.options.version
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.options.language
    }

    #[must_use]
    pub fn schema_options(&self) -> &SchemaOptions {
        &self.options
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the overview reference tables.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Api`] for non-success statuses, or a transport
    /// or decode failure.
    #[instrument(skip(self), fields(version = %self.options.version, language = %self.options.language))]
    pub async fn get_schema_overview(&self) -> Result<SchemaOverviewResult, SchemaError> {
        let query = self.endpoint(GET_SCHEMA_OVERVIEW_PATH)?;
        request::get_result(self.transport.as_ref(), query.url()).await
    }

    /// Fetches every page of the item list.
    ///
    /// # Errors
    ///
    /// Fails on the first page that fails; with a configured page bound,
    /// returns [`SchemaError::PageLimitExceeded`] when it is reached.
    #[instrument(skip(self), fields(version = %self.options.version, language = %self.options.language))]
    pub async fn get_schema_items(&self) -> Result<SchemaItemsResult, SchemaError> {
        let query = self.endpoint(GET_SCHEMA_ITEMS_PATH)?;
        pagination::fetch_all_items(self.transport.as_ref(), query, self.config.max_pages).await
    }

    /// Fetches the raw client schema at `url` and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidUrl`], a classified fetch failure, or
    /// [`SchemaError::ClientSchema`] when parsing fails.
    #[instrument(skip(self))]
    pub async fn get_client_schema(&self, url: &str) -> Result<ClientSchema, SchemaError> {
        let parsed = Url::parse(url).map_err(|source| SchemaError::invalid_url(url, source))?;
        let text = request::get_text(self.transport.as_ref(), &parsed).await?;
        debug!(bytes = text.len(), "Parsing client schema");
        Ok(self.parser.parse(&text)?)
    }

    /// Fetches items and overview concurrently, then the client schema, and
    /// assembles the result.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any step, or
    /// [`SchemaError::MissingClientSchemaUrl`] when neither result names the
    /// client schema.
    #[instrument(skip(self), fields(version = %self.options.version, language = %self.options.language))]
    pub async fn get_item_schema(&self) -> Result<ItemSchema, SchemaError> {
        let (items, overview) =
            tokio::try_join!(self.get_schema_items(), self.get_schema_overview())?;

        let url = client_schema_url(&items, &overview)?.to_string();
        let client = self.get_client_schema(&url).await?;

        Ok(ItemSchema::assemble(
            items,
            overview,
            client,
            self.options.clone(),
        ))
    }

    fn endpoint(&self, method: &str) -> Result<SchemaQuery, SchemaError> {
        SchemaQuery::endpoint(
            &self.config.base_url,
            method,
            &self.options.version,
            &self.api_key,
            &self.options.language,
        )
        .map_err(|source| SchemaError::invalid_url(&self.config.base_url, source))
    }
}

impl fmt::Debug for SchemaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaClient")
            .field("api_key", &"<redacted>")
            .field("options", &self.options)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The items result's URL, or the overview's when the former is empty.
fn client_schema_url<'a>(
    items: &'a SchemaItemsResult,
    overview: &'a SchemaOverviewResult,
) -> Result<&'a str, SchemaError> {
    [items.items_game_url.as_str(), overview.items_game_url.as_str()]
        .into_iter()
        .find(|url| !url.is_empty())
        .ok_or(SchemaError::MissingClientSchemaUrl)
}
