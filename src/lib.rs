//! TF2 Item Schema Library
//!
//! Fetches the Team Fortress 2 item schema from the Steam Web API, assembles
//! it into a queryable in-memory catalog, and snapshots it to JSON for
//! offline use.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`api`] - Endpoint URLs, wire types, transport seam and error classification
//! - [`client`] - Paginated item ingestion and the full fetch pipeline
//! - [`parser`] - Client schema (`items_game.txt`) KeyValues parsing
//! - [`schema`] - The assembled [`ItemSchema`] query engine and export/import
//! - [`manager`] - Keyed collections of clients and schemas

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod client;
pub mod manager;
pub mod parser;
pub mod schema;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use api::types::{
    AttachedParticleAttribute, Cursor, ItemAttribute, ItemQualities, ItemQualityNames,
    SchemaItem, SchemaItemsResult, SchemaOverview, SchemaOverviewResult,
};
pub use api::{
    ApiError, ApiErrorKind, ErrorCause, HttpResponse, HttpTimeouts, ReqwestTransport, Transport,
    TransportError,
};
pub use client::{ClientConfig, SchemaClient, SchemaError, SchemaOptions};
pub use manager::{Identifier, ManagedClientOptions, ManagerError, SchemaManager};
pub use parser::{ClientSchema, ClientSchemaParser, KeyValuesParser, ParseError};
pub use schema::{
    ItemSchema, SchemaComponents, SchemaContents, SchemaFileError, get_filename,
};
