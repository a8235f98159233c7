//! Client schema parsing.
//!
//! The client schema (`items_game.txt`) is fetched as raw text and handed to a
//! [`ClientSchemaParser`]. The crate never inspects the parsed result; it only
//! stores it in the assembled [`ItemSchema`](crate::ItemSchema) and writes it
//! back out on export.

mod error;
pub mod keyvalues;

pub use error::ParseError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque, parsed client schema.
///
/// Serializes transparently as the parsed JSON tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSchema(Value);

impl ClientSchema {
    /// Wraps an already parsed tree.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrows the parsed tree.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the schema, returning the parsed tree.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Follows a JSON pointer (`/items_game/qualities/strange/value`) into the tree.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }
}

impl From<Value> for ClientSchema {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Turns raw client schema text into a [`ClientSchema`].
pub trait ClientSchemaParser: Send + Sync {
    /// Parses the complete text of the client schema resource.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the text cannot be parsed.
    fn parse(&self, text: &str) -> Result<ClientSchema, ParseError>;
}

/// Default parser for Valve KeyValues text.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValuesParser;

impl ClientSchemaParser for KeyValuesParser {
    #[tracing::instrument(level = "debug", skip_all, fields(text_len = text.len()))]
    fn parse(&self, text: &str) -> Result<ClientSchema, ParseError> {
        keyvalues::parse(text).map(ClientSchema)
    }
}
