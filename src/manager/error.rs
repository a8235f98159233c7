use thiserror::Error;

use super::Identifier;
use crate::client::SchemaError;
use crate::schema::SchemaFileError;

/// Errors returned by [`SchemaManager`](super::SchemaManager).
#[derive(Debug, Error)]
pub enum ManagerError {
    /// No client is registered under the identifier.
    #[error("no schema client registered for identifier '{0}'")]
    UnknownClient(Identifier),

    /// No schema is stored under the identifier.
    #[error("no item schema stored for identifier '{0}'")]
    UnknownSchema(Identifier),

    #[error(transparent)]
    Fetch(#[from] SchemaError),

    #[error(transparent)]
    File(#[from] SchemaFileError),
}
