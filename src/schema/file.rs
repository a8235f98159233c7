//! JSON export and import of an assembled schema.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument};

use super::ItemSchema;

const JSON_EXTENSION: &str = ".json";

/// Errors from reading or writing a schema file.
///
/// Source errors are passed through untouched.
#[derive(Debug, Error)]
pub enum SchemaFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Appends `.json` to `name` unless it already ends with it.
#[must_use]
pub fn get_filename(name: &str) -> String {
    if name.ends_with(JSON_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{JSON_EXTENSION}")
    }
}

impl ItemSchema {
    /// Writes the schema as JSON to `directory/filename`, creating the
    /// directory if needed. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaFileError::Io`] if the directory or file cannot be
    /// written.
    #[instrument(skip(self, directory), fields(directory = %directory.as_ref().display()))]
    pub async fn export(
        &self,
        directory: impl AsRef<Path>,
        filename: &str,
    ) -> Result<PathBuf, SchemaFileError> {
        let directory = directory.as_ref();
        tokio::fs::create_dir_all(directory).await?;

        let path = directory.join(get_filename(filename));
        let json = serde_json::to_vec(self)?;
        tokio::fs::write(&path, &json).await?;

        info!(
            path = %path.display(),
            bytes = json.len(),
            items = self.items().len(),
            "Exported item schema"
        );
        Ok(path)
    }

    /// Reads a schema previously written by [`export`](Self::export).
    ///
    /// # Errors
    ///
    /// Returns [`SchemaFileError::Io`] when the file cannot be read and
    /// [`SchemaFileError::Json`] when it is not a schema document.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn import(path: impl AsRef<Path>) -> Result<Self, SchemaFileError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let schema: Self = serde_json::from_slice(&bytes)?;

        info!(
            path = %path.display(),
            items = schema.items().len(),
            version = schema.version(),
            language = schema.language(),
            "Imported item schema"
        );
        Ok(schema)
    }
}
