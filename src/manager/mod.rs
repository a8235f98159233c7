//! Keyed collections of schema clients and fetched schemas.
//!
//! A [`SchemaManager`] holds one [`SchemaClient`] per identifier (typically
//! one per language) and the [`ItemSchema`] most recently fetched for each.
//! Only [`update_schema`](SchemaManager::update_schema) and the file
//! operations perform I/O; everything else is a plain map operation. The
//! manager does no locking of its own.

mod error;

pub use error::ManagerError;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::{ReqwestTransport, Transport};
use crate::client::{ClientConfig, SchemaClient, SchemaError, SchemaOptions};
use crate::schema::{ItemSchema, SchemaFileError, get_filename};

/// Key of a managed client or schema: a name or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(u64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

/// How to build one managed client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedClientOptions {
    pub identifier: Identifier,
    /// API method version; empty selects the default.
    #[serde(default)]
    pub version: String,
    /// Language code; empty selects the default.
    #[serde(default)]
    pub language: String,
    /// Base URL override; `None` keeps the manager's [`ClientConfig`] value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Page bound override; `None` keeps the manager's [`ClientConfig`] value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
}

impl ManagedClientOptions {
    #[must_use]
    pub fn new(identifier: impl Into<Identifier>) -> Self {
        Self {
            identifier: identifier.into(),
            version: String::new(),
            language: String::new(),
            base_url: None,
            max_pages: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    #[must_use]
    pub fn schema_options(&self) -> SchemaOptions {
        SchemaOptions::new(self.version.as_str(), self.language.as_str())
    }

    /// `shared` with this client's overrides applied.
    #[must_use]
    pub fn client_config(&self, shared: &ClientConfig) -> ClientConfig {
        let mut config = shared.clone();
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if self.max_pages.is_some() {
            config.max_pages = self.max_pages;
        }
        config
    }
}

/// Serialized manager state. API keys are never written.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ManagerState {
    clients: Vec<ManagedClientOptions>,
    schemas: Vec<ManagedSchema>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ManagedSchema {
    identifier: Identifier,
    schema: ItemSchema,
}

/// Owner of several clients and their fetched schemas.
#[derive(Debug, Default)]
pub struct SchemaManager {
    clients: HashMap<Identifier, SchemaClient>,
    schemas: HashMap<Identifier, ItemSchema>,
}

impl SchemaManager {
    /// Builds one client per entry of `clients`, all sharing `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Fetch`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, clients: &[ManagedClientOptions]) -> Result<Self, ManagerError> {
        Self::with_config(api_key, clients, &ClientConfig::default())
    }

    /// Like [`new`](Self::new) with an explicit client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Fetch`] if the HTTP client cannot be built.
    pub fn with_config(
        api_key: &str,
        clients: &[ManagedClientOptions],
        config: &ClientConfig,
    ) -> Result<Self, ManagerError> {
        let transport = ReqwestTransport::with_timeouts(config.timeouts).map_err(SchemaError::from)?;
        Ok(Self::with_transport(
            api_key,
            clients,
            config,
            Arc::new(transport),
        ))
    }

    /// Builds the clients over one shared transport.
    #[must_use]
    pub fn with_transport(
        api_key: &str,
        clients: &[ManagedClientOptions],
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let clients = clients
            .iter()
            .map(|options| {
                let client = SchemaClient::with_transport(
                    api_key,
                    options.schema_options(),
                    options.client_config(config),
                    Arc::clone(&transport),
                );
                (options.identifier.clone(), client)
            })
            .collect();
        Self {
            clients,
            schemas: HashMap::new(),
        }
    }

    // ==================== Clients ====================

    #[must_use]
    pub fn has_client(&self, identifier: &Identifier) -> bool {
        self.clients.contains_key(identifier)
    }

    /// Registers `client`, replacing any client under the same identifier.
    pub fn set_client(&mut self, identifier: impl Into<Identifier>, client: SchemaClient) {
        self.clients.insert(identifier.into(), client);
    }

    /// # Errors
    ///
    /// Returns [`ManagerError::UnknownClient`] for an unregistered identifier.
    pub fn get_client(&self, identifier: &Identifier) -> Result<&SchemaClient, ManagerError> {
        self.clients
            .get(identifier)
            .ok_or_else(|| ManagerError::UnknownClient(identifier.clone()))
    }

    /// Removes a client; returns whether one was registered.
    pub fn delete_client(&mut self, identifier: &Identifier) -> bool {
        self.clients.remove(identifier).is_some()
    }

    #[must_use]
    pub fn clients(&self) -> Vec<&SchemaClient> {
        self.clients.values().collect()
    }

    // ==================== Schemas ====================

    #[must_use]
    pub fn has_schema(&self, identifier: &Identifier) -> bool {
        self.schemas.contains_key(identifier)
    }

    pub fn set_schema(&mut self, identifier: impl Into<Identifier>, schema: ItemSchema) {
        self.schemas.insert(identifier.into(), schema);
    }

    /// # Errors
    ///
    /// Returns [`ManagerError::UnknownSchema`] for an unknown identifier.
    pub fn get_schema(&self, identifier: &Identifier) -> Result<&ItemSchema, ManagerError> {
        self.schemas
            .get(identifier)
            .ok_or_else(|| ManagerError::UnknownSchema(identifier.clone()))
    }

    pub fn delete_schema(&mut self, identifier: &Identifier) -> bool {
        self.schemas.remove(identifier).is_some()
    }

    #[must_use]
    pub fn schemas(&self) -> Vec<&ItemSchema> {
        self.schemas.values().collect()
    }

    /// Re-fetches the schema with the client under `identifier` and stores it
    /// under the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::UnknownClient`] or the fetch failure; the
    /// previously stored schema is kept on failure.
    #[instrument(skip_all, fields(identifier = %identifier))]
    pub async fn update_schema(
        &mut self,
        identifier: &Identifier,
    ) -> Result<&ItemSchema, ManagerError> {
        let schema = self.get_client(identifier)?.get_item_schema().await?;
        info!(items = schema.items().len(), "Updated managed schema");
        Ok(self
            .schemas
            .entry(identifier.clone())
            .insert_entry(schema)
            .into_mut())
    }

    // ==================== Files ====================

    /// Writes every client's options and every stored schema as JSON.
    ///
    /// Each client keeps its version, language, base URL and page bound. API
    /// keys and HTTP timeouts are not written; [`import`](Self::import) takes
    /// them from its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::File`] if the file cannot be written.
    #[instrument(skip(self, directory), fields(directory = %directory.as_ref().display()))]
    pub async fn export(
        &self,
        directory: impl AsRef<Path>,
        filename: &str,
    ) -> Result<PathBuf, ManagerError> {
        let directory = directory.as_ref();
        tokio::fs::create_dir_all(directory)
            .await
            .map_err(SchemaFileError::from)?;

        let path = directory.join(get_filename(filename));
        let json = serde_json::to_vec(&self.to_state()).map_err(SchemaFileError::from)?;
        tokio::fs::write(&path, &json)
            .await
            .map_err(SchemaFileError::from)?;

        info!(
            path = %path.display(),
            clients = self.clients.len(),
            schemas = self.schemas.len(),
            "Exported schema manager"
        );
        Ok(path)
    }

    /// Restores a manager written by [`export`](Self::export), rebuilding its
    /// clients with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::File`] if the file cannot be read or parsed.
    pub async fn import(path: impl AsRef<Path>, api_key: &str) -> Result<Self, ManagerError> {
        let state = read_state(path.as_ref()).await?;
        let config = ClientConfig::default();
        let transport = ReqwestTransport::with_timeouts(config.timeouts).map_err(SchemaError::from)?;
        Ok(Self::from_state(state, api_key, &config, Arc::new(transport)))
    }

    /// Like [`import`](Self::import) over an explicit configuration and transport.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::File`] if the file cannot be read or parsed.
    pub async fn import_with_transport(
        path: impl AsRef<Path>,
        api_key: &str,
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ManagerError> {
        let state = read_state(path.as_ref()).await?;
        Ok(Self::from_state(state, api_key, config, transport))
    }

    fn from_state(
        state: ManagerState,
        api_key: &str,
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let mut manager = Self::with_transport(api_key, &state.clients, config, transport);
        manager.schemas = state
            .schemas
            .into_iter()
            .map(|managed| (managed.identifier, managed.schema))
            .collect();
        manager
    }

    fn to_state(&self) -> ManagerState {
        let mut clients: Vec<ManagedClientOptions> = self
            .clients
            .iter()
            .map(|(identifier, client)| ManagedClientOptions {
                identifier: identifier.clone(),
                version: client.version().to_string(),
                language: client.language().to_string(),
                base_url: Some(client.config().base_url.clone()),
                max_pages: client.config().max_pages,
            })
            .collect();
        clients.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        let mut schemas: Vec<ManagedSchema> = self
            .schemas
            .iter()
            .map(|(identifier, schema)| ManagedSchema {
                identifier: identifier.clone(),
                schema: schema.clone(),
            })
            .collect();
        schemas.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        ManagerState { clients, schemas }
    }
}

async fn read_state(path: &Path) -> Result<ManagerState, ManagerError> {
    let bytes = tokio::fs::read(path).await.map_err(SchemaFileError::from)?;
    let state: ManagerState = serde_json::from_slice(&bytes).map_err(SchemaFileError::from)?;
    info!(
        path = %path.display(),
        clients = state.clients.len(),
        schemas = state.schemas.len(),
        "Imported schema manager"
    );
    Ok(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::test_fixtures::sample_schema;
    use crate::test_support::ScriptedTransport;
    use serde_json::json;
    use tempfile::TempDir;

    fn options() -> Vec<ManagedClientOptions> {
        vec![
            ManagedClientOptions::new("english"),
            ManagedClientOptions::new(2_u64).with_language("da"),
        ]
    }

    fn manager(transport: ScriptedTransport) -> SchemaManager {
        SchemaManager::with_transport(
            "KEY",
            &options(),
            &ClientConfig::default().with_base_url("http://steam.test/IEconItems_440/"),
            Arc::new(transport),
        )
    }

    // ==================== Identifier ====================

    #[test]
    fn test_identifier_serde_accepts_numbers_and_strings() {
        let ids: Vec<Identifier> = serde_json::from_value(json!([1, "main"])).unwrap();
        assert_eq!(ids, vec![Identifier::Number(1), Identifier::from("main")]);
        assert_eq!(serde_json::to_value(&ids).unwrap(), json!([1, "main"]));
    }

    #[test]
    fn test_identifier_number_and_text_are_distinct() {
        assert_ne!(Identifier::from(1_u64), Identifier::from("1"));
        assert_eq!(Identifier::from(1_u64).to_string(), "1");
    }

    // ==================== Clients ====================

    #[test]
    fn test_new_builds_one_client_per_options() {
        let manager = SchemaManager::new("KEY", &options()).unwrap();
        assert_eq!(manager.clients().len(), 2);

        let english = manager.get_client(&Identifier::from("english")).unwrap();
        assert_eq!(english.language(), "en");
        let danish = manager.get_client(&Identifier::from(2_u64)).unwrap();
        assert_eq!(danish.language(), "da");
        assert_eq!(danish.version(), "v0001");
    }

    #[test]
    fn test_client_crud() {
        let mut manager = manager(ScriptedTransport::new());
        let id = Identifier::from("english");

        assert!(manager.has_client(&id));
        assert!(manager.delete_client(&id));
        assert!(!manager.has_client(&id));
        assert!(!manager.delete_client(&id));
        assert!(matches!(
            manager.get_client(&id),
            Err(ManagerError::UnknownClient(missing)) if missing == id
        ));

        let replacement = manager.get_client(&Identifier::from(2_u64)).unwrap().clone();
        manager.set_client("english", replacement);
        assert_eq!(manager.get_client(&id).unwrap().language(), "da");
    }

    // ==================== Schemas ====================

    #[test]
    fn test_schema_crud() {
        let mut manager = manager(ScriptedTransport::new());
        let id = Identifier::from("english");

        assert!(!manager.has_schema(&id));
        assert!(matches!(
            manager.get_schema(&id),
            Err(ManagerError::UnknownSchema(_))
        ));

        manager.set_schema("english", sample_schema());
        assert!(manager.has_schema(&id));
        assert_eq!(manager.schemas().len(), 1);
        assert!(manager.get_schema(&id).unwrap().get_item_by_defindex(575).is_some());

        assert!(manager.delete_schema(&id));
        assert!(manager.schemas().is_empty());
    }

    #[tokio::test]
    async fn test_update_schema_fetches_with_identified_client() {
        let transport = ScriptedTransport::new()
            .route_json(
                "GetSchemaItems",
                json!({"result": {"status": 1, "items_game_url": "http://media.test/items_game.txt",
                    "items": [{"defindex": 575, "name": "The Infernal Impaler"}]}}),
            )
            .route_json("GetSchemaOverview", json!({"result": {"status": 1}}))
            .route("items_game.txt", 200, r#""items_game" {}"#);
        let mut manager = manager(transport);
        let id = Identifier::from(2_u64);

        let schema = manager.update_schema(&id).await.unwrap();
        assert_eq!(schema.language(), "da");
        assert_eq!(schema.items().len(), 1);
        assert!(manager.has_schema(&id));
        assert!(!manager.has_schema(&Identifier::from("english")));
    }

    #[tokio::test]
    async fn test_update_schema_unknown_client() {
        let mut manager = manager(ScriptedTransport::new());
        let err = manager
            .update_schema(&Identifier::from("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::UnknownClient(_)));
    }

    #[tokio::test]
    async fn test_update_schema_failure_keeps_previous_schema() {
        let transport = ScriptedTransport::new()
            .route("GetSchemaItems", 500, "boom")
            .route_json("GetSchemaOverview", json!({"result": {}}));
        let mut manager = manager(transport);
        manager.set_schema("english", sample_schema());

        let err = manager
            .update_schema(&Identifier::from("english"))
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::Fetch(_)));
        assert_eq!(
            manager
                .get_schema(&Identifier::from("english"))
                .unwrap()
                .items()
                .len(),
            4
        );
    }

    // ==================== Files ====================

    #[tokio::test]
    async fn test_export_import_round_trip_without_api_key() {
        let temp = TempDir::new().unwrap();
        let mut manager = manager(ScriptedTransport::new());
        manager.set_schema(2_u64, sample_schema());

        let path = manager.export(temp.path(), "manager").await.unwrap();
        assert_eq!(path.file_name().unwrap(), "manager.json");

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("KEY"), "API key must not be exported");

        let restored = SchemaManager::import_with_transport(
            &path,
            "OTHER",
            &ClientConfig::default(),
            Arc::new(ScriptedTransport::new()),
        )
        .await
        .unwrap();

        assert_eq!(restored.clients().len(), 2);
        assert_eq!(
            restored
                .get_client(&Identifier::from(2_u64))
                .unwrap()
                .language(),
            "da"
        );
        assert_eq!(
            restored.get_schema(&Identifier::from(2_u64)).unwrap(),
            &sample_schema()
        );
    }

    #[tokio::test]
    async fn test_export_import_keeps_per_client_config() {
        let temp = TempDir::new().unwrap();
        let transport: Arc<dyn Transport> = Arc::new(ScriptedTransport::new());
        let mut manager = SchemaManager::default();
        manager.set_client(
            "mirror",
            SchemaClient::with_transport(
                "KEY",
                SchemaOptions::default().with_language("de"),
                ClientConfig::default()
                    .with_base_url("http://mirror.test/IEconItems_440/")
                    .with_max_pages(Some(7)),
                Arc::clone(&transport),
            ),
        );

        let path = manager.export(temp.path(), "manager").await.unwrap();
        let restored =
            SchemaManager::import_with_transport(&path, "OTHER", &ClientConfig::default(), transport)
                .await
                .unwrap();

        let client = restored.get_client(&Identifier::from("mirror")).unwrap();
        assert_eq!(client.language(), "de");
        assert_eq!(client.config().base_url, "http://mirror.test/IEconItems_440/");
        assert_eq!(client.config().max_pages, Some(7));
    }

    #[test]
    fn test_client_options_override_shared_config() {
        let shared = ClientConfig::default().with_max_pages(Some(40));
        let options = ManagedClientOptions::new("a").with_base_url("http://other.test/");
        let config = options.client_config(&shared);
        assert_eq!(config.base_url, "http://other.test/");
        assert_eq!(config.max_pages, Some(40));

        let config = options.with_max_pages(3).client_config(&shared);
        assert_eq!(config.max_pages, Some(3));
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = SchemaManager::import(temp.path().join("absent.json"), "KEY")
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::File(SchemaFileError::Io(_))));
    }
}
