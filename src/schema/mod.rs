//! The assembled item schema and its query engine.
//!
//! An [`ItemSchema`] is built once, from a full fetch or from an imported
//! file, and is read-only afterwards. Id lookups use binary search with a
//! linear fallback; name lookups are case-insensitive linear scans that
//! return the first match.

mod file;
mod lookup;

pub use file::{SchemaFileError, get_filename};

use serde::{Deserialize, Serialize};

use crate::api::types::{
    AttachedParticleAttribute, ItemAttribute, ItemQualities, ItemQualityNames, SchemaItem,
    SchemaItemsResult, SchemaOverview, SchemaOverviewResult,
};
use crate::client::SchemaOptions;
use crate::parser::ClientSchema;

use lookup::{eq_lowercase, find_by_index};

/// The three fetched parts of a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaComponents {
    pub items: Vec<SchemaItem>,
    pub client: ClientSchema,
    pub overview: SchemaOverview,
}

/// The export document: `{"schema": {...}, "options": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaContents {
    pub schema: SchemaComponents,
    pub options: SchemaOptions,
}

/// A complete, queryable TF2 item schema for one version and language.
///
/// Serializes to the same document as [`SchemaContents`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSchema {
    schema: SchemaComponents,
    options: SchemaOptions,
}

impl ItemSchema {
    #[must_use]
    pub fn new(schema: SchemaComponents, options: SchemaOptions) -> Self {
        Self { schema, options }
    }

    /// Combines fetched results into a schema.
    ///
    /// Only the reference tables of the overview are kept.
    #[must_use]
    pub fn assemble(
        items: SchemaItemsResult,
        overview: SchemaOverviewResult,
        client: ClientSchema,
        options: SchemaOptions,
    ) -> Self {
        Self::new(
            SchemaComponents {
                items: items.items,
                client,
                overview: overview.into_overview(),
            },
            options,
        )
    }

    // ==================== Queries ====================

    /// Finds the first item whose name matches, ignoring case.
    ///
    /// Compares `item_name` (localized) when `localized` is true, otherwise
    /// the internal `name`.
    #[must_use]
    pub fn get_item_by_name(&self, name: &str, localized: bool) -> Option<&SchemaItem> {
        let needle = name.to_lowercase();
        self.items().iter().find(|item| {
            let candidate = if localized { &item.item_name } else { &item.name };
            eq_lowercase(candidate, &needle)
        })
    }

    #[must_use]
    pub fn get_item_by_defindex(&self, defindex: u32) -> Option<&SchemaItem> {
        find_by_index(self.items(), defindex, |item| item.defindex)
    }

    #[must_use]
    pub fn get_attribute_by_defindex(&self, defindex: u32) -> Option<&ItemAttribute> {
        find_by_index(self.attributes(), defindex, |attribute| attribute.defindex)
    }

    #[must_use]
    pub fn get_effect_name_by_id(&self, id: u32) -> Option<&str> {
        find_by_index(self.particle_effects(), id, |effect| effect.id)
            .map(|effect| effect.name.as_str())
    }

    #[must_use]
    pub fn get_effect_id_by_name(&self, name: &str) -> Option<u32> {
        let needle = name.to_lowercase();
        self.particle_effects()
            .iter()
            .find(|effect| eq_lowercase(&effect.name, &needle))
            .map(|effect| effect.id)
    }

    /// Localized name of the quality with numeric `id`.
    ///
    /// Absent when no quality has that id or the first one that does has no
    /// localized name.
    #[must_use]
    pub fn get_quality_name_by_id(&self, id: u32) -> Option<&str> {
        let (key, _) = self.qualities().iter().find(|(_, quality)| **quality == id)?;
        self.quality_names().get(key).map(String::as_str)
    }

    /// Numeric id of the quality whose localized name matches, ignoring case.
    #[must_use]
    pub fn get_quality_id_by_name(&self, name: &str) -> Option<u32> {
        let needle = name.to_lowercase();
        let (key, _) = self
            .quality_names()
            .iter()
            .find(|(_, localized)| eq_lowercase(localized, &needle))?;
        self.qualities().get(key).copied()
    }

    // ==================== Accessors ====================

    #[must_use]
    pub fn items(&self) -> &[SchemaItem] {
        &self.schema.items
    }

    #[must_use]
    pub fn attributes(&self) -> &[ItemAttribute] {
        &self.schema.overview.attributes
    }

    #[must_use]
    pub fn particle_effects(&self) -> &[AttachedParticleAttribute] {
        &self.schema.overview.attribute_controlled_attached_particles
    }

    #[must_use]
    pub fn client_schema(&self) -> &ClientSchema {
        &self.schema.client
    }

    #[must_use]
    pub fn overview(&self) -> &SchemaOverview {
        &self.schema.overview
    }

    #[must_use]
    pub fn qualities(&self) -> &ItemQualities {
        &self.schema.overview.qualities
    }

    #[must_use]
    pub fn quality_names(&self) -> &ItemQualityNames {
        &self.schema.overview.quality_names
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
    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Owned copy of the export document.
    #[must_use]
    pub fn to_contents(&self) -> SchemaContents {
        SchemaContents {
            schema: self.schema.clone(),
            options: self.options.clone(),
        }
    }

    /// The export document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn stringify(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<SchemaContents> for ItemSchema {
    fn from(contents: SchemaContents) -> Self {
        Self::new(contents.schema, contents.options)
    }
}
