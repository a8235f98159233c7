//! Steam Web API response types for the `IEconItems_440` schema endpoints.
//!
//! Every struct here uses container-level `#[serde(default)]`: fields missing
//! from a response fall back to their zero value and unknown fields are dropped.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mapping of internal quality names to their numeric ids (`"strange" -> 11`).
pub type ItemQualities = BTreeMap<String, u32>;

/// Mapping of internal quality names to localized display names.
pub type ItemQualityNames = BTreeMap<String, String>;

// ==================== Envelope ====================

/// Top-level `{"result": ...}` wrapper every schema endpoint returns.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub result: T,
}

// ==================== GetSchemaItems ====================

/// Continuation cursor returned by `GetSchemaItems` while more pages remain.
///
/// The API currently sends the next defindex as a number; string cursors are
/// accepted as well and sent back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cursor {
    /// Numeric cursor (the defindex the next page starts at).
    Index(u64),
    /// Opaque string cursor.
    Token(String),
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Token(token) => f.write_str(token),
        }
    }
}

/// One page (or the accumulated whole) of the `GetSchemaItems` result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaItemsResult {
    /// Request status, `1` on success.
    pub status: i32,
    /// URL of the raw `items_game.txt` client schema.
    pub items_game_url: String,
    /// Item definitions on this page.
    pub items: Vec<SchemaItem>,
    /// Cursor for the next page; absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Cursor>,
}

/// A single item definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaItem {
    /// Internal, stable item name (e.g. `"The Infernal Impaler"`).
    pub name: String,
    /// Unique definition index; the primary lookup key.
    pub defindex: u32,
    pub item_class: String,
    pub item_type_name: String,
    /// Localized display name (e.g. `"Infernal Impaler"`).
    pub item_name: String,
    pub item_description: Option<String>,
    pub proper_name: bool,
    pub item_slot: Option<String>,
    pub model_player: Option<String>,
    /// Default quality id.
    pub item_quality: u32,
    pub image_inventory: Option<String>,
    pub min_ilevel: u32,
    pub max_ilevel: u32,
    pub image_url: Option<String>,
    pub image_url_large: Option<String>,
    pub drop_type: Option<String>,
    pub craft_class: Option<String>,
    pub craft_material_type: Option<String>,
    pub capabilities: ItemCapabilities,
    pub used_by_classes: Vec<String>,
    pub attributes: Vec<StaticAttribute>,
}

/// Capability flags attached to an item definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemCapabilities {
    pub nameable: bool,
    pub can_consume: bool,
    pub can_strangify: bool,
    pub strange_parts: bool,
    pub can_gift_wrap: bool,
    pub can_craft_mark: bool,
    pub can_be_restored: bool,
    pub can_card_upgrade: bool,
    pub can_killstreakify: bool,
    /// Flags not modelled above (`paintable`, `can_collect`, ...).
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

/// An attribute value baked into an item definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticAttribute {
    pub name: String,
    pub class: String,
    pub value: f64,
}

// ==================== GetSchemaOverview ====================

/// The `GetSchemaOverview` result: request metadata plus the reference tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOverviewResult {
    pub status: i32,
    pub items_game_url: String,
    #[serde(flatten)]
    pub overview: SchemaOverview,
}

impl SchemaOverviewResult {
    /// Projects the result onto the stored overview shape, dropping `status`
    /// and `items_game_url`.
    #[must_use]
    pub fn into_overview(self) -> SchemaOverview {
        self.overview
    }
}

impl From<SchemaOverviewResult> for SchemaOverview {
    fn from(result: SchemaOverviewResult) -> Self {
        result.into_overview()
    }
}

/// Reference tables accompanying the item list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOverview {
    pub qualities: ItemQualities,
    #[serde(rename = "qualityNames")]
    pub quality_names: ItemQualityNames,
    #[serde(rename = "originNames")]
    pub origin_names: Vec<ItemOriginName>,
    pub attributes: Vec<ItemAttribute>,
    pub item_sets: Vec<ItemSet>,
    pub attribute_controlled_attached_particles: Vec<AttachedParticleAttribute>,
    pub item_levels: Vec<ItemLevels>,
    pub kill_eater_score_types: Vec<KillEaterScoreType>,
    pub string_lookups: Vec<StringLookups>,
}

/// Attribute definition from the overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemAttribute {
    pub name: String,
    /// Unique attribute index.
    pub defindex: u32,
    pub attribute_class: String,
    pub description_string: Option<String>,
    pub description_format: Option<String>,
    pub effect_type: String,
    pub hidden: bool,
    pub stored_as_integer: bool,
}

/// Particle effect definition (unusual effects and the like).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachedParticleAttribute {
    pub system: String,
    /// Effect id referenced by the attached-particle attribute.
    pub id: u32,
    pub attach_to_rootbone: bool,
    pub attachment: Option<String>,
    /// Localized effect name.
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemOriginName {
    pub origin: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSet {
    pub item_set: String,
    pub name: String,
    pub items: Vec<String>,
    pub attributes: Vec<StaticAttribute>,
    pub store_bundle: Option<String>,
}

/// Rank table for kill-eater (strange) items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemLevels {
    pub name: String,
    pub levels: Vec<ItemLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemLevel {
    pub level: u32,
    pub required_score: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KillEaterScoreType {
    #[serde(rename = "type")]
    pub kind: u32,
    pub type_name: String,
    pub level_data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringLookups {
    pub table_name: String,
    pub strings: Vec<StringLookup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringLookup {
    pub index: u32,
    pub string: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_items_page_deserialize_with_numeric_cursor() {
        let json = serde_json::json!({
            "result": {
                "status": 1,
                "items_game_url": "https://media.steampowered.com/items_game.txt",
                "items": [
                    {"name": "The Infernal Impaler", "defindex": 575, "item_name": "Infernal Impaler"}
                ],
                "next": 576
            }
        });

        let envelope: ApiEnvelope<SchemaItemsResult> = serde_json::from_value(json).unwrap();
        let page = envelope.result;
        assert_eq!(page.status, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].defindex, 575);
        assert_eq!(page.next, Some(Cursor::Index(576)));
    }

    #[test]
    fn test_items_page_without_items_or_cursor_defaults() {
        let json = serde_json::json!({"status": 1, "items_game_url": ""});

        let page: SchemaItemsResult = serde_json::from_value(json).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_cursor_accepts_string_token() {
        let cursor: Cursor = serde_json::from_value(serde_json::json!("abc")).unwrap();
        assert_eq!(cursor, Cursor::Token("abc".to_string()));
        assert_eq!(cursor.to_string(), "abc");
        assert_eq!(Cursor::Index(2410).to_string(), "2410");
    }

    #[test]
    fn test_schema_item_tolerates_nulls_and_missing_fields() {
        let json = serde_json::json!({
            "name": "Upgradeable TF_WEAPON_BAT",
            "defindex": 190,
            "item_description": null,
            "model_player": null,
            "capabilities": {"nameable": true, "paintable": true}
        });

        let item: SchemaItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.defindex, 190);
        assert!(item.item_description.is_none());
        assert!(item.capabilities.nameable);
        assert_eq!(
            item.capabilities.other.get("paintable"),
            Some(&serde_json::Value::Bool(true))
        );
        assert!(item.attributes.is_empty());
    }

    #[test]
    fn test_overview_result_projection_drops_request_metadata() {
        let json = serde_json::json!({
            "status": 1,
            "items_game_url": "https://media.steampowered.com/items_game.txt",
            "qualities": {"strange": 11},
            "qualityNames": {"strange": "Strange"},
            "attribute_controlled_attached_particles": [
                {"system": "superrare_burning1", "id": 13, "attach_to_rootbone": false, "name": "Burning Flames"}
            ],
            "unexpected_field": {"ignored": true}
        });

        let result: SchemaOverviewResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.status, 1);
        let overview = result.into_overview();
        assert_eq!(overview.qualities.get("strange"), Some(&11));
        assert_eq!(overview.quality_names.get("strange").unwrap(), "Strange");
        assert_eq!(overview.attribute_controlled_attached_particles[0].id, 13);
        assert!(overview.attributes.is_empty());

        let serialized = serde_json::to_value(&overview).unwrap();
        assert!(serialized.get("status").is_none());
        assert!(serialized.get("items_game_url").is_none());
        assert!(serialized.get("qualityNames").is_some());
    }

    #[test]
    fn test_kill_eater_score_type_renames_type_field() {
        let json = serde_json::json!({"type": 0, "type_name": "Kills", "level_data": "KillEaterRank"});

        let score: KillEaterScoreType = serde_json::from_value(json).unwrap();
        assert_eq!(score.kind, 0);
        assert_eq!(score.level_data.as_deref(), Some("KillEaterRank"));
    }
}
