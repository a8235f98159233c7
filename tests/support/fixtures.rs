//! Canned Steam Web API payloads shared by the integration tests.

use serde_json::{Value, json};

pub const CLIENT_SCHEMA_TEXT: &str = r#"
"items_game"
{
	"qualities"
	{
		"normal"	{ "value"	"0" }
		"vintage"	{ "value"	"3" }
		"strange"	{ "value"	"11" }
	}
	"items"
	{
		"575"
		{
			"name"	"The Infernal Impaler"
			"item_quality"	"unique"
		}
	}
}
"#;

/// One `GetSchemaItems` page holding the given `(defindex, name, item_name)` items.
pub fn items_page(items: &[(u32, &str, &str)], next: Option<u32>, items_game_url: &str) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(defindex, name, item_name)| {
            json!({
                "name": name,
                "defindex": defindex,
                "item_class": "tf_wearable",
                "item_type_name": "Cosmetic",
                "item_name": item_name,
                "proper_name": false,
                "item_quality": 6,
                "min_ilevel": 1,
                "max_ilevel": 100,
                "image_url": "http://media.steampowered.com/apps/440/icons/item.png",
                "capabilities": {"nameable": true, "can_craft_mark": true, "can_gift_wrap": true},
                "used_by_classes": ["Pyro"]
            })
        })
        .collect();

    let mut result = json!({
        "status": 1,
        "items_game_url": items_game_url,
        "items": items
    });
    if let Some(next) = next {
        result["next"] = json!(next);
    }
    json!({ "result": result })
}

/// A `GetSchemaOverview` response with Strange/Vintage qualities and two effects.
pub fn overview(items_game_url: &str) -> Value {
    json!({"result": {
        "status": 1,
        "items_game_url": items_game_url,
        "qualities": {"Normal": 0, "vintage": 3, "Unique": 6, "strange": 11},
        "qualityNames": {"Normal": "Normal", "vintage": "Vintage", "Unique": "Unique", "strange": "Strange"},
        "originNames": [{"origin": 0, "name": "Timed Drop"}],
        "attributes": [
            {"name": "damage bonus", "defindex": 2, "attribute_class": "mult_dmg",
             "description_string": "+%s1% damage bonus", "description_format": "value_is_percentage",
             "effect_type": "positive", "hidden": false, "stored_as_integer": false},
            {"name": "attach particle effect", "defindex": 134, "attribute_class": "set_attached_particle",
             "effect_type": "neutral", "hidden": false, "stored_as_integer": false}
        ],
        "item_sets": [],
        "attribute_controlled_attached_particles": [
            {"system": "superrare_burning1", "id": 13, "attach_to_rootbone": false, "name": "Burning Flames"},
            {"system": "superrare_beams1", "id": 34, "attach_to_rootbone": false, "name": "Roboactive"}
        ],
        "item_levels": [],
        "kill_eater_score_types": [{"type": 0, "type_name": "Kills", "level_data": "KillEaterRank"}],
        "string_lookups": []
    }})
}
