//! Query command handlers against a saved schema snapshot.

use std::path::Path;

use anyhow::{Context, Result};
use item_schema::ItemSchema;
use serde::Serialize;

use crate::cli::{AttributeArgs, EffectArgs, LookupArgs, QualityArgs};

const SUGGESTION_LIMIT: usize = 3;
const SUGGESTION_THRESHOLD: f64 = 0.5;

pub async fn run_lookup_command(args: &LookupArgs) -> Result<()> {
    let schema = load_schema(&args.schema).await?;

    if let Some(defindex) = args.defindex {
        match schema.get_item_by_defindex(defindex) {
            Some(item) => print_json(item)?,
            None => println!("No item with defindex {defindex}."),
        }
        return Ok(());
    }

    let Some(name) = args.name.as_deref() else {
        return Ok(());
    };
    if let Some(item) = schema.get_item_by_name(name, args.localized) {
        return print_json(item);
    }

    println!("No item named '{name}'.");
    let suggestions = suggest_item_names(&schema, name, args.localized);
    if !suggestions.is_empty() {
        println!("Did you mean:");
        for suggestion in suggestions {
            println!("  {suggestion}");
        }
    }
    Ok(())
}

pub async fn run_quality_command(args: &QualityArgs) -> Result<()> {
    let schema = load_schema(&args.schema).await?;

    if let Some(id) = args.id {
        match schema.get_quality_name_by_id(id) {
            Some(name) => println!("{name}"),
            None => println!("No quality with id {id}."),
        }
    } else if let Some(name) = args.name.as_deref() {
        match schema.get_quality_id_by_name(name) {
            Some(id) => println!("{id}"),
            None => println!("No quality named '{name}'."),
        }
    }
    Ok(())
}

pub async fn run_effect_command(args: &EffectArgs) -> Result<()> {
    let schema = load_schema(&args.schema).await?;

    if let Some(id) = args.id {
        match schema.get_effect_name_by_id(id) {
            Some(name) => println!("{name}"),
            None => println!("No effect with id {id}."),
        }
    } else if let Some(name) = args.name.as_deref() {
        match schema.get_effect_id_by_name(name) {
            Some(id) => println!("{id}"),
            None => println!("No effect named '{name}'."),
        }
    }
    Ok(())
}

pub async fn run_attribute_command(args: &AttributeArgs) -> Result<()> {
    let schema = load_schema(&args.schema).await?;

    match schema.get_attribute_by_defindex(args.defindex) {
        Some(attribute) => print_json(attribute)?,
        None => println!("No attribute with defindex {}.", args.defindex),
    }
    Ok(())
}

async fn load_schema(path: &Path) -> Result<ItemSchema> {
    ItemSchema::import(path)
        .await
        .with_context(|| format!("Failed to load schema file '{}'", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Closest item names to `query`, best first.
fn suggest_item_names<'a>(schema: &'a ItemSchema, query: &str, localized: bool) -> Vec<&'a str> {
    let query_norm = query.to_lowercase();
    let mut scored: Vec<(f64, &str)> = schema
        .items()
        .iter()
        .map(|item| if localized { &item.item_name } else { &item.name })
        .filter(|name| !name.is_empty())
        .map(|name| {
            let score = strsim::normalized_levenshtein(&query_norm, &name.to_lowercase());
            (score, name.as_str())
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|left, right| right.0.total_cmp(&left.0).then_with(|| left.1.cmp(&right.1)));
    scored.dedup_by(|left, right| left.1 == right.1);
    scored
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|(_, name)| name)
        .collect()
}
