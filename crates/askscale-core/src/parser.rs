//! TOML catalog and pool parser.
//!
//! Loads the item catalog and the content pools from TOML files, session
//! responses from JSON, and validates the configuration.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::condition::{Condition, Trigger};
use crate::model::{Catalog, Dimension, Item, ItemId, Level, Responses};
use crate::pools::{ContentPools, PoolEntry};

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    dimensions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: ItemId,
    dimension: String,
    prompt: String,
    #[serde(default)]
    reverse: bool,
    #[serde(default)]
    high_text: Option<String>,
    #[serde(default)]
    low_text: Option<String>,
}

/// Intermediate TOML structure for pool files.
#[derive(Debug, Deserialize)]
struct TomlPoolFile {
    #[serde(default)]
    calls_to_action: Vec<String>,
    #[serde(default)]
    affirmations: Vec<TomlAffirmation>,
    #[serde(default)]
    conflicts: Vec<TomlConflict>,
    #[serde(default)]
    compliments: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    suggestions: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TomlAffirmation {
    trigger: TomlTrigger,
    text: String,
}

#[derive(Debug, Deserialize)]
struct TomlConflict {
    trigger: TomlTrigger,
    category: String,
    text: String,
}

/// A trigger is written either as one inline table or as an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlTrigger {
    Single(TomlTriggerPair),
    All(Vec<TomlTriggerPair>),
}

#[derive(Debug, Deserialize)]
struct TomlTriggerPair {
    dimension: String,
    level: String,
}

impl TomlTriggerPair {
    fn resolve(self) -> Result<Trigger> {
        Ok(Trigger {
            dimension: self.dimension.parse::<Dimension>()?,
            level: self.level.parse::<Level>()?,
        })
    }
}

impl TomlTrigger {
    fn resolve(self) -> Result<Condition> {
        match self {
            TomlTrigger::Single(pair) => Ok(Condition::Single(pair.resolve()?)),
            TomlTrigger::All(pairs) => {
                let triggers = pairs
                    .into_iter()
                    .map(TomlTriggerPair::resolve)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Condition::all(triggers)?)
            }
        }
    }
}

/// Parse a catalog TOML file.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a catalog from a TOML string (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let dimensions = parsed
        .catalog
        .dimensions
        .iter()
        .map(|d| d.parse::<Dimension>())
        .collect::<Result<Vec<_>, _>>()?;

    let items = parsed
        .items
        .into_iter()
        .map(|i| {
            let dimension = i
                .dimension
                .parse::<Dimension>()
                .with_context(|| format!("item {}", i.id))?;
            Ok(Item {
                id: i.id,
                dimension,
                prompt: i.prompt,
                reverse: i.reverse,
                high_text: i.high_text,
                low_text: i.low_text,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let catalog = Catalog::new(
        parsed.catalog.id,
        parsed.catalog.name,
        parsed.catalog.description,
        dimensions,
        items,
    )
    .with_context(|| format!("invalid catalog: {}", source_path.display()))?;

    Ok(catalog)
}

/// Parse a content pool TOML file.
pub fn parse_pools(path: &Path) -> Result<ContentPools> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pool file: {}", path.display()))?;

    parse_pools_str(&content, path)
}

/// Parse content pools from a TOML string (useful for testing).
pub fn parse_pools_str(content: &str, source_path: &Path) -> Result<ContentPools> {
    let parsed: TomlPoolFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let affirmations = parsed
        .affirmations
        .into_iter()
        .map(|a| Ok(PoolEntry::when(a.trigger.resolve()?, a.text)))
        .collect::<Result<Vec<_>>>()?;

    let conflicts = parsed
        .conflicts
        .into_iter()
        .map(|c| Ok(PoolEntry::when(c.trigger.resolve()?, c.text).with_category(c.category)))
        .collect::<Result<Vec<_>>>()?;

    let calls_to_action = parsed
        .calls_to_action
        .into_iter()
        .map(PoolEntry::unconditional)
        .collect();

    let pools = ContentPools::new(affirmations, conflicts, calls_to_action)
        .with_context(|| format!("invalid pools: {}", source_path.display()))?
        .with_compliments(parse_dimension_map(parsed.compliments)?)
        .with_suggestions(parse_dimension_map(parsed.suggestions)?);

    Ok(pools)
}

fn parse_dimension_map(
    raw: BTreeMap<String, Vec<String>>,
) -> Result<BTreeMap<Dimension, Vec<String>>> {
    raw.into_iter()
        .map(|(k, v)| Ok((k.parse::<Dimension>()?, v)))
        .collect()
}

/// Load session responses from a JSON object of `"item id": value` pairs.
pub fn parse_responses(path: &Path) -> Result<Responses> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses: {}", path.display()))?;
    parse_responses_str(&content)
}

pub fn parse_responses_str(content: &str) -> Result<Responses> {
    serde_json::from_str(content).context("failed to parse responses JSON")
}

/// A warning from catalog or pool validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Where the problem is (item id, pool entry, dimension).
    pub location: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn at(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            message: message.into(),
        }
    }
}

/// Validate a catalog for common authoring mistakes.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for item in catalog.items() {
        if item.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::at(format!("item {}", item.id), "prompt is empty"));
        }
        if item.high_text.is_none() && item.low_text.is_none() {
            warnings.push(ValidationWarning::at(
                format!("item {}", item.id),
                "no high_text or low_text commentary",
            ));
        }
    }

    for &dimension in catalog.dimensions() {
        if catalog.items_for(dimension).next().is_none() {
            warnings.push(ValidationWarning::at(
                dimension.to_string(),
                "dimension has no items and will always score 0",
            ));
        }
    }

    warnings
}

/// Validate pools, optionally against the catalog they will be used with.
pub fn validate_pools(pools: &ContentPools, catalog: Option<&Catalog>) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let scored: Option<HashSet<Dimension>> =
        catalog.map(|c| c.dimensions().iter().copied().collect());

    let mut check = |pool: &str, idx: usize, entry: &PoolEntry| {
        let location = format!("{pool}[{idx}]");
        let Some(condition) = &entry.condition else {
            return;
        };
        if condition.is_contradictory() {
            warnings.push(ValidationWarning::at(
                &location,
                "trigger requires two levels of one dimension and can never match",
            ));
        }
        if let Some(scored) = &scored {
            for t in condition.triggers() {
                if !scored.contains(&t.dimension) {
                    warnings.push(ValidationWarning::at(
                        &location,
                        format!("trigger dimension '{}' is not scored by the catalog", t.dimension),
                    ));
                }
            }
        }
    };

    for (idx, entry) in pools.affirmations().iter().enumerate() {
        check("affirmations", idx, entry);
    }
    for (idx, entry) in pools.conflicts().iter().enumerate() {
        check("conflicts", idx, entry);
    }

    for (idx, entry) in pools.affirmations().iter().enumerate() {
        if entry.condition.as_ref().is_some_and(Condition::is_compound) {
            warnings.push(ValidationWarning::at(
                format!("affirmations[{idx}]"),
                "affirmation uses a compound trigger",
            ));
        }
    }
    for (idx, entry) in pools.conflicts().iter().enumerate() {
        if entry.condition.as_ref().is_some_and(|c| !c.is_compound()) {
            warnings.push(ValidationWarning::at(
                format!("conflicts[{idx}]"),
                "conflict uses a single trigger",
            ));
        }
        if entry.category.as_deref().map_or(true, |c| c.trim().is_empty()) {
            warnings.push(ValidationWarning::at(
                format!("conflicts[{idx}]"),
                "conflict has no category",
            ));
        }
    }

    if let Some(catalog) = catalog {
        for &dimension in catalog.dimensions() {
            if pools.compliment_for(dimension).is_none() {
                warnings.push(ValidationWarning::at(
                    dimension.to_string(),
                    "no compliment for dimension",
                ));
            }
            if pools.suggestion_for(dimension).is_none() {
                warnings.push(ValidationWarning::at(
                    dimension.to_string(),
                    "no suggestion for dimension",
                ));
            }
        }
    }

    warnings
}
