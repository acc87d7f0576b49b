//! Core data model types for askscale.
//!
//! Dimensions, levels, questionnaire items and the per-session response map.
//! Everything except [`Responses`] is immutable configuration shared across
//! sessions.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Lowest value on the Likert scale.
pub const SCALE_MIN: ResponseValue = 1;
/// Highest value on the Likert scale.
pub const SCALE_MAX: ResponseValue = 5;

/// Questionnaire item identifier.
pub type ItemId = u32;

/// Raw response value as submitted by the presentation layer.
pub type ResponseValue = i64;

/// A trait axis measured by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    Curiosity,
    Social,
    SelfDiscipline,
    Emotion,
    Cooperation,
    Balanced,
    Structured,
    FreeRanged,
    Pace,
    Sensitivity,
    Focus,
}

impl Dimension {
    /// Every dimension, in catalogue order.
    pub const ALL: [Dimension; 11] = [
        Dimension::Curiosity,
        Dimension::Social,
        Dimension::SelfDiscipline,
        Dimension::Emotion,
        Dimension::Cooperation,
        Dimension::Balanced,
        Dimension::Structured,
        Dimension::FreeRanged,
        Dimension::Pace,
        Dimension::Sensitivity,
        Dimension::Focus,
    ];

    /// Stable key used in configuration files and JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Curiosity => "curiosity",
            Dimension::Social => "social",
            Dimension::SelfDiscipline => "self-discipline",
            Dimension::Emotion => "emotion",
            Dimension::Cooperation => "cooperation",
            Dimension::Balanced => "balanced",
            Dimension::Structured => "structured",
            Dimension::FreeRanged => "free-ranged",
            Dimension::Pace => "pace",
            Dimension::Sensitivity => "sensitivity",
            Dimension::Focus => "focus",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Curiosity => "Curiosity",
            Dimension::Social => "Sociability",
            Dimension::SelfDiscipline => "Self-control",
            Dimension::Emotion => "Emotional regulation",
            Dimension::Cooperation => "Cooperation",
            Dimension::Balanced => "Harmonious style",
            Dimension::Structured => "Structured style",
            Dimension::FreeRanged => "Free-range style",
            Dimension::Pace => "Behavioural pace",
            Dimension::Sensitivity => "Emotional sensitivity",
            Dimension::Focus => "Focus and persistence",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dimension {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Dimension::ALL
            .into_iter()
            .find(|d| d.key() == normalized)
            .ok_or_else(|| ProfileError::UnknownDimension(s.to_string()))
    }
}

/// Qualitative band of a dimension score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::High => write!(f, "high"),
            Level::Medium => write!(f, "medium"),
            Level::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Level {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Level::High),
            "medium" | "mid" => Ok(Level::Medium),
            "low" => Ok(Level::Low),
            _ => Err(ProfileError::UnknownLevel(s.to_string())),
        }
    }
}

/// A single questionnaire prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier within the catalog.
    pub id: ItemId,
    /// The dimension this item measures.
    pub dimension: Dimension,
    /// Prompt shown to the respondent.
    pub prompt: String,
    /// Whether agreement indicates a *lower* trait score.
    #[serde(default)]
    pub reverse: bool,
    /// Commentary shown when the item represents a high-scoring dimension.
    #[serde(default)]
    pub high_text: Option<String>,
    /// Commentary shown when the item represents a low-scoring dimension.
    #[serde(default)]
    pub low_text: Option<String>,
}

impl Item {
    pub fn new(id: ItemId, dimension: Dimension, prompt: impl Into<String>) -> Self {
        Self {
            id,
            dimension,
            prompt: prompt.into(),
            reverse: false,
            high_text: None,
            low_text: None,
        }
    }

    /// Mark the item as reverse-scored.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// The immutable item catalog.
///
/// Construction checks that item identifiers are unique and that every item
/// belongs to one of the configured dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub id: String,
    pub name: String,
    pub description: String,
    dimensions: Vec<Dimension>,
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog. When `dimensions` is empty the dimension set is taken
    /// from the items, in order of first appearance.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        dimensions: Vec<Dimension>,
        items: Vec<Item>,
    ) -> Result<Self, ProfileError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(ProfileError::DuplicateItem(item.id));
            }
        }

        let dimensions = if dimensions.is_empty() {
            let mut derived: Vec<Dimension> = Vec::new();
            for item in &items {
                if !derived.contains(&item.dimension) {
                    derived.push(item.dimension);
                }
            }
            derived
        } else {
            let mut unique: Vec<Dimension> = Vec::with_capacity(dimensions.len());
            for d in dimensions {
                if !unique.contains(&d) {
                    unique.push(d);
                }
            }
            if let Some(stray) = items.iter().find(|i| !unique.contains(&i.dimension)) {
                return Err(ProfileError::DimensionNotConfigured {
                    item_id: stray.id,
                    dimension: stray.dimension,
                });
            }
            unique
        };

        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            dimensions,
            items,
        })
    }

    /// Convenience constructor for catalogs whose dimension set is implied
    /// by the items.
    pub fn from_items(id: impl Into<String>, items: Vec<Item>) -> Result<Self, ProfileError> {
        let id = id.into();
        Self::new(id.clone(), id, String::new(), Vec::new(), items)
    }

    /// Configured dimensions, in catalog order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items belonging to one dimension.
    pub fn items_for(&self, dimension: Dimension) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.dimension == dimension)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One session's answers, keyed by item id.
///
/// Items without an entry are unanswered and excluded from scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses(BTreeMap<ItemId, ResponseValue>);

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the answer to an item.
    pub fn insert(&mut self, item_id: ItemId, value: ResponseValue) {
        self.0.insert(item_id, value);
    }

    pub fn get(&self, item_id: ItemId) -> Option<ResponseValue> {
        self.0.get(&item_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, ResponseValue)> + '_ {
        self.0.iter().map(|(id, v)| (*id, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ItemId, ResponseValue)> for Responses {
    fn from_iter<T: IntoIterator<Item = (ItemId, ResponseValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
