//! Score banding.
//!
//! Maps a dimension average onto [`Level`] with fixed thresholds. Pool
//! eligibility depends on the exact boundaries: 3.5 is HIGH and 2.5 is
//! MEDIUM.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Dimension, Level};

/// Lowest score classified as [`Level::High`].
pub const HIGH_THRESHOLD: f64 = 3.5;
/// Lowest score classified as [`Level::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 2.5;

/// Score assumed for a dimension with no answered items.
pub const UNSCORED: f64 = 0.0;

/// Classify a single score.
pub fn classify(score: f64) -> Level {
    if score >= HIGH_THRESHOLD {
        Level::High
    } else if score >= MEDIUM_THRESHOLD {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Classified level per dimension.
///
/// Lookups for a dimension that was never scored fall back to the level of
/// [`UNSCORED`], i.e. LOW.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelMap(BTreeMap<Dimension, Level>);

impl LevelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify each `(dimension, score)` pair.
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (Dimension, f64)>,
    {
        Self(
            scores
                .into_iter()
                .map(|(d, score)| (d, classify(score)))
                .collect(),
        )
    }

    pub fn insert(&mut self, dimension: Dimension, level: Level) {
        self.0.insert(dimension, level);
    }

    /// Level of `dimension`, treating absence as an unscored dimension.
    pub fn level_of(&self, dimension: Dimension) -> Level {
        self.0
            .get(&dimension)
            .copied()
            .unwrap_or_else(|| classify(UNSCORED))
    }

    /// Whether the dimension was explicitly classified.
    pub fn contains(&self, dimension: Dimension) -> bool {
        self.0.contains_key(&dimension)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Level)> + '_ {
        self.0.iter().map(|(d, l)| (*d, *l))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(classify(3.5), Level::High);
        assert_eq!(classify(3.4999), Level::Medium);
        assert_eq!(classify(2.5), Level::Medium);
        assert_eq!(classify(2.4999), Level::Low);
    }

    #[test]
    fn extremes() {
        assert_eq!(classify(5.0), Level::High);
        assert_eq!(classify(1.0), Level::Low);
        assert_eq!(classify(UNSCORED), Level::Low);
    }

    #[test]
    fn scenario_profile() {
        let levels = LevelMap::from_scores([
            (Dimension::Curiosity, 4.2),
            (Dimension::Social, 2.1),
            (Dimension::Emotion, 3.0),
        ]);
        assert_eq!(levels.level_of(Dimension::Curiosity), Level::High);
        assert_eq!(levels.level_of(Dimension::Social), Level::Low);
        assert_eq!(levels.level_of(Dimension::Emotion), Level::Medium);
    }

    #[test]
    fn absent_dimension_is_low() {
        let levels = LevelMap::from_scores([(Dimension::Curiosity, 4.0)]);
        assert!(!levels.contains(Dimension::Structured));
        assert_eq!(levels.level_of(Dimension::Structured), Level::Low);
    }
}
