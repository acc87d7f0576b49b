//! Curated content pools.
//!
//! Pools are hand-authored configuration loaded once per process and shared
//! read-only between sessions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::band::LevelMap;
use crate::condition::{is_eligible, Condition};
use crate::error::ProfileError;
use crate::model::Dimension;

/// A narrative unit with an optional eligibility condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    #[serde(default)]
    pub condition: Option<Condition>,
    pub text: String,
    /// Metadata label, e.g. the conflict category.
    #[serde(default)]
    pub category: Option<String>,
}

impl PoolEntry {
    pub fn unconditional(text: impl Into<String>) -> Self {
        Self {
            condition: None,
            text: text.into(),
            category: None,
        }
    }

    pub fn when(condition: Condition, text: impl Into<String>) -> Self {
        Self {
            condition: Some(condition),
            text: text.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_eligible(&self, levels: &LevelMap) -> bool {
        is_eligible(self.condition.as_ref(), levels)
    }
}

/// Entries of `pool` whose condition holds for `levels`, in pool order.
pub fn eligible<'a>(pool: &'a [PoolEntry], levels: &LevelMap) -> Vec<&'a PoolEntry> {
    pool.iter().filter(|e| e.is_eligible(levels)).collect()
}

/// All narrative pools used to build a report.
#[derive(Debug, Clone, Serialize)]
pub struct ContentPools {
    affirmations: Vec<PoolEntry>,
    conflicts: Vec<PoolEntry>,
    calls_to_action: Vec<PoolEntry>,
    compliments: BTreeMap<Dimension, Vec<String>>,
    suggestions: BTreeMap<Dimension, Vec<String>>,
}

impl ContentPools {
    /// Assemble the pools. The call-to-action pool must not be empty; its
    /// entries are treated as unconditional.
    pub fn new(
        affirmations: Vec<PoolEntry>,
        conflicts: Vec<PoolEntry>,
        calls_to_action: Vec<PoolEntry>,
    ) -> Result<Self, ProfileError> {
        if calls_to_action.is_empty() {
            return Err(ProfileError::EmptyCallToActionPool);
        }
        Ok(Self {
            affirmations,
            conflicts,
            calls_to_action,
            compliments: BTreeMap::new(),
            suggestions: BTreeMap::new(),
        })
    }

    /// Attach per-dimension compliment lines.
    pub fn with_compliments(mut self, compliments: BTreeMap<Dimension, Vec<String>>) -> Self {
        self.compliments = compliments;
        self
    }

    /// Attach per-dimension suggestion lines.
    pub fn with_suggestions(mut self, suggestions: BTreeMap<Dimension, Vec<String>>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn affirmations(&self) -> &[PoolEntry] {
        &self.affirmations
    }

    pub fn conflicts(&self) -> &[PoolEntry] {
        &self.conflicts
    }

    pub fn calls_to_action(&self) -> &[PoolEntry] {
        &self.calls_to_action
    }

    /// Lead compliment for a dimension.
    pub fn compliment_for(&self, dimension: Dimension) -> Option<&str> {
        self.compliments
            .get(&dimension)
            .and_then(|lines| lines.first())
            .map(String::as_str)
    }

    /// Lead suggestion for a dimension.
    pub fn suggestion_for(&self, dimension: Dimension) -> Option<&str> {
        self.suggestions
            .get(&dimension)
            .and_then(|lines| lines.first())
            .map(String::as_str)
    }

    pub fn compliments(&self) -> &BTreeMap<Dimension, Vec<String>> {
        &self.compliments
    }

    pub fn suggestions(&self) -> &BTreeMap<Dimension, Vec<String>> {
        &self.suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Trigger;
    use crate::model::Level;

    #[test]
    fn empty_call_to_action_pool_rejected() {
        let err = ContentPools::new(vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err, ProfileError::EmptyCallToActionPool);
    }

    #[test]
    fn eligibility_filters_in_pool_order() {
        let pool = vec![
            PoolEntry::when(
                Condition::Single(Trigger::new(Dimension::Pace, Level::High)),
                "fast",
            ),
            PoolEntry::unconditional("always"),
            PoolEntry::when(
                Condition::Single(Trigger::new(Dimension::Pace, Level::Low)),
                "slow",
            ),
        ];
        let levels = LevelMap::from_scores([(Dimension::Pace, 1.5)]);
        let texts: Vec<_> = eligible(&pool, &levels).iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["always", "slow"]);
    }

    #[test]
    fn lead_lines_per_dimension() {
        let pools = ContentPools::new(vec![], vec![], vec![PoolEntry::unconditional("cta")])
            .unwrap()
            .with_compliments(BTreeMap::from([(
                Dimension::Focus,
                vec!["first".to_string(), "second".to_string()],
            )]));
        assert_eq!(pools.compliment_for(Dimension::Focus), Some("first"));
        assert_eq!(pools.compliment_for(Dimension::Pace), None);
        assert_eq!(pools.suggestion_for(Dimension::Focus), None);
    }
}
