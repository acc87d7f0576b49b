//! Trigger conditions and the matcher that evaluates them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::band::LevelMap;
use crate::error::ProfileError;
use crate::model::{Dimension, Level};

/// A single `{dimension, level}` requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trigger {
    pub dimension: Dimension,
    pub level: Level,
}

impl Trigger {
    pub fn new(dimension: Dimension, level: Level) -> Self {
        Self { dimension, level }
    }

    /// True iff the profile's level for the dimension equals the trigger level.
    pub fn matches(&self, levels: &LevelMap) -> bool {
        levels.level_of(self.dimension) == self.level
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.dimension, self.level)
    }
}

/// Eligibility condition of a pool entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "triggers", rename_all = "lowercase")]
pub enum Condition {
    Single(Trigger),
    /// Conjunction; order is irrelevant and repeated pairs are idempotent.
    All(Vec<Trigger>),
}

impl Condition {
    /// Build a conjunction. An empty list is rejected since it would match
    /// every profile, which is what an unconditional entry expresses.
    pub fn all(triggers: Vec<Trigger>) -> Result<Self, ProfileError> {
        if triggers.is_empty() {
            return Err(ProfileError::EmptyTrigger);
        }
        Ok(Condition::All(triggers))
    }

    pub fn matches(&self, levels: &LevelMap) -> bool {
        match self {
            Condition::Single(trigger) => trigger.matches(levels),
            Condition::All(triggers) => triggers.iter().all(|t| t.matches(levels)),
        }
    }

    /// The pairs making up this condition.
    pub fn triggers(&self) -> &[Trigger] {
        match self {
            Condition::Single(trigger) => std::slice::from_ref(trigger),
            Condition::All(triggers) => triggers,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Condition::All(_))
    }

    /// Whether two pairs demand different levels of the same dimension,
    /// which no profile can satisfy.
    pub fn is_contradictory(&self) -> bool {
        let triggers = self.triggers();
        triggers.iter().enumerate().any(|(i, a)| {
            triggers[i + 1..]
                .iter()
                .any(|b| a.dimension == b.dimension && a.level != b.level)
        })
    }
}

/// Evaluate an optional condition; entries without one are always eligible.
pub fn is_eligible(condition: Option<&Condition>, levels: &LevelMap) -> bool {
    condition.map_or(true, |c| c.matches(levels))
}
