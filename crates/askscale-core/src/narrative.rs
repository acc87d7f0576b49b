//! Narrative pool selection.
//!
//! Three independent picks: an affirmation and a conflict note drawn from
//! the entries eligible for the profile, and a call to action drawn from the
//! whole (never empty) call-to-action pool.

use serde::{Deserialize, Serialize};

use crate::band::LevelMap;
use crate::pools::{eligible, ContentPools, PoolEntry};
use crate::random::{choose, RandomSource};

/// A selected conflict entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictNote {
    pub text: String,
    pub category: String,
}

/// The narrative part of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub affirmation: Option<String>,
    pub conflict: Option<ConflictNote>,
    pub call_to_action: String,
}

/// Uniform pick among the eligible entries of `pool`.
pub fn pick_eligible<'a>(
    pool: &'a [PoolEntry],
    levels: &LevelMap,
    rng: &mut dyn RandomSource,
) -> Option<&'a PoolEntry> {
    let candidates = eligible(pool, levels);
    tracing::debug!(
        pool_size = pool.len(),
        eligible = candidates.len(),
        "filtered pool"
    );
    choose(rng, &candidates).copied()
}

pub fn select_affirmation(
    pool: &[PoolEntry],
    levels: &LevelMap,
    rng: &mut dyn RandomSource,
) -> Option<String> {
    pick_eligible(pool, levels, rng).map(|e| e.text.clone())
}

pub fn select_conflict(
    pool: &[PoolEntry],
    levels: &LevelMap,
    rng: &mut dyn RandomSource,
) -> Option<ConflictNote> {
    pick_eligible(pool, levels, rng).map(|e| ConflictNote {
        text: e.text.clone(),
        category: e.category.clone().unwrap_or_default(),
    })
}

/// Every call-to-action entry is eligible regardless of the profile.
pub fn select_call_to_action(pools: &ContentPools, rng: &mut dyn RandomSource) -> String {
    choose(rng, pools.calls_to_action())
        .map(|e| e.text.clone())
        .unwrap_or_default()
}

/// Run all three pool selections.
pub fn select_narrative(
    pools: &ContentPools,
    levels: &LevelMap,
    rng: &mut dyn RandomSource,
) -> Narrative {
    Narrative {
        affirmation: select_affirmation(pools.affirmations(), levels, rng),
        conflict: select_conflict(pools.conflicts(), levels, rng),
        call_to_action: select_call_to_action(pools, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, Trigger};
    use crate::model::{Dimension, Level};
    use crate::random::{RngSource, SequenceSource};

    fn single(d: Dimension, l: Level) -> Condition {
        Condition::Single(Trigger::new(d, l))
    }

    fn pools() -> ContentPools {
        ContentPools::new(
            vec![
                PoolEntry::when(single(Dimension::Curiosity, Level::High), "curious-1"),
                PoolEntry::when(single(Dimension::Curiosity, Level::High), "curious-2"),
                PoolEntry::when(single(Dimension::Social, Level::High), "social"),
            ],
            vec![
                PoolEntry::when(
                    Condition::all(vec![
                        Trigger::new(Dimension::Emotion, Level::Low),
                        Trigger::new(Dimension::Structured, Level::High),
                    ])
                    .unwrap(),
                    "rules vs temper",
                )
                .with_category("inner conflict"),
                PoolEntry::when(
                    Condition::all(vec![
                        Trigger::new(Dimension::Curiosity, Level::High),
                        Trigger::new(Dimension::Social, Level::Low),
                    ])
                    .unwrap(),
                    "curious loner",
                )
                .with_category("inner conflict"),
            ],
            vec![
                PoolEntry::unconditional("cta-1"),
                PoolEntry::unconditional("cta-2"),
                PoolEntry::unconditional("cta-3"),
            ],
        )
        .unwrap()
    }

    fn scenario() -> LevelMap {
        LevelMap::from_scores([
            (Dimension::Curiosity, 4.2),
            (Dimension::Social, 2.1),
            (Dimension::Emotion, 3.0),
        ])
    }

    #[test]
    fn affirmation_picks_among_eligible_only() {
        let pools = pools();
        let levels = scenario();
        let mut rng = SequenceSource::new(vec![0, 1, 2, 3]);
        let picks: Vec<_> = (0..4)
            .map(|_| select_affirmation(pools.affirmations(), &levels, &mut rng).unwrap())
            .collect();
        assert_eq!(picks, vec!["curious-1", "curious-2", "curious-1", "curious-2"]);
    }

    #[test]
    fn no_eligible_affirmation_is_absent() {
        let pools = pools();
        let levels = LevelMap::from_scores([(Dimension::Curiosity, 1.0)]);
        let mut rng = RngSource::seeded(1);
        assert!(select_affirmation(pools.affirmations(), &levels, &mut rng).is_none());
    }

    #[test]
    fn conflict_carries_category() {
        let pools = pools();
        let mut rng = RngSource::seeded(7);
        let note = select_conflict(pools.conflicts(), &scenario(), &mut rng).unwrap();
        assert_eq!(note.text, "curious loner");
        assert_eq!(note.category, "inner conflict");
    }

    #[test]
    fn unscored_dimension_blocks_high_conflict() {
        let pools = pools();
        let levels = LevelMap::from_scores([(Dimension::Emotion, 1.0)]);
        let mut rng = RngSource::seeded(3);
        assert!(select_conflict(pools.conflicts(), &levels, &mut rng).is_none());
    }

    #[test]
    fn call_to_action_always_present() {
        let pools = pools();
        let mut rng = RngSource::seeded(11);
        for _ in 0..50 {
            let n = select_narrative(&pools, &LevelMap::new(), &mut rng);
            assert!(n.call_to_action.starts_with("cta-"));
            assert!(n.affirmation.is_none());
            assert!(n.conflict.is_none());
        }
    }

    #[test]
    fn call_to_action_ignores_profile() {
        let pools = pools();
        let mut rng = SequenceSource::new(vec![2]);
        assert_eq!(select_call_to_action(&pools, &mut rng), "cta-3");
    }
}
