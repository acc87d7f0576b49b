//! Report assembly.
//!
//! [`build_report`] composes narrative pool selection with representative
//! question selection. [`ProfileReport`] wraps the result with the scores
//! and catalog metadata the renderers need.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::band::LevelMap;
use crate::error::ProfileError;
use crate::model::{Catalog, Responses};
use crate::narrative::{select_narrative, ConflictNote};
use crate::pools::ContentPools;
use crate::random::RandomSource;
use crate::representative::{select_representatives, Representative, MAX_HIGH_PICKS};
use crate::scoring::{compute_profile, DimensionScore, GroupedItems, Profile};

/// The personalised report payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub affirmation: Option<String>,
    pub conflict: Option<ConflictNote>,
    pub call_to_action: String,
    pub representatives: Vec<Representative>,
    /// Lead compliment for each HIGH representative's dimension.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Lead suggestion for the LOW representative's dimension.
    #[serde(default)]
    pub suggestion: Option<String>,
}

impl Report {
    pub fn high_representatives(&self) -> impl Iterator<Item = &Representative> {
        self.representatives.iter().filter(|r| r.high)
    }

    pub fn low_representatives(&self) -> impl Iterator<Item = &Representative> {
        self.representatives.iter().filter(|r| !r.high)
    }
}

/// Build the report for an already classified profile.
///
/// `sorted` must be ordered by descending average and `grouped` holds each
/// dimension's answered items.
pub fn build_report(
    pools: &ContentPools,
    levels: &LevelMap,
    sorted: &[DimensionScore],
    grouped: &GroupedItems,
    rng: &mut dyn RandomSource,
) -> Report {
    let narrative = select_narrative(pools, levels, rng);
    let representatives = select_representatives(sorted, grouped, rng);

    let highlights = representatives
        .iter()
        .filter(|r| r.high)
        .take(MAX_HIGH_PICKS)
        .filter_map(|r| pools.compliment_for(r.dimension))
        .map(str::to_string)
        .collect();
    let suggestion = representatives
        .iter()
        .find(|r| !r.high)
        .and_then(|r| pools.suggestion_for(r.dimension))
        .map(str::to_string);

    tracing::debug!(
        affirmation = narrative.affirmation.is_some(),
        conflict = narrative.conflict.is_some(),
        representatives = representatives.len(),
        "built report"
    );

    Report {
        affirmation: narrative.affirmation,
        conflict: narrative.conflict,
        call_to_action: narrative.call_to_action,
        representatives,
        highlights,
        suggestion,
    }
}

/// Summary of the catalog a report was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
    pub answered: usize,
}

/// A report together with the scores it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub generated_at: DateTime<Utc>,
    pub catalog: CatalogSummary,
    /// Dimension scores, highest first.
    pub scores: Vec<DimensionScore>,
    pub report: Report,
}

impl ProfileReport {
    pub fn new(catalog: &Catalog, profile: &Profile, report: Report) -> Self {
        Self {
            generated_at: Utc::now(),
            catalog: CatalogSummary {
                id: catalog.id.clone(),
                name: catalog.name.clone(),
                item_count: catalog.len(),
                answered: profile.answered_count(),
            },
            scores: profile.sorted_scores(),
            report,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        use anyhow::Context;
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }
}

/// Score a session and build its report in one pass.
pub fn generate(
    catalog: &Catalog,
    pools: &ContentPools,
    responses: &Responses,
    rng: &mut dyn RandomSource,
) -> Result<ProfileReport, ProfileError> {
    let profile = compute_profile(catalog, responses)?;
    let sorted = profile.sorted_scores();
    let report = build_report(pools, profile.levels(), &sorted, profile.answered(), rng);
    Ok(ProfileReport::new(catalog, &profile, report))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::condition::{Condition, Trigger};
    use crate::model::{Dimension, Item, Level};
    use crate::pools::PoolEntry;
    use crate::random::RngSource;

    fn catalog() -> Catalog {
        let mut items = Vec::new();
        let mut id = 1;
        for d in [
            Dimension::Curiosity,
            Dimension::Social,
            Dimension::Emotion,
            Dimension::Structured,
        ] {
            for _ in 0..3 {
                items.push(Item::new(id, d, format!("{d} prompt {id}")));
                id += 1;
            }
        }
        Catalog::from_items("test", items).unwrap()
    }

    fn pools() -> ContentPools {
        ContentPools::new(
            vec![PoolEntry::when(
                Condition::Single(Trigger::new(Dimension::Curiosity, Level::High)),
                "you keep learning",
            )],
            vec![PoolEntry::when(
                Condition::all(vec![
                    Trigger::new(Dimension::Emotion, Level::Low),
                    Trigger::new(Dimension::Structured, Level::High),
                ])
                .unwrap(),
                "rules wear you out",
            )
            .with_category("inner conflict")],
            vec![PoolEntry::unconditional("let's talk")],
        )
        .unwrap()
        .with_compliments(BTreeMap::from([
            (Dimension::Curiosity, vec!["curious compliment".to_string()]),
            (Dimension::Structured, vec!["structured compliment".to_string()]),
        ]))
        .with_suggestions(BTreeMap::from([(
            Dimension::Emotion,
            vec!["breathe first".to_string()],
        )]))
    }

    fn responses(values: [i64; 4]) -> Responses {
        // Each dimension gets its value on all three items.
        (1..=12)
            .map(|id: u32| (id, values[((id - 1) / 3) as usize]))
            .collect()
    }

    #[test]
    fn full_pipeline() {
        // curiosity 5, social 3, emotion 1, structured 4
        let mut rng = RngSource::seeded(1);
        let out = generate(&catalog(), &pools(), &responses([5, 3, 1, 4]), &mut rng).unwrap();

        assert_eq!(out.scores[0].dimension, Dimension::Curiosity);
        assert_eq!(out.catalog.answered, 12);

        let report = &out.report;
        assert_eq!(report.affirmation.as_deref(), Some("you keep learning"));
        let conflict = report.conflict.as_ref().unwrap();
        assert_eq!(conflict.category, "inner conflict");
        assert_eq!(report.call_to_action, "let's talk");

        assert_eq!(report.high_representatives().count(), 2);
        let low: Vec<_> = report.low_representatives().collect();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].dimension, Dimension::Emotion);

        assert_eq!(
            report.highlights,
            vec!["curious compliment", "structured compliment"]
        );
        assert_eq!(report.suggestion.as_deref(), Some("breathe first"));
    }

    #[test]
    fn flat_profile_has_no_optional_content() {
        let mut rng = RngSource::seeded(2);
        let out = generate(&catalog(), &pools(), &responses([3, 3, 3, 3]), &mut rng).unwrap();
        let report = &out.report;
        assert!(report.affirmation.is_none());
        assert!(report.conflict.is_none());
        assert!(!report.call_to_action.is_empty());
        assert!(report.highlights.is_empty());
        assert_eq!(report.representatives.len(), 1);
        assert!(report.suggestion.is_none());
    }

    #[test]
    fn invalid_session_is_rejected() {
        let mut rng = RngSource::seeded(3);
        let bad: Responses = [(1, 9)].into_iter().collect();
        assert!(generate(&catalog(), &pools(), &bad, &mut rng).is_err());
    }

    #[test]
    fn report_serializes() {
        let mut rng = RngSource::seeded(4);
        let out = generate(&catalog(), &pools(), &responses([5, 2, 1, 4]), &mut rng).unwrap();
        let json = out.to_json().unwrap();
        assert!(json.contains("\"call_to_action\""));
        assert!(json.contains("\"curiosity\""));
        let back: ProfileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.report, out.report);
    }
}
