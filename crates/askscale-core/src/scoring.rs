//! Dimension scoring.
//!
//! Reduces one session's responses to an average per catalog dimension and
//! classifies each average into a band.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::band::{classify, LevelMap, UNSCORED};
use crate::error::ProfileError;
use crate::model::{Catalog, Dimension, Item, Level, ResponseValue, Responses, SCALE_MAX, SCALE_MIN};

/// Score of one dimension for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    /// Mean effective score, or `0.0` when nothing was answered.
    pub average: f64,
    pub level: Level,
    /// Number of answered items that contributed to the average.
    pub answered: usize,
}

impl DimensionScore {
    pub fn is_scored(&self) -> bool {
        self.answered > 0
    }
}

/// An item together with the session's answer to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredItem {
    pub item: Item,
    pub response: ResponseValue,
    /// Response after reverse-scoring.
    pub effective: ResponseValue,
}

/// Answered items grouped by dimension.
pub type GroupedItems = BTreeMap<Dimension, Vec<AnsweredItem>>;

/// Everything derived from one session's responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    scores: Vec<DimensionScore>,
    levels: LevelMap,
    answered: GroupedItems,
}

impl Profile {
    /// Scores in catalog dimension order.
    pub fn scores(&self) -> &[DimensionScore] {
        &self.scores
    }

    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    pub fn answered(&self) -> &GroupedItems {
        &self.answered
    }

    pub fn score_of(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.scores.iter().find(|s| s.dimension == dimension)
    }

    /// Scores ordered by descending average; ties keep catalog order.
    pub fn sorted_scores(&self) -> Vec<DimensionScore> {
        let mut sorted = self.scores.clone();
        sort_descending(&mut sorted);
        sorted
    }

    /// Number of responses that counted towards any dimension.
    pub fn answered_count(&self) -> usize {
        self.answered.values().map(Vec::len).sum()
    }
}

/// Stable sort by descending average.
pub fn sort_descending(scores: &mut [DimensionScore]) {
    scores.sort_by(|a, b| b.average.total_cmp(&a.average));
}

/// Effective score of a response: `SCALE_MAX + 1 - response` for
/// reverse-scored items.
pub fn effective_score(item: &Item, response: ResponseValue) -> ResponseValue {
    if item.reverse {
        SCALE_MAX + SCALE_MIN - response
    } else {
        response
    }
}

/// Reject any response outside the Likert scale.
pub fn validate_responses(responses: &Responses) -> Result<(), ProfileError> {
    match responses
        .iter()
        .find(|(_, v)| !(SCALE_MIN..=SCALE_MAX).contains(v))
    {
        Some((item_id, value)) => Err(ProfileError::ResponseOutOfRange { item_id, value }),
        None => Ok(()),
    }
}

/// Compute dimension scores and levels for one session.
///
/// Responses to ids the catalog does not know are ignored.
pub fn compute_profile(catalog: &Catalog, responses: &Responses) -> Result<Profile, ProfileError> {
    validate_responses(responses)?;

    for (item_id, _) in responses.iter() {
        if catalog.item(item_id).is_none() {
            tracing::warn!(item_id, "ignoring response to unknown item");
        }
    }

    let mut answered = GroupedItems::new();
    let mut scores = Vec::with_capacity(catalog.dimensions().len());

    for &dimension in catalog.dimensions() {
        let group: Vec<AnsweredItem> = catalog
            .items_for(dimension)
            .filter_map(|item| {
                responses.get(item.id).map(|response| AnsweredItem {
                    item: item.clone(),
                    response,
                    effective: effective_score(item, response),
                })
            })
            .collect();

        let average = if group.is_empty() {
            UNSCORED
        } else {
            group.iter().map(|a| a.effective as f64).sum::<f64>() / group.len() as f64
        };

        tracing::debug!(%dimension, average, answered = group.len(), "scored dimension");

        scores.push(DimensionScore {
            dimension,
            average,
            level: classify(average),
            answered: group.len(),
        });
        if !group.is_empty() {
            answered.insert(dimension, group);
        }
    }

    let levels = LevelMap::from_scores(scores.iter().map(|s| (s.dimension, s.average)));

    Ok(Profile {
        scores,
        levels,
        answered,
    })
}
