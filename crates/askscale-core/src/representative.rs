//! Representative question selection.
//!
//! Surfaces a few of the respondent's own answers next to the narrative:
//! up to two items from the highest-scoring HIGH dimensions and one item
//! from the single lowest-scoring remaining dimension. An item id is never
//! surfaced twice, even when callers supply overlapping item groups.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::band::classify;
use crate::model::{Dimension, ItemId, Level, ResponseValue};
use crate::random::RandomSource;
use crate::scoring::{AnsweredItem, DimensionScore, GroupedItems};

/// Maximum number of representatives taken from HIGH dimensions.
pub const MAX_HIGH_PICKS: usize = 2;

/// An answered item shown back to the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representative {
    pub item_id: ItemId,
    pub dimension: Dimension,
    /// Whether the item was picked for a HIGH dimension.
    pub high: bool,
    pub prompt: String,
    pub response: ResponseValue,
    /// The item's high or low commentary, matching `high`.
    #[serde(default)]
    pub commentary: Option<String>,
}

impl Representative {
    fn from_answered(answered: &AnsweredItem, dimension: Dimension, high: bool) -> Self {
        let item = &answered.item;
        let commentary = if high {
            item.high_text.clone()
        } else {
            item.low_text.clone()
        };
        Self {
            item_id: item.id,
            dimension,
            high,
            prompt: item.prompt.clone(),
            response: answered.response,
            commentary,
        }
    }
}

/// Tracks item ids already surfaced in this selection.
struct Picker<'a> {
    grouped: &'a GroupedItems,
    used: HashSet<ItemId>,
    selected: Vec<Representative>,
}

impl<'a> Picker<'a> {
    fn new(grouped: &'a GroupedItems) -> Self {
        Self {
            grouped,
            used: HashSet::new(),
            selected: Vec::new(),
        }
    }

    /// Pick one unused item of `dimension` uniformly at random.
    fn pick(&mut self, dimension: Dimension, high: bool, rng: &mut dyn RandomSource) -> bool {
        let Some(items) = self.grouped.get(&dimension) else {
            tracing::debug!(%dimension, "no answered items to represent dimension");
            return false;
        };
        let available: Vec<&AnsweredItem> = items
            .iter()
            .filter(|a| !self.used.contains(&a.item.id))
            .collect();
        if available.is_empty() {
            tracing::debug!(%dimension, "all items already used");
            return false;
        }

        let chosen = available[rng.index(available.len())];
        self.used.insert(chosen.item.id);
        self.selected
            .push(Representative::from_answered(chosen, dimension, high));
        true
    }
}

/// Choose representative items for a profile.
///
/// `sorted` should be ordered by descending average; both bands are
/// re-sorted here so the result does not depend on it.
pub fn select_representatives(
    sorted: &[DimensionScore],
    grouped: &GroupedItems,
    rng: &mut dyn RandomSource,
) -> Vec<Representative> {
    let (mut high, mut low): (Vec<&DimensionScore>, Vec<&DimensionScore>) = sorted
        .iter()
        .partition(|s| classify(s.average) == Level::High);
    high.sort_by(|a, b| b.average.total_cmp(&a.average));
    low.sort_by(|a, b| a.average.total_cmp(&b.average));

    let mut picker = Picker::new(grouped);

    let mut high_picks = 0;
    for score in high {
        if high_picks == MAX_HIGH_PICKS {
            break;
        }
        if picker.pick(score.dimension, true, rng) {
            high_picks += 1;
        }
    }

    // Only the lowest dimension is tried; there is no fallback.
    if let Some(lowest) = low.first() {
        picker.pick(lowest.dimension, false, rng);
    }

    picker.selected
}
