//! Diversity-aware selection across repeated runs.
//!
//! Only the strongest few candidates are eligible, so the recency penalty can
//! reorder good fits but never promote a poor one. The penalty decays
//! linearly with how long ago an item was last picked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::model::{Category, WardrobeItem};
use crate::core::scorer::Ranked;

/// Default number of top-ranked candidates the selector considers
pub const DEFAULT_TOP_K: usize = 6;

/// Default length of each category's recent-pick history
pub const DEFAULT_HISTORY_CAP: usize = 5;

/// Selection knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiversityOptions
{
    /// Candidates considered after ranking
    pub top_k: usize,
    /// History bound, also the denominator of the decay
    pub history_cap: usize,
}

impl Default for DiversityOptions
{
    fn default() -> Self
    {
        Self { top_k: DEFAULT_TOP_K, history_cap: DEFAULT_HISTORY_CAP }
    }
}

/// Most-recent-first pick history per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentPicks(BTreeMap<Category, Vec<String>>);

impl RecentPicks
{
    /// History for one category (empty when never picked)
    pub fn history(
        &self,
        category: Category,
    ) -> &[String]
    {
        self.0
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Move `name` to the front, dropping older duplicates and overflow
    pub fn record(
        &mut self,
        category: Category,
        name: &str,
        cap: usize,
    )
    {
        let list = self
            .0
            .entry(category)
            .or_default();
        list.retain(|n| n != name);
        list.insert(0, name.to_string());
        list.truncate(cap);
    }
}

/// Recency penalty for an item at history `position` (0 = most recent)
pub fn recency_penalty(
    position: usize,
    strength: f64,
    history_cap: usize,
) -> f64
{
    if history_cap == 0
    {
        return 0.0;
    }
    let decay = 1.0 - position as f64 / history_cap as f64;
    (strength * decay).max(0.0)
}

/// Pick the best candidate after discounting recently used items.
///
/// `ranked` must be sorted by score, best first. Ties on the adjusted score
/// keep the ranking order.
pub fn select_diverse<'a>(
    ranked: &[Ranked<'a>],
    history: &[String],
    strength: f64,
    opts: DiversityOptions,
) -> Option<&'a WardrobeItem>
{
    let mut best: Option<(f64, &'a WardrobeItem)> = None;

    for cand in ranked
        .iter()
        .take(
            opts.top_k
                .max(1),
        )
    {
        let penalty = history
            .iter()
            .position(|n| *n == cand.item.name)
            .map(|pos| recency_penalty(pos, strength, opts.history_cap))
            .unwrap_or(0.0);
        let adjusted = cand.score - penalty;

        trace!(item = %cand.item.name, score = cand.score, penalty, "diversity candidate");

        // Strictly greater keeps the earlier (higher-ranked) item on ties
        let better = match best
        {
            Some((b, _)) => adjusted > b,
            None => !adjusted.is_nan(),
        };
        if better
        {
            best = Some((adjusted, cand.item));
        }
    }

    best.map(|(_, item)| item)
        .or_else(|| {
            ranked
                .first()
                .map(|r| r.item)
        })
}
