//! Additive item scoring.
//!
//! Every wardrobe item gets a real-valued affinity for the day's context.
//! Scores are unbounded; large negative values are how bans exclude items
//! while the selection step stays uniform. The per-step breakdown is kept so
//! `ootd explain` and trace logs can show where points came from.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::core::model::{Category, WardrobeItem, Weather};
use crate::core::profile::Preferences;
use crate::core::vocab::ColorKey;

/// Each wanted (occasion) tag present on the item
pub const TAG_MATCH_BONUS: f64 = 2.0;
/// Each preferred style whose tag is on the item
pub const PREFER_TAG_BONUS: f64 = 1.0;
/// Each preferred style named in the item's name
pub const PREFER_NAME_BONUS: f64 = 0.4;
/// Each avoided word contained in the item's name
pub const AVOID_NAME_PENALTY: f64 = -2.0;
/// Rain-ready item (or a category rain never hurts) on a rainy day
pub const RAIN_OK_BONUS: f64 = 0.5;
/// Outer/shoes that are not rain-ready on a rainy day
pub const RAIN_PENALTY: f64 = -1.0;
/// Peak of the triangular warmth-closeness bonus
pub const WARMTH_PEAK: f64 = 2.2;
/// Each banned keyword contained in the item's name
pub const BANNED_PENALTY: f64 = -7.0;
/// Item excluded for this pass by a reroll request
pub const TRANSIENT_BAN_PENALTY: f64 = -999.0;

/// Feels-like temperature band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TempBand
{
    VeryCold,
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl TempBand
{
    /// Band boundaries are inclusive upper limits: 0, 8, 16, 23, 29
    pub fn from_feels(feels_c: f64) -> Self
    {
        if feels_c <= 0.0
        {
            TempBand::VeryCold
        }
        else if feels_c <= 8.0
        {
            TempBand::Cold
        }
        else if feels_c <= 16.0
        {
            TempBand::Cool
        }
        else if feels_c <= 23.0
        {
            TempBand::Mild
        }
        else if feels_c <= 29.0
        {
            TempBand::Warm
        }
        else
        {
            TempBand::Hot
        }
    }

    /// Ideal garment warmth for the band, before bias
    pub fn base_warmth(self) -> f64
    {
        match self
        {
            TempBand::VeryCold => 6.0,
            TempBand::Cold => 5.0,
            TempBand::Cool => 3.5,
            TempBand::Mild => 2.5,
            TempBand::Warm => 1.5,
            TempBand::Hot => 0.5,
        }
    }

    pub fn label(self) -> &'static str
    {
        match self
        {
            TempBand::VeryCold => "very cold",
            TempBand::Cold => "cold",
            TempBand::Cool => "cool",
            TempBand::Mild => "mild",
            TempBand::Warm => "warm",
            TempBand::Hot => "hot",
        }
    }
}

impl fmt::Display for TempBand
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(self.label())
    }
}

/// Ideal warmth for a feels-like temperature, shifted by the user's bias
/// and floored at zero
pub fn ideal_warmth(
    feels_c: f64,
    bias: f64,
) -> f64
{
    (TempBand::from_feels(feels_c).base_warmth() + bias).max(0.0)
}

/// Triangular closeness bonus: `WARMTH_PEAK` at an exact match, zero from
/// `WARMTH_PEAK` units away
pub fn warmth_closeness(
    warmth: f64,
    ideal: f64,
) -> f64
{
    (WARMTH_PEAK - (warmth - ideal).abs()).max(0.0)
}

/// Everything the scorer reads besides the item itself
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a>
{
    /// De-duplicated occasion tags
    pub wanted: &'a [String],
    pub prefs: &'a Preferences,
    pub weather: &'a Weather,
    /// Names excluded for this pass only
    pub transient_bans: &'a HashSet<String>,
}

/// Per-step score contributions, summed by `total`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown
{
    pub tags: f64,
    pub style: f64,
    pub avoid: f64,
    pub rain: f64,
    pub warmth: f64,
    pub banned: f64,
    pub transient: f64,
}

impl ScoreBreakdown
{
    pub fn total(&self) -> f64
    {
        self.tags + self.style + self.avoid + self.rain + self.warmth + self.banned + self.transient
    }
}

/// Score `item` step by step.
///
/// Steps run in a fixed order: wanted tags, preferred styles, avoided words,
/// rain, warmth, banned keywords, transient bans. Missing optional fields
/// count as zero/false; the function never fails.
pub fn explain_item(
    item: &WardrobeItem,
    category: Category,
    ctx: &ScoreContext<'_>,
) -> ScoreBreakdown
{
    let name = item
        .name
        .to_lowercase();
    let sig = &ctx
        .prefs
        .signals;
    let mut b = ScoreBreakdown::default();

    // 1) Occasion tags
    for t in ctx.wanted
    {
        if item.has_tag(t)
        {
            b.tags += TAG_MATCH_BONUS;
        }
    }

    // 2) Preferred styles: tag hit, plus a nudge when the name says it
    for label in &sig.prefer_signals
    {
        if item.has_tag(label.tag())
        {
            b.style += PREFER_TAG_BONUS;
        }
        if name.contains(label.display()) || name.contains(label.tag())
        {
            b.style += PREFER_NAME_BONUS;
        }
    }

    // 3) Avoided words in the name
    for word in &sig.avoid_signals
    {
        if mentions(item, &name, word)
        {
            b.avoid += AVOID_NAME_PENALTY;
        }
    }

    // 4) Rain never penalizes tops, bottoms or extras
    if ctx
        .weather
        .rain
    {
        b.rain = if item.rain_ok() || !category.rain_sensitive()
        {
            RAIN_OK_BONUS
        }
        else
        {
            RAIN_PENALTY
        };
    }

    // 5) Warmth closeness
    if category.uses_warmth()
    {
        let ideal = ideal_warmth(
            ctx.weather
                .feels_c,
            ctx.prefs
                .warmth_bias,
        );
        b.warmth = warmth_closeness(item.warmth(), ideal);
    }

    // 6) Banned keywords
    for kw in &ctx
        .prefs
        .banned_keywords
    {
        if mentions(item, &name, &kw.to_lowercase())
        {
            b.banned += BANNED_PENALTY;
        }
    }

    // 7) Reroll exclusion
    if ctx
        .transient_bans
        .contains(&item.name)
    {
        b.transient = TRANSIENT_BAN_PENALTY;
    }

    b
}

/// True when the lowercased `name` contains `word`. A color word also
/// matches the color's other triggers and its tag, so `블랙` hits
/// `black knit`.
fn mentions(
    item: &WardrobeItem,
    name: &str,
    word: &str,
) -> bool
{
    if name.contains(word)
    {
        return true;
    }
    ColorKey::from_trigger(word).is_some_and(|color| {
        item.has_tag(color.key())
            || color
                .triggers()
                .iter()
                .any(|t| name.contains(t))
    })
}

/// Score `item` for `category` under `ctx`
pub fn score_item(
    item: &WardrobeItem,
    category: Category,
    ctx: &ScoreContext<'_>,
) -> f64
{
    explain_item(item, category, ctx).total()
}

/// A scored candidate
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a>
{
    pub score: f64,
    pub item: &'a WardrobeItem,
}

/// Score and sort `items`, best first. The sort is stable, so equal scores
/// keep wardrobe order.
pub fn rank<'a>(
    items: &'a [WardrobeItem],
    category: Category,
    ctx: &ScoreContext<'_>,
) -> Vec<Ranked<'a>>
{
    let mut ranked: Vec<Ranked<'a>> = items
        .iter()
        .map(|item| Ranked { score: score_item(item, category, ctx), item })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
    });
    ranked
}
