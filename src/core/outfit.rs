//! Outfit assembly: one pick per slot, weather-driven extras, color plan and
//! the human-readable reasons shown next to the result.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::diversity::{
    DEFAULT_HISTORY_CAP,
    DEFAULT_TOP_K,
    DiversityOptions,
    select_diverse,
};
use crate::core::model::{Category, Outfit, Slot, TpoTags, Wardrobe, WardrobeItem, Weather};
use crate::core::palette::{ColorPlan, plan_colors};
use crate::core::profile::{Preferences, STYLE_DNA_MAX_CHARS};
use crate::core::scorer::{ScoreContext, TempBand, rank};
use crate::infra::utils::TextUtils;

/// Outer is worn at or below this feels-like temperature
pub const OUTER_FEELS_MAX: f64 = 16.0;
/// Outer is worn at or above this wind speed
pub const OUTER_WIND_MIN: f64 = 7.0;
/// Cold-weather accessory at or below this feels-like temperature
pub const COLD_EXTRA_FEELS_MAX: f64 = 8.0;
/// Default length of the style-text echo in reasons
pub const DEFAULT_ECHO_CHARS: usize = 120;

/// Engine tuning, loaded from the `[engine]` config table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings
{
    /// Candidates the diversity selector considers per slot
    pub top_k: usize,
    /// Recent-pick history length per category
    pub history_cap: usize,
    /// Bound on the accumulated style text
    pub style_dna_chars: usize,
    /// Characters of style text echoed in reasons
    pub echo_chars: usize,
}

impl Default for EngineSettings
{
    fn default() -> Self
    {
        Self {
            top_k: DEFAULT_TOP_K,
            history_cap: DEFAULT_HISTORY_CAP,
            style_dna_chars: STYLE_DNA_MAX_CHARS,
            echo_chars: DEFAULT_ECHO_CHARS,
        }
    }
}

impl EngineSettings
{
    pub fn diversity(&self) -> DiversityOptions
    {
        DiversityOptions { top_k: self.top_k, history_cap: self.history_cap }
    }
}

/// Engine output for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation
{
    pub outfit: Outfit,
    pub color_plan: ColorPlan,
    pub reasons: Vec<String>,
    /// True when the previous outfit was excluded for this pass
    pub rerolled: bool,
}

/// Whether the day calls for an outer layer
pub fn needs_outer(weather: &Weather) -> bool
{
    weather.feels_c <= OUTER_FEELS_MAX || weather.rain || weather.wind_ms >= OUTER_WIND_MIN
}

/// Accessories for the day, named after the user's own extras when possible
pub fn pick_extras(
    extras: &[WardrobeItem],
    weather: &Weather,
) -> Vec<String>
{
    let first_tagged = |tag: &str, fallback: &str| {
        extras
            .iter()
            .find(|it| it.has_tag(tag))
            .map(|it| {
                it.name
                    .clone()
            })
            .unwrap_or_else(|| fallback.to_string())
    };

    let mut out = Vec::new();
    if weather.rain
    {
        out.push(first_tagged("rain", "umbrella"));
    }
    if weather.feels_c <= COLD_EXTRA_FEELS_MAX
    {
        out.push(first_tagged("cold", "scarf"));
    }
    out
}

/// Assemble an outfit for the given context.
///
/// `prefs` must already be rebuilt for this request. Items named in
/// `transient_bans` are pushed to the bottom of every ranking for this pass
/// only.
#[instrument(skip_all, fields(feels = weather.feels_c, rain = weather.rain, tags = %tags))]
pub fn build_outfit(
    wardrobe: &Wardrobe,
    weather: &Weather,
    tags: &TpoTags,
    prefs: &Preferences,
    transient_bans: &HashSet<String>,
    settings: &EngineSettings,
) -> Recommendation
{
    let ctx = ScoreContext {
        wanted: tags.as_slice(),
        prefs,
        weather,
        transient_bans,
    };
    let opts = settings.diversity();

    let pick = |category: Category| -> Option<WardrobeItem> {
        let ranked = rank(wardrobe.items(category), category, &ctx);
        let history = prefs
            .recent_picks
            .history(category);
        let chosen = select_diverse(&ranked, history, prefs.diversity_strength, opts);
        debug!(
            %category,
            candidates = ranked.len(),
            chosen = chosen.map(|it| it.name.as_str()),
            "slot selected"
        );
        chosen.cloned()
    };

    let mut outfit = Outfit::default();
    for slot in Slot::ALL
    {
        if slot == Slot::Outer && !needs_outer(weather)
        {
            continue;
        }
        outfit.set(slot, pick(slot.category()));
    }
    outfit.extras = pick_extras(wardrobe.items(Category::Extras), weather);

    let color_plan = plan_colors(weather, tags, &prefs.signals);
    let rerolled = !transient_bans.is_empty();
    let reasons = build_reasons(weather, tags, prefs, rerolled, &color_plan, settings);

    Recommendation { outfit, color_plan, reasons, rerolled }
}

fn build_reasons(
    weather: &Weather,
    tags: &TpoTags,
    prefs: &Preferences,
    rerolled: bool,
    plan: &ColorPlan,
    settings: &EngineSettings,
) -> Vec<String>
{
    let mut reasons = vec![format!(
        "Built for a feels-like {:.1}°C ({}).",
        weather.feels_c,
        TempBand::from_feels(weather.feels_c)
    )];

    if weather.rain
    {
        reasons.push("Rain or snow is likely, so rain-ready outer and shoes were favored.".into());
    }

    reasons.push(format!("Occasion: {tags}."));

    if !prefs
        .style_dna
        .is_empty()
    {
        reasons.push(format!(
            "Reflecting your mood notes and chat: \"{}\"",
            TextUtils::ellipsize(&prefs.style_dna, settings.echo_chars)
        ));
    }

    if !prefs
        .banned_keywords
        .is_empty()
    {
        reasons.push(format!(
            "Kept out anything matching: {}.",
            prefs
                .banned_keywords
                .join(", ")
        ));
    }

    if rerolled
    {
        reasons.push("Swapped out the previous outfit as requested.".into());
    }

    reasons.push(format!(
        "Diversity strength {:.1}: recently worn items are nudged down.",
        prefs.diversity_strength
    ));

    reasons.push(format!(
        "Colors: {} base with {} accents.",
        plan.base
            .pretty(),
        plan.accent
            .pretty()
    ));

    reasons
}
