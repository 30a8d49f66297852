//! Purchase suggestions for gaps the current context exposes.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::model::{Category, TpoTags, Wardrobe, Weather};
use crate::core::palette::plan_colors;
use crate::core::signals::Signals;
use crate::core::vocab::StyleLabel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion
{
    pub name: String,
    pub why: String,
}

impl Suggestion
{
    fn new(
        name: impl Into<String>,
        why: impl Into<String>,
    ) -> Self
    {
        Self { name: name.into(), why: why.into() }
    }
}

const WATERPROOF_OUTER: &[&str] = &["waterproof", "rain", "방수", "레인", "우비"];
const WATERPROOF_SHOES: &[&str] = &["waterproof", "rain", "boots", "방수", "레인", "부츠"];
const WARM_OUTER: &[&str] = &["coat", "padded", "puffer", "parka", "코트", "패딩"];
const BLAZER: &[&str] = &["blazer", "jacket", "블레이저", "자켓"];
const SHIRT: &[&str] = &["shirt", "셔츠"];
const SLACKS: &[&str] = &["slacks", "슬랙스"];

/// Items worth buying for this context, ending with a color direction.
///
/// Duplicate names keep their first reason.
pub fn suggest_missing_items(
    wardrobe: &Wardrobe,
    weather: &Weather,
    tags: &TpoTags,
    signals: &Signals,
) -> Vec<Suggestion>
{
    let mut recs = Vec::new();

    if weather.rain
    {
        if !wardrobe.has_item_like(Category::Outer, WATERPROOF_OUTER)
        {
            recs.push(Suggestion::new(
                "waterproof windbreaker or rain jacket",
                "Makes rainy days far more comfortable.",
            ));
        }
        if !wardrobe.has_item_like(Category::Shoes, WATERPROOF_SHOES)
        {
            recs.push(Suggestion::new(
                "waterproof shoes (rain boots or waterproof sneakers)",
                "Takes the stress out of wet feet.",
            ));
        }
    }

    if weather.feels_c <= 8.0 && !wardrobe.has_item_like(Category::Outer, WARM_OUTER)
    {
        recs.push(Suggestion::new(
            "warm outer (coat or padded jacket)",
            "Cold days get much easier to dress for.",
        ));
    }

    if tags.any_of(&["formal", "smart"])
    {
        if !wardrobe.has_item_like(Category::Outer, BLAZER)
        {
            recs.push(Suggestion::new(
                "basic blazer",
                "A safe choice for meetings, presentations and interviews.",
            ));
        }
        if !wardrobe.has_item_like(Category::Tops, SHIRT)
        {
            recs.push(Suggestion::new(
                "basic shirt (white or light blue)",
                "Strong for semi-formal and clean looks.",
            ));
        }
    }

    let wants_clean = signals
        .prefer_signals
        .iter()
        .any(|s| matches!(s, StyleLabel::Minimal | StyleLabel::Clean));
    if wants_clean && !wardrobe.has_item_like(Category::Bottoms, SLACKS)
    {
        recs.push(Suggestion::new("dark slacks", "Pairs easily with a clean or minimal mood."));
    }

    let plan = plan_colors(weather, tags, signals);
    recs.push(Suggestion::new(
        format!(
            "color direction: {} + {}",
            plan.base
                .pretty(),
            plan.accent
                .pretty()
        ),
        "A stable palette for today's conditions.",
    ));

    // First reason wins on duplicate names
    let mut seen: IndexMap<String, Suggestion> = IndexMap::new();
    for r in recs
    {
        seen.entry(
            r.name
                .clone(),
        )
        .or_insert(r);
    }
    seen.into_values()
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::wardrobe::default_wardrobe;

    fn weather(
        feels_c: f64,
        rain: bool,
    ) -> Weather
    {
        Weather {
            city: "Seoul,KR".into(),
            temp_c: feels_c,
            feels_c,
            humidity: 70,
            wind_ms: 2.0,
            rain,
            desc: "rain".into(),
        }
    }

    #[test]
    fn empty_wardrobe_on_cold_rainy_formal_day()
    {
        let sig = Signals { prefer_signals: vec![StyleLabel::Clean], ..Default::default() };
        let recs = suggest_missing_items(&Wardrobe::default(), &weather(3.0, true), &TpoTags::new(["formal"]), &sig);
        let names: Vec<_> = recs
            .iter()
            .map(|r| r.name.as_str())
            .collect();

        assert_eq!(names.len(), 7);
        assert!(names[0].starts_with("waterproof windbreaker"));
        assert_eq!(names[5], "dark slacks");
        assert!(names[6].starts_with("color direction: navy + "));
    }

    #[test]
    fn default_wardrobe_needs_only_color_direction_on_mild_day()
    {
        let recs = suggest_missing_items(&default_wardrobe(), &weather(20.0, false), &TpoTags::default(), &Signals::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "color direction: neutral (monochrome) + blue");
    }
}
