//! End-to-end engine scenarios: weather, occasion and text preferences
//! driving concrete picks.

mod util;

use std::collections::HashSet;

use ootd::core::outfit::build_outfit;
use ootd::core::profile::{STYLE_DNA_MAX_CHARS, rebuild_profile};
use ootd::core::vocab::ColorKey;
use ootd::core::wardrobe::default_wardrobe;
use ootd::{EngineSettings, Preferences, Session, TpoTags, Wardrobe, WardrobeItem};
use util::{tops_only, weather};

fn top_name(
    wardrobe: &Wardrobe,
    feels_c: f64,
    tags: &TpoTags,
    prefs: &Preferences,
) -> Option<String>
{
    build_outfit(wardrobe, &weather(feels_c, false), tags, prefs, &HashSet::new(), &EngineSettings::default())
        .outfit
        .top
        .map(|t| t.name)
}

#[test]
fn freezing_formal_day_prefers_warmth_over_tag_match()
{
    let formal = TpoTags::new(["formal"]);
    let prefs = Preferences::default();

    // formal light shirt: +2.0 tag, 0.0 warmth; casual heavy knit: 2.2 warmth
    let w = tops_only(vec![
        WardrobeItem::new("formal shirt", &["formal"]).with_warmth(2.0),
        WardrobeItem::new("chunky knit", &["casual"]).with_warmth(6.0),
    ]);
    assert_eq!(top_name(&w, -5.0, &formal, &prefs).as_deref(), Some("chunky knit"));

    // A warm formal piece beats both
    let mut w = w;
    w.tops
        .push(WardrobeItem::new("wool suit jacket top", &["formal"]).with_warmth(6.0));
    assert_eq!(top_name(&w, -5.0, &formal, &prefs).as_deref(), Some("wool suit jacket top"));
}

#[test]
fn rainy_shoes_tag_match_outweighs_rain_tolerance_in_either_order()
{
    let formal = TpoTags::new(["formal"]);
    let prefs = Preferences::default();
    let rain_ok = WardrobeItem::new("rubber boots", &["outdoor"]).with_rain_ok(true);
    let formal_shoe = WardrobeItem::new("oxfords", &["formal"]).with_rain_ok(false);

    for shoes in [vec![rain_ok.clone(), formal_shoe.clone()], vec![formal_shoe.clone(), rain_ok.clone()]]
    {
        let w = Wardrobe { shoes, ..Wardrobe::default() };
        let rec = build_outfit(&w, &weather(18.0, true), &formal, &prefs, &HashSet::new(), &EngineSettings::default());
        // +2.0 - 1.0 beats +0.5
        assert_eq!(
            rec.outfit
                .shoes
                .map(|s| s.name)
                .as_deref(),
            Some("oxfords")
        );
    }

    // Without an occasion match, rain tolerance decides
    let casual = TpoTags::default();
    let w = Wardrobe { shoes: vec![formal_shoe, rain_ok], ..Wardrobe::default() };
    let rec = build_outfit(&w, &weather(18.0, true), &casual, &prefs, &HashSet::new(), &EngineSettings::default());
    assert_eq!(
        rec.outfit
            .shoes
            .map(|s| s.name)
            .as_deref(),
        Some("rubber boots")
    );
}

#[test]
fn korean_negation_excludes_black_items()
{
    let w = tops_only(vec![
        WardrobeItem::new("블랙 니트", &["casual"]).with_warmth(3.5),
        WardrobeItem::new("아이보리 니트", &["casual"]).with_warmth(3.5),
    ]);
    let mut session = Session::default();
    session.add_mood("블랙은 빼줘");

    let rec = session.recommend(&w, &weather(12.0, false), &TpoTags::default(), None, &EngineSettings::default());

    assert!(
        session
            .prefs
            .signals
            .avoid_colors
            .contains(&ColorKey::Black)
    );
    assert_eq!(
        rec.outfit
            .top
            .map(|t| t.name)
            .as_deref(),
        Some("아이보리 니트")
    );
}

#[test]
fn korean_negation_reaches_english_names_in_the_built_in_wardrobe()
{
    let mut session = Session::default();
    session.add_mood("블랙은 빼줘");

    let rec = session.recommend(&default_wardrobe(), &weather(2.0, false), &TpoTags::default(), None, &EngineSettings::default());

    assert!(
        session
            .prefs
            .signals
            .avoid_colors
            .contains(&ColorKey::Black)
    );
    let top = rec
        .outfit
        .top
        .map(|t| t.name)
        .unwrap_or_default();
    assert!(!top.contains("black"), "picked {top}");
    assert_eq!(top, "sweatshirt");
}

#[test]
fn english_negation_excludes_black_items()
{
    let w = tops_only(vec![
        WardrobeItem::new("black knit", &["casual"]).with_warmth(3.5),
        WardrobeItem::new("cream knit", &["casual"]).with_warmth(3.5),
    ]);
    let prefs = rebuild_profile(
        &Preferences::default(),
        &[],
        &[ootd::core::profile::ChatTurn::user("exclude black please")],
        &[],
        STYLE_DNA_MAX_CHARS,
    );

    assert!(
        prefs
            .signals
            .avoid_colors
            .contains(&ColorKey::Black)
    );
    assert_eq!(prefs.banned_keywords, vec!["black".to_string()]);
    assert_eq!(top_name(&w, 12.0, &TpoTags::default(), &prefs).as_deref(), Some("cream knit"));
}

#[test]
fn banned_item_is_still_chosen_when_nothing_else_exists()
{
    let w = tops_only(vec![WardrobeItem::new("logo hoodie", &["casual"]).with_warmth(3.5)]);
    let prefs = Preferences { banned_keywords: vec!["logo".into()], ..Default::default() };
    assert_eq!(top_name(&w, 12.0, &TpoTags::default(), &prefs).as_deref(), Some("logo hoodie"));
}

#[test]
fn empty_categories_yield_empty_slots()
{
    let rec = build_outfit(
        &Wardrobe::default(),
        &weather(2.0, true),
        &TpoTags::default(),
        &Preferences::default(),
        &HashSet::new(),
        &EngineSettings::default(),
    );
    assert!(
        rec.outfit
            .top
            .is_none()
    );
    assert!(
        rec.outfit
            .outer
            .is_none()
    );
    // Accessories fall back to generic names
    assert_eq!(rec.outfit.extras, vec!["umbrella".to_string(), "scarf".to_string()]);
}

#[test]
fn color_plan_snapshot_for_rainy_date()
{
    let rec = build_outfit(
        &Wardrobe::default(),
        &weather(14.0, true),
        &TpoTags::new(["date"]),
        &Preferences::default(),
        &HashSet::new(),
        &EngineSettings::default(),
    );
    insta::assert_snapshot!(format!("{:#?}", rec.color_plan), @r"
    ColorPlan {
        base: Gray,
        accent: Pink,
        bottom_hint: Dark,
        shoe_hint: Black,
    }
    ");
}
