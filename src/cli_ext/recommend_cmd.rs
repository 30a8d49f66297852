//! Handlers for `recommend`, `explain`, `shop` and `tpo`.

use std::collections::HashSet;

use anyhow::Result;
use itertools::Itertools;
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::instrument;

use crate::cli::{AppContext, ContextArgs, ExplainArgs, RecommendArgs, TpoArgs};
use crate::cli_ext::shared::{Paint, load_state, save_session, tags_from_args, weather_from_args};
use crate::core::model::{Category, Slot, TpoTags, Weather};
use crate::core::outfit::Recommendation;
use crate::core::scorer::{ScoreBreakdown, ScoreContext, TempBand, explain_item};
use crate::core::shopping::suggest_missing_items;
use crate::core::tpo::infer_tpo_tags;
use crate::infra::config::Config;

#[instrument(skip_all)]
pub fn recommend(
    args: RecommendArgs,
    cfg: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let weather = weather_from_args(&args.context.weather, cfg)?;
    let tags = tags_from_args(&args.context);
    let (wardrobe, mut session) = load_state(cfg)?;

    // Persistent knobs
    if let Some(bias) = args.warmth_bias
    {
        session.prefs.warmth_bias = bias;
    }
    if let Some(strength) = args.diversity
    {
        session.prefs.diversity_strength = strength.max(0.0);
    }

    let rec = session.recommend(&wardrobe, &weather, &tags, args.say.as_deref(), &cfg.engine);

    if args.json
    {
        let output = json!({
            "weather": &weather,
            "tpo_tags": &tags,
            "outfit": &rec.outfit,
            "summary": rec.outfit.summary(),
            "color_plan": &rec.color_plan,
            "reasons": &rec.reasons,
            "rerolled": rec.rerolled,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    else
    {
        print_recommendation(&rec, &weather, &tags, ctx);
    }

    if args.save
    {
        if let Some(entry) = session.save_shown(None)
        {
            if !args.json && !ctx.quiet
            {
                println!("{} under {}", Paint::new(ctx).good("Saved"), entry.date);
            }
        }
    }

    save_session(cfg, &session, ctx)
}

fn print_recommendation(
    rec: &Recommendation,
    weather: &Weather,
    tags: &TpoTags,
    ctx: &AppContext,
)
{
    let paint = Paint::new(ctx);

    println!(
        "{} {} · {:.1}°C (feels {:.1}°C, {}) · {}",
        paint.heading("OOTD"),
        weather.city,
        weather.temp_c,
        weather.feels_c,
        TempBand::from_feels(weather.feels_c),
        weather.desc
    );
    if !ctx.quiet
    {
        println!("{}", paint.dim(&format!("occasion: {tags}")));
    }

    for slot in Slot::ALL
    {
        let name = match rec
            .outfit
            .get(slot)
        {
            Some(item) => paint.good(&item.name),
            None if slot == Slot::Outer => paint.dim("not needed"),
            None => paint.warn("nothing in wardrobe"),
        };
        println!("  {:<7} {}", slot.label(), name);
    }
    if !rec
        .outfit
        .extras
        .is_empty()
    {
        println!(
            "  {:<7} {}",
            "extras",
            rec.outfit
                .extras
                .iter()
                .join(", ")
        );
    }

    let plan = &rec.color_plan;
    println!(
        "{} {} base + {} accent (bottoms: {}, shoes: {})",
        paint.heading("Colors"),
        plan.base
            .pretty(),
        plan.accent
            .pretty(),
        plan.bottom_hint
            .pretty(),
        plan.shoe_hint
            .pretty()
    );

    if ctx.quiet
    {
        return;
    }
    println!("{}", paint.heading("Why"));
    for r in &rec.reasons
    {
        println!("  - {r}");
    }
}

#[derive(Tabled)]
struct BreakdownRow
{
    #[tabled(rename = "#")]
    rank: usize,
    item: String,
    tags: String,
    style: String,
    avoid: String,
    rain: String,
    warmth: String,
    banned: String,
    total: String,
}

fn signed(v: f64) -> String
{
    if v == 0.0 { "·".to_string() } else { format!("{v:+.1}") }
}

#[instrument(skip_all)]
pub fn explain(
    args: ExplainArgs,
    cfg: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let weather = weather_from_args(&args.context.weather, cfg)?;
    let tags = tags_from_args(&args.context);
    let (wardrobe, mut session) = load_state(cfg)?;

    // Read-only: the profile is rebuilt in memory and never saved here
    session.refresh_profile(&cfg.engine);

    let bans: HashSet<String> = HashSet::new();
    let sctx = ScoreContext {
        wanted: tags.as_slice(),
        prefs: &session.prefs,
        weather: &weather,
        transient_bans: &bans,
    };

    let categories: Vec<Category> = match args.category
    {
        Some(c) => vec![c.into()],
        None => Category::ALL.to_vec(),
    };

    let mut json_out = serde_json::Map::new();
    let paint = Paint::new(ctx);

    for cat in categories
    {
        let mut scored: Vec<(&str, ScoreBreakdown)> = wardrobe
            .items(cat)
            .iter()
            .map(|it| (it.name.as_str(), explain_item(it, cat, &sctx)))
            .collect();
        scored.sort_by(|a, b| {
            b.1.total()
                .total_cmp(&a.1.total())
        });

        if args.json
        {
            let rows: Vec<_> = scored
                .iter()
                .map(|(name, b)| json!({ "item": name, "breakdown": b, "total": b.total() }))
                .collect();
            json_out.insert(cat.key().to_string(), json!(rows));
            continue;
        }

        println!("{}", paint.heading(cat.key()));
        if scored.is_empty()
        {
            println!("  {}", paint.dim("(empty)"));
            continue;
        }
        let rows: Vec<BreakdownRow> = scored
            .iter()
            .enumerate()
            .map(|(i, (name, b))| BreakdownRow {
                rank: i + 1,
                item: name.to_string(),
                tags: signed(b.tags),
                style: signed(b.style),
                avoid: signed(b.avoid),
                rain: signed(b.rain),
                warmth: signed(b.warmth),
                banned: signed(b.banned + b.transient),
                total: format!("{:.2}", b.total()),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if args.json
    {
        println!("{}", serde_json::to_string_pretty(&json_out)?);
    }
    Ok(())
}

#[instrument(skip_all)]
pub fn shop(
    args: ContextArgs,
    cfg: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let weather = weather_from_args(&args.weather, cfg)?;
    let tags = tags_from_args(&args);
    let (wardrobe, mut session) = load_state(cfg)?;
    session.refresh_profile(&cfg.engine);

    let paint = Paint::new(ctx);
    for s in suggest_missing_items(&wardrobe, &weather, &tags, &session.prefs.signals)
    {
        if ctx.quiet
        {
            println!("{}", s.name);
        }
        else
        {
            println!("- {} {}", paint.good(&s.name), paint.dim(&format!("({})", s.why)));
        }
    }
    Ok(())
}

pub fn tpo(args: TpoArgs) -> Result<()>
{
    let tags = infer_tpo_tags(
        &args
            .text
            .join(" "),
    );
    println!("{tags}");
    Ok(())
}
