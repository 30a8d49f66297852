//! Handlers for `wardrobe list | add | edit | rm | reset`.

use anyhow::{Result, bail};
use itertools::Itertools;
use tabled::{Table, Tabled};
use tracing::{info, instrument};

use crate::cli::{AppContext, WardrobeAddArgs, WardrobeArgs, WardrobeCommand, WardrobeEditArgs};
use crate::cli_ext::shared::{Paint, save_wardrobe};
use crate::core::model::{Category, Wardrobe, WardrobeItem};
use crate::core::wardrobe::{default_wardrobe, item_template};
use crate::infra::config::Config;
use crate::infra::store;

/// Accepted warmth range
const WARMTH_RANGE: std::ops::RangeInclusive<f64> = 0.0..=7.0;

#[derive(Tabled)]
struct ItemRow
{
    category: String,
    name: String,
    tags: String,
    warmth: String,
    rain_ok: String,
}

impl ItemRow
{
    fn new(
        category: Category,
        item: &WardrobeItem,
    ) -> Self
    {
        Self {
            category: category.to_string(),
            name: item
                .name
                .clone(),
            tags: item
                .tags
                .iter()
                .join(", "),
            warmth: item
                .warmth
                .map(|w| format!("{w:.1}"))
                .unwrap_or_else(|| "-".into()),
            rain_ok: item
                .rain_ok
                .map(|r| if r { "yes" } else { "no" })
                .unwrap_or("-")
                .into(),
        }
    }
}

#[instrument(skip_all)]
pub fn run(
    args: WardrobeArgs,
    cfg: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let path = cfg.wardrobe_path();
    let paint = Paint::new(ctx);

    match args.command
    {
        WardrobeCommand::List { category, json } =>
        {
            let wardrobe = store::load_wardrobe(&path)?;
            let cats: Vec<Category> = match category
            {
                Some(c) => vec![c.into()],
                None => Category::ALL.to_vec(),
            };

            if json
            {
                println!("{}", serde_json::to_string_pretty(&wardrobe)?);
                return Ok(());
            }

            let rows: Vec<ItemRow> = cats
                .into_iter()
                .flat_map(|c| {
                    wardrobe
                        .items(c)
                        .iter()
                        .map(move |it| ItemRow::new(c, it))
                })
                .collect();
            if rows.is_empty()
            {
                println!("{}", paint.dim("(no items)"));
            }
            else
            {
                println!("{}", Table::new(rows));
            }
        }

        WardrobeCommand::Add(add) =>
        {
            let mut wardrobe = store::load_wardrobe(&path)?;
            let category: Category = add
                .category
                .into();
            let item = build_item(category, add)?;

            if wardrobe
                .items(category)
                .iter()
                .any(|it| it.name == item.name)
            {
                bail!("{category} already has an item named \"{}\"", item.name);
            }

            info!(%category, name = %item.name, "adding item");
            let name = item
                .name
                .clone();
            wardrobe
                .items_mut(category)
                .push(item);
            save_wardrobe(cfg, &wardrobe, ctx)?;
            if !ctx.quiet
            {
                println!("{} {name} to {category}", paint.good("Added"));
            }
        }

        WardrobeCommand::Edit(edit) =>
        {
            let mut wardrobe = store::load_wardrobe(&path)?;
            let category: Category = edit
                .category
                .into();
            let name = edit
                .name
                .clone();
            let items = wardrobe.items_mut(category);
            let Some(pos) = items
                .iter()
                .position(|it| it.name == name)
            else
            {
                bail!("No item named \"{name}\" in {category}");
            };

            let mut item = items[pos].clone();
            apply_edit(&mut item, edit)?;
            if item.name != name
                && items
                    .iter()
                    .any(|it| it.name == item.name)
            {
                bail!("{category} already has an item named \"{}\"", item.name);
            }

            info!(%category, from = %name, to = %item.name, "editing item");
            let shown = item
                .name
                .clone();
            items[pos] = item;
            save_wardrobe(cfg, &wardrobe, ctx)?;
            if !ctx.quiet
            {
                println!("{} {shown} in {category}", paint.good("Updated"));
            }
        }

        WardrobeCommand::Rm { category, name } =>
        {
            let mut wardrobe = store::load_wardrobe(&path)?;
            let category: Category = category.into();
            let before = wardrobe
                .items(category)
                .len();
            wardrobe
                .items_mut(category)
                .retain(|it| it.name != name);
            if wardrobe
                .items(category)
                .len()
                == before
            {
                bail!("No item named \"{name}\" in {category}");
            }
            save_wardrobe(cfg, &wardrobe, ctx)?;
            if !ctx.quiet
            {
                println!("{} {name} from {category}", paint.warn("Removed"));
            }
        }

        WardrobeCommand::Reset { force } =>
        {
            if path.exists() && !force
            {
                bail!(
                    "Wardrobe file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            let wardrobe: Wardrobe = default_wardrobe();
            save_wardrobe(cfg, &wardrobe, ctx)?;
            if !ctx.quiet
            {
                println!("{} {} items written", paint.good("Reset:"), wardrobe.len());
            }
        }
    }

    Ok(())
}

/// Item from flags, starting from the category template
fn build_item(
    category: Category,
    add: WardrobeAddArgs,
) -> Result<WardrobeItem>
{
    let name = add
        .name
        .trim()
        .to_string();
    if name.is_empty()
    {
        bail!("Item name must not be empty");
    }

    let mut item = item_template(category, name);
    item.tags = normalize_tags(&add.tags);

    if let Some(w) = add.warmth
    {
        item.warmth = Some(checked_warmth(w)?);
    }
    if add.rain_ok
    {
        item.rain_ok = Some(true);
    }
    item.image = add.image;

    Ok(item)
}

/// Apply the flags that were given; everything else stays as it was
fn apply_edit(
    item: &mut WardrobeItem,
    edit: WardrobeEditArgs,
) -> Result<()>
{
    if let Some(name) = edit.rename
    {
        let name = name
            .trim()
            .to_string();
        if name.is_empty()
        {
            bail!("Item name must not be empty");
        }
        item.name = name;
    }
    if let Some(tags) = edit.tags
    {
        item.tags = normalize_tags(&tags);
    }
    if let Some(w) = edit.warmth
    {
        item.warmth = Some(checked_warmth(w)?);
    }
    if let Some(r) = edit.rain_ok
    {
        item.rain_ok = Some(r);
    }
    if edit
        .image
        .is_some()
    {
        item.image = edit.image;
    }
    Ok(())
}

/// Trimmed, lowercased, unique, non-empty tags in input order
fn normalize_tags(tags: &[String]) -> Vec<String>
{
    tags.iter()
        .map(|t| {
            t.trim()
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .unique()
        .collect()
}

fn checked_warmth(w: f64) -> Result<f64>
{
    if !WARMTH_RANGE.contains(&w)
    {
        bail!("Warmth must be between 0 and 7, got {w}");
    }
    Ok(w)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::cli::CategoryArg;

    fn add_args(
        name: &str,
        warmth: Option<f64>,
    ) -> WardrobeAddArgs
    {
        WardrobeAddArgs {
            category: CategoryArg::Outer,
            name: name.into(),
            tags: vec!["Formal".into(), " smart".into(), "formal".into()],
            warmth,
            rain_ok: true,
            image: None,
        }
    }

    #[test]
    fn build_item_normalizes_tags_and_keeps_template()
    {
        let item = build_item(Category::Outer, add_args(" trench coat ", None)).unwrap();
        assert_eq!(item.name, "trench coat");
        assert_eq!(item.tags, vec!["formal", "smart"]);
        assert_eq!(item.warmth, Some(3.0));
        assert_eq!(item.rain_ok, Some(true));
    }

    fn edit_args() -> WardrobeEditArgs
    {
        WardrobeEditArgs {
            category: CategoryArg::Shoes,
            name: "loafers".into(),
            rename: None,
            tags: None,
            warmth: None,
            rain_ok: None,
            image: None,
        }
    }

    #[test]
    fn edit_touches_only_given_fields()
    {
        let mut item = WardrobeItem::new("loafers", &["formal", "smart"]).with_rain_ok(false);
        apply_edit(&mut item, WardrobeEditArgs {
            rename: Some(" suede loafers ".into()),
            rain_ok: Some(true),
            ..edit_args()
        })
        .unwrap();

        assert_eq!(item.name, "suede loafers");
        assert_eq!(item.tags, vec!["formal", "smart"]);
        assert_eq!(item.rain_ok, Some(true));
        assert_eq!(item.warmth, None);

        apply_edit(&mut item, WardrobeEditArgs { tags: Some(vec!["".into()]), ..edit_args() }).unwrap();
        assert!(
            item.tags
                .is_empty()
        );
    }

    #[test]
    fn edit_rejects_bad_values()
    {
        let mut item = WardrobeItem::new("parka", &[]);
        assert!(apply_edit(&mut item, WardrobeEditArgs { warmth: Some(-1.0), ..edit_args() }).is_err());
        assert!(apply_edit(&mut item, WardrobeEditArgs { rename: Some("  ".into()), ..edit_args() }).is_err());
        assert_eq!(item.name, "parka");
    }

    #[test]
    fn build_item_rejects_bad_input()
    {
        assert!(build_item(Category::Outer, add_args("   ", None)).is_err());
        assert!(build_item(Category::Outer, add_args("parka", Some(9.0))).is_err());
    }
}
