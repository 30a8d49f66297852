//! Built-in wardrobe, repair of persisted wardrobes and new-item defaults.

use serde_json::Value;
use tracing::warn;

use crate::core::model::{Category, Wardrobe, WardrobeItem};

/// Starter wardrobe used on first run and to repair broken categories
pub fn default_wardrobe() -> Wardrobe
{
    Wardrobe {
        tops: vec![
            WardrobeItem::new("white shirt", &["formal", "smart", "neutral", "clean"]).with_warmth(2.0),
            WardrobeItem::new("sweatshirt", &["casual", "cozy"]).with_warmth(3.0),
            WardrobeItem::new("black knit", &["smart", "casual", "black", "minimal"]).with_warmth(4.0),
        ],
        bottoms: vec![
            WardrobeItem::new("jeans", &["casual"]).with_warmth(2.0),
            WardrobeItem::new("slacks", &["formal", "smart", "clean"]).with_warmth(2.0),
            WardrobeItem::new("joggers", &["sport", "casual", "cozy"]).with_warmth(2.0),
        ],
        outer: vec![
            WardrobeItem::new("blazer", &["formal", "smart", "clean"])
                .with_warmth(3.0)
                .with_rain_ok(false),
            WardrobeItem::new("windbreaker", &["outdoor", "sport", "casual"])
                .with_warmth(2.0)
                .with_rain_ok(true),
            WardrobeItem::new("padded jacket", &["casual", "cozy"])
                .with_warmth(6.0)
                .with_rain_ok(true),
        ],
        shoes: vec![
            WardrobeItem::new("sneakers", &["casual", "street", "sport"]).with_rain_ok(true),
            WardrobeItem::new("loafers", &["formal", "smart", "clean"]).with_rain_ok(false),
        ],
        extras: vec![
            WardrobeItem::new("umbrella", &["rain"]),
            WardrobeItem::new("scarf", &["cold", "cozy"]),
        ],
    }
}

/// Rebuild a wardrobe from untyped JSON.
///
/// A non-object value yields the full default. A category that is missing
/// or not a list gets its default items; valid categories are kept as they
/// are. Entries without a non-empty `name` are dropped with a warning.
pub fn repair_wardrobe(value: &Value) -> Wardrobe
{
    let defaults = default_wardrobe();
    let Some(obj) = value.as_object()
    else
    {
        warn!("wardrobe is not an object, using defaults");
        return defaults;
    };

    let mut out = Wardrobe::default();
    for cat in Category::ALL
    {
        let items = match obj
            .get(cat.key())
            .and_then(Value::as_array)
        {
            Some(list) => list
                .iter()
                .enumerate()
                .filter_map(|(i, v)| parse_item(cat, i, v))
                .collect(),
            None =>
            {
                warn!(category = %cat, "category missing or not a list, using defaults");
                defaults
                    .items(cat)
                    .to_vec()
            }
        };
        *out.items_mut(cat) = items;
    }
    out
}

fn parse_item(
    cat: Category,
    index: usize,
    v: &Value,
) -> Option<WardrobeItem>
{
    match serde_json::from_value::<WardrobeItem>(v.clone())
    {
        Ok(item)
            if !item
                .name
                .trim()
                .is_empty() =>
        {
            Some(item)
        }
        Ok(_) =>
        {
            warn!(category = %cat, index, "skipping item without a name");
            None
        }
        Err(e) =>
        {
            warn!(category = %cat, index, error = %e, "skipping malformed item");
            None
        }
    }
}

/// Blank item with the defaults a category expects
pub fn item_template(
    category: Category,
    name: impl Into<String>,
) -> WardrobeItem
{
    let mut item = WardrobeItem::new(name, &[]);
    if category.uses_warmth()
    {
        item.warmth = Some(3.0);
    }
    if category.rain_sensitive()
    {
        item.rain_ok = Some(false);
    }
    item
}
