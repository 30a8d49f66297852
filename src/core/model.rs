//! Engine data model: wardrobe items, weather snapshots, occasion tags and
//! the assembled outfit.
//!
//! Everything here is plain data. The engine never mutates a `Wardrobe` or a
//! `Weather` during a computation; both are produced by collaborators (file
//! loaders, CLI flags) and handed in by reference.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wardrobe category. Also used as the key of `recent_picks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category
{
    Tops,
    Bottoms,
    Outer,
    Shoes,
    Extras,
}

impl Category
{
    /// All categories in canonical order
    pub const ALL: [Category; 5] = [
        Category::Tops,
        Category::Bottoms,
        Category::Outer,
        Category::Shoes,
        Category::Extras,
    ];

    /// Lowercase key as used in persisted wardrobes
    pub fn key(self) -> &'static str
    {
        match self
        {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Outer => "outer",
            Category::Shoes => "shoes",
            Category::Extras => "extras",
        }
    }

    /// Categories whose items are ranked by warmth closeness
    pub fn uses_warmth(self) -> bool
    {
        matches!(self, Category::Tops | Category::Bottoms | Category::Outer)
    }

    /// Categories whose items can be penalized in the rain
    pub fn rain_sensitive(self) -> bool
    {
        matches!(self, Category::Outer | Category::Shoes)
    }
}

impl fmt::Display for Category
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(self.key())
    }
}

/// A single garment in the wardrobe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem
{
    /// Display name; also the identity used by bans and recent picks
    pub name: String,

    /// Free-form labels such as `casual`, `formal`, `black`
    #[serde(default)]
    pub tags: Vec<String>,

    /// Insulation score 0-7 (tops, bottoms, outer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmth: Option<f64>,

    /// Whether the item tolerates rain (outer, shoes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain_ok: Option<bool>,

    /// Opaque image reference, never inspected by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl WardrobeItem
{
    pub fn new(
        name: impl Into<String>,
        tags: &[&str],
    ) -> Self
    {
        Self {
            name: name.into(),
            tags: tags
                .iter()
                .map(|t| t.to_string())
                .collect(),
            warmth: None,
            rain_ok: None,
            image: None,
        }
    }

    pub fn with_warmth(
        mut self,
        warmth: f64,
    ) -> Self
    {
        self.warmth = Some(warmth);
        self
    }

    pub fn with_rain_ok(
        mut self,
        rain_ok: bool,
    ) -> Self
    {
        self.rain_ok = Some(rain_ok);
        self
    }

    /// Warmth with the missing value treated as zero
    pub fn warmth(&self) -> f64
    {
        self.warmth
            .unwrap_or(0.0)
    }

    /// Rain tolerance with the missing value treated as false
    pub fn rain_ok(&self) -> bool
    {
        self.rain_ok
            .unwrap_or(false)
    }

    /// Exact tag membership
    pub fn has_tag(
        &self,
        tag: &str,
    ) -> bool
    {
        self.tags
            .iter()
            .any(|t| t == tag)
    }
}

/// Five-category wardrobe. All categories are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wardrobe
{
    #[serde(default)]
    pub tops: Vec<WardrobeItem>,
    #[serde(default)]
    pub bottoms: Vec<WardrobeItem>,
    #[serde(default)]
    pub outer: Vec<WardrobeItem>,
    #[serde(default)]
    pub shoes: Vec<WardrobeItem>,
    #[serde(default)]
    pub extras: Vec<WardrobeItem>,
}

impl Wardrobe
{
    pub fn items(
        &self,
        category: Category,
    ) -> &[WardrobeItem]
    {
        match category
        {
            Category::Tops => &self.tops,
            Category::Bottoms => &self.bottoms,
            Category::Outer => &self.outer,
            Category::Shoes => &self.shoes,
            Category::Extras => &self.extras,
        }
    }

    pub fn items_mut(
        &mut self,
        category: Category,
    ) -> &mut Vec<WardrobeItem>
    {
        match category
        {
            Category::Tops => &mut self.tops,
            Category::Bottoms => &mut self.bottoms,
            Category::Outer => &mut self.outer,
            Category::Shoes => &mut self.shoes,
            Category::Extras => &mut self.extras,
        }
    }

    /// True when any item name in `category` contains one of `keywords`
    /// (case-insensitive)
    pub fn has_item_like(
        &self,
        category: Category,
        keywords: &[&str],
    ) -> bool
    {
        self.items(category)
            .iter()
            .any(|it| {
                let name = it
                    .name
                    .to_lowercase();
                keywords
                    .iter()
                    .any(|k| name.contains(&k.to_lowercase()))
            })
    }

    /// Total number of items across categories
    pub fn len(&self) -> usize
    {
        Category::ALL
            .iter()
            .map(|c| {
                self.items(*c)
                    .len()
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }
}

/// Weather snapshot for one recommendation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather
{
    pub city: String,
    pub temp_c: f64,
    /// Feels-like temperature; the value used for every warmth decision
    pub feels_c: f64,
    pub humidity: u8,
    pub wind_ms: f64,
    pub rain: bool,
    pub desc: String,
}

/// Reasons a weather snapshot is unusable
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError
{
    #[error("{field} must be a finite number")]
    NotFinite
    {
        field: &'static str
    },

    #[error("{field} = {value} is outside the plausible range {min}..={max}")]
    OutOfRange
    {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("humidity {0}% exceeds 100%")]
    Humidity(u8),
}

impl Weather
{
    /// Check the caller-side preconditions. The engine itself never calls
    /// this; a malformed snapshot is the collaborator's responsibility.
    pub fn validate(&self) -> Result<(), WeatherError>
    {
        for (field, value, min, max) in [
            ("temp_c", self.temp_c, -60.0, 60.0),
            ("feels_c", self.feels_c, -70.0, 70.0),
            ("wind_ms", self.wind_ms, 0.0, 120.0),
        ]
        {
            if !value.is_finite()
            {
                return Err(WeatherError::NotFinite { field });
            }
            if value < min || value > max
            {
                return Err(WeatherError::OutOfRange { field, value, min, max });
            }
        }

        if self.humidity > 100
        {
            return Err(WeatherError::Humidity(self.humidity));
        }

        Ok(())
    }
}

/// Ordered, duplicate-free occasion labels (never empty)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TpoTags(Vec<String>);

impl TpoTags
{
    /// Label used when no occasion signal is available
    pub const DEFAULT: &'static str = "casual";

    /// Lowercase, trim and de-duplicate; falls back to `casual` when nothing
    /// usable remains
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: IndexSet<String> = tags
            .into_iter()
            .map(|t| {
                t.as_ref()
                    .trim()
                    .to_lowercase()
            })
            .filter(|t| !t.is_empty())
            .collect();

        if set.is_empty()
        {
            return Self::default();
        }

        Self(
            set.into_iter()
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String]
    {
        &self.0
    }

    pub fn contains(
        &self,
        tag: &str,
    ) -> bool
    {
        self.0
            .iter()
            .any(|t| t == tag)
    }

    /// True when any of `tags` is present
    pub fn any_of(
        &self,
        tags: &[&str],
    ) -> bool
    {
        tags.iter()
            .any(|t| self.contains(t))
    }
}

impl Default for TpoTags
{
    fn default() -> Self
    {
        Self(vec![Self::DEFAULT.to_string()])
    }
}

impl fmt::Display for TpoTags
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(
            &self
                .0
                .join(", "),
        )
    }
}

/// Scored clothing slot of an outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot
{
    Top,
    Bottom,
    Outer,
    Shoes,
}

impl Slot
{
    pub const ALL: [Slot; 4] = [Slot::Top, Slot::Bottom, Slot::Outer, Slot::Shoes];

    /// Wardrobe category the slot draws from
    pub fn category(self) -> Category
    {
        match self
        {
            Slot::Top => Category::Tops,
            Slot::Bottom => Category::Bottoms,
            Slot::Outer => Category::Outer,
            Slot::Shoes => Category::Shoes,
        }
    }

    pub fn label(self) -> &'static str
    {
        match self
        {
            Slot::Top => "top",
            Slot::Bottom => "bottom",
            Slot::Outer => "outer",
            Slot::Shoes => "shoes",
        }
    }
}

/// One recommended outfit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outfit
{
    pub top: Option<WardrobeItem>,
    pub bottom: Option<WardrobeItem>,
    pub outer: Option<WardrobeItem>,
    pub shoes: Option<WardrobeItem>,
    /// Weather-driven accessories (umbrella, scarf); not scored
    pub extras: Vec<String>,
}

impl Outfit
{
    pub fn get(
        &self,
        slot: Slot,
    ) -> Option<&WardrobeItem>
    {
        match slot
        {
            Slot::Top => self
                .top
                .as_ref(),
            Slot::Bottom => self
                .bottom
                .as_ref(),
            Slot::Outer => self
                .outer
                .as_ref(),
            Slot::Shoes => self
                .shoes
                .as_ref(),
        }
    }

    pub fn set(
        &mut self,
        slot: Slot,
        item: Option<WardrobeItem>,
    )
    {
        match slot
        {
            Slot::Top => self.top = item,
            Slot::Bottom => self.bottom = item,
            Slot::Outer => self.outer = item,
            Slot::Shoes => self.shoes = item,
        }
    }

    /// Names of the four scored slots (None for empty slots)
    pub fn slot_names(&self) -> OutfitNames
    {
        let name = |slot| {
            self.get(slot)
                .map(|it| {
                    it.name
                        .clone()
                })
        };
        OutfitNames {
            top: name(Slot::Top),
            bottom: name(Slot::Bottom),
            outer: name(Slot::Outer),
            shoes: name(Slot::Shoes),
        }
    }

    /// One-line summary: `top: X / bottom: Y / outer: Z / shoes: W`
    pub fn summary(&self) -> String
    {
        let n = |slot: Slot, missing: &'static str| {
            self.get(slot)
                .map(|it| {
                    it.name
                        .as_str()
                })
                .unwrap_or(missing)
        };
        format!(
            "top: {} / bottom: {} / outer: {} / shoes: {}",
            n(Slot::Top, "-"),
            n(Slot::Bottom, "-"),
            n(Slot::Outer, "none"),
            n(Slot::Shoes, "-"),
        )
    }
}

/// Slot item names of a shown outfit, kept for reroll bans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitNames
{
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub outer: Option<String>,
    pub shoes: Option<String>,
}

impl OutfitNames
{
    /// Present names in slot order
    pub fn iter(&self) -> impl Iterator<Item = &str>
    {
        [&self.top, &self.bottom, &self.outer, &self.shoes]
            .into_iter()
            .filter_map(|n| n.as_deref())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn weather() -> Weather
    {
        Weather {
            city: "Seoul,KR".into(),
            temp_c: 12.0,
            feels_c: 10.0,
            humidity: 55,
            wind_ms: 2.0,
            rain: false,
            desc: "clear".into(),
        }
    }

    #[test]
    fn tpo_tags_dedup_and_default()
    {
        let tags = TpoTags::new(["Formal", "smart", "formal", " "]);
        assert_eq!(tags.as_slice(), &["formal".to_string(), "smart".to_string()]);

        let empty = TpoTags::new(Vec::<String>::new());
        assert_eq!(empty.as_slice(), &["casual".to_string()]);
    }

    #[test]
    fn missing_optional_fields_default()
    {
        let item: WardrobeItem = serde_json::from_str(r#"{"name":"loafers"}"#).unwrap();
        assert_eq!(item.warmth(), 0.0);
        assert!(!item.rain_ok());
        assert!(
            item.tags
                .is_empty()
        );
    }

    #[test]
    fn weather_validation_flags_bad_values()
    {
        assert!(
            weather()
                .validate()
                .is_ok()
        );

        let mut w = weather();
        w.humidity = 140;
        assert_eq!(w.validate(), Err(WeatherError::Humidity(140)));

        let mut w = weather();
        w.feels_c = f64::NAN;
        assert!(matches!(w.validate(), Err(WeatherError::NotFinite { field: "feels_c" })));

        let mut w = weather();
        w.wind_ms = -1.0;
        assert!(matches!(w.validate(), Err(WeatherError::OutOfRange { field: "wind_ms", .. })));
    }

    #[test]
    fn summary_marks_missing_slots()
    {
        let outfit = Outfit {
            top: Some(WardrobeItem::new("white shirt", &["formal"])),
            ..Default::default()
        };
        assert_eq!(outfit.summary(), "top: white shirt / bottom: - / outer: none / shoes: -");
    }
}
