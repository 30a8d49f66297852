//! Saved outfits, grouped by the day they were recommended for.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::model::{Outfit, TpoTags, Weather};
use crate::core::outfit::Recommendation;
use crate::core::palette::ColorPlan;

/// Everything needed to show a past recommendation again
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedOutfit
{
    /// Day the outfit was recommended for
    pub date: NaiveDate,
    pub saved_at: DateTime<Local>,
    pub tpo_tags: TpoTags,
    pub weather: Weather,
    pub color_plan: ColorPlan,
    pub reasons: Vec<String>,
    pub outfit: Outfit,
}

impl SavedOutfit
{
    /// Snapshot of `rec` as shown for `weather` and `tags` on `date`
    pub fn snapshot(
        date: NaiveDate,
        weather: &Weather,
        tags: &TpoTags,
        rec: &Recommendation,
    ) -> Self
    {
        Self {
            date,
            saved_at: Local::now(),
            tpo_tags: tags.clone(),
            weather: weather.clone(),
            color_plan: rec.color_plan,
            reasons: rec
                .reasons
                .clone(),
            outfit: rec
                .outfit
                .clone(),
        }
    }
}

/// Saved outfits by date; newest save first within a day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedOutfits(BTreeMap<NaiveDate, Vec<SavedOutfit>>);

impl SavedOutfits
{
    /// File `entry` under its date, ahead of earlier saves
    pub fn save(
        &mut self,
        mut entry: SavedOutfit,
    )
    {
        entry.saved_at = Local::now();
        self.0
            .entry(entry.date)
            .or_default()
            .insert(0, entry);
    }

    /// Dates with at least one save, newest first
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_
    {
        self.0
            .keys()
            .rev()
            .copied()
    }

    pub fn on(
        &self,
        date: NaiveDate,
    ) -> &[SavedOutfit]
    {
        self.0
            .get(&date)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Remove entry `index` of `date`; a day left empty disappears
    pub fn remove(
        &mut self,
        date: NaiveDate,
        index: usize,
    ) -> Option<SavedOutfit>
    {
        let list = self
            .0
            .get_mut(&date)?;
        if index >= list.len()
        {
            return None;
        }
        let removed = list.remove(index);
        if list.is_empty()
        {
            self.0
                .remove(&date);
        }
        Some(removed)
    }

    pub fn len(&self) -> usize
    {
        self.0
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool
    {
        self.0
            .is_empty()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::model::WardrobeItem;
    use crate::core::vocab::ColorKey;

    fn entry(
        date: &str,
        top: &str,
    ) -> SavedOutfit
    {
        SavedOutfit {
            date: date
                .parse()
                .unwrap(),
            saved_at: Local::now(),
            tpo_tags: TpoTags::default(),
            weather: Weather {
                city: "Seoul,KR".into(),
                temp_c: 10.0,
                feels_c: 9.0,
                humidity: 40,
                wind_ms: 2.0,
                rain: false,
                desc: "clear".into(),
            },
            color_plan: ColorPlan {
                base: ColorKey::Gray,
                accent: ColorKey::Navy,
                bottom_hint: ColorKey::Gray,
                shoe_hint: ColorKey::Black,
            },
            reasons: vec!["because".into()],
            outfit: Outfit { top: Some(WardrobeItem::new(top, &["casual"])), ..Outfit::default() },
        }
    }

    #[test]
    fn saves_group_by_date_newest_first()
    {
        let mut saved = SavedOutfits::default();
        saved.save(entry("2026-03-01", "tee"));
        saved.save(entry("2026-03-05", "knit"));
        saved.save(entry("2026-03-01", "shirt"));

        let dates: Vec<String> = saved
            .dates()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(dates, vec!["2026-03-05", "2026-03-01"]);

        let day = saved.on("2026-03-01".parse().unwrap());
        assert_eq!(day[0].outfit.summary(), "top: shirt / bottom: - / outer: none / shoes: -");
        assert_eq!(saved.len(), 3);
    }

    #[test]
    fn removing_the_last_entry_drops_the_day()
    {
        let mut saved = SavedOutfits::default();
        let day: NaiveDate = "2026-03-01".parse().unwrap();
        saved.save(entry("2026-03-01", "tee"));

        assert!(saved.remove(day, 1).is_none());
        assert!(saved.remove(day, 0).is_some());
        assert!(saved.is_empty());
        assert_eq!(saved.dates().count(), 0);
    }

    #[test]
    fn json_keys_are_iso_dates()
    {
        let mut saved = SavedOutfits::default();
        saved.save(entry("2026-03-01", "tee"));

        let json = serde_json::to_value(&saved).unwrap();
        assert!(json["2026-03-01"][0]["outfit"]["top"].is_object());

        let back: SavedOutfits = serde_json::from_value(json).unwrap();
        assert_eq!(back, saved);
    }
}
