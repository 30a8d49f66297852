//! Per-user session context and the reroll guarantee.
//!
//! A `Session` owns every piece of state that survives between requests:
//! text sources for the profile, manual bans, the last shown outfit, saved
//! outfits and the recent-pick history inside `prefs`. Callers pass it by `&mut`; there is no
//! global state.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::core::model::{OutfitNames, Slot, TpoTags, Wardrobe, Weather};
use crate::core::outfit::{EngineSettings, Recommendation, build_outfit};
use crate::core::profile::{ChatTurn, MoodRecord, Preferences, rebuild_profile};
use crate::core::saved::{SavedOutfit, SavedOutfits};
use crate::core::vocab::is_redo_request;
use crate::infra::utils::ListUtils;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session
{
    #[serde(default)]
    pub prefs: Preferences,

    #[serde(default)]
    pub mood_records: Vec<MoodRecord>,

    #[serde(default)]
    pub messages: Vec<ChatTurn>,

    #[serde(default)]
    pub banned_manual: Vec<String>,

    /// The most recently shown recommendation
    #[serde(default)]
    pub last_shown: Option<SavedOutfit>,

    #[serde(default)]
    pub saved: SavedOutfits,

    /// Names excluded for the current pass only
    #[serde(skip)]
    transient_bans: HashSet<String>,
}

impl Session
{
    /// Fresh session whose profile starts from `prefs`
    pub fn with_prefs(prefs: Preferences) -> Self
    {
        Self { prefs, ..Self::default() }
    }

    pub fn transient_bans(&self) -> &HashSet<String>
    {
        &self.transient_bans
    }

    /// Slot names of the most recently shown outfit
    pub fn last_outfit(&self) -> Option<OutfitNames>
    {
        self.last_shown
            .as_ref()
            .map(|s| {
                s.outfit
                    .slot_names()
            })
    }

    /// Save the last shown outfit, filed under `date` or the day it was
    /// shown. Returns the stored entry, or `None` when nothing was shown.
    pub fn save_shown(
        &mut self,
        date: Option<NaiveDate>,
    ) -> Option<&SavedOutfit>
    {
        let mut entry = self
            .last_shown
            .clone()?;
        if let Some(d) = date
        {
            entry.date = d;
        }
        let day = entry.date;
        self.saved
            .save(entry);
        self.saved
            .on(day)
            .first()
    }

    /// Rebuild the profile from the stored sources without recommending
    pub fn refresh_profile(
        &mut self,
        settings: &EngineSettings,
    )
    {
        self.prefs = rebuild_profile(
            &self.prefs,
            &self.mood_records,
            &self.messages,
            &self.banned_manual,
            settings.style_dna_chars,
        );
    }

    /// Run one recommendation pass.
    ///
    /// Non-empty `user_text` is stored as a chat turn with a short reply
    /// from the assistant side. If it asks for a
    /// different outfit, the previously shown slot items are excluded for
    /// this pass. The chosen items are then recorded as recent picks and
    /// remembered as the shown outfit; the exclusions are always cleared
    /// before returning.
    #[instrument(skip_all, fields(rerolling = tracing::field::Empty))]
    pub fn recommend(
        &mut self,
        wardrobe: &Wardrobe,
        weather: &Weather,
        tags: &TpoTags,
        user_text: Option<&str>,
        settings: &EngineSettings,
    ) -> Recommendation
    {
        // 1) Chat turn and reroll detection
        if let Some(text) = user_text
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            self.messages
                .push(ChatTurn::user(text));

            let redo = is_redo_request(text);
            if redo
            {
                if let Some(last) = self.last_outfit()
                {
                    self.transient_bans
                        .extend(
                            last.iter()
                                .map(str::to_string),
                        );
                }
            }
            self.messages
                .push(ChatTurn::assistant(if redo
                {
                    "Swapping in a different outfit."
                }
                else
                {
                    "Noted, recomputing the outfit."
                }));
        }
        tracing::Span::current().record("rerolling", !self.transient_bans.is_empty());

        // 2) Profile, 3) outfit
        self.refresh_profile(settings);
        let rec = build_outfit(wardrobe, weather, tags, &self.prefs, &self.transient_bans, settings);

        // 4) History, 5) shown outfit
        for slot in Slot::ALL
        {
            if let Some(item) = rec
                .outfit
                .get(slot)
            {
                self.prefs
                    .recent_picks
                    .record(slot.category(), &item.name, settings.history_cap);
            }
        }
        self.last_shown = Some(SavedOutfit::snapshot(
            Local::now().date_naive(),
            weather,
            tags,
            &rec,
        ));

        // 6) Bans never outlive the pass
        self.transient_bans
            .clear();

        info!(outfit = %rec.outfit.summary(), rerolled = rec.rerolled, "recommendation ready");
        rec
    }

    pub fn add_mood(
        &mut self,
        text: &str,
    ) -> bool
    {
        let text = text.trim();
        if text.is_empty()
        {
            return false;
        }
        self.mood_records
            .push(MoodRecord::now(text));
        true
    }

    /// Remove the mood record at `index`, returning it
    pub fn remove_mood(
        &mut self,
        index: usize,
    ) -> Option<MoodRecord>
    {
        if index < self
            .mood_records
            .len()
        {
            Some(
                self.mood_records
                    .remove(index),
            )
        }
        else
        {
            None
        }
    }

    /// Replace the manual ban list with trimmed, non-empty, unique entries
    pub fn set_manual_bans<I, S>(
        &mut self,
        bans: I,
    ) where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.banned_manual = ListUtils::dedup_ordered(
            bans.into_iter()
                .map(|b| {
                    b.as_ref()
                        .trim()
                        .to_string()
                })
                .filter(|b| !b.is_empty()),
        );
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::model::{Category, WardrobeItem};
    use crate::core::profile::Role;

    fn wardrobe() -> Wardrobe
    {
        let mut w = Wardrobe::default();
        w.tops = vec![
            WardrobeItem::new("white shirt", &["casual"]).with_warmth(2.5),
            WardrobeItem::new("grey tee", &["casual"]).with_warmth(2.5),
        ];
        w.bottoms = vec![
            WardrobeItem::new("jeans", &["casual"]).with_warmth(2.5),
            WardrobeItem::new("chinos", &["casual"]).with_warmth(2.5),
        ];
        w.shoes = vec![
            WardrobeItem::new("sneakers", &["casual"]),
            WardrobeItem::new("boots", &["casual"]),
        ];
        w
    }

    fn weather() -> Weather
    {
        Weather {
            city: "Seoul,KR".into(),
            temp_c: 20.0,
            feels_c: 20.0,
            humidity: 40,
            wind_ms: 1.0,
            rain: false,
            desc: "clear".into(),
        }
    }

    #[test]
    fn reroll_swaps_every_slot_and_clears_bans()
    {
        let mut s = Session::default();
        let settings = EngineSettings::default();
        let tags = TpoTags::default();

        let first = s.recommend(&wardrobe(), &weather(), &tags, None, &settings);
        let second = s.recommend(&wardrobe(), &weather(), &tags, Some("다른 거 추천해줘"), &settings);

        assert!(second.rerolled);
        for slot in [Slot::Top, Slot::Bottom, Slot::Shoes]
        {
            assert_ne!(
                first
                    .outfit
                    .get(slot)
                    .map(|i| &i.name),
                second
                    .outfit
                    .get(slot)
                    .map(|i| &i.name)
            );
        }
        assert!(
            s.transient_bans()
                .is_empty()
        );
        assert_eq!(
            s.messages
                .iter()
                .map(|m| m.role)
                .collect::<Vec<_>>(),
            vec![Role::User, Role::Assistant]
        );
    }

    #[test]
    fn recommend_records_recent_picks_and_last_outfit()
    {
        let mut s = Session::default();
        let rec = s.recommend(&wardrobe(), &weather(), &TpoTags::default(), Some("  "), &EngineSettings::default());

        let top = rec
            .outfit
            .top
            .as_ref()
            .map(|i| i.name.clone());
        assert_eq!(
            s.prefs
                .recent_picks
                .history(Category::Tops)
                .first(),
            top.as_ref()
        );
        assert_eq!(
            s.last_outfit()
                .and_then(|l| l.top),
            top
        );
        assert!(
            s.messages
                .is_empty()
        );
    }

    #[test]
    fn transient_bans_are_not_serialized()
    {
        let mut s = Session::default();
        s.transient_bans
            .insert("white shirt".into());
        s.add_mood("모노톤 시크");
        s.set_manual_bans([" logo ", "", "logo", "fur"]);

        let json = serde_json::to_string(&s).unwrap();
        assert!(!json.contains("transient"));

        let back: Session = serde_json::from_str(&json).unwrap();
        assert!(
            back.transient_bans()
                .is_empty()
        );
        assert_eq!(back.banned_manual, vec!["logo".to_string(), "fur".to_string()]);
        assert_eq!(back.mood_records, s.mood_records);
    }

    #[test]
    fn remove_mood_checks_bounds()
    {
        let mut s = Session::default();
        assert!(s.add_mood("cozy"));
        assert!(!s.add_mood("   "));
        assert!(s.remove_mood(3).is_none());
        assert_eq!(
            s.remove_mood(0)
                .map(|m| m.text),
            Some("cozy".to_string())
        );
    }

    #[test]
    fn save_shown_files_the_last_recommendation()
    {
        let mut s = Session::default();
        assert!(s.save_shown(None).is_none());

        let rec = s.recommend(&wardrobe(), &weather(), &TpoTags::new(["date"]), None, &EngineSettings::default());
        let day: NaiveDate = "2026-05-02".parse().unwrap();
        let saved = s
            .save_shown(Some(day))
            .cloned()
            .unwrap();

        assert_eq!(saved.outfit, rec.outfit);
        assert_eq!(saved.reasons, rec.reasons);
        assert_eq!(saved.tpo_tags, TpoTags::new(["date"]));
        assert_eq!(s.saved.on(day).len(), 1);
    }
}
