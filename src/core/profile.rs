//! Preference profile and its builder.
//!
//! `Preferences` is never edited directly by callers: the text-derived parts
//! (`style_dna`, `signals`, `banned_keywords`) are recomputed from the stored
//! mood records, user chat turns and the manual ban list before every
//! recommendation, so the profile is always reproducible from its sources.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::diversity::RecentPicks;
use crate::core::signals::{Signals, extract_signals};
use crate::infra::utils::{ListUtils, TextUtils};

/// Default bound on the accumulated style text, in characters
pub const STYLE_DNA_MAX_CHARS: usize = 2500;

/// Default diversity strength applied to recent picks
pub const DEFAULT_DIVERSITY_STRENGTH: f64 = 1.0;

/// User preference profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences
{
    /// Rolling concatenation of mood notes and user chat
    #[serde(default)]
    pub style_dna: String,

    /// Signals derived from `style_dna`
    #[serde(default)]
    pub signals: Signals,

    /// Literal substrings that push an item far down the ranking
    #[serde(default)]
    pub banned_keywords: Vec<String>,

    /// Offset added to the ideal warmth (positive = dress warmer)
    #[serde(default)]
    pub warmth_bias: f64,

    /// Weight of the recency penalty; 0 disables diversity
    #[serde(default = "default_diversity_strength")]
    pub diversity_strength: f64,

    /// Most-recent-first names per category
    #[serde(default)]
    pub recent_picks: RecentPicks,
}

fn default_diversity_strength() -> f64
{
    DEFAULT_DIVERSITY_STRENGTH
}

impl Default for Preferences
{
    fn default() -> Self
    {
        Self {
            style_dna: String::new(),
            signals: Signals::default(),
            banned_keywords: Vec::new(),
            warmth_bias: 0.0,
            diversity_strength: DEFAULT_DIVERSITY_STRENGTH,
            recent_picks: RecentPicks::default(),
        }
    }
}

/// A saved one-line mood note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord
{
    pub text: String,
    pub ts: DateTime<Local>,
}

impl MoodRecord
{
    pub fn now(text: impl Into<String>) -> Self
    {
        Self { text: text.into(), ts: Local::now() }
    }
}

/// Author of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{
    User,
    Assistant,
}

/// One chat message; only user turns feed the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn
{
    pub role: Role,
    pub content: String,
}

impl ChatTurn
{
    pub fn user(content: impl Into<String>) -> Self
    {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self
    {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Recompute the text-derived parts of `prefs`.
///
/// `warmth_bias`, `diversity_strength` and `recent_picks` are carried over
/// untouched. Identical inputs always give identical output.
#[instrument(skip_all, fields(moods = moods.len(), turns = chat.len()))]
pub fn rebuild_profile(
    prefs: &Preferences,
    moods: &[MoodRecord],
    chat: &[ChatTurn],
    banned_manual: &[String],
    max_chars: usize,
) -> Preferences
{
    // Mood notes first, then user chat, in chronological order
    let mood_texts = moods
        .iter()
        .map(|r| {
            r.text
                .trim()
        })
        .filter(|t| !t.is_empty());
    let chat_texts = chat
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| {
            m.content
                .trim()
        })
        .filter(|t| !t.is_empty());

    let joined = mood_texts
        .chain(chat_texts)
        .collect::<Vec<_>>()
        .join("\n");
    let style_dna = TextUtils::tail_chars(joined.trim(), max_chars).to_string();

    let extracted = extract_signals(&style_dna);

    // Manual bans win the ordering; text bans follow
    let banned_keywords = ListUtils::dedup_ordered(
        banned_manual
            .iter()
            .map(|b| {
                b.trim()
                    .to_string()
            })
            .filter(|b| !b.is_empty())
            .chain(extracted.banned_from_text),
    );

    debug!(
        dna_chars = style_dna
            .chars()
            .count(),
        bans = banned_keywords.len(),
        "profile rebuilt"
    );

    Preferences {
        style_dna,
        signals: extracted.signals,
        banned_keywords,
        warmth_bias: prefs.warmth_bias,
        diversity_strength: prefs.diversity_strength,
        recent_picks: prefs
            .recent_picks
            .clone(),
    }
}
