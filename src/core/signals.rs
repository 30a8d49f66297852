//! Free-text signal extraction.
//!
//! Turns the accumulated style text into ordered, duplicate-free signal
//! lists. Pure function of its input; the profile builder calls it on every
//! recommendation request.
//!
//! Known limitations kept on purpose:
//! - style triggers are counted even inside a negated clause unless the word
//!   itself is captured by a negation pattern;
//! - color negation is global: any negation marker anywhere in the text
//!   turns every color hit into an avoid signal.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::vocab::{
    ColorKey,
    GLOBAL_NEGATIONS,
    POSTFIX_NEGATIONS,
    PREFIX_NEGATIONS,
    StyleLabel,
};

/// Minimum length (in characters) of a negated word
const MIN_BANNED_CHARS: usize = 2;

/// Korean particles stripped from the end of a negated word (`블랙은` → `블랙`)
const TRAILING_PARTICLES: &[char] = &['은', '는', '을', '를', '도'];

/// Derived preference signals, persisted inside `Preferences`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals
{
    pub prefer_signals: Vec<StyleLabel>,
    /// Literal words the user negated
    pub avoid_signals: Vec<String>,
    pub prefer_colors: Vec<ColorKey>,
    pub avoid_colors: Vec<ColorKey>,
}

/// Extractor output: signals plus the literal words to ban
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSignals
{
    pub signals: Signals,
    pub banned_from_text: Vec<String>,
}

/// Word run used by both negation patterns
const WORD: &str = r"[가-힣a-z0-9]+";

static POSTFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    let markers = POSTFIX_NEGATIONS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"({WORD})\s*(?:{markers})")).expect("postfix negation pattern")
});

static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    let markers = PREFIX_NEGATIONS
        .iter()
        .map(|m| regex::escape(m).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"\b(?:{markers})\s+(?:(?:the|any|my|a|an)\s+)?({WORD})"
    ))
    .expect("prefix negation pattern")
});

static STYLE_MATCHER: LazyLock<TriggerMatcher<StyleLabel>> =
    LazyLock::new(|| TriggerMatcher::build(&StyleLabel::ALL, StyleLabel::triggers));

static COLOR_MATCHER: LazyLock<TriggerMatcher<ColorKey>> =
    LazyLock::new(|| TriggerMatcher::build(&ColorKey::ALL, ColorKey::triggers));

/// Multi-pattern dictionary lookup: one automaton over every trigger word
struct TriggerMatcher<L: 'static>
{
    automaton: AhoCorasick,
    /// Labels owning each (unique) pattern, indexed by pattern id
    owners: Vec<Vec<L>>,
    /// Dictionary order for reporting
    order: &'static [L],
}

impl<L> TriggerMatcher<L>
where
    L: Copy + Eq + std::hash::Hash + 'static,
{
    fn build(
        order: &'static [L],
        triggers: fn(L) -> &'static [&'static str],
    ) -> Self
    {
        // Same word may trigger more than one label (e.g. 포근)
        let mut patterns: IndexSet<String> = IndexSet::new();
        let mut owners: Vec<Vec<L>> = Vec::new();

        for &label in order
        {
            for trig in triggers(label)
            {
                let (idx, fresh) = patterns.insert_full(trig.to_lowercase());
                if fresh
                {
                    owners.push(Vec::new());
                }
                owners[idx].push(label);
            }
        }

        let automaton = AhoCorasick::new(patterns.iter()).expect("trigger dictionary automaton");

        Self { automaton, owners, order }
    }

    /// Labels with at least one trigger in `text`, in dictionary order
    fn hits(
        &self,
        text: &str,
    ) -> Vec<L>
    {
        let mut found: IndexSet<L> = IndexSet::new();
        for m in self
            .automaton
            .find_overlapping_iter(text)
        {
            found.extend(
                self.owners[m
                    .pattern()
                    .as_usize()]
                .iter()
                .copied(),
            );
        }

        self.order
            .iter()
            .copied()
            .filter(|l| found.contains(l))
            .collect()
    }
}

/// Extract preference, avoidance and ban signals from accumulated text
pub fn extract_signals(text: &str) -> ExtractedSignals
{
    let s = text.to_lowercase();

    // 1) Negated words, in order of appearance across both patterns
    let mut negated: Vec<(usize, String)> = Vec::new();
    for re in [&*POSTFIX_RE, &*PREFIX_RE]
    {
        for cap in re.captures_iter(&s)
        {
            if let Some(m) = cap.get(1)
            {
                negated.push((m.start(), strip_particle(m.as_str())));
            }
        }
    }
    negated.sort_by_key(|(pos, _)| *pos);

    let avoid: IndexSet<String> = negated
        .into_iter()
        .map(|(_, w)| w)
        .filter(|w| {
            w.chars()
                .count()
                >= MIN_BANNED_CHARS
        })
        .collect();

    // 2) Style dictionary, pure containment
    let prefer_signals = STYLE_MATCHER.hits(&s);

    // 3) Color dictionary, classified by global negation
    let colors = COLOR_MATCHER.hits(&s);
    let negated_text = GLOBAL_NEGATIONS
        .iter()
        .any(|m| s.contains(m));
    let (prefer_colors, avoid_colors) = if negated_text
    {
        (Vec::new(), colors)
    }
    else
    {
        (colors, Vec::new())
    };

    trace!(?prefer_signals, ?avoid, ?prefer_colors, ?avoid_colors, "extracted signals");

    let avoid_signals: Vec<String> = avoid
        .into_iter()
        .collect();

    ExtractedSignals {
        banned_from_text: avoid_signals.clone(),
        signals: Signals { prefer_signals, avoid_signals, prefer_colors, avoid_colors },
    }
}

/// Drop one trailing Korean particle when a meaningful stem remains
fn strip_particle(word: &str) -> String
{
    let mut chars: Vec<char> = word
        .chars()
        .collect();
    if chars.len() > MIN_BANNED_CHARS
        && chars
            .last()
            .is_some_and(|c| TRAILING_PARTICLES.contains(c))
    {
        chars.pop();
    }
    chars
        .into_iter()
        .collect()
}
