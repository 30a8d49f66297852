//! Closed vocabularies for free-text signals.
//!
//! Style labels and color keys are enums with total mappings (trigger words,
//! item tag, display name), so a label can never silently fail to resolve.
//! Trigger lists carry both Korean and English words; matching is plain
//! lowercase substring containment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Style preference label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleLabel
{
    Minimal,
    Clean,
    Chic,
    Lovely,
    Street,
    Vintage,
    Cozy,
    Modern,
    Avant,
}

impl StyleLabel
{
    /// Dictionary order; extraction reports labels in this order
    pub const ALL: [StyleLabel; 9] = [
        StyleLabel::Minimal,
        StyleLabel::Clean,
        StyleLabel::Chic,
        StyleLabel::Lovely,
        StyleLabel::Street,
        StyleLabel::Vintage,
        StyleLabel::Cozy,
        StyleLabel::Modern,
        StyleLabel::Avant,
    ];

    /// Substrings that signal a preference for this style
    pub fn triggers(self) -> &'static [&'static str]
    {
        match self
        {
            StyleLabel::Minimal => &["minimal", "미니멀", "깔끔", "심플", "정갈"],
            StyleLabel::Clean => &["clean", "클린", "단정", "정돈"],
            StyleLabel::Chic => &["chic", "시크", "도시적", "차분"],
            StyleLabel::Lovely => &["lovely", "러블리", "사랑스", "포근"],
            StyleLabel::Street => &["street", "스트릿", "힙"],
            StyleLabel::Vintage => &["vintage", "빈티지", "레트로"],
            StyleLabel::Cozy => &["cozy", "코지", "포근", "따뜻", "부드럽"],
            StyleLabel::Modern => &["modern", "모던"],
            StyleLabel::Avant => &["avant", "아방", "실험적"],
        }
    }

    /// Wardrobe tag that this style resolves to
    pub fn tag(self) -> &'static str
    {
        match self
        {
            StyleLabel::Minimal => "minimal",
            StyleLabel::Clean => "clean",
            StyleLabel::Chic => "chic",
            StyleLabel::Lovely => "lovely",
            StyleLabel::Street => "street",
            StyleLabel::Vintage => "vintage",
            StyleLabel::Cozy => "cozy",
            StyleLabel::Modern => "modern",
            StyleLabel::Avant => "avant",
        }
    }

    /// Source-language display word, also matched against item names
    pub fn display(self) -> &'static str
    {
        match self
        {
            StyleLabel::Minimal => "미니멀",
            StyleLabel::Clean => "클린",
            StyleLabel::Chic => "시크",
            StyleLabel::Lovely => "러블리",
            StyleLabel::Street => "스트릿",
            StyleLabel::Vintage => "빈티지",
            StyleLabel::Cozy => "코지",
            StyleLabel::Modern => "모던",
            StyleLabel::Avant => "아방가르드",
        }
    }
}

impl fmt::Display for StyleLabel
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(self.tag())
    }
}

/// Color key used by signals and color plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey
{
    Black,
    White,
    Gray,
    Navy,
    Beige,
    Brown,
    Blue,
    Green,
    Red,
    Pink,
    Purple,
    Pastel,
    Vivid,
    Neutral,
    /// Hint-only tone for rainy-day bottoms; never extracted from text
    Dark,
}

impl ColorKey
{
    /// Dictionary order; extraction reports colors in this order
    pub const ALL: [ColorKey; 15] = [
        ColorKey::Black,
        ColorKey::White,
        ColorKey::Gray,
        ColorKey::Navy,
        ColorKey::Beige,
        ColorKey::Brown,
        ColorKey::Blue,
        ColorKey::Green,
        ColorKey::Red,
        ColorKey::Pink,
        ColorKey::Purple,
        ColorKey::Pastel,
        ColorKey::Vivid,
        ColorKey::Neutral,
        ColorKey::Dark,
    ];

    pub fn triggers(self) -> &'static [&'static str]
    {
        match self
        {
            ColorKey::Black => &["블랙", "검정", "검은", "black"],
            ColorKey::White => &["화이트", "흰", "white"],
            ColorKey::Gray => &["그레이", "회색", "gray", "grey"],
            ColorKey::Navy => &["네이비", "남색", "navy"],
            ColorKey::Beige => &["베이지", "카멜", "beige", "camel"],
            ColorKey::Brown => &["브라운", "갈색", "brown"],
            ColorKey::Blue => &["블루", "파랑", "blue"],
            ColorKey::Green => &["그린", "초록", "green", "올리브", "olive"],
            ColorKey::Red => &["레드", "빨강", "red"],
            ColorKey::Pink => &["핑크", "분홍", "pink"],
            ColorKey::Purple => &["퍼플", "보라", "purple"],
            ColorKey::Pastel => &["파스텔", "pastel"],
            ColorKey::Vivid => &["비비드", "쨍", "선명", "vivid"],
            ColorKey::Neutral => &["뉴트럴", "무채색", "neutral", "모노톤", "모노"],
            ColorKey::Dark => &[],
        }
    }

    /// Color whose trigger list contains exactly `word`
    pub fn from_trigger(word: &str) -> Option<ColorKey>
    {
        ColorKey::ALL
            .into_iter()
            .find(|c| {
                c.triggers()
                    .contains(&word)
            })
    }

    /// Lowercase key
    pub fn key(self) -> &'static str
    {
        match self
        {
            ColorKey::Black => "black",
            ColorKey::White => "white",
            ColorKey::Gray => "gray",
            ColorKey::Navy => "navy",
            ColorKey::Beige => "beige",
            ColorKey::Brown => "brown",
            ColorKey::Blue => "blue",
            ColorKey::Green => "green",
            ColorKey::Red => "red",
            ColorKey::Pink => "pink",
            ColorKey::Purple => "purple",
            ColorKey::Pastel => "pastel",
            ColorKey::Vivid => "vivid",
            ColorKey::Neutral => "neutral",
            ColorKey::Dark => "dark",
        }
    }

    /// Human-facing name used in reasons and suggestions
    pub fn pretty(self) -> &'static str
    {
        match self
        {
            ColorKey::Beige => "beige/camel",
            ColorKey::Green => "green/olive",
            ColorKey::Pastel => "pastel tones",
            ColorKey::Vivid => "vivid tones",
            ColorKey::Neutral => "neutral (monochrome)",
            ColorKey::Dark => "dark tones",
            other => other.key(),
        }
    }
}

impl fmt::Display for ColorKey
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        f.write_str(self.key())
    }
}

/// Postfix negation markers (`<word> 빼줘`), matched right after a word
pub const POSTFIX_NEGATIONS: &[&str] = &["빼", "제외", "싫어", "말고"];

/// Prefix negation markers (`exclude <word>`), matched right before a word
pub const PREFIX_NEGATIONS: &[&str] =
    &["exclude", "remove", "dislike", "avoid", "without", "instead of"];

/// Markers whose presence anywhere in the text flips color hits to "avoid"
pub const GLOBAL_NEGATIONS: &[&str] = &[
    "빼",
    "제외",
    "싫",
    "말고",
    "exclude",
    "remove",
    "dislike",
    "avoid",
    "without",
    "instead of",
];

/// Chat words that request a different outfit
pub const REDO_TRIGGERS: &[&str] =
    &["바꿔", "다시", "새로", "다른", "재추천", "다르게", "change", "reroll", "redo", "another"];

/// True when `text` asks for a different outfit
pub fn is_redo_request(text: &str) -> bool
{
    let lower = text.to_lowercase();
    REDO_TRIGGERS
        .iter()
        .any(|t| lower.contains(t))
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn every_style_label_has_triggers_and_tag()
    {
        for label in StyleLabel::ALL
        {
            assert!(
                !label
                    .triggers()
                    .is_empty()
            );
            assert!(
                label
                    .triggers()
                    .contains(&label.tag()),
                "{label} should trigger on its own tag"
            );
        }
    }

    #[test]
    fn only_dark_lacks_triggers()
    {
        let silent: Vec<_> = ColorKey::ALL
            .into_iter()
            .filter(|c| {
                c.triggers()
                    .is_empty()
            })
            .collect();
        assert_eq!(silent, vec![ColorKey::Dark]);
    }

    #[test]
    fn trigger_lookup_is_exact()
    {
        assert_eq!(ColorKey::from_trigger("블랙"), Some(ColorKey::Black));
        assert_eq!(ColorKey::from_trigger("grey"), Some(ColorKey::Gray));
        assert_eq!(ColorKey::from_trigger("blackish"), None);
        assert_eq!(ColorKey::from_trigger("dark"), None);
    }

    #[test]
    fn redo_detection_is_case_insensitive()
    {
        assert!(is_redo_request("Please REROLL this"));
        assert!(is_redo_request("다르게 해줘"));
        assert!(!is_redo_request("looks great"));
    }
}
