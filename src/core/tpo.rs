//! Occasion (TPO: time, place, occasion) inference from event text.

use crate::core::model::TpoTags;

/// Keyword groups and the occasion tags they imply, checked in order
const RULES: &[(&[&str], &[&str])] = &[
    (&["면접", "interview"], &["formal", "smart"]),
    (
        &[
            "발표",
            "presentation",
            "피칭",
            "pitch",
            "회의",
            "미팅",
            "meeting",
            "컨퍼런스",
            "conference",
            "세미나",
            "seminar",
        ],
        &["formal", "smart"],
    ),
    (&["결혼식", "웨딩", "wedding", "연회", "banquet", "행사", "ceremony"], &["formal"]),
    (&["데이트", "date", "소개팅", "blind date", "와인", "wine", "레스토랑", "restaurant"], &[
        "date", "smart",
    ]),
    (&["친구", "friends", "모임", "gathering", "파티", "party"], &["smart", "casual"]),
    (
        &["등산", "hiking", "캠핑", "camp", "야외", "outdoor", "피크닉", "picnic"],
        &["outdoor", "casual"],
    ),
    (
        &["운동", "gym", "러닝", "running", "workout", "필라테스", "pilates", "요가", "yoga"],
        &["sport", "casual"],
    ),
];

/// Infer occasion tags from free event text (titles, notes).
///
/// Matching is lowercase substring containment. Text with no known keyword
/// yields the default `casual`.
pub fn infer_tpo_tags(text: &str) -> TpoTags
{
    let t = text.to_lowercase();

    TpoTags::new(
        RULES
            .iter()
            .filter(|(keys, _)| {
                keys.iter()
                    .any(|k| t.contains(k))
            })
            .flat_map(|(_, tags)| tags.iter()),
    )
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn unknown_text_defaults_to_casual()
    {
        assert_eq!(infer_tpo_tags("grocery run later").as_slice(), &["casual".to_string()]);
        assert_eq!(infer_tpo_tags("").as_slice(), &["casual".to_string()]);
    }

    #[test]
    fn tags_are_merged_in_rule_order_without_duplicates()
    {
        let tags = infer_tpo_tags("Team meeting, then 데이트 dinner at a wine bar");
        assert_eq!(tags.as_slice(), &["formal".to_string(), "smart".to_string(), "date".to_string()]);
    }

    #[test]
    fn outdoor_and_sport()
    {
        let tags = infer_tpo_tags("Saturday hiking + yoga");
        assert_eq!(tags.as_slice(), &[
            "outdoor".to_string(),
            "casual".to_string(),
            "sport".to_string()
        ]);
    }
}
