use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

use crate::journal::Journal;

/// Mood categories, in display order. Declaration order is also the
/// tie-break order for "most common mood".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MoodId {
    Happy,
    Calm,
    Neutral,
    Sad,
    Stressed,
    Anxious,
    Excited,
    Grateful,
}

impl MoodId {
    pub const NEUTRAL_SCORE: u8 = 3;

    pub fn emoji(self) -> &'static str {
        match self {
            MoodId::Happy => "😊",
            MoodId::Calm => "😌",
            MoodId::Neutral => "😐",
            MoodId::Sad => "😢",
            MoodId::Stressed => "😰",
            MoodId::Anxious => "😟",
            MoodId::Excited => "🤩",
            MoodId::Grateful => "🙏",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodId::Happy => "Happy",
            MoodId::Calm => "Calm",
            MoodId::Neutral => "Neutral",
            MoodId::Sad => "Sad",
            MoodId::Stressed => "Stressed",
            MoodId::Anxious => "Anxious",
            MoodId::Excited => "Excited",
            MoodId::Grateful => "Grateful",
        }
    }

    /// Wellbeing score on a 1-5 scale.
    pub fn score(self) -> u8 {
        match self {
            MoodId::Happy | MoodId::Grateful | MoodId::Excited => 5,
            MoodId::Calm => 4,
            MoodId::Neutral => 3,
            MoodId::Sad => 2,
            MoodId::Anxious | MoodId::Stressed => 1,
        }
    }
}

/// Score for an optional mood; a missing mood counts as neutral.
pub fn wellbeing_score(mood: Option<MoodId>) -> u8 {
    mood.map(MoodId::score).unwrap_or(MoodId::NEUTRAL_SCORE)
}

pub fn score_label(score: u8) -> &'static str {
    match score {
        1 => "Low",
        2 => "Sad",
        3 => "Neutral",
        4 => "Good",
        5 => "Great",
        _ => "N/A",
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TagId {
    Grateful,
    Stressful,
    Productive,
    Reflective,
    Peaceful,
    Challenging,
}

impl TagId {
    pub fn label(self) -> &'static str {
        match self {
            TagId::Grateful => "🌟 Grateful",
            TagId::Stressful => "🤔 Stressful",
            TagId::Productive => "✨ Productive",
            TagId::Reflective => "💪 Reflective",
            TagId::Peaceful => "☮️ Peaceful",
            TagId::Challenging => "🔥 Challenging",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: u64,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub local_date: String,
    pub text: String,
    #[serde(default, deserialize_with = "stored_mood::deserialize")]
    pub mood: Option<MoodId>,
    #[serde(default)]
    pub tags: Vec<TagId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodCheckIn {
    /// `None` when the stored id is not one of the known moods.
    #[serde(default, deserialize_with = "stored_mood::deserialize")]
    pub mood: Option<MoodId>,
    #[serde(rename = "date")]
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub local_date: String,
}

/// Stored mood ids outside the catalog read as `None` instead of failing
/// the whole record.
mod stored_mood {
    use super::MoodId;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;
    use tracing::warn;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<MoodId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(raw) => match MoodId::from_str(&raw) {
                Ok(mood) => Ok(Some(mood)),
                Err(_) => {
                    warn!(mood = %raw, "unknown stored mood, scoring as neutral");
                    Ok(None)
                }
            },
            other => {
                warn!(mood = %other, "stored mood is not a string, scoring as neutral");
                Ok(None)
            }
        }
    }
}

/// Everything kept in local storage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(flatten)]
    pub journal: Journal,
    pub dark_mode: bool,
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub text: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeRequest {
    pub dark_mode: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub dark_mode: bool,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub mood: Option<MoodCheckIn>,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub days: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoodOption {
    pub id: MoodId,
    pub emoji: &'static str,
    pub label: &'static str,
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct TagOption {
    pub id: TagId,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub moods: Vec<MoodOption>,
    pub tags: Vec<TagOption>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn scores_follow_wellbeing_scale() {
        assert_eq!(MoodId::Happy.score(), 5);
        assert_eq!(MoodId::Grateful.score(), 5);
        assert_eq!(MoodId::Excited.score(), 5);
        assert_eq!(MoodId::Calm.score(), 4);
        assert_eq!(MoodId::Neutral.score(), 3);
        assert_eq!(MoodId::Sad.score(), 2);
        assert_eq!(MoodId::Anxious.score(), 1);
        assert_eq!(MoodId::Stressed.score(), 1);
        assert_eq!(wellbeing_score(None), 3);
    }

    #[test]
    fn mood_ids_parse_from_lowercase_names() {
        assert_eq!(MoodId::from_str("grateful").unwrap(), MoodId::Grateful);
        let name: &str = MoodId::Anxious.as_ref();
        assert_eq!(name, "anxious");
        assert!(MoodId::from_str("ecstatic").is_err());
        assert_eq!(TagId::from_str("peaceful").unwrap(), TagId::Peaceful);
    }

    #[test]
    fn enumeration_order_is_stable() {
        let moods: Vec<MoodId> = MoodId::iter().collect();
        assert_eq!(moods.len(), 8);
        assert_eq!(moods[0], MoodId::Happy);
        assert_eq!(moods[7], MoodId::Grateful);
        assert_eq!(TagId::iter().count(), 6);
    }

    #[test]
    fn entry_uses_stored_field_names() {
        let json = serde_json::json!({
            "id": 1,
            "date": "2026-10-19T08:00:00Z",
            "localDate": "Monday, October 19, 2026 at 08:00 AM",
            "text": "hello",
            "mood": null,
            "tags": ["grateful"]
        });
        let entry: JournalEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.mood, None);
        assert_eq!(entry.tags, vec![TagId::Grateful]);

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("date").is_some());
        assert!(value.get("localDate").is_some());
    }

    #[test]
    fn unknown_stored_mood_reads_as_neutral() {
        let json = serde_json::json!({
            "mood": "ecstatic",
            "date": "2026-10-19T08:00:00Z",
            "localDate": ""
        });
        let check_in: MoodCheckIn = serde_json::from_value(json).unwrap();
        assert_eq!(check_in.mood, None);
        assert_eq!(wellbeing_score(check_in.mood), MoodId::NEUTRAL_SCORE);

        let known: MoodCheckIn = serde_json::from_value(serde_json::json!({
            "mood": "calm",
            "date": "2026-10-19T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(known.mood, Some(MoodId::Calm));
    }
}
