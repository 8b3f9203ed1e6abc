use crate::models::{JournalEntry, MoodCheckIn, MoodId, TagId};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const LOCAL_DATE_FORMAT: &str = "%A, %B %-d, %Y at %I:%M %p";

/// The local calendar day an instant falls on. Every day comparison in the
/// crate goes through this function.
pub fn local_day_key<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

fn local_date_label<Tz>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format(LOCAL_DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryStore {
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    pub fn from_entries(entries: Vec<JournalEntry>) -> Self {
        Self { entries }
    }

    /// Creates an entry at the head of the store. Returns `None` (and leaves
    /// the store untouched) when `text` is blank.
    pub fn add_entry_at<Tz>(
        &mut self,
        text: &str,
        mood: Option<MoodId>,
        tags: &[TagId],
        at: DateTime<Utc>,
        tz: &Tz,
    ) -> Option<JournalEntry>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut unique_tags: Vec<TagId> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique_tags.contains(tag) {
                unique_tags.push(*tag);
            }
        }

        let entry = JournalEntry {
            id: self.next_id(&at),
            created_at: at,
            local_date: local_date_label(&at, tz),
            text: text.to_string(),
            mood,
            tags: unique_tags,
        };
        self.entries.insert(0, entry.clone());
        Some(entry)
    }

    /// Removes the entry with `id`. Unknown ids are not an error.
    pub fn delete_entry(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn list_entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn recent(&self, limit: usize) -> &[JournalEntry] {
        &self.entries[..self.entries.len().min(limit)]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_id(&self, at: &DateTime<Utc>) -> u64 {
        let candidate = u64::try_from(at.timestamp_millis()).unwrap_or(0);
        match self.entries.iter().map(|entry| entry.id).max() {
            Some(max) if candidate <= max => max.saturating_add(1),
            _ => candidate,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodLog {
    check_ins: Vec<MoodCheckIn>,
}

impl MoodLog {
    pub fn from_check_ins(check_ins: Vec<MoodCheckIn>) -> Self {
        Self { check_ins }
    }

    pub fn save_mood(&mut self, mood: MoodId) -> MoodCheckIn {
        self.save_mood_at(mood, Utc::now(), &Local)
    }

    /// Records `mood` for the local day of `at`. A check-in already on that
    /// day is overwritten at its current position; otherwise the new one is
    /// prepended.
    pub fn save_mood_at<Tz>(&mut self, mood: MoodId, at: DateTime<Utc>, tz: &Tz) -> MoodCheckIn
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let day = local_day_key(&at, tz);
        let check_in = MoodCheckIn {
            mood: Some(mood),
            occurred_at: at,
            local_date: local_date_label(&at, tz),
        };

        match self
            .check_ins
            .iter()
            .position(|existing| local_day_key(&existing.occurred_at, tz) == day)
        {
            Some(index) => self.check_ins[index] = check_in.clone(),
            None => self.check_ins.insert(0, check_in.clone()),
        }

        check_in
    }

    pub fn find_by_local_day<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Option<&MoodCheckIn> {
        self.check_ins
            .iter()
            .find(|check_in| local_day_key(&check_in.occurred_at, tz) == day)
    }

    pub fn today<Tz: TimeZone>(&self, tz: &Tz) -> Option<&MoodCheckIn> {
        let today = local_day_key(&Utc::now(), tz);
        self.find_by_local_day(today, tz)
    }

    pub fn list_check_ins(&self) -> &[MoodCheckIn] {
        &self.check_ins
    }

    pub fn len(&self) -> usize {
        self.check_ins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.check_ins.is_empty()
    }
}

/// Entries and mood check-ins owned together. An entry's `mood` is a copy
/// taken when the entry was written and is never re-linked to the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(rename = "journalEntries", default)]
    pub entries: EntryStore,
    #[serde(rename = "moodHistory", default)]
    pub moods: MoodLog,
}

impl Journal {
    pub fn new(entries: EntryStore, moods: MoodLog) -> Self {
        Self { entries, moods }
    }

    pub fn add_entry(&mut self, text: &str, mood: Option<MoodId>, tags: &[TagId]) -> Option<JournalEntry> {
        self.add_entry_at(text, mood, tags, Utc::now(), &Local)
    }

    pub fn add_entry_at<Tz>(
        &mut self,
        text: &str,
        mood: Option<MoodId>,
        tags: &[TagId],
        at: DateTime<Utc>,
        tz: &Tz,
    ) -> Option<JournalEntry>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let entry = self.entries.add_entry_at(text, mood, tags, at, tz)?;
        if let Some(mood) = entry.mood {
            self.moods.save_mood_at(mood, entry.created_at, tz);
        }
        Some(entry)
    }

    pub fn delete_entry(&mut self, id: u64) -> bool {
        self.entries.delete_entry(id)
    }

    pub fn save_mood(&mut self, mood: MoodId) -> MoodCheckIn {
        self.moods.save_mood(mood)
    }

    pub fn save_mood_at<Tz>(&mut self, mood: MoodId, at: DateTime<Utc>, tz: &Tz) -> MoodCheckIn
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.moods.save_mood_at(mood, at, tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn add_entry_prepends_trimmed_text() {
        let mut journal = Journal::default();
        let first = journal
            .add_entry_at("first", None, &[], at(2026, 10, 18, 9, 0), &utc())
            .expect("entry");
        let second = journal
            .add_entry_at("  second  ", None, &[TagId::Peaceful], at(2026, 10, 19, 9, 0), &utc())
            .expect("entry");

        assert_eq!(journal.entries.len(), 2);
        assert_eq!(journal.entries.list_entries()[0].id, second.id);
        assert_eq!(journal.entries.list_entries()[1].id, first.id);
        assert_eq!(second.text, "second");
        assert_eq!(second.tags, vec![TagId::Peaceful]);
        assert_eq!(second.local_date, "Monday, October 19, 2026 at 09:00 AM");
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut journal = Journal::default();
        assert!(journal.add_entry_at("", Some(MoodId::Happy), &[], at(2026, 10, 19, 9, 0), &utc()).is_none());
        assert!(journal.add_entry_at("   ", None, &[], at(2026, 10, 19, 9, 0), &utc()).is_none());
        assert!(journal.entries.is_empty());
        assert!(journal.moods.is_empty());
    }

    #[test]
    fn ids_stay_unique_within_the_same_millisecond() {
        let mut store = EntryStore::default();
        let now = at(2026, 10, 19, 9, 0);
        let a = store.add_entry_at("a", None, &[], now, &utc()).unwrap();
        let b = store.add_entry_at("b", None, &[], now, &utc()).unwrap();
        assert_eq!(a.id, now.timestamp_millis() as u64);
        assert_eq!(b.id, a.id + 1);
    }

    #[test]
    fn duplicate_tags_are_collapsed_in_order() {
        let mut store = EntryStore::default();
        let entry = store
            .add_entry_at(
                "tags",
                None,
                &[TagId::Reflective, TagId::Grateful, TagId::Reflective],
                at(2026, 10, 19, 9, 0),
                &utc(),
            )
            .unwrap();
        assert_eq!(entry.tags, vec![TagId::Reflective, TagId::Grateful]);
    }

    #[test]
    fn delete_removes_only_matching_id() {
        let mut journal = Journal::default();
        let kept = journal.add_entry_at("keep", None, &[], at(2026, 10, 18, 9, 0), &utc()).unwrap();
        let gone = journal.add_entry_at("drop", None, &[], at(2026, 10, 19, 9, 0), &utc()).unwrap();

        assert!(!journal.delete_entry(42));
        assert_eq!(journal.entries.len(), 2);

        assert!(journal.delete_entry(gone.id));
        assert_eq!(journal.entries.len(), 1);
        assert_eq!(journal.entries.list_entries()[0].id, kept.id);
    }

    #[test]
    fn delete_single_entry_leaves_store_empty() {
        let entry = JournalEntry {
            id: 1,
            created_at: at(2026, 10, 19, 9, 0),
            local_date: String::new(),
            text: "only".to_string(),
            mood: None,
            tags: Vec::new(),
        };
        let mut store = EntryStore::from_entries(vec![entry]);
        store.delete_entry(1);
        assert!(store.list_entries().is_empty());
    }

    #[test]
    fn entry_with_mood_records_check_in_at_same_instant() {
        let mut journal = Journal::default();
        let when = at(2026, 10, 19, 20, 15);
        let entry = journal
            .add_entry_at("evening", Some(MoodId::Calm), &[], when, &utc())
            .unwrap();

        let check_in = journal
            .moods
            .find_by_local_day(when.date_naive(), &utc())
            .expect("check-in");
        assert_eq!(check_in.mood, Some(MoodId::Calm));
        assert_eq!(check_in.occurred_at, entry.created_at);
    }

    #[test]
    fn later_mood_change_does_not_touch_existing_entries() {
        let mut journal = Journal::default();
        let when = at(2026, 10, 19, 8, 0);
        journal.add_entry_at("morning", Some(MoodId::Sad), &[], when, &utc());
        journal.save_mood_at(MoodId::Happy, when + Duration::hours(2), &utc());

        assert_eq!(journal.moods.len(), 1);
        assert_eq!(journal.moods.list_check_ins()[0].mood, Some(MoodId::Happy));
        assert_eq!(journal.entries.list_entries()[0].mood, Some(MoodId::Sad));
    }

    #[test]
    fn same_day_save_replaces_in_place() {
        let mut log = MoodLog::default();
        log.save_mood_at(MoodId::Calm, at(2026, 10, 17, 9, 0), &utc());
        log.save_mood_at(MoodId::Happy, at(2026, 10, 18, 9, 0), &utc());
        log.save_mood_at(MoodId::Sad, at(2026, 10, 19, 9, 0), &utc());

        // overwrite the middle day; its index must not move
        log.save_mood_at(MoodId::Excited, at(2026, 10, 18, 22, 0), &utc());

        let moods: Vec<MoodId> = log.list_check_ins().iter().filter_map(|c| c.mood).collect();
        assert_eq!(moods, vec![MoodId::Sad, MoodId::Excited, MoodId::Calm]);
    }

    #[test]
    fn two_saves_nine_minutes_apart_keep_one_check_in() {
        let mut log = MoodLog::default();
        let first = at(2026, 10, 19, 14, 0);
        log.save_mood_at(MoodId::Sad, first, &utc());
        log.save_mood_at(MoodId::Sad, first + Duration::minutes(9), &utc());

        assert_eq!(log.len(), 1);
        assert_eq!(log.list_check_ins()[0].mood, Some(MoodId::Sad));
    }

    #[test]
    fn different_days_keep_separate_check_ins() {
        let mut log = MoodLog::default();
        log.save_mood_at(MoodId::Sad, at(2026, 10, 18, 14, 0), &utc());
        log.save_mood_at(MoodId::Happy, at(2026, 10, 19, 14, 0), &utc());
        assert_eq!(log.len(), 2);
        assert_eq!(log.list_check_ins()[0].mood, Some(MoodId::Happy));
    }

    #[test]
    fn day_bucketing_follows_local_timezone() {
        // 23:30 UTC on the 18th is already the 19th in UTC+2
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let late = at(2026, 10, 18, 23, 30);
        let next_morning = at(2026, 10, 19, 8, 0);

        let mut local = MoodLog::default();
        local.save_mood_at(MoodId::Sad, late, &plus_two);
        local.save_mood_at(MoodId::Happy, next_morning, &plus_two);
        assert_eq!(local.len(), 1);

        let mut in_utc = MoodLog::default();
        in_utc.save_mood_at(MoodId::Sad, late, &utc());
        in_utc.save_mood_at(MoodId::Happy, next_morning, &utc());
        assert_eq!(in_utc.len(), 2);

        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(local_day_key(&late, &plus_two), day);
        assert!(local.find_by_local_day(day, &plus_two).is_some());
        assert!(in_utc.find_by_local_day(day - Duration::days(1), &utc()).is_some());
    }

    #[test]
    fn recent_is_capped_by_length() {
        let mut store = EntryStore::default();
        for i in 0..3 {
            store.add_entry_at(&format!("entry {i}"), None, &[], at(2026, 10, 19, 9, i), &utc());
        }
        assert_eq!(store.recent(5).len(), 3);
        assert_eq!(store.recent(2).len(), 2);
        assert_eq!(store.recent(2)[0].text, "entry 2");
    }
}
