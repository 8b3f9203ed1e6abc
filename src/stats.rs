use crate::journal::{Journal, local_day_key};
use crate::models::{JournalEntry, MoodCheckIn, MoodId, wellbeing_score};
use chrono::{Datelike, Duration, Local, Months, NaiveDate, TimeZone, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

const RECENT_CHECK_INS: usize = 7;
const ENTRY_ENCOURAGEMENT_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub entry: Option<JournalEntry>,
    pub mood: Option<MoodCheckIn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub weekdays: Vec<String>,
    pub leading_placeholders: usize,
    pub cells: Vec<Option<CalendarCell>>,
    pub previous: MonthRef,
    pub next: MonthRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekDay {
    pub label: String,
    pub date: NaiveDate,
    pub mood: Option<MoodId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub date: NaiveDate,
    pub score: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub icon: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightDetail {
    /// Dashboard wording, no entry-count rule.
    Quick,
    /// Trends-view wording, with the entry-count encouragement.
    Full,
}

/// One cell per day of the month, preceded by `None` placeholders so day 1
/// lands in its weekday column (Sunday first). Returns `None` for an
/// invalid month.
pub fn calendar_cells_for_month<Tz: TimeZone>(
    journal: &Journal,
    year: i32,
    month: u32,
    tz: &Tz,
) -> Option<Vec<Option<CalendarCell>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first)?;

    let mut cells = Vec::with_capacity(leading + days as usize);
    cells.extend(std::iter::repeat_n(None, leading));
    for offset in 0..days {
        let date = first + Duration::days(i64::from(offset));
        cells.push(Some(day_detail(journal, date, tz)));
    }
    Some(cells)
}

pub fn calendar_month<Tz: TimeZone>(
    journal: &Journal,
    year: i32,
    month: u32,
    tz: &Tz,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let cells = calendar_cells_for_month(journal, year, month, tz)?;
    let previous = first.checked_sub_months(Months::new(1))?;
    let next = first.checked_add_months(Months::new(1))?;

    Some(CalendarMonth {
        year,
        month,
        label: first.format("%B %Y").to_string(),
        weekdays: std::iter::successors(Some(Weekday::Sun), |day| Some(day.succ()))
            .take(7)
            .map(|day| day.to_string())
            .collect(),
        leading_placeholders: first.weekday().num_days_from_sunday() as usize,
        cells,
        previous: month_ref(previous),
        next: month_ref(next),
    })
}

/// The entry and check-in for a single day. When several entries share the
/// day only the first in store order is surfaced.
pub fn day_detail<Tz: TimeZone>(journal: &Journal, date: NaiveDate, tz: &Tz) -> CalendarCell {
    let entry = journal
        .entries
        .list_entries()
        .iter()
        .find(|entry| local_day_key(&entry.created_at, tz) == date)
        .cloned();
    let mood = journal.moods.find_by_local_day(date, tz).cloned();

    CalendarCell { date, entry, mood }
}

pub fn week_series(journal: &Journal, days: usize) -> Vec<WeekDay> {
    week_series_at(journal, days, Local::now().date_naive(), &Local)
}

pub fn week_series_at<Tz: TimeZone>(
    journal: &Journal,
    days: usize,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<WeekDay> {
    window(days, today)
        .into_iter()
        .map(|date| WeekDay {
            label: weekday_label(date),
            date,
            mood: journal.moods.find_by_local_day(date, tz).and_then(|check_in| check_in.mood),
        })
        .collect()
}

pub fn trend_series(journal: &Journal, window_days: usize) -> Vec<TrendPoint> {
    trend_series_at(journal, window_days, Local::now().date_naive(), &Local)
}

/// Wellbeing score per day, oldest first, ending at `today`. Days without a
/// check-in carry `None` so charts can draw a gap.
pub fn trend_series_at<Tz: TimeZone>(
    journal: &Journal,
    window_days: usize,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<TrendPoint> {
    window(window_days, today)
        .into_iter()
        .map(|date| TrendPoint {
            label: date.format("%b %-d").to_string(),
            date,
            score: journal
                .moods
                .find_by_local_day(date, tz)
                .map(|check_in| wellbeing_score(check_in.mood)),
        })
        .collect()
}

/// Count of every check-in by mood over the whole history. Moods never
/// recorded are present with a count of zero; check-ins whose stored mood
/// is unknown are not counted.
pub fn mood_distribution(journal: &Journal) -> BTreeMap<MoodId, usize> {
    let mut counts: BTreeMap<MoodId, usize> = MoodId::iter().map(|mood| (mood, 0)).collect();
    for mood in journal.moods.list_check_ins().iter().filter_map(|check_in| check_in.mood) {
        *counts.entry(mood).or_default() += 1;
    }
    counts
}

pub fn insights(journal: &Journal, detail: InsightDetail) -> Vec<Insight> {
    let check_ins = journal.moods.list_check_ins();
    if check_ins.is_empty() {
        return vec![Insight {
            icon: "💭",
            text: "Start tracking your mood to see insights!".to_string(),
        }];
    }

    let mut list = Vec::with_capacity(3);

    // most recently saved first, which is not necessarily the last 7 days
    let recent = &check_ins[..check_ins.len().min(RECENT_CHECK_INS)];
    let total: u32 = recent
        .iter()
        .map(|check_in| u32::from(wellbeing_score(check_in.mood)))
        .sum();
    let average = f64::from(total) / recent.len() as f64;

    let (icon, quick, full) = if average >= 4.0 {
        (
            "🌟",
            "You've had a wonderful week!",
            "You've had a great week! Keep up the positive mindset!",
        )
    } else if average <= 2.0 {
        (
            "💙",
            "Tough week. You've got this!",
            "This week has been challenging. Remember to be kind to yourself.",
        )
    } else {
        (
            "⚖️",
            "Balanced week overall",
            "Your mood has been balanced this week.",
        )
    };
    list.push(Insight {
        icon,
        text: match detail {
            InsightDetail::Quick => quick,
            InsightDetail::Full => full,
        }
        .to_string(),
    });

    if let Some(mood) = most_common_mood(journal) {
        let text = match detail {
            InsightDetail::Quick => format!("Mostly {} lately", mood.emoji()),
            InsightDetail::Full => {
                format!("Your most common mood is {} {}", mood.emoji(), mood.label())
            }
        };
        list.push(Insight { icon: "📊", text });
    }

    let entry_count = journal.entries.len();
    if detail == InsightDetail::Full && entry_count >= ENTRY_ENCOURAGEMENT_THRESHOLD {
        list.push(Insight {
            icon: "📝",
            text: format!("You've written {entry_count} journal entries. Great job reflecting!"),
        });
    }

    list
}

/// Highest count wins; on a tie the mood declared first is kept.
pub fn most_common_mood(journal: &Journal) -> Option<MoodId> {
    let distribution = mood_distribution(journal);
    let mut best: Option<(MoodId, usize)> = None;
    for mood in MoodId::iter() {
        let count = distribution.get(&mood).copied().unwrap_or(0);
        let current = best.map(|(_, count)| count).unwrap_or(0);
        if count > current {
            best = Some((mood, count));
        }
    }
    best.map(|(mood, _)| mood)
}

pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// The `days` dates ending at `today`, oldest first. Stops early at the
/// earliest representable date.
fn window(days: usize, today: NaiveDate) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = std::iter::successors(Some(today), |date| date.pred_opt())
        .take(days)
        .collect();
    dates.reverse();
    dates
}

fn days_in_month(first: NaiveDate) -> Option<u32> {
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

fn month_ref(date: NaiveDate) -> MonthRef {
    MonthRef {
        year: date.year(),
        month: date.month(),
    }
}
