use crate::errors::AppError;
use crate::models::{
    CalendarQuery, CatalogResponse, EntryRequest, InsightsQuery, JournalEntry, MoodCheckIn,
    MoodId, MoodOption, MoodRequest, TagId, TagOption, ThemeRequest, ThemeResponse,
    TodayResponse, TrendQuery,
};
use crate::quotes::Quote;
use crate::state::AppState;
use crate::stats::{
    self, CalendarCell, CalendarMonth, Insight, InsightDetail, TrendPoint, WeekDay,
};
use crate::storage::persist_data;
use crate::ui::{IndexView, render_index};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Datelike, Local, NaiveDate};
use std::{collections::BTreeMap, str::FromStr};
use strum::IntoEnumIterator;
use tracing::{debug, info};

const RECENT_ENTRY_LIMIT: usize = 5;
const WEEK_DAYS: usize = 7;
const DEFAULT_TREND_DAYS: usize = 7;
const MAX_TREND_DAYS: usize = 366;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let data = state.data.lock().await;
    let journal = &data.journal;

    let view = IndexView {
        today,
        dark_mode: data.dark_mode,
        today_mood: journal.moods.today(&Local).and_then(|check_in| check_in.mood),
        recent: journal.entries.recent(RECENT_ENTRY_LIMIT),
        week: stats::week_series_at(journal, WEEK_DAYS, today, &Local),
        insights: stats::insights(journal, InsightDetail::Quick),
    };
    Html(render_index(&view))
}

pub async fn mood_form(
    State(state): State<AppState>,
    Form(payload): Form<MoodRequest>,
) -> Result<Redirect, AppError> {
    let mood = parse_mood(&payload.mood)?;
    apply_mood(&state, mood).await?;
    Ok(Redirect::to("/"))
}

/// HTML form posts repeat the `tags` field once per selected tag.
pub async fn entry_form(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let mut text = String::new();
    let mut mood = None;
    let mut tags = Vec::new();
    for (key, value) in &fields {
        match key.as_str() {
            "text" => text.clone_from(value),
            "mood" => mood = parse_optional_mood(Some(value))?,
            "tags" => tags.push(parse_tag(value)?),
            _ => {}
        }
    }

    apply_entry(&state, &text, mood, &tags).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_entry_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    apply_delete(&state, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_theme(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut data = state.data.lock().await;
    data.dark_mode = !data.dark_mode;
    persist_data(&state.data_path, &data).await?;
    info!(dark_mode = data.dark_mode, "toggled theme");
    Ok(Redirect::to("/"))
}

pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        moods: MoodId::iter()
            .map(|mood| MoodOption {
                id: mood,
                emoji: mood.emoji(),
                label: mood.label(),
                score: mood.score(),
            })
            .collect(),
        tags: TagId::iter()
            .map(|tag| TagOption {
                id: tag,
                label: tag.label(),
            })
            .collect(),
    })
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<JournalEntry>> {
    let data = state.data.lock().await;
    Json(data.journal.entries.list_entries().to_vec())
}

/// Blank text is not an error; the response body is `null`.
pub async fn add_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntryRequest>,
) -> Result<Json<Option<JournalEntry>>, AppError> {
    let mood = parse_optional_mood(payload.mood.as_deref())?;
    let tags = payload
        .tags
        .iter()
        .map(|tag| parse_tag(tag))
        .collect::<Result<Vec<_>, _>>()?;

    let entry = apply_entry(&state, &payload.text, mood, &tags).await?;
    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    apply_delete(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_moods(State(state): State<AppState>) -> Json<Vec<MoodCheckIn>> {
    let data = state.data.lock().await;
    Json(data.journal.moods.list_check_ins().to_vec())
}

pub async fn save_mood(
    State(state): State<AppState>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<MoodCheckIn>, AppError> {
    let mood = parse_mood(&payload.mood)?;
    let check_in = apply_mood(&state, mood).await?;
    Ok(Json(check_in))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let data = state.data.lock().await;
    Json(TodayResponse {
        date: today(),
        mood: data.journal.moods.today(&Local).cloned(),
    })
}

pub async fn get_week(State(state): State<AppState>) -> Json<Vec<WeekDay>> {
    let data = state.data.lock().await;
    Json(stats::week_series(&data.journal, WEEK_DAYS))
}

pub async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<Vec<TrendPoint>>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
    if !(1..=MAX_TREND_DAYS).contains(&days) {
        return Err(AppError::bad_request(format!(
            "days must be between 1 and {MAX_TREND_DAYS}"
        )));
    }

    debug!(days, "building trend series");
    let data = state.data.lock().await;
    Ok(Json(stats::trend_series(&data.journal, days)))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let current = today();
    let year = query.year.unwrap_or(current.year());
    let month = query.month.unwrap_or(current.month());

    let data = state.data.lock().await;
    stats::calendar_month(&data.journal, year, month, &Local)
        .map(Json)
        .ok_or_else(|| AppError::bad_request(format!("invalid month {year}-{month}")))
}

pub async fn get_calendar_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<CalendarCell>, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("invalid date '{date}'")))?;

    let data = state.data.lock().await;
    Ok(Json(stats::day_detail(&data.journal, date, &Local)))
}

pub async fn get_distribution(State(state): State<AppState>) -> Json<BTreeMap<MoodId, usize>> {
    let data = state.data.lock().await;
    Json(stats::mood_distribution(&data.journal))
}

pub async fn get_insights(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let detail = match query.detail.as_deref().map(str::trim) {
        None | Some("") | Some("quick") => InsightDetail::Quick,
        Some("full") => InsightDetail::Full,
        Some(other) => {
            return Err(AppError::bad_request(format!(
                "detail must be 'quick' or 'full', got '{other}'"
            )));
        }
    };

    let data = state.data.lock().await;
    Ok(Json(stats::insights(&data.journal, detail)))
}

pub async fn get_quote(State(state): State<AppState>) -> Json<Quote> {
    Json(state.quotes.fetch_quote().await)
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let data = state.data.lock().await;
    Json(ThemeResponse {
        dark_mode: data.dark_mode,
    })
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<ThemeResponse>, AppError> {
    let mut data = state.data.lock().await;
    data.dark_mode = payload.dark_mode;
    persist_data(&state.data_path, &data).await?;
    Ok(Json(ThemeResponse {
        dark_mode: data.dark_mode,
    }))
}

async fn apply_entry(
    state: &AppState,
    text: &str,
    mood: Option<MoodId>,
    tags: &[TagId],
) -> Result<Option<JournalEntry>, AppError> {
    let mut data = state.data.lock().await;
    let Some(entry) = data.journal.add_entry(text, mood, tags) else {
        debug!("ignored blank journal entry");
        return Ok(None);
    };

    persist_data(&state.data_path, &data).await?;
    info!(id = entry.id, mood = ?entry.mood, tags = entry.tags.len(), "saved journal entry");
    Ok(Some(entry))
}

async fn apply_delete(state: &AppState, id: u64) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    if !data.journal.delete_entry(id) {
        debug!(id, "delete requested for unknown entry");
        return Ok(());
    }

    persist_data(&state.data_path, &data).await?;
    info!(id, "deleted journal entry");
    Ok(())
}

async fn apply_mood(state: &AppState, mood: MoodId) -> Result<MoodCheckIn, AppError> {
    let mut data = state.data.lock().await;
    let check_in = data.journal.save_mood(mood);
    persist_data(&state.data_path, &data).await?;
    info!(mood = ?mood, check_ins = data.journal.moods.len(), "saved mood");
    Ok(check_in)
}

fn parse_mood(value: &str) -> Result<MoodId, AppError> {
    MoodId::from_str(value.trim()).map_err(|_| AppError::unknown_mood(value))
}

fn parse_optional_mood(value: Option<&str>) -> Result<Option<MoodId>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_mood(value).map(Some),
    }
}

fn parse_tag(value: &str) -> Result<TagId, AppError> {
    TagId::from_str(value.trim()).map_err(|_| AppError::unknown_tag(value))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_mood_accepts_blank_as_none() {
        assert_eq!(parse_optional_mood(None).unwrap(), None);
        assert_eq!(parse_optional_mood(Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_mood(Some("calm")).unwrap(), Some(MoodId::Calm));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(parse_mood("furious").unwrap_err().status, StatusCode::BAD_REQUEST);
        assert_eq!(parse_tag("lazy").unwrap_err().status, StatusCode::BAD_REQUEST);
        assert_eq!(parse_tag(" productive ").unwrap(), TagId::Productive);
    }
}
