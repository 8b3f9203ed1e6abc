use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/mood", post(handlers::mood_form))
        .route("/entries", post(handlers::entry_form))
        .route("/entries/:id/delete", post(handlers::delete_entry_form))
        .route("/theme", post(handlers::toggle_theme))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/entries", get(handlers::list_entries).post(handlers::add_entry))
        .route("/api/entries/:id", delete(handlers::delete_entry))
        .route("/api/moods", get(handlers::list_moods))
        .route("/api/mood", post(handlers::save_mood))
        .route("/api/today", get(handlers::get_today))
        .route("/api/week", get(handlers::get_week))
        .route("/api/trends", get(handlers::get_trends))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/:date", get(handlers::get_calendar_day))
        .route("/api/distribution", get(handlers::get_distribution))
        .route("/api/insights", get(handlers::get_insights))
        .route("/api/quote", get(handlers::get_quote))
        .route("/api/theme", get(handlers::get_theme).post(handlers::set_theme))
        .with_state(state)
}
