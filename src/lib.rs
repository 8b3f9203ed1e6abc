pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod quotes;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use journal::{EntryStore, Journal, MoodLog, local_day_key};
pub use state::AppState;
pub use storage::{load_data, persist_data};
