use crate::errors::AppError;
use crate::journal::{EntryStore, Journal, MoodLog};
use crate::models::AppData;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

pub const ENTRIES_KEY: &str = "journalEntries";
pub const MOOD_HISTORY_KEY: &str = "moodHistory";
pub const DARK_MODE_KEY: &str = "darkMode";

pub async fn load_data(path: &Path) -> AppData {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            return AppData::default();
        }
    };

    let stored = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            error!("data file is not a JSON object, starting empty");
            return AppData::default();
        }
        Err(err) => {
            error!("failed to parse data file: {err}");
            return AppData::default();
        }
    };

    let data = AppData {
        journal: Journal::new(
            EntryStore::from_entries(read_list(&stored, ENTRIES_KEY)),
            MoodLog::from_check_ins(read_list(&stored, MOOD_HISTORY_KEY)),
        ),
        dark_mode: read_key::<bool>(&stored, DARK_MODE_KEY),
    };
    info!(
        entries = data.journal.entries.len(),
        check_ins = data.journal.moods.len(),
        "loaded journal"
    );
    data
}

/// A missing or malformed value reads as its default.
fn read_key<T: DeserializeOwned + Default>(stored: &Map<String, Value>, key: &str) -> T {
    match stored.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|err| {
            error!(key, "ignoring malformed stored value: {err}");
            T::default()
        }),
    }
}

/// Decodes a stored list item by item. A value that is not a list reads as
/// empty; an item that does not decode is skipped and the rest are kept.
fn read_list<T: DeserializeOwned>(stored: &Map<String, Value>, key: &str) -> Vec<T> {
    let items = match stored.get(key) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            error!(key, "ignoring stored value that is not a list");
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(key, index, "skipping malformed stored item: {err}");
                None
            }
        })
        .collect()
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
