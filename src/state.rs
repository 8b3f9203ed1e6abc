use crate::config::Config;
use crate::models::AppData;
use crate::quotes::QuoteProvider;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub quotes: QuoteProvider,
}

impl AppState {
    pub fn new(config: &Config, data: AppData) -> Self {
        Self {
            data_path: config.data_path.clone(),
            data: Arc::new(Mutex::new(data)),
            quotes: QuoteProvider::new(config.quote_api_url.clone(), config.quote_timeout),
        }
    }
}
