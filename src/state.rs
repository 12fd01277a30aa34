use crate::coach::Coach;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    /// Snapshot file rewritten after every logged activity, if any.
    pub data_path: Option<PathBuf>,
    pub data: Arc<Mutex<AppData>>,
    pub coach: Coach,
}

impl AppState {
    pub fn new(data_path: Option<PathBuf>, data: AppData, coach: Coach) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            coach,
        }
    }
}
