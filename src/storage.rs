use crate::errors::AppError;
use crate::history::generate_history;
use crate::models::AppData;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// `None` when the file is missing or cannot be parsed.
pub async fn load_data(path: &Path) -> Option<AppData> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => Some(data),
            Err(err) => {
                error!("failed to parse data file: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read data file: {err}");
            None
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(AppError::internal)?;
    }
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Loads the snapshot when one exists, otherwise seeds a month of demo history.
pub async fn initial_data(path: Option<&Path>, seed: Option<u64>, today: NaiveDate) -> AppData {
    if let Some(path) = path {
        if let Some(data) = load_data(path).await {
            info!(
                "loaded {} entries from {}",
                data.entries.len(),
                path.display()
            );
            return data;
        }
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let entries = generate_history(&mut rng, today);
    info!("generated {} days of demo history", entries.len());
    AppData::with_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carbon::Activity;
    use crate::models::LogEntry;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("green_track_{name}_{}_{nanos}.json", std::process::id()));
        path
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()
    }

    #[tokio::test]
    async fn snapshot_round_trips_through_disk() {
        let path = temp_path("roundtrip");
        let mut data = AppData::default();
        data.entries.push(LogEntry::new(today(), Activity::default()));

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await.expect("snapshot should load");
        assert_eq!(loaded.entries, data.entries);
        assert_eq!(loaded.users, data.users);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_ignored() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(load_data(&path).await.is_none());

        let data = initial_data(Some(&path), Some(5), today()).await;
        assert_eq!(data.entries.len(), 30);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn seeded_history_is_reproducible() {
        let first = initial_data(None, Some(99), today()).await;
        let second = initial_data(None, Some(99), today()).await;
        assert_eq!(first.entries, second.entries);
    }
}
