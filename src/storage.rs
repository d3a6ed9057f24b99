use crate::errors::AppError;
use crate::models::AppData;
use crate::reference::ReferenceData;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

enum Loaded<T> {
    Parsed(T),
    Missing,
    Unreadable,
}

/// Loads the data file. A file that exists but cannot be read or parsed is
/// copied aside first, so the next write cannot destroy it.
pub async fn load_data(path: &Path) -> AppData {
    match read_json(path, "data").await {
        Loaded::Parsed(data) => data,
        Loaded::Missing => AppData::default(),
        Loaded::Unreadable => {
            let backup = backup_path(path);
            match fs::copy(path, &backup).await {
                Ok(_) => warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    "starting empty; unreadable data file kept as backup"
                ),
                Err(err) => error!("failed to back up data file {}: {err}", path.display()),
            }
            AppData::default()
        }
    }
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    path.with_file_name(name)
}

/// Reference tables from an optional override file, falling back to the built-in set.
pub async fn load_reference(path: Option<&Path>) -> ReferenceData {
    let Some(path) = path else {
        return ReferenceData::default();
    };
    match read_json::<ReferenceData>(path, "reference").await {
        Loaded::Parsed(reference) => {
            info!(
                path = %path.display(),
                holidays = reference.holidays.len(),
                quotes = reference.quotes.len(),
                "loaded reference data"
            );
            reference
        }
        Loaded::Missing | Loaded::Unreadable => ReferenceData::default(),
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path, kind: &str) -> Loaded<T> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => Loaded::Parsed(value),
            Err(err) => {
                error!("failed to parse {kind} file {}: {err}", path.display());
                Loaded::Unreadable
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Loaded::Missing,
        Err(err) => {
            error!("failed to read {kind} file {}: {err}", path.display());
            Loaded::Unreadable
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, Task};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("kalma_{name}_{}_{nanos}.json", std::process::id()))
    }

    #[tokio::test]
    async fn missing_or_malformed_data_file_loads_empty() {
        let missing = temp_path("missing");
        assert!(load_data(&missing).await.events.is_empty());

        let malformed = temp_path("malformed");
        fs::write(&malformed, b"{ not json").await.unwrap();
        let data = load_data(&malformed).await;
        assert!(data.events.is_empty());
        assert!(data.tasks.is_empty());

        let backup = backup_path(&malformed);
        assert_eq!(fs::read(&backup).await.unwrap(), b"{ not json");
        let _ = fs::remove_file(&malformed).await;
        let _ = fs::remove_file(&backup).await;
    }

    #[tokio::test]
    async fn malformed_event_titles_do_not_drop_other_data() {
        let path = temp_path("null_title");
        fs::write(
            &path,
            br#"{
                "events": {
                    "2026-01-02": [{ "title": null }, { "title": "Keep" }, { "title": 42 }, "bare"]
                },
                "tasks": [{ "id": 1, "name": "Important" }]
            }"#,
        )
        .await
        .unwrap();

        let data = load_data(&path).await;
        let titles: Vec<&str> = data.events["2026-01-02"]
            .iter()
            .map(|event| event.title.as_str())
            .collect();
        assert_eq!(titles, vec!["", "Keep", "", ""]);
        assert_eq!(data.tasks.len(), 1);
        assert_eq!(data.tasks[0].name, "Important");
        assert!(fs::metadata(backup_path(&path)).await.is_err());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_data_survives_reload() {
        let path = temp_path("persist");
        let mut data = AppData::default();
        data.events
            .entry("2026-12-25".to_string())
            .or_default()
            .push(Event { title: "Noche Buena".to_string() });
        data.tasks.push(Task {
            id: 1,
            name: "Wrap gifts".to_string(),
            category: "Personal".to_string(),
            due_date: "2026-12-24".to_string(),
            completed: false,
        });
        data.next_task_id = 2;

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        assert_eq!(loaded.events, data.events);
        assert_eq!(loaded.tasks, data.tasks);
        assert_eq!(loaded.next_task_id, 2);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn event_without_title_loads_with_empty_title() {
        let path = temp_path("untitled");
        fs::write(&path, br#"{ "events": { "2026-01-02": [ {} ] } }"#)
            .await
            .unwrap();
        let data = load_data(&path).await;
        assert_eq!(data.events["2026-01-02"], vec![Event::default()]);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn partial_reference_override_keeps_default_holidays() {
        let path = temp_path("reference");
        fs::write(&path, br#"{ "quotes": ["Only this one."] }"#)
            .await
            .unwrap();
        let reference = load_reference(Some(&path)).await;
        assert_eq!(reference.quotes, vec!["Only this one.".to_string()]);
        assert_eq!(reference.holidays.len(), 12);
        assert_eq!(reference.holiday("12-25"), Some("Christmas Day"));
        let _ = fs::remove_file(&path).await;

        assert_eq!(load_reference(None).await.holidays.len(), 12);
    }
}
