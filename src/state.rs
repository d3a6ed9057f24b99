use crate::errors::AppError;
use crate::models::AppData;
use crate::reference::ReferenceData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub reference: Arc<ReferenceData>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, reference: ReferenceData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            reference: Arc::new(reference),
        }
    }

    /// Applies `change` to a copy of the data and swaps it in only once the
    /// copy is on disk. On any error the shared data is left untouched.
    pub async fn update<T>(
        &self,
        change: impl FnOnce(&mut AppData) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let output = change(&mut next)?;
        persist_data(&self.data_path, &next).await?;
        *data = next;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;

    fn add_event(data: &mut AppData) -> Result<usize, AppError> {
        let list = data.events.entry("2026-10-18".to_string()).or_default();
        list.push(Event { title: "Walk".to_string() });
        Ok(list.len())
    }

    #[tokio::test]
    async fn failed_write_leaves_data_unchanged() {
        // A directory cannot be written as a file.
        let state = AppState::new(std::env::temp_dir(), AppData::default(), ReferenceData::default());

        let result = state.update(add_event).await;
        assert_eq!(result.unwrap_err().status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.data.lock().await.events.is_empty());
    }

    #[tokio::test]
    async fn rejected_change_is_not_applied() {
        let state = AppState::new(std::env::temp_dir(), AppData::default(), ReferenceData::default());

        let result = state
            .update(|data| {
                add_event(data)?;
                Err::<(), _>(AppError::not_found("no such thing"))
            })
            .await;
        assert_eq!(result.unwrap_err().status, axum::http::StatusCode::NOT_FOUND);
        assert!(state.data.lock().await.events.is_empty());
    }

    #[tokio::test]
    async fn successful_write_swaps_in_the_change() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("kalma_update_{}_{nanos}.json", std::process::id()));
        let state = AppState::new(path.clone(), AppData::default(), ReferenceData::default());

        assert_eq!(state.update(add_event).await.unwrap(), 1);
        assert_eq!(state.data.lock().await.events["2026-10-18"].len(), 1);
        assert_eq!(crate::storage::load_data(&path).await.events["2026-10-18"].len(), 1);
        let _ = tokio::fs::remove_file(&path).await;
    }
}
