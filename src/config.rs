use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub reference_path: Option<PathBuf>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_path: resolve_data_path(),
            reference_path: env::var("APP_REFERENCE_PATH").ok().map(PathBuf::from),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    match env::var("APP_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DATA_PATH),
    }
}
