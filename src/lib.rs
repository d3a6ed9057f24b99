pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod mood;
pub mod reference;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, load_reference};
