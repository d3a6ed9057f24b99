use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/add_event", post(handlers::add_event))
        .route("/delete_event/:date/:index", post(handlers::delete_event))
        .route("/tasks", post(handlers::add_task))
        .route("/tasks/:id/complete", post(handlers::complete_task))
        .route("/tasks/:id/delete", post(handlers::delete_task))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/tasks", get(handlers::get_tasks))
        .route("/api/tasks/summary", get(handlers::get_task_summary))
        .route("/api/mood/:mood", get(handlers::get_mood))
        .with_state(state)
}
