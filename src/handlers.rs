use crate::calendar::{MonthView, ViewState, build_month, event_key};
use crate::errors::AppError;
use crate::models::{
    Event, MonthQuery, MoodFeedback, NewEventForm, NewTaskForm, PageQuery, Task, TaskItem,
    TaskQuery, TaskSummary, default_category,
};
use crate::mood::compose_feedback;
use crate::state::AppState;
use crate::tasks::{TaskView, filter_tasks, summarize};
use crate::ui::{Page, render_index};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let now = Local::now().naive_local();
    let today = now.date();
    let view_state = resolve_view_state(query.month, query.year, today);
    let task_view = parse_task_view(query.view.as_deref());

    let (month, tasks, summary) = {
        let data = state.data.lock().await;
        let month = month_view(&state, view_state, today, &data.events)?;
        (month, filter_tasks(&data.tasks, task_view, now), summarize(&data.tasks))
    };

    let page = Page {
        month: &month,
        tasks: &tasks,
        summary,
        view: task_view,
        moods: state.reference.wellness_tips.keys().map(String::as_str).collect(),
    };
    Ok(Html(render_index(&page, &mut rand::thread_rng())))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthView>, AppError> {
    let today = Local::now().date_naive();
    let view_state = resolve_view_state(query.month, query.year, today);
    let data = state.data.lock().await;
    Ok(Json(month_view(&state, view_state, today, &data.events)?))
}

pub async fn add_event(
    State(state): State<AppState>,
    Form(form): Form<NewEventForm>,
) -> Result<Redirect, AppError> {
    let date = parse_date(&form.date)?;
    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("event title must not be empty"));
    }

    let key = event_key(date);
    state
        .update(|data| {
            data.events.entry(key.clone()).or_default().push(Event {
                title: title.to_string(),
            });
            Ok(())
        })
        .await?;
    info!(date = %key, title, "event added");

    Ok(Redirect::to(&format!(
        "/?month={}&year={}",
        date.month0(),
        date.year()
    )))
}

/// Removes the event at `index` in the list stored for `date`.
pub async fn delete_event(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .update(|data| {
            let list = data
                .events
                .get_mut(&date)
                .ok_or_else(|| AppError::not_found(format!("no events on {date}")))?;
            if index >= list.len() {
                return Err(AppError::not_found(format!("no event {index} on {date}")));
            }

            let removed = list.remove(index);
            if list.is_empty() {
                data.events.remove(&date);
            }
            Ok(removed)
        })
        .await?;
    info!(date = %date, index, title = %removed.title, "event deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Json<Vec<TaskItem>> {
    let now = Local::now().naive_local();
    let view = parse_task_view(query.view.as_deref());
    let data = state.data.lock().await;
    Json(filter_tasks(&data.tasks, view, now))
}

pub async fn get_task_summary(State(state): State<AppState>) -> Json<TaskSummary> {
    let data = state.data.lock().await;
    Json(summarize(&data.tasks))
}

pub async fn add_task(
    State(state): State<AppState>,
    Form(form): Form<NewTaskForm>,
) -> Result<Redirect, AppError> {
    let name = form.task.trim();
    if name.is_empty() {
        return Ok(Redirect::to("/"));
    }

    let category = match form.category.trim() {
        "" => default_category(),
        category => category.to_string(),
    };

    let due_date = form.due_date.trim().to_string();
    let id = state
        .update(|data| {
            data.next_task_id = data.next_task_id.saturating_add(1);
            let id = data.next_task_id;
            data.tasks.push(Task {
                id,
                name: name.to_string(),
                category,
                due_date,
                completed: false,
            });
            Ok(id)
        })
        .await?;
    info!(id, name, "task added");

    Ok(Redirect::to("/"))
}

pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    state
        .update(|data| {
            let task = data
                .tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| AppError::not_found(format!("no task {id}")))?;
            task.completed = true;
            Ok(())
        })
        .await?;
    info!(id, "task completed");

    Ok(Redirect::to("/"))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Redirect, AppError> {
    state
        .update(|data| {
            let position = data
                .tasks
                .iter()
                .position(|task| task.id == id)
                .ok_or_else(|| AppError::not_found(format!("no task {id}")))?;
            data.tasks.remove(position);
            Ok(())
        })
        .await?;
    info!(id, "task deleted");

    Ok(Redirect::to("/"))
}

pub async fn get_mood(State(state): State<AppState>, Path(mood): Path<String>) -> Json<MoodFeedback> {
    Json(compose_feedback(&mood, &state.reference, &mut rand::thread_rng()))
}

fn resolve_view_state(month: Option<i64>, year: Option<i64>, today: NaiveDate) -> ViewState {
    let current = ViewState::containing(today);
    ViewState::normalized(
        month.unwrap_or(i64::from(current.month)),
        year.unwrap_or(current.year),
    )
}

fn month_view(
    state: &AppState,
    view_state: ViewState,
    today: NaiveDate,
    events: &std::collections::BTreeMap<String, Vec<Event>>,
) -> Result<MonthView, AppError> {
    build_month(view_state, today, &state.reference, events)
        .ok_or_else(|| AppError::bad_request(format!("year {} is out of range", view_state.year)))
}

/// A blank view means "no filter".
fn parse_task_view(view: Option<&str>) -> Option<TaskView> {
    view.filter(|view| !view.trim().is_empty())
        .map(TaskView::parse)
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("invalid date '{value}', expected YYYY-MM-DD")))
}
