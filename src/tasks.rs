use crate::models::{Task, TaskItem, TaskSummary};
use chrono::{NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskView {
    Daily,
    Weekly,
    Monthly,
    /// Any unrecognized view name; hides every task.
    Unknown,
}

impl TaskView {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Unknown => "unknown",
        }
    }

    fn horizon_days(&self) -> Option<i64> {
        match self {
            Self::Daily => Some(1),
            Self::Weekly => Some(7),
            Self::Monthly => Some(30),
            Self::Unknown => None,
        }
    }
}

/// Whole days from `now` until midnight of the due date, rounded up.
///
/// Overdue dates give zero or a negative count; unparseable dates give `None`.
pub fn days_until(due_date: &str, now: NaiveDateTime) -> Option<i64> {
    let due = NaiveDate::parse_from_str(due_date.trim(), "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    let millis = (due - now).num_milliseconds();
    Some(-(-millis).div_euclid(MILLIS_PER_DAY))
}

pub fn is_visible(view: Option<TaskView>, task: &Task, now: NaiveDateTime) -> bool {
    let Some(view) = view else {
        return true;
    };
    match (view.horizon_days(), days_until(&task.due_date, now)) {
        (Some(horizon), Some(days)) => days <= horizon,
        _ => false,
    }
}

/// Newest task first, each flagged with whether the view shows it.
pub fn filter_tasks(tasks: &[Task], view: Option<TaskView>, now: NaiveDateTime) -> Vec<TaskItem> {
    let mut items: Vec<TaskItem> = tasks
        .iter()
        .map(|task| TaskItem {
            visible: is_visible(view, task, now),
            task: task.clone(),
        })
        .collect();
    items.sort_by(|a, b| b.task.id.cmp(&a.task.id));
    items
}

pub fn summarize(tasks: &[Task]) -> TaskSummary {
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskSummary {
        completed,
        pending: tasks.len() - completed,
    }
}
