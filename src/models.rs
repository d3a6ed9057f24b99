use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Stored entries that are not an object with a string `title` read back with
/// an empty title instead of failing the whole data file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(from = "Value")]
pub struct Event {
    pub title: String,
}

impl From<Value> for Event {
    fn from(value: Value) -> Self {
        let title = match value {
            Value::Object(mut fields) => match fields.remove("title") {
                Some(Value::String(title)) => title,
                _ => String::new(),
            },
            _ => String::new(),
        };
        Self { title }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
}

pub fn default_category() -> String {
    "Personal".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppData {
    /// Events keyed by `YYYY-MM-DD`; list order is display order.
    pub events: BTreeMap<String, Vec<Event>>,
    pub tasks: Vec<Task>,
    pub next_task_id: u64,
}

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub month: Option<i64>,
    pub year: Option<i64>,
    pub view: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MonthQuery {
    pub month: Option<i64>,
    pub year: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TaskQuery {
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewEventForm {
    pub date: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    #[serde(default)]
    pub task: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub due_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskItem {
    #[serde(flatten)]
    pub task: Task,
    pub visible: bool,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskSummary {
    pub completed: usize,
    pub pending: usize,
}

impl TaskSummary {
    pub fn total(&self) -> usize {
        self.completed + self.pending
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MoodFeedback {
    pub mood: String,
    pub tip: String,
    pub quote: String,
    pub message: String,
}
