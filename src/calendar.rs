use crate::models::Event;
use crate::reference::ReferenceData;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The month currently displayed. `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub month: u32,
    pub year: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl ViewState {
    /// Carries out-of-range months into the year, so month 12 is January of the next year.
    pub fn normalized(month: i64, year: i64) -> Self {
        Self {
            month: month.rem_euclid(12) as u32,
            year: year.saturating_add(month.div_euclid(12)),
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month0(),
            year: i64::from(date.year()),
        }
    }

    pub fn navigate(self, direction: Direction) -> Self {
        let month = i64::from(self.month);
        match direction {
            Direction::Previous => Self::normalized(month - 1, self.year),
            Direction::Next => Self::normalized(month + 1, self.year),
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize], self.year)
    }

    /// `None` when the year is outside what chrono can represent.
    pub fn first_of_month(&self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_ymd_opt(year, self.month + 1, 1)
    }
}

/// Key under which a day's events are stored, `YYYY-MM-DD` with a zero-padded year.
pub fn event_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Weekday of the 1st, 0 = Sunday.
pub fn first_weekday(state: ViewState) -> Option<u32> {
    state
        .first_of_month()
        .map(|first| first.weekday().num_days_from_sunday())
}

pub fn days_in_month(state: ViewState) -> Option<u32> {
    let first = state.first_of_month()?;
    let next = state.navigate(Direction::Next).first_of_month()?;
    u32::try_from((next - first).num_days()).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLabel {
    pub index: usize,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    /// `MM-DD`, used for holiday lookup.
    pub key: String,
    /// `YYYY-MM-DD`, used for events and the create-event form.
    pub full_key: String,
    pub today: bool,
    pub holiday: Option<String>,
    pub events: Vec<EventLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Header { name: &'static str },
    Empty,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub month: u32,
    pub year: i64,
    pub label: String,
    pub previous: ViewState,
    pub next: ViewState,
    pub cells: Vec<Cell>,
}

impl MonthView {
    pub fn state(&self) -> ViewState {
        ViewState {
            month: self.month,
            year: self.year,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Day(day) => Some(day),
            _ => None,
        })
    }
}

/// Lays out one month: weekday headers, leading placeholders, then one cell per day.
///
/// `today` is captured once by the caller so every cell is compared against the
/// same date. Returns `None` only when the year cannot be represented.
pub fn build_month(
    state: ViewState,
    today: NaiveDate,
    reference: &ReferenceData,
    events: &BTreeMap<String, Vec<Event>>,
) -> Option<MonthView> {
    let first = state.first_of_month()?;
    let leading = first_weekday(state)?;
    let day_count = days_in_month(state)?;

    let mut cells = Vec::with_capacity(WEEKDAY_NAMES.len() + (leading + day_count) as usize);
    cells.extend(WEEKDAY_NAMES.iter().map(|&name| Cell::Header { name }));
    cells.extend((0..leading).map(|_| Cell::Empty));

    let today_key = (today.day(), today.month0(), i64::from(today.year()));
    for day in 1..=day_count {
        let key = format!("{:02}-{:02}", state.month + 1, day);
        let full_key = event_key(first.with_day(day)?);

        let labels = events
            .get(&full_key)
            .map(|list| {
                list.iter()
                    .enumerate()
                    .map(|(index, event)| EventLabel {
                        index,
                        title: event.title.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        cells.push(Cell::Day(DayCell {
            day,
            today: (day, state.month, state.year) == today_key,
            holiday: reference.holiday(&key).map(str::to_string),
            events: labels,
            key,
            full_key,
        }));
    }

    Some(MonthView {
        month: state.month,
        year: state.year,
        label: state.label(),
        previous: state.navigate(Direction::Previous),
        next: state.navigate(Direction::Next),
        cells,
    })
}
