use crate::calendar::{Cell, DayCell, MonthView, ViewState};
use crate::models::{TaskItem, TaskSummary};
use crate::tasks::TaskView;
use rand::Rng;
use std::f64::consts::PI;
use std::fmt::Write;

pub const LEAF_COUNT: usize = 8;

const DONUT_RADIUS: f64 = 60.0;

pub struct Page<'a> {
    pub month: &'a MonthView,
    pub tasks: &'a [TaskItem],
    pub summary: TaskSummary,
    pub view: Option<TaskView>,
    pub moods: Vec<&'a str>,
}

pub fn render_index<R: Rng + ?Sized>(page: &Page<'_>, rng: &mut R) -> String {
    let state = page.month.state();
    INDEX_HTML
        .replace("{{MONTH_LABEL}}", &html_escape(&page.month.label))
        .replace("{{PREV_HREF}}", &page_href(page.month.previous, page.view))
        .replace("{{NEXT_HREF}}", &page_href(page.month.next, page.view))
        .replace("{{FILTERS}}", &render_filters(state, page.view))
        .replace("{{CHART}}", &render_chart(page.summary))
        .replace("{{MOODS}}", &render_mood_buttons(&page.moods))
        .replace("{{MOOD_OPTIONS}}", &render_mood_options(&page.moods))
        .replace("{{LEAVES}}", &render_leaves(rng))
        .replace("{{TASKS}}", &render_tasks(page.tasks))
        .replace("{{CALENDAR}}", &render_calendar(page.month))
}

pub fn page_href(state: ViewState, view: Option<TaskView>) -> String {
    let mut href = format!("/?month={}&amp;year={}", state.month, state.year);
    if let Some(view) = view {
        let _ = write!(href, "&amp;view={}", view.as_str());
    }
    href
}

pub fn render_calendar(month: &MonthView) -> String {
    let mut html = String::new();
    for cell in &month.cells {
        match cell {
            Cell::Header { name } => {
                let _ = write!(html, r#"<div class="day-name">{name}</div>"#);
            }
            Cell::Empty => html.push_str(r#"<div class="empty-cell"></div>"#),
            Cell::Day(day) => render_day(&mut html, day),
        }
    }
    html
}

fn render_day(html: &mut String, day: &DayCell) {
    let mut classes = String::from("calendar-day");
    if day.today {
        classes.push_str(" today");
    }
    if day.holiday.is_some() {
        classes.push_str(" holiday");
    }

    let _ = write!(
        html,
        r#"<div class="{classes}" data-date="{date}">{number}"#,
        date = day.full_key,
        number = day.day
    );
    if let Some(holiday) = &day.holiday {
        let _ = write!(html, r#"<span class="holiday-name">{}</span>"#, html_escape(holiday));
    }
    for event in &day.events {
        let title = html_escape(&event.title);
        let _ = write!(
            html,
            r#"<span class="event-name">{title}<button type="button" class="delete-event-btn" data-date="{date}" data-index="{index}" data-title="{title}" aria-label="Delete event">&times;</button></span>"#,
            date = day.full_key,
            index = event.index
        );
    }
    html.push_str("</div>");
}

fn render_filters(state: ViewState, active: Option<TaskView>) -> String {
    let options = [
        (None, "All"),
        (Some(TaskView::Daily), "Daily"),
        (Some(TaskView::Weekly), "Weekly"),
        (Some(TaskView::Monthly), "Monthly"),
    ];
    options
        .iter()
        .map(|(view, label)| {
            let class = if *view == active { "filter active" } else { "filter" };
            format!(
                r#"<a class="{class}" href="{href}">{label}</a>"#,
                href = page_href(state, *view)
            )
        })
        .collect()
}

pub fn render_tasks(tasks: &[TaskItem]) -> String {
    if tasks.is_empty() {
        return r#"<li class="task-empty">No tasks yet. Add one above.</li>"#.to_string();
    }

    let mut html = String::new();
    for item in tasks {
        let task = &item.task;
        let status = if task.completed { "task completed" } else { "task" };
        let style = if item.visible { "list-item" } else { "none" };
        let due = if task.due_date.is_empty() {
            "No due date".to_string()
        } else {
            format!("Due {}", html_escape(&task.due_date))
        };
        let _ = write!(
            html,
            r#"<li class="{status}" data-id="{id}" data-due="{due_attr}" style="display: {style}"><span class="task-name">{name}</span><span class="task-meta">{category} &middot; {due}</span>"#,
            id = task.id,
            due_attr = html_escape(&task.due_date),
            name = html_escape(&task.name),
            category = html_escape(&task.category),
        );
        if !task.completed {
            let _ = write!(
                html,
                r#"<form method="post" action="/tasks/{id}/complete"><button type="submit" class="task-btn">Done</button></form>"#,
                id = task.id
            );
        }
        let _ = write!(
            html,
            r#"<form method="post" action="/tasks/{id}/delete"><button type="submit" class="task-btn task-delete">Delete</button></form></li>"#,
            id = task.id
        );
    }
    html
}

/// Donut of completed vs pending tasks; empty when there is nothing to chart.
pub fn render_chart(summary: TaskSummary) -> String {
    let total = summary.total();
    if total == 0 {
        return String::new();
    }

    let circumference = 2.0 * PI * DONUT_RADIUS;
    let share = summary.completed as f64 / total as f64;
    let arc = share * circumference;
    let percent = (share * 100.0).round() as u32;

    format!(
        r#"<section class="card chart-card">
      <h2>Task progress</h2>
      <svg id="chart" viewBox="0 0 160 160" role="img" aria-label="{completed} of {total} tasks completed">
        <circle class="donut-pending" cx="80" cy="80" r="{r}" />
        <circle class="donut-completed" cx="80" cy="80" r="{r}" stroke-dasharray="{arc:.2} {circumference:.2}" transform="rotate(-90 80 80)" />
        <text class="donut-label" x="80" y="86" text-anchor="middle">{percent}%</text>
      </svg>
      <ul class="legend">
        <li><span class="swatch swatch-completed"></span>Completed: {completed}</li>
        <li><span class="swatch swatch-pending"></span>Pending: {pending}</li>
      </ul>
    </section>"#,
        completed = summary.completed,
        pending = summary.pending,
        r = DONUT_RADIUS,
    )
}

fn render_mood_buttons(moods: &[&str]) -> String {
    moods
        .iter()
        .map(|mood| {
            let mood = html_escape(mood);
            format!(r#"<button type="button" class="mood-btn" data-mood="{mood}">{mood}</button>"#)
        })
        .collect()
}

fn render_mood_options(moods: &[&str]) -> String {
    moods
        .iter()
        .map(|mood| {
            let mood = html_escape(mood);
            format!(r#"<option value="{mood}">{mood}</option>"#)
        })
        .collect()
}

fn render_leaves<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..LEAF_COUNT)
        .map(|index| {
            let duration: f64 = rng.gen_range(8.0..15.0);
            let opacity: f64 = rng.gen_range(0.4..0.8);
            let left = index * 100 / LEAF_COUNT + 4;
            format!(
                r#"<span class="leaf" style="left: {left}%; animation-duration: {duration:.2}s; opacity: {opacity:.2}"></span>"#
            )
        })
        .collect()
}

/// Braces are escaped too so user text can never form a template placeholder.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>KALMA</title>
  <style>
    :root {
      --bg-1: #eef5ec;
      --bg-2: #cfe6d2;
      --ink: #23352a;
      --muted: #66786b;
      --accent: #3f8f5a;
      --accent-2: #e07a5f;
      --holiday: #c0392b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(35, 53, 42, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f7fbf5 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
      overflow-x: hidden;
    }

    .app {
      width: min(1040px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
      grid-template-columns: 2fr 1fr;
      position: relative;
      z-index: 1;
    }

    header {
      grid-column: 1 / -1;
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-family: Georgia, serif;
    }

    .card {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .calendar-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 16px;
    }

    .calendar-header h2 {
      margin: 0;
    }

    .nav {
      text-decoration: none;
      font-size: 1.4rem;
      color: var(--accent);
      padding: 4px 12px;
      border-radius: 999px;
      background: rgba(63, 143, 90, 0.1);
    }

    #calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .day-name {
      text-align: center;
      font-weight: 600;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .calendar-day {
      min-height: 84px;
      background: white;
      border-radius: 12px;
      padding: 6px;
      cursor: pointer;
      display: flex;
      flex-direction: column;
      gap: 3px;
      border: 1px solid rgba(35, 53, 42, 0.08);
    }

    .calendar-day.today {
      border: 2px solid var(--accent);
      font-weight: 700;
    }

    .calendar-day.holiday {
      color: var(--holiday);
    }

    .holiday-name,
    .event-name {
      font-size: 0.7rem;
      border-radius: 6px;
      padding: 2px 4px;
    }

    .holiday-name {
      background: rgba(192, 57, 43, 0.1);
    }

    .event-name {
      background: rgba(63, 143, 90, 0.14);
      color: var(--ink);
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .delete-event-btn {
      border: none;
      background: transparent;
      cursor: pointer;
      color: var(--holiday);
      font-size: 0.9rem;
    }

    .filters {
      display: flex;
      gap: 6px;
      margin-bottom: 12px;
    }

    .filter {
      text-decoration: none;
      color: var(--muted);
      padding: 6px 12px;
      border-radius: 999px;
      background: rgba(35, 53, 42, 0.06);
    }

    .filter.active {
      background: var(--accent);
      color: white;
    }

    #taskList {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      gap: 8px;
    }

    .task {
      background: white;
      border-radius: 12px;
      padding: 10px;
    }

    .task.completed .task-name {
      text-decoration: line-through;
      color: var(--muted);
    }

    .task-meta {
      display: block;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .task form {
      display: inline;
    }

    .task-btn,
    .mood-btn,
    .primary {
      border: none;
      border-radius: 999px;
      padding: 6px 12px;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .task-delete {
      background: var(--accent-2);
    }

    .task-form {
      display: grid;
      gap: 8px;
      margin-bottom: 16px;
    }

    .donut-pending {
      fill: none;
      stroke: rgba(224, 122, 95, 0.35);
      stroke-width: 22;
    }

    .donut-completed {
      fill: none;
      stroke: var(--accent);
      stroke-width: 22;
    }

    .donut-label {
      font-size: 20px;
      font-weight: 700;
      fill: var(--ink);
    }

    .legend {
      list-style: none;
      padding: 0;
      display: flex;
      gap: 16px;
    }

    .swatch {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      margin-right: 6px;
    }

    .swatch-completed {
      background: var(--accent);
    }

    .swatch-pending {
      background: rgba(224, 122, 95, 0.6);
    }

    .modal {
      display: none;
      position: fixed;
      inset: 0;
      background: rgba(35, 53, 42, 0.4);
      z-index: 10;
      align-items: center;
      justify-content: center;
    }

    .modal-content {
      background: white;
      border-radius: 20px;
      padding: 24px;
      width: min(420px, 92%);
      margin: 10vh auto;
      display: grid;
      gap: 12px;
    }

    .mood-options {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .leaf {
      position: fixed;
      top: -40px;
      width: 18px;
      height: 18px;
      background: var(--bg-2);
      border-radius: 0 100% 0 100%;
      animation-name: fall;
      animation-timing-function: linear;
      animation-iteration-count: infinite;
      z-index: 0;
      pointer-events: none;
    }

    @keyframes fall {
      from {
        transform: translateY(0) rotate(0deg);
      }
      to {
        transform: translateY(110vh) rotate(360deg);
      }
    }

    @media (max-width: 800px) {
      .app {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  {{LEAVES}}
  <main class="app">
    <header>
      <h1>KALMA</h1>
      <button type="button" class="primary" onclick="openMoodTracker()">How are you feeling?</button>
    </header>

    <section class="card">
      <div class="calendar-header">
        <a class="nav" id="prevMonth" href="{{PREV_HREF}}" aria-label="Previous month">&lsaquo;</a>
        <h2 id="monthAndYear">{{MONTH_LABEL}}</h2>
        <a class="nav" id="nextMonth" href="{{NEXT_HREF}}" aria-label="Next month">&rsaquo;</a>
      </div>
      <div id="calendar">{{CALENDAR}}</div>
    </section>

    <aside>
      <section class="card">
        <h2>Tasks</h2>
        <form class="task-form" method="post" action="/tasks">
          <input name="task" placeholder="New task" required />
          <select name="category">
            <option>Personal</option>
            <option>Work</option>
            <option>School</option>
            <option>Health</option>
          </select>
          <input type="date" name="due_date" />
          <button type="submit" class="primary">Add task</button>
        </form>
        <nav class="filters">{{FILTERS}}</nav>
        <ul id="taskList">{{TASKS}}</ul>
      </section>
      {{CHART}}
    </aside>
  </main>

  <div class="modal" id="eventModal">
    <form class="modal-content" method="post" action="/add_event">
      <h2>New event</h2>
      <input type="date" id="eventDate" name="date" required />
      <input name="title" placeholder="Event title" required />
      <button type="submit" class="primary">Save</button>
      <button type="button" id="closeModal">Cancel</button>
    </form>
  </div>

  <div class="modal" id="moodModal">
    <div class="modal-content">
      <h2>Mood tracker</h2>
      <div class="mood-options">{{MOODS}}</div>
      <select id="mood">
        <option value="">Or pick from the list</option>
        {{MOOD_OPTIONS}}
      </select>
      <button type="button" onclick="closeMoodTracker()">Close</button>
    </div>
  </div>

  <script>
    const calendarEl = document.getElementById('calendar');
    const eventModal = document.getElementById('eventModal');
    const eventDateInput = document.getElementById('eventDate');
    const closeModal = document.getElementById('closeModal');

    const deleteEvent = async (button) => {
      try {
        const res = await fetch(`/delete_event/${button.dataset.date}/${button.dataset.index}`, {
          method: 'POST'
        });
        if (!res.ok) {
          alert((await res.text()) || 'Could not delete the event.');
        }
      } catch (err) {
        alert(`Could not delete the event: ${err.message}`);
      }
      location.reload();
    };

    calendarEl.addEventListener('click', (event) => {
      const deleteBtn = event.target.closest('.delete-event-btn');
      if (deleteBtn) {
        event.stopPropagation();
        if (confirm(`Delete event "${deleteBtn.dataset.title}"?`)) {
          deleteEvent(deleteBtn);
        }
        return;
      }

      const cell = event.target.closest('.calendar-day');
      if (cell) {
        eventDateInput.value = cell.dataset.date;
        eventModal.style.display = 'block';
      }
    });

    closeModal.addEventListener('click', () => {
      eventModal.style.display = 'none';
    });

    function openMoodTracker() {
      const modal = document.getElementById('moodModal');
      if (modal) modal.style.display = 'flex';
    }

    function closeMoodTracker() {
      const modal = document.getElementById('moodModal');
      if (modal) modal.style.display = 'none';
    }

    const showMood = async (mood) => {
      const res = await fetch(`/api/mood/${encodeURIComponent(mood)}`);
      if (!res.ok) {
        throw new Error('Unable to load a tip right now.');
      }
      const feedback = await res.json();
      alert(feedback.message);
    };

    document.querySelectorAll('.mood-btn').forEach((button) => {
      button.addEventListener('click', () => {
        showMood(button.dataset.mood)
          .catch((err) => alert(err.message))
          .finally(closeMoodTracker);
      });
    });

    const moodSelect = document.getElementById('mood');
    if (moodSelect) {
      moodSelect.addEventListener('change', () => {
        if (moodSelect.value) {
          showMood(moodSelect.value).catch((err) => alert(err.message));
        }
      });
    }
  </script>
</body>
</html>
"#;
