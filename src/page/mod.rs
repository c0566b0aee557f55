//! Page models behind each route, independent of how they are drawn.
//!
//! [`PageView`] is an owned snapshot of what a page shows. The CLI prints
//! it as text or JSON; the terminal UI draws from the live models.

pub mod detail;
pub mod list;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::todo::{TodoId, TodoItem, TodoStore};

pub use detail::{DetailPage, Resolved};
pub use list::ListPage;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The page model mounted for the current route.
#[derive(Debug, Clone)]
pub enum Page {
    List(ListPage),
    Detail(DetailPage),
}

/// Owned snapshot of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    List {
        still_to_do: Vec<TodoItem>,
        done: Vec<TodoItem>,
    },
    Detail {
        item: TodoItem,
    },
    NotFound {
        id: TodoId,
    },
}

impl PageView {
    pub fn capture(page: &Page, store: &TodoStore) -> Self {
        match page {
            Page::List(_) => PageView::List {
                still_to_do: store.list_incomplete().into_iter().cloned().collect(),
                done: store.list_complete().into_iter().cloned().collect(),
            },
            Page::Detail(detail) => match detail.resolve(store) {
                Resolved::Found(todo) => PageView::Detail { item: todo.clone() },
                Resolved::NotFound(id) => PageView::NotFound { id },
            },
        }
    }

    /// Plain-text rendering used by the non-interactive commands.
    pub fn lines(&self) -> Vec<String> {
        match self {
            PageView::List { still_to_do, done } => {
                let mut lines = Vec::new();
                push_section(
                    &mut lines,
                    list::STILL_TO_DO_TITLE,
                    list::STILL_TO_DO_EMPTY,
                    still_to_do,
                );
                lines.push(String::new());
                push_section(&mut lines, list::DONE_TITLE, list::DONE_EMPTY, done);
                lines
            }
            PageView::Detail { item } => detail_lines(item),
            PageView::NotFound { id } => vec![not_found_message(*id)],
        }
    }
}

pub fn not_found_message(id: TodoId) -> String {
    format!("Todo {id} not found")
}

pub fn format_date(value: DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// One list row: checkbox, id, task, and the date of the last action.
pub fn list_row(todo: &TodoItem) -> String {
    let mark = if todo.is_complete() { "x" } else { " " };
    format!(
        "[{mark}] {:>3}  {}  ({})",
        todo.id,
        todo.task,
        format_date(todo.action_date())
    )
}

pub fn detail_lines(todo: &TodoItem) -> Vec<String> {
    let status = if todo.is_complete() { "done" } else { "open" };
    let mut lines = vec![
        format!("#{} {}", todo.id, todo.task),
        format!("status: {status}"),
        format!("created: {}", format_date(todo.created_on)),
    ];
    if let Some(completed) = todo.completed_on {
        lines.push(format!("completed: {}", format_date(completed)));
    }
    lines
}

fn push_section(lines: &mut Vec<String>, title: &str, empty: &str, items: &[TodoItem]) {
    lines.push(format!("{title} ({})", items.len()));
    if items.is_empty() {
        lines.push(format!("  {empty}"));
        return;
    }
    for todo in items {
        lines.push(format!("  {}", list_row(todo)));
    }
}
