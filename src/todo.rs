//! Todo entities and the in-memory store that owns them.
//!
//! The store is the single source of truth for a session. Callers read
//! through shared borrows and request every mutation by [`TodoId`].

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tasks every session starts with unless configuration overrides them.
pub const DEFAULT_SEED: [&str; 3] = ["Learn about Angular", "Use the CLI", "Profit!"];

/// Identifier of a todo, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TodoId {
    type Err = Error;

    /// Accepts positive integers only.
    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        match trimmed.parse::<u64>() {
            Ok(0) => Err(Error::InvalidArgument(
                "todo id must be a positive integer".to_string(),
            )),
            Ok(id) => Ok(TodoId(id)),
            Err(_) => Err(Error::InvalidArgument(format!(
                "invalid todo id '{trimmed}'"
            ))),
        }
    }
}

/// A single todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub task: String,
    pub created_on: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
}

impl TodoItem {
    pub fn is_complete(&self) -> bool {
        self.completed_on.is_some()
    }

    /// Completion time for done items, creation time otherwise.
    pub fn action_date(&self) -> DateTime<Utc> {
        self.completed_on.unwrap_or(self.created_on)
    }
}

/// Source of timestamps for the store.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    time: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            time: Mutex::new(time),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut time = self.time.lock().unwrap_or_else(|err| err.into_inner());
        *time += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.time.lock().unwrap_or_else(|err| err.into_inner())
    }
}

/// Open and done totals for a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TodoCounts {
    pub open: usize,
    pub done: usize,
}

/// In-memory owner of every todo in a session.
pub struct TodoStore {
    todos: Vec<TodoItem>,
    next_id: u64,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("todos", &self.todos)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl TodoStore {
    /// An empty store; the first added todo gets id 1.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
            clock,
        }
    }

    /// A store holding one incomplete todo per seed task, with ids 1..=n.
    /// Empty seed tasks are skipped.
    pub fn with_seed<I, S>(clock: Arc<dyn Clock>, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new(clock);
        for task in tasks {
            let _ = store.add(task.as_ref());
        }
        store
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// All todos in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> {
        self.todos.iter()
    }

    pub fn list_incomplete(&self) -> Vec<&TodoItem> {
        self.todos.iter().filter(|todo| !todo.is_complete()).collect()
    }

    pub fn list_complete(&self) -> Vec<&TodoItem> {
        self.todos.iter().filter(|todo| todo.is_complete()).collect()
    }

    pub fn counts(&self) -> TodoCounts {
        let done = self.todos.iter().filter(|todo| todo.is_complete()).count();
        TodoCounts {
            open: self.todos.len() - done,
            done,
        }
    }

    pub fn is_complete(&self, todo: &TodoItem) -> bool {
        todo.is_complete()
    }

    /// Append a new incomplete todo with the task text as given. Ids come
    /// from a counter that never goes backwards, so a deleted id is not
    /// handed out again.
    pub fn add(&mut self, task: &str) -> Result<TodoId> {
        if task.is_empty() {
            tracing::debug!("rejected empty task");
            return Err(Error::EmptyTask);
        }

        let id = TodoId(self.next_id);
        self.next_id += 1;
        self.todos.push(TodoItem {
            id,
            task: task.to_string(),
            created_on: self.clock.now(),
            completed_on: None,
        });
        tracing::debug!(%id, task, "added todo");
        Ok(id)
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn complete(&mut self, id: TodoId) -> Result<&TodoItem> {
        let now = self.clock.now();
        let todo = self.get_mut(id)?;
        todo.completed_on = Some(now);
        tracing::debug!(%id, "completed todo");
        Ok(&*todo)
    }

    pub fn mark_incomplete(&mut self, id: TodoId) -> Result<&TodoItem> {
        let todo = self.get_mut(id)?;
        todo.completed_on = None;
        tracing::debug!(%id, "reopened todo");
        Ok(&*todo)
    }

    pub fn toggle_complete(&mut self, id: TodoId) -> Result<&TodoItem> {
        let complete = self
            .get(id)
            .map(TodoItem::is_complete)
            .ok_or(Error::TodoNotFound(id))?;
        if complete {
            self.mark_incomplete(id)
        } else {
            self.complete(id)
        }
    }

    /// Remove a todo and hand it back to the caller.
    pub fn delete(&mut self, id: TodoId) -> Result<TodoItem> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(Error::TodoNotFound(id))?;
        let removed = self.todos.remove(index);
        tracing::debug!(%id, "deleted todo");
        Ok(removed)
    }

    fn get_mut(&mut self, id: TodoId) -> Result<&mut TodoItem> {
        self.todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(Error::TodoNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        ))
    }

    fn seeded() -> (TodoStore, Arc<FixedClock>) {
        let clock = clock();
        let store = TodoStore::with_seed(clock.clone(), DEFAULT_SEED);
        (store, clock)
    }

    fn ids(items: &[&TodoItem]) -> Vec<u64> {
        items.iter().map(|todo| todo.id.get()).collect()
    }

    #[test]
    fn seed_assigns_sequential_ids() {
        let (store, _) = seeded();
        assert_eq!(ids(&store.list_incomplete()), vec![1, 2, 3]);
        assert!(store.list_complete().is_empty());
        assert_eq!(store.get(TodoId::new(2)).unwrap().task, "Use the CLI");
    }

    #[test]
    fn add_rejects_empty_task() {
        let (mut store, _) = seeded();
        assert!(matches!(store.add(""), Err(Error::EmptyTask)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn add_keeps_task_text_verbatim() {
        let (mut store, _) = seeded();
        let padded = store.add("  Buy milk  ").unwrap();
        let blank = store.add("   ").unwrap();
        assert_eq!(store.get(padded).unwrap().task, "  Buy milk  ");
        assert_eq!(store.get(blank).unwrap().task, "   ");
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn add_appends_incomplete_todo_with_next_id() {
        let (mut store, clock) = seeded();
        clock.advance(Duration::minutes(5));
        let id = store.add("Buy milk").unwrap();
        assert_eq!(id, TodoId::new(4));
        let todo = store.get(id).unwrap();
        assert_eq!(todo.task, "Buy milk");
        assert_eq!(todo.created_on, clock.now());
        assert!(todo.completed_on.is_none());
        assert_eq!(ids(&store.list_incomplete()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn first_add_on_empty_store_gets_id_one() {
        let mut store = TodoStore::new(clock());
        assert_eq!(store.add("only").unwrap(), TodoId::new(1));
    }

    #[test]
    fn complete_then_mark_incomplete_restores_state() {
        let (mut store, clock) = seeded();
        let id = TodoId::new(2);
        clock.advance(Duration::hours(1));
        let done = store.complete(id).unwrap();
        assert!(done.is_complete());
        assert_eq!(done.completed_on, Some(clock.now()));
        assert_eq!(done.action_date(), clock.now());

        let reopened = store.mark_incomplete(id).unwrap();
        assert!(!reopened.is_complete());
        assert!(reopened.completed_on.is_none());
        assert_eq!(reopened.action_date(), reopened.created_on);
    }

    #[test]
    fn completing_partitions_listings_in_insertion_order() {
        let (mut store, _) = seeded();
        store.complete(TodoId::new(2)).unwrap();
        assert_eq!(ids(&store.list_incomplete()), vec![1, 3]);
        assert_eq!(ids(&store.list_complete()), vec![2]);
        assert_eq!(store.counts(), TodoCounts { open: 2, done: 1 });
    }

    #[test]
    fn toggle_flips_completion() {
        let (mut store, _) = seeded();
        let id = TodoId::new(1);
        assert!(store.toggle_complete(id).unwrap().is_complete());
        assert!(!store.toggle_complete(id).unwrap().is_complete());
    }

    #[test]
    fn mutations_on_unknown_id_report_not_found() {
        let (mut store, _) = seeded();
        let missing = TodoId::new(42);
        assert!(matches!(store.complete(missing), Err(Error::TodoNotFound(id)) if id == missing));
        assert!(matches!(store.mark_incomplete(missing), Err(Error::TodoNotFound(_))));
        assert!(matches!(store.toggle_complete(missing), Err(Error::TodoNotFound(_))));
        assert!(matches!(store.delete(missing), Err(Error::TodoNotFound(_))));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let (mut store, _) = seeded();
        let removed = store.delete(TodoId::new(1)).unwrap();
        assert_eq!(removed.task, "Learn about Angular");
        assert_eq!(store.len(), 2);
        assert!(store.get(TodoId::new(1)).is_none());
    }

    #[test]
    fn deleted_max_id_is_not_reused() {
        let (mut store, _) = seeded();
        store.delete(TodoId::new(3)).unwrap();
        assert_eq!(store.add("Ship it").unwrap(), TodoId::new(4));
    }

    #[test]
    fn todo_id_parses_positive_integers_only() {
        assert_eq!("7".parse::<TodoId>().unwrap(), TodoId::new(7));
        assert_eq!(" 12 ".parse::<TodoId>().unwrap(), TodoId::new(12));
        assert!("0".parse::<TodoId>().is_err());
        assert!("-1".parse::<TodoId>().is_err());
        assert!("abc".parse::<TodoId>().is_err());
    }

    #[test]
    fn serializes_without_unset_completion() {
        let (store, _) = seeded();
        let json = serde_json::to_value(store.get(TodoId::new(1)).unwrap()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["task"], "Learn about Angular");
        assert!(json.get("completed_on").is_none());
    }
}
