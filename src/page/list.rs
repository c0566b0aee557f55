//! The list page: open and done partitions plus the "item to add" field.

use crate::error::Result;
use crate::todo::{TodoId, TodoStore};

pub const STILL_TO_DO_TITLE: &str = "Things still to do";
pub const DONE_TITLE: &str = "Things done";
pub const STILL_TO_DO_EMPTY: &str = "Nothing left to do!";
pub const DONE_EMPTY: &str = "Nothing done yet.";

#[derive(Debug, Default, Clone)]
pub struct ListPage {
    pub item_to_add: String,
    selected: usize,
}

impl ListPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the drafted item. The field is cleared whether or not the store
    /// accepted it.
    pub fn submit(&mut self, store: &mut TodoStore) -> Result<TodoId> {
        let task = std::mem::take(&mut self.item_to_add);
        store.add(&task)
    }

    /// Ids in display order: open items first, then done ones.
    pub fn visible_ids(store: &TodoStore) -> Vec<TodoId> {
        store
            .list_incomplete()
            .into_iter()
            .chain(store.list_complete())
            .map(|todo| todo.id)
            .collect()
    }

    /// Position of the cursor in [`ListPage::visible_ids`], clamped to the
    /// current number of items.
    pub fn cursor(&self, store: &TodoStore) -> Option<usize> {
        if store.is_empty() {
            None
        } else {
            Some(self.selected.min(store.len() - 1))
        }
    }

    pub fn selected_id(&self, store: &TodoStore) -> Option<TodoId> {
        let cursor = self.cursor(store)?;
        Self::visible_ids(store).get(cursor).copied()
    }

    pub fn move_selection(&mut self, delta: isize, store: &TodoStore) {
        let Some(cursor) = self.cursor(store) else {
            self.selected = 0;
            return;
        };
        let last = store.len() - 1;
        self.selected = cursor.saturating_add_signed(delta).min(last);
    }

    pub fn select(&mut self, id: TodoId, store: &TodoStore) {
        if let Some(pos) = Self::visible_ids(store).iter().position(|candidate| *candidate == id) {
            self.selected = pos;
        }
    }
}
