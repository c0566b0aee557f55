//! The detail page for a single todo.

use crate::error::{Error, Result};
use crate::todo::{TodoId, TodoItem, TodoStore};

/// Outcome of looking up the page's todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Found(&'a TodoItem),
    NotFound(TodoId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    id: TodoId,
    pending_delete: Option<String>,
}

impl DetailPage {
    pub fn new(id: TodoId) -> Self {
        Self {
            id,
            pending_delete: None,
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn resolve<'a>(&self, store: &'a TodoStore) -> Resolved<'a> {
        match store.get(self.id) {
            Some(todo) => Resolved::Found(todo),
            None => Resolved::NotFound(self.id),
        }
    }

    pub fn toggle_complete<'a>(&self, store: &'a mut TodoStore) -> Result<&'a TodoItem> {
        store.toggle_complete(self.id)
    }

    /// Start the delete confirmation for this page's todo.
    pub fn request_delete(&mut self, store: &TodoStore) -> Result<()> {
        let todo = store.get(self.id).ok_or(Error::TodoNotFound(self.id))?;
        self.pending_delete = Some(todo.task.clone());
        Ok(())
    }

    pub fn delete_prompt(&self) -> Option<String> {
        self.pending_delete
            .as_ref()
            .map(|task| format!("Are you sure you want to delete \"{task}\"?"))
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the todo after [`DetailPage::request_delete`].
    pub fn confirm_delete(&mut self, store: &mut TodoStore) -> Result<TodoItem> {
        if self.pending_delete.take().is_none() {
            return Err(Error::InvalidArgument(format!(
                "delete of {} was not requested",
                self.id
            )));
        }
        store.delete(self.id)
    }
}
