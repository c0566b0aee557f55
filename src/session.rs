//! An application session: one store, one current route.
//!
//! A session is seeded when it starts and everything it holds is dropped
//! with it. Pages never mutate todos directly; every change goes through
//! the session's store.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::page::{DetailPage, ListPage, Page, PageView};
use crate::route::{Resolution, Route};
use crate::todo::{Clock, TodoId, TodoItem, TodoStore};

#[derive(Debug)]
pub struct Session {
    store: TodoStore,
    route: Route,
    page: Page,
}

impl Session {
    /// Seed a store from configuration and open the list page.
    pub fn start(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let store = TodoStore::with_seed(clock, &config.seed);
        tracing::info!(todos = store.len(), "session started");
        Self::with_store(store)
    }

    pub fn with_store(store: TodoStore) -> Self {
        Self {
            store,
            route: Route::List,
            page: Page::List(ListPage::new()),
        }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TodoStore {
        &mut self.store
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Split borrow for callers that drive a page against the store.
    pub fn parts_mut(&mut self) -> (&mut Page, &mut TodoStore) {
        (&mut self.page, &mut self.store)
    }

    pub fn view(&self) -> PageView {
        PageView::capture(&self.page, &self.store)
    }

    /// Navigate to a path; unknown paths land on `/`.
    pub fn navigate(&mut self, path: &str) -> Resolution {
        let resolution = Route::resolve(path);
        if resolution.redirected {
            tracing::debug!(path, "unmatched path, redirecting to /");
        }
        self.go(resolution.route);
        resolution
    }

    pub fn go(&mut self, route: Route) {
        tracing::debug!(%route, "navigate");
        self.page = match route {
            Route::List => {
                let mut list = ListPage::new();
                if let Route::Detail(previous) = self.route {
                    list.select(previous, &self.store);
                }
                Page::List(list)
            }
            Route::Detail(id) => Page::Detail(DetailPage::new(id)),
        };
        self.route = route;
    }

    /// Submit the list page's draft field.
    pub fn submit_item(&mut self) -> Result<TodoId> {
        match &mut self.page {
            Page::List(list) => list.submit(&mut self.store),
            Page::Detail(_) => Err(wrong_page("add", self.route)),
        }
    }

    pub fn toggle_current(&mut self) -> Result<&TodoItem> {
        match &self.page {
            Page::Detail(detail) => detail.toggle_complete(&mut self.store),
            Page::List(_) => Err(wrong_page("toggle", self.route)),
        }
    }

    pub fn request_delete(&mut self) -> Result<String> {
        match &mut self.page {
            Page::Detail(detail) => {
                detail.request_delete(&self.store)?;
                Ok(detail.delete_prompt().unwrap_or_default())
            }
            Page::List(_) => Err(wrong_page("delete", self.route)),
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Page::Detail(detail) = &mut self.page {
            detail.cancel_delete();
        }
    }

    /// Finish a requested delete and return to the list page.
    pub fn confirm_delete(&mut self) -> Result<TodoItem> {
        let removed = match &mut self.page {
            Page::Detail(detail) => detail.confirm_delete(&mut self.store)?,
            Page::List(_) => return Err(wrong_page("delete", self.route)),
        };
        self.go(Route::List);
        Ok(removed)
    }
}

fn wrong_page(action: &str, route: Route) -> Error {
    Error::InvalidArgument(format!("{action} is not available on {route}"))
}
