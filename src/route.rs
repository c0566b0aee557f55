//! Navigation paths.
//!
//! `/` is the list page, `/details/{id}` the detail page for a positive
//! integer id. Anything else redirects to `/`.

use std::fmt;

use crate::todo::TodoId;

const DETAILS_SEGMENT: &str = "details";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(TodoId),
}

/// Result of matching a path against the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    pub redirected: bool,
}

impl Route {
    /// Match a path, falling back to the list page for unknown paths.
    pub fn parse(path: &str) -> Route {
        Self::resolve(path).route
    }

    pub fn resolve(path: &str) -> Resolution {
        match Self::match_path(path) {
            Some(route) => Resolution {
                route,
                redirected: false,
            },
            None => Resolution {
                route: Route::List,
                redirected: true,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/{DETAILS_SEGMENT}/{id}"),
        }
    }

    fn match_path(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Some(Route::List),
            [DETAILS_SEGMENT, id] => id.parse::<TodoId>().ok().map(Route::Detail),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_empty_are_list() {
        assert_eq!(Route::parse("/"), Route::List);
        assert_eq!(Route::parse(""), Route::List);
        assert!(!Route::resolve("/").redirected);
    }

    #[test]
    fn details_path_carries_id() {
        assert_eq!(Route::parse("/details/3"), Route::Detail(TodoId::new(3)));
        assert_eq!(Route::parse("details/3/"), Route::Detail(TodoId::new(3)));
        assert_eq!(Route::Detail(TodoId::new(3)).path(), "/details/3");
    }

    #[test]
    fn unmatched_paths_redirect_to_list() {
        for path in ["/nope", "/details", "/details/0", "/details/-2", "/details/x", "/details/1/edit"] {
            let resolution = Route::resolve(path);
            assert_eq!(resolution.route, Route::List, "{path}");
            assert!(resolution.redirected, "{path}");
        }
    }
}
