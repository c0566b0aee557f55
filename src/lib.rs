//! ticklist - a single-session todo list
//!
//! This library provides the core functionality for the ticklist CLI:
//! an in-memory todo store, a two-route navigation model, and the list
//! and detail pages that sit on top of them.
//!
//! # Core Concepts
//!
//! - **Todo**: a task with a creation time and an optional completion time
//! - **Store**: the only owner of todos; every edit goes through it
//! - **Routes**: `/` for the list, `/details/{id}` for one todo
//! - **Session**: one seeded store plus the current route
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.ticklist.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output for commands
//! - `page`: List and detail page models
//! - `route`: Path matching and redirects
//! - `session`: Session lifecycle and navigation
//! - `todo`: Todo entities and the in-memory store
//! - `ui`: Interactive terminal views

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod page;
pub mod route;
pub mod session;
pub mod todo;
pub mod ui;

pub use error::{Error, Result};
