//! Command-line interface for ticklist
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::session::Session;
use crate::todo::SystemClock;

mod run;
mod show;

/// ticklist - a single-session todo list
///
/// Opens an interactive list/detail view over an in-memory todo list, or
/// drives one session non-interactively with `show` and `run`.
#[derive(Parser, Debug)]
#[command(name = "ticklist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file (defaults to ./.ticklist.toml)
    #[arg(long, global = true, env = "TICKLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive list and detail views (default)
    Ui {
        /// Path to open first, e.g. "/" or "/details/2"
        #[arg(long, default_value = "/")]
        route: String,
    },

    /// Print the page for a path over a freshly seeded session
    Show {
        /// Path to render, e.g. "/" or "/details/2"
        #[arg(default_value = "/")]
        path: String,
    },

    /// Run a session script and print the page it ends on
    Run {
        /// Script file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Stop at the first command that fails
        #[arg(long)]
        strict: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let config = Config::discover(self.config.as_deref(), &cwd)?;
        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let session = Session::start(&config, Arc::new(SystemClock));

        match self.command {
            None => crate::ui::run(session, &config, "/"),
            Some(Commands::Ui { route }) => crate::ui::run(session, &config, &route),
            Some(Commands::Show { path }) => show::run(session, &path, options),
            Some(Commands::Run { file, strict }) => run::run(session, file, strict, options),
        }
    }
}
