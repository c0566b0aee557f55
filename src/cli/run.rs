//! `ticklist run`: replay a script of edits against one session.
//!
//! One command per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! add Ship it
//! complete 2
//! incomplete 2
//! toggle 3
//! delete 1
//! go /details/4
//! show
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::page::PageView;
use crate::session::Session;
use crate::todo::TodoId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add(String),
    Complete(TodoId),
    Incomplete(TodoId),
    Toggle(TodoId),
    Delete(TodoId),
    Go(String),
    Show,
}

impl ScriptCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptCommand::Add(_) => "add",
            ScriptCommand::Complete(_) => "complete",
            ScriptCommand::Incomplete(_) => "incomplete",
            ScriptCommand::Toggle(_) => "toggle",
            ScriptCommand::Delete(_) => "delete",
            ScriptCommand::Go(_) => "go",
            ScriptCommand::Show => "show",
        }
    }
}

/// Parse a whole script up front so a typo fails before anything runs.
/// Returned pairs carry 1-based line numbers.
pub fn parse_script(text: &str) -> Result<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };
        let command = match word.to_ascii_lowercase().as_str() {
            "add" => ScriptCommand::Add(rest.to_string()),
            "complete" | "done" => ScriptCommand::Complete(parse_id(line, rest)?),
            "incomplete" | "reopen" => ScriptCommand::Incomplete(parse_id(line, rest)?),
            "toggle" => ScriptCommand::Toggle(parse_id(line, rest)?),
            "delete" | "rm" => ScriptCommand::Delete(parse_id(line, rest)?),
            "go" if rest.is_empty() => ScriptCommand::Go("/".to_string()),
            "go" => ScriptCommand::Go(rest.to_string()),
            "show" if rest.is_empty() => ScriptCommand::Show,
            "show" => {
                return Err(Error::InvalidScript {
                    line,
                    message: "show takes no arguments".to_string(),
                })
            }
            other => {
                return Err(Error::InvalidScript {
                    line,
                    message: format!("unknown command '{other}'"),
                })
            }
        };
        commands.push((line, command));
    }
    Ok(commands)
}

fn parse_id(line: usize, value: &str) -> Result<TodoId> {
    if value.is_empty() {
        return Err(Error::InvalidScript {
            line,
            message: "missing todo id".to_string(),
        });
    }
    value.parse().map_err(|err: Error| Error::InvalidScript {
        line,
        message: match err {
            Error::InvalidArgument(message) => message,
            other => other.to_string(),
        },
    })
}

#[derive(Serialize)]
struct StepReport {
    line: usize,
    command: &'static str,
    status: &'static str,
    message: String,
}

#[derive(Serialize)]
struct Snapshot {
    line: usize,
    route: String,
    view: PageView,
}

#[derive(Serialize)]
struct RunReport {
    applied: usize,
    failed: usize,
    steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    snapshots: Vec<Snapshot>,
    route: String,
    view: PageView,
}

pub fn run(
    mut session: Session,
    file: Option<PathBuf>,
    strict: bool,
    options: OutputOptions,
) -> Result<()> {
    let text = read_script(file.as_deref())?;
    let commands = parse_script(&text)?;
    tracing::info!(commands = commands.len(), strict, "running script");

    let mut steps = Vec::with_capacity(commands.len());
    let mut snapshots = Vec::new();
    let mut warnings = Vec::new();
    let mut applied = 0usize;

    for (line, command) in &commands {
        if *command == ScriptCommand::Show {
            snapshots.push(Snapshot {
                line: *line,
                route: session.route().path(),
                view: session.view(),
            });
            continue;
        }

        match apply(&mut session, command) {
            Ok(message) => {
                applied += 1;
                steps.push(StepReport {
                    line: *line,
                    command: command.name(),
                    status: "ok",
                    message,
                });
            }
            Err(err) if strict => return Err(err),
            Err(err) => {
                tracing::warn!(line, %err, "script command failed");
                warnings.push(format!("line {line}: {err}"));
                steps.push(StepReport {
                    line: *line,
                    command: command.name(),
                    status: "failed",
                    message: err.to_string(),
                });
            }
        }
    }

    let route = session.route().path();
    let view = session.view();

    let mut human = HumanOutput::new(route.clone());
    for snapshot in &snapshots {
        human.push_line(format!("-- line {}: {}", snapshot.line, snapshot.route));
        human.extend_lines(snapshot.view.lines());
        human.push_line("");
    }
    if !snapshots.is_empty() {
        human.push_line(format!("-- end: {route}"));
    }
    human.extend_lines(view.lines());
    human.push_summary("applied", applied.to_string());
    human.push_summary("failed", warnings.len().to_string());
    for warning in &warnings {
        human.push_warning(warning.clone());
    }

    let report = RunReport {
        applied,
        failed: warnings.len(),
        steps,
        snapshots,
        route,
        view,
    };
    emit_success(options, "run", &report, Some(&human))
}

fn apply(session: &mut Session, command: &ScriptCommand) -> Result<String> {
    match command {
        ScriptCommand::Add(task) => {
            let id = session.store_mut().add(task)?;
            Ok(format!("added {id}"))
        }
        ScriptCommand::Complete(id) => {
            session.store_mut().complete(*id)?;
            Ok(format!("completed {id}"))
        }
        ScriptCommand::Incomplete(id) => {
            session.store_mut().mark_incomplete(*id)?;
            Ok(format!("reopened {id}"))
        }
        ScriptCommand::Toggle(id) => {
            let todo = session.store_mut().toggle_complete(*id)?;
            let state = if todo.is_complete() { "done" } else { "open" };
            Ok(format!("toggled {id} to {state}"))
        }
        ScriptCommand::Delete(id) => {
            let removed = session.store_mut().delete(*id)?;
            Ok(format!("deleted {} \"{}\"", removed.id, removed.task))
        }
        ScriptCommand::Go(path) => {
            let resolution = session.navigate(path);
            if resolution.redirected {
                Ok(format!("no page at '{path}', redirected to /"))
            } else {
                Ok(format!("at {}", resolution.route))
            }
        }
        ScriptCommand::Show => Ok(String::new()),
    }
}

fn read_script(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => Ok(io::read_to_string(io::stdin())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_line_numbers() {
        let script = "# setup\nadd Ship it\n\ncomplete 2\nreopen 2\ngo /details/4\nshow\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                (2, ScriptCommand::Add("Ship it".to_string())),
                (4, ScriptCommand::Complete(TodoId::new(2))),
                (5, ScriptCommand::Incomplete(TodoId::new(2))),
                (6, ScriptCommand::Go("/details/4".to_string())),
                (7, ScriptCommand::Show),
            ]
        );
    }

    #[test]
    fn bare_add_parses_as_empty_task() {
        let commands = parse_script("add").unwrap();
        assert_eq!(commands, vec![(1, ScriptCommand::Add(String::new()))]);
    }

    #[test]
    fn unknown_command_reports_line() {
        let err = parse_script("add a\nfrobnicate 3\n").unwrap_err();
        assert!(matches!(err, Error::InvalidScript { line: 2, .. }));
    }

    #[test]
    fn bad_ids_are_script_errors() {
        for script in ["complete", "delete zero", "toggle 0"] {
            let err = parse_script(script).unwrap_err();
            assert!(matches!(err, Error::InvalidScript { line: 1, .. }), "{script}");
        }
    }
}
