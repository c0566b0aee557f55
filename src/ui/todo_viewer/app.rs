use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::{Config, UiConfig};
use crate::error::Result;
use crate::page::Page;
use crate::route::Route;
use crate::session::Session;

use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

/// What keystrokes currently feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    /// Typing into the list page's "item to add" field.
    Adding,
    /// Typing a path to navigate to.
    Path,
}

#[derive(Default, Clone, Copy)]
struct Viewport {
    width: u16,
    height: u16,
}

pub struct AppState {
    pub(crate) session: Session,
    pub(crate) input_mode: InputMode,
    pub(crate) path_input: String,
    pub(crate) show_help: bool,
    status: Option<(String, StatusKind)>,
    viewport: Viewport,
    config: UiConfig,
}

impl AppState {
    pub fn new(session: Session, config: &UiConfig) -> Self {
        Self {
            session,
            input_mode: InputMode::Normal,
            path_input: String::new(),
            show_help: false,
            status: None,
            viewport: Viewport::default(),
            config: config.clone(),
        }
    }

    pub(crate) fn update_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    pub(crate) fn is_narrow(&self) -> bool {
        self.viewport.width > 0 && self.viewport.width < self.config.narrow_width
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        self.status.clone()
    }

    pub(crate) fn item_to_add(&self) -> &str {
        match self.session.page() {
            Page::List(list) => &list.item_to_add,
            Page::Detail(_) => "",
        }
    }

    pub(crate) fn footer_hint(&self) -> String {
        match self.input_mode {
            InputMode::Adding => return "type task  enter add  esc cancel".to_string(),
            InputMode::Path => return "type path  enter go  esc cancel".to_string(),
            InputMode::Normal => {}
        }
        match self.session.page() {
            Page::Detail(detail) if detail.is_confirming_delete() => {
                "y/enter confirm delete  n/esc cancel".to_string()
            }
            Page::Detail(_) => {
                "space toggle  d delete  esc back  : go to path  ? help  q quit".to_string()
            }
            Page::List(_) => {
                "j/k move  enter details  a add  : go to path  ? help  esc/q quit".to_string()
            }
        }
    }

    pub(crate) fn count_summary(&self) -> String {
        let counts = self.session.store().counts();
        format!("to do: {}  done: {}", counts.open, counts.done)
    }

    fn set_error(&mut self, message: String) {
        self.status = Some((message, StatusKind::Error));
    }

    fn set_info(&mut self, message: String) {
        self.status = Some((message, StatusKind::Info));
    }

    /// Half of the list rows that fit on screen.
    fn list_jump(&self) -> isize {
        let rows = self.viewport.height.saturating_sub(7);
        (rows / 2).max(1) as isize
    }

    fn move_selection(&mut self, delta: isize) {
        let (page, store) = self.session.parts_mut();
        if let Page::List(list) = page {
            list.move_selection(delta, store);
        }
    }

    fn open_selected(&mut self) {
        let selected = match self.session.page() {
            Page::List(list) => list.selected_id(self.session.store()),
            Page::Detail(_) => None,
        };
        match selected {
            Some(id) => self.session.go(Route::Detail(id)),
            None => self.set_error("no todo selected".to_string()),
        }
    }

    fn edit_draft(&mut self, edit: impl FnOnce(&mut String)) {
        match self.input_mode {
            InputMode::Adding => {
                let (page, _) = self.session.parts_mut();
                if let Page::List(list) = page {
                    edit(&mut list.item_to_add);
                }
            }
            InputMode::Path => edit(&mut self.path_input),
            InputMode::Normal => {}
        }
    }

    fn submit_draft(&mut self) {
        match self.input_mode {
            InputMode::Adding => match self.session.submit_item() {
                Ok(id) => {
                    let (page, store) = self.session.parts_mut();
                    if let Page::List(list) = page {
                        list.select(id, store);
                    }
                    self.set_info(format!("added {id}"));
                }
                Err(err) => self.set_error(err.to_string()),
            },
            InputMode::Path => {
                let path = std::mem::take(&mut self.path_input);
                let resolution = self.session.navigate(&path);
                if resolution.redirected {
                    self.set_info(format!("no page at '{}', showing /", path.trim()));
                }
            }
            InputMode::Normal => {}
        }
        self.input_mode = InputMode::Normal;
    }

    fn cancel_draft(&mut self) {
        self.edit_draft(String::clear);
        self.input_mode = InputMode::Normal;
    }

    fn toggle_current(&mut self) {
        let outcome = self
            .session
            .toggle_current()
            .map(|todo| (todo.id, todo.is_complete()));
        match outcome {
            Ok((id, true)) => self.set_info(format!("marked {id} done")),
            Ok((id, false)) => self.set_info(format!("marked {id} to do")),
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn delete_current(&mut self) {
        if let Err(err) = self.session.request_delete() {
            self.set_error(err.to_string());
        }
    }

    fn confirm_delete(&mut self) {
        match self.session.confirm_delete() {
            Ok(removed) => self.set_info(format!("deleted \"{}\"", removed.task)),
            Err(err) => self.set_error(err.to_string()),
        }
    }
}

pub fn run(mut session: Session, config: &Config, path: &str) -> Result<()> {
    session.navigate(path);
    let mut app = AppState::new(session, &config.ui);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;
    app.update_viewport(size.width, size.height);

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| {
                app.update_viewport(frame.size().width, frame.size().height);
                view::render(frame, app);
            })?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(width, height) => {
                    app.update_viewport(width, height);
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Apply one key press. Returns true when the app should exit.
pub(crate) fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.input_mode != InputMode::Normal {
        match key.code {
            KeyCode::Esc => app.cancel_draft(),
            KeyCode::Enter => app.submit_draft(),
            KeyCode::Backspace => app.edit_draft(|draft| {
                draft.pop();
            }),
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) && !ch.is_control() {
                    app.edit_draft(|draft| draft.push(ch));
                }
            }
            _ => {}
        }
        return false;
    }

    let confirming = matches!(
        app.session.page(),
        Page::Detail(detail) if detail.is_confirming_delete()
    );
    if confirming {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                app.session.cancel_delete();
                app.set_info("cancelled".to_string());
            }
            _ => {}
        }
        return false;
    }

    if app.show_help {
        app.show_help = false;
        return key.code == KeyCode::Char('q');
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            app.show_help = true;
            return false;
        }
        KeyCode::Char(':') => {
            app.path_input = app.session.route().path();
            app.input_mode = InputMode::Path;
            return false;
        }
        _ => {}
    }

    match app.session.route() {
        Route::List => match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => app.move_selection(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => app.move_selection(isize::MAX),
            KeyCode::PageDown => app.move_selection(app.list_jump()),
            KeyCode::PageUp => app.move_selection(-app.list_jump()),
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.open_selected(),
            KeyCode::Char('a') | KeyCode::Char('n') => app.input_mode = InputMode::Adding,
            _ => {}
        },
        Route::Detail(_) => match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
                app.session.go(Route::List)
            }
            KeyCode::Char(' ') | KeyCode::Char('t') | KeyCode::Char('x') => app.toggle_current(),
            KeyCode::Char('d') => app.delete_current(),
            _ => {}
        },
    }
    false
}
