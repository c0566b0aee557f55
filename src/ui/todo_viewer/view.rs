use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::page::list::{DONE_EMPTY, DONE_TITLE, STILL_TO_DO_EMPTY, STILL_TO_DO_TITLE};
use crate::page::{self, DetailPage, ListPage, Page, Resolved};
use crate::route::Route;
use crate::todo::{TodoItem, TodoStore};

use super::app::{AppState, InputMode, StatusKind};

const HELP_KEY_WIDTH: usize = 12;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_DETAIL: Color = Color::Rgb(180, 156, 92);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);
    let header = chunks[0];
    let main = chunks[1];
    let footer = chunks[2];

    render_header(frame, app, header);

    let route = app.session.route();
    if app.is_narrow() {
        match app.session.page() {
            Page::List(list) => render_list(frame, app, list, main),
            Page::Detail(detail) => render_detail(frame, app.session.store(), detail, main),
        }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(main);
        match app.session.page() {
            Page::List(list) => {
                render_list(frame, app, list, chunks[0]);
                render_preview(frame, app.session.store(), list, chunks[1]);
            }
            Page::Detail(detail) => {
                let mut list = ListPage::new();
                list.select(detail.id(), app.session.store());
                render_list(frame, app, &list, chunks[0]);
                render_detail(frame, app.session.store(), detail, chunks[1]);
            }
        }
    }

    render_footer(frame, app, footer);

    if let Page::Detail(detail) = app.session.page() {
        if let Some(prompt) = detail.delete_prompt() {
            render_delete_confirm_modal(frame, area, &prompt);
        }
    }
    if app.show_help {
        render_help_modal(frame, area, route);
    }
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let route = app.session.route();
    let (label, color) = match route {
        Route::List => ("List", COLOR_INFO),
        Route::Detail(_) => ("Details", COLOR_ACCENT),
    };
    let mut spans = vec![
        Span::styled(
            "ticklist",
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            label,
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        Span::raw("  "),
    ];
    if app.input_mode == InputMode::Path {
        spans.push(Span::styled("go: ", Style::default().fg(COLOR_MUTED_DARK)));
        spans.push(Span::styled(
            format!("{}_", app.path_input),
            Style::default().fg(COLOR_WARNING),
        ));
    } else {
        spans.push(Span::styled(route.path(), Style::default().fg(COLOR_MUTED)));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_BG_MUTED)),
    );
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, app: &AppState, list: &ListPage, area: Rect) {
    let store = app.session.store();
    let content_width = area.width.saturating_sub(2) as usize;
    let selected = list.selected_id(store);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut selected_line = 0usize;

    let sections = [
        (STILL_TO_DO_TITLE, STILL_TO_DO_EMPTY, store.list_incomplete()),
        (DONE_TITLE, DONE_EMPTY, store.list_complete()),
    ];
    for (idx, (title, empty, items)) in sections.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.push(section_header(&format!("{title} ({})", items.len())));
        if items.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {empty}"),
                Style::default().fg(COLOR_MUTED_DARK),
            )));
            continue;
        }
        for todo in items {
            let is_selected = selected == Some(todo.id);
            if is_selected {
                selected_line = lines.len();
            }
            lines.push(render_list_row(todo, is_selected, content_width));
        }
    }

    let adding = app.input_mode == InputMode::Adding;
    let mut input_height = 0u16;
    if adding {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("add: ", Style::default().fg(COLOR_MUTED_DARK)),
            Span::styled(
                format!("{}_", app.item_to_add()),
                Style::default().fg(COLOR_WARNING),
            ),
        ]));
        input_height = 2;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = if adding {
        lines.len().saturating_sub(visible)
    } else {
        (selected_line + 1).saturating_sub(visible.saturating_sub(input_height as usize))
    };

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Todos")
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        )
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(widget, area);
}

fn render_preview(frame: &mut Frame, store: &TodoStore, list: &ListPage, area: Rect) {
    let content = match list.selected_id(store).and_then(|id| store.get(id)) {
        Some(todo) => build_detail_lines(todo),
        None => vec![Line::from(Span::styled(
            "No todo selected",
            Style::default().fg(COLOR_MUTED_DARK),
        ))],
    };
    let widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Preview")
                .border_style(Style::default().fg(COLOR_BG_MUTED)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_detail(frame: &mut Frame, store: &TodoStore, detail: &DetailPage, area: Rect) {
    let mut content = match detail.resolve(store) {
        Resolved::Found(todo) => build_detail_lines(todo),
        Resolved::NotFound(id) => vec![Line::from(Span::styled(
            page::not_found_message(id),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        ))],
    };
    content.push(Line::from(""));
    let hint = match detail.resolve(store) {
        Resolved::Found(_) => "space toggle  d delete  esc back",
        Resolved::NotFound(_) => "esc back to list",
    };
    content.push(Line::from(Span::styled(
        hint,
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Details")
                .border_style(Style::default().fg(COLOR_BORDER_DETAIL)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint = app.footer_hint();
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let counts_line = Line::from(Span::styled(
        app.count_summary(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, prompt: &str) {
    let content_width = area.width.saturating_sub(8).min(64);
    let height = 7u16.min(area.height.saturating_sub(4).max(5));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y/enter confirm  n/esc cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Delete Todo"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn render_help_modal(frame: &mut Frame, area: Rect, route: Route) {
    let entries: &[(&str, &str)] = match route {
        Route::List => &[
            ("j/k", "move selection"),
            ("g/G", "first / last"),
            ("pgup/pgdn", "jump half a page"),
            ("enter", "open details"),
            ("a", "add a todo"),
            (":", "go to a path"),
            ("esc/q", "quit"),
        ],
        Route::Detail(_) => &[
            ("space", "toggle done"),
            ("d", "delete"),
            ("esc", "back to list"),
            (":", "go to a path"),
            ("q", "quit"),
        ],
    };
    let height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
    let modal = centered_rect(44, height, area);
    frame.render_widget(Clear, modal);

    let mut lines: Vec<Line<'static>> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    pad_text(key, HELP_KEY_WIDTH),
                    Style::default().fg(COLOR_ACCENT),
                ),
                Span::styled(action.to_string(), Style::default().fg(COLOR_TEXT)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "any key to close",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(widget, modal);
}

fn build_detail_lines(todo: &TodoItem) -> Vec<Line<'static>> {
    let (status, status_color) = if todo.is_complete() {
        ("done", COLOR_SUCCESS)
    } else {
        ("to do", COLOR_WARNING)
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("#{} ", todo.id), Style::default().fg(COLOR_MUTED)),
            Span::styled(
                todo.task.clone(),
                Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            label_span("Status: "),
            Span::styled(status, Style::default().fg(status_color)),
        ]),
        Line::from(vec![
            label_span("Created: "),
            Span::raw(page::format_date(todo.created_on)),
        ]),
    ];
    if let Some(completed) = todo.completed_on {
        lines.push(Line::from(vec![
            label_span("Completed: "),
            Span::raw(page::format_date(completed)),
        ]));
    }
    lines
}

fn render_list_row(todo: &TodoItem, selected: bool, width: usize) -> Line<'static> {
    let (mark, mark_color) = if todo.is_complete() {
        ("[x]", COLOR_SUCCESS)
    } else {
        ("[ ]", COLOR_MUTED)
    };
    let id_text = format!("{:>3}", todo.id);
    let date = page::format_date(todo.action_date());
    let used = 2 + mark.len() + 1 + id_text.len() + 2 + 2 + date.len();
    let task = truncate_text(&todo.task, width.saturating_sub(used));
    let task_style = if todo.is_complete() {
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(COLOR_TEXT)
    };

    let mut spans = vec![
        Span::raw("  "),
        Span::styled(mark, Style::default().fg(mark_color)),
        Span::raw(" "),
        Span::styled(id_text, Style::default().fg(COLOR_MUTED_DARK)),
        Span::raw("  "),
        Span::styled(task, task_style),
        Span::raw("  "),
        Span::styled(date, Style::default().fg(COLOR_MUTED_DARK)),
    ];
    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }
    Line::from(spans)
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn label_span(label: &str) -> Span<'static> {
    Span::styled(label.to_string(), Style::default().fg(COLOR_MUTED_DARK))
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn pad_text(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}
