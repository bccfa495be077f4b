/*!
 * Scheme picker interface
 */

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use wifi_scheme::properties::{INTERFACE_CURRENT, SCHEME_ACTIVE, SCHEME_CURRENT};
use wifi_scheme::StatusTool;

use crate::app::{App, StatusMessage};

const BLUE: Color = Color::Rgb(100, 149, 237);
const GRAY: Color = Color::Rgb(128, 128, 128);
const WHITE: Color = Color::Rgb(255, 255, 255);
const GREEN: Color = Color::Rgb(34, 139, 34);
const RED: Color = Color::Rgb(220, 20, 60);

pub fn render_ui<T: StatusTool>(f: &mut Frame, app: &App<T>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter
            Constraint::Min(5),    // Schemes + state
            Constraint::Length(1), // Key help
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_filter(f, rows[0], app);
    render_schemes(f, body[0], app);
    render_state(f, body[1], app);
    render_help(f, rows[2]);
}

fn render_filter<T: StatusTool>(f: &mut Frame, area: Rect, app: &App<T>) {
    let width = area.width.saturating_sub(3) as usize;
    let scroll = app.filter.visual_scroll(width);
    let input = Paragraph::new(app.filter.value())
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter")
                .border_style(Style::default().fg(BLUE)),
        );
    f.render_widget(input, area);

    let cursor = app.filter.visual_cursor().max(scroll) - scroll;
    f.set_cursor_position((area.x + cursor as u16 + 1, area.y + 1));
}

fn render_schemes<T: StatusTool>(f: &mut Frame, area: Rect, app: &App<T>) {
    let current = app.record.scheme_current();
    let active = app.record.scheme_active().unwrap_or(false);

    let items: Vec<ListItem> = app
        .visible()
        .enumerate()
        .map(|(i, (scheme, score))| {
            let prefix = if i == app.selected { "▶ " } else { "  " };
            let is_current = current == Some(scheme.name.as_str());
            let (indicator, color) = match (is_current, active) {
                (true, true) => ("●", GREEN),
                (true, false) => ("◐", BLUE),
                _ => ("○", GRAY),
            };

            let content = Line::from(vec![
                Span::raw(prefix),
                Span::styled(indicator, Style::default().fg(color)),
                Span::raw(" "),
                Span::styled(scheme.name.clone(), Style::default().fg(WHITE).add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", scheme.interface), Style::default().fg(GRAY)),
                Span::styled(format!("  {}", scheme.target_ssid()), Style::default().fg(GRAY)),
                Span::styled(format!("  {:.2}", score), Style::default().fg(GRAY)),
            ]);

            if i == app.selected {
                ListItem::new(content).style(Style::default().bg(BLUE).fg(WHITE))
            } else {
                ListItem::new(content)
            }
        })
        .collect();

    let title = format!("Schemes ({})", app.visible_len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(GRAY)),
    );
    f.render_widget(list, area);
}

fn render_state<T: StatusTool>(f: &mut Frame, area: Rect, app: &App<T>) {
    let value = |key: &str| app.record.get(key).unwrap_or("-").to_string();
    let active_color = match app.record.scheme_active() {
        Some(true) => GREEN,
        Some(false) => RED,
        None => GRAY,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Interface: ", Style::default().fg(GRAY)),
            Span::styled(value(INTERFACE_CURRENT), Style::default().fg(WHITE)),
        ]),
        Line::from(vec![
            Span::styled("Scheme:    ", Style::default().fg(GRAY)),
            Span::styled(value(SCHEME_CURRENT), Style::default().fg(WHITE)),
        ]),
        Line::from(vec![
            Span::styled("Active:    ", Style::default().fg(GRAY)),
            Span::styled(value(SCHEME_ACTIVE), Style::default().fg(active_color)),
        ]),
        Line::from(""),
    ];

    match &app.message {
        Some(StatusMessage::Info(text)) => {
            lines.push(Line::from(Span::styled(text.clone(), Style::default().fg(GREEN))));
        }
        Some(StatusMessage::Error(text)) => {
            lines.push(Line::from(Span::styled(text.clone(), Style::default().fg(RED))));
        }
        None => {}
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Current State")
                .border_style(Style::default().fg(GRAY)),
        )
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("Enter", Style::default().fg(BLUE)),
        Span::raw(" activate  "),
        Span::styled("↑/↓", Style::default().fg(BLUE)),
        Span::raw(" select  "),
        Span::styled("Ctrl-R", Style::default().fg(BLUE)),
        Span::raw(" refresh  "),
        Span::styled("Esc", Style::default().fg(BLUE)),
        Span::raw(" quit"),
    ]);
    f.render_widget(Paragraph::new(help), area);
}
