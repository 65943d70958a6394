use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use twindeck::library::track_title;

use super::app::App;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // File list + now playing
            Constraint::Length(1), // Message
            Constraint::Length(1), // Controls
        ])
        .split(size);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    draw_file_list(f, panes[0], app);
    draw_now_playing(f, panes[1], app);

    if let Some(message) = &app.message {
        let message = Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(message, rows[1]);
    }

    draw_controls(f, rows[2]);
}

fn draw_file_list(f: &mut Frame, area: Rect, app: &App) {
    let mut items = vec![ListItem::new(Line::from(vec![Span::styled(
        format!("▶ Play all ({})", app.files.len()),
        Style::default().fg(Color::Yellow),
    )]))];

    items.extend(app.files.iter().enumerate().map(|(index, path)| {
        let style = if app.is_playing_entry(index) {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let marker = if app.is_playing_entry(index) { "♪ " } else { "  " };
        ListItem::new(Line::from(vec![
            Span::raw(marker),
            Span::styled(track_title(path), style),
        ]))
    }));

    let title = format!(" {} ", app.directory.display());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Red)),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_now_playing(f: &mut Frame, area: Rect, app: &App) {
    let status = &app.status;
    let label = Style::default().fg(Color::Yellow);

    let file = status
        .current_path
        .as_deref()
        .map(track_title)
        .unwrap_or_else(|| "None".to_string());

    let state = match (&status.current_path, status.paused) {
        (_, true) => "||",
        (Some(_), false) => "|>",
        (None, false) => "■",
    };

    let mut lines = vec![
        Line::from(vec![Span::styled("File: ", label), Span::raw(file)]),
        Line::from(vec![Span::styled("Status: ", label), Span::raw(state)]),
    ];

    if status.auto_advance {
        let position = status
            .current_index
            .map(|index| format!("{}/{}", index + 1, status.playlist_length))
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(vec![
            Span::styled("Track: ", label),
            Span::raw(position),
        ]));

        let next = status
            .next_path
            .as_deref()
            .map(track_title)
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(vec![
            Span::styled("Next: ", label),
            Span::styled(next, Style::default().fg(Color::DarkGray)),
        ]));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Now Playing "),
    );
    f.render_widget(panel, area);
}

fn draw_controls(f: &mut Frame, area: Rect) {
    let controls = vec![
        Span::styled("[↑↓]", Style::default().fg(Color::Magenta)),
        Span::raw(" navigate  "),
        Span::styled("[enter]", Style::default().fg(Color::Green)),
        Span::raw(" select  "),
        Span::styled("[space]", Style::default().fg(Color::Yellow)),
        Span::raw(" pause  "),
        Span::styled("[,/.]", Style::default().fg(Color::Blue)),
        Span::raw(" skip  "),
        Span::styled("[s]", Style::default().fg(Color::Cyan)),
        Span::raw(" stop  "),
        Span::styled("[q]", Style::default().fg(Color::Red)),
        Span::raw(" quit"),
    ];

    let widget = Paragraph::new(Line::from(controls)).alignment(Alignment::Center);
    f.render_widget(widget, area);
}
