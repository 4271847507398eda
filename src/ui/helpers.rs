use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Song;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Build the field-by-field lines shown in the song detail panel.
pub(crate) fn song_detail_lines(song: &Song) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(Color::DarkGray);
    let field = |name: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{name:>9}: "), label_style),
            Span::raw(value.to_string()),
        ])
    };
    vec![
        field("Id", &song.id.to_string()),
        field("Title", &song.title),
        field("Artist", &song.artist),
        field("Album", &song.album),
        field("Genre", &song.genre),
        field("Length", &song.length),
        field("Filename", &song.filename),
    ]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
