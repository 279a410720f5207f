use crate::app::App;
use crate::chat_message::{render_message, render_typing};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draws the transcript, pinned to the bottom unless the user scrolled up.
pub fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in app.store.iter() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(render_message(message, inner.width));
    }
    if app.awaiting_reply() {
        lines.push(Line::default());
        lines.extend(render_typing(app.status_indicator.frame()));
    }

    let max_scroll = lines.len().saturating_sub(inner.height as usize);
    app.clamp_scroll(max_scroll.min(u16::MAX as usize) as u16);

    let transcript = Paragraph::new(lines).block(block).scroll((app.scroll, 0));
    f.render_widget(transcript, area);
}

pub fn draw_error(f: &mut Frame<'_>, area: Rect, error: &str) {
    let banner = Paragraph::new(error)
        .style(Style::default().fg(Color::LightRed))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(banner, area);
}

pub fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let (title, style) = if !app.is_ready() {
        ("Chat unavailable", Style::default().fg(Color::DarkGray))
    } else if app.is_sending() {
        (
            "Waiting for Tura...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        (
            "Ask about your next destination",
            Style::default().fg(Color::LightYellow),
        )
    };

    let rows = area.height.saturating_sub(2) as usize;
    let all: Vec<&str> = app.input.split('\n').collect();
    let visible = &all[all.len().saturating_sub(rows.max(1))..];

    let input = Paragraph::new(visible.join("\n"))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    if app.is_ready() && !app.is_sending() {
        let last = visible.last().copied().unwrap_or_default();
        let x = (area.x + 1 + last.width() as u16).min(area.right().saturating_sub(2));
        let y = area.y + visible.len() as u16;
        f.set_cursor_position((x, y));
    }
}
