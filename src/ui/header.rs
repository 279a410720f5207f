use crate::constants::{APP_TITLE, GUIDE_NAME};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_header(f: &mut Frame<'_>, area: Rect) {
    let title = Line::from(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    ));
    let subtitle = Line::from(Span::styled(
        format!("{} · your guide to Rwanda and East Africa", GUIDE_NAME),
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::ITALIC),
    ));

    let header = Paragraph::new(vec![title, subtitle])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    f.render_widget(header, area);
}
