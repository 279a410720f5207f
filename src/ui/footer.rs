use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Draws the footer with key hints for the current state.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let footer = Paragraph::new(instructions(app))
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn instructions(app: &App) -> String {
    // Plain terminals cannot report Shift on Enter.
    let newline = if app.keyboard_enhanced {
        "Shift+Enter"
    } else {
        "Alt+Enter"
    };

    if !app.is_ready() {
        "Chat is unavailable. Esc to quit.".to_string()
    } else if app.is_sending() {
        "Waiting for Tura... Ctrl+G inspire, PgUp/PgDn scroll, Esc quit.".to_string()
    } else if app.is_inspiring() {
        format!("Enter send, {} newline, PgUp/PgDn scroll, Esc quit.", newline)
    } else {
        format!(
            "Enter send, {} newline, Ctrl+G inspire, Ctrl+O open image, Esc quit.",
            newline
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_hint_follows_keyboard_support() {
        let mut app = App::new();
        let plain = instructions(&app);
        assert!(plain.contains("Alt+Enter newline"));
        assert!(!plain.contains("Shift+Enter"));

        app.keyboard_enhanced = true;
        assert!(instructions(&app).contains("Shift+Enter newline"));
    }
}
