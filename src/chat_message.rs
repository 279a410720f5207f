use crate::constants::GUIDE_NAME;
use crate::markdown;
use crate::models::{Message, Role};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TYPING_FRAMES: [&str; 3] = ["●  ", "●● ", "●●●"];

/// Renders one message as a bubble: header, wrapped markdown body, image
/// state, footer.
pub fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let style = base_style(message.role);
    let indent = indent_for(message.role);
    let inner_width = body_width(width, indent);

    let mut lines = vec![render_header(message, style, indent)];

    for line in markdown::to_lines(&message.text, style) {
        for wrapped in wrap_line(line, inner_width) {
            lines.push(with_gutter(wrapped, style, indent));
        }
    }

    if message.is_loading_image {
        lines.push(with_gutter(
            Line::from(Span::styled(
                "▒▒▒ painting the view...",
                style.add_modifier(Modifier::DIM),
            )),
            style,
            indent,
        ));
    } else if message.image_url.is_some() {
        lines.push(with_gutter(
            Line::from(Span::styled(
                "▣ image ready (Ctrl+O to open)",
                style.add_modifier(Modifier::BOLD),
            )),
            style,
            indent,
        ));
    }

    lines.push(render_footer(style, indent));
    lines
}

/// The transient bubble shown while the guide is composing a reply.
pub fn render_typing(frame: usize) -> Vec<Line<'static>> {
    let style = base_style(Role::Model).add_modifier(Modifier::DIM);
    vec![
        Line::from(vec![
            Span::styled("┌─ ", style),
            Span::styled(GUIDE_NAME, style),
        ]),
        with_gutter(
            Line::from(Span::styled(
                TYPING_FRAMES[frame % TYPING_FRAMES.len()],
                style,
            )),
            style,
            "",
        ),
        render_footer(style, ""),
    ]
}

fn base_style(role: Role) -> Style {
    Style::default().fg(match role {
        Role::User => Color::Rgb(255, 223, 128),
        Role::Model => Color::Rgb(144, 238, 144),
    })
}

fn indent_for(role: Role) -> &'static str {
    match role {
        Role::User => "  ",
        Role::Model => "",
    }
}

fn body_width(width: u16, indent: &str) -> usize {
    (width as usize).saturating_sub(indent.len() + 2).max(1)
}

fn render_header(message: &Message, style: Style, indent: &str) -> Line<'static> {
    let label = match message.role {
        Role::User => "You",
        Role::Model => GUIDE_NAME,
    };
    Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─ ", style),
        Span::styled(label, style.add_modifier(Modifier::BOLD)),
        Span::styled(" ", style),
        Span::styled(
            message.created_at.format("%H:%M").to_string(),
            style.add_modifier(Modifier::DIM),
        ),
    ])
}

fn render_footer(style: Style, indent: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─", style),
    ])
}

fn with_gutter(line: Line<'static>, style: Style, indent: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled(indent.to_string(), style),
        Span::styled("│ ", style),
    ];
    spans.extend(line.spans);
    Line::from(spans)
}

/// Word-wraps a styled line to `width` columns, splitting words that are
/// longer than a whole row.
pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in line.spans {
        let style = span.style;
        for piece in span.content.split_inclusive(' ') {
            let mut word = piece.to_string();
            let mut word_width = word.width();

            while current_width + word_width > width {
                if current_width > 0 {
                    out.push(Line::from(std::mem::take(&mut current)));
                    current_width = 0;
                    word = word.trim_start().to_string();
                    word_width = word.width();
                    continue;
                }
                let (head, tail) = split_at_width(&word, width);
                out.push(Line::from(Span::styled(head, style)));
                word = tail;
                word_width = word.width();
            }

            if !word.is_empty() {
                current_width += word_width;
                current.push(Span::styled(word, style));
            }
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(Line::from(current));
    }
    out
}

/// Splits off a prefix no wider than `width`, always taking at least one char.
fn split_at_width(word: &str, width: usize) -> (String, String) {
    let mut taken = 0;
    let mut split = 0;
    for (idx, ch) in word.char_indices() {
        let w = ch.width().unwrap_or(0);
        if taken + w > width && split > 0 {
            break;
        }
        taken += w;
        split = idx + ch.len_utf8();
    }
    (word[..split].to_string(), word[split..].to_string())
}
