//! Markdown-lite: bold, italic, inline code, line breaks and `* ` bullet
//! lists. Anything else passes through as text.
//!
//! Text is first split into blocks (text lines and list runs), then each line
//! is scanned for inline spans. The same token tree feeds both the markup
//! renderer and the terminal renderer.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Code(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(Vec<Inline>),
    List(Vec<Vec<Inline>>),
}

pub fn parse(text: &str) -> Vec<Block> {
    let lines = split_lines(text);
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(first) = list_item(lines[i]) else {
            blocks.push(Block::Text(scan_inline(lines[i])));
            i += 1;
            continue;
        };

        let mut items = vec![scan_inline(first)];
        i += 1;
        // Blank lines between two bullets do not split the list.
        loop {
            let mut next = i;
            while next < lines.len() && lines[next].trim().is_empty() {
                next += 1;
            }
            match lines.get(next).and_then(|line| list_item(line)) {
                Some(item) => {
                    items.push(scan_inline(item));
                    i = next + 1;
                }
                None => break,
            }
        }
        blocks.push(Block::List(items));
    }

    blocks
}

/// Renders to HTML-like markup. Text lines are joined with `<br />`; list
/// runs become a single `<ul>`.
pub fn render(text: &str) -> String {
    let mut html = String::new();
    let mut after_text = false;

    for block in parse(text) {
        match block {
            Block::Text(inlines) => {
                if after_text {
                    html.push_str("<br />");
                }
                push_markup(&mut html, &inlines);
                after_text = true;
            }
            Block::List(items) => {
                html.push_str("<ul>");
                for item in &items {
                    html.push_str("<li>");
                    push_markup(&mut html, item);
                    html.push_str("</li>");
                }
                html.push_str("</ul>");
                after_text = false;
            }
        }
    }

    html
}

/// Renders to styled terminal lines, one per text line or list item.
pub fn to_lines(text: &str, base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in parse(text) {
        match block {
            Block::Text(inlines) => {
                let mut spans = Vec::new();
                push_spans(&mut spans, &inlines, base);
                lines.push(Line::from(spans));
            }
            Block::List(items) => {
                for item in &items {
                    let mut spans = vec![Span::styled("  • ", base)];
                    push_spans(&mut spans, item, base);
                    lines.push(Line::from(spans));
                }
            }
        }
    }
    lines
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&text[start..]);
    lines
}

/// `<ws>* <content>`: the bullet needs at least one whitespace after it, so
/// a line opening with `**bold**` is not a list item.
fn list_item(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('*')?;
    let first = rest.chars().next()?;
    if first.is_whitespace() {
        Some(rest.trim())
    } else {
        None
    }
}

fn scan_inline(input: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        let span = match ch {
            '`' => code_span(rest),
            '*' => bold_span(rest).or_else(|| italic_span(rest)),
            _ => None,
        };

        match span {
            Some((inline, consumed)) => {
                if !text.is_empty() {
                    out.push(Inline::Text(std::mem::take(&mut text)));
                }
                out.push(inline);
                rest = &rest[consumed..];
            }
            None => {
                text.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    if !text.is_empty() {
        out.push(Inline::Text(text));
    }
    out
}

// Each span helper returns the token and the number of bytes it consumed.
// Empty spans never match, so stray delimiters stay literal.

fn code_span(s: &str) -> Option<(Inline, usize)> {
    let body = s.strip_prefix('`')?;
    let end = body.find('`').filter(|&end| end > 0)?;
    Some((Inline::Code(body[..end].to_string()), end + 2))
}

fn bold_span(s: &str) -> Option<(Inline, usize)> {
    let body = s.strip_prefix("**")?;
    let end = body.find("**").filter(|&end| end > 0)?;
    Some((Inline::Bold(scan_inline(&body[..end])), end + 4))
}

fn italic_span(s: &str) -> Option<(Inline, usize)> {
    let body = s.strip_prefix('*')?;
    let end = body.find('*').filter(|&end| end > 0)?;
    Some((Inline::Italic(scan_inline(&body[..end])), end + 2))
}

fn push_markup(html: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => push_escaped(html, text),
            Inline::Bold(inner) => {
                html.push_str("<strong>");
                push_markup(html, inner);
                html.push_str("</strong>");
            }
            Inline::Italic(inner) => {
                html.push_str("<em>");
                push_markup(html, inner);
                html.push_str("</em>");
            }
            Inline::Code(code) => {
                html.push_str("<code>");
                push_escaped(html, code);
                html.push_str("</code>");
            }
        }
    }
}

fn push_escaped(html: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            _ => html.push(ch),
        }
    }
}

fn push_spans(spans: &mut Vec<Span<'static>>, inlines: &[Inline], style: Style) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => spans.push(Span::styled(text.clone(), style)),
            Inline::Bold(inner) => push_spans(spans, inner, style.add_modifier(Modifier::BOLD)),
            Inline::Italic(inner) => {
                push_spans(spans, inner, style.add_modifier(Modifier::ITALIC))
            }
            Inline::Code(code) => spans.push(Span::styled(
                code.clone(),
                style.fg(Color::Rgb(209, 154, 102)),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_italic_and_code() {
        assert_eq!(render("**bold**"), "<strong>bold</strong>");
        assert_eq!(render("an *italic* word"), "an <em>italic</em> word");
        assert_eq!(render("run `cargo`"), "run <code>cargo</code>");
        assert_eq!(
            render("**Lake *Kivu* view**"),
            "<strong>Lake <em>Kivu</em> view</strong>"
        );
    }

    #[test]
    fn test_code_span_is_literal() {
        assert_eq!(render("`**not bold**`"), "<code>**not bold**</code>");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(render("a\nb\r\nc\rd"), "a<br />b<br />c<br />d");
        assert_eq!(render("a\n\nb"), "a<br /><br />b");
    }

    #[test]
    fn test_list_lines_merge_into_one_container() {
        assert_eq!(render("* a\n* b"), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(render("* a\n\n* b"), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(
            render("Tips:\n  * **Go** early\n* pack rain gear  \nEnjoy!"),
            "Tips:<ul><li><strong>Go</strong> early</li><li>pack rain gear</li></ul>Enjoy!"
        );
    }

    #[test]
    fn test_separate_lists_stay_separate() {
        assert_eq!(
            render("* a\nbreak\n* b"),
            "<ul><li>a</li></ul>break<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_bold_line_is_not_a_list_item() {
        assert_eq!(
            parse("**Lake Kivu**"),
            vec![Block::Text(vec![Inline::Bold(vec![Inline::Text(
                "Lake Kivu".to_string()
            )])])]
        );
    }

    #[test]
    fn test_unmatched_delimiters_stay_literal() {
        assert_eq!(render("2 * 3"), "2 * 3");
        assert_eq!(render("**open"), "**open");
        assert_eq!(render("``"), "``");
    }

    #[test]
    fn test_empty_and_escaping() {
        assert_eq!(render(""), "");
        assert_eq!(render("<b> & co"), "&lt;b&gt; &amp; co");
    }

    #[test]
    fn test_to_lines_styles_spans() {
        let lines = to_lines("**Kigali**\n* `bus`", Style::default());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(lines[1].spans[0].content, "  • ");
        assert_eq!(lines[1].spans[1].content, "bus");
        assert_eq!(lines[1].spans[1].style.fg, Some(Color::Rgb(209, 154, 102)));
    }
}
