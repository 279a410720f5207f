use crate::app::App;
use crate::models::MessageId;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the UI loop has to do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Send(String),
    Inspire(MessageId),
    ExportImage,
}

pub fn handle_key(key: KeyEvent, app: &mut App) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('g') if ctrl => inspire(app),
        KeyCode::F(2) => inspire(app),
        KeyCode::Char('o') if ctrl => Action::ExportImage,
        KeyCode::Char('u') if ctrl => {
            app.input.clear();
            Action::None
        }
        KeyCode::Enter
            if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            if !app.is_sending() {
                app.input.push('\n');
            }
            Action::None
        }
        KeyCode::Enter => match app.submit_input() {
            Some(text) => Action::Send(text),
            None => Action::None,
        },
        KeyCode::PageUp => {
            app.scroll_up();
            Action::None
        }
        KeyCode::PageDown => {
            app.scroll_down();
            Action::None
        }
        KeyCode::Backspace => {
            if !app.is_sending() {
                app.input.pop();
            }
            Action::None
        }
        KeyCode::Char(c) if !ctrl => {
            // Input is locked while a reply is pending.
            if !app.is_sending() {
                app.input.push(c);
            }
            Action::None
        }
        _ => Action::None,
    }
}

fn inspire(app: &mut App) -> Action {
    match app.begin_inspiration() {
        Some(id) => Action::Inspire(id),
        None => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_key(press(KeyCode::Char(c)), app), Action::None);
        }
    }

    #[test]
    fn test_typing_and_enter_sends() {
        let mut app = App::new();
        type_text(&mut app, "Kigali?");
        handle_key(press(KeyCode::Backspace), &mut app);
        assert_eq!(app.input, "Kigali");

        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut app),
            Action::Send("Kigali".to_string())
        );
        assert_eq!(handle_key(press(KeyCode::Enter), &mut app), Action::None);
    }

    #[test]
    fn test_input_locked_while_sending() {
        let mut app = App::new();
        type_text(&mut app, "hi");
        handle_key(press(KeyCode::Enter), &mut app);

        type_text(&mut app, "more");
        assert!(app.input.is_empty());
        assert_eq!(handle_key(press(KeyCode::Enter), &mut app), Action::None);
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut app = App::new();
        type_text(&mut app, "a");
        handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT), &mut app);
        type_text(&mut app, "b");
        assert_eq!(app.input, "a\nb");
    }

    #[test]
    fn test_alt_enter_is_the_portable_newline() {
        let mut app = App::new();
        type_text(&mut app, "line one");
        handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT), &mut app);
        type_text(&mut app, "two");
        assert_eq!(app.input, "line one\ntwo");

        // A terminal without modifier reporting sends Shift+Enter as Enter.
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut app),
            Action::Send("line one\ntwo".to_string())
        );
    }

    #[test]
    fn test_control_keys() {
        let mut app = App::new();
        assert!(matches!(handle_key(ctrl('g'), &mut app), Action::Inspire(_)));
        assert_eq!(handle_key(press(KeyCode::F(2)), &mut app), Action::None);
        assert_eq!(handle_key(ctrl('o'), &mut app), Action::ExportImage);
        assert_eq!(handle_key(ctrl('c'), &mut app), Action::Quit);
        assert_eq!(handle_key(press(KeyCode::Esc), &mut app), Action::Quit);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = App::new();
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        handle_key(key, &mut app);
        assert!(app.input.is_empty());
    }
}
