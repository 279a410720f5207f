// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;

use crate::{
    app::{App, AppEvent},
    context::AppContext,
    errors::TuraError,
    key_handlers::{handle_key, Action},
};
use crossterm::{
    event::{
        Event as CEvent, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time;

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_INPUT_ROWS: u16 = 4;

/// Runs the terminal UI until the user quits. Without a context the app
/// still renders, with the remote features disabled.
pub async fn run(mut app: App, context: Option<AppContext>) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Without the kitty protocol most terminals send Shift+Enter as a bare Enter.
    app.keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if app.keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    log::debug!("Keyboard enhancement: {}", app.keyboard_enhanced);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, context.as_ref()).await;

    // Restore terminal
    if app.keyboard_enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    context: Option<&AppContext>,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut events = EventStream::new();
    let mut ticker = time::interval(TICK_RATE);

    loop {
        terminal.draw(|f| draw(f, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(CEvent::Key(key))) => {
                    let action = handle_key(key, app);
                    dispatch(action, app, context, &tx);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = rx.recv() => app.apply(event),
            _ = ticker.tick() => app.status_indicator.update_spinner(),
        }

        if app.should_quit {
            break;
        }
    }

    log::info!("Shutting down");
    Ok(())
}

fn dispatch(
    action: Action,
    app: &mut App,
    context: Option<&AppContext>,
    tx: &UnboundedSender<AppEvent>,
) {
    match action {
        Action::None => {}
        Action::Quit => app.should_quit = true,
        Action::Send(text) => match context {
            Some(context) => context.spawn_chat(text, tx.clone()),
            None => app.apply(AppEvent::ChatReply(Err(missing_context()))),
        },
        Action::Inspire(id) => match context {
            Some(context) => context.spawn_inspiration(id, tx.clone()),
            None => app.apply(AppEvent::IdeaReady {
                id,
                result: Err(missing_context()),
            }),
        },
        Action::ExportImage => {
            let Some(context) = context else {
                return;
            };
            if let Some(path) = app.export_latest_image(context.export_dir()) {
                match open::that(&path) {
                    Ok(()) => app
                        .status_indicator
                        .set_status(format!("Opened {}", path.display())),
                    Err(e) => {
                        log::warn!("Could not open {}: {}", path.display(), e);
                        app.error = Some(format!("Saved image to {}", path.display()));
                    }
                }
            }
        }
    }
}

fn missing_context() -> TuraError {
    TuraError::init_error("the Gemini session is not available")
}

/// Lays out the whole screen: header, transcript, status row, optional
/// error banner, input box and key hints.
pub fn draw(f: &mut Frame, app: &mut App) {
    let input_rows = (app.input.split('\n').count() as u16).clamp(1, MAX_INPUT_ROWS);
    let error_rows = if app.error.is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(error_rows),
            Constraint::Length(input_rows + 2),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::draw_header(f, chunks[0]);
    chat::draw_messages(f, chunks[1], app);
    app.status_indicator.render(f, chunks[2]);
    if let Some(error) = &app.error {
        chat::draw_error(f, chunks[3], error);
    }
    chat::draw_input(f, chunks[4], app);
    footer::draw_footer(f, chunks[5], app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::APP_TITLE;
    use ratatui::{backend::TestBackend, buffer::Buffer};

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_draw_greeting_screen() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = App::new();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains(APP_TITLE));
        assert!(text.contains("Tura"));
        assert!(text.contains("Ctrl+G"));
    }

    #[test]
    fn test_draw_init_error_banner() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = App::with_init_error(&TuraError::init_error("no key"));
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("Initialization failed: no key"));
    }

    #[test]
    fn test_dispatch_without_context_recovers() {
        let mut app = App::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.input = "hello".to_string();
        let text = app.submit_input().unwrap();

        dispatch(Action::Send(text), &mut app, None, &tx);
        assert!(!app.is_sending());
        assert!(app.error.is_some());
    }
}
