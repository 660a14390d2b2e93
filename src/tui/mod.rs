pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while the TUI owns the terminal
    crate::diag::activate();

    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            None => break Ok(()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    if let Err(e) = app.store.persist() {
        crate::buffered_eprintln!("Failed to save state: {}", e);
    }

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::diag::drain() {
        eprintln!("{}", msg);
    }

    result
}

pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            KeyCode::Tab => app.toggle_panel(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            KeyCode::Char('?') => app.show_help(),

            // Score panel
            KeyCode::Left | KeyCode::Char('h') if app.panel == app::Panel::Score => {
                app.adjust_score(-app::SCORE_STEP)
            }
            KeyCode::Right | KeyCode::Char('l') if app.panel == app::Panel::Score => {
                app.adjust_score(app::SCORE_STEP)
            }
            KeyCode::Char('r') if app.panel == app::Panel::Score => app.record_score(),

            // Timing panel
            KeyCode::Enter | KeyCode::Char('e') if app.panel == app::Panel::Timing => {
                app.start_edit()
            }
            KeyCode::Char('d') if app.panel == app::Panel::Timing => app.toggle_disabled(),
            KeyCode::Char('s') if app.panel == app::Panel::Timing => app.save_default(),

            _ => {}
        },
        app::InputMode::Editing => match key.code {
            KeyCode::Enter => app.confirm_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => {
                app.edit_buffer.pop();
            }
            // Anything printable goes into the buffer; validation happens on Enter
            KeyCode::Char(c) if !c.is_control() && app.edit_buffer.len() < 8 => {
                app.edit_buffer.push(c);
            }
            _ => {}
        },
        app::InputMode::Help => app.dismiss_help(),
    }
}
