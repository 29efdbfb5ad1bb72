mod app;
mod audio;
mod config;
mod engine;
mod error;
mod log;
mod spreadsheet;
mod tui;

use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;

use app::{App, InputMode};
use audio::Audio;
use config::Config;

/// Load the roster for startup. Unlike an explicit import, every failure
/// here degrades to an empty roster instead of refusing to start; a missing
/// default file is created so the exit save has somewhere to land.
fn load_initial_roster(path: &Path) -> (Vec<String>, String) {
    if !path.exists() {
        let status = match spreadsheet::save_roster(path, &[]) {
            Ok(()) => format!("Created empty roster at {}", path.display()),
            Err(e) => {
                log::log(&format!("Failed to create roster file: {}", e));
                format!("No roster at {} (starting empty)", path.display())
            }
        };
        return (Vec::new(), status);
    }

    match spreadsheet::load_roster(path) {
        Ok(names) => {
            let status = format!("Loaded {} names from {}", names.len(), path.display());
            (names, status)
        }
        Err(e) => {
            log::log(&format!("Failed to load roster: {}", e));
            (Vec::new(), format!("Failed to load roster: {} (starting empty)", e))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    let config = Config::load();

    // A positional argument overrides the configured roster file
    let mut roster_file = config.roster_file();
    for arg in std::env::args().skip(1) {
        if !arg.starts_with('-') {
            roster_file = PathBuf::from(arg);
        }
    }

    let (roster, load_status) = load_initial_roster(&roster_file);
    let audio = Audio::init(&config.sounds_dir());
    if !audio.enabled() {
        log::log("Audio disabled for this session");
    }

    let mut app = App::new(roster_file, roster, config.roll_speed_ms(), audio);
    app.set_status(load_status);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Best-effort: a save failure must not stop the exit.
    app.save_roster_on_exit();

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Event stream for keyboard
    let mut event_stream = EventStream::new();

    loop {
        // Render
        terminal.draw(|frame| tui::ui::render(frame, app))?;

        tokio::select! {
            // Terminal events
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    if key.kind == KeyEventKind::Press {
                        match app.input_mode {
                            InputMode::Normal => match key.code {
                                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                                KeyCode::Char(' ') | KeyCode::Enter => app.toggle_spin(),
                                KeyCode::Char('r') => app.reset(),
                                KeyCode::Char('i') => app.open_import_prompt(),
                                KeyCode::Char('e') => app.open_export_prompt(),
                                KeyCode::Char('+') | KeyCode::Char('=') => app.faster(),
                                KeyCode::Char('-') => app.slower(),
                                KeyCode::Char('?') => app.input_mode = InputMode::Help,
                                _ => {}
                            },
                            InputMode::ImportPath | InputMode::ExportPath => match key.code {
                                KeyCode::Esc => app.cancel_path_prompt(),
                                KeyCode::Enter => app.confirm_path_prompt(),
                                KeyCode::Char(c) => {
                                    if let Some(prompt) = &mut app.path_input {
                                        prompt.input_char(c);
                                    }
                                }
                                KeyCode::Backspace => {
                                    if let Some(prompt) = &mut app.path_input {
                                        prompt.input_backspace();
                                    }
                                }
                                KeyCode::Left => {
                                    if let Some(prompt) = &mut app.path_input {
                                        prompt.input_left();
                                    }
                                }
                                KeyCode::Right => {
                                    if let Some(prompt) = &mut app.path_input {
                                        prompt.input_right();
                                    }
                                }
                                KeyCode::Home => {
                                    if let Some(prompt) = &mut app.path_input {
                                        prompt.input_home();
                                    }
                                }
                                KeyCode::End => {
                                    if let Some(prompt) = &mut app.path_input {
                                        prompt.input_end();
                                    }
                                }
                                _ => {}
                            },
                            InputMode::Help => match key.code {
                                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                                    app.input_mode = InputMode::Normal;
                                }
                                _ => {}
                            },
                        }
                    }
                }
            }
            // Spin timer: rebuilt each iteration from the current cadence, so
            // speed changes apply on the next scheduled tick and stopping the
            // spin drops the pending expiry instead of letting it fire.
            _ = tokio::time::sleep(Duration::from_millis(app.roll_speed_ms)), if app.engine.is_spinning() => {
                app.on_tick();
            }
        }
    }
}
