use std::path::{Path, PathBuf};

use crate::audio::Audio;
use crate::config::{SPEED_MAX_MS, SPEED_MIN_MS, SPEED_STEP_MS};
use crate::engine::{PickerEngine, StartOutcome};
use crate::log;
use crate::spreadsheet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,     // Hotkeys drive the picker
    ImportPath, // Typing a roster path to import
    ExportPath, // Typing a results path to export
    Help,       // Hotkey overlay
}

/// State for the single-line path prompt
#[derive(Debug, Clone)]
pub struct PathInputState {
    pub input: String,
    pub cursor_position: usize,
}

impl PathInputState {
    pub fn new(initial: String) -> Self {
        let cursor_position = initial.len();
        Self {
            input: initial,
            cursor_position,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn input_backspace(&mut self) {
        if let Some(c) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
            self.input.remove(self.cursor_position);
        }
    }

    pub fn input_left(&mut self) {
        if let Some(c) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
        }
    }

    pub fn input_right(&mut self) {
        if let Some(c) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn input_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn input_end(&mut self) {
        self.cursor_position = self.input.len();
    }

    /// Cursor offset in characters, for terminal cursor placement.
    pub fn cursor_chars(&self) -> usize {
        self.input[..self.cursor_position].chars().count()
    }
}

pub struct App {
    pub engine: PickerEngine,
    pub input_mode: InputMode,
    pub path_input: Option<PathInputState>,
    pub status: String,
    pub roster_file: PathBuf,
    pub roll_speed_ms: u64,
    pub audio: Audio,
}

impl App {
    pub fn new(roster_file: PathBuf, roster: Vec<String>, roll_speed_ms: u64, audio: Audio) -> Self {
        Self {
            engine: PickerEngine::new(roster),
            input_mode: InputMode::Normal,
            path_input: None,
            status: String::from("Ready"),
            roster_file,
            roll_speed_ms: roll_speed_ms.clamp(SPEED_MIN_MS, SPEED_MAX_MS),
            audio,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// Start/stop toggle. Stopping commits the displayed name as the pick.
    pub fn toggle_spin(&mut self) {
        if self.engine.is_spinning() {
            self.audio.stop_spin_loop();
            match self.engine.stop() {
                Some(pick) => {
                    self.audio.play_pick();
                    self.set_status(format!(
                        "Picked: {} | {} remaining",
                        pick,
                        self.engine.pool().len()
                    ));
                }
                None => self.set_status("Stopped"),
            }
        } else {
            match self.engine.start() {
                StartOutcome::Started => {
                    self.audio.start_spin_loop();
                    self.set_status("Names rolling...");
                }
                StartOutcome::PoolEmpty => {
                    self.set_status("Everyone has been picked. Press [r] to reset.");
                }
            }
        }
    }

    /// One spin-timer expiry.
    pub fn on_tick(&mut self) {
        self.engine.tick();
    }

    pub fn reset(&mut self) {
        self.audio.stop_spin_loop();
        self.engine.reset();
        self.set_status(format!("Reset | {} names total", self.engine.roster().len()));
    }

    pub fn faster(&mut self) {
        self.roll_speed_ms = self
            .roll_speed_ms
            .saturating_sub(SPEED_STEP_MS)
            .max(SPEED_MIN_MS);
    }

    pub fn slower(&mut self) {
        self.roll_speed_ms = (self.roll_speed_ms + SPEED_STEP_MS).min(SPEED_MAX_MS);
    }

    pub fn open_import_prompt(&mut self) {
        self.input_mode = InputMode::ImportPath;
        self.path_input = Some(PathInputState::new(String::new()));
    }

    /// Open the export prompt with a timestamped default filename. Rejected
    /// up front when nothing has been picked, without consulting the pool.
    pub fn open_export_prompt(&mut self) {
        if self.engine.picked().is_empty() {
            self.set_status("Nothing picked yet");
            return;
        }
        self.input_mode = InputMode::ExportPath;
        self.path_input = Some(PathInputState::new(spreadsheet::default_export_filename()));
    }

    pub fn cancel_path_prompt(&mut self) {
        self.path_input = None;
        self.input_mode = InputMode::Normal;
        self.set_status("Cancelled");
    }

    pub fn confirm_path_prompt(&mut self) {
        let mode = self.input_mode;
        self.input_mode = InputMode::Normal;
        let Some(prompt) = self.path_input.take() else {
            return;
        };

        let trimmed = prompt.input.trim();
        if trimmed.is_empty() {
            self.set_status("Cancelled");
            return;
        }
        let path = PathBuf::from(trimmed);

        match mode {
            InputMode::ImportPath => self.import_from(&path),
            InputMode::ExportPath => self.export_to(&path),
            _ => {}
        }
    }

    /// Replace the roster from a workbook. Any failure, including an empty
    /// roster, leaves the current roster/pool/picked state untouched.
    pub fn import_from(&mut self, path: &Path) {
        match spreadsheet::import_roster(path) {
            Ok(names) => {
                let count = names.len();
                self.audio.stop_spin_loop();
                self.engine.replace_roster(names);
                self.roster_file = path.to_path_buf();
                // The imported workbook becomes the active roster file.
                if let Err(e) = spreadsheet::save_roster(&self.roster_file, self.engine.roster()) {
                    log::log(&format!("Failed to save imported roster: {}", e));
                }
                self.set_status(format!("Imported {} names from {}", count, path.display()));
            }
            Err(e) => {
                self.set_status(format!("Import failed: {}", e));
            }
        }
    }

    pub fn export_to(&mut self, path: &Path) {
        match spreadsheet::export_results(path, self.engine.picked(), self.engine.pool()) {
            Ok(()) => {
                self.set_status(format!(
                    "Exported {} picks to {}",
                    self.engine.picked().len(),
                    path.display()
                ));
            }
            Err(e) => {
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    /// Persist the roster back to the active roster file on shutdown,
    /// best-effort: a failure here must not stop the exit.
    pub fn save_roster_on_exit(&self) {
        if let Err(e) = spreadsheet::save_roster(&self.roster_file, self.engine.roster()) {
            log::log(&format!("Failed to save roster on exit: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(roster: &[&str]) -> App {
        App::new(
            PathBuf::from("students.xlsx"),
            roster.iter().map(|s| s.to_string()).collect(),
            100,
            Audio::default(),
        )
    }

    #[test]
    fn test_toggle_cycle_picks_one_name() {
        let mut app = test_app(&["A", "B", "C"]);

        app.toggle_spin();
        assert!(app.engine.is_spinning());
        app.on_tick();
        app.toggle_spin();

        assert!(!app.engine.is_spinning());
        assert_eq!(app.engine.picked().len(), 1);
        assert_eq!(app.engine.pool().len(), 2);
        assert!(app.status.starts_with("Picked: "));
    }

    #[test]
    fn test_start_on_empty_pool_reports_and_stays_idle() {
        let mut app = test_app(&[]);

        app.toggle_spin();
        assert!(!app.engine.is_spinning());
        assert!(app.status.contains("picked"));
    }

    #[test]
    fn test_export_prompt_rejected_when_nothing_picked() {
        let mut app = test_app(&["A"]);

        app.open_export_prompt();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.path_input.is_none());
        assert_eq!(app.status, "Nothing picked yet");
    }

    #[test]
    fn test_export_prompt_prefills_timestamped_filename() {
        let mut app = test_app(&["A"]);
        app.toggle_spin();
        app.on_tick();
        app.toggle_spin();

        app.open_export_prompt();
        assert_eq!(app.input_mode, InputMode::ExportPath);
        let prompt = app.path_input.as_ref().unwrap();
        assert!(prompt.input.starts_with("picks_"));
        assert!(prompt.input.ends_with(".xlsx"));
    }

    #[test]
    fn test_import_failure_leaves_state_untouched() {
        let mut app = test_app(&["A", "B"]);
        app.toggle_spin();
        app.on_tick();
        app.toggle_spin();

        let roster_before = app.engine.roster().to_vec();
        let picked_before = app.engine.picked().to_vec();

        app.import_from(Path::new("no-such-file.xlsx"));

        assert!(app.status.starts_with("Import failed"));
        assert_eq!(app.engine.roster(), roster_before);
        assert_eq!(app.engine.picked(), picked_before);
        assert_eq!(app.roster_file, PathBuf::from("students.xlsx"));
    }

    #[test]
    fn test_speed_keys_clamp_to_bounds() {
        let mut app = test_app(&["A"]);

        for _ in 0..100 {
            app.faster();
        }
        assert_eq!(app.roll_speed_ms, SPEED_MIN_MS);

        for _ in 0..100 {
            app.slower();
        }
        assert_eq!(app.roll_speed_ms, SPEED_MAX_MS);
    }

    #[test]
    fn test_empty_prompt_confirms_to_cancel() {
        let mut app = test_app(&["A"]);

        app.open_import_prompt();
        app.confirm_path_prompt();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.status, "Cancelled");
    }

    #[test]
    fn test_path_input_editing_is_char_aware() {
        let mut state = PathInputState::new(String::from("名单.xlsx"));

        state.input_home();
        state.input_right();
        assert_eq!(state.cursor_chars(), 1);

        state.input_char('新');
        assert_eq!(state.input, "名新单.xlsx");

        state.input_backspace();
        assert_eq!(state.input, "名单.xlsx");

        state.input_end();
        state.input_backspace();
        assert_eq!(state.input, "名单.xlsx".trim_end_matches('x'));
    }
}
