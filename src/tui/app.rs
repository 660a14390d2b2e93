use ratatui::widgets::TableState;
use std::time::Instant;

use crate::score::{ScoreInput, ScoreResult};
use crate::state::StateStore;
use crate::timing::{EditOutcome, Phase, TimingEditor};
use crate::tui::theme::ThemeColors;

/// Step for the sub-score sliders.
pub const SCORE_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Panel {
    Score,
    Timing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreField {
    Sleep,
    Nutrition,
    Mood,
}

impl ScoreField {
    pub const ALL: [ScoreField; 3] = [Self::Sleep, Self::Nutrition, Self::Mood];

    pub fn label(&self) -> &'static str {
        match self {
            ScoreField::Sleep => "Sleep",
            ScoreField::Nutrition => "Nutrition",
            ScoreField::Mood => "Mood",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Info,
    Success,
    Error,
}

pub struct App {
    pub input: ScoreInput,
    pub result: ScoreResult,
    pub editor: TimingEditor,
    pub store: StateStore,
    pub panel: Panel,
    pub score_row: usize,
    pub timing_state: TableState,
    pub input_mode: InputMode,
    pub edit_buffer: String,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub theme: ThemeColors,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        input: ScoreInput,
        editor: TimingEditor,
        store: StateStore,
        theme: ThemeColors,
    ) -> Self {
        let mut timing_state = TableState::default();
        timing_state.select(Some(0));

        Self {
            result: input.aggregate(),
            input,
            editor,
            store,
            panel: Panel::Score,
            score_row: 0,
            timing_state,
            input_mode: InputMode::Normal,
            edit_buffer: String::new(),
            flash_message: None,
            theme,
            should_quit: false,
        }
    }

    pub fn selected_field(&self) -> ScoreField {
        ScoreField::ALL[self.score_row % ScoreField::ALL.len()]
    }

    pub fn selected_phase(&self) -> Phase {
        let idx = self.timing_state.selected().unwrap_or(0);
        Phase::ALL[idx % Phase::ALL.len()]
    }

    pub fn field_value(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::Sleep => self.input.sleep,
            ScoreField::Nutrition => self.input.nutrition,
            ScoreField::Mood => self.input.mood,
        }
    }

    pub fn toggle_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Score => Panel::Timing,
            Panel::Timing => Panel::Score,
        };
    }

    pub fn next_row(&mut self) {
        match self.panel {
            Panel::Score => self.score_row = (self.score_row + 1) % ScoreField::ALL.len(),
            Panel::Timing => {
                let len = Phase::ALL.len();
                let i = self.timing_state.selected().unwrap_or(0);
                self.timing_state.select(Some((i + 1) % len));
            }
        }
    }

    pub fn previous_row(&mut self) {
        match self.panel {
            Panel::Score => {
                let len = ScoreField::ALL.len();
                self.score_row = (self.score_row + len - 1) % len;
            }
            Panel::Timing => {
                let len = Phase::ALL.len();
                let i = self.timing_state.selected().unwrap_or(0);
                self.timing_state.select(Some((i + len - 1) % len));
            }
        }
    }

    /// Nudge the selected sub-score and recompute the aggregate.
    pub fn adjust_score(&mut self, delta: f64) {
        let field = self.selected_field();
        let value = (self.field_value(field) + delta).clamp(0.0, 100.0);
        match field {
            ScoreField::Sleep => self.input.sleep = value,
            ScoreField::Nutrition => self.input.nutrition = value,
            ScoreField::Mood => self.input.mood = value,
        }
        self.result = self.input.aggregate();
    }

    /// Store the current aggregate as the baseline for the next trend.
    pub fn record_score(&mut self) {
        let result = self.result;
        self.store.state_mut().record_score(&result);
        match self.store.persist() {
            Ok(()) => {
                self.input.previous = result.score;
                self.result = self.input.aggregate();
                let msg = format!("Recorded score {}", result.score);
                self.show_flash(msg, FlashKind::Success);
            }
            Err(e) => {
                let msg = format!("Failed to record score: {}", e);
                self.show_flash(msg, FlashKind::Error);
            }
        }
    }

    pub fn start_edit(&mut self) {
        if self.editor.is_disabled() {
            let msg = "Editing is disabled (d to enable)".to_string();
            self.show_flash(msg, FlashKind::Error);
            return;
        }
        let phase = self.selected_phase();
        self.edit_buffer = self.editor.current().get(phase).to_string();
        self.input_mode = InputMode::Editing;
    }

    pub fn confirm_edit(&mut self) {
        let phase = self.selected_phase();
        let outcome = self.editor.edit(phase, &self.edit_buffer, &mut self.store);
        match outcome {
            EditOutcome::Accepted(next) => {
                let msg = format!("{} set to {}s", phase.title(), next.get(phase));
                match self.store.persist() {
                    Ok(()) => self.show_flash(msg, FlashKind::Success),
                    Err(e) => {
                        let msg = format!("Failed to save state: {}", e);
                        self.show_flash(msg, FlashKind::Error);
                    }
                }
            }
            EditOutcome::Rejected(reason) => {
                let msg = format!("Rejected: {}", reason);
                self.show_flash(msg, FlashKind::Error);
            }
        }
        self.input_mode = InputMode::Normal;
        self.edit_buffer.clear();
    }

    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_buffer.clear();
    }

    pub fn toggle_disabled(&mut self) {
        let disabled = !self.editor.is_disabled();
        self.editor.set_disabled(disabled);
        let msg = if disabled {
            "Timing edits disabled"
        } else {
            "Timing edits enabled"
        };
        self.show_flash(msg.to_string(), FlashKind::Info);
    }

    pub fn save_default(&mut self) {
        let (msg, kind) = match self.editor.save(&mut self.store) {
            Ok(true) => ("Saved as default".to_string(), FlashKind::Success),
            Ok(false) => {
                let msg = "Editing is disabled, nothing saved".to_string();
                (msg, FlashKind::Error)
            }
            Err(e) => (format!("Failed to save default: {e}"), FlashKind::Error),
        };
        self.show_flash(msg, kind);
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }
}
