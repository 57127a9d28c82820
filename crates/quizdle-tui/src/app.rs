use crate::builder::{Builder, BuilderError};
use crate::calendar::{WeekStrip, WEEK_LEN};
use crate::render;
use crate::theme::Theme;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use quizdle_core::{ArrowKey, EditorSession, CLUE_COUNT};
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Question/answer entry form
    Answers,
    /// Reviewing generated candidate grids
    Review,
    /// Manual grid editor
    Editor,
    /// Seven-day publish calendar
    Schedule,
    /// Password prompt and upload
    Publish,
}

/// Which half of a form row is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Question,
    Answer,
}

/// The main application state
pub struct App {
    /// Authoring session
    pub builder: Builder,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Form cursor: row (0..4)
    pub form_row: usize,
    /// Form cursor: question or answer column
    pub form_field: FormField,
    /// Rows flashed after a refused generation
    pub flash_rows: Vec<usize>,
    /// Flash timer
    flash_timer: u32,
    /// Manual editor session, open while on the editor screen
    pub editor: Option<EditorSession>,
    /// The scheduling week
    pub week: WeekStrip,
    /// Selected day on the schedule screen
    pub day_selection: usize,
    /// Password being typed on the publish screen
    pub password: String,
}

impl App {
    pub fn new(builder: Builder, theme: Theme, today: NaiveDate) -> Self {
        // Resume on the grid screen when a previous session left candidates.
        let screen_state = if builder.has_candidates() {
            ScreenState::Review
        } else {
            ScreenState::Answers
        };

        let mut app = Self {
            builder,
            screen_state,
            theme,
            message: None,
            message_timer: 0,
            form_row: 0,
            form_field: FormField::Question,
            flash_rows: Vec::new(),
            flash_timer: 0,
            editor: None,
            week: WeekStrip::starting(today),
            day_selection: 0,
            password: String::new(),
        };
        app.refresh_week_status();
        app
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
        if self.flash_timer > 0 {
            self.flash_timer -= 1;
            if self.flash_timer == 0 {
                self.flash_rows.clear();
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    pub fn is_flashing(&self, row: usize) -> bool {
        self.flash_timer > 0 && self.flash_rows.contains(&row)
    }

    fn refresh_week_status(&mut self) {
        match self.builder.week_status(self.week.start()) {
            Ok(done) => self.week.mark_done(&done),
            // The schedule still works without status marks.
            Err(e) => log::debug!("week status unavailable: {}", e),
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Answers => self.handle_answers_key(key),
            ScreenState::Review => self.handle_review_key(key),
            ScreenState::Editor => self.handle_editor_key(key),
            ScreenState::Schedule => self.handle_schedule_key(key),
            ScreenState::Publish => self.handle_publish_key(key),
        }
    }

    /// Handle a mouse event (the editor is the only clickable screen)
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if self.screen_state != ScreenState::Editor {
            return;
        }
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        let n = editor.grid().size();
        if let Some(pos) = render::editor_grid_hit(event.column, event.row, n) {
            editor.click(pos);
        } else if !render::editor_grid_contains(event.column, event.row, n) {
            editor.click_outside();
        }
        // Clicks on the grid borders select nothing and clear nothing.
    }

    fn handle_answers_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            // Build the grid
            KeyCode::Char('b') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.generate();
            }

            // Clear all fields
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.builder.clear_draft();
                self.form_row = 0;
                self.form_field = FormField::Question;
                self.show_message("Cleared all answers");
            }

            KeyCode::Esc => {
                if self.builder.has_candidates() {
                    self.screen_state = ScreenState::Review;
                }
            }

            KeyCode::Up => {
                self.form_row = self.form_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Enter => {
                if self.form_row + 1 < CLUE_COUNT {
                    self.form_row += 1;
                }
            }
            KeyCode::Tab => {
                self.form_field = match self.form_field {
                    FormField::Question => FormField::Answer,
                    FormField::Answer => FormField::Question,
                };
            }

            KeyCode::Backspace => {
                let mut text = self.current_field_text();
                text.pop();
                self.set_current_field_text(&text);
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = self.current_field_text();
                text.push(ch);
                self.set_current_field_text(&text);
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn current_field_text(&self) -> String {
        match self.form_field {
            FormField::Question => self.builder.draft().questions[self.form_row].clone(),
            FormField::Answer => self.builder.draft().answers[self.form_row].clone(),
        }
    }

    fn set_current_field_text(&mut self, text: &str) {
        match self.form_field {
            FormField::Question => self.builder.set_question(self.form_row, text),
            FormField::Answer => self.builder.set_answer(self.form_row, text),
        }
    }

    fn generate(&mut self) {
        match self.builder.generate() {
            Ok(count) => {
                self.screen_state = ScreenState::Review;
                self.show_message(&format!(
                    "Received {} grid{}",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
            Err(BuilderError::Incomplete(missing)) => {
                self.flash_rows = missing.clone();
                self.flash_timer = 10; // ~1 second at 100ms poll
                self.show_message(&BuilderError::Incomplete(missing).to_string());
            }
            Err(e) => self.show_message(&e.to_string()),
        }
    }

    fn handle_review_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            KeyCode::Right | KeyCode::Char('n') => match self.builder.next_candidate() {
                Ok(true) => {}
                Ok(false) => self.show_message("Already at the last grid"),
                Err(e) => self.show_message(&e.to_string()),
            },
            KeyCode::Left | KeyCode::Char('p') => match self.builder.prev_candidate() {
                Ok(true) => {}
                Ok(false) => self.show_message("Already at the first grid"),
                Err(e) => self.show_message(&e.to_string()),
            },

            // Throw the current batch away and ask again
            KeyCode::Char('r') => {
                self.show_message("Rebuilding...");
                self.generate();
            }

            // Hand-edit a copy of the current grid
            KeyCode::Char('e') => {
                if let Some(projected) = self.builder.current_grid() {
                    self.editor = Some(EditorSession::with_grid(projected.grid.clone()));
                    self.screen_state = ScreenState::Editor;
                } else {
                    self.show_message("No grid has been generated yet");
                }
            }

            KeyCode::Char('s') => {
                self.refresh_week_status();
                self.screen_state = ScreenState::Schedule;
            }

            KeyCode::Char('a') | KeyCode::Esc => {
                self.screen_state = ScreenState::Answers;
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> AppAction {
        if key.code == KeyCode::Esc {
            self.editor = None;
            self.screen_state = ScreenState::Review;
            return AppAction::Continue;
        }

        let Some(editor) = self.editor.as_mut() else {
            return AppAction::Continue;
        };

        match key.code {
            KeyCode::Char(' ') => editor.space(),
            KeyCode::Char(ch) => {
                editor.type_letter(ch);
            }
            KeyCode::Backspace => {
                editor.backspace();
            }
            KeyCode::Delete => {
                editor.delete();
            }
            KeyCode::Up => editor.arrow(ArrowKey::Up),
            KeyCode::Down => editor.arrow(ArrowKey::Down),
            KeyCode::Left => editor.arrow(ArrowKey::Left),
            KeyCode::Right => editor.arrow(ArrowKey::Right),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_schedule_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => {
                self.screen_state = ScreenState::Review;
            }
            KeyCode::Left | KeyCode::Char('p') => {
                self.day_selection = self.day_selection.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('n') => {
                if self.day_selection + 1 < WEEK_LEN {
                    self.day_selection += 1;
                }
            }
            KeyCode::Char('r') => {
                self.refresh_week_status();
                self.show_message("Refreshed week status");
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(day) = self.week.get(self.day_selection) {
                    log::debug!("selected publish day {}", day.id());
                    self.builder.select_date(day.date);
                    self.password.clear();
                    self.screen_state = ScreenState::Publish;
                }
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_publish_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc => {
                self.password.clear();
                self.screen_state = ScreenState::Schedule;
            }
            KeyCode::Backspace => {
                self.password.pop();
            }
            KeyCode::Enter => {
                let password = std::mem::take(&mut self.password);
                // The field is cleared whether or not the upload succeeds.
                match self.builder.publish(&password) {
                    Ok(()) => {
                        self.show_message("Quizdle Published!");
                        self.refresh_week_status();
                        self.screen_state = ScreenState::Review;
                    }
                    Err(e) => self.show_message(&e.to_string()),
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.password.push(ch);
            }
            _ => {}
        }
        AppAction::Continue
    }
}
