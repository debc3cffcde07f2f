use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::seq::SliceRandom;

use crate::card::CardState;
use crate::question::{Question, QuestionType};
use crate::session::{Phase, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Finished,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Top-level application state: the canonical question bank, the single live
/// session, and the transient presentation state around it.
///
/// All key handling lives here, away from the terminal, so integration tests
/// can drive complete exams headlessly.
#[derive(Debug)]
pub struct App {
    full_bank: Vec<Question>,
    pub session: Session,
    pub screen: Screen,
    pub player_name: String,
    pub name_input: String,
    /// UI gate: once feedback for the current question is on display, typing
    /// is disabled and Enter means "next" instead of "submit".
    pub show_feedback: bool,
    pub card: CardState,
    shuffle: bool,
}

impl App {
    pub fn new(full_bank: Vec<Question>, player_name: String, shuffle: bool) -> Self {
        Self {
            full_bank,
            session: Session::idle(),
            screen: Screen::Start,
            name_input: player_name.clone(),
            player_name,
            show_feedback: false,
            card: CardState::default(),
            shuffle,
        }
    }

    pub fn full_bank(&self) -> &[Question] {
        &self.full_bank
    }

    /// Begin a fresh full-bank session, replacing whatever was live before.
    pub fn start_session(&mut self) {
        let mut questions = self.full_bank.clone();
        if self.shuffle {
            questions.shuffle(&mut rand::thread_rng());
        }
        self.session = Session::start(questions);
        self.screen = Screen::Playing;
        self.sync_to_current();
    }

    /// Re-run only the questions that were missed; falls back to the full
    /// bank when there is nothing to retry.
    pub fn retry_wrong(&mut self) {
        self.session = self.session.retry(&self.full_bank);
        self.screen = Screen::Playing;
        self.sync_to_current();
    }

    /// Grade the card's composed answer. Empty answers are not submittable;
    /// re-submission is blocked by the feedback gate, not by the controller.
    pub fn submit_current(&mut self) {
        if self.show_feedback {
            return;
        }
        let Some(question) = self.session.current_question() else {
            return;
        };
        let answer = self.card.composed_answer(question);
        if answer.is_empty() {
            return;
        }
        self.session.submit_answer(&answer);
        self.show_feedback = true;
        self.refresh_card();
    }

    pub fn next_question(&mut self) {
        self.session.advance();
        if self.session.phase() == Phase::Finished {
            self.screen = Screen::Finished;
        } else {
            self.sync_to_current();
        }
    }

    pub fn jump_to(&mut self, index: usize) {
        self.session.jump_to(index);
        self.sync_to_current();
    }

    pub fn jump_previous(&mut self) {
        let idx = self.session.current_index();
        if idx > 0 {
            self.jump_to(idx - 1);
        }
    }

    pub fn jump_next(&mut self) {
        self.jump_to(self.session.current_index() + 1);
    }

    pub fn finish_early(&mut self) {
        self.session.finish();
        self.screen = Screen::Finished;
    }

    /// Re-derive feedback visibility and rebuild the card scratch state.
    /// Called on every current-question change so nothing leaks between
    /// cards (drafts, hint toggles, fragment picks).
    fn sync_to_current(&mut self) {
        self.show_feedback = self
            .session
            .current_question()
            .is_some_and(|q| self.session.answer_for(q.id).is_some());
        self.refresh_card();
    }

    fn refresh_card(&mut self) {
        self.card = match self.session.current_question() {
            Some(q) => CardState::for_question(q, self.session.answer_for(q.id)),
            None => CardState::default(),
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        match self.screen {
            Screen::Start => self.handle_start_key(key),
            Screen::Playing => self.handle_playing_key(key),
            Screen::Finished => self.handle_finished_key(key),
        }
    }

    fn handle_start_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Enter => {
                let name = self.name_input.trim();
                if !name.is_empty() {
                    self.player_name = name.to_string();
                }
                self.start_session();
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => {
                self.name_input.push(c);
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> Flow {
        // Keys that work regardless of the current card.
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.finish_early();
                return Flow::Continue;
            }
            KeyCode::PageUp => {
                self.jump_previous();
                return Flow::Continue;
            }
            KeyCode::PageDown => {
                self.jump_next();
                return Flow::Continue;
            }
            _ => {}
        }

        if self.show_feedback {
            if key.code == KeyCode::Enter {
                self.next_question();
            }
            return Flow::Continue;
        }

        if key.code == KeyCode::Tab {
            self.card.toggle_hint();
            return Flow::Continue;
        }

        let Some(kind) = self.session.current_question().map(|q| q.kind) else {
            return Flow::Continue;
        };
        match kind {
            QuestionType::MultipleChoice => self.handle_choice_key(key),
            QuestionType::FillInBlank => self.handle_fill_key(key),
            QuestionType::Rearrange => self.handle_rearrange_key(key),
        }
        Flow::Continue
    }

    fn handle_choice_key(&mut self, key: KeyEvent) {
        let option_count = self
            .session
            .current_question()
            .map(|q| q.options.len())
            .unwrap_or(0);
        match key.code {
            KeyCode::Up => self.card.select_previous_option(),
            KeyCode::Down => self.card.select_next_option(option_count),
            KeyCode::Enter => self.submit_current(),
            _ => {}
        }
    }

    fn handle_fill_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.card.draft.push(c),
            KeyCode::Backspace => {
                self.card.draft.pop();
            }
            KeyCode::Enter => self.submit_current(),
            _ => {}
        }
    }

    fn handle_rearrange_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.card.move_fragment_cursor_left(),
            KeyCode::Right => self.card.move_fragment_cursor_right(),
            KeyCode::Char(' ') => self.card.pick_fragment(),
            KeyCode::Backspace => self.card.unpick_fragment(),
            KeyCode::Enter => self.submit_current(),
            _ => {}
        }
    }

    fn handle_finished_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('r') => self.start_session(),
            KeyCode::Char('w') => self.retry_wrong(),
            _ => {}
        }
        Flow::Continue
    }
}
