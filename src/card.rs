use rand::seq::SliceRandom;

use crate::question::{Question, QuestionType};
use crate::session::AnswerResult;

/// Per-question scratch state for the card being shown: the typed draft, the
/// highlighted option, the fragment picks, and hint visibility.
///
/// None of this survives a question change. The app calls [`CardState::for_question`]
/// whenever the current question identity or feedback visibility changes, so
/// stale drafts or hint toggles can never bleed into the next card.
#[derive(Debug, Clone, Default)]
pub struct CardState {
    /// Typed answer draft (fill-in-the-blank).
    pub draft: String,
    /// Highlighted choice (multiple choice).
    pub selected_option: usize,
    /// Fragments picked so far, in pick order (rearrange).
    pub chosen: Vec<String>,
    /// Fragments still available to pick (rearrange).
    pub available: Vec<String>,
    /// Highlighted fragment in the available row (rearrange).
    pub fragment_cursor: usize,
    pub hint_visible: bool,
}

impl CardState {
    /// Fresh scratch state for `question`. When the learner navigates back to
    /// an already-answered question the draft is pre-filled from the recorded
    /// answer so the review shows what they typed.
    pub fn for_question(question: &Question, prior: Option<&AnswerResult>) -> Self {
        let mut card = CardState::default();

        match question.kind {
            QuestionType::Rearrange => {
                card.available = question.fragments.clone();
                card.available.shuffle(&mut rand::thread_rng());
            }
            QuestionType::MultipleChoice => {
                if let Some(prior) = prior {
                    if let Some(idx) = question.options.iter().position(|o| *o == prior.user_answer)
                    {
                        card.selected_option = idx;
                    }
                }
            }
            QuestionType::FillInBlank => {
                if let Some(prior) = prior {
                    card.draft = prior.user_answer.clone();
                }
            }
        }

        card
    }

    /// The answer the card would submit right now.
    pub fn composed_answer(&self, question: &Question) -> String {
        match question.kind {
            QuestionType::MultipleChoice => question
                .options
                .get(self.selected_option)
                .cloned()
                .unwrap_or_default(),
            QuestionType::FillInBlank => self.draft.trim().to_string(),
            QuestionType::Rearrange => self.chosen.join(" "),
        }
    }

    pub fn select_previous_option(&mut self) {
        if self.selected_option > 0 {
            self.selected_option -= 1;
        }
    }

    pub fn select_next_option(&mut self, option_count: usize) {
        if self.selected_option + 1 < option_count {
            self.selected_option += 1;
        }
    }

    pub fn move_fragment_cursor_left(&mut self) {
        if self.fragment_cursor > 0 {
            self.fragment_cursor -= 1;
        }
    }

    pub fn move_fragment_cursor_right(&mut self) {
        if self.fragment_cursor + 1 < self.available.len() {
            self.fragment_cursor += 1;
        }
    }

    /// Move the highlighted fragment from the available row to the answer.
    pub fn pick_fragment(&mut self) {
        if self.available.is_empty() {
            return;
        }
        let fragment = self.available.remove(self.fragment_cursor);
        self.chosen.push(fragment);
        if self.fragment_cursor >= self.available.len() && self.fragment_cursor > 0 {
            self.fragment_cursor -= 1;
        }
    }

    /// Put the most recently picked fragment back.
    pub fn unpick_fragment(&mut self) {
        if let Some(fragment) = self.chosen.pop() {
            self.available.push(fragment);
        }
    }

    pub fn toggle_hint(&mut self) {
        self.hint_visible = !self.hint_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rearrange_question() -> Question {
        Question {
            id: 4,
            kind: QuestionType::Rearrange,
            text: "Rearrange:".to_string(),
            correct_answer: "we should go".to_string(),
            options: vec![],
            fragments: vec!["go".into(), "we".into(), "should".into()],
            image_url: None,
            audio_url: None,
            explanation: Some("word order".to_string()),
        }
    }

    fn fill_question() -> Question {
        Question {
            id: 3,
            kind: QuestionType::FillInBlank,
            text: "___".to_string(),
            correct_answer: "since".to_string(),
            options: vec![],
            fragments: vec![],
            image_url: None,
            audio_url: None,
            explanation: None,
        }
    }

    fn prior(answer: &str) -> AnswerResult {
        AnswerResult {
            question_id: 3,
            user_answer: answer.to_string(),
            correct_answer: "since".to_string(),
            is_correct: answer == "since",
        }
    }

    #[test]
    fn reset_clears_scratch_state() {
        let mut card = CardState::for_question(&fill_question(), None);
        card.draft.push_str("for");
        card.hint_visible = true;

        let card = CardState::for_question(&fill_question(), None);
        assert!(card.draft.is_empty());
        assert!(!card.hint_visible);
    }

    #[test]
    fn reset_prefills_draft_from_prior_answer() {
        let card = CardState::for_question(&fill_question(), Some(&prior("for")));
        assert_eq!(card.draft, "for");
    }

    #[test]
    fn rearrange_reset_restocks_all_fragments() {
        let q = rearrange_question();
        let card = CardState::for_question(&q, None);

        assert!(card.chosen.is_empty());
        assert_eq!(card.available.len(), q.fragments.len());
        let mut available = card.available.clone();
        available.sort();
        let mut expected = q.fragments.clone();
        expected.sort();
        assert_eq!(available, expected);
    }

    #[test]
    fn pick_and_unpick_fragments() {
        let q = rearrange_question();
        let mut card = CardState::for_question(&q, None);
        card.available = q.fragments.clone(); // fixed order for the test
        card.fragment_cursor = 1;

        card.pick_fragment();
        assert_eq!(card.chosen, vec!["we".to_string()]);
        assert_eq!(card.available.len(), 2);

        card.unpick_fragment();
        assert!(card.chosen.is_empty());
        assert_eq!(card.available.len(), 3);
    }

    #[test]
    fn pick_clamps_cursor_at_the_end_of_the_row() {
        let q = rearrange_question();
        let mut card = CardState::for_question(&q, None);
        card.fragment_cursor = card.available.len() - 1;

        card.pick_fragment();
        assert!(card.fragment_cursor < card.available.len());

        card.pick_fragment();
        card.pick_fragment();
        assert!(card.available.is_empty());
        assert_eq!(card.fragment_cursor, 0);

        // Picking from an empty row is a no-op.
        card.pick_fragment();
        assert_eq!(card.chosen.len(), 3);
    }

    #[test]
    fn composed_answer_per_question_type() {
        let q = rearrange_question();
        let mut card = CardState::for_question(&q, None);
        card.available = q.fragments.clone();
        card.fragment_cursor = 1;
        card.pick_fragment(); // we
        card.fragment_cursor = 1;
        card.pick_fragment(); // should
        card.pick_fragment(); // go
        assert_eq!(card.composed_answer(&q), "we should go");

        let fq = fill_question();
        let mut card = CardState::for_question(&fq, None);
        card.draft = "  since ".to_string();
        assert_eq!(card.composed_answer(&fq), "since");
    }

    #[test]
    fn option_selection_stays_in_bounds() {
        let mut card = CardState::default();
        card.select_previous_option();
        assert_eq!(card.selected_option, 0);

        card.select_next_option(4);
        card.select_next_option(4);
        card.select_next_option(4);
        card.select_next_option(4);
        assert_eq!(card.selected_option, 3);
    }

    #[test]
    fn hint_toggles() {
        let mut card = CardState::default();
        card.toggle_hint();
        assert!(card.hint_visible);
        card.toggle_hint();
        assert!(!card.hint_visible);
    }
}
