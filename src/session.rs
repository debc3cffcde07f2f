use std::collections::HashMap;

use crate::question::Question;

/// Points awarded per correct answer. No partial credit, no time bonus.
pub const POINTS_PER_QUESTION: u32 = 10;

/// Comparison rule for answer checking: leading/trailing whitespace and
/// letter case never count against the learner.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Finished,
}

/// Recorded verdict for one question, computed once at submission time.
/// `is_correct` is never recomputed after creation; `correct_answer` is a
/// snapshot so the results view stays stable even if the bank changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerResult {
    pub question_id: u32,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl AnswerResult {
    fn graded(question: &Question, raw_answer: &str) -> Self {
        Self {
            question_id: question.id,
            user_answer: raw_answer.to_string(),
            correct_answer: question.correct_answer.clone(),
            is_correct: normalize(raw_answer) == normalize(&question.correct_answer),
        }
    }

    /// Placeholder row for a question the learner never answered, so a
    /// finished session always shows one row per active question.
    fn unanswered(question: &Question) -> Self {
        Self {
            question_id: question.id,
            user_answer: String::new(),
            correct_answer: question.correct_answer.clone(),
            is_correct: false,
        }
    }
}

/// The active exam run: question order, cursor, and recorded answers.
///
/// There is at most one live session; `start` and `retry` both build a fresh
/// value that replaces the previous one, so stale answers can never leak
/// across runs. Score, points, and percentage are always derived from the
/// answers map, never cached.
#[derive(Debug, Clone)]
pub struct Session {
    active_questions: Vec<Question>,
    current_index: usize,
    answers: HashMap<u32, AnswerResult>,
    phase: Phase,
}

impl Session {
    /// An empty shell in `NotStarted`; every operation on it is a no-op.
    pub fn idle() -> Self {
        Self {
            active_questions: Vec::new(),
            current_index: 0,
            answers: HashMap::new(),
            phase: Phase::NotStarted,
        }
    }

    /// Begin a fresh run over `active_questions` (the full bank or a retry
    /// subset). An empty list is tolerated: the session is `InProgress` with
    /// no current question, and `advance`/`finish` remain callable.
    pub fn start(active_questions: Vec<Question>) -> Self {
        Self {
            active_questions,
            current_index: 0,
            answers: HashMap::new(),
            phase: Phase::InProgress,
        }
    }

    /// Derive the retry run from this session: every active question that was
    /// unanswered or answered incorrectly, re-resolved against the canonical
    /// `full_bank` (so a retry-of-a-retry still maps to original question
    /// content) and kept in bank order. If nothing qualifies the learner gets
    /// a fresh full-bank session instead of a zero-length one.
    pub fn retry(&self, full_bank: &[Question]) -> Session {
        let missed: Vec<Question> = full_bank
            .iter()
            .filter(|q| self.is_retryable(q.id))
            .cloned()
            .collect();

        if missed.is_empty() {
            Session::start(full_bank.to_vec())
        } else {
            Session::start(missed)
        }
    }

    fn is_retryable(&self, id: u32) -> bool {
        self.active_questions.iter().any(|q| q.id == id)
            && !self.answers.get(&id).is_some_and(|a| a.is_correct)
    }

    /// Grade and record the learner's answer for the current question.
    /// Re-submission replaces the prior result (last write wins). Does not
    /// move the cursor. Ignored outside `InProgress` or when there is no
    /// current question.
    pub fn submit_answer(&mut self, raw_answer: &str) {
        if self.phase != Phase::InProgress {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        let result = AnswerResult::graded(question, raw_answer);
        self.answers.insert(result.question_id, result);
    }

    /// Move to the next question. From the last index the session finishes
    /// only when every question has an answer; otherwise the cursor is sent
    /// back to the first unanswered question (searched from index 0, not from
    /// the current position), so a skipped question is always caught before
    /// the session can finish.
    pub fn advance(&mut self) {
        if self.phase != Phase::InProgress {
            return;
        }
        let total = self.active_questions.len();
        if total == 0 {
            self.phase = Phase::Finished;
            return;
        }
        if self.current_index < total - 1 {
            self.current_index += 1;
            return;
        }
        match self.first_unanswered() {
            Some(idx) => self.current_index = idx,
            None => self.phase = Phase::Finished,
        }
    }

    fn first_unanswered(&self) -> Option<usize> {
        self.active_questions
            .iter()
            .position(|q| !self.answers.contains_key(&q.id))
    }

    /// Random-access navigation. Out-of-range input is clamped rather than
    /// trusted; answers and phase are never touched.
    pub fn jump_to(&mut self, index: usize) {
        if self.active_questions.is_empty() {
            return;
        }
        self.current_index = index.min(self.active_questions.len() - 1);
    }

    /// Explicit early exit, regardless of completion state.
    pub fn finish(&mut self) {
        self.phase = Phase::Finished;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.active_questions.get(self.current_index)
    }

    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.active_questions.get(index)
    }

    pub fn active_questions(&self) -> &[Question] {
        &self.active_questions
    }

    pub fn total(&self) -> usize {
        self.active_questions.len()
    }

    pub fn answer_for(&self, question_id: u32) -> Option<&AnswerResult> {
        self.answers.get(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.values().filter(|a| a.is_correct).count()
    }

    pub fn wrong_count(&self) -> usize {
        self.total().saturating_sub(self.correct_count())
    }

    pub fn points(&self) -> u32 {
        self.correct_count() as u32 * POINTS_PER_QUESTION
    }

    /// Rounded integer percentage of correct answers; 0 for an empty session.
    pub fn percentage(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.correct_count() as f64 / total as f64) * 100.0).round() as u32
    }

    /// One row per active question in sequence order, synthesizing an
    /// unanswered placeholder where no answer was recorded.
    pub fn results(&self) -> Vec<AnswerResult> {
        self.active_questions
            .iter()
            .map(|q| {
                self.answers
                    .get(&q.id)
                    .cloned()
                    .unwrap_or_else(|| AnswerResult::unanswered(q))
            })
            .collect()
    }
}
