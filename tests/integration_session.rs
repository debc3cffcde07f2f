// Session-controller integration scenarios driven through the library
// surface, covering the full lifecycle: start, answer, navigate, finish,
// and retry derivation across generations.

use ioe_master::question::{builtin_bank, Question, QuestionType, BUILTIN_BANK};
use ioe_master::session::{Phase, Session, POINTS_PER_QUESTION};

fn answer_correctly(session: &mut Session) {
    let correct = session.current_question().unwrap().correct_answer.clone();
    session.submit_answer(&correct);
}

#[test]
fn builtin_exam_walkthrough_scores_every_question() {
    let bank = builtin_bank(BUILTIN_BANK);
    let total = bank.len();
    let mut session = Session::start(bank);

    for _ in 0..total {
        answer_correctly(&mut session);
        session.advance();
    }

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.correct_count(), total);
    assert_eq!(session.points(), total as u32 * POINTS_PER_QUESTION);
    assert_eq!(session.percentage(), 100);
}

#[test]
fn skipping_around_cannot_finish_with_gaps() {
    let bank = builtin_bank(BUILTIN_BANK);
    let total = bank.len();
    let mut session = Session::start(bank);

    // Answer everything except the third question, advancing normally.
    for idx in 0..total {
        if idx != 2 {
            answer_correctly(&mut session);
        }
        session.advance();
    }

    // The wrap-search from the last slot must land on the gap.
    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.current_index(), 2);

    answer_correctly(&mut session);
    session.jump_to(total - 1);
    session.advance();
    assert_eq!(session.phase(), Phase::Finished);
}

#[test]
fn retry_generations_shrink_to_nothing() {
    let bank = builtin_bank(BUILTIN_BANK);
    let mut session = Session::start(bank.clone());

    // Miss every question.
    for _ in 0..bank.len() {
        session.submit_answer("definitely wrong");
        session.advance();
    }
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.points(), 0);

    // First retry replays the whole exam; get half of it right.
    let mut retry = session.retry(&bank);
    assert_eq!(retry.total(), bank.len());
    let half = bank.len() / 2;
    for i in 0..retry.total() {
        if i < half {
            answer_correctly(&mut retry);
        } else {
            retry.submit_answer("still wrong");
        }
        retry.advance();
    }

    // Second retry holds only the remaining misses, in bank order.
    let second = retry.retry(&bank);
    assert_eq!(second.total(), bank.len() - half);
    let expected: Vec<u32> = bank.iter().skip(half).map(|q| q.id).collect();
    let actual: Vec<u32> = second.active_questions().iter().map(|q| q.id).collect();
    assert_eq!(actual, expected);
}

#[test]
fn early_finish_results_cover_the_whole_exam() {
    let bank = builtin_bank(BUILTIN_BANK);
    let total = bank.len();
    let mut session = Session::start(bank);

    answer_correctly(&mut session);
    session.finish();

    let results = session.results();
    assert_eq!(results.len(), total);
    assert!(results[0].is_correct);
    assert!(results[1..]
        .iter()
        .all(|r| !r.is_correct && r.user_answer.is_empty()));
    assert_eq!(session.points(), POINTS_PER_QUESTION);
}

#[test]
fn grading_matches_each_question_type() {
    let bank = builtin_bank(BUILTIN_BANK);
    let mut session = Session::start(bank.clone());

    for (idx, question) in bank.iter().enumerate() {
        session.jump_to(idx);
        // Sloppy but acceptable form of the right answer.
        let sloppy = format!("  {}  ", question.correct_answer.to_uppercase());
        session.submit_answer(&sloppy);
        assert!(
            session.answer_for(question.id).unwrap().is_correct,
            "{:?} q{} should accept {:?}",
            question.kind,
            question.id,
            sloppy
        );
    }
    assert_eq!(session.correct_count(), bank.len());
}

#[test]
fn custom_bank_file_drives_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exam.json");
    std::fs::write(
        &path,
        r#"[
            {
                "id": 21,
                "type": "multiple_choice",
                "text": "Pick the plural of 'child'.",
                "correct_answer": "children",
                "options": ["childs", "children", "childrens"]
            },
            {
                "id": 22,
                "type": "rearrange",
                "text": "Order the words:",
                "correct_answer": "birds can fly",
                "fragments": ["fly", "birds", "can"]
            }
        ]"#,
    )
    .unwrap();

    let bank = ioe_master::question::bank_from_file(&path).unwrap();
    assert_eq!(bank.len(), 2);
    assert_eq!(bank[1].kind, QuestionType::Rearrange);

    let mut session = Session::start(bank);
    session.submit_answer("children");
    session.advance();
    session.submit_answer("birds can fly");
    session.advance();

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.percentage(), 100);
}

#[test]
fn question_ids_stay_unique_across_retry_resolution() {
    let bank: Vec<Question> = builtin_bank(BUILTIN_BANK);
    let mut session = Session::start(bank.clone());
    session.submit_answer("wrong");
    session.finish();

    let retry = session.retry(&bank);
    let mut ids: Vec<u32> = retry.active_questions().iter().map(|q| q.id).collect();
    let before = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), before);
}
