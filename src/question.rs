use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;

static BANK_DIR: Dir = include_dir!("src/bank");

/// Name of the exam shipped inside the binary.
pub const BUILTIN_BANK: &str = "grade8_exam05";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[strum(serialize = "Multiple Choice")]
    MultipleChoice,
    #[strum(serialize = "Fill in the Blank")]
    FillInBlank,
    #[strum(serialize = "Rearrange")]
    Rearrange,
}

/// One entry of the question bank. Immutable for the whole run; the
/// controller only reads `id` and `correct_answer`, everything else is
/// presentation payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub text: String,
    pub correct_answer: String,
    /// Choices for multiple-choice questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Word/phrase pieces to reorder for rearrange questions.
    #[serde(default)]
    pub fragments: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Load one of the embedded exams by name.
pub fn builtin_bank(name: &str) -> Vec<Question> {
    let file = BANK_DIR
        .get_file(format!("{name}.json"))
        .expect("Bank file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let bank: Vec<Question> = serde_json::from_str(file_as_str).expect("Unable to deserialize question bank json");

    validate(&bank).expect("Embedded question bank failed validation");
    bank
}

/// Load a custom exam from a JSON file on disk.
pub fn bank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, Box<dyn Error>> {
    let contents = std::fs::read_to_string(path)?;
    let bank: Vec<Question> = serde_json::from_str(&contents)?;
    validate(&bank)?;
    Ok(bank)
}

/// Retry derivation resolves questions by id, so ids must be unique across
/// the whole bank.
fn validate(bank: &[Question]) -> Result<(), Box<dyn Error>> {
    if let Some(dup) = bank.iter().map(|q| q.id).duplicates().next() {
        return Err(format!("duplicate question id {dup} in bank").into());
    }
    Ok(())
}
