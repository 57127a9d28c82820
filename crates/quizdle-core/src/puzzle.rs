//! Assembly of a finished puzzle into the upload service's document shape.

use crate::Placement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of question/answer pairs in a puzzle.
pub const CLUE_COUNT: usize = 5;

/// The puzzle being authored: five questions and five answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDraft {
    pub questions: [String; CLUE_COUNT],
    pub answers: [String; CLUE_COUNT],
}

impl PuzzleDraft {
    pub fn new() -> Self {
        Self {
            questions: std::array::from_fn(|_| String::new()),
            answers: std::array::from_fn(|_| String::new()),
        }
    }

    /// Answers are stored uppercased; the grid and the matching both work on
    /// uppercase text.
    pub fn set_answer(&mut self, index: usize, text: &str) {
        self.answers[index] = text.to_ascii_uppercase();
    }

    pub fn set_question(&mut self, index: usize, text: &str) {
        self.questions[index] = text.to_string();
    }

    /// Indices of answers still blank. Generation requires all five.
    pub fn missing_answers(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_answers().is_empty()
    }

    /// The word list sent to the layout service.
    pub fn words(&self) -> Vec<String> {
        self.answers.iter().filter(|a| !a.is_empty()).cloned().collect()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for PuzzleDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// The flat key/value document the upload service accepts:
/// `question1..question5`, `answer1..answer5`, `rowCol1..rowCol5`, `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleDocument {
    entries: BTreeMap<String, String>,
}

impl PuzzleDocument {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }
}

/// Bind each answer to a placement from the candidate pool.
///
/// First-match-wins over a shrinking pool: for each answer in input order the
/// first remaining placement with equal word text is taken and removed, so
/// duplicate answer text resolves to distinct positions in first-seen order.
pub fn bind_positions(
    answers: &[String],
    clues: &[Placement],
) -> Result<Vec<Placement>, PuzzleError> {
    let mut pool: Vec<Placement> = clues.to_vec();
    let mut bound = Vec::with_capacity(answers.len());

    for (index, answer) in answers.iter().enumerate() {
        let answer = answer.to_ascii_uppercase();
        match pool.iter().position(|p| p.word == answer) {
            Some(i) => bound.push(pool.remove(i)),
            None => {
                return Err(PuzzleError::UnmatchedAnswer {
                    index,
                    answer,
                })
            }
        }
    }
    Ok(bound)
}

/// Build the upload document for a draft, a publish date (`YYYY-MM-DD`) and
/// the current candidate's clue placements.
pub fn assemble_document(
    draft: &PuzzleDraft,
    date: &str,
    clues: &[Placement],
) -> Result<PuzzleDocument, PuzzleError> {
    if let Some(&index) = draft.missing_answers().first() {
        return Err(PuzzleError::MissingAnswer { index });
    }

    let bound = bind_positions(&draft.answers, clues)?;

    let mut entries = BTreeMap::new();
    for i in 0..CLUE_COUNT {
        let n = i + 1;
        entries.insert(format!("question{}", n), draft.questions[i].clone());
        entries.insert(format!("answer{}", n), draft.answers[i].clone());
        entries.insert(format!("rowCol{}", n), bound[i].position_code());
    }
    entries.insert("date".to_string(), date.to_string());

    Ok(PuzzleDocument { entries })
}

/// A draft that cannot be turned into an upload document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// An answer field is still blank.
    MissingAnswer { index: usize },
    /// An answer has no matching placement left in the candidate pool.
    UnmatchedAnswer { index: usize, answer: String },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAnswer { index } => {
                write!(f, "answer {} is missing", index + 1)
            }
            Self::UnmatchedAnswer { index, answer } => {
                write!(
                    f,
                    "answer {} ({:?}) has no position in the current layout",
                    index + 1,
                    answer
                )
            }
        }
    }
}
