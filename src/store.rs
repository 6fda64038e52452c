use crate::error::LoadError;
use crate::models::Question;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const MIN_CHOICES: usize = 2;
pub const MAX_CHOICES: usize = 5;

/// Supplies validated questions for a named source.
///
/// An empty `Vec` is a valid answer; callers decide whether an empty pool is
/// an error for them.
pub trait QuestionStore {
    fn load(&self, source: &str) -> Result<Vec<Question>, LoadError>;
}

/// Reads question files from a directory on disk.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl QuestionStore for JsonDirStore {
    fn load(&self, source: &str) -> Result<Vec<Question>, LoadError> {
        load_questions(&self.root.join(source))
    }
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    choices: Vec<String>,
    correct_answer_index: i64,
    explanation: String,
}

pub fn list_question_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            if let Some(ext) = entry.path().extension()
                && ext == "json"
            {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files
}

pub fn load_questions(path: &Path) -> Result<Vec<Question>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_questions(&content, path)
}

/// Parses and validates a JSON array of question records. `path` is only
/// used to label errors.
pub fn parse_questions(content: &str, path: &Path) -> Result<Vec<Question>, LoadError> {
    let raw: Vec<RawQuestion> =
        serde_json::from_str(content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            validate(record).map_err(|reason| LoadError::Invalid {
                path: path.to_path_buf(),
                index,
                reason,
            })
        })
        .collect()
}

fn validate(raw: RawQuestion) -> Result<Question, String> {
    if raw.question.trim().is_empty() {
        return Err("question text is empty".to_string());
    }
    let count = raw.choices.len();
    if !(MIN_CHOICES..=MAX_CHOICES).contains(&count) {
        return Err(format!(
            "expected {}-{} choices, found {}",
            MIN_CHOICES, MAX_CHOICES, count
        ));
    }
    let correct_choice_index = usize::try_from(raw.correct_answer_index)
        .ok()
        .filter(|index| *index < count)
        .ok_or_else(|| {
            format!(
                "correct_answer_index {} is outside 0..{}",
                raw.correct_answer_index, count
            )
        })?;

    Ok(Question {
        text: raw.question,
        choices: raw.choices,
        correct_choice_index,
        explanation: raw.explanation,
        subject_origin: None,
    })
}
