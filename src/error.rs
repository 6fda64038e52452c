//! Error types shared by the question store and the session controllers.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or validating a question source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question file '{}' not found", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{}' is not valid question JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("question {index} in '{}' is invalid: {reason}", path.display())]
    Invalid {
        path: PathBuf,
        index: usize,
        reason: String,
    },
    #[error("'{}' contains no questions", path.display())]
    Empty { path: PathBuf },
}

/// Errors emitted by the practice session, review queue and mock exam.
///
/// `SessionComplete` is the expected terminal signal of `current()` and not a
/// failure; every other variant is recoverable by re-prompting or returning
/// the user to the menu.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("no questions to start a session with")]
    EmptyQuestionSet,
    #[error("not enough questions were loaded for the mock exam")]
    NoQuestionsAvailable,
    #[error("failed to load questions for {subject}: {source}")]
    SubjectLoadFailed {
        subject: String,
        #[source]
        source: LoadError,
    },
    #[error("select an answer first")]
    NoSelection,
    #[error("choice {choice} is out of range for a question with {len} choices")]
    ChoiceOutOfRange { choice: usize, len: usize },
    #[error("this question has already been answered")]
    AlreadySubmitted,
    #[error("the session is still in progress")]
    SessionInProgress,
    #[error("session complete")]
    SessionComplete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_load_failed_message_names_subject() {
        let err = QuizError::SubjectLoadFailed {
            subject: "Tax Law".to_string(),
            source: LoadError::Empty {
                path: PathBuf::from("questions_taxlaw.json"),
            },
        };
        let message = err.to_string();
        assert!(message.contains("Tax Law"));
        assert!(message.contains("questions_taxlaw.json"));
    }

    #[test]
    fn test_load_error_converts_into_quiz_error() {
        let err: QuizError = LoadError::NotFound {
            path: PathBuf::from("missing.json"),
        }
        .into();
        assert!(matches!(err, QuizError::Load(LoadError::NotFound { .. })));
    }
}
