pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod exam;
pub mod input;
pub mod logger;
pub mod models;
pub mod review;
pub mod session;
pub mod store;
pub mod timer;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::{ActiveSession, App};
pub use config::{Catalog, Config};
pub use display::{DisplaySurface, present_exam, present_session};
pub use error::{LoadError, QuizError};
pub use exam::{ExamConfig, ExamResult, ExamStep, MockExam, SubjectScore};
pub use input::handle_key;
pub use models::{AnswerOutcome, AppState, Mode, Question, SessionStats, Subject};
pub use review::ReviewQueue;
pub use session::{QuizSession, ReviewEntry};
pub use store::{JsonDirStore, QuestionStore, load_questions};
pub use timer::SessionTimer;
