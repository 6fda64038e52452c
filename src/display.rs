//! The seam between the session controllers and whatever renders them.
//!
//! Controllers never format for presentation beyond plain strings and
//! indices; wrapping, colours and layout belong to the surface.

use crate::exam::MockExam;
use crate::models::{Mode, Question};
use crate::session::QuizSession;

pub trait DisplaySurface {
    fn render_question(&mut self, text: &str, choices: &[String], prefix: &str);

    fn render_feedback(
        &mut self,
        is_correct: bool,
        explanation: &str,
        correct_index: usize,
        selected_index: usize,
    );

    fn render_stats(&mut self, attempted: u32, correct: u32, incorrect: u32, elapsed_secs: u64);

    /// The choice the user currently has selected, if any.
    fn prompt_selection(&mut self) -> Option<usize>;

    fn render_progress(&mut self, _current: usize, _total: usize) {}
}

pub fn question_prefix(mode: Mode, number: usize) -> String {
    match mode {
        Mode::Normal => format!("Q{}.", number),
        Mode::Review => format!("Review Q{}.", number),
    }
}

fn render_current<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    question: &Question,
    mode: Mode,
    progress: (usize, usize),
) {
    let (number, total) = progress;
    surface.render_question(
        &question.text,
        &question.choices,
        &question_prefix(mode, number),
    );
    surface.render_progress(number, total);
}

/// Pushes the practice session's current state to `surface`. Returns false
/// once the session has nothing left to show.
pub fn present_session<S: DisplaySurface + ?Sized>(
    session: &QuizSession,
    elapsed_secs: u64,
    surface: &mut S,
) -> bool {
    let stats = session.stats();
    surface.render_stats(stats.attempted, stats.correct, stats.incorrect, elapsed_secs);

    let Ok(question) = session.current() else {
        return false;
    };
    render_current(surface, question, session.mode(), session.progress());
    if let Some(outcome) = session.last_outcome() {
        surface.render_feedback(
            outcome.is_correct(),
            &question.explanation,
            outcome.correct_index,
            outcome.selected,
        );
    }
    true
}

/// Mock exams only reveal answers while reviewing, so feedback is rendered
/// in review mode alone.
pub fn present_exam<S: DisplaySurface + ?Sized>(
    exam: &MockExam,
    elapsed_secs: u64,
    surface: &mut S,
) -> bool {
    let Ok(question) = exam.current() else {
        return false;
    };
    render_current(surface, question, exam.mode(), exam.progress());
    if let Some(outcome) = exam.last_outcome() {
        surface.render_feedback(
            outcome.is_correct(),
            &question.explanation,
            outcome.correct_index,
            outcome.selected,
        );
    }
    let answered = exam.answered_count() as u32;
    surface.render_stats(answered, 0, 0, elapsed_secs);
    true
}
