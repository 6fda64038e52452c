pub mod layout;
mod menu;
mod quiz;
pub mod screen;
mod summary;

pub use layout::{calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::{MenuEntry, draw_menu, menu_entries};
pub use quiz::{QuizKind, draw_quiz, draw_quit_confirmation};
pub use screen::{FeedbackView, ScreenModel, StatsView};
pub use summary::{draw_summary, exam_summary_text, practice_summary_text};

use crate::app::{ActiveSession, App};
use crate::models::AppState;
use ratatui::Frame;

/// Draws whichever screen the app is on.
pub fn draw(f: &mut Frame, app: &App) {
    let active = app.active.as_ref();
    match (app.state, active) {
        (AppState::Quiz, Some(active)) => {
            draw_quiz(f, active.title(), active.screen(), active.kind());
        }
        (AppState::QuizQuitConfirm, Some(_)) => draw_quit_confirmation(f),
        (AppState::Summary, Some(active)) => {
            let elapsed = active.elapsed_secs();
            let body = match active {
                ActiveSession::Practice(run) => practice_summary_text(
                    run.session.stats(),
                    run.session.len(),
                    elapsed,
                    run.session.mistakes(),
                ),
                ActiveSession::Exam(run) => match run.exam.result() {
                    Some(result) => exam_summary_text(result, elapsed, run.exam.mistakes()),
                    None => Default::default(),
                },
            };
            draw_summary(f, active.title(), body, active.can_review());
        }
        _ => draw_menu(f, &app.catalog, app.selected_menu_index, app.notice.as_deref()),
    }
}
