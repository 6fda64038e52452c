use crate::config::{Catalog, Config};
use crate::display::{DisplaySurface, present_exam, present_session};
use crate::error::QuizError;
use crate::exam::{ExamStep, MockExam};
use crate::logger;
use crate::models::{AppState, Mode};
use crate::session::{QuizSession, ReviewEntry};
use crate::store::QuestionStore;
use crate::timer::SessionTimer;
use crate::ui::{MenuEntry, QuizKind, ScreenModel, menu_entries};
use std::io;

/// A practice session together with the timer and screen bound to it.
pub struct PracticeRun {
    pub title: String,
    pub session: QuizSession,
    pub timer: SessionTimer,
    pub screen: ScreenModel,
}

pub struct ExamRun {
    pub exam: MockExam,
    pub timer: SessionTimer,
    pub screen: ScreenModel,
}

/// The session currently on screen. Dropping it drops its timer, which
/// cancels the tick.
pub enum ActiveSession {
    Practice(PracticeRun),
    Exam(ExamRun),
}

impl ActiveSession {
    pub fn title(&self) -> &str {
        match self {
            ActiveSession::Practice(run) => &run.title,
            ActiveSession::Exam(run) => &run.exam.config().title,
        }
    }

    pub fn screen(&self) -> &ScreenModel {
        match self {
            ActiveSession::Practice(run) => &run.screen,
            ActiveSession::Exam(run) => &run.screen,
        }
    }

    fn screen_mut(&mut self) -> &mut ScreenModel {
        match self {
            ActiveSession::Practice(run) => &mut run.screen,
            ActiveSession::Exam(run) => &mut run.screen,
        }
    }

    fn timer_mut(&mut self) -> &mut SessionTimer {
        match self {
            ActiveSession::Practice(run) => &mut run.timer,
            ActiveSession::Exam(run) => &mut run.timer,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        match self {
            ActiveSession::Practice(run) => run.timer.elapsed_secs(),
            ActiveSession::Exam(run) => run.timer.elapsed_secs(),
        }
    }

    pub fn kind(&self) -> QuizKind {
        let mode = match self {
            ActiveSession::Practice(run) => run.session.mode(),
            ActiveSession::Exam(run) => run.exam.mode(),
        };
        match (self, mode) {
            (_, Mode::Review) => QuizKind::Review,
            (ActiveSession::Practice(_), Mode::Normal) => QuizKind::Practice,
            (ActiveSession::Exam(_), Mode::Normal) => QuizKind::Exam,
        }
    }

    pub fn can_review(&self) -> bool {
        match self {
            ActiveSession::Practice(run) => !run.session.mistakes().is_empty(),
            ActiveSession::Exam(run) => !run.exam.mistakes().is_empty(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            ActiveSession::Practice(run) => run.session.is_complete(),
            ActiveSession::Exam(run) => run.exam.is_complete(),
        }
    }

    /// Re-renders the current question into the screen model.
    fn refresh(&mut self) {
        match self {
            ActiveSession::Practice(run) => {
                present_session(&run.session, run.timer.elapsed_secs(), &mut run.screen);
            }
            ActiveSession::Exam(run) => {
                present_exam(&run.exam, run.timer.elapsed_secs(), &mut run.screen);
                if run.exam.mode() == Mode::Normal
                    && let Some(choice) = run.exam.selected_choice()
                {
                    run.screen.highlight(choice);
                }
            }
        }
    }
}

pub struct App {
    pub state: AppState,
    pub config: Config,
    pub catalog: Catalog,
    pub selected_menu_index: usize,
    pub notice: Option<String>,
    pub active: Option<ActiveSession>,
    pub should_quit: bool,
    store: Box<dyn QuestionStore>,
}

impl App {
    pub fn new(config: Config, catalog: Catalog, store: Box<dyn QuestionStore>) -> Self {
        Self {
            state: AppState::Menu,
            config,
            catalog,
            selected_menu_index: 0,
            notice: None,
            active: None,
            should_quit: false,
            store,
        }
    }

    pub fn menu_len(&self) -> usize {
        menu_entries(&self.catalog).len()
    }

    pub fn menu_up(&mut self) {
        self.selected_menu_index = self.selected_menu_index.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        if self.selected_menu_index < self.menu_len().saturating_sub(1) {
            self.selected_menu_index += 1;
        }
    }

    /// Starts whatever is highlighted in the menu. Load failures leave the
    /// app on the menu with a notice.
    pub fn start_selected(&mut self) -> io::Result<()> {
        let entries = menu_entries(&self.catalog);
        let Some(entry) = entries.get(self.selected_menu_index).copied() else {
            return Ok(());
        };

        let started = match entry {
            MenuEntry::Subject(i) => self.build_practice(i),
            MenuEntry::Exam(i) => self.build_exam(i),
        };

        match started {
            Ok(mut active) => {
                active.timer_mut().start()?;
                active.refresh();
                self.active = Some(active);
                self.notice = None;
                self.state = AppState::Quiz;
            }
            Err(err) => {
                logger::log(&format!("Could not start session: {}", err));
                self.notice = Some(err.to_string());
                self.back_to_menu();
            }
        }
        Ok(())
    }

    fn build_practice(&self, index: usize) -> Result<ActiveSession, QuizError> {
        let Some(subject) = self.catalog.subjects.get(index) else {
            return Err(QuizError::EmptyQuestionSet);
        };
        let questions = self.store.load(&subject.source)?;
        let session = QuizSession::start(questions)?;
        Ok(ActiveSession::Practice(PracticeRun {
            title: subject.name.clone(),
            session,
            timer: SessionTimer::new(self.config.tick),
            screen: ScreenModel::new(),
        }))
    }

    fn build_exam(&self, index: usize) -> Result<ActiveSession, QuizError> {
        let Some(config) = self.catalog.exams.get(index) else {
            return Err(QuizError::NoQuestionsAvailable);
        };
        let exam = MockExam::build(self.store.as_ref(), config.clone())?;
        Ok(ActiveSession::Exam(ExamRun {
            exam,
            timer: SessionTimer::new(self.config.tick),
            screen: ScreenModel::new(),
        }))
    }

    /// Discards the active session (and its timer).
    pub fn back_to_menu(&mut self) {
        self.active = None;
        self.state = AppState::Menu;
    }

    /// Applies pending timer ticks to the screen.
    pub fn tick(&mut self) {
        if let Some(active) = self.active.as_mut()
            && active.timer_mut().poll()
        {
            let elapsed = active.elapsed_secs();
            active.screen_mut().stats.elapsed_secs = elapsed;
        }
    }

    pub fn highlight_next(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.screen_mut().highlight_next();
            self.sync_exam_answer();
        }
    }

    pub fn highlight_previous(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.screen_mut().highlight_previous();
            self.sync_exam_answer();
        }
    }

    pub fn highlight(&mut self, index: usize) {
        if let Some(active) = self.active.as_mut()
            && active.screen_mut().highlight(index)
        {
            self.sync_exam_answer();
        }
    }

    /// Mock exams record the answer as soon as it is highlighted.
    fn sync_exam_answer(&mut self) {
        if let Some(ActiveSession::Exam(run)) = self.active.as_mut()
            && run.exam.mode() == Mode::Normal
            && let Some(choice) = run.screen.prompt_selection()
        {
            run.screen.notice = match run.exam.select(choice) {
                Ok(()) => None,
                Err(err) => {
                    logger::log(&format!("Exam answer not recorded: {}", err));
                    Some(err.to_string())
                }
            };
        }
    }

    /// The Enter key on the quiz screen: check the answer, or move on once
    /// feedback is showing.
    pub fn confirm(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let result = match active {
            ActiveSession::Practice(run) => {
                if run.screen.showing_feedback() {
                    run.session.advance();
                    Ok(())
                } else {
                    check_answer(run.screen.prompt_selection(), |choice| {
                        run.session.select(choice)?;
                        run.session.submit().map(|_| ())
                    })
                }
            }
            ActiveSession::Exam(run) => match run.exam.mode() {
                Mode::Review if run.screen.showing_feedback() => {
                    run.exam.advance();
                    Ok(())
                }
                Mode::Review => check_answer(run.screen.prompt_selection(), |choice| {
                    run.exam.select(choice)?;
                    run.exam.submit().map(|_| ())
                }),
                Mode::Normal => check_answer(run.screen.prompt_selection(), |choice| {
                    run.exam.select(choice)?;
                    run.exam.next().map(|step| {
                        if step == ExamStep::Finished {
                            logger::log("Exam answer sheet complete");
                        }
                    })
                }),
            },
        };

        match result {
            Ok(()) => {
                active.screen_mut().notice = None;
                if active.is_complete() {
                    self.finish();
                } else {
                    active.refresh();
                }
            }
            Err(err) => {
                active.screen_mut().notice = Some(err.to_string());
            }
        }
    }

    pub fn end_early(&mut self) {
        match self.active.as_mut() {
            Some(ActiveSession::Practice(run)) => run.session.end_early(),
            Some(ActiveSession::Exam(run)) => run.exam.end_early(),
            None => return,
        }
        self.finish();
    }

    fn finish(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.timer_mut().stop();
        }
        self.state = AppState::Summary;
    }

    pub fn restart(&mut self) -> io::Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        let restarted = match active {
            ActiveSession::Practice(run) => {
                run.session.restart();
                Ok(())
            }
            ActiveSession::Exam(run) => run.exam.restart(),
        };
        match restarted {
            Ok(()) => self.resume(None),
            Err(err) => {
                self.notice = Some(err.to_string());
                self.back_to_menu();
                Ok(())
            }
        }
    }

    pub fn review(&mut self) -> io::Result<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        let entry = match active {
            ActiveSession::Practice(run) => run.session.enter_review(),
            ActiveSession::Exam(run) => run.exam.enter_review(),
        };
        match entry {
            Ok(ReviewEntry::Started) => self.resume(None),
            Ok(ReviewEntry::Restarted) => self.resume(Some(
                "No mistakes to review, starting over with a fresh shuffle.".to_string(),
            )),
            Err(err) => {
                self.notice = Some(err.to_string());
                Ok(())
            }
        }
    }

    fn resume(&mut self, notice: Option<String>) -> io::Result<()> {
        if let Some(active) = self.active.as_mut() {
            *active.screen_mut() = ScreenModel::new();
            active.timer_mut().start()?;
            active.refresh();
            active.screen_mut().notice = notice;
            self.state = AppState::Quiz;
        }
        Ok(())
    }
}

fn check_answer(
    selection: Option<usize>,
    apply: impl FnOnce(usize) -> Result<(), QuizError>,
) -> Result<(), QuizError> {
    let choice = selection.ok_or(QuizError::NoSelection)?;
    apply(choice)
}
