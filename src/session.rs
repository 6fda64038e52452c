use crate::error::QuizError;
use crate::logger;
use crate::models::{AnswerOutcome, Mode, Question, SessionStats};
use crate::review::{ReviewQueue, record_mistake};
use rand::Rng;
use rand::seq::SliceRandom;

/// What happened when the user asked for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewEntry {
    Started,
    /// There were no mistakes; the session was restarted instead.
    Restarted,
}

/// Single-subject practice session.
///
/// Invariants: `position <= questions.len()`,
/// `stats.attempted == stats.correct + stats.incorrect`, and each question
/// appears at most once in `mistakes`.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    position: usize,
    selected_choice: Option<usize>,
    last_outcome: Option<AnswerOutcome>,
    stats: SessionStats,
    mistakes: Vec<Question>,
    review: Option<ReviewQueue>,
}

impl QuizSession {
    pub fn start(questions: Vec<Question>) -> Result<Self, QuizError> {
        Self::start_with_rng(questions, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        questions: Vec<Question>,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        let mut session = Self {
            questions,
            position: 0,
            selected_choice: None,
            last_outcome: None,
            stats: SessionStats::default(),
            mistakes: Vec::new(),
            review: None,
        };
        session.reset(rng);
        logger::log(&format!(
            "Started practice session with {} questions",
            session.questions.len()
        ));
        Ok(session)
    }

    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
        self.position = 0;
        self.selected_choice = None;
        self.last_outcome = None;
        self.stats = SessionStats::default();
        self.mistakes.clear();
        self.review = None;
    }

    pub fn mode(&self) -> Mode {
        if self.review.is_some() {
            Mode::Review
        } else {
            Mode::Normal
        }
    }

    pub fn current(&self) -> Result<&Question, QuizError> {
        match &self.review {
            Some(review) => review.current(),
            None => self
                .questions
                .get(self.position)
                .ok_or(QuizError::SessionComplete),
        }
    }

    pub fn select(&mut self, choice: usize) -> Result<(), QuizError> {
        if let Some(review) = self.review.as_mut() {
            return review.select(choice);
        }
        let len = self.current()?.choices.len();
        if choice >= len {
            return Err(QuizError::ChoiceOutOfRange { choice, len });
        }
        self.selected_choice = Some(choice);
        Ok(())
    }

    /// Grades the recorded selection. Only normal mode updates the counters
    /// and the mistake list.
    pub fn submit(&mut self) -> Result<AnswerOutcome, QuizError> {
        if let Some(review) = self.review.as_mut() {
            return review.submit();
        }

        let Some(question) = self.questions.get(self.position) else {
            return Err(QuizError::SessionComplete);
        };
        if self.last_outcome.is_some() {
            return Err(QuizError::AlreadySubmitted);
        }
        let selected = self.selected_choice.ok_or(QuizError::NoSelection)?;

        let outcome = AnswerOutcome {
            selected,
            correct_index: question.correct_choice_index,
        };
        self.stats.attempted += 1;
        if outcome.is_correct() {
            self.stats.correct += 1;
        } else {
            self.stats.incorrect += 1;
            record_mistake(&mut self.mistakes, question);
        }
        self.last_outcome = Some(outcome);
        Ok(outcome)
    }

    pub fn advance(&mut self) {
        if let Some(review) = self.review.as_mut() {
            review.advance();
            if review.is_complete() {
                logger::log("Review finished");
                self.review = None;
            }
            return;
        }
        self.position = (self.position + 1).min(self.questions.len());
        self.selected_choice = None;
        self.last_outcome = None;
    }

    /// Jumps to the terminal state. Unanswered questions stay unscored and an
    /// active review is abandoned.
    pub fn end_early(&mut self) {
        logger::log(&format!(
            "Session ended early at {}/{} ({} attempted)",
            self.position,
            self.questions.len(),
            self.stats.attempted
        ));
        self.review = None;
        self.position = self.questions.len();
        self.selected_choice = None;
        self.last_outcome = None;
    }

    pub fn restart(&mut self) {
        self.restart_with_rng(&mut rand::thread_rng());
    }

    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reset(rng);
        logger::log("Practice session restarted");
    }

    pub fn enter_review(&mut self) -> Result<ReviewEntry, QuizError> {
        self.enter_review_with_rng(&mut rand::thread_rng())
    }

    pub fn enter_review_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<ReviewEntry, QuizError> {
        if !self.is_complete() {
            return Err(QuizError::SessionInProgress);
        }
        if self.mistakes.is_empty() {
            logger::log("No mistakes to review, restarting instead");
            self.restart_with_rng(rng);
            return Ok(ReviewEntry::Restarted);
        }
        self.review = Some(ReviewQueue::new(&self.mistakes, rng)?);
        logger::log(&format!("Reviewing {} missed questions", self.mistakes.len()));
        Ok(ReviewEntry::Started)
    }

    /// True once the active list (review or normal) has no pending question.
    pub fn is_complete(&self) -> bool {
        match &self.review {
            Some(review) => review.is_complete(),
            None => self.position >= self.questions.len(),
        }
    }

    /// 1-based number of the current question and the size of the active list.
    pub fn progress(&self) -> (usize, usize) {
        match &self.review {
            Some(review) => (review.position() + 1, review.len()),
            None => (self.position + 1, self.questions.len()),
        }
    }

    pub fn selected_choice(&self) -> Option<usize> {
        match &self.review {
            Some(review) => review.selected_choice(),
            None => self.selected_choice,
        }
    }

    pub fn last_outcome(&self) -> Option<AnswerOutcome> {
        match &self.review {
            Some(review) => review.last_outcome(),
            None => self.last_outcome,
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn mistakes(&self) -> &[Question] {
        &self.mistakes
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
