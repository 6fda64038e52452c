use crate::config::DEFAULT_SUBJECT_QUOTA;
use crate::error::{LoadError, QuizError};
use crate::logger;
use crate::models::{AnswerOutcome, Mode, Question, Subject};
use crate::review::{ReviewQueue, record_mistake};
use crate::session::ReviewEntry;
use crate::store::QuestionStore;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::PathBuf;

/// A mock exam: which subjects it draws from and how many questions each
/// contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamConfig {
    pub title: String,
    pub subjects: Vec<Subject>,
    pub quota: usize,
}

impl ExamConfig {
    pub fn new(title: impl Into<String>, subjects: Vec<Subject>) -> Self {
        Self {
            title: title.into(),
            subjects,
            quota: DEFAULT_SUBJECT_QUOTA,
        }
    }

    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    pub fn period_one() -> Self {
        Self::new(
            "Period 1 Mock Exam",
            vec![
                Subject::new("Public Finance", "questions_finance.json"),
                Subject::new("Tax Law", "questions_taxlaw.json"),
            ],
        )
    }

    pub fn period_two() -> Self {
        Self::new(
            "Period 2 Mock Exam",
            vec![
                Subject::new("Accounting", "questions_accounting.json"),
                Subject::new("Commercial Law", "questions_commerciallaw.json"),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectScore {
    pub name: String,
    pub correct: usize,
    pub sampled: usize,
    pub quota: usize,
    /// `correct / quota * 100`, measured against the configured quota even
    /// when fewer questions were available.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExamResult {
    pub total_questions: usize,
    pub total_correct: usize,
    pub subjects: Vec<SubjectScore>,
    pub ended_early: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamStep {
    Next,
    Finished,
}

/// Timed multi-subject exam with forward-only navigation.
///
/// Answers are kept per position and scored once, when the exam finishes.
#[derive(Debug, Clone)]
pub struct MockExam {
    config: ExamConfig,
    pools: Vec<(Subject, Vec<Question>)>,
    questions: Vec<Question>,
    user_answers: Vec<Option<usize>>,
    position: usize,
    selected_choice: Option<usize>,
    mistakes: Vec<Question>,
    review: Option<ReviewQueue>,
    result: Option<ExamResult>,
}

impl MockExam {
    pub fn build<S: QuestionStore + ?Sized>(
        store: &S,
        config: ExamConfig,
    ) -> Result<Self, QuizError> {
        Self::build_with_rng(store, config, &mut rand::thread_rng())
    }

    /// Loads every subject pool, aborting on the first one that is unreadable
    /// or empty, then samples the exam.
    pub fn build_with_rng<S: QuestionStore + ?Sized, R: Rng + ?Sized>(
        store: &S,
        config: ExamConfig,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let mut pools = Vec::with_capacity(config.subjects.len());
        for subject in &config.subjects {
            let questions = store.load(&subject.source).map_err(|source| {
                logger::log(&format!("Failed to load {}: {}", subject.name, source));
                QuizError::SubjectLoadFailed {
                    subject: subject.name.clone(),
                    source,
                }
            })?;
            if questions.is_empty() {
                logger::log(&format!("No questions available for {}", subject.name));
                return Err(QuizError::SubjectLoadFailed {
                    subject: subject.name.clone(),
                    source: LoadError::Empty {
                        path: PathBuf::from(&subject.source),
                    },
                });
            }
            pools.push((subject.clone(), questions));
        }

        let mut exam = Self {
            config,
            pools,
            questions: Vec::new(),
            user_answers: Vec::new(),
            position: 0,
            selected_choice: None,
            mistakes: Vec::new(),
            review: None,
            result: None,
        };
        exam.sample(rng)?;
        Ok(exam)
    }

    fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        let mut questions = Vec::new();
        for (subject, pool) in &self.pools {
            let take = self.config.quota.min(pool.len());
            questions.extend(pool.choose_multiple(rng, take).map(|q| Question {
                subject_origin: Some(subject.name.clone()),
                ..q.clone()
            }));
        }
        questions.shuffle(rng);
        if questions.is_empty() {
            return Err(QuizError::NoQuestionsAvailable);
        }

        self.user_answers = vec![None; questions.len()];
        self.questions = questions;
        self.position = 0;
        self.selected_choice = None;
        self.mistakes.clear();
        self.review = None;
        self.result = None;
        logger::log(&format!(
            "Built {} with {} questions",
            self.config.title,
            self.questions.len()
        ));
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), QuizError> {
        self.restart_with_rng(&mut rand::thread_rng())
    }

    /// Draws a fresh exam from the pools loaded at build time.
    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        self.sample(rng)
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

    /// Records the choice for the current question. Outside review the
    /// answer sheet is updated immediately.
    pub fn select(&mut self, choice: usize) -> Result<(), QuizError> {
        if let Some(review) = self.review.as_mut() {
            return review.select(choice);
        }
        let len = self.current()?.choices.len();
        if choice >= len {
            return Err(QuizError::ChoiceOutOfRange { choice, len });
        }
        self.selected_choice = Some(choice);
        self.user_answers[self.position] = Some(choice);
        Ok(())
    }

    /// The forward "next" control of the exam.
    pub fn next(&mut self) -> Result<ExamStep, QuizError> {
        if self.review.is_some() {
            return Err(QuizError::SessionInProgress);
        }
        if self.position >= self.questions.len() {
            return Err(QuizError::SessionComplete);
        }
        let choice = self.selected_choice.ok_or(QuizError::NoSelection)?;
        self.user_answers[self.position] = Some(choice);
        self.position += 1;
        self.selected_choice = None;

        if self.position >= self.questions.len() {
            self.finish(false);
            Ok(ExamStep::Finished)
        } else {
            Ok(ExamStep::Next)
        }
    }

    /// Stops the exam and scores whatever has been answered so far.
    pub fn end_early(&mut self) {
        if self.review.take().is_some() {
            logger::log("Exam review abandoned");
            return;
        }
        if self.result.is_some() {
            return;
        }
        logger::log(&format!(
            "{} ended early at question {}/{}",
            self.config.title,
            self.position + 1,
            self.questions.len()
        ));
        self.position = self.questions.len();
        self.selected_choice = None;
        self.finish(true);
    }

    fn finish(&mut self, ended_early: bool) {
        let mut subjects: Vec<SubjectScore> = self
            .pools
            .iter()
            .map(|(subject, _)| SubjectScore {
                name: subject.name.clone(),
                correct: 0,
                sampled: 0,
                quota: self.config.quota,
                score: 0.0,
            })
            .collect();

        self.mistakes.clear();
        let mut total_correct = 0;
        for (question, answer) in self.questions.iter().zip(&self.user_answers) {
            let is_correct = answer.is_some_and(|choice| question.is_correct(choice));
            let tally = subjects
                .iter_mut()
                .find(|s| question.subject_origin.as_deref() == Some(s.name.as_str()));
            if let Some(tally) = tally {
                tally.sampled += 1;
                if is_correct {
                    tally.correct += 1;
                }
            }
            if is_correct {
                total_correct += 1;
            } else {
                record_mistake(&mut self.mistakes, question);
            }
        }

        for tally in &mut subjects {
            tally.score = normalized_score(tally.correct, tally.quota);
        }

        logger::log(&format!(
            "{} finished: {}/{} correct",
            self.config.title,
            total_correct,
            self.questions.len()
        ));
        self.result = Some(ExamResult {
            total_questions: self.questions.len(),
            total_correct,
            subjects,
            ended_early,
        });
    }

    pub fn enter_review(&mut self) -> Result<ReviewEntry, QuizError> {
        self.enter_review_with_rng(&mut rand::thread_rng())
    }

    pub fn enter_review_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<ReviewEntry, QuizError> {
        if self.result.is_none() {
            return Err(QuizError::SessionInProgress);
        }
        if self.mistakes.is_empty() {
            logger::log("No exam mistakes to review, drawing a new exam");
            self.restart_with_rng(rng)?;
            return Ok(ReviewEntry::Restarted);
        }
        self.review = Some(ReviewQueue::new(&self.mistakes, rng)?);
        logger::log(&format!(
            "Reviewing {} missed exam questions",
            self.mistakes.len()
        ));
        Ok(ReviewEntry::Started)
    }

    /// Grades the selection of the current review question. Only valid while
    /// reviewing; exam answers are graded when the exam finishes.
    pub fn submit(&mut self) -> Result<AnswerOutcome, QuizError> {
        match self.review.as_mut() {
            Some(review) => review.submit(),
            None => Err(QuizError::SessionInProgress),
        }
    }

    /// Moves to the next review question, leaving review when it runs out.
    pub fn advance(&mut self) {
        if let Some(review) = self.review.as_mut() {
            review.advance();
            if review.is_complete() {
                logger::log("Exam review finished");
                self.review = None;
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        match &self.review {
            Some(review) => review.is_complete(),
            None => self.position >= self.questions.len(),
        }
    }

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
        self.review.as_ref().and_then(|r| r.last_outcome())
    }

    pub fn config(&self) -> &ExamConfig {
        &self.config
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn user_answers(&self) -> &[Option<usize>] {
        &self.user_answers
    }

    pub fn answered_count(&self) -> usize {
        self.user_answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn mistakes(&self) -> &[Question] {
        &self.mistakes
    }

    pub fn result(&self) -> Option<&ExamResult> {
        self.result.as_ref()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

pub fn normalized_score(correct: usize, quota: usize) -> f64 {
    if quota == 0 {
        0.0
    } else {
        correct as f64 / quota as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    struct MemoryStore {
        pools: HashMap<String, Result<Vec<Question>, String>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                pools: HashMap::new(),
            }
        }

        fn with(mut self, source: &str, questions: Vec<Question>) -> Self {
            self.pools.insert(source.to_string(), Ok(questions));
            self
        }

        fn broken(mut self, source: &str) -> Self {
            self.pools
                .insert(source.to_string(), Err("disk on fire".to_string()));
            self
        }
    }

    impl QuestionStore for MemoryStore {
        fn load(&self, source: &str) -> Result<Vec<Question>, LoadError> {
            match self.pools.get(source) {
                Some(Ok(questions)) => Ok(questions.clone()),
                Some(Err(reason)) => Err(LoadError::Invalid {
                    path: PathBuf::from(source),
                    index: 0,
                    reason: reason.clone(),
                }),
                None => Err(LoadError::NotFound {
                    path: PathBuf::from(source),
                }),
            }
        }
    }

    fn pool(prefix: &str, n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                text: format!("{} {}", prefix, i),
                choices: vec!["a".into(), "b".into(), "c".into()],
                correct_choice_index: i % 3,
                explanation: String::new(),
                subject_origin: None,
            })
            .collect()
    }

    fn config(quota: usize) -> ExamConfig {
        ExamConfig::new(
            "Test Exam",
            vec![Subject::new("Alpha", "alpha.json"), Subject::new("Beta", "beta.json")],
        )
        .with_quota(quota)
    }

    fn count_subject(exam: &MockExam, name: &str) -> usize {
        exam.questions()
            .iter()
            .filter(|q| q.subject_origin.as_deref() == Some(name))
            .count()
    }

    fn answer_all(exam: &mut MockExam, pick: impl Fn(&Question) -> usize) {
        while let Ok(current) = exam.current() {
            let choice = pick(current);
            exam.select(choice).unwrap();
            if exam.next().unwrap() == ExamStep::Finished {
                break;
            }
        }
    }

    #[test]
    fn test_build_samples_quota_per_subject() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 60))
            .with("beta.json", pool("beta", 50));
        let mut rng = StdRng::seed_from_u64(42);
        let exam = MockExam::build_with_rng(&store, config(40), &mut rng).unwrap();

        assert_eq!(exam.questions().len(), 80);
        assert_eq!(count_subject(&exam, "Alpha"), 40);
        assert_eq!(count_subject(&exam, "Beta"), 40);
        assert_eq!(exam.user_answers().len(), 80);
        assert!(exam.user_answers().iter().all(|a| a.is_none()));

        let mut texts: Vec<_> = exam.questions().iter().map(|q| &q.text).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), 80, "sampling must not repeat questions");
    }

    #[test]
    fn test_small_pool_uses_everything_and_scores_against_quota() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 10))
            .with("beta.json", pool("beta", 40));
        let mut exam = MockExam::build(&store, config(40)).unwrap();
        assert_eq!(count_subject(&exam, "Alpha"), 10);

        answer_all(&mut exam, |q| q.correct_choice_index);

        let result = exam.result().unwrap();
        let alpha = result.subjects.iter().find(|s| s.name == "Alpha").unwrap();
        assert_eq!(alpha.correct, 10);
        assert_eq!(alpha.sampled, 10);
        assert_eq!(alpha.score, 25.0);
        let beta = result.subjects.iter().find(|s| s.name == "Beta").unwrap();
        assert_eq!(beta.score, 100.0);
        assert_eq!(result.total_correct, 50);
        assert!(!result.ended_early);
        assert!(exam.mistakes().is_empty());
    }

    #[test]
    fn test_build_aborts_when_a_subject_fails() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 5))
            .broken("beta.json");
        let err = MockExam::build(&store, config(40)).unwrap_err();
        assert!(matches!(err, QuizError::SubjectLoadFailed { ref subject, .. } if subject == "Beta"));
    }

    #[test]
    fn test_build_aborts_when_a_subject_is_empty() {
        let store = MemoryStore::new()
            .with("alpha.json", Vec::new())
            .with("beta.json", pool("beta", 5));
        let err = MockExam::build(&store, config(40)).unwrap_err();
        assert!(matches!(
            err,
            QuizError::SubjectLoadFailed {
                source: LoadError::Empty { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_zero_quota_yields_no_questions() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 5))
            .with("beta.json", pool("beta", 5));
        assert!(matches!(
            MockExam::build(&store, config(0)),
            Err(QuizError::NoQuestionsAvailable)
        ));
    }

    #[test]
    fn test_next_requires_selection() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 3))
            .with("beta.json", pool("beta", 3));
        let mut exam = MockExam::build(&store, config(40)).unwrap();
        assert!(matches!(exam.next(), Err(QuizError::NoSelection)));
        assert_eq!(exam.position(), 0);
        exam.select(1).unwrap();
        assert_eq!(exam.user_answers()[0], Some(1));
        assert_eq!(exam.next().unwrap(), ExamStep::Next);
        assert_eq!(exam.selected_choice(), None);
    }

    #[test]
    fn test_wrong_answers_feed_review_queue() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 4))
            .with("beta.json", pool("beta", 4));
        let mut exam = MockExam::build(&store, config(40)).unwrap();
        answer_all(&mut exam, |q| (q.correct_choice_index + 1) % 3);

        let result = exam.result().unwrap().clone();
        assert_eq!(result.total_correct, 0);
        assert_eq!(exam.mistakes().len(), 8);

        assert_eq!(exam.enter_review().unwrap(), ReviewEntry::Started);
        assert_eq!(exam.mode(), Mode::Review);
        assert!(matches!(exam.next(), Err(QuizError::SessionInProgress)));

        while let Ok(current) = exam.current() {
            let correct = current.correct_choice_index;
            exam.select(correct).unwrap();
            assert!(exam.submit().unwrap().is_correct());
            exam.advance();
        }
        assert_eq!(exam.mode(), Mode::Normal);
        assert_eq!(exam.result(), Some(&result), "review must not rescore");
    }

    #[test]
    fn test_identical_records_are_one_exam_mistake() {
        let twin = pool("alpha", 1).remove(0);
        let store = MemoryStore::new()
            .with("alpha.json", vec![twin.clone(), twin])
            .with("beta.json", pool("beta", 2));
        let mut exam = MockExam::build(&store, config(40)).unwrap();
        assert_eq!(count_subject(&exam, "Alpha"), 2);

        answer_all(&mut exam, |q| {
            if q.subject_origin.as_deref() == Some("Alpha") {
                (q.correct_choice_index + 1) % 3
            } else {
                q.correct_choice_index
            }
        });

        let result = exam.result().unwrap();
        let alpha = result.subjects.iter().find(|s| s.name == "Alpha").unwrap();
        assert_eq!(alpha.sampled, 2);
        assert_eq!(alpha.correct, 0);
        assert_eq!(exam.mistakes().len(), 1);

        assert_eq!(exam.enter_review().unwrap(), ReviewEntry::Started);
        assert_eq!(exam.progress(), (1, 1));
    }

    #[test]
    fn test_end_early_scores_unanswered_as_incorrect() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 5))
            .with("beta.json", pool("beta", 5));
        let mut exam = MockExam::build(&store, config(40)).unwrap();
        for _ in 0..3 {
            let correct = exam.current().unwrap().correct_choice_index;
            exam.select(correct).unwrap();
            exam.next().unwrap();
        }
        exam.end_early();

        assert!(exam.is_complete());
        assert_eq!(exam.position(), 10);
        let result = exam.result().unwrap();
        assert!(result.ended_early);
        assert_eq!(result.total_correct, 3);
        assert_eq!(exam.mistakes().len(), 7);
        assert!(matches!(exam.current(), Err(QuizError::SessionComplete)));
    }

    #[test]
    fn test_review_without_mistakes_draws_new_exam() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 2))
            .with("beta.json", pool("beta", 2));
        let mut exam = MockExam::build(&store, config(40)).unwrap();
        answer_all(&mut exam, |q| q.correct_choice_index);
        assert!(exam.result().is_some());

        assert_eq!(exam.enter_review().unwrap(), ReviewEntry::Restarted);
        assert!(exam.result().is_none());
        assert_eq!(exam.position(), 0);
        assert_eq!(exam.answered_count(), 0);
    }

    #[test]
    fn test_submit_outside_review_is_rejected() {
        let store = MemoryStore::new()
            .with("alpha.json", pool("alpha", 2))
            .with("beta.json", pool("beta", 2));
        let mut exam = MockExam::build(&store, config(40)).unwrap();
        exam.select(0).unwrap();
        assert!(matches!(exam.submit(), Err(QuizError::SessionInProgress)));
        assert_eq!(exam.last_outcome(), None);
    }

    #[test]
    fn test_normalized_score() {
        assert_eq!(normalized_score(10, 40), 25.0);
        assert_eq!(normalized_score(40, 40), 100.0);
        assert_eq!(normalized_score(3, 0), 0.0);
    }

    #[test]
    fn test_presets() {
        assert_eq!(ExamConfig::period_one().quota, 40);
        assert_eq!(ExamConfig::period_two().subjects[1].name, "Commercial Law");
    }
}
