use crate::error::QuizError;
use crate::models::{AnswerOutcome, Question};
use rand::Rng;
use rand::seq::SliceRandom;

/// Non-scoring replay of previously missed questions.
///
/// Owns its own shuffled copy of the mistakes and its own position, so
/// walking the queue never touches the parent session's counters.
#[derive(Debug, Clone)]
pub struct ReviewQueue {
    questions: Vec<Question>,
    position: usize,
    selected_choice: Option<usize>,
    last_outcome: Option<AnswerOutcome>,
}

impl ReviewQueue {
    pub fn new<R: Rng + ?Sized>(mistakes: &[Question], rng: &mut R) -> Result<Self, QuizError> {
        if mistakes.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        let mut questions = mistakes.to_vec();
        questions.shuffle(rng);
        Ok(Self {
            questions,
            position: 0,
            selected_choice: None,
            last_outcome: None,
        })
    }

    pub fn current(&self) -> Result<&Question, QuizError> {
        self.questions
            .get(self.position)
            .ok_or(QuizError::SessionComplete)
    }

    pub fn select(&mut self, choice: usize) -> Result<(), QuizError> {
        let len = self.current()?.choices.len();
        if choice >= len {
            return Err(QuizError::ChoiceOutOfRange { choice, len });
        }
        self.selected_choice = Some(choice);
        Ok(())
    }

    pub fn submit(&mut self) -> Result<AnswerOutcome, QuizError> {
        let question = self.current()?;
        if self.last_outcome.is_some() {
            return Err(QuizError::AlreadySubmitted);
        }
        let selected = self.selected_choice.ok_or(QuizError::NoSelection)?;
        let outcome = AnswerOutcome {
            selected,
            correct_index: question.correct_choice_index,
        };
        self.last_outcome = Some(outcome);
        Ok(outcome)
    }

    pub fn advance(&mut self) {
        self.position = (self.position + 1).min(self.questions.len());
        self.selected_choice = None;
        self.last_outcome = None;
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.questions.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_choice(&self) -> Option<usize> {
        self.selected_choice
    }

    pub fn last_outcome(&self) -> Option<AnswerOutcome> {
        self.last_outcome
    }
}

/// Appends `question` unless a structurally equal record is already present.
pub(crate) fn record_mistake(mistakes: &mut Vec<Question>, question: &Question) {
    if !mistakes.contains(question) {
        mistakes.push(question.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(text: &str, correct: usize) -> Question {
        Question {
            text: text.to_string(),
            choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_choice_index: correct,
            explanation: format!("because {}", text),
            subject_origin: None,
        }
    }

    #[test]
    fn test_review_rejects_empty_mistakes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            ReviewQueue::new(&[], &mut rng),
            Err(QuizError::EmptyQuestionSet)
        ));
    }

    #[test]
    fn test_review_is_a_permutation_of_mistakes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mistakes: Vec<_> = (0..6).map(|i| question(&format!("q{}", i), 0)).collect();
        let queue = ReviewQueue::new(&mistakes, &mut rng).unwrap();
        assert_eq!(queue.len(), 6);
        for q in &mistakes {
            assert!(queue.questions.contains(q));
        }
        assert_eq!(queue.position(), 0);
    }

    #[test]
    fn test_review_cycle_until_complete() {
        let mut rng = StdRng::seed_from_u64(3);
        let mistakes = vec![question("q1", 1), question("q2", 2)];
        let mut queue = ReviewQueue::new(&mistakes, &mut rng).unwrap();

        for _ in 0..2 {
            let correct = queue.current().unwrap().correct_choice_index;
            assert!(matches!(queue.submit(), Err(QuizError::NoSelection)));
            queue.select(correct).unwrap();
            let outcome = queue.submit().unwrap();
            assert!(outcome.is_correct());
            assert!(matches!(queue.submit(), Err(QuizError::AlreadySubmitted)));
            queue.advance();
        }

        assert!(queue.is_complete());
        assert!(matches!(queue.current(), Err(QuizError::SessionComplete)));
        queue.advance();
        assert_eq!(queue.position(), 2);
    }

    #[test]
    fn test_review_select_out_of_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut queue = ReviewQueue::new(&[question("q1", 0)], &mut rng).unwrap();
        assert!(matches!(
            queue.select(9),
            Err(QuizError::ChoiceOutOfRange { choice: 9, len: 4 })
        ));
        assert_eq!(queue.selected_choice(), None);
    }

    #[test]
    fn test_record_mistake_dedups_structurally() {
        let mut mistakes = Vec::new();
        record_mistake(&mut mistakes, &question("same", 0));
        record_mistake(&mut mistakes, &question("same", 0));
        record_mistake(&mut mistakes, &question("other", 0));
        assert_eq!(mistakes.len(), 2);
    }
}
