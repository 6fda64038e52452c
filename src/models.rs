/// A validated multiple-choice question.
///
/// Equality is structural: two records with the same text, choices, answer,
/// explanation and subject tag are the same question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub choices: Vec<String>,
    pub correct_choice_index: usize,
    pub explanation: String,
    pub subject_origin: Option<String>,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        self.correct_choice_index == choice
    }
}

/// Result of submitting one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub selected: usize,
    pub correct_index: usize,
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        self.selected == self.correct_index
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub attempted: u32,
    pub correct: u32,
    pub incorrect: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Review,
}

/// A practice subject and the question file backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub source: String,
}

impl Subject {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
}
