use crate::display::DisplaySurface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub is_correct: bool,
    pub explanation: String,
    pub correct_index: usize,
    pub selected_index: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsView {
    pub attempted: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub elapsed_secs: u64,
}

/// What the quiz screen currently shows. Filled by the presenters through
/// [`DisplaySurface`] and read back by the draw functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenModel {
    pub prefix: String,
    pub question: String,
    pub choices: Vec<String>,
    pub highlighted: Option<usize>,
    pub feedback: Option<FeedbackView>,
    pub stats: StatsView,
    pub progress: Option<(usize, usize)>,
    pub notice: Option<String>,
}

impl ScreenModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight_next(&mut self) {
        if self.choices.is_empty() || self.feedback.is_some() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.choices.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn highlight_previous(&mut self) {
        if self.choices.is_empty() || self.feedback.is_some() {
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Highlights choice `index` if it exists; returns whether it did.
    pub fn highlight(&mut self, index: usize) -> bool {
        if index < self.choices.len() && self.feedback.is_none() {
            self.highlighted = Some(index);
            true
        } else {
            false
        }
    }

    pub fn showing_feedback(&self) -> bool {
        self.feedback.is_some()
    }
}

impl DisplaySurface for ScreenModel {
    fn render_question(&mut self, text: &str, choices: &[String], prefix: &str) {
        let same_question = self.question == text && self.prefix == prefix;
        self.prefix = prefix.to_string();
        self.question = text.to_string();
        self.choices = choices.to_vec();
        self.feedback = None;
        if !same_question {
            self.highlighted = None;
        }
    }

    fn render_feedback(
        &mut self,
        is_correct: bool,
        explanation: &str,
        correct_index: usize,
        selected_index: usize,
    ) {
        self.feedback = Some(FeedbackView {
            is_correct,
            explanation: explanation.to_string(),
            correct_index,
            selected_index,
        });
    }

    fn render_stats(&mut self, attempted: u32, correct: u32, incorrect: u32, elapsed_secs: u64) {
        self.stats = StatsView {
            attempted,
            correct,
            incorrect,
            elapsed_secs,
        };
    }

    fn prompt_selection(&mut self) -> Option<usize> {
        self.highlighted
    }

    fn render_progress(&mut self, current: usize, total: usize) {
        self.progress = Some((current, total));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_with_choices(n: usize) -> ScreenModel {
        let mut screen = ScreenModel::new();
        let choices: Vec<String> = (0..n).map(|i| format!("choice {}", i)).collect();
        screen.render_question("Question?", &choices, "Q1.");
        screen
    }

    #[test]
    fn test_highlight_navigation_bounds() {
        let mut screen = screen_with_choices(3);
        assert_eq!(screen.prompt_selection(), None);
        screen.highlight_next();
        assert_eq!(screen.highlighted, Some(0));
        screen.highlight_next();
        screen.highlight_next();
        screen.highlight_next();
        assert_eq!(screen.highlighted, Some(2));
        screen.highlight_previous();
        assert_eq!(screen.prompt_selection(), Some(1));
    }

    #[test]
    fn test_highlight_rejects_missing_choice() {
        let mut screen = screen_with_choices(2);
        assert!(!screen.highlight(4));
        assert!(screen.highlight(1));
        assert_eq!(screen.highlighted, Some(1));
    }

    #[test]
    fn test_highlight_frozen_while_showing_feedback() {
        let mut screen = screen_with_choices(3);
        screen.highlight(0);
        screen.render_feedback(true, "why", 0, 0);
        assert!(!screen.highlight(2));
        screen.highlight_next();
        assert_eq!(screen.highlighted, Some(0));
    }

    #[test]
    fn test_new_question_clears_highlight_and_feedback() {
        let mut screen = screen_with_choices(3);
        screen.highlight(2);
        screen.render_feedback(false, "why", 0, 2);
        screen.render_question("Another?", &["x".to_string(), "y".to_string()], "Q2.");
        assert_eq!(screen.highlighted, None);
        assert!(!screen.showing_feedback());
    }

    #[test]
    fn test_rerender_same_question_keeps_highlight() {
        let mut screen = screen_with_choices(3);
        screen.highlight(1);
        let choices = screen.choices.clone();
        screen.render_question("Question?", &choices, "Q1.");
        assert_eq!(screen.highlighted, Some(1));
    }
}
