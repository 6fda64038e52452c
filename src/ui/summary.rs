use crate::exam::ExamResult;
use crate::models::{Question, SessionStats};
use crate::timer::format_elapsed;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_frame(f: &mut Frame, title: &str, body: Text, can_review: bool) {
    let layout = calculate_summary_chunks(f.area());

    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let summary = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let mut spans = vec![key_span("r"), Span::from(" Restart  ")];
    if can_review {
        spans.extend([key_span("w"), Span::from(" Review Mistakes  ")]);
    }
    spans.extend([
        key_span("m"),
        Span::from(" Main Menu  "),
        key_span("q"),
        Span::from(" Quit"),
    ]);
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

fn mistake_lines(text: &mut Text, mistakes: &[Question]) {
    if mistakes.is_empty() {
        return;
    }
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!("Missed questions ({}):", mistakes.len())));
    for (i, question) in mistakes.iter().enumerate() {
        text.push_line(Line::from(format!(
            "{}. {}",
            i + 1,
            truncate_string(&question.text, 70)
        )));
    }
}

pub fn practice_summary_text(
    stats: SessionStats,
    total: usize,
    elapsed_secs: u64,
    mistakes: &[Question],
) -> Text<'static> {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Quiz finished!",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "Answered {} of {} questions: {} correct, {} incorrect.",
        stats.attempted, total, stats.correct, stats.incorrect
    )));
    text.push_line(Line::from(format!(
        "Elapsed time: {}",
        format_elapsed(elapsed_secs)
    )));
    mistake_lines(&mut text, mistakes);
    text
}

pub fn exam_summary_text(
    result: &ExamResult,
    elapsed_secs: u64,
    mistakes: &[Question],
) -> Text<'static> {
    let mut text = Text::default();
    let headline = if result.ended_early {
        "Mock exam ended early."
    } else {
        "Mock exam finished!"
    };
    text.push_line(Line::from(Span::styled(
        headline,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "{} of {} questions correct.",
        result.total_correct, result.total_questions
    )));
    text.push_line(Line::from(format!(
        "Elapsed time: {}",
        format_elapsed(elapsed_secs)
    )));
    text.push_line(Line::from(""));
    for subject in &result.subjects {
        text.push_line(Line::from(format!(
            "- {}: {} correct (out of {}), score {:.1}",
            subject.name, subject.correct, subject.quota, subject.score
        )));
    }
    mistake_lines(&mut text, mistakes);
    text
}

pub fn draw_summary(f: &mut Frame, title: &str, body: Text, can_review: bool) {
    draw_frame(f, &format!("Summary - {}", title), body, can_review);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::SubjectScore;
    use ratatui::{Terminal, backend::TestBackend};

    fn plain(text: &Text) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_practice_summary_text() {
        let stats = SessionStats {
            attempted: 3,
            correct: 2,
            incorrect: 1,
        };
        let missed = Question {
            text: "What is depreciation?".to_string(),
            choices: vec!["a".into(), "b".into()],
            correct_choice_index: 0,
            explanation: String::new(),
            subject_origin: None,
        };
        let text = plain(&practice_summary_text(stats, 10, 75, &[missed]));
        assert!(text.contains("Answered 3 of 10 questions: 2 correct, 1 incorrect."));
        assert!(text.contains("Elapsed time: 01:15"));
        assert!(text.contains("1. What is depreciation?"));
    }

    #[test]
    fn test_exam_summary_text_scores() {
        let result = ExamResult {
            total_questions: 50,
            total_correct: 50,
            subjects: vec![SubjectScore {
                name: "Accounting".to_string(),
                correct: 10,
                sampled: 10,
                quota: 40,
                score: 25.0,
            }],
            ended_early: false,
        };
        let text = plain(&exam_summary_text(&result, 0, &[]));
        assert!(text.contains("Mock exam finished!"));
        assert!(text.contains("- Accounting: 10 correct (out of 40), score 25.0"));
        assert!(!text.contains("Missed questions"));
    }

    #[test]
    fn test_draw_summary_hides_review_without_mistakes() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let body = practice_summary_text(SessionStats::default(), 4, 0, &[]);
        terminal
            .draw(|f| draw_summary(f, "Tax Law", body, false))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Summary - Tax Law"));
        assert!(!text.contains("Review Mistakes"));
    }
}
