use crate::timer::format_elapsed;
use crate::ui::layout::calculate_quiz_chunks;
use crate::ui::screen::ScreenModel;
use crate::utils::{CHOICE_WRAP_WIDTH, wrap_choice_text};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Which controls the quiz screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizKind {
    Practice,
    Exam,
    Review,
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn header_text(title: &str, screen: &ScreenModel, kind: QuizKind) -> String {
    let progress = screen
        .progress
        .map(|(current, total)| format!("Question {} / {}", current, total))
        .unwrap_or_default();
    let stats = match kind {
        QuizKind::Exam => format!("Answered: {}", screen.stats.attempted),
        QuizKind::Practice | QuizKind::Review => format!(
            "Attempted: {}  Correct: {}  Incorrect: {}",
            screen.stats.attempted, screen.stats.correct, screen.stats.incorrect
        ),
    };
    format!(
        "{} - {}  |  {}  |  Time {}",
        title,
        progress,
        stats,
        format_elapsed(screen.stats.elapsed_secs)
    )
}

fn choice_items(screen: &ScreenModel) -> Vec<ListItem<'static>> {
    screen
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let label = format!("{}. {}", i + 1, wrap_choice_text(choice, CHOICE_WRAP_WIDTH));
            let style = match &screen.feedback {
                Some(feedback) if i == feedback.correct_index => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Some(feedback) if i == feedback.selected_index => {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                }
                Some(_) => Style::default().fg(Color::DarkGray),
                None if screen.highlighted == Some(i) => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                None => Style::default(),
            };
            let marker = if screen.highlighted == Some(i) { "> " } else { "  " };
            let mut lines = label.lines();
            let mut text = Text::default();
            if let Some(first) = lines.next() {
                text.push_line(Line::from(format!("{}{}", marker, first)));
            }
            for rest in lines {
                text.push_line(Line::from(format!("     {}", rest)));
            }
            ListItem::new(text).style(style)
        })
        .collect()
}

fn feedback_text(screen: &ScreenModel) -> Text<'static> {
    let mut text = Text::default();
    if let Some(feedback) = &screen.feedback {
        let verdict = if feedback.is_correct {
            Span::styled(
                "Correct!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("Incorrect. The answer is {}.", feedback.correct_index + 1),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };
        text.push_line(Line::from(verdict));
        if !feedback.explanation.is_empty() {
            text.push_line(Line::from(feedback.explanation.clone()));
        }
    } else if let Some(notice) = &screen.notice {
        text.push_line(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    text
}

fn help_lines(screen: &ScreenModel, kind: QuizKind) -> Vec<Line<'static>> {
    let mut basic_spans = vec![
        Span::styled("↑/↓ 1-5", key_style()),
        Span::from(" Select  "),
    ];
    let enter_label = match (kind, screen.showing_feedback()) {
        (_, true) => " Next  ",
        (QuizKind::Exam, false) => " Next  ",
        (QuizKind::Practice | QuizKind::Review, false) => " Check  ",
    };
    basic_spans.extend([
        Span::styled("Enter", key_style()),
        Span::from(enter_label),
        Span::styled("e", key_style()),
        Span::from(" End early  "),
        Span::styled("Esc", key_style()),
        Span::from(" Quit to Menu"),
    ]);

    vec![
        Line::from(basic_spans),
        Line::from(vec![
            Span::styled("Ctrl+C", key_style()),
            Span::from(" Exit App"),
        ]),
    ]
}

pub fn draw_quiz(f: &mut Frame, title: &str, screen: &ScreenModel, kind: QuizKind) {
    let layout = calculate_quiz_chunks(f.area());

    let header = Paragraph::new(header_text(title, screen, kind))
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let question_title = if kind == QuizKind::Review {
        "Review"
    } else {
        "Question"
    };
    let question = Paragraph::new(format!("{} {}", screen.prefix, screen.question))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(question_title));
    f.render_widget(question, layout.question_area);

    let choices = List::new(choice_items(screen))
        .block(Block::default().borders(Borders::ALL).title("Choices"));
    f.render_widget(choices, layout.choices_area);

    let feedback = Paragraph::new(feedback_text(screen))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Explanation"));
    f.render_widget(feedback, layout.feedback_area);

    let help = Paragraph::new(help_lines(screen, kind))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Return to the main menu? Progress in this session is discarded.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue)  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
