use crate::config::Catalog;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// A selectable row of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Subject(usize),
    Exam(usize),
}

pub fn menu_entries(catalog: &Catalog) -> Vec<MenuEntry> {
    (0..catalog.subjects.len())
        .map(MenuEntry::Subject)
        .chain((0..catalog.exams.len()).map(MenuEntry::Exam))
        .collect()
}

fn draw_panel_header(area: Rect, title: &str, focused: bool, f: &mut Frame) {
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let header = Paragraph::new(title)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default());

    f.render_widget(header, area);
}

fn item_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn draw_menu(f: &mut Frame, catalog: &Catalog, selected_index: usize, notice: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Exam Drill v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let entries = menu_entries(catalog);
    let selected = entries.get(selected_index).copied();

    let subject_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[1]);
    let exam_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[2]);

    draw_panel_header(
        subject_chunks[0],
        "[1] Practice by Subject",
        matches!(selected, Some(MenuEntry::Subject(_))),
        f,
    );
    let subject_items: Vec<ListItem> = if catalog.subjects.is_empty() {
        vec![ListItem::new("No subjects configured").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        catalog
            .subjects
            .iter()
            .enumerate()
            .map(|(i, subject)| {
                let is_selected = selected == Some(MenuEntry::Subject(i));
                let prefix = if is_selected { "> " } else { "  " };
                ListItem::new(format!("{}{} ({})", prefix, subject.name, subject.source))
                    .style(item_style(is_selected))
            })
            .collect()
    };
    f.render_widget(
        List::new(subject_items).block(Block::default().borders(Borders::ALL)),
        subject_chunks[1],
    );

    draw_panel_header(
        exam_chunks[0],
        "[2] Mock Exams",
        matches!(selected, Some(MenuEntry::Exam(_))),
        f,
    );
    let exam_items: Vec<ListItem> = catalog
        .exams
        .iter()
        .enumerate()
        .map(|(i, exam)| {
            let is_selected = selected == Some(MenuEntry::Exam(i));
            let prefix = if is_selected { "> " } else { "  " };
            let subjects: Vec<&str> = exam.subjects.iter().map(|s| s.name.as_str()).collect();
            ListItem::new(format!(
                "{}{} - {} x {} questions",
                prefix,
                exam.title,
                subjects.join(" + "),
                exam.quota
            ))
            .style(item_style(is_selected))
        })
        .collect();
    f.render_widget(
        List::new(exam_items).block(Block::default().borders(Borders::ALL)),
        exam_chunks[1],
    );

    let notice_widget = Paragraph::new(notice.unwrap_or(""))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(notice_widget, chunks[3]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Navigate  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Start  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_menu_entries_subjects_then_exams() {
        let catalog = Catalog::default();
        let entries = menu_entries(&catalog);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0], MenuEntry::Subject(0));
        assert_eq!(entries[4], MenuEntry::Exam(0));
    }

    #[test]
    fn test_draw_menu_lists_catalog_and_notice() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let catalog = Catalog::default();
        terminal
            .draw(|f| draw_menu(f, &catalog, 4, Some("Tax Law: file not found")))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Public Finance"));
        assert!(text.contains("> Period 1 Mock Exam"));
        assert!(text.contains("Tax Law: file not found"));
    }
}
