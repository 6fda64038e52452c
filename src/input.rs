use crate::app::App;
use crate::models::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::io;

pub fn handle_key(app: &mut App, key: KeyEvent) -> io::Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    match app.state {
        AppState::Menu => handle_menu_input(app, key.code),
        AppState::Quiz => {
            handle_quiz_input(app, key.code);
            Ok(())
        }
        AppState::QuizQuitConfirm => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.back_to_menu(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Quiz;
                }
                _ => {}
            }
            Ok(())
        }
        AppState::Summary => handle_summary_input(app, key.code),
    }
}

fn handle_menu_input(app: &mut App, code: KeyCode) -> io::Result<()> {
    match code {
        KeyCode::Up => app.menu_up(),
        KeyCode::Down => app.menu_down(),
        KeyCode::Enter => app.start_selected()?,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
    Ok(())
}

fn handle_quiz_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.state = AppState::QuizQuitConfirm,
        KeyCode::Down => app.highlight_next(),
        KeyCode::Up => app.highlight_previous(),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(digit) = c.to_digit(10) {
                app.highlight(digit as usize - 1);
            }
        }
        KeyCode::Enter => app.confirm(),
        KeyCode::Char('e') => app.end_early(),
        _ => {}
    }
}

fn handle_summary_input(app: &mut App, code: KeyCode) -> io::Result<()> {
    match code {
        KeyCode::Char('r') => app.restart()?,
        KeyCode::Char('w') => app.review()?,
        KeyCode::Char('m') => app.back_to_menu(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
    Ok(())
}
