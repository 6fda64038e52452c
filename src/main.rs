use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use exam_drill::{App, Catalog, Config, JsonDirStore, handle_key, logger, ui};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

const INPUT_POLL: Duration = Duration::from_millis(200);

fn main() -> io::Result<()> {
    let config = Config::from_env();
    logger::init(&config.log_file);
    logger::log("Exam drill starting");

    let catalog = Catalog::with_quota(config.subject_quota).with_discovered(&config.data_dir);
    let store = JsonDirStore::new(config.data_dir.clone());
    let mut app = App::new(config, catalog, Box::new(store));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Stop the session timer before the terminal is handed back.
    app.back_to_menu();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        logger::log(&format!("Exiting with error: {}", e));
    }
    logger::log("Exam drill exiting");
    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key)?;
        }
        app.tick();
    }
    Ok(())
}
