mod app;
mod builder;
mod calendar;
mod render;
mod service;
mod store;
mod theme;

use app::App;
use builder::Builder;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use service::Environment;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use store::SessionStore;
use theme::Theme;

/// Terminal authoring tool for Quizdle crosswords
#[derive(Parser)]
#[command(name = "quizdle", version, about)]
struct Args {
    /// Service environment (local, test, production); defaults to QUIZDLE_ENV
    #[arg(long)]
    env: Option<String>,

    /// Session file override
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Color theme (dark, light, high-contrast)
    #[arg(long, default_value = "dark")]
    theme: String,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let service = match args.env.as_deref() {
        Some(name) => service::create_backend(Environment::from_name(name)),
        None => service::create_backend_auto(),
    };
    let store = match args.session_file {
        Some(path) => SessionStore::at(path),
        None => SessionStore::new(),
    };
    let builder = Builder::new(store, service);
    let theme = Theme::by_name(&args.theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, builder, theme);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, builder: Builder, theme: Theme) -> io::Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut app = App::new(builder, theme, today);
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.tick_rate();

        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with timeout for timer updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        // Tick message/flash timers
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    // Keep the draft and candidates for the next session
    app.builder.persist();

    Ok(())
}
