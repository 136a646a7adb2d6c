//! Application entry point

use std::io;
use std::path::PathBuf;

mod live_watcher;
mod snapshot;
mod stats;
mod theme;
mod tier;
mod ui;

/// Restore terminal to normal mode.
fn cleanup_terminal() {
    use std::io::Write;
    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    );
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

/// Install panic hook to restore terminal before printing error.
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        eprintln!("Application panicked!");
        if let Some(location) = panic_info.location() {
            eprintln!("Location: {}", location);
        }
        if let Some(payload) = panic_info.payload().downcast_ref::<&str>() {
            eprintln!("Message: {}", payload);
        } else if let Some(payload) = panic_info.payload().downcast_ref::<String>() {
            eprintln!("Message: {}", payload);
        }
        original_hook(panic_info);
    }));
}

fn main() -> io::Result<()> {
    env_logger::init();
    setup_panic_hook();

    let snapshot_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: session-stats-tui <snapshot.json>");
            eprintln!("Renders per-turn and cumulative session usage stats from a JSON snapshot.");
            std::process::exit(2);
        }
    };

    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    crossterm::terminal::enable_raw_mode()?;

    let backend = ratatui::backend::CrosstermBackend::new(std::io::stdout());
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = ui::App::new(snapshot_path).run(&mut terminal);

    cleanup_terminal();

    result
}
