mod activity;
mod app;
mod cli;
mod config;
mod event;
mod model;
mod session;
mod store;
mod ui;

use std::io;
use std::panic;

use anyhow::{bail, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{Action, App};
use session::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Load config
    let config = config::load_config()?;

    match args.first().map(String::as_str) {
        Some("add") => return cli::handle_add(&config, &args[1..]),
        Some("print") => return cli::handle_print(&config),
        Some("delete") => return cli::handle_delete(&config, &args[1..]),
        Some("reset") => return cli::handle_reset(&config),
        Some("log") => return cli::handle_log(&config),
        Some("help" | "-h" | "--help") => {
            cli::print_help();
            return Ok(());
        }
        Some(other) => bail!("Unknown command: {other}\n\nRun `subtasks help` for usage."),
        None => {}
    }

    // Create app (loads and re-saves the drafts)
    let mut app = App::new(Session::open(&config))?;

    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Spawn event reader
    tokio::spawn(event::run_event_loop(action_tx));

    // Main loop
    loop {
        // Render
        terminal.draw(|f| ui::render(f, &app))?;

        // Wait for action
        if let Some(action) = action_rx.recv().await {
            app.update(action);
            if app.should_quit {
                break;
            }
        } else {
            break;
        }
    }

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    // Leave the results in the scroll-back for copying
    for line in app.result_lines() {
        println!("{line}");
    }

    Ok(())
}
