/*!
 * wifi-scheme-tui
 * Fuzzy scheme picker on top of the wifi-scheme state store
 */

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::sync::Mutex;
use tokio::time::{interval, Duration};

mod app;
mod ui;

use app::App;
use ui::render_ui;
use wifi_scheme::SchemeConfig;

#[derive(Parser)]
#[command(name = "wifi-scheme-tui")]
#[command(about = "Interactive wireless scheme picker")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = wifi_scheme::config::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Write debug logs to this file
    #[arg(short, long)]
    debug: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to a file; the terminal belongs to the UI
    if let Some(path) = &cli.debug {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter("wifi_scheme=debug,wifi_scheme_tui=debug")
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = SchemeConfig::load(&cli.config)?;
    let reconciler = config.reconciler()?;
    let mut app = App::new(config.catalog(), reconciler)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut ticker = interval(Duration::from_millis(50));

    let result = loop {
        match next_key() {
            Ok(Some(key)) => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Esc => break Ok(()),
                    KeyCode::Char('c') if ctrl => break Ok(()),
                    KeyCode::Char('r') if ctrl => app.refresh(),
                    KeyCode::Up => app.previous_scheme(),
                    KeyCode::Down => app.next_scheme(),
                    KeyCode::Left => app.cursor_left(),
                    KeyCode::Right => app.cursor_right(),
                    KeyCode::Backspace => app.delete_char(),
                    KeyCode::Enter => app.activate_selected(),
                    KeyCode::Char(c) => app.insert_char(c),
                    _ => {}
                }
            }
            Ok(None) => {}
            Err(e) => break Err(e.into()),
        }

        ticker.tick().await;

        if let Err(e) = terminal.draw(|f| render_ui(f, &app)) {
            break Err(e.into());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Next key press, if one is waiting.
fn next_key() -> io::Result<Option<KeyEvent>> {
    if !event::poll(Duration::from_millis(0))? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}
