//! Terminal User Interface Module
//!
//! Interactive browser for the corpus market catalog.
//! Built with Ratatui for terminal rendering.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  🗃 台灣中文語料資料市集                          [l] 登入  註冊 │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  資料集分類                                                      │
//! │  ┌ 新聞內容 ┐ ┌ 期刊內容 ┐ ┌ 圖書內容 ┐ ┌ 教育內容 ┐             │
//! │  熱門資料集                                                      │
//! │  ┌ dataset ─┐ ┌ dataset ─┐ ┌ dataset ─┐                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  [←→] 選擇  [Enter] 開啟  [l] 登入/登出  [q] 離開  [?] 說明      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, Overlay};
pub use event::{AppAction, EventHandler};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI application
pub async fn run(config: crate::config::Config) -> anyhow::Result<()> {
    info!("Starting TUI mode");

    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);

    // Initialize terminal
    let mut terminal = init_terminal()?;

    // Create application state and load the catalog in the background
    let mut app = App::new(config);
    app.start_loading();

    // Create event handler
    let mut events = EventHandler::new(tick_rate);

    // Main loop
    let result = run_app(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle async events from the loader
        app.poll_events();

        // Handle user input; ticks keep the loop redrawing
        match events.next().await {
            Some(AppAction::Quit) | Some(AppAction::ForceQuit) | None => break,
            Some(action) => app.handle_action(action),
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
