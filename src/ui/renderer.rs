use crate::config::Config;
use crate::logger::Logger;
use crate::store::OverlayStore;
use crate::ui::app_component::AppComponent;
use crate::ui::core::{Action, Component, EventHandler, EventType};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

/// Run the demo application until the user quits
pub async fn run_app(config: Config, logger: Logger) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // One store for the whole application
    let store = OverlayStore::new();
    let mut app = AppComponent::new(store, &config, logger);
    let mut event_handler = EventHandler::new(config.ui.tick_rate_ms);

    info!("Application started");
    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| {
                let area = f.area();
                app.render(f, area);
            })?;
            needs_render = false;
        }

        match event_handler.next_event().await? {
            EventType::Key(key) => {
                let action = app.handle_events(Some(Event::Key(key)));
                app.update(action);
                needs_render = true;
            }
            EventType::Resize(_, _) => {
                needs_render = true;
            }
            EventType::Tick | EventType::Other => {}
        }

        // Overlay callbacks and background tasks report through actions
        for action in app.process_background_actions() {
            if let Action::Quit = app.update(action) {
                return Ok(());
            }
        }

        // Redraw when an overlay changed outside of input handling
        if app.take_overlay_changes() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
