use anyhow::{Context, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::watch;

mod actions;
mod command_id;
mod dispatcher;
mod keybindings;
mod keymap;
mod logger;
mod middleware;
mod operations;
mod reducer;
mod state;
mod store;
mod utils;
mod view_models;
mod views;

#[cfg(test)]
mod test_support;

use actions::{Action, BootstrapAction, HistoryAction};
use dispatcher::Dispatcher;
use gh_client::{GitHubClient, ReqwestBackend, RestClient, TokenResolver, Transport};
use gh_workflow_config::AppConfig;
use gh_workflow_sync::SyncController;
use keymap::Keymap;
use middleware::{
    bootstrap_middleware::BootstrapMiddleware, logging::LoggingMiddleware,
    run_middleware::RunMiddleware, sync_middleware::SyncMiddleware,
    workflow_middleware::WorkflowMiddleware,
};
use operations::RepositorySource;
use state::AppState;
use store::Store;

fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting gh-workflow-lander, logging to {}", log_file.display());

    let config = AppConfig::load();
    let runtime = Runtime::new().context("Failed to start async runtime")?;

    let token = runtime.block_on(TokenResolver::new(config.token.clone()).resolve())?;
    let backend = ReqwestBackend::new(config.request_timeout())?;
    let transport = Transport::new(Arc::new(backend), config.api_url.as_str(), token);
    let client: Arc<dyn GitHubClient> = Arc::new(RestClient::new(transport));
    log::info!("Using GitHub API at {}", config.api_url);

    let controller = SyncController::new(client.clone(), runtime.handle().clone());
    let (contexts_tx, contexts_rx) = watch::channel(None);
    let listener = controller.spawn_listener(contexts_rx);

    let logs_dir = std::env::current_dir().context("Failed to determine working directory")?;
    let mut store = Store::new(AppState::default());

    // Middleware executes in insertion order
    store.add_middleware(Box::new(LoggingMiddleware::new()));
    store.add_middleware(Box::new(BootstrapMiddleware::new(
        client.clone(),
        runtime.handle().clone(),
        RepositorySource::from_config(&config),
    )));
    store.add_middleware(Box::new(SyncMiddleware::new(controller.clone(), contexts_tx)));
    store.add_middleware(Box::new(WorkflowMiddleware::new(
        client.clone(),
        runtime.handle().clone(),
        controller.force_refresh(),
        config.dispatch_inputs.clone(),
    )));
    store.add_middleware(Box::new(RunMiddleware::new(
        client,
        runtime.handle().clone(),
        controller.force_refresh(),
        logs_dir,
    )));

    forward_history(&runtime, &controller, store.dispatcher().clone());
    store.dispatch(Action::Bootstrap(BootstrapAction::Start));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let keymap = keymap::default_keymap();
    let result = run_app(&mut terminal, &mut store, &keymap, config.tick_rate());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.shutdown();
    if let Err(err) = runtime.block_on(listener) {
        log::warn!("Sync listener ended abnormally: {}", err);
    }
    runtime.shutdown_timeout(Duration::from_secs(1));

    log::info!("Exiting gh-workflow-lander");
    result
}

/// Feed every snapshot the controller publishes into the store
fn forward_history(runtime: &Runtime, controller: &SyncController, dispatcher: Dispatcher) {
    let mut published = controller.subscribe();
    runtime.spawn(async move {
        while published.changed().await.is_ok() {
            let history = published.borrow_and_update().clone();
            dispatcher.dispatch(Action::History(HistoryAction::Updated(history)));
        }
    });
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &mut Store,
    keymap: &Keymap,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        store.process_pending();

        terminal.draw(|frame| views::render(store.state(), keymap, frame))?;

        if !store.state().running {
            break;
        }

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = keymap.match_key(&key) {
                        store.dispatch(Action::from_command(command));
                    }
                }
            }
        }
    }

    Ok(())
}
