use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use chatwatch::app::App;
use chatwatch::config::Config;
use chatwatch::moderation::ModerationClient;
use chatwatch::store::MessageStore;
use chatwatch::ui;
use chatwatch::ws::{ChatStreamClient, StreamConfig};

use color_eyre::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Route tracing output to a log file when `CHATWATCH_LOG` is set.
///
/// The TUI owns stdout, so logs can never go there. Without the env var,
/// tracing stays uninitialized and all spans/events are no-ops.
fn init_tracing() {
    if std::env::var("CHATWATCH_LOG").is_err() {
        return;
    }
    let Some(dir) = dirs::data_local_dir() else {
        return;
    };
    let log_dir = dir.join("chatwatch");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("chatwatch.log"))
    else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(file)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = Config::from_env();

    let store = match config.max_records {
        Some(max) => MessageStore::with_max_records(max),
        None => MessageStore::new(),
    };
    let (event_tx, event_rx) = mpsc::channel(256);
    let stream_client = ChatStreamClient::start(
        StreamConfig {
            url: config.ws_url.clone(),
            reconnect_delay: config.reconnect_delay,
        },
        store.clone(),
        event_tx,
    );
    let moderation = Arc::new(ModerationClient::new(config.api_base_url.clone()));
    let mut app = App::new(&config, store, moderation);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Initial mount: seed the viewport with the current width before the
    // first layout pass; afterwards only resize events update it.
    let size = terminal.size()?;
    app.on_resize(size.width);

    let result = run_app(&mut terminal, &mut app, event_rx).await;

    stream_client.shutdown();
    restore_terminal(&mut terminal)?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut event_rx: mpsc::Receiver<chatwatch::events::AppEvent>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut input = EventStream::new();
    let mut events_open = true;

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            maybe_input = input.next() => {
                match maybe_input {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.on_key(key);
                    }
                    Some(Ok(Event::Resize(width, _))) => {
                        app.on_resize(width);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("terminal input error: {}", e);
                    }
                    None => break,
                }
            }
            maybe_event = event_rx.recv(), if events_open => {
                match maybe_event {
                    Some(event) => app.on_event(event),
                    // Supervisor gone; keep serving input until quit.
                    None => events_open = false,
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn restore_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
