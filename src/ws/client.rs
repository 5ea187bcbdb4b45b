use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch, Notify};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::events::AppEvent;
use crate::models::ChatRecord;
use crate::store::MessageStore;

/// Fixed delay between reconnection attempts. No backoff growth and no
/// attempt cap; the supervisor retries until torn down.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Externally observable connectivity status of the stream.
///
/// Transitions are driven exclusively by the supervisor task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        }
    }
}

/// Configuration for the stream supervisor.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub url: String,
    pub reconnect_delay: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: "wss://omfs24.com:8080/".to_string(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

/// Handle to the background stream supervisor.
///
/// Starting the client spawns a task that cycles through
/// `Disconnected -> Connecting -> Connected -> Disconnected -> ...` forever.
/// Decoded records are appended to the [`MessageStore`] in arrival order; a
/// malformed payload is discarded without disturbing the connection.
/// Dropping the handle tears the connection down and cancels any pending
/// reconnection timer.
pub struct ChatStreamClient {
    state_rx: watch::Receiver<ConnectionState>,
    shutdown: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

impl ChatStreamClient {
    /// Spawn the supervisor. Returns immediately; the initial connection
    /// attempt (and every retry) happens on the background task.
    pub fn start(
        config: StreamConfig,
        store: MessageStore,
        events: mpsc::Sender<AppEvent>,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        let shutdown = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());

        tokio::spawn(run_supervisor(
            config,
            store,
            events,
            state_tx,
            shutdown.clone(),
            wake.clone(),
        ));

        Self {
            state_rx,
            shutdown,
            wake,
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    /// Subscribe to connectivity changes.
    pub fn state_receiver(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Tear down the supervisor: close the active transport and cancel any
    /// pending reconnection. No reconnection attempt fires after this call.
    pub fn shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            info!("shutting down chat stream client");
        }
        // notify_one stores a permit, so a supervisor that is between await
        // points still observes the wake on its next timer or read.
        self.wake.notify_one();
    }
}

impl Drop for ChatStreamClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_supervisor(
    config: StreamConfig,
    store: MessageStore,
    events: mpsc::Sender<AppEvent>,
    state_tx: watch::Sender<ConnectionState>,
    shutdown: Arc<AtomicBool>,
    wake: Arc<Notify>,
) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        publish_state(&state_tx, &events, ConnectionState::Connecting).await;

        match connect_async(&config.url).await {
            Ok((stream, _)) => {
                info!("connected to {}", config.url);
                publish_state(&state_tx, &events, ConnectionState::Connected).await;
                read_stream(stream, &store, &events, &wake).await;
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
                publish_state(&state_tx, &events, ConnectionState::Disconnected).await;
            }
            Err(e) => {
                warn!("connection to {} failed: {}", config.url, e);
                publish_state(&state_tx, &events, ConnectionState::Disconnected).await;
            }
        }

        debug!("reconnecting in {:?}", config.reconnect_delay);
        tokio::select! {
            _ = tokio::time::sleep(config.reconnect_delay) => {}
            _ = wake.notified() => {}
        }
        // Checked after the timer so a teardown requested during the wait
        // never schedules another attempt.
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
    }

    let _ = state_tx.send(ConnectionState::Disconnected);
    debug!("stream supervisor ended");
}

/// Consume the stream until it closes, errors, or shutdown is requested.
async fn read_stream(
    stream: WsStream,
    store: &MessageStore,
    events: &mpsc::Sender<AppEvent>,
    wake: &Notify,
) {
    let (mut sink, mut stream) = stream.split();

    loop {
        tokio::select! {
            _ = wake.notified() => {
                debug!("closing stream for shutdown");
                let _ = sink.close().await;
                return;
            }
            msg = stream.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    handle_payload(&text, store, events).await;
                }
                Some(Ok(Message::Ping(data))) => {
                    let _ = sink.send(Message::Pong(data)).await;
                }
                Some(Ok(Message::Close(frame))) => {
                    match frame {
                        Some(f) => info!("server closed stream: {} {}", f.code, f.reason),
                        None => info!("server closed stream"),
                    }
                    return;
                }
                Some(Ok(_)) => {
                    // Binary and pong frames are not part of the feed.
                }
                Some(Err(e)) => {
                    warn!("stream error: {}", e);
                    return;
                }
                None => {
                    info!("stream ended");
                    return;
                }
            }
        }
    }
}

/// Decode one inbound payload and append it to the store.
///
/// A payload that fails to decode is dropped on its own; the connection
/// stays open and later payloads are unaffected.
async fn handle_payload(text: &str, store: &MessageStore, events: &mpsc::Sender<AppEvent>) {
    match serde_json::from_str::<ChatRecord>(text) {
        Ok(record) => {
            debug!(chat_id = %record.chat_id, "chat record received");
            store.append(record.clone());
            // The store is the sink; a missing UI consumer is not an error.
            let _ = events.send(AppEvent::RecordArrived(record)).await;
        }
        Err(e) => {
            warn!("discarding malformed chat payload: {}", e);
        }
    }
}

async fn publish_state(
    state_tx: &watch::Sender<ConnectionState>,
    events: &mpsc::Sender<AppEvent>,
    state: ConnectionState,
) {
    let _ = state_tx.send(state);
    let _ = events.send(AppEvent::Connectivity(state)).await;
}
