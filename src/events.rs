//! Events flowing from the stream supervisor to the UI loop.

use crate::models::ChatRecord;
use crate::ws::ConnectionState;

/// Notification that the application state changed underneath the UI.
///
/// Records land in the store before the event is sent, so a consumer that
/// only redraws from snapshots can ignore the payload.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A well-formed record was decoded and appended to the store.
    RecordArrived(ChatRecord),
    /// The stream's connectivity status changed.
    Connectivity(ConnectionState),
}
