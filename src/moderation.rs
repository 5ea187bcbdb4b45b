//! Toxicity flag synchronization with the moderation authority.
//!
//! The local store is updated optimistically before the network call, so the
//! UI never waits on the request. A failed sync is logged and the local flag
//! stands for the rest of the session.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::ChatId;

/// One flag change to report to the remote authority.
#[derive(Debug, Clone, Serialize)]
pub struct ToxicityUpdate {
    pub channel: String,
    pub chat_id: ChatId,
    pub is_toxic: bool,
    /// Send time of the flagged message, epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned status {status}")]
    Status { status: u16 },
}

/// Seam for the moderation update call, mockable in tests.
#[async_trait]
pub trait ModerationApi: Send + Sync {
    async fn update_toxicity(&self, update: &ToxicityUpdate) -> Result<(), ModerationError>;
}

/// HTTP-backed moderation client.
///
/// Posts each flag change as JSON to `{base_url}/chats/toxicity`. The
/// response body is not consumed; any non-2xx status counts as failure.
pub struct ModerationClient {
    http: reqwest::Client,
    base_url: String,
}

impl ModerationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chats/toxicity", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ModerationApi for ModerationClient {
    async fn update_toxicity(&self, update: &ToxicityUpdate) -> Result<(), ModerationError> {
        let response = self.http.post(self.endpoint()).json(update).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ModerationError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Fire-and-forget flag sync.
///
/// The caller has already applied the flag to the store; this only reports
/// it upstream. Failure is a warning, never a rollback.
pub fn spawn_toxicity_sync(api: Arc<dyn ModerationApi>, update: ToxicityUpdate) {
    tokio::spawn(async move {
        match api.update_toxicity(&update).await {
            Ok(()) => {
                debug!(chat_id = %update.chat_id, is_toxic = update.is_toxic, "toxicity synced");
            }
            Err(e) => {
                warn!(
                    chat_id = %update.chat_id,
                    "toxicity sync failed, keeping local flag: {}", e
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = ModerationClient::new("https://example.com/api/");
        assert_eq!(client.endpoint(), "https://example.com/api/chats/toxicity");

        let client = ModerationClient::new("https://example.com/api");
        assert_eq!(client.endpoint(), "https://example.com/api/chats/toxicity");
    }

    #[test]
    fn test_update_serializes_all_fields() {
        let update = ToxicityUpdate {
            channel: "omfs24".to_string(),
            chat_id: ChatId::from("m-1"),
            is_toxic: true,
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["channel"], "omfs24");
        assert_eq!(json["chat_id"], "m-1");
        assert_eq!(json["is_toxic"], true);
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_integer_id_serializes_as_number() {
        let update = ToxicityUpdate {
            channel: "omfs24".to_string(),
            chat_id: ChatId::from(42),
            is_toxic: false,
            timestamp: 1,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["chat_id"], 42);
    }
}
