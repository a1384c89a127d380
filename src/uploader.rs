use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_derive::Serialize;

use crate::error::UploadError;
use crate::message::Message;
use crate::sender::Sender;

/// Ordered run of messages sealed between two flush points. Handed to the
/// uploader by value and not retained afterwards.
pub(crate) struct Batch {
    messages: Vec<Message>,
}

impl Batch {
    pub(crate) fn seal(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub(crate) fn len(&self) -> usize {
        self.messages.len()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchPayload<'a> {
    batch: &'a [Message],
    sent_at: u64,
}

/// Serializes a sealed batch and hands it to the transport. Stateless with
/// respect to batch data.
pub(crate) struct Uploader {
    sender: Arc<dyn Sender>,
}

impl Uploader {
    pub(crate) fn new(sender: Arc<dyn Sender>) -> Self {
        Self { sender }
    }

    pub(crate) async fn upload(&self, batch: Batch) -> Result<usize, UploadError> {
        let count = batch.len();
        let payload = serde_json::to_vec(&BatchPayload {
            batch: &batch.messages,
            sent_at: epoch_millis(),
        })?;

        self.sender.send(&payload).await?;

        log::debug!(
            "uploaded batch of {} messages ({} bytes)",
            count,
            payload.len()
        );

        Ok(count)
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
