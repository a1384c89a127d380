use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::error::{ConfigError, SenderError};

/// Ingestion endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.segment.io/v1/import";

/// Transport boundary: delivers one serialized batch payload.
///
/// The pipeline treats any error as an upload failure, there is no retry.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, payload: &[u8]) -> Result<(), SenderError>;
}

/// Default [`Sender`]: HTTP POST with basic-auth credentials built from the
/// write key. The write key is attached as-is, never interpreted.
pub struct HttpSender {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    write_key: String,
}

impl HttpSender {
    pub fn new(endpoint: &str, write_key: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint
            .parse()
            .map_err(|_| ConfigError::Endpoint(endpoint.to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            write_key: write_key.into(),
        })
    }
}

#[async_trait]
impl Sender for HttpSender {
    async fn send(&self, payload: &[u8]) -> Result<(), SenderError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.write_key, Some(""))
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_vec())
            .send()
            .await
            .map_err(|err| SenderError::Transport(Box::new(err)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SenderError::Status {
                code: status.as_u16(),
            });
        }

        Ok(())
    }
}
