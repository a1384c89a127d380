use thiserror::Error;

/// Invalid builder input. The client is never constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("flush_queue_size must not be less than 1")]
    FlushQueueSize,

    #[error("flush_interval must not be less than 1 second")]
    FlushInterval,

    #[error("write key must not be empty")]
    EmptyWriteKey,

    #[error("invalid endpoint url: {0}")]
    Endpoint(String),

    #[error("interceptor is already registered")]
    DuplicateInterceptor,

    #[error("no tokio runtime available to run the batch worker")]
    NoRuntime,
}

/// Producer-side errors returned by [`Analytics`](crate::Analytics) calls.
#[derive(Debug, Error)]
pub enum Error {
    #[error("client has been shut down")]
    ClientShutdown,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure reported by a [`Sender`](crate::Sender) implementation.
#[derive(Debug, Error)]
pub enum SenderError {
    #[error("endpoint returned status {code}")]
    Status { code: u16 },

    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure to deliver a sealed batch. The worker recovers locally: the
/// failure is logged, the batch is dropped and the loop continues.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to encode batch: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Send(#[from] SenderError),
}
