//! EventPipe batches analytics events and uploads them to an ingestion
//! endpoint in the background.
//!
//! Messages pass through an interceptor chain, accumulate in an in-memory
//! queue and are flushed by a single worker task when either the batch size
//! or the flush interval is reached. Callers never block on the network.
//!
//! ```rust,no_run
//! use eventpipe::{Analytics, Message};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let analytics = Analytics::builder("write-key").build()?;
//!
//!     analytics.enqueue(
//!         Message::track("Signed Up")
//!             .user_id("u-42")
//!             .property("plan", "pro")
//!             .build(),
//!     )?;
//!
//!     analytics.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! The pipeline keeps no persisted state: whatever has not been flushed when
//! the process exits is lost.

pub mod analytics;
pub mod builder;
pub mod error;
pub mod interceptor;
pub mod message;
pub mod sender;
pub mod stats;

mod queue;
mod uploader;
mod worker;

pub use analytics::Analytics;
pub use builder::{AnalyticsBuilder, DEFAULT_FLUSH_INTERVAL, DEFAULT_FLUSH_QUEUE_SIZE};
pub use error::{ConfigError, Error, SenderError, UploadError};
pub use interceptor::MessageInterceptor;
pub use message::{Message, MessageBuilder, MessageKind};
pub use sender::{HttpSender, Sender, DEFAULT_ENDPOINT};
pub use stats::Stats;
