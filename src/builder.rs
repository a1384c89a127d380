use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::analytics::Analytics;
use crate::error::ConfigError;
use crate::interceptor::{InterceptorChain, InterceptorList, MessageInterceptor};
use crate::queue;
use crate::sender::{HttpSender, Sender, DEFAULT_ENDPOINT};
use crate::stats::PipelineStats;
use crate::uploader::Uploader;
use crate::worker::BatchWorker;

pub const DEFAULT_FLUSH_QUEUE_SIZE: usize = 250;
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(10);

const MIN_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Fluent API for creating [`Analytics`] instances.
///
/// All inputs are validated in [`build`](AnalyticsBuilder::build), which
/// fails fast with a [`ConfigError`] before anything is spawned.
pub struct AnalyticsBuilder {
    write_key: String,
    endpoint: String,
    flush_queue_size: usize,
    flush_interval: Duration,
    interceptors: InterceptorList,
    sender: Option<Arc<dyn Sender>>,
    runtime: Option<Handle>,
}

impl AnalyticsBuilder {
    pub(crate) fn new(write_key: impl Into<String>) -> Self {
        Self {
            write_key: write_key.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            flush_queue_size: DEFAULT_FLUSH_QUEUE_SIZE,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            interceptors: InterceptorList::new(),
            sender: None,
            runtime: None,
        }
    }

    /// Ingestion endpoint the default HTTP sender posts batches to.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Batch size at which the worker flushes. Must be at least 1.
    pub fn flush_queue_size(mut self, size: usize) -> Self {
        self.flush_queue_size = size;
        self
    }

    /// Interval after which a non-empty batch is flushed even if the size
    /// trigger was not reached. Must be at least 1 second.
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// Adds a message interceptor. Interceptors run in registration order;
    /// registering the same instance twice is rejected by `build`.
    pub fn interceptor(mut self, interceptor: Arc<dyn MessageInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Custom transport, replacing the default HTTP sender.
    pub fn sender(mut self, sender: Arc<dyn Sender>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Runtime handle the batch worker is spawned on. Defaults to the
    /// current runtime.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn build(self) -> Result<Analytics, ConfigError> {
        if self.write_key.is_empty() {
            return Err(ConfigError::EmptyWriteKey);
        }
        if self.flush_queue_size < 1 {
            return Err(ConfigError::FlushQueueSize);
        }
        if self.flush_interval < MIN_FLUSH_INTERVAL {
            return Err(ConfigError::FlushInterval);
        }
        for (idx, interceptor) in self.interceptors.iter().enumerate() {
            let seen_before = self
                .interceptors
                .iter()
                .take(idx)
                .any(|earlier| Arc::ptr_eq(earlier, interceptor));

            if seen_before {
                return Err(ConfigError::DuplicateInterceptor);
            }
        }

        let sender: Arc<dyn Sender> = match self.sender {
            Some(sender) => sender,
            None => Arc::new(HttpSender::new(&self.endpoint, self.write_key)?),
        };
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| ConfigError::NoRuntime)?,
        };

        let (tx, rx) = queue::channel();
        let stats = Arc::new(PipelineStats::default());
        let worker = BatchWorker::new(
            rx,
            Uploader::new(sender),
            self.flush_queue_size,
            self.flush_interval,
            stats.clone(),
        );

        let handle = runtime.spawn(worker.run());

        Ok(Analytics::new(
            InterceptorChain::new(self.interceptors),
            tx,
            handle,
            stats,
        ))
    }
}
