use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use eventpipe::{
    Analytics, ConfigError, Message, MessageInterceptor, Sender, SenderError,
    DEFAULT_FLUSH_INTERVAL, DEFAULT_FLUSH_QUEUE_SIZE,
};

struct NullSender;

#[async_trait]
impl Sender for NullSender {
    async fn send(&self, _payload: &[u8]) -> Result<(), SenderError> {
        Ok(())
    }
}

struct Noop;

impl MessageInterceptor for Noop {
    fn intercept(&self, message: Message) -> Option<Message> {
        Some(message)
    }
}

#[tokio::test]
async fn zero_flush_queue_size_is_rejected() {
    let err = Analytics::builder("key")
        .flush_queue_size(0)
        .build()
        .err();

    assert_eq!(err, Some(ConfigError::FlushQueueSize));
}

#[tokio::test]
async fn sub_second_flush_interval_is_rejected() {
    let err = Analytics::builder("key")
        .flush_interval(Duration::from_millis(999))
        .build()
        .err();

    assert_eq!(err, Some(ConfigError::FlushInterval));
}

#[tokio::test]
async fn empty_write_key_is_rejected() {
    assert_eq!(
        Analytics::builder("").build().err(),
        Some(ConfigError::EmptyWriteKey)
    );
}

#[tokio::test]
async fn invalid_endpoint_is_rejected() {
    let err = Analytics::builder("key")
        .endpoint("::not-a-url::")
        .build()
        .err();

    assert_eq!(err, Some(ConfigError::Endpoint("::not-a-url::".into())));
}

#[tokio::test]
async fn duplicate_interceptor_instance_is_rejected() {
    let shared = Arc::new(Noop);

    let err = Analytics::builder("key")
        .interceptor(shared.clone())
        .interceptor(shared)
        .build()
        .err();

    assert_eq!(err, Some(ConfigError::DuplicateInterceptor));
}

#[tokio::test]
async fn distinct_instances_of_one_type_are_allowed() {
    let analytics = Analytics::builder("key")
        .sender(Arc::new(NullSender))
        .interceptor(Arc::new(Noop))
        .interceptor(Arc::new(Noop))
        .build()
        .unwrap();

    analytics.shutdown().await.unwrap();
}

#[tokio::test]
async fn defaults_build_a_working_client() {
    assert_eq!(DEFAULT_FLUSH_QUEUE_SIZE, 250);
    assert_eq!(DEFAULT_FLUSH_INTERVAL, Duration::from_secs(10));

    // nothing enqueued, so shutdown's final flush never touches the network
    let analytics = Analytics::builder("key").build().unwrap();

    analytics.shutdown().await.unwrap();
}
