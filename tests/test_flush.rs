use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use eventpipe::{Analytics, Message, Sender, SenderError};

struct RecordingSender {
    batches: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl Sender for RecordingSender {
    async fn send(&self, payload: &[u8]) -> Result<(), SenderError> {
        let parsed = serde_json::from_slice(payload).unwrap();
        self.batches.lock().push(parsed);

        Ok(())
    }
}

fn recorder() -> (Arc<RecordingSender>, Arc<Mutex<Vec<Value>>>) {
    let batches = Arc::new(Mutex::new(Vec::new()));
    let sender = Arc::new(RecordingSender {
        batches: batches.clone(),
    });

    (sender, batches)
}

fn events(batch: &Value) -> Vec<String> {
    batch["batch"]
        .as_array()
        .unwrap()
        .iter()
        .map(|msg| msg["event"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn flush_with_empty_buffer_skips_the_network() {
    let (sender, batches) = recorder();

    let analytics = Analytics::builder("key")
        .sender(sender)
        .flush_queue_size(10)
        .flush_interval(Duration::from_secs(60))
        .build()
        .unwrap();

    analytics.flush().unwrap();
    analytics.flush().unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    analytics.shutdown().await.unwrap();

    assert!(batches.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn flush_uploads_whatever_has_accumulated() {
    let (sender, batches) = recorder();

    let analytics = Analytics::builder("key")
        .sender(sender)
        .flush_queue_size(100)
        .flush_interval(Duration::from_secs(60))
        .build()
        .unwrap();

    analytics.enqueue(Message::track("a").build()).unwrap();
    analytics.enqueue(Message::track("b").build()).unwrap();
    analytics.flush().unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;

    {
        let lock = batches.lock();
        assert_eq!(lock.len(), 1);
        assert_eq!(events(&lock[0]), vec!["a", "b"]);
    }

    analytics.shutdown().await.unwrap();
    assert_eq!(batches.lock().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn flush_is_ordered_after_prior_enqueues() {
    let (sender, batches) = recorder();

    let analytics = Analytics::builder("key")
        .sender(sender)
        .flush_queue_size(100)
        .flush_interval(Duration::from_secs(60))
        .build()
        .unwrap();

    analytics.enqueue(Message::track("a").build()).unwrap();
    analytics.flush().unwrap();
    analytics.enqueue(Message::track("b").build()).unwrap();

    analytics.shutdown().await.unwrap();

    let lock = batches.lock();
    assert_eq!(lock.len(), 2);
    assert_eq!(events(&lock[0]), vec!["a"]);
    assert_eq!(events(&lock[1]), vec!["b"]);
}
