use std::sync::Arc;
use std::time::Duration;

use eventpipe::{Analytics, Message, MessageInterceptor, MessageKind};

/// Drops internal traffic and stamps everything else with the app name.
struct Scrub;

impl MessageInterceptor for Scrub {
    fn intercept(&self, message: Message) -> Option<Message> {
        let internal = message
            .properties()
            .get("internal")
            .and_then(|value| value.as_bool())
            .unwrap_or(false);

        if message.kind() == MessageKind::Track && internal {
            return None;
        }

        Some(message.into_builder().property("app", "demo").build())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let analytics = Analytics::builder("demo-write-key")
        .flush_interval(Duration::from_secs(5))
        .interceptor(Arc::new(Scrub))
        .build()?;

    analytics.enqueue(Message::track("Heartbeat").property("internal", true).build())?;
    analytics.enqueue(Message::track("Purchase").user_id("user-1").build())?;
    analytics.enqueue(Message::identify().user_id("user-1").build())?;

    analytics.shutdown().await?;

    let stats = analytics.stats();
    println!(
        "suppressed {} of {} messages",
        stats.suppressed,
        stats.suppressed + stats.enqueued
    );

    Ok(())
}
