use std::time::Duration;

use eventpipe::{Analytics, Message};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let analytics = Analytics::builder("demo-write-key")
        .flush_queue_size(20)
        .flush_interval(Duration::from_secs(5))
        .build()?;

    for i in 0..50 {
        analytics.enqueue(
            Message::track("Demo Event")
                .user_id(format!("user-{}", i % 5))
                .property("index", i)
                .build(),
        )?;
    }

    analytics.flush()?;
    analytics.shutdown().await?;

    println!("{:?}", analytics.stats());

    Ok(())
}
