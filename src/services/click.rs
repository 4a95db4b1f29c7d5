//! Fire-and-forget click counting
//!
//! The redirect must never wait on, or fail because of, the counter update.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::errors::Result;

/// Destination for click events
#[async_trait]
pub trait ClickSink: Send + Sync {
    async fn record_click(&self, link_id: i32) -> Result<()>;
}

#[derive(Clone)]
pub struct ClickRecorder {
    sink: Arc<dyn ClickSink>,
}

impl ClickRecorder {
    pub fn new(sink: Arc<dyn ClickSink>) -> Self {
        Self { sink }
    }

    /// Count one click in the background. Failures are logged and dropped.
    ///
    /// The handle is only useful to tests; request handlers ignore it.
    pub fn record(&self, link_id: i32) -> JoinHandle<()> {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(e) = sink.record_click(link_id).await {
                warn!("Failed to record click for link {}: {}", link_id, e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ShortUrlError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySink {
        clicks: Mutex<Vec<i32>>,
    }

    #[async_trait]
    impl ClickSink for MemorySink {
        async fn record_click(&self, link_id: i32) -> Result<()> {
            self.clicks.lock().unwrap().push(link_id);
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl ClickSink for FailingSink {
        async fn record_click(&self, _link_id: i32) -> Result<()> {
            Err(ShortUrlError::storage("disk full"))
        }
    }

    #[tokio::test]
    async fn test_record_reaches_sink() {
        let sink = Arc::new(MemorySink::default());
        let recorder = ClickRecorder::new(sink.clone());

        recorder.record(3).await.unwrap();
        recorder.record(3).await.unwrap();

        assert_eq!(*sink.clicks.lock().unwrap(), vec![3, 3]);
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let recorder = ClickRecorder::new(Arc::new(FailingSink));
        // the task completes normally even though the sink failed
        assert!(recorder.record(1).await.is_ok());
    }
}
