//! ClickSink implementation for LinkStore

use async_trait::async_trait;

use super::LinkStore;
use crate::errors::Result;
use crate::services::ClickSink;

#[async_trait]
impl ClickSink for LinkStore {
    async fn record_click(&self, link_id: i32) -> Result<()> {
        self.increment_click(link_id).await
    }
}
