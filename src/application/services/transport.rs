use async_trait::async_trait;

/// Delivery seam consumed by the dispatcher.
///
/// An `Err` means that one destination did not get the text; the caller
/// records it and moves on, it never inspects the error further.
#[async_trait]
pub trait BroadcastTransport: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> anyhow::Result<()>;
}
