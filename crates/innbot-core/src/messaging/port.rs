use async_trait::async_trait;

use crate::{domain::ChatId, messaging::types::MessagingCapabilities, Result};

/// Outbound side of the transport.
///
/// Inbound delivery is owned by the adapter (it calls into the dispatcher);
/// the core only ever needs to send plain text back.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    /// Deliver `text` to `chat_id`. Failures are returned, never retried.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}
