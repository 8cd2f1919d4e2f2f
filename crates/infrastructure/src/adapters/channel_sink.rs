//! Channel sink - Implements WarningSinkPort over a tokio mpsc channel

use application::error::ApplicationError;
use application::ports::{WarningSinkPort, WarningUpdate};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::trace;

/// Forwards every update to a receiver owned by the host
#[derive(Debug, Clone)]
pub struct ChannelWarningSink {
    tx: mpsc::Sender<WarningUpdate>,
}

impl ChannelWarningSink {
    /// Wrap an existing sender
    #[must_use]
    pub const fn new(tx: mpsc::Sender<WarningUpdate>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiver
    #[must_use]
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<WarningUpdate>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl WarningSinkPort for ChannelWarningSink {
    async fn publish(&self, update: &WarningUpdate) -> Result<(), ApplicationError> {
        trace!(instance = %update.instance_name, "Forwarding warning update");
        self.tx
            .send(update.clone())
            .await
            .map_err(|_| ApplicationError::Sink("receiver dropped".to_string()))
    }
}
