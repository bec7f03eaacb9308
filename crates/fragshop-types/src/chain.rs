//! The chain reader — read-only view of inbound transfers.

use async_trait::async_trait;

use crate::{ChainTransfer, Result};

/// Read-only interface to the payment chain.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// List recent inbound transfers to the given receiving address,
    /// most recent window first. The window is provider-defined; the
    /// reconciler deduplicates by transfer hash, so overlap between calls
    /// is expected and harmless.
    async fn recent_transfers(&self, address: &str) -> Result<Vec<ChainTransfer>>;
}
