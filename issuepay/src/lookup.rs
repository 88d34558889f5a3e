//! Collaborator seams for the issuing pipeline.
//!
//! Identity resolution, endpoint selection, and token metadata are owned by
//! the surrounding service; the pipeline consumes them through narrow
//! capability traits so the core stays decoupled from any specific identity
//! store or network client. Implementations own their own timeout and
//! failover policy — the pipeline itself never retries.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::permit::ChainId;

/// Failure reading token metadata through a connection.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TokenQueryError(pub String);

/// Maps a platform user to their registered beneficiary wallet.
#[async_trait]
pub trait WalletRegistry: Send + Sync {
    /// Returns the wallet registered for `user_id`, or `None` when the
    /// user never linked one.
    async fn wallet_address(&self, user_id: u64) -> Option<Address>;
}

/// Read-only token metadata over an established connection.
#[async_trait]
pub trait TokenQuery: Send + Sync {
    /// Reads the token's decimal precision from its contract.
    ///
    /// # Errors
    ///
    /// Returns [`TokenQueryError`] when the read fails or returns
    /// undecodable data.
    async fn decimals(&self, token: Address) -> Result<u8, TokenQueryError>;
}

/// Selects a ready-to-use connection for a chain.
#[async_trait]
pub trait RpcSelector: Send + Sync {
    /// The connection type this selector produces.
    type Connection: TokenQuery + Send + Sync;

    /// Returns a ready connection for `chain_id`, or `None` when no
    /// healthy endpoint exists for that chain.
    async fn select(&self, chain_id: ChainId) -> Option<Self::Connection>;
}
