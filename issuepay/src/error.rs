//! Error taxonomy for the permit issuing pipeline.
//!
//! Each pipeline stage owns exactly one failure kind here. Every failure is
//! terminal for its invocation: nothing is retried internally, no variant
//! is converted into another on the way up, and no stage runs after a
//! failed one. Callers that want another attempt re-run the whole
//! invocation.

use alloy_primitives::Address;

use crate::amount::AmountError;
use crate::keystore::DecryptError;
use crate::permit::ChainId;

/// Errors surfaced by the permit issuing pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PermitError {
    /// The subject user has no registered beneficiary wallet.
    #[error("no beneficiary wallet registered for user {user_id}")]
    MissingWallet {
        /// The user whose wallet lookup came up empty.
        user_id: u64,
    },

    /// No RPC connection is available for the requested chain.
    #[error("no RPC endpoint available for chain {chain_id}")]
    ProviderUnavailable {
        /// The chain with no usable endpoint.
        chain_id: ChainId,
    },

    /// The custodial key material could not be recovered.
    #[error("reward key material unrecoverable: {0}")]
    Decryption(#[from] DecryptError),

    /// The token's decimal precision could not be read.
    #[error("token metadata unreadable for {token}: {reason}")]
    TokenMetadata {
        /// The token contract whose metadata read failed.
        token: Address,
        /// Proximate cause reported by the connection.
        reason: String,
    },

    /// The caller-supplied amount cannot be converted to raw token units.
    #[error("invalid reward amount: {0}")]
    Validation(#[from] AmountError),

    /// The signing primitive rejected the payload or key.
    #[error("permit signing failed: {0}")]
    Signing(String),
}
