//! Independent verification of issued permits.
//!
//! A [`PermitReward`] is self-describing: any holder can rebuild the typed
//! data from its public fields, recover the signer from the signature, and
//! check it against the record's `owner` — the same check the Permit2
//! contract performs on redemption, minus nonce consumption.

use alloy_primitives::{Address, Signature};

use issuepay::permit::PermitReward;

use crate::permit2::{PermitPayload, UNBOUNDED_DEADLINE};

/// Errors from verifying an issued permit.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The record's deadline is not the fixed "never expires" sentinel.
    #[error("unexpected deadline {0}: issued permits are unbounded")]
    UnexpectedDeadline(String),

    /// The signature bytes are not a recoverable 65-byte r/s/v signature.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Recovery succeeded but the signer is not the record's owner.
    #[error("signature recovers to {recovered}, expected owner {owner}")]
    OwnerMismatch {
        /// The address the signature actually recovers to.
        recovered: Address,
        /// The owner the record claims.
        owner: Address,
    },
}

/// Recovers the signer of `reward` and checks it against the `owner` field.
///
/// # Errors
///
/// Returns [`VerifyError`] when the record deviates from issued-permit
/// shape or the signature does not recover to `owner`.
pub fn verify_reward(reward: &PermitReward) -> Result<Address, VerifyError> {
    if reward.deadline.0 != UNBOUNDED_DEADLINE {
        return Err(VerifyError::UnexpectedDeadline(reward.deadline.to_string()));
    }

    let payload = PermitPayload::new(
        reward.token_address,
        reward.amount.0,
        reward.beneficiary,
        reward.nonce.0,
        reward.chain_id,
    );

    let signature = Signature::try_from(reward.signature.as_ref())
        .map_err(|e| VerifyError::MalformedSignature(e.to_string()))?;
    let recovered = signature
        .recover_address_from_prehash(&payload.signing_hash())
        .map_err(|e| VerifyError::MalformedSignature(e.to_string()))?;

    if recovered == reward.owner {
        Ok(recovered)
    } else {
        Err(VerifyError::OwnerMismatch {
            recovered,
            owner: reward.owner,
        })
    }
}
