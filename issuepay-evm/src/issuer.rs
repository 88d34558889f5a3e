//! The permit issuing pipeline.
//!
//! One invocation runs a fixed stage sequence: resolve the beneficiary,
//! select an RPC connection, decrypt the custodial key, read the token's
//! decimal precision, build the typed data, sign it, and assemble the
//! reward record. Each stage owns one failure kind from
//! [`PermitError`]; a failed stage is terminal for the invocation and no
//! later stage runs. Concurrent invocations share nothing mutable — the
//! only cross-invocation state is the read-only decryption secret inside
//! the [`KeyResolver`].

use tracing::{debug, instrument};

use issuepay::amount::to_raw_units;
use issuepay::error::PermitError;
use issuepay::keystore::KeyResolver;
use issuepay::lookup::{RpcSelector, TokenQuery, WalletRegistry};
use issuepay::nonce::derive_nonce;
use issuepay::permit::{DecimalU256, PermitReward, SigningRequest, TokenType};

use alloy_primitives::Address;

use crate::permit2::{PermitPayload, UNBOUNDED_DEADLINE};
use crate::signer::RewardSigner;

/// Issues signed reward permits over injected collaborators.
#[derive(Debug)]
pub struct PermitIssuer<W, S> {
    wallets: W,
    rpc: S,
    keys: KeyResolver,
}

impl<W, S> PermitIssuer<W, S>
where
    W: WalletRegistry,
    S: RpcSelector,
{
    /// Creates an issuer over a wallet registry, an RPC selector, and a
    /// key resolver.
    pub const fn new(wallets: W, rpc: S, keys: KeyResolver) -> Self {
        Self { wallets, rpc, keys }
    }

    /// Issues one signed reward permit for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`PermitError`] naming the failed stage: `MissingWallet`
    /// before any decryption or network work, `ProviderUnavailable` when
    /// no endpoint serves the chain, `Decryption` before any token read,
    /// `TokenMetadata` when the decimals read fails, `Validation` when the
    /// amount does not fit the token's precision, and `Signing` when the
    /// key or the signing primitive is unusable.
    #[instrument(skip(self, request), fields(
        chain_id = request.chain_id,
        user_id = request.subject_user_id,
        event_id = %request.event_id,
        token = %request.token_address,
    ))]
    pub async fn issue(&self, request: &SigningRequest) -> Result<PermitReward, PermitError> {
        // Wallet first: a missing beneficiary must fail before any
        // decryption or network activity.
        let beneficiary = self.resolve_beneficiary(request).await?;

        let connection =
            self.rpc
                .select(request.chain_id)
                .await
                .ok_or(PermitError::ProviderUnavailable {
                    chain_id: request.chain_id,
                })?;

        // Key material stays inside this block and zeroizes with it; only
        // the derived signer survives.
        let signer = {
            let key = self.keys.resolve(&request.encrypted_key)?;
            RewardSigner::from_key_material(&key).map_err(|e| PermitError::Signing(e.to_string()))?
        };

        let decimals = connection
            .decimals(request.token_address)
            .await
            .map_err(|e| PermitError::TokenMetadata {
                token: request.token_address,
                reason: e.to_string(),
            })?;
        debug!(decimals, "token metadata resolved");

        let amount_raw = to_raw_units(request.amount, decimals)?;
        let nonce = derive_nonce(request.subject_user_id, &request.event_id);
        let payload = PermitPayload::new(
            request.token_address,
            amount_raw,
            beneficiary,
            nonce,
            request.chain_id,
        );

        let signature = signer
            .sign(&payload)
            .await
            .map_err(|e| PermitError::Signing(e.to_string()))?;
        debug!(owner = %signer.address(), nonce = %nonce, "permit signed");

        Ok(PermitReward {
            token_type: TokenType::Erc20,
            token_address: request.token_address,
            beneficiary,
            nonce: DecimalU256(nonce),
            deadline: DecimalU256(UNBOUNDED_DEADLINE),
            amount: DecimalU256(amount_raw),
            owner: signer.address(),
            signature: signature.as_bytes().into(),
            chain_id: request.chain_id,
        })
    }

    /// Resolves the beneficiary wallet: the request's own field wins,
    /// otherwise the wallet registry is consulted. The zero address is a
    /// placeholder some upstreams use for "unset" and counts as missing.
    async fn resolve_beneficiary(
        &self,
        request: &SigningRequest,
    ) -> Result<Address, PermitError> {
        let resolved = match request.beneficiary {
            Some(address) => Some(address),
            None => self.wallets.wallet_address(request.subject_user_id).await,
        };
        resolved
            .filter(|address| *address != Address::ZERO)
            .ok_or(PermitError::MissingWallet {
                user_id: request.subject_user_id,
            })
    }
}
