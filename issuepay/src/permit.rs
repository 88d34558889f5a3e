//! Wire types for reward permits.
//!
//! A [`SigningRequest`] fully describes one permit to issue; a
//! [`PermitReward`] is the terminal artifact handed back to the caller, who
//! owns its storage and transmission. Neither type is persisted by this
//! crate and nothing survives across calls: permit uniqueness comes from
//! the nonce derivation, not from retained state.
//!
//! `uint256` values cross the wire as decimal strings (see [`DecimalU256`])
//! so that JSON consumers are never exposed to number precision loss.

use alloy_primitives::{Address, Bytes, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An EIP-155 chain ID (e.g., 1 for Ethereum, 100 for Gnosis).
pub type ChainId = u64;

/// A fully specified request to issue one reward permit.
///
/// Immutable once constructed. Given a fixed decryption secret and a fixed
/// token decimal precision, the request fully determines the signed payload
/// (signature bytes aside, which the signing primitive owns).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRequest {
    /// Target chain for the permit's domain separator.
    pub chain_id: ChainId,

    /// Encrypted custodial key envelope (base64) holding the reward
    /// wallet's private key. See [`crate::keystore`] for the layout.
    pub encrypted_key: String,

    /// Beneficiary wallet, when the caller already resolved it.
    ///
    /// Left unset, the issuer consults its wallet registry for
    /// `subject_user_id` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<Address>,

    /// Platform identity of the user being rewarded.
    pub subject_user_id: u64,

    /// Identity of the issue or pull request the reward is bound to.
    pub event_id: String,

    /// ERC-20 contract the permit draws from.
    pub token_address: Address,

    /// Reward amount in human units (e.g., `1.5` tokens), scaled to raw
    /// units by the token's on-chain decimal precision at issue time.
    pub amount: Decimal,
}

/// The kind of token a permit authorizes.
///
/// Rewards are paid in fungible tokens; the enumeration exists so records
/// stay self-describing on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    /// A fungible ERC-20 token.
    Erc20,
}

/// A `U256` that serializes as a decimal string.
///
/// Nonce, deadline, and raw amount are 256-bit values; JSON numbers cannot
/// carry them, so they travel as stringified decimal integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalU256(pub U256);

impl Serialize for DecimalU256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for DecimalU256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let value = U256::from_str(&s)
            .map_err(|_| serde::de::Error::custom("expected a decimal uint256 string"))?;
        Ok(Self(value))
    }
}

impl fmt::Display for DecimalU256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<U256> for DecimalU256 {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

/// One issued reward permit: the terminal, self-describing artifact.
///
/// Contains only public data — no secret material — and is independently
/// verifiable by recomputing the typed-data digest from its fields and
/// recovering the signer from `signature` against `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitReward {
    /// Kind of token the permit authorizes.
    pub token_type: TokenType,

    /// ERC-20 contract the permit draws from.
    pub token_address: Address,

    /// Wallet entitled to pull the transfer.
    pub beneficiary: Address,

    /// Permit nonce (decimal string), derived from user and event identity.
    pub nonce: DecimalU256,

    /// Expiry sentinel (decimal string); fixed to "never expires".
    pub deadline: DecimalU256,

    /// Amount in raw token units (decimal string).
    pub amount: DecimalU256,

    /// Address of the custodial wallet that signed the permit.
    pub owner: Address,

    /// 65-byte r/s/v EIP-712 signature, hex encoded.
    pub signature: Bytes,

    /// Chain the permit is valid on.
    pub chain_id: ChainId,
}
