//! EVM (EIP-155) support for issuepay reward permits.
//!
//! This crate turns a [`SigningRequest`](issuepay::SigningRequest) into a
//! signed, independently verifiable Permit2 `PermitTransferFrom`
//! authorization. The permit is entirely off-chain and gas-free for the
//! issuer: the beneficiary (as spender) later redeems it through the
//! Permit2 singleton, which verifies the EIP-712 signature and consumes
//! the nonce.
//!
//! # Architecture
//!
//! - [`networks`] - Permit2 singleton address and known chain IDs
//! - [`permit2`] - Typed-data payload construction (domain, types, values)
//! - [`signer`] - Custodial signing over the payload digest
//! - [`provider`] - Read-only connections for token metadata
//! - [`issuer`] - The orchestrating pipeline
//! - [`verify`] - Third-party verification of issued permits

pub mod issuer;
pub mod networks;
pub mod permit2;
pub mod provider;
pub mod signer;
pub mod verify;

pub use issuer::PermitIssuer;
pub use permit2::{PermitPayload, UNBOUNDED_DEADLINE};
pub use signer::RewardSigner;
