//! Core types for gas-free reward permits.
//!
//! This crate provides the chain-agnostic foundation for issuing off-chain
//! signed token transfer authorizations (permits) that pay out issue and
//! pull-request rewards. A permit lets the beneficiary pull a specific token
//! amount from the custodial reward wallet without the issuer ever sending
//! an on-chain transaction; the verifying contract checks the signature and
//! consumes the permit's nonce on redemption.
//!
//! # Modules
//!
//! - [`amount`] - Human-readable amount to raw token unit conversion
//! - [`error`] - The issuing pipeline's error taxonomy
//! - [`keystore`] - Encrypted custodial key material resolution
//! - [`lookup`] - Collaborator seams (wallet registry, RPC selection, token metadata)
//! - [`nonce`] - Deterministic permit nonces derived from event identity
//! - [`permit`] - Wire types: signing requests and issued reward records
//!
//! Chain-specific construction and signing of the typed data lives in
//! separate crates (`issuepay-evm` for EIP-155 chains).

pub mod amount;
pub mod error;
pub mod keystore;
pub mod lookup;
pub mod nonce;
pub mod permit;

pub use error::PermitError;
pub use permit::{ChainId, DecimalU256, PermitReward, SigningRequest, TokenType};
