//! Read-only EVM connections for token metadata.
//!
//! The pipeline needs exactly one thing from the chain: the token's
//! `decimals()` value. Connections therefore expose the narrow
//! [`TokenQuery`] capability instead of a full contract binding, keeping
//! the core decoupled from any specific network client.

use std::collections::HashMap;

use alloy_primitives::Address;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_sol_types::sol;
use async_trait::async_trait;
use url::Url;

use issuepay::ChainId;
use issuepay::lookup::{RpcSelector, TokenQuery, TokenQueryError};

sol! {
    /// Minimal ERC-20 surface: only the read the pipeline performs.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
    }
}

/// A ready-to-use read-only connection to one EVM chain.
#[derive(Debug, Clone)]
pub struct EvmConnection<P> {
    provider: P,
}

impl<P> EvmConnection<P> {
    /// Wraps an existing provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl EvmConnection<RootProvider> {
    /// Connects over HTTP to `endpoint`.
    #[must_use]
    pub fn http(endpoint: Url) -> Self {
        Self::new(RootProvider::new(RpcClient::new_http(endpoint)))
    }
}

#[async_trait]
impl<P> TokenQuery for EvmConnection<P>
where
    P: Provider + Send + Sync,
{
    async fn decimals(&self, token: Address) -> Result<u8, TokenQueryError> {
        let erc20 = IERC20::new(token, &self.provider);
        erc20
            .decimals()
            .call()
            .await
            .map_err(|e| TokenQueryError(e.to_string()))
    }
}

/// Endpoint selection over a fixed chain → URL table.
///
/// Performs no health checking: selection policy beyond "an endpoint is
/// configured" belongs to the surrounding service, which can implement
/// [`RpcSelector`] with whatever failover strategy it runs.
#[derive(Debug, Clone, Default)]
pub struct StaticRpcSelector {
    endpoints: HashMap<ChainId, Url>,
}

impl StaticRpcSelector {
    /// Creates an empty selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an endpoint for `chain_id`, replacing any previous one.
    #[must_use]
    pub fn with_endpoint(mut self, chain_id: ChainId, endpoint: Url) -> Self {
        self.endpoints.insert(chain_id, endpoint);
        self
    }
}

#[async_trait]
impl RpcSelector for StaticRpcSelector {
    type Connection = EvmConnection<RootProvider>;

    async fn select(&self, chain_id: ChainId) -> Option<Self::Connection> {
        self.endpoints
            .get(&chain_id)
            .cloned()
            .map(EvmConnection::http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::GNOSIS_MAINNET;

    #[tokio::test]
    async fn test_unconfigured_chain_yields_no_connection() {
        let selector = StaticRpcSelector::new();
        assert!(selector.select(GNOSIS_MAINNET).await.is_none());
    }

    #[tokio::test]
    async fn test_configured_chain_yields_a_connection() {
        let selector = StaticRpcSelector::new()
            .with_endpoint(GNOSIS_MAINNET, "https://rpc.gnosischain.com".parse().unwrap());
        assert!(selector.select(GNOSIS_MAINNET).await.is_some());
        assert!(selector.select(GNOSIS_MAINNET + 1).await.is_none());
    }
}
