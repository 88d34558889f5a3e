//! Known EVM networks for reward payouts.

use alloy_primitives::{Address, address};
use issuepay::ChainId;

/// Canonical Uniswap Permit2 contract address (same on all EVM chains via CREATE2).
pub const PERMIT2_ADDRESS: Address = address!("0x000000000022D473030F116dDEE9F6B43aC78BA3");

/// EIP-712 domain name fixed by the Permit2 contract (which carries no
/// domain version).
pub const PERMIT2_DOMAIN_NAME: &str = "Permit2";

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET: ChainId = 1;

/// Gnosis Chain chain ID.
pub const GNOSIS_MAINNET: ChainId = 100;

/// Polygon Mainnet chain ID.
pub const POLYGON_MAINNET: ChainId = 137;

/// Base Mainnet chain ID.
pub const BASE_MAINNET: ChainId = 8453;

/// Base Sepolia (testnet) chain ID.
pub const BASE_SEPOLIA: ChainId = 84532;

/// Returns the chain IDs payouts are routinely issued on.
///
/// Permits are not limited to this list — Permit2's deployment address is
/// chain-independent, so any EIP-155 chain ID produces a well-formed
/// domain — but endpoint configuration normally covers these.
#[must_use]
pub fn known_chain_ids() -> Vec<ChainId> {
    vec![
        ETHEREUM_MAINNET,
        GNOSIS_MAINNET,
        POLYGON_MAINNET,
        BASE_MAINNET,
        BASE_SEPOLIA,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain_ids_cover_payout_networks() {
        let ids = known_chain_ids();
        assert!(ids.contains(&GNOSIS_MAINNET));
        assert!(ids.contains(&ETHEREUM_MAINNET));
    }

    #[test]
    fn test_permit2_address_checksums_to_the_published_deployment() {
        assert_eq!(
            PERMIT2_ADDRESS.to_checksum(None),
            "0x000000000022D473030F116dDEE9F6B43aC78BA3"
        );
    }
}
