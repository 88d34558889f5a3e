//! Permit2 `SignatureTransfer` typed-data payloads.
//!
//! Builds the exact domain/types/values triple the Permit2 singleton
//! verifies on redemption:
//!
//! ```text
//! DOMAIN_SEPARATOR = hashStruct(
//!     EIP712Domain({
//!         name: "Permit2",
//!         chainId: CHAIN_ID,
//!         verifyingContract: PERMIT2_ADDRESS
//!     })
//! )
//!
//! PERMIT_TRANSFER_FROM_TYPEHASH = keccak256(
//!     "PermitTransferFrom(TokenPermissions permitted,address spender,uint256 nonce,uint256 deadline)TokenPermissions(address token,uint256 amount)"
//! )
//! ```
//!
//! Field layout and ordering MUST match the on-chain contract definition:
//! any drift produces a signature the contract silently rejects rather
//! than an error, which is why the digest is pinned by a test that
//! recomputes the encoding by hand.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct, eip712_domain, sol};
use issuepay::ChainId;

use crate::networks::{PERMIT2_ADDRESS, PERMIT2_DOMAIN_NAME};

/// Deadline sentinel meaning "never expires": the maximum signed 256-bit
/// integer. Expiry enforcement is entirely the verifying contract's
/// business; an issued permit stays redeemable until its nonce is consumed.
pub const UNBOUNDED_DEADLINE: U256 =
    U256::from_limbs([u64::MAX, u64::MAX, u64::MAX, u64::MAX >> 1]);

sol! {
    /// EIP-712 struct for Permit2 token permissions.
    #[derive(Debug)]
    struct TokenPermissions {
        address token;
        uint256 amount;
    }

    /// EIP-712 struct for Permit2 `PermitTransferFrom`.
    ///
    /// The primary type the custodial key signs. Field order MUST match
    /// the on-chain Permit2 contract definition.
    #[derive(Debug)]
    struct PermitTransferFrom {
        TokenPermissions permitted;
        address spender;
        uint256 nonce;
        uint256 deadline;
    }
}

/// A fully assembled Permit2 typed-data payload: message plus domain.
#[derive(Debug, Clone)]
pub struct PermitPayload {
    /// The `PermitTransferFrom` message to be signed.
    pub message: PermitTransferFrom,
    /// The Permit2 domain for the target chain.
    pub domain: Eip712Domain,
}

impl PermitPayload {
    /// Builds the payload for one permit.
    ///
    /// The beneficiary doubles as the spender: only the reward recipient
    /// may pull the permitted transfer.
    #[must_use]
    pub fn new(
        token: Address,
        amount_raw: U256,
        spender: Address,
        nonce: U256,
        chain_id: ChainId,
    ) -> Self {
        let message = PermitTransferFrom {
            permitted: TokenPermissions {
                token,
                amount: amount_raw,
            },
            spender,
            nonce,
            deadline: UNBOUNDED_DEADLINE,
        };
        let domain = eip712_domain! {
            name: PERMIT2_DOMAIN_NAME,
            chain_id: chain_id,
            verifying_contract: PERMIT2_ADDRESS,
        };
        Self { message, domain }
    }

    /// Returns the EIP-712 signing digest for this payload.
    #[must_use]
    pub fn signing_hash(&self) -> B256 {
        self.message.eip712_signing_hash(&self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;
    use std::str::FromStr;

    const TOKEN: Address = Address::repeat_byte(0xAA);
    const SPENDER: Address = Address::repeat_byte(0xBB);

    fn reference_payload() -> PermitPayload {
        PermitPayload::new(
            TOKEN,
            U256::from_str("100000000000000000000").unwrap(),
            SPENDER,
            U256::from(42u8),
            1,
        )
    }

    /// Recomputes the EIP-712 domain separator by hand.
    fn manual_domain_separator(chain_id: u64) -> B256 {
        let type_hash =
            keccak256(b"EIP712Domain(string name,uint256 chainId,address verifyingContract)");
        let encoded = [
            type_hash.as_slice(),
            keccak256(b"Permit2").as_slice(),
            U256::from(chain_id).to_be_bytes::<32>().as_slice(),
            B256::left_padding_from(PERMIT2_ADDRESS.as_slice()).as_slice(),
        ]
        .concat();
        keccak256(encoded)
    }

    /// Recomputes `hashStruct(PermitTransferFrom)` by hand.
    fn manual_struct_hash(token: Address, amount: U256, spender: Address, nonce: U256) -> B256 {
        let permissions_type_hash = keccak256(b"TokenPermissions(address token,uint256 amount)");
        let permitted_hash = keccak256(
            [
                permissions_type_hash.as_slice(),
                B256::left_padding_from(token.as_slice()).as_slice(),
                amount.to_be_bytes::<32>().as_slice(),
            ]
            .concat(),
        );
        let permit_type_hash = keccak256(
            b"PermitTransferFrom(TokenPermissions permitted,address spender,uint256 nonce,uint256 deadline)TokenPermissions(address token,uint256 amount)",
        );
        keccak256(
            [
                permit_type_hash.as_slice(),
                permitted_hash.as_slice(),
                B256::left_padding_from(spender.as_slice()).as_slice(),
                nonce.to_be_bytes::<32>().as_slice(),
                UNBOUNDED_DEADLINE.to_be_bytes::<32>().as_slice(),
            ]
            .concat(),
        )
    }

    #[test]
    fn test_encode_type_matches_contract_definition() {
        assert_eq!(
            PermitTransferFrom::eip712_encode_type(),
            "PermitTransferFrom(TokenPermissions permitted,address spender,uint256 nonce,uint256 deadline)TokenPermissions(address token,uint256 amount)"
        );
    }

    #[test]
    fn test_domain_shape() {
        let payload = reference_payload();
        assert_eq!(payload.domain.name.as_deref(), Some("Permit2"));
        assert!(payload.domain.version.is_none());
        assert_eq!(payload.domain.chain_id, Some(U256::from(1u8)));
        assert_eq!(payload.domain.verifying_contract, Some(PERMIT2_ADDRESS));
        assert!(payload.domain.salt.is_none());
    }

    #[test]
    fn test_signing_hash_matches_manual_recomputation() {
        let payload = reference_payload();
        let digest = keccak256(
            [
                &[0x19u8, 0x01][..],
                manual_domain_separator(1).as_slice(),
                manual_struct_hash(
                    TOKEN,
                    U256::from_str("100000000000000000000").unwrap(),
                    SPENDER,
                    U256::from(42u8),
                )
                .as_slice(),
            ]
            .concat(),
        );
        assert_eq!(payload.signing_hash(), digest);
    }

    #[test]
    fn test_chain_id_separates_domains() {
        let mainnet = PermitPayload::new(TOKEN, U256::from(1u8), SPENDER, U256::from(1u8), 1);
        let gnosis = PermitPayload::new(TOKEN, U256::from(1u8), SPENDER, U256::from(1u8), 100);
        assert_ne!(mainnet.signing_hash(), gnosis.signing_hash());
    }

    #[test]
    fn test_unbounded_deadline_is_max_signed_int() {
        // 2^255 - 1
        assert_eq!(UNBOUNDED_DEADLINE, U256::MAX >> 1);
    }

    #[test]
    fn test_zero_amount_still_produces_a_digest() {
        let payload = PermitPayload::new(TOKEN, U256::ZERO, SPENDER, U256::from(7u8), 100);
        assert_ne!(payload.signing_hash(), B256::ZERO);
    }
}
