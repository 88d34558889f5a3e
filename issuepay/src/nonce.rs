//! Deterministic permit nonces derived from event identity.
//!
//! The nonce is the replay-prevention mechanism: the verifying contract
//! marks a nonce consumed on first redemption and rejects any further
//! permit carrying it for the same owner. Deriving the nonce from the
//! (user, event) pair — rather than a counter — makes issuance idempotent
//! with no retained state: re-running a payout reproduces the same nonce,
//! so at most one redemption can ever succeed per rewarded event.

use alloy_primitives::{U256, keccak256};

/// Derives the permit nonce for a (user, event) pair.
///
/// Hashes the canonical `"<user>-<event>"` framing with keccak-256 and
/// interprets the digest as a big-endian `U256`. Distinct pairs collide
/// only with negligible probability; identical pairs always reproduce the
/// identical nonce.
#[must_use]
pub fn derive_nonce(subject_user_id: u64, event_id: &str) -> U256 {
    let seed = format!("{subject_user_id}-{event_id}");
    U256::from_be_bytes(keccak256(seed.as_bytes()).0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_pair_same_nonce() {
        assert_eq!(derive_nonce(328, "81"), derive_nonce(328, "81"));
    }

    #[test]
    fn test_distinct_pairs_distinct_nonces() {
        let mut seen = std::collections::HashSet::new();
        for user in 0u64..32 {
            for event in 0u32..32 {
                assert!(
                    seen.insert(derive_nonce(user, &event.to_string())),
                    "nonce collision for ({user}, {event})"
                );
            }
        }
        assert!(seen.insert(derive_nonce(u64::MAX, "")));
    }

    #[test]
    fn test_canonical_framing() {
        // The seed is "<user>-<event>"; a shifted boundary is a different pair.
        assert_eq!(
            derive_nonce(1, "23"),
            U256::from_be_bytes(keccak256(b"1-23").0)
        );
        assert_ne!(derive_nonce(1, "23"), derive_nonce(12, "3"));
    }
}
