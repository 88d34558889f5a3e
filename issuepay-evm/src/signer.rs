//! Custodial signing of permit payloads.
//!
//! Purely cryptographic: the signer is bound to no chain state and needs
//! no network access. Key material is borrowed for construction only and
//! zeroizes with its owning scope — the issuer drops it before any
//! network activity resumes.

use alloy_primitives::{Address, Signature};
use alloy_signer_local::PrivateKeySigner;
use issuepay::keystore::KeyMaterial;

use crate::permit2::PermitPayload;

/// Failure constructing or using the custodial signing key.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The decrypted bytes are not a valid secp256k1 private key.
    #[error("decrypted key is not a valid secp256k1 private key")]
    InvalidKey,

    /// The signing primitive failed on a well-formed key.
    #[error("signing primitive failed: {0}")]
    Primitive(String),
}

/// Signs Permit2 payloads with the custodial reward key.
pub struct RewardSigner {
    inner: PrivateKeySigner,
}

impl RewardSigner {
    /// Wraps decrypted key material in a signer.
    ///
    /// A structurally valid 32-byte blob can still be an invalid scalar
    /// (zero, or at least the curve order); that fails here, loudly,
    /// instead of producing a usable-looking but unverifiable signature.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidKey`] when the bytes are not a valid
    /// private key.
    pub fn from_key_material(key: &KeyMaterial) -> Result<Self, SignError> {
        let inner =
            PrivateKeySigner::from_slice(key.as_bytes()).map_err(|_| SignError::InvalidKey)?;
        Ok(Self { inner })
    }

    /// The address corresponding to the custodial key — the permit's owner.
    #[must_use]
    pub fn address(&self) -> Address {
        self.inner.address()
    }

    /// Signs the payload's EIP-712 digest, returning a 65-byte r/s/v
    /// signature.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Primitive`] when the underlying ECDSA signing
    /// fails; the cause text never contains key bytes.
    pub async fn sign(&self, payload: &PermitPayload) -> Result<Signature, SignError> {
        let digest = payload.signing_hash();
        alloy_signer::Signer::sign_hash(&self.inner, &digest)
            .await
            .map_err(|e| SignError::Primitive(e.to_string()))
    }
}

impl std::fmt::Debug for RewardSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
