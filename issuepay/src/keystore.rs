//! Encrypted custodial key material resolution.
//!
//! The reward wallet's private key is held at rest as a sealed envelope:
//! `base64( nonce ‖ ChaCha20-Poly1305 ciphertext )`, where the plaintext is
//! a JSON record carrying the hex-encoded secp256k1 private key:
//!
//! ```json
//! {"privateKey": "0x<64 hex digits>"}
//! ```
//!
//! The symmetric secret is process-wide, read-only for the process
//! lifetime, and injected into the [`KeyResolver`] at construction so the
//! resolver stays testable with fixed secrets. A missing or wrong secret
//! surfaces as a [`DecryptError`] at first use, never at startup.
//!
//! Decryption failures are deterministic functions of their inputs, so
//! nothing here retries. Error messages name the failing step only;
//! neither the secret nor any recovered key bytes are ever formatted into
//! an error or a log line.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use serde::Deserialize;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Byte length of the symmetric decryption secret.
pub const SECRET_LEN: usize = 32;

/// Byte length of the AEAD nonce prefixed to each envelope.
const NONCE_LEN: usize = 12;

/// Errors from resolving custodial key material.
#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    /// The configured secret source is absent.
    #[error("decryption secret variable {0} is not set")]
    MissingSecret(String),

    /// The secret is present but not `SECRET_LEN` bytes of base64.
    #[error("decryption secret must decode to {SECRET_LEN} bytes, got {0}")]
    BadSecret(usize),

    /// The envelope is not valid base64.
    #[error("envelope is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The envelope is too short to carry a nonce and ciphertext.
    #[error("envelope is truncated ({0} bytes)")]
    Truncated(usize),

    /// Authenticated decryption failed: wrong secret or corrupted ciphertext.
    #[error("ciphertext rejected: wrong secret or corrupted envelope")]
    Unsealed,

    /// The decrypted plaintext is not a valid key envelope record.
    #[error("malformed key envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    /// The envelope's private-key field is missing or not a 32-byte hex key.
    #[error("envelope carries no usable private key")]
    InvalidKey,
}

/// Process-wide symmetric secret used to unseal key envelopes.
///
/// Zeroed on drop; `Debug` is redacted.
#[derive(Clone)]
pub struct DecryptionSecret(Zeroizing<[u8; SECRET_LEN]>);

impl DecryptionSecret {
    /// Wraps raw secret bytes.
    #[must_use]
    pub fn new(bytes: [u8; SECRET_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Parses a base64-encoded secret.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptError`] when the input is not base64 or does not
    /// decode to exactly [`SECRET_LEN`] bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, DecryptError> {
        let decoded = Zeroizing::new(BASE64.decode(encoded.trim())?);
        let bytes: [u8; SECRET_LEN] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| DecryptError::BadSecret(decoded.len()))?;
        Ok(Self(Zeroizing::new(bytes)))
    }

    /// Reads a base64-encoded secret from the environment variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptError::MissingSecret`] when the variable is unset,
    /// or the [`from_base64`](Self::from_base64) errors otherwise.
    pub fn from_env(var: &str) -> Result<Self, DecryptError> {
        let value = std::env::var(var).map_err(|_| DecryptError::MissingSecret(var.to_owned()))?;
        Self::from_base64(&value)
    }
}

impl fmt::Debug for DecryptionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecryptionSecret(***REDACTED***)")
    }
}

/// A decrypted secp256k1 private key, zeroed on drop.
///
/// Lives only within the scope of a single issuing invocation; nothing in
/// this crate caches or clones it.
pub struct KeyMaterial(Zeroizing<[u8; 32]>);

impl KeyMaterial {
    /// Exposes the raw key bytes for handoff to a signing primitive.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial(***REDACTED***)")
    }
}

/// Decrypted plaintext layout of a key envelope.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyEnvelope {
    private_key: String,
}

/// Resolves custodial key material from encrypted envelopes.
#[derive(Clone)]
pub struct KeyResolver {
    secret: DecryptionSecret,
}

impl KeyResolver {
    /// Creates a resolver over the given process-wide secret.
    #[must_use]
    pub const fn new(secret: DecryptionSecret) -> Self {
        Self { secret }
    }

    /// Decrypts `envelope_b64` and extracts the private key.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptError`] when the envelope is malformed, the AEAD
    /// rejects the ciphertext (wrong secret or corruption), or the
    /// decrypted record lacks a usable 32-byte private key.
    pub fn resolve(&self, envelope_b64: &str) -> Result<KeyMaterial, DecryptError> {
        let blob = BASE64.decode(envelope_b64.trim())?;
        if blob.len() <= NONCE_LEN {
            return Err(DecryptError::Truncated(blob.len()));
        }
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);

        let cipher = ChaCha20Poly1305::new(Key::from_slice(self.secret.0.as_slice()));
        let plaintext = Zeroizing::new(
            cipher
                .decrypt(Nonce::from_slice(nonce), ciphertext)
                .map_err(|_| DecryptError::Unsealed)?,
        );

        let mut envelope: KeyEnvelope = serde_json::from_slice(&plaintext)?;
        let parsed =
            alloy_primitives::hex::decode_to_array::<_, 32>(envelope.private_key.as_str())
                .map_err(|_| DecryptError::InvalidKey);
        envelope.private_key.zeroize();
        Ok(KeyMaterial(Zeroizing::new(parsed?)))
    }
}

impl fmt::Debug for KeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyResolver(***REDACTED***)")
    }
}

/// Seals `private_key_hex` into the envelope format [`KeyResolver::resolve`]
/// consumes.
///
/// Intended for provisioning tooling and tests; the issuing pipeline itself
/// never encrypts.
#[must_use]
pub fn seal(secret: &DecryptionSecret, private_key_hex: &str) -> String {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(secret.0.as_slice()));
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
    let plaintext = Zeroizing::new(
        serde_json::to_vec(&serde_json::json!({ "privateKey": private_key_hex }))
            .expect("key envelope serialization cannot fail"),
    );
    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_slice())
        .expect("sealing an envelope-sized payload cannot fail");

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(nonce.as_slice());
    blob.extend_from_slice(&ciphertext);
    BASE64.encode(blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

    fn secret() -> DecryptionSecret {
        DecryptionSecret::new([7u8; SECRET_LEN])
    }

    #[test]
    fn test_seal_resolve_roundtrip() {
        let resolver = KeyResolver::new(secret());
        let envelope = seal(&secret(), KEY_HEX);
        let key = resolver.resolve(&envelope).unwrap();
        assert_eq!(key.as_bytes(), &[0x11u8; 32]);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let envelope = seal(&secret(), KEY_HEX);
        let resolver = KeyResolver::new(DecryptionSecret::new([8u8; SECRET_LEN]));
        assert!(matches!(
            resolver.resolve(&envelope),
            Err(DecryptError::Unsealed)
        ));
    }

    #[test]
    fn test_corrupted_ciphertext_is_rejected() {
        let envelope = seal(&secret(), KEY_HEX);
        let mut blob = BASE64.decode(&envelope).unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0xFF;
        let corrupted = BASE64.encode(blob);
        assert!(matches!(
            KeyResolver::new(secret()).resolve(&corrupted),
            Err(DecryptError::Unsealed)
        ));
    }

    #[test]
    fn test_garbage_base64_is_rejected() {
        assert!(matches!(
            KeyResolver::new(secret()).resolve("!!not base64!!"),
            Err(DecryptError::Encoding(_))
        ));
    }

    #[test]
    fn test_truncated_envelope_is_rejected() {
        let short = BASE64.encode([1u8; NONCE_LEN]);
        assert!(matches!(
            KeyResolver::new(secret()).resolve(&short),
            Err(DecryptError::Truncated(_))
        ));
    }

    #[test]
    fn test_envelope_without_key_field_is_rejected() {
        // Seal a structurally valid JSON record lacking the key field.
        let cipher = ChaCha20Poly1305::new(Key::from_slice(&[7u8; SECRET_LEN]));
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, b"{\"wallet\":\"hot\"}".as_slice())
            .unwrap();
        let mut blob = nonce.as_slice().to_vec();
        blob.extend_from_slice(&ciphertext);
        assert!(matches!(
            KeyResolver::new(secret()).resolve(&BASE64.encode(blob)),
            Err(DecryptError::Envelope(_))
        ));
    }

    #[test]
    fn test_short_hex_key_is_rejected() {
        let envelope = seal(&secret(), "0xabcdef");
        assert!(matches!(
            KeyResolver::new(secret()).resolve(&envelope),
            Err(DecryptError::InvalidKey)
        ));
    }

    #[test]
    fn test_bad_secret_length_surfaces() {
        let encoded = BASE64.encode([1u8; 16]);
        assert!(matches!(
            DecryptionSecret::from_base64(&encoded),
            Err(DecryptError::BadSecret(16))
        ));
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let resolver = KeyResolver::new(secret());
        let envelope = seal(&secret(), KEY_HEX);
        let key = resolver.resolve(&envelope).unwrap();
        assert_eq!(format!("{:?}", secret()), "DecryptionSecret(***REDACTED***)");
        assert_eq!(format!("{key:?}"), "KeyMaterial(***REDACTED***)");
        assert!(!format!("{resolver:?}").contains("07"));
    }
}
