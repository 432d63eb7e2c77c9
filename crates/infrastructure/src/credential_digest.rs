use sha2::{Digest, Sha256};
use teamgate_core::Credential;

/// Computes the SHA-256 hex digest stored in place of a raw bearer credential.
#[must_use]
pub fn digest_credential(credential: &Credential) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credential.expose().as_bytes());
    hex::encode(hasher.finalize())
}
