//! Credential decryption seam.

use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("credential unseal failed: {0}")]
    Unseal(String),
}

/// Opaque decryption collaborator: sealed credential in, plaintext out.
/// Plaintext is wrapped in [`Zeroizing`] so it is wiped on drop.
pub trait CredentialVault: Send + Sync {
    fn open(&self, sealed: &str) -> Result<Zeroizing<String>, VaultError>;
}

/// Passthrough vault for unencrypted registries and tests.
pub struct PlainVault;

impl CredentialVault for PlainVault {
    fn open(&self, sealed: &str) -> Result<Zeroizing<String>, VaultError> {
        Ok(Zeroizing::new(sealed.to_string()))
    }
}
