use crate::error::IdentityError;
use alloy::{
    network::EthereumWallet,
    primitives::Signature,
    signers::{SignerSync, local::PrivateKeySigner},
};
use edv_primitives::{Address, B256};

/// A signing key and the address derived from it.
///
/// Constructed once at process start from the configured secret and threaded
/// through every component; never read from ambient globals. Only the address
/// and the signing capability cross this boundary: the key is not
/// inspectable, not serialized, and `Debug` prints the address alone.
pub struct AccountIdentity {
    signer: PrivateKeySigner,
}

impl std::fmt::Debug for AccountIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountIdentity")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

impl AccountIdentity {
    /// Parse a hex-encoded signing secret, with or without a `0x` prefix.
    pub fn from_secret(secret: &str) -> Result<Self, IdentityError> {
        let signer = secret
            .parse::<PrivateKeySigner>()
            .map_err(IdentityError::MalformedSecret)?;
        Ok(Self { signer })
    }

    /// A fresh random identity.
    pub fn random() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }

    /// The address derived from the signing key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a 32-byte digest.
    pub fn sign_digest(&self, digest: &B256) -> Result<Signature, alloy::signers::Error> {
        self.signer.sign_hash_sync(digest)
    }

    /// The wallet the transport uses to sign enclosing transactions.
    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
