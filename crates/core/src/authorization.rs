use crate::{AccountIdentity, NodeClient, error::AuthorizationError};
use edv_primitives::{Address, Authorization, ChainScope, NonceMode, SignedAuthorization};

/// Builds signed authorization tuples for one signer.
///
/// The signer's transaction count is read through the node on every build,
/// immediately before signing; it is never cached across scenario steps.
pub struct AuthorizationFactory<'a, N> {
    identity: &'a AccountIdentity,
    node: &'a N,
    chain_scope: ChainScope,
}

impl<N> std::fmt::Debug for AuthorizationFactory<'_, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationFactory")
            .field("signer", &self.identity.address())
            .field("chain_scope", &self.chain_scope)
            .finish_non_exhaustive()
    }
}

impl<'a, N: NodeClient> AuthorizationFactory<'a, N> {
    /// A factory for tuples signed by `identity` and scoped to `chain_scope`.
    pub fn new(identity: &'a AccountIdentity, node: &'a N, chain_scope: ChainScope) -> Self {
        Self {
            identity,
            node,
            chain_scope,
        }
    }

    /// Build and sign one authorization tuple naming `delegate`, resolving
    /// the nonce per `mode` from a fresh transaction-count read.
    pub async fn build(
        &self,
        delegate: Address,
        mode: NonceMode,
    ) -> Result<SignedAuthorization, AuthorizationError> {
        let current = self
            .node
            .transaction_count(self.identity.address())
            .await
            .map_err(AuthorizationError::NonceSourceUnavailable)?;
        let nonce = mode.resolve(current);
        let authorization = Authorization {
            chain_id: self.chain_scope.chain_id(),
            address: delegate,
            nonce,
        };
        let signature = self.identity.sign_digest(&authorization.signature_hash())?;
        dev_debug!(
            "signed authorization by {}: delegate {delegate}, nonce {nonce}, {}",
            self.identity.address(),
            self.chain_scope,
        );
        Ok(authorization.into_signed(signature))
    }

    /// Build a revocation tuple: a delegation to the zero address.
    pub async fn build_revocation(
        &self,
        mode: NonceMode,
    ) -> Result<SignedAuthorization, AuthorizationError> {
        self.build(Address::ZERO, mode).await
    }
}
