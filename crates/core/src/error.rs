use crate::scenario::StateExpectation;
use edv_primitives::{Address, Bytes, DelegationState, TxHash};
use std::error::Error;

/// Errors crossing the node transport boundary.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// Transport or RPC failure reported by the node client.
    #[error("transport error: {0}")]
    Transport(Box<dyn Error + Send + Sync>),
}

impl NodeError {
    /// Wrap a transport error.
    pub fn transport<E: Error + Send + Sync + 'static>(err: E) -> Self {
        NodeError::Transport(Box::new(err))
    }

    /// A transport error from a plain message.
    pub fn msg(msg: impl Into<String>) -> Self {
        NodeError::Transport(msg.into().into())
    }
}

/// Error parsing the configured signing secret; fatal at startup, before any
/// network interaction.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The secret could not be parsed into a signing key.
    #[error("malformed signing secret: {0}")]
    MalformedSecret(#[source] alloy::signers::local::LocalSignerError),
}

/// Errors building a signed authorization tuple.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    /// The signer's transaction count could not be read.
    #[error("nonce source unavailable: {0}")]
    NonceSourceUnavailable(#[source] NodeError),
    /// The signing capability errored.
    #[error("signing failure: {0}")]
    SigningFailure(#[from] alloy::signers::Error),
}

/// Scenario-level failures.
///
/// Everything below the scenario boundary is returned by value; a revert is
/// only an error here when the running scenario did not expect one.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Building an authorization tuple failed.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// A node interaction failed; the scenario aborts without retry to avoid
    /// nonce skew.
    #[error(transparent)]
    Node(#[from] NodeError),
    /// The transaction was never included within the bounded wait. Never
    /// retried automatically: a retry would need fresh nonce resolution.
    #[error("transaction {hash} was dropped without inclusion")]
    TransactionDropped {
        /// Hash assigned at submission.
        hash: TxHash,
    },
    /// A transaction the scenario expected to finalize reverted.
    #[error(
        "transaction {hash} reverted unexpectedly, revert data {}",
        reason.as_ref().map(|r| r.to_string()).unwrap_or_else(|| "unavailable".into())
    )]
    UnexpectedRevert {
        /// Hash assigned at submission.
        hash: TxHash,
        /// Revert data, when the node could recover it.
        reason: Option<Bytes>,
    },
    /// The sender-identity probe finalized instead of reverting: the inner
    /// call observed the EOA, not the forwarder, as its caller.
    #[error("probe transaction {hash} finalized; the forwarder did not become the observed caller")]
    SenderIdentityNotMasked {
        /// Hash assigned at submission.
        hash: TxHash,
    },
    /// Observed delegation state contradicts a scenario pre- or
    /// postcondition.
    #[error("unexpected delegation state for {address}: expected {expected}, observed {observed}")]
    UnexpectedDelegationState {
        /// The inspected account.
        address: Address,
        /// The state the scenario required.
        expected: StateExpectation,
        /// The state the inspector observed.
        observed: DelegationState,
    },
}
