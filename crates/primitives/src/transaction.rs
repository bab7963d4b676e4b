use alloy_eips::eip7702::SignedAuthorization;
use alloy_primitives::{Address, Bytes, TxHash};

/// A transaction to be submitted on behalf of the account under test.
///
/// Built once per scenario step and immutable after submission. The
/// authorization list is transmitted, and consumed by the network, in the
/// exact order it was assembled here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationRequest {
    /// The submitting account.
    pub sender: Address,
    /// The called account; for the delegation scenarios this is the EOA
    /// under test itself.
    pub recipient: Address,
    /// Opaque call payload, possibly empty.
    pub payload: Bytes,
    /// Ordered, possibly empty authorization list.
    pub authorizations: Vec<SignedAuthorization>,
    /// Explicit gas limit. Set so that a transaction expected to revert is
    /// still included instead of being rejected at gas estimation.
    pub gas_limit: Option<u64>,
}

impl DelegationRequest {
    /// A request from `sender` to `recipient` with no payload and no
    /// authorizations.
    pub fn new(sender: Address, recipient: Address) -> Self {
        Self {
            sender,
            recipient,
            payload: Bytes::new(),
            authorizations: Vec::new(),
            gas_limit: None,
        }
    }

    /// Set the call payload.
    pub fn with_payload(mut self, payload: Bytes) -> Self {
        self.payload = payload;
        self
    }

    /// Append an authorization. Order of calls is the order of consumption.
    pub fn with_authorization(mut self, authorization: SignedAuthorization) -> Self {
        self.authorizations.push(authorization);
        self
    }

    /// Set an explicit gas limit.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }
}

/// Inclusion result reported by the node for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inclusion {
    /// Block the transaction was included in, when known.
    pub block_number: Option<u64>,
    /// Whether execution succeeded.
    pub success: bool,
    /// Revert data, when the node could recover it for a failed execution.
    pub revert_reason: Option<Bytes>,
}

/// Terminal state of a submission.
///
/// `Reverted` (included, execution failed) and `Dropped` (never included
/// within the bounded wait) are deliberately distinct: several scenarios
/// interpret a revert as the expected outcome, while a drop always aborts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    /// Included and executed successfully.
    Finalized {
        /// Block of inclusion, when known.
        block_number: Option<u64>,
    },
    /// Included, but execution reverted.
    Reverted {
        /// Revert data, when the node could recover it.
        reason: Option<Bytes>,
    },
    /// Not included within the bounded wait.
    Dropped,
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxStatus::Finalized { .. } => write!(f, "finalized"),
            TxStatus::Reverted { .. } => write!(f, "reverted"),
            TxStatus::Dropped => write!(f, "dropped"),
        }
    }
}

/// Outcome of one submission, reported by value.
///
/// A revert is an outcome to be inspected, never an error: whether it means
/// pass or fail is scenario policy layered on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    /// Hash assigned at submission.
    pub hash: TxHash,
    /// Terminal status.
    pub status: TxStatus,
}

impl TxOutcome {
    /// Whether the transaction finalized successfully.
    pub fn is_finalized(&self) -> bool {
        matches!(self.status, TxStatus::Finalized { .. })
    }

    /// Whether the transaction was included but reverted.
    pub fn is_reverted(&self) -> bool {
        matches!(self.status, TxStatus::Reverted { .. })
    }

    /// Revert data carried by a reverted outcome.
    pub fn revert_reason(&self) -> Option<&Bytes> {
        match &self.status {
            TxStatus::Reverted { reason } => reason.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    #[test]
    fn request_preserves_authorization_order() {
        use alloy_eips::eip7702::Authorization;
        use alloy_primitives::{Signature, U256};

        let sig = Signature::new(U256::from(1), U256::from(2), false);
        let auth = |nonce: u64| {
            Authorization {
                chain_id: U256::from(1),
                address: Address::ZERO,
                nonce,
            }
            .into_signed(sig)
        };

        let request = DelegationRequest::new(Address::ZERO, Address::ZERO)
            .with_authorization(auth(5))
            .with_authorization(auth(6));
        let nonces: Vec<u64> = request.authorizations.iter().map(|a| a.nonce).collect();
        assert_eq!(nonces, vec![5, 6]);
    }

    #[test]
    fn outcome_accessors() {
        let hash = B256::ZERO;
        let finalized = TxOutcome {
            hash,
            status: TxStatus::Finalized { block_number: Some(1) },
        };
        assert!(finalized.is_finalized());
        assert!(!finalized.is_reverted());
        assert_eq!(finalized.revert_reason(), None);

        let reason = Bytes::from_static(&[0x08, 0xc3, 0x79, 0xa0]);
        let reverted = TxOutcome {
            hash,
            status: TxStatus::Reverted { reason: Some(reason.clone()) },
        };
        assert!(reverted.is_reverted());
        assert_eq!(reverted.revert_reason(), Some(&reason));

        let dropped = TxOutcome { hash, status: TxStatus::Dropped };
        assert!(!dropped.is_finalized());
        assert!(!dropped.is_reverted());
    }
}
