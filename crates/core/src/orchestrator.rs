use crate::{NodeClient, error::NodeError, trace};
use edv_primitives::{DelegationRequest, TxHash, TxOutcome, TxStatus};
use std::time::Duration;

/// Default bounded wait for transaction inclusion.
pub const DEFAULT_INCLUSION_TIMEOUT: Duration = Duration::from_secs(120);

/// The transaction-submission state machine.
///
/// Each submission moves `Built -> Submitted -> Pending -> {Finalized |
/// Reverted | Dropped}`. The orchestrator transmits the authorization list
/// exactly as assembled (no reordering, no deduplication) and reports the
/// terminal state by value: whether a revert means pass or fail is the
/// caller's policy. A dropped submission is never retried here, since a
/// retry would require fresh nonce resolution.
#[derive(Debug)]
pub struct DelegationOrchestrator<N> {
    node: N,
    inclusion_timeout: Duration,
}

impl<N: NodeClient> DelegationOrchestrator<N> {
    /// An orchestrator submitting through `node`.
    pub fn new(node: N) -> Self {
        Self {
            node,
            inclusion_timeout: DEFAULT_INCLUSION_TIMEOUT,
        }
    }

    /// Override the bounded inclusion wait.
    pub fn with_inclusion_timeout(mut self, timeout: Duration) -> Self {
        self.inclusion_timeout = timeout;
        self
    }

    /// The underlying node client.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Submit `request` without waiting for inclusion.
    pub async fn submit(&self, request: &DelegationRequest) -> Result<TxHash, NodeError> {
        let hash = self.node.submit(request).await?;
        dev_info!(
            "submitted transaction {hash} ({} authorizations, {} payload bytes)",
            request.authorizations.len(),
            request.payload.len(),
        );
        Ok(hash)
    }

    /// Submit `request` and block until it reaches a terminal state.
    pub async fn submit_and_await(
        &self,
        request: &DelegationRequest,
    ) -> Result<TxOutcome, NodeError> {
        let hash = self.submit(request).await?;
        dev_debug!("transaction {hash} pending");
        let status = match self
            .node
            .wait_for_inclusion(hash, self.inclusion_timeout)
            .await?
        {
            None => {
                dev_warn!(
                    "transaction {hash} not included within {:?}",
                    self.inclusion_timeout
                );
                TxStatus::Dropped
            }
            Some(inclusion) if inclusion.success => TxStatus::Finalized {
                block_number: inclusion.block_number,
            },
            Some(inclusion) => TxStatus::Reverted {
                reason: inclusion.revert_reason,
            },
        };
        let outcome = TxOutcome { hash, status };
        dev_info!("transaction outcome: {}", trace::outcome_json(&outcome));
        Ok(outcome)
    }
}
