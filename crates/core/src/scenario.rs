use crate::{
    AccountIdentity, AuthorizationFactory, DelegationOrchestrator, DelegationStateInspector,
    NodeClient,
    error::ScenarioError,
    trace,
};
use edv_primitives::{
    Address, Bytes, ChainScope, DelegationRequest, DelegationState, NonceMode, TxOutcome,
    TxStatus,
};
use std::time::Duration;

/// Gas limit applied to scenario submissions, so that a transaction the
/// scenario expects to revert is included instead of failing gas estimation.
const SCENARIO_GAS_LIMIT: u64 = 1_000_000;

/// Delegation state a scenario requires before or after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateExpectation {
    /// The account must have no code.
    Undelegated,
    /// The account must be delegated to the given contract.
    DelegatedTo(Address),
    /// The account must be delegated to some contract.
    Delegated,
}

impl StateExpectation {
    fn matches(&self, observed: &DelegationState) -> bool {
        match self {
            StateExpectation::Undelegated => observed.is_undelegated(),
            StateExpectation::DelegatedTo(address) => observed.delegate() == Some(*address),
            StateExpectation::Delegated => observed.delegate().is_some(),
        }
    }
}

impl std::fmt::Display for StateExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateExpectation::Undelegated => write!(f, "undelegated"),
            StateExpectation::DelegatedTo(address) => write!(f, "delegated to {address}"),
            StateExpectation::Delegated => write!(f, "delegated"),
        }
    }
}

/// Drives the end-to-end delegation scenarios.
///
/// Steps are strictly sequential: at most one submission is outstanding, and
/// the signer's transaction count is re-read immediately before each
/// authorization is built. This ordering is what makes the nonce resolution
/// of later authorizations sound, so no locking is needed.
#[derive(Debug)]
pub struct ScenarioRunner<N> {
    identity: AccountIdentity,
    orchestrator: DelegationOrchestrator<N>,
    chain_scope: ChainScope,
}

impl<N: NodeClient> ScenarioRunner<N> {
    /// A runner driving `node` on behalf of `identity`.
    pub fn new(identity: AccountIdentity, node: N, chain_scope: ChainScope) -> Self {
        Self {
            identity,
            orchestrator: DelegationOrchestrator::new(node),
            chain_scope,
        }
    }

    /// Override the bounded inclusion wait.
    pub fn with_inclusion_timeout(self, timeout: Duration) -> Self {
        let Self {
            identity,
            orchestrator,
            chain_scope,
        } = self;
        Self {
            identity,
            orchestrator: orchestrator.with_inclusion_timeout(timeout),
            chain_scope,
        }
    }

    /// The address of the EOA under test.
    pub fn account(&self) -> Address {
        self.identity.address()
    }

    fn factory(&self) -> AuthorizationFactory<'_, N> {
        AuthorizationFactory::new(&self.identity, self.orchestrator.node(), self.chain_scope)
    }

    fn inspector(&self) -> DelegationStateInspector<'_, N> {
        DelegationStateInspector::new(self.orchestrator.node())
    }

    /// A self-addressed request with the scenario gas limit.
    fn request(&self) -> DelegationRequest {
        DelegationRequest::new(self.account(), self.account()).with_gas_limit(SCENARIO_GAS_LIMIT)
    }

    async fn expect_state(
        &self,
        expectation: StateExpectation,
    ) -> Result<DelegationState, ScenarioError> {
        let observed = self.inspector().inspect(self.account()).await?;
        if expectation.matches(&observed) {
            Ok(observed)
        } else {
            Err(ScenarioError::UnexpectedDelegationState {
                address: self.account(),
                expected: expectation,
                observed,
            })
        }
    }

    fn ensure_finalized(outcome: TxOutcome) -> Result<(), ScenarioError> {
        match outcome.status {
            TxStatus::Finalized { .. } => Ok(()),
            TxStatus::Reverted { reason } => Err(ScenarioError::UnexpectedRevert {
                hash: outcome.hash,
                reason,
            }),
            TxStatus::Dropped => Err(ScenarioError::TransactionDropped { hash: outcome.hash }),
        }
    }

    /// Install permanent delegation to `delegate` and prove it persists.
    ///
    /// After the installing transaction finalizes, the same payload is
    /// submitted again with an empty authorization list; the designator alone
    /// must route it identically.
    pub async fn permanent_delegation(
        &self,
        delegate: Address,
        payload: Bytes,
    ) -> Result<(), ScenarioError> {
        self.expect_state(StateExpectation::Undelegated).await?;

        let authorization = self
            .factory()
            .build(delegate, NonceMode::SelfExecuted)
            .await?;
        dev_info!("authorization: {}", trace::authorization_json(&authorization));
        let install = self
            .request()
            .with_payload(payload.clone())
            .with_authorization(authorization);
        Self::ensure_finalized(self.orchestrator.submit_and_await(&install).await?)?;
        self.expect_state(StateExpectation::DelegatedTo(delegate))
            .await?;

        dev_info!("delegation installed; repeating the call without an authorization list");
        let repeat = self.request().with_payload(payload);
        Self::ensure_finalized(self.orchestrator.submit_and_await(&repeat).await?)?;
        self.expect_state(StateExpectation::DelegatedTo(delegate))
            .await?;
        Ok(())
    }

    /// Delegate to `delegate` and execute `payload` within one transaction.
    ///
    /// Whether the delegation outlives this call is the delegate contract's
    /// policy, so no persistence assertion is made afterwards.
    pub async fn single_tx_delegation(
        &self,
        delegate: Address,
        payload: Bytes,
    ) -> Result<(), ScenarioError> {
        let authorization = self
            .factory()
            .build(delegate, NonceMode::SelfExecuted)
            .await?;
        dev_info!("authorization: {}", trace::authorization_json(&authorization));
        let request = self
            .request()
            .with_payload(payload)
            .with_authorization(authorization);
        Self::ensure_finalized(self.orchestrator.submit_and_await(&request).await?)?;

        let state = self.inspector().inspect(self.account()).await?;
        dev_info!("state after single-transaction delegation: {state}");
        Ok(())
    }

    /// Install delegation to `forwarder` and revoke it within one
    /// transaction, probing who the inner call observes as its caller.
    ///
    /// `payload` is addressed to the account itself and routed through the
    /// forwarder contract; it asks the probe whether the immediate caller is
    /// the EOA. The expected outcome is a revert: the forwarder, not the
    /// EOA, becomes the observed caller. A finalized probe means the
    /// sender-identity property does not hold.
    pub async fn sender_identity_probe(
        &self,
        forwarder: Address,
        payload: Bytes,
    ) -> Result<(), ScenarioError> {
        self.expect_state(StateExpectation::Undelegated).await?;

        let factory = self.factory();
        let install = factory.build(forwarder, NonceMode::SelfExecuted).await?;
        let revoke = factory
            .build_revocation(NonceMode::ExplicitOffset(1))
            .await?;
        dev_info!("install authorization: {}", trace::authorization_json(&install));
        dev_info!("revoke authorization: {}", trace::authorization_json(&revoke));

        let request = self
            .request()
            .with_payload(payload)
            .with_authorization(install)
            .with_authorization(revoke);
        let outcome = self.orchestrator.submit_and_await(&request).await?;
        match outcome.status {
            TxStatus::Reverted { reason: Some(reason) } => {
                dev_info!("probe reverted as expected, revert data {reason}");
            }
            TxStatus::Reverted { reason: None } => {
                dev_info!("probe reverted as expected (no revert data recovered)");
            }
            TxStatus::Finalized { .. } => {
                return Err(ScenarioError::SenderIdentityNotMasked { hash: outcome.hash });
            }
            TxStatus::Dropped => {
                return Err(ScenarioError::TransactionDropped { hash: outcome.hash });
            }
        }

        // The revocation tuple was consumed even though execution reverted.
        self.expect_state(StateExpectation::Undelegated).await?;
        Ok(())
    }

    /// Remove an existing delegation.
    ///
    /// Removal from an already-undelegated account is reported as a
    /// precondition violation, never silently accepted.
    pub async fn remove_delegation(&self) -> Result<(), ScenarioError> {
        let observed = self.expect_state(StateExpectation::Delegated).await?;
        dev_info!("removing delegation: account currently {observed}");

        let authorization = self
            .factory()
            .build_revocation(NonceMode::SelfExecuted)
            .await?;
        dev_info!("authorization: {}", trace::authorization_json(&authorization));
        let request = self.request().with_authorization(authorization);
        Self::ensure_finalized(self.orchestrator.submit_and_await(&request).await?)?;

        self.expect_state(StateExpectation::Undelegated).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Execution, MockNode};
    use edv_primitives::DelegationState;

    const CHAIN: u64 = 31337;

    fn runner_with_node() -> ScenarioRunner<MockNode> {
        let identity = AccountIdentity::random();
        let node = MockNode::new(CHAIN, identity.address());
        ScenarioRunner::new(identity, node, ChainScope::Chain(CHAIN))
    }

    fn node(runner: &ScenarioRunner<MockNode>) -> &MockNode {
        runner.orchestrator.node()
    }

    fn payload() -> Bytes {
        Bytes::from_static(&[0xca, 0x11, 0xab, 0x1e])
    }

    #[tokio::test]
    async fn permanent_delegation_installs_and_persists() {
        let runner = runner_with_node();
        let delegate = Address::repeat_byte(0xaa);
        node(&runner).set_nonce(3);
        node(&runner).plan([Execution::Finalize, Execution::Finalize]);

        runner
            .permanent_delegation(delegate, payload())
            .await
            .unwrap();

        let submissions = node(&runner).submissions();
        assert_eq!(submissions.len(), 2);
        // the installing authorization resolved against the fresh read
        assert_eq!(submissions[0].authorizations.len(), 1);
        assert_eq!(submissions[0].authorizations[0].nonce, 3);
        assert_eq!(submissions[0].authorizations[0].address, delegate);
        // the persistence proof carries the same payload and no authorizations
        assert!(submissions[1].authorizations.is_empty());
        assert_eq!(submissions[1].payload, submissions[0].payload);
        // the designator stayed installed
        assert_eq!(
            DelegationState::from_code(&node(&runner).code()),
            DelegationState::DelegatedTo(delegate)
        );
    }

    #[tokio::test]
    async fn permanent_delegation_requires_a_clean_account() {
        let runner = runner_with_node();
        node(&runner).set_code(vec![0x60, 0x80]);

        let err = runner
            .permanent_delegation(Address::repeat_byte(0xaa), payload())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::UnexpectedDelegationState {
                expected: StateExpectation::Undelegated,
                observed: DelegationState::OccupiedByNonDelegationCode,
                ..
            }
        ));
        // aborted before any submission
        assert!(node(&runner).submissions().is_empty());
    }

    #[tokio::test]
    async fn permanent_delegation_aborts_on_unexpected_revert() {
        let runner = runner_with_node();
        let revert_data = Bytes::from_static(&[0x08, 0xc3, 0x79, 0xa0]);
        node(&runner).plan([Execution::Revert(Some(revert_data.clone()))]);

        let err = runner
            .permanent_delegation(Address::repeat_byte(0xaa), payload())
            .await
            .unwrap_err();
        // the recovered revert data survives into the error for diagnosis
        match err {
            ScenarioError::UnexpectedRevert { reason, .. } => {
                assert_eq!(reason, Some(revert_data));
            }
            other => panic!("expected UnexpectedRevert, got {other}"),
        }
    }

    #[tokio::test]
    async fn single_tx_delegation_finalizes() {
        let runner = runner_with_node();
        node(&runner).set_nonce(12);
        node(&runner).plan([Execution::Finalize]);

        runner
            .single_tx_delegation(Address::repeat_byte(0xbb), payload())
            .await
            .unwrap();

        let submissions = node(&runner).submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].authorizations[0].nonce, 12);
        assert_eq!(submissions[0].recipient, runner.account());
    }

    #[tokio::test]
    async fn probe_expects_revert_and_ends_undelegated() {
        let runner = runner_with_node();
        let forwarder = Address::repeat_byte(0xcc);
        node(&runner).set_nonce(5);
        node(&runner).plan([Execution::Revert(Some(Bytes::from_static(&[0x01])))]);

        runner
            .sender_identity_probe(forwarder, payload())
            .await
            .unwrap();

        let submissions = node(&runner).submissions();
        assert_eq!(submissions.len(), 1);
        let auths = &submissions[0].authorizations;
        // install then revoke, strictly increasing nonces from the fresh read
        assert_eq!(auths.len(), 2);
        assert_eq!((auths[0].nonce, auths[0].address), (5, forwarder));
        assert_eq!((auths[1].nonce, auths[1].address), (6, Address::ZERO));
        // both tuples were consumed despite the revert
        assert!(node(&runner).code().is_empty());
    }

    #[tokio::test]
    async fn probe_fails_when_the_transaction_finalizes() {
        let runner = runner_with_node();
        node(&runner).plan([Execution::Finalize]);

        let err = runner
            .sender_identity_probe(Address::repeat_byte(0xcc), payload())
            .await
            .unwrap_err();
        assert!(matches!(err, ScenarioError::SenderIdentityNotMasked { .. }));
    }

    #[tokio::test]
    async fn probe_aborts_when_dropped() {
        let runner = runner_with_node();
        node(&runner).plan([Execution::Drop]);

        let err = runner
            .sender_identity_probe(Address::repeat_byte(0xcc), payload())
            .await
            .unwrap_err();
        assert!(matches!(err, ScenarioError::TransactionDropped { .. }));
    }

    #[tokio::test]
    async fn remove_delegation_clears_the_designator() {
        let runner = runner_with_node();
        let delegate = Address::repeat_byte(0xdd);
        node(&runner).set_code(DelegationState::designator(delegate).to_vec());
        node(&runner).set_nonce(9);
        node(&runner).plan([Execution::Finalize]);

        runner.remove_delegation().await.unwrap();

        let submissions = node(&runner).submissions();
        assert_eq!(submissions.len(), 1);
        assert!(submissions[0].payload.is_empty());
        assert_eq!(submissions[0].authorizations[0].address, Address::ZERO);
        assert_eq!(submissions[0].authorizations[0].nonce, 9);
        assert!(node(&runner).code().is_empty());
    }

    #[tokio::test]
    async fn removal_from_an_undelegated_account_is_reported() {
        let runner = runner_with_node();

        let err = runner.remove_delegation().await.unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::UnexpectedDelegationState {
                expected: StateExpectation::Delegated,
                observed: DelegationState::Undelegated,
                ..
            }
        ));
        assert!(node(&runner).submissions().is_empty());
    }

    #[tokio::test]
    async fn scenario_sequence_matches_the_oracle_throughout() {
        // install, call without authorizations, then remove: the inspector
        // observes every intermediate state
        let runner = runner_with_node();
        let forwarder = Address::repeat_byte(0xee);
        node(&runner).plan([
            Execution::Finalize,
            Execution::Finalize,
            Execution::Finalize,
        ]);

        runner
            .permanent_delegation(forwarder, payload())
            .await
            .unwrap();
        runner.remove_delegation().await.unwrap();

        assert!(node(&runner).code().is_empty());
        assert_eq!(node(&runner).submissions().len(), 3);
    }
}
