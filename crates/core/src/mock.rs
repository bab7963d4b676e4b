//! In-process node double for the engine tests.
//!
//! Models the network rules the scenarios depend on: the authorization list
//! of an included transaction is consumed in order, tuple `i` validating
//! against the signer's pre-transaction nonce plus `i`; valid tuples install
//! or clear the delegation designator even when execution reverts; every
//! included transaction consumes one sender nonce.

use crate::{NodeClient, error::NodeError};
use edv_primitives::{
    Address, B256, Bytes, DelegationRequest, DelegationState, Inclusion, TxHash,
};
use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
    time::Duration,
};

/// Planned result for the next submitted transaction.
#[derive(Debug, Clone)]
pub(crate) enum Execution {
    /// Include the transaction; execution succeeds.
    Finalize,
    /// Include the transaction; execution reverts with the given data.
    Revert(Option<Bytes>),
    /// Never include the transaction.
    Drop,
}

#[derive(Debug, Default)]
struct State {
    nonce: u64,
    code: Vec<u8>,
    fail_nonce_reads: bool,
    plan: VecDeque<Execution>,
    submissions: Vec<DelegationRequest>,
    inclusions: HashMap<TxHash, Option<Inclusion>>,
}

/// Programmable [`NodeClient`] double tracking a single account.
#[derive(Debug)]
pub(crate) struct MockNode {
    chain_id: u64,
    account: Address,
    state: Mutex<State>,
}

impl MockNode {
    pub(crate) fn new(chain_id: u64, account: Address) -> Self {
        Self {
            chain_id,
            account,
            state: Mutex::new(State::default()),
        }
    }

    pub(crate) fn set_nonce(&self, nonce: u64) {
        self.state.lock().unwrap().nonce = nonce;
    }

    pub(crate) fn nonce(&self) -> u64 {
        self.state.lock().unwrap().nonce
    }

    pub(crate) fn set_code(&self, code: Vec<u8>) {
        self.state.lock().unwrap().code = code;
    }

    pub(crate) fn code(&self) -> Vec<u8> {
        self.state.lock().unwrap().code.clone()
    }

    pub(crate) fn fail_nonce_reads(&self) {
        self.state.lock().unwrap().fail_nonce_reads = true;
    }

    pub(crate) fn plan(&self, executions: impl IntoIterator<Item = Execution>) {
        self.state.lock().unwrap().plan.extend(executions);
    }

    pub(crate) fn submissions(&self) -> Vec<DelegationRequest> {
        self.state.lock().unwrap().submissions.clone()
    }
}

#[async_trait::async_trait]
impl NodeClient for MockNode {
    async fn chain_id(&self) -> Result<u64, NodeError> {
        Ok(self.chain_id)
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, NodeError> {
        let state = self.state.lock().unwrap();
        if address == self.account {
            Ok(Bytes::from(state.code.clone()))
        } else {
            Ok(Bytes::new())
        }
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, NodeError> {
        let state = self.state.lock().unwrap();
        if state.fail_nonce_reads {
            return Err(NodeError::msg("nonce source offline"));
        }
        if address == self.account {
            Ok(state.nonce)
        } else {
            Ok(0)
        }
    }

    async fn submit(&self, request: &DelegationRequest) -> Result<TxHash, NodeError> {
        let mut state = self.state.lock().unwrap();
        let execution = state.plan.pop_front().unwrap_or(Execution::Finalize);
        let hash = B256::with_last_byte(state.submissions.len() as u8 + 1);
        state.submissions.push(request.clone());

        let inclusion = match execution {
            Execution::Drop => None,
            Execution::Finalize | Execution::Revert(_) => {
                let base = state.nonce;
                for (i, authorization) in request.authorizations.iter().enumerate() {
                    if authorization.nonce != base + i as u64 {
                        continue;
                    }
                    if authorization.address == Address::ZERO {
                        state.code.clear();
                    } else {
                        state.code =
                            DelegationState::designator(authorization.address).to_vec();
                    }
                }
                state.nonce = base + 1;
                let block_number = Some(state.submissions.len() as u64);
                match execution {
                    Execution::Finalize => Some(Inclusion {
                        block_number,
                        success: true,
                        revert_reason: None,
                    }),
                    Execution::Revert(reason) => Some(Inclusion {
                        block_number,
                        success: false,
                        revert_reason: reason,
                    }),
                    Execution::Drop => unreachable!(),
                }
            }
        };
        state.inclusions.insert(hash, inclusion);
        Ok(hash)
    }

    async fn wait_for_inclusion(
        &self,
        hash: TxHash,
        _timeout: Duration,
    ) -> Result<Option<Inclusion>, NodeError> {
        let state = self.state.lock().unwrap();
        Ok(state.inclusions.get(&hash).cloned().flatten())
    }
}
