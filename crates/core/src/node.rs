//! Execution-layer interface consumed by the engine.

use crate::error::NodeError;
use alloy::{
    network::{TransactionBuilder, TransactionBuilder7702},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use edv_primitives::{Address, Bytes, DelegationRequest, Inclusion, TxHash};
use std::time::Duration;

const INCLUSION_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// The node operations the engine depends on.
///
/// [`ProviderNode`] implements this over any alloy [`Provider`]; tests
/// substitute an in-process double.
#[async_trait::async_trait]
pub trait NodeClient: Send + Sync {
    /// Chain id of the connected network.
    async fn chain_id(&self) -> Result<u64, NodeError>;

    /// Raw code currently installed at `address`.
    async fn code_at(&self, address: Address) -> Result<Bytes, NodeError>;

    /// Current transaction count of `address`.
    async fn transaction_count(&self, address: Address) -> Result<u64, NodeError>;

    /// Submit `request`, returning the assigned transaction hash. The
    /// authorization list is transmitted in the exact order supplied.
    async fn submit(&self, request: &DelegationRequest) -> Result<TxHash, NodeError>;

    /// Wait up to `timeout` for inclusion of `hash`; `None` means the
    /// transaction was not included within the bound.
    async fn wait_for_inclusion(
        &self,
        hash: TxHash,
        timeout: Duration,
    ) -> Result<Option<Inclusion>, NodeError>;
}

/// [`NodeClient`] over an alloy [`Provider`].
///
/// The provider is expected to carry a wallet filler, so submitted requests
/// are signed locally and sent raw.
#[derive(Debug)]
pub struct ProviderNode<P> {
    provider: P,
}

impl<P: Provider> ProviderNode<P> {
    /// Wrap `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl<P> NodeClient for ProviderNode<P>
where
    P: Provider + Send + Sync,
{
    async fn chain_id(&self) -> Result<u64, NodeError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(NodeError::transport)
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, NodeError> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(NodeError::transport)
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, NodeError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(NodeError::transport)
    }

    async fn submit(&self, request: &DelegationRequest) -> Result<TxHash, NodeError> {
        let tx = rpc_request(request);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(NodeError::transport)?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_inclusion(
        &self,
        hash: TxHash,
        timeout: Duration,
    ) -> Result<Option<Inclusion>, NodeError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(receipt) = self
                .provider
                .get_transaction_receipt(hash)
                .await
                .map_err(NodeError::transport)?
            {
                let success = receipt.status();
                let revert_reason = if success {
                    None
                } else {
                    recover_revert_reason(&self.provider, hash, &receipt).await
                };
                return Ok(Some(Inclusion {
                    block_number: receipt.block_number,
                    success,
                    revert_reason,
                }));
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(INCLUSION_POLL_INTERVAL).await;
        }
    }
}

fn rpc_request(request: &DelegationRequest) -> TransactionRequest {
    let mut tx = TransactionRequest::default()
        .with_from(request.sender)
        .with_to(request.recipient)
        .with_input(request.payload.clone());
    if !request.authorizations.is_empty() {
        tx = tx.with_authorization_list(request.authorizations.clone());
    }
    if let Some(gas_limit) = request.gas_limit {
        tx = tx.with_gas_limit(gas_limit);
    }
    tx
}

/// Best-effort recovery of revert data by replaying the included transaction
/// via `eth_call` at its parent block.
///
/// The replay cannot reproduce authorization side effects applied by the
/// transaction itself, so a reverted outcome may legitimately carry no data.
async fn recover_revert_reason<P: Provider>(
    provider: &P,
    hash: TxHash,
    receipt: &TransactionReceipt,
) -> Option<Bytes> {
    let tx = provider.get_transaction_by_hash(hash).await.ok()??;
    let block = receipt.block_number?;
    let replay = tx.into_request();
    match provider
        .call(replay)
        .block(block.saturating_sub(1).into())
        .await
    {
        Ok(_) => None,
        Err(err) => err
            .as_error_resp()
            .and_then(|payload| payload.as_revert_data()),
    }
}
