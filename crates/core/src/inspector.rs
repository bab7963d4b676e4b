use crate::{NodeClient, error::NodeError};
use edv_primitives::{Address, DelegationState};

/// Classifies the code currently installed at an account.
///
/// This is the sole oracle the scenarios trust for whether delegation took
/// effect; transaction success alone is never treated as sufficient.
#[derive(Debug)]
pub struct DelegationStateInspector<'a, N> {
    node: &'a N,
}

impl<'a, N: NodeClient> DelegationStateInspector<'a, N> {
    /// An inspector reading through `node`.
    pub fn new(node: &'a N) -> Self {
        Self { node }
    }

    /// Fetch the account's code and classify it.
    pub async fn inspect(&self, address: Address) -> Result<DelegationState, NodeError> {
        let code = self.node.code_at(address).await?;
        let state = DelegationState::from_code(&code);
        dev_info!("account {address} code ({} bytes): {state}", code.len());
        Ok(state)
    }
}
