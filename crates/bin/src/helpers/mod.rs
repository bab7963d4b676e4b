use alloy::{
    providers::ProviderBuilder, rpc::client::ClientBuilder, transports::layers::RetryBackoffLayer,
};
use clap::Args;
use edv_core::{AccountIdentity, DEFAULT_INCLUSION_TIMEOUT, NodeClient, ProviderNode, ScenarioRunner};
use edv_primitives::ChainScope;
use std::{future::Future, time::Duration};
use url::Url;

#[derive(Debug, Args)]
pub struct ScenarioArgs {
    #[arg(
        long,
        env = "PRIVATE_KEY",
        hide_env_values = true,
        help = "Hex-encoded secret key of the account under test"
    )]
    pub private_key: String,

    #[arg(
        long,
        env = "RPC_URL",
        help = "URL to the RPC server",
        default_value = "http://localhost:8545"
    )]
    pub rpc: Url,

    #[arg(
        long,
        env = "CHAIN_ID",
        help = "Chain id the authorizations are scoped to; 0 signs scope-free tuples; \
                read from the node when omitted"
    )]
    pub chain_id: Option<u64>,

    #[arg(
        long,
        help = "Inclusion wait: seconds before a pending transaction counts as dropped",
        default_value_t = DEFAULT_INCLUSION_TIMEOUT.as_secs()
    )]
    pub timeout: u64,

    // Retry parameters
    #[arg(
        long,
        help = "Retry Backoff: maximum number of retries",
        default_value = "10"
    )]
    pub max_retry: u32,
    #[arg(
        long,
        help = "Retry Backoff: backoff duration in milliseconds",
        default_value = "100"
    )]
    pub backoff: u64,
    #[arg(
        long,
        help = "Retry Backoff: compute units per second",
        default_value = "100"
    )]
    pub cups: u64,
}

impl ScenarioArgs {
    /// Construct a scenario runner from the arguments.
    ///
    /// The secret is parsed before any network interaction; the returned
    /// runner signs transactions locally and submits them raw.
    pub async fn into_runner(self) -> anyhow::Result<ScenarioRunner<impl NodeClient>> {
        let identity = AccountIdentity::from_secret(&self.private_key)?;

        let retry_layer = RetryBackoffLayer::new(self.max_retry, self.backoff, self.cups);
        let client = ClientBuilder::default().layer(retry_layer).http(self.rpc);
        let node = ProviderNode::new(
            ProviderBuilder::new()
                .wallet(identity.wallet())
                .connect_client(client),
        );

        let chain_scope = match self.chain_id {
            Some(id) => ChainScope::from(id),
            None => ChainScope::Chain(node.chain_id().await?),
        };
        dev_debug!("authorization scope: {chain_scope}");

        Ok(ScenarioRunner::new(identity, node, chain_scope)
            .with_inclusion_timeout(Duration::from_secs(self.timeout)))
    }
}

/// defer run in async
pub fn run_async<F: Future>(future: F) -> F::Output {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    rt.block_on(future)
}
