use crate::{contracts, helpers::ScenarioArgs};
use clap::Args;
use console::style;
use edv_primitives::Address;

#[derive(Debug, Args)]
pub struct ProbeSenderCommand {
    #[command(flatten)]
    scenario: ScenarioArgs,

    #[arg(
        long,
        env = "MULTICALL_ADDRESS",
        help = "Multicall forwarder contract delegated to and revoked within one transaction"
    )]
    multicall: Address,
    #[arg(
        long,
        env = "UTILS_ADDRESS",
        help = "Probe contract answering isSender"
    )]
    utils: Address,
}

impl ProbeSenderCommand {
    #[cfg_attr(feature = "dev", tracing::instrument(skip_all, err))]
    pub async fn run(self) -> anyhow::Result<()> {
        let runner = self.scenario.into_runner().await?;
        println!("Account address: {}", runner.account());
        println!("Multicall address: {}", self.multicall);
        println!("Utils address: {}", self.utils);

        let payload = contracts::forwarded_probe_call(self.multicall, self.utils, runner.account());
        runner.sender_identity_probe(self.multicall, payload).await?;

        println!(
            "{} forwarder, not the account, was the sender the probe observed; \
             delegation was revoked in the same transaction",
            style("PASS").green().bold()
        );
        Ok(())
    }
}
