use crate::{contracts, helpers::ScenarioArgs};
use clap::Args;
use console::style;
use edv_primitives::Address;

#[derive(Debug, Args)]
pub struct DelegatePermanentCommand {
    #[command(flatten)]
    scenario: ScenarioArgs,

    #[arg(
        long,
        env = "MULTICALL_ADDRESS",
        help = "Multicall forwarder contract the account delegates to"
    )]
    multicall: Address,
    #[arg(
        long,
        env = "UTILS_ADDRESS",
        help = "Probe contract answering isSender"
    )]
    utils: Address,
}

impl DelegatePermanentCommand {
    #[cfg_attr(feature = "dev", tracing::instrument(skip_all, err))]
    pub async fn run(self) -> anyhow::Result<()> {
        let runner = self.scenario.into_runner().await?;
        println!("Account address: {}", runner.account());
        println!("Multicall address: {}", self.multicall);
        println!("Utils address: {}", self.utils);

        let payload = contracts::delegated_probe_call(self.utils, runner.account());
        runner.permanent_delegation(self.multicall, payload).await?;

        println!(
            "{} delegation persisted across a transaction without an authorization list",
            style("PASS").green().bold()
        );
        Ok(())
    }
}
