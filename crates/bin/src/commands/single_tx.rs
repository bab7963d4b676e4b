use crate::{contracts, helpers::ScenarioArgs};
use clap::Args;
use console::style;
use edv_primitives::Address;

#[derive(Debug, Args)]
pub struct DelegateSingleTxCommand {
    #[command(flatten)]
    scenario: ScenarioArgs,

    #[arg(
        long,
        env = "CONTRACT_ADDRESS",
        help = "Counter contract the account delegates to"
    )]
    contract: Address,
}

impl DelegateSingleTxCommand {
    #[cfg_attr(feature = "dev", tracing::instrument(skip_all, err))]
    pub async fn run(self) -> anyhow::Result<()> {
        let runner = self.scenario.into_runner().await?;
        println!("Account address: {}", runner.account());
        println!("Contract address: {}", self.contract);

        runner
            .single_tx_delegation(self.contract, contracts::counter_increment())
            .await?;

        println!(
            "{} delegated call executed within a single transaction",
            style("PASS").green().bold()
        );
        Ok(())
    }
}
