use crate::helpers::ScenarioArgs;
use clap::Args;
use console::style;

#[derive(Debug, Args)]
pub struct RemoveDelegationCommand {
    #[command(flatten)]
    scenario: ScenarioArgs,
}

impl RemoveDelegationCommand {
    #[cfg_attr(feature = "dev", tracing::instrument(skip_all, err))]
    pub async fn run(self) -> anyhow::Result<()> {
        let runner = self.scenario.into_runner().await?;
        println!("Account address: {}", runner.account());

        runner.remove_delegation().await?;

        println!(
            "{} delegation removed; the account is codeless again",
            style("PASS").green().bold()
        );
        Ok(())
    }
}
