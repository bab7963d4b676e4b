use clap::Subcommand;

mod permanent;
mod probe;
mod remove;
mod single_tx;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Install permanent delegation and prove it persists")]
    DelegatePermanent(permanent::DelegatePermanentCommand),
    #[command(about = "Delegate and execute a call within a single transaction")]
    DelegateSingleTx(single_tx::DelegateSingleTxCommand),
    #[command(about = "Install-then-revoke probe of the sender identity seen by delegated code")]
    ProbeSender(probe::ProbeSenderCommand),
    #[command(about = "Remove an existing delegation")]
    RemoveDelegation(remove::RemoveDelegationCommand),
}

impl Commands {
    pub async fn run(self) -> anyhow::Result<()> {
        match self {
            Commands::DelegatePermanent(cmd) => cmd.run().await,
            Commands::DelegateSingleTx(cmd) => cmd.run().await,
            Commands::ProbeSender(cmd) => cmd.run().await,
            Commands::RemoveDelegation(cmd) => cmd.run().await,
        }
    }
}
