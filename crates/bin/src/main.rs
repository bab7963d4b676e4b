//! EOA Delegation Verifier

#[macro_use]
extern crate edv_helpers;

use clap::Parser;
use console::style;

mod commands;
mod contracts;
mod helpers;

#[derive(Debug, Parser)]
#[command(version, about = "EOA Delegation Verifier")]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

fn main() {
    // Install the tracing subscriber that will listen for events and filters. We try to use the
    // `RUST_LOG` environment variable and default to RUST_LOG=info if unset.
    #[cfg(feature = "dev")]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    #[cfg(feature = "dev")]
    std::panic::set_hook(Box::new(|info| {
        if std::env::var_os("RUST_BACKTRACE").is_some() {
            dev_error!("panic happens: {info}");
            let bt = std::backtrace::Backtrace::force_capture();
            dev_error!("backtrace:\n{bt}");
        }
    }));

    let cli = Cli::parse();
    if let Err(err) = helpers::run_async(cli.command.run()) {
        eprintln!("{} {err:#}", style("FAIL").red().bold());
        std::process::exit(1);
    }
}
