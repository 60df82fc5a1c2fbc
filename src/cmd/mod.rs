//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`validate`], or [`plugins`].
//! Each handler lives in its own submodule.

pub mod plugins;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::PlugchainError;

pub async fn dispatch(cli: Cli) -> Result<(), PlugchainError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Plugins(ref args)) => plugins::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  plugchain v{version}: HTTP server with a plugin-composed handler chain\n\n  \
         No command provided. To get started:\n\n    \
         plugchain run                     Start the server (auto-detects ./plugchain.yaml)\n    \
         plugchain run -c service.json     Start with a specific config file\n    \
         plugchain plugins                 List the built-in handler plugins\n    \
         plugchain --help                  See all commands and options\n"
    );
}
