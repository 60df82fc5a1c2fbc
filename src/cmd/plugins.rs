//! `plugchain plugins`: list the built-in handler plugins.

use crate::cli::PluginsArgs;
use crate::error::PlugchainError;
use crate::plugin::NAMESPACE;
use crate::plugins::BUILTIN;

pub fn execute(args: &PluginsArgs) -> Result<(), PlugchainError> {
    if args.json {
        println!(
            "{}",
            serde_json::json!({ "namespace": NAMESPACE, "plugins": BUILTIN })
        );
        return Ok(());
    }

    println!("Built-in handler plugins (enable under extra_config.\"{NAMESPACE}\".name):\n");
    for name in BUILTIN {
        println!("  {name}");
    }
    Ok(())
}
