//! `plugchain run`: start the server.
//!
//! Loads the config file, registers the built-in plugins, and runs the
//! startup pipeline: handler plugins first, then the HTTP listener.
//! SIGTERM / Ctrl+C cancel the root context, which drains the server.

use std::path::{Path, PathBuf};

use crate::cli::RunArgs;
use crate::config::sources;
use crate::config::ConfigSource;
use crate::context::Context;
use crate::error::PlugchainError;
use crate::logging;
use crate::plugin;
use crate::plugins;
use crate::registry::Registry;
use crate::server::{self, HttpServer, RunServer};

pub async fn execute(args: RunArgs) -> Result<(), PlugchainError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let source = resolve_file_source(args.config.as_deref())
        .await?
        .ok_or_else(|| PlugchainError::NoConfigSource {
            hint: "Provide --config <file> or put a plugchain.yaml in the working directory."
                .into(),
        })?;
    let (mut config, version) = source.load().await?;

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    tracing::info!(
        source = source.name(),
        version = version.short(),
        service = %config.name,
        "configuration loaded"
    );

    let registry = Registry::global();
    plugins::register_builtin(&registry);

    let (ctx, cancel) = Context::with_cancel();
    tokio::spawn(async move {
        server::shutdown_signal().await;
        cancel.cancel();
    });

    let handler = server::base_handler(&config);
    plugin::server::new(registry, HttpServer)
        .run(ctx, config, handler)
        .await
}

async fn resolve_file_source(
    explicit: Option<&Path>,
) -> Result<Option<Box<dyn ConfigSource>>, PlugchainError> {
    if let Some(path) = explicit {
        return create_file_source(path).map(Some);
    }

    // Auto-detect in current directory
    let candidates = [
        "plugchain.yaml",
        "plugchain.yml",
        "plugchain.json",
        "plugchain.toml",
    ];

    for name in &candidates {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return create_file_source(&path).map(Some);
        }
    }

    Ok(None)
}

fn create_file_source(path: &Path) -> Result<Box<dyn ConfigSource>, PlugchainError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(sources::yaml::new(path.to_path_buf()))),

        #[cfg(feature = "json")]
        "json" => Ok(Box::new(sources::json::new(path.to_path_buf()))),

        #[cfg(feature = "toml")]
        "toml" => Ok(Box::new(sources::toml_source::new(path.to_path_buf()))),

        other => Err(PlugchainError::UnsupportedFormat(other.to_string())),
    }
}
