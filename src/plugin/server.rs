//! The startup stage that wraps the server handler with configured plugins.

use std::sync::Arc;

use async_trait::async_trait;

use super::{chain, extract};
use crate::config::model::ServiceConfig;
use crate::context::Context;
use crate::error::PlugchainError;
use crate::handler::Handler;
use crate::registry::Registry;
use crate::server::RunServer;

/// Composes the handler chain, then delegates to `next`.
pub struct HandlerPlugins<N> {
    registry: Arc<Registry>,
    next: N,
}

/// Put handler plugins from `registry` in front of the `next` stage.
pub fn new<N: RunServer>(registry: Arc<Registry>, next: N) -> HandlerPlugins<N> {
    HandlerPlugins { registry, next }
}

/// Build the handler `config` asks for.
///
/// Returns `handler` untouched when plugins are disabled for this config.
pub fn compose(
    registry: &Registry,
    ctx: &Context,
    config: &ServiceConfig,
    handler: Handler,
) -> Handler {
    match extract::directive(registry, config) {
        Ok(directive) => chain::build(
            &directive.plugins,
            ctx,
            directive.extra,
            directive.names.iter(),
            handler,
        ),
        Err(_) => handler,
    }
}

#[async_trait]
impl<N: RunServer> RunServer for HandlerPlugins<N> {
    async fn run(
        &self,
        ctx: Context,
        config: ServiceConfig,
        handler: Handler,
    ) -> Result<(), PlugchainError> {
        let handler = compose(&self.registry, &ctx, &config, handler);
        self.next.run(ctx, config, handler).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::plugin::NAMESPACE;

    #[tokio::test]
    async fn forwards_continuation_error_verbatim() {
        let stage = new(
            Arc::new(Registry::new()),
            |_ctx: Context, _config: ServiceConfig, _handler: Handler| async {
                Err::<(), _>(PlugchainError::UnsupportedFormat("ini".into()))
            },
        );

        let err = stage
            .run(
                Context::background(),
                ServiceConfig::default(),
                crate::server::base_handler(&ServiceConfig::default()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PlugchainError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[tokio::test]
    async fn continuation_receives_config_unchanged() {
        let seen = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&seen);
        let stage = new(
            Arc::new(Registry::new()),
            move |_ctx: Context, config: ServiceConfig, _handler: Handler| {
                let slot = Arc::clone(&slot);
                async move {
                    *slot.lock().unwrap() = Some(config);
                    Ok::<(), PlugchainError>(())
                }
            },
        );

        let mut config = ServiceConfig::default();
        config
            .extra_config
            .insert(NAMESPACE.into(), json!({"name": "missing"}));

        stage
            .run(
                Context::background(),
                config.clone(),
                crate::server::base_handler(&config),
            )
            .await
            .unwrap();
        assert_eq!(seen.lock().unwrap().as_ref(), Some(&config));
    }
}
