//! Handler plugins: configuration-driven wrapping of the server handler.
//!
//! A service opts in by adding an entry under [`NAMESPACE`] to its
//! `extra_config`:
//!
//! ```json
//! {
//!   "extra_config": {
//!     "plugchain/http/server/handler": {
//!       "name": ["correlation-id", "response-headers"],
//!       "response_headers": { "x-served-by": "plugchain" }
//!     }
//!   }
//! }
//! ```
//!
//! `name` is either one plugin name or an ordered list. Each name is looked
//! up in the [`Registry`] under [`NAMESPACE`] and its [`HandlerFactory`] is
//! asked to wrap the current handler. The first name ends up innermost, the
//! last one outermost. Sibling keys next to `name` are handed to every
//! factory untouched, so plugins can read their own options from them.
//!
//! Nothing in here is fatal. A missing plugin, a value registered with the
//! wrong type, or a factory that fails is logged and skipped; the server
//! always starts with the best handler that could be built.
//!
//! - [`extract`] -- pulls the namespace entry out of the service config.
//! - [`names`] -- normalizes `name` into an ordered list.
//! - [`chain`] -- folds the factories over the handler.
//! - [`server`] -- the [`RunServer`](crate::server::RunServer) stage that
//!   composes the chain before handing it to the next stage.

pub mod chain;
pub mod extract;
pub mod names;
pub mod server;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::context::Context;
use crate::error::PluginError;
use crate::handler::Handler;
use crate::registry::Registry;

/// Configuration key, and registry namespace, for handler plugins.
pub const NAMESPACE: &str = "plugchain/http/server/handler";

/// `tracing` target for every event this subsystem emits.
pub const LOG_TARGET: &str = "plugin_server";

/// The namespace entry of `extra_config`, handed to every factory.
pub type ExtraConfig = Map<String, Value>;

/// Builds a wrapping handler around `next`.
///
/// Implemented for every `Fn(&Context, &ExtraConfig, Handler) ->
/// Result<Handler, PluginError>`, so plain functions and closures can be
/// registered directly.
pub trait HandlerFactory: Send + Sync {
    fn build(
        &self,
        ctx: &Context,
        extra: &ExtraConfig,
        next: Handler,
    ) -> Result<Handler, PluginError>;
}

impl<F> HandlerFactory for F
where
    F: Fn(&Context, &ExtraConfig, Handler) -> Result<Handler, PluginError> + Send + Sync,
{
    fn build(
        &self,
        ctx: &Context,
        extra: &ExtraConfig,
        next: Handler,
    ) -> Result<Handler, PluginError> {
        self(ctx, extra, next)
    }
}

/// The value type stored in the registry under [`NAMESPACE`].
pub type BoxedFactory = Arc<dyn HandlerFactory>;

/// Register `factory` as the handler plugin called `name`.
pub fn register<F>(registry: &Registry, name: &str, factory: F)
where
    F: HandlerFactory + 'static,
{
    let factory: BoxedFactory = Arc::new(factory);
    registry.register(NAMESPACE, name, factory);
}
