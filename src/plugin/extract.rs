//! Pulls the handler-plugin directive out of the service configuration.
//!
//! [`directive`] follows a fixed order: the namespace entry must exist and
//! be an object, the registry must know the namespace, and `name` must
//! decode into plugin names. The first check that fails says why plugins
//! are disabled for this server.

use std::sync::Arc;

use super::names::PluginNames;
use super::{ExtraConfig, LOG_TARGET, NAMESPACE};
use crate::config::model::ServiceConfig;
use crate::registry::{Namespace, Registry};

/// Everything the chain builder needs.
pub struct Directive<'a> {
    pub extra: &'a ExtraConfig,
    pub plugins: Arc<Namespace>,
    pub names: PluginNames,
}

/// Why no plugin will be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disabled {
    /// The service config has no entry under the namespace.
    NotConfigured,
    /// The entry exists but is not an object.
    WrongShape,
    /// Nothing was ever registered under the namespace.
    NothingRegistered,
    /// `name` is missing or neither a string nor a list.
    NoPlugins,
}

impl Disabled {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotConfigured => "not configured",
            Self::WrongShape => "wrong extra_config type",
            Self::NothingRegistered => "no plugins registered for the module",
            Self::NoPlugins => "no plugins required in the extra config",
        }
    }
}

impl std::fmt::Display for Disabled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the plugin directive for `config` against `registry`.
///
/// Every outcome except [`Disabled::NotConfigured`] is logged at debug
/// level: an absent entry is the normal way of not using plugins.
pub fn directive<'a>(
    registry: &Registry,
    config: &'a ServiceConfig,
) -> Result<Directive<'a>, Disabled> {
    let result = resolve(registry, config);
    if let Err(reason) = result {
        if reason != Disabled::NotConfigured {
            tracing::debug!(target: LOG_TARGET, reason = %reason, "handler plugins disabled");
        }
    }
    result
}

fn resolve<'a>(registry: &Registry, config: &'a ServiceConfig) -> Result<Directive<'a>, Disabled> {
    let raw = config.extra(NAMESPACE).ok_or(Disabled::NotConfigured)?;
    let extra = raw.as_object().ok_or(Disabled::WrongShape)?;
    let plugins = registry
        .namespace(NAMESPACE)
        .ok_or(Disabled::NothingRegistered)?;
    let names = PluginNames::from_extra(extra).ok_or(Disabled::NoPlugins)?;
    Ok(Directive {
        extra,
        plugins,
        names,
    })
}
