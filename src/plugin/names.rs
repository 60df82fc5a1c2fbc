//! Normalizes the `name` directive into an ordered list of plugin names.

use serde_json::Value;

use super::{ExtraConfig, LOG_TARGET};

/// The `name` directive, decoded once.
///
/// A lone string is accepted so single-plugin configs need no list syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginNames {
    Single(String),
    Ordered(Vec<String>),
}

impl PluginNames {
    /// Decode `name` from the namespace entry.
    ///
    /// Returns `None` when `name` is absent or is neither a string nor a
    /// list. Non-string list entries are dropped with a debug event; the
    /// remaining names keep their order.
    #[must_use]
    pub fn from_extra(extra: &ExtraConfig) -> Option<Self> {
        match extra.get("name")? {
            Value::String(name) => Some(Self::Single(name.clone())),
            Value::Array(items) => Some(Self::Ordered(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| {
                        let name = item.as_str();
                        if name.is_none() {
                            tracing::debug!(
                                target: LOG_TARGET,
                                index,
                                entry = %item,
                                "skipping non-string plugin name"
                            );
                        }
                        name.map(str::to_owned)
                    })
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Ordered(names) => names,
        };
        names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Ordered(names) => names.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
