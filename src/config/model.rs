//! Serde data structures for the plugchain configuration file.
//!
//! [`ServiceConfig`] is the root: where to listen, what to call the
//! service, and a free-form `extra_config` map keyed by namespace. Each
//! subsystem reads its own namespace; nothing here interprets the values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_name() -> String {
    "plugchain".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_config: BTreeMap<String, Value>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            host: default_host(),
            port: default_port(),
            extra_config: BTreeMap::new(),
        }
    }
}

impl ServiceConfig {
    /// Raw extra configuration registered under `namespace`, if any.
    #[must_use]
    pub fn extra(&self, namespace: &str) -> Option<&Value> {
        self.extra_config.get(namespace)
    }
}
