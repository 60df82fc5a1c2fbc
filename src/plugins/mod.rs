//! Handler plugins shipped with plugchain.
//!
//! Each plugin is a plain factory function registered under its name by
//! [`register_builtin`]. Options are read from the keys next to `name` in
//! the plugin namespace entry; keys a plugin does not know are ignored, so
//! several plugins can share one entry.
//!
//! | Plugin | Options | Behaviour |
//! |--------|---------|-----------|
//! | `access-log` | -- | request/response spans via `tower-http` |
//! | `body-limit` | `max_body_bytes` | rejects larger bodies with `413` |
//! | `correlation-id` | `correlation_header` | propagates or generates a request id |
//! | `response-headers` | `response_headers` | sets fixed headers on every response |
//! | `timeout` | `timeout_ms` | answers `408` when the inner handler is too slow |

pub mod access_log;
pub mod body_limit;
pub mod correlation_id;
pub mod response_headers;
pub mod timeout;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PluginError;
use crate::plugin::{self, ExtraConfig};
use crate::registry::Registry;

/// Names of the built-in plugins, sorted.
pub const BUILTIN: &[&str] = &[
    access_log::NAME,
    body_limit::NAME,
    correlation_id::NAME,
    response_headers::NAME,
    timeout::NAME,
];

/// Register every built-in plugin in `registry`.
pub fn register_builtin(registry: &Registry) {
    plugin::register(registry, access_log::NAME, access_log::factory);
    plugin::register(registry, body_limit::NAME, body_limit::factory);
    plugin::register(registry, correlation_id::NAME, correlation_id::factory);
    plugin::register(registry, response_headers::NAME, response_headers::factory);
    plugin::register(registry, timeout::NAME, timeout::factory);
}

/// Deserialize a plugin's options from the shared namespace entry.
fn options<T: DeserializeOwned>(plugin: &'static str, extra: &ExtraConfig) -> Result<T, PluginError> {
    serde_json::from_value(Value::Object(extra.clone()))
        .map_err(|source| PluginError::Options { plugin, source })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::convert::Infallible;

    use axum::body::Body;
    use axum::extract::Request;
    use axum::response::Response;
    use serde_json::Value;

    use crate::handler::{self, Handler};
    use crate::plugin::ExtraConfig;

    pub fn ok_handler() -> Handler {
        handler::boxed(tower::service_fn(|_req: Request| async {
            Ok::<_, Infallible>(Response::new(Body::from("ok")))
        }))
    }

    pub fn extra(value: Value) -> ExtraConfig {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }
}
