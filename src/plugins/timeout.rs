//! `timeout`: answers `408 Request Timeout` when the inner handler is too slow.

use std::time::Duration;

use serde::Deserialize;
use tower_http::timeout::Timeout;

use super::options;
use crate::context::Context;
use crate::error::PluginError;
use crate::handler::{self, Handler};
use crate::plugin::ExtraConfig;

pub const NAME: &str = "timeout";

#[derive(Deserialize)]
struct Options {
    timeout_ms: Option<u64>,
}

pub fn factory(_ctx: &Context, extra: &ExtraConfig, next: Handler) -> Result<Handler, PluginError> {
    let opts: Options = options(NAME, extra)?;
    let timeout_ms = match opts.timeout_ms {
        Some(ms) if ms > 0 => ms,
        _ => {
            return Err(PluginError::Rejected {
                plugin: NAME,
                reason: "timeout_ms must be a positive number of milliseconds".into(),
            })
        }
    };

    #[allow(deprecated)]
    let service = Timeout::new(next, Duration::from_millis(timeout_ms));
    Ok(handler::boxed(service))
}
