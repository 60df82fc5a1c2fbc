//! `access-log`: one span per request, plus request and response events.
//!
//! Backed by `tower-http`'s `TraceLayer`. `access_log_level` picks the
//! level of the span and of the request and response events (default `info`).

use axum::body::Body;
use serde::Deserialize;
use tower::{Layer, ServiceExt};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::options;
use crate::context::Context;
use crate::error::PluginError;
use crate::handler::{self, Handler};
use crate::plugin::ExtraConfig;

pub const NAME: &str = "access-log";

#[derive(Deserialize)]
struct Options {
    access_log_level: Option<String>,
}

pub fn factory(_ctx: &Context, extra: &ExtraConfig, next: Handler) -> Result<Handler, PluginError> {
    let opts: Options = options(NAME, extra)?;
    let level = match opts.access_log_level.as_deref() {
        None => Level::INFO,
        Some(raw) => raw.parse::<Level>().map_err(|_| PluginError::Rejected {
            plugin: NAME,
            reason: format!("'{raw}' is not a log level"),
        })?,
    };

    let traced = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(level))
        .on_request(DefaultOnRequest::new().level(level))
        .on_response(DefaultOnResponse::new().level(level))
        .layer(next)
        .map_response(|resp: http::Response<_>| resp.map(Body::new));
    Ok(handler::boxed(traced))
}
