//! `body-limit`: rejects request bodies larger than `max_body_bytes` with `413`.

use axum::body::Body;
use serde::Deserialize;
use tower::{Layer, ServiceExt};
use tower_http::body::Limited;
use tower_http::limit::RequestBodyLimitLayer;

use super::options;
use crate::context::Context;
use crate::error::PluginError;
use crate::handler::{self, Handler};
use crate::plugin::ExtraConfig;

pub const NAME: &str = "body-limit";

#[derive(Deserialize)]
struct Options {
    max_body_bytes: Option<usize>,
}

pub fn factory(_ctx: &Context, extra: &ExtraConfig, next: Handler) -> Result<Handler, PluginError> {
    let opts: Options = options(NAME, extra)?;
    let Some(limit) = opts.max_body_bytes else {
        return Err(PluginError::Rejected {
            plugin: NAME,
            reason: "max_body_bytes is required".into(),
        });
    };

    // The limit layer hands the inner service a `Limited` body and wraps the
    // response body; both are erased back to `Body` so the chain keeps one type.
    let inner = next.map_request(|req: http::Request<Limited<Body>>| req.map(Body::new));
    let limited = RequestBodyLimitLayer::new(limit)
        .layer(inner)
        .map_response(|resp: http::Response<_>| resp.map(Body::new));
    Ok(handler::boxed(limited))
}
