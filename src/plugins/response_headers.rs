//! `response-headers`: sets fixed headers on every response.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;
use serde::Deserialize;
use tower::ServiceExt;

use super::options;
use crate::context::Context;
use crate::error::PluginError;
use crate::handler::{self, Handler};
use crate::plugin::ExtraConfig;

pub const NAME: &str = "response-headers";

#[derive(Deserialize)]
struct Options {
    #[serde(default)]
    response_headers: BTreeMap<String, String>,
}

pub fn factory(_ctx: &Context, extra: &ExtraConfig, next: Handler) -> Result<Handler, PluginError> {
    let opts: Options = options(NAME, extra)?;
    if opts.response_headers.is_empty() {
        return Err(PluginError::Rejected {
            plugin: NAME,
            reason: "response_headers is empty".into(),
        });
    }

    let mut headers = HeaderMap::with_capacity(opts.response_headers.len());
    for (name, value) in &opts.response_headers {
        let invalid = || PluginError::InvalidHeader {
            plugin: NAME,
            header: name.clone(),
        };
        let name = HeaderName::try_from(name.as_str()).map_err(|_| invalid())?;
        let value = HeaderValue::try_from(value.as_str()).map_err(|_| invalid())?;
        headers.insert(name, value);
    }
    let headers = Arc::new(headers);

    Ok(handler::boxed(next.map_response(move |mut resp: Response| {
        for (name, value) in headers.iter() {
            resp.headers_mut().insert(name.clone(), value.clone());
        }
        resp
    })))
}
