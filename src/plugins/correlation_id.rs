//! `correlation-id`: tags every request with an id and echoes it back.
//!
//! An id sent by the client is kept; otherwise a UUID v4 is generated.
//! The id is set on the request before the inner handler runs, so later
//! layers and the base handler see it too.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::response::Response;
use serde::Deserialize;
use tower::Service;

use super::options;
use crate::context::Context;
use crate::error::PluginError;
use crate::handler::{self, Handler};
use crate::plugin::ExtraConfig;

pub const NAME: &str = "correlation-id";

fn default_header() -> String {
    "x-correlation-id".to_string()
}

#[derive(Deserialize)]
struct Options {
    #[serde(default = "default_header")]
    correlation_header: String,
}

pub fn factory(_ctx: &Context, extra: &ExtraConfig, next: Handler) -> Result<Handler, PluginError> {
    let opts: Options = options(NAME, extra)?;
    let header =
        HeaderName::try_from(opts.correlation_header.as_str()).map_err(|_| {
            PluginError::InvalidHeader {
                plugin: NAME,
                header: opts.correlation_header.clone(),
            }
        })?;
    Ok(handler::boxed(CorrelationId {
        inner: next,
        header,
    }))
}

#[derive(Clone)]
struct CorrelationId {
    inner: Handler,
    header: HeaderName,
}

impl Service<Request> for CorrelationId {
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let id = req
            .headers()
            .get(&self.header)
            .cloned()
            .or_else(|| HeaderValue::try_from(uuid::Uuid::new_v4().to_string()).ok());
        if let Some(ref id) = id {
            req.headers_mut().insert(self.header.clone(), id.clone());
        }

        // Take the instance that was driven to readiness; leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let header = self.header.clone();
        Box::pin(async move {
            let mut resp = inner.call(req).await?;
            if let Some(id) = id {
                resp.headers_mut().insert(header, id);
            }
            Ok::<_, Infallible>(resp)
        })
    }
}
