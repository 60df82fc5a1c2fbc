//! The type-erased request handler that plugins wrap.
//!
//! Every layer of the chain is a [`Handler`]: a cloneable, boxed tower
//! service speaking axum's request and response types. Plugins receive
//! one, wrap it, and return a new one.

use std::convert::Infallible;

use axum::extract::Request;
use axum::response::Response;
use tower::util::BoxCloneSyncService;
use tower::Service;

pub type Handler = BoxCloneSyncService<Request, Response, Infallible>;

/// Erase a concrete service into a [`Handler`].
pub fn boxed<S>(service: S) -> Handler
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    BoxCloneSyncService::new(service)
}
