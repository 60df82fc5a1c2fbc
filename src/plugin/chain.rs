//! Folds the configured plugin factories over the base handler.

use serde::Serialize;

use super::{BoxedFactory, ExtraConfig, LOG_TARGET};
use crate::context::Context;
use crate::error::LookupError;
use crate::handler::Handler;
use crate::registry::Namespace;

/// Find the factory registered as `name`.
pub fn lookup(plugins: &Namespace, name: &str) -> Result<BoxedFactory, LookupError> {
    plugins.get_as::<BoxedFactory>(name)
}

/// Apply every plugin in `names`, in order, around `handler`.
///
/// Each successful factory output becomes the input of the next one, so the
/// first name is the innermost layer and the last name is the one requests
/// reach first. A name that cannot be resolved or whose factory fails leaves
/// the handler exactly as it was.
///
/// Factories get a clone of the current handler. That clone is an
/// `Arc`-level handle copy of the boxed service; no layer is duplicated and
/// the wrapper still owns the only chain built on top of it.
pub fn build<'a, I>(
    plugins: &Namespace,
    ctx: &Context,
    extra: &ExtraConfig,
    names: I,
    handler: Handler,
) -> Handler
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .fold(handler, |current, name| apply(plugins, ctx, extra, name, current))
}

fn apply(
    plugins: &Namespace,
    ctx: &Context,
    extra: &ExtraConfig,
    name: &str,
    current: Handler,
) -> Handler {
    let factory = match lookup(plugins, name) {
        Ok(factory) => factory,
        Err(e) => {
            tracing::error!(target: LOG_TARGET, plugin = %name, error = %e, "plugin not applied");
            return current;
        }
    };

    // The factory gets its own clone so a failure cannot take the chain with it.
    match factory.build(ctx, extra, current.clone()) {
        Ok(wrapped) => {
            tracing::info!(target: LOG_TARGET, plugin = %name, "injecting plugin");
            wrapped
        }
        Err(e) => {
            tracing::error!(
                target: LOG_TARGET,
                plugin = %name,
                error = %e,
                "error getting the plugin handler"
            );
            current
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Resolved,
    Missing,
    WrongType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub name: String,
    pub status: PlanStatus,
}

/// Resolve `names` without invoking any factory.
pub fn plan<'a, I>(plugins: &Namespace, names: I) -> Vec<PlanEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(|name| PlanEntry {
            name: name.to_string(),
            status: match lookup(plugins, name) {
                Ok(_) => PlanStatus::Resolved,
                Err(LookupError::NotFound { .. }) => PlanStatus::Missing,
                Err(LookupError::WrongType { .. }) => PlanStatus::WrongType,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::body::Body;
    use axum::extract::Request;
    use axum::http::HeaderValue;
    use axum::response::Response;
    use tower::ServiceExt;

    use super::*;
    use crate::error::PluginError;
    use crate::handler;
    use crate::plugin::{register, NAMESPACE};
    use crate::registry::Registry;

    fn base() -> Handler {
        handler::boxed(tower::service_fn(|_req: Request| async {
            Ok::<_, Infallible>(Response::new(Body::from("base")))
        }))
    }

    fn tag(
        label: &'static str,
    ) -> impl Fn(&Context, &ExtraConfig, Handler) -> Result<Handler, PluginError> {
        move |_ctx: &Context, _extra: &ExtraConfig, next: Handler| -> Result<Handler, PluginError> {
            Ok(handler::boxed(next.map_response(move |mut resp: Response| {
                let layers = match resp.headers().get("x-layers") {
                    Some(prev) => format!("{},{label}", prev.to_str().unwrap()),
                    None => label.to_string(),
                };
                resp.headers_mut()
                    .insert("x-layers", HeaderValue::from_str(&layers).unwrap());
                resp
            })))
        }
    }

    async fn layers(handler: Handler) -> Option<String> {
        let resp = handler
            .oneshot(Request::new(Body::empty()))
            .await
            .unwrap();
        resp.headers()
            .get("x-layers")
            .map(|v| v.to_str().unwrap().to_string())
    }

    fn namespace(registry: &Registry) -> Arc<Namespace> {
        registry.namespace(NAMESPACE).unwrap()
    }

    #[tokio::test]
    async fn empty_names_return_the_original_handler() {
        let registry = Registry::new();
        register(&registry, "a", tag("a"));

        let chain = build(
            &namespace(&registry),
            &Context::background(),
            &ExtraConfig::new(),
            std::iter::empty(),
            base(),
        );
        assert_eq!(layers(chain).await, None);
    }

    #[tokio::test]
    async fn later_names_wrap_earlier_ones() {
        let registry = Registry::new();
        register(&registry, "a", tag("a"));
        register(&registry, "b", tag("b"));

        let chain = build(
            &namespace(&registry),
            &Context::background(),
            &ExtraConfig::new(),
            ["a", "b"],
            base(),
        );
        assert_eq!(layers(chain).await.as_deref(), Some("a,b"));
    }

    #[tokio::test]
    async fn wrong_type_is_skipped() {
        let registry = Registry::new();
        register(&registry, "a", tag("a"));
        registry.register(NAMESPACE, "bogus", "not a factory".to_string());

        let chain = build(
            &namespace(&registry),
            &Context::background(),
            &ExtraConfig::new(),
            ["bogus", "a"],
            base(),
        );
        assert_eq!(layers(chain).await.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn failing_factory_keeps_previous_handler() {
        let registry = Registry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        register(&registry, "a", tag("a"));
        register(
            &registry,
            "broken",
            move |_ctx: &Context, _extra: &ExtraConfig, _next: Handler| -> Result<Handler, PluginError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(PluginError::Rejected {
                    plugin: "broken",
                    reason: "always".into(),
                })
            },
        );

        let chain = build(
            &namespace(&registry),
            &Context::background(),
            &ExtraConfig::new(),
            ["a", "broken"],
            base(),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(layers(chain).await.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn external_factory_error_is_skipped() {
        let registry = Registry::new();
        register(&registry, "a", tag("a"));
        register(
            &registry,
            "needs-file",
            |_ctx: &Context, _extra: &ExtraConfig, _next: Handler| -> Result<Handler, PluginError> {
                let io = std::io::Error::new(std::io::ErrorKind::NotFound, "plugin.pem missing");
                let err = PluginError::Other(Box::new(io));
                assert_eq!(err.to_string(), "plugin.pem missing");
                Err(err)
            },
        );

        let chain = build(
            &namespace(&registry),
            &Context::background(),
            &ExtraConfig::new(),
            ["needs-file", "a"],
            base(),
        );
        assert_eq!(layers(chain).await.as_deref(), Some("a"));
    }

    #[test]
    fn plan_reports_each_name() {
        let registry = Registry::new();
        register(&registry, "a", tag("a"));
        registry.register(NAMESPACE, "bogus", 1_u8);

        let plan = plan(&namespace(&registry), ["a", "missing", "bogus"]);
        let statuses: Vec<PlanStatus> = plan.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                PlanStatus::Resolved,
                PlanStatus::Missing,
                PlanStatus::WrongType
            ]
        );
        assert_eq!(plan[1].name, "missing");
    }
}
