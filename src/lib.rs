//! Plugchain is an HTTP server whose request handler is composed from
//! named plugins at startup.
//!
//! Plugin factories register themselves in a process-wide [`registry`].
//! The service configuration names which ones to apply, in order, under
//! the [`plugin::NAMESPACE`] key of its `extra_config`. At startup the
//! handler plugin stage wraps the base handler with each resolvable
//! plugin and hands the result to the HTTP listener. Problems with
//! individual plugins are logged and skipped; they never stop the server.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, validate, plugins).
//! - [`config`] -- Configuration loading and validation via the
//!   [`ConfigSource`](config::ConfigSource) trait.
//! - [`context`] -- Cancellation context threaded through startup.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`handler`] -- The boxed request handler type plugins wrap.
//! - [`health`] -- `GET /health` endpoint handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`plugin`] -- Directive extraction, chain construction, and the
//!   startup stage that applies it.
//! - [`plugins`] -- Built-in handler plugins.
//! - [`registry`] -- Namespaced, type-erased registry of named values.
//! - [`server`] -- Startup stages, the base router, and graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support _(enabled by default)_ |
//! | `toml` | TOML config file support |

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod health;
pub mod logging;
pub mod plugin;
pub mod plugins;
pub mod registry;
pub mod server;
