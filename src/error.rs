//! Unified error types for plugchain.
//!
//! Defines [`PlugchainError`] (the main crate error enum),
//! [`ValidationError`] for config validation failures, [`PluginError`]
//! for plugin factories that refuse to build, and [`LookupError`] for
//! registry lookups. All use `thiserror` for `Display` and `Error`
//! derives. Error messages include contextual hints to guide the user
//! toward a fix.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlugchainError {
    #[error("No config source found.\n\n  {hint}")]
    NoConfigSource { hint: String },

    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Unresolved plugins: {}", names.join(", "))]
    UnresolvedPlugins { names: Vec<String> },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a plugin factory.
///
/// Never fatal: the chain builder logs it and keeps the handler it had
/// before the attempt.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PluginError {
    #[error("invalid options for plugin '{plugin}': {source}")]
    Options {
        plugin: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header '{header}' for plugin '{plugin}'")]
    InvalidHeader {
        plugin: &'static str,
        header: String,
    },

    #[error("plugin '{plugin}' rejected its options: {reason}")]
    Rejected {
        plugin: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no plugin registered as '{name}'")]
    NotFound { name: String },

    #[error("wrong plugin handler type: '{name}'")]
    WrongType { name: String },
}
