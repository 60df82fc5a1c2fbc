//! `plugchain validate`: check a configuration file without starting.
//!
//! Parses and validates the config file, then resolves the configured
//! handler plugins against the built-in set so typos show up before
//! deployment. Reports in human-readable text or machine-readable JSON.

use serde_json::json;

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::model::ServiceConfig;
use crate::config::sources::parse_config_str;
use crate::config::validation;
use crate::error::PlugchainError;
use crate::plugin::chain::{self, PlanEntry, PlanStatus};
use crate::plugin::extract;
use crate::plugins;
use crate::registry::Registry;

/// What the handler plugin stage would do with a config.
#[derive(Debug, PartialEq, Eq)]
pub enum PluginReport {
    Disabled(extract::Disabled),
    Chain(Vec<PlanEntry>),
}

impl PluginReport {
    /// Names in the chain that would be skipped at startup.
    #[must_use]
    pub fn unresolved(&self) -> Vec<String> {
        match self {
            Self::Disabled(_) => Vec::new(),
            Self::Chain(entries) => entries
                .iter()
                .filter(|e| e.status != PlanStatus::Resolved)
                .map(|e| e.name.clone())
                .collect(),
        }
    }
}

/// Plan the plugin chain for `config` against the built-in plugins.
#[must_use]
pub fn plugin_report(config: &ServiceConfig) -> PluginReport {
    let registry = Registry::new();
    plugins::register_builtin(&registry);
    match extract::directive(&registry, config) {
        Ok(directive) => PluginReport::Chain(chain::plan(&directive.plugins, directive.names.iter())),
        Err(reason) => PluginReport::Disabled(reason),
    }
}

pub fn execute(args: &ValidateArgs) -> Result<(), PlugchainError> {
    let path = &args.config;

    if !path.exists() {
        return Err(PlugchainError::ConfigFileNotFound { path: path.clone() });
    }

    let content = std::fs::read_to_string(path)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = parse_config_str(ext, &content, &path.display().to_string())?;

    if let Err(errors) = validation::validate(&config) {
        match args.format {
            ValidateFormat::Text => {
                eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                for error in &errors {
                    eprintln!("{error}");
                }
            }
            ValidateFormat::Json => {
                let json_errors: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        json!({
                            "field": e.field,
                            "message": e.message,
                            "suggestion": e.suggestion,
                        })
                    })
                    .collect();
                println!("{}", json!({ "valid": false, "errors": json_errors }));
            }
        }
        return Err(PlugchainError::ConfigValidation { errors });
    }

    let report = plugin_report(&config);

    match args.format {
        ValidateFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&path.display().to_string(), &config)
            );
            print_plugin_report(&report);
        }
        ValidateFormat::Json => {
            let plugins = match &report {
                PluginReport::Disabled(reason) => json!({
                    "enabled": false,
                    "reason": reason.as_str(),
                }),
                PluginReport::Chain(entries) => json!({
                    "enabled": true,
                    "chain": entries,
                }),
            };
            println!(
                "{}",
                json!({
                    "valid": true,
                    "service": config.name,
                    "listen": format!("{}:{}", config.host, config.port),
                    "plugins": plugins,
                })
            );
        }
    }

    let unresolved = report.unresolved();
    if args.strict && !unresolved.is_empty() {
        return Err(PlugchainError::UnresolvedPlugins { names: unresolved });
    }

    Ok(())
}

fn print_plugin_report(report: &PluginReport) {
    match report {
        PluginReport::Disabled(reason) => println!("  plugins: disabled ({reason})"),
        PluginReport::Chain(entries) => {
            println!("  plugins (outermost last):");
            for entry in entries {
                let mark = match entry.status {
                    PlanStatus::Resolved => "\u{2713}",
                    PlanStatus::Missing => "\u{2717} not found, will be skipped",
                    PlanStatus::WrongType => "\u{2717} not a handler factory, will be skipped",
                };
                println!("    {} {mark}", entry.name);
            }
        }
    }
}
