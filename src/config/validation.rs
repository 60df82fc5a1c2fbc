//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`ServiceConfig`] for
//! structural errors in the fields plugchain itself owns. Namespaced
//! `extra_config` entries are left alone: plugin configuration problems
//! never stop the server from starting.

use std::net::IpAddr;

use super::model::ServiceConfig;
use crate::error::ValidationError;

/// Validate the listen host. Returns `Ok(())` or a human-readable error.
pub fn validate_host(host: &str) -> Result<(), String> {
    if host.is_empty() {
        return Err("host cannot be empty".into());
    }
    host.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| format!("'{host}' is not a valid IP address"))
}

pub fn validate(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push(ValidationError {
            field: "name".into(),
            message: "service name cannot be empty".into(),
            suggestion: None,
        });
    }

    if let Err(msg) = validate_host(&config.host) {
        errors.push(ValidationError {
            field: "host".into(),
            message: msg,
            suggestion: if config.host == "localhost" {
                Some("did you mean '127.0.0.1'?".into())
            } else {
                Some("use '0.0.0.0' to listen on every interface".into())
            },
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &ServiceConfig) -> String {
    let mut lines = vec![format!(
        "  service '{}' on {}:{}",
        config.name, config.host, config.port
    )];
    if !config.extra_config.is_empty() {
        let namespaces: Vec<&str> = config.extra_config.keys().map(String::as_str).collect();
        lines.push(format!("  extra_config: {}", namespaces.join(", ")));
    }
    format!("{} is valid\n{}", path, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_passes() {
        assert!(validate(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn empty_name_fails() {
        let config = ServiceConfig {
            name: "  ".into(),
            ..ServiceConfig::default()
        };
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn hostname_fails_with_suggestion() {
        let config = ServiceConfig {
            host: "localhost".into(),
            ..ServiceConfig::default()
        };
        let errors = validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.suggestion.as_deref() == Some("did you mean '127.0.0.1'?")));
    }

    #[test]
    fn ipv6_host_passes() {
        assert!(validate_host("::1").is_ok());
    }

    #[test]
    fn malformed_plugin_namespace_is_not_a_validation_error() {
        let config: ServiceConfig = serde_json::from_str(
            r#"{"extra_config": {"plugchain/http/server/handler": "not-an-object"}}"#,
        )
        .unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn report_lists_namespaces() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"name": "edge", "extra_config": {"a": {}, "b": {}}}"#)
                .unwrap();
        let report = format_validation_report("cfg.json", &config);
        assert!(report.starts_with("cfg.json is valid"));
        assert!(report.contains("service 'edge'"));
        assert!(report.contains("extra_config: a, b"));
    }
}
