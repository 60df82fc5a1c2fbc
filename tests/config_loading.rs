//! Integration tests for config loading across all file formats.

use plugchain::cmd::validate::{plugin_report, PluginReport};
use plugchain::config::sources::parse_config_str;
use plugchain::config::validation::validate;
use plugchain::plugin::chain::PlanStatus;
use plugchain::plugin::NAMESPACE;

fn load_example(name: &str) -> String {
    let path = format!("example/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

fn chain_names(report: &PluginReport) -> Vec<String> {
    match report {
        PluginReport::Chain(entries) => {
            assert!(entries.iter().all(|e| e.status == PlanStatus::Resolved));
            entries.iter().map(|e| e.name.clone()).collect()
        }
        PluginReport::Disabled(reason) => panic!("plugins disabled: {reason}"),
    }
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_example_loads_and_validates() {
    let content = load_example("plugchain.yaml");
    let config = parse_config_str("yaml", &content, "plugchain.yaml").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.name, "orders-api");
    assert!(config.extra(NAMESPACE).is_some());
    assert_eq!(
        chain_names(&plugin_report(&config)),
        vec![
            "body-limit",
            "timeout",
            "response-headers",
            "correlation-id",
            "access-log"
        ]
    );
}

#[cfg(feature = "json")]
#[test]
fn json_example_loads_and_validates() {
    let content = load_example("plugchain.json");
    let config = parse_config_str("json", &content, "plugchain.json").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(chain_names(&plugin_report(&config)), vec!["response-headers"]);
}

#[cfg(feature = "toml")]
#[test]
fn toml_example_loads_and_validates() {
    let content = load_example("plugchain.toml");
    let config = parse_config_str("toml", &content, "plugchain.toml").unwrap();
    validate(&config).unwrap();
    assert_eq!(
        chain_names(&plugin_report(&config)),
        vec!["timeout", "access-log"]
    );
}

#[cfg(feature = "json")]
#[test]
fn unknown_top_level_field_is_a_parse_error() {
    let err = parse_config_str("json", r#"{"name": "x", "routes": []}"#, "bad.json").unwrap_err();
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn unsupported_extension_is_rejected() {
    assert!(parse_config_str("ini", "", "service.ini").is_err());
}
