//! 配置与注册表构造的集成测试

use lazy_registry::{Catalog, Config, ConfigError, Registry, TypeDescriptor};
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Write;

struct Mailer;

fn catalog() -> Catalog {
    Catalog::new()
        .with(TypeDescriptor::class("app::Mailer").operation("make", |_| Ok(Mailer)))
        .with(TypeDescriptor::interface("app::Notifier").constant("IMPLEMENTED_BY", "app::Mailer"))
}

#[test]
fn test_plain_sequence_is_rejected() {
    let mut config = Config::new();
    let err = config.add_aliases(["x", "y"]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAliases(_)));
    assert!(err.to_string().contains("associative"));
}

#[test]
fn test_added_aliases_are_visible() {
    let mut config = Config::new();
    config.add_aliases(json!({"k": "v"})).unwrap();

    let expected = BTreeMap::from([("k".to_string(), "v".to_string())]);
    assert_eq!(config.aliases(), &expected);
}

#[test]
fn test_set_aliases_fully_replaces() {
    let mut config = Config::new();
    config
        .add_aliases(json!({"A": "B", "C": "D"}))
        .unwrap()
        .set_aliases(json!({"E": "F"}))
        .unwrap();

    assert_eq!(config.aliases().keys().collect::<Vec<_>>(), vec!["E"]);
}

#[test]
fn test_registry_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
factory_method = "make"
binding_const = "IMPLEMENTED_BY"

[aliases]
notifier = "app::Notifier"
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    let mut registry = Registry::with_config(catalog(), &config);

    assert_eq!(registry.factory_method(), "make");
    assert_eq!(registry.binding_const(), "IMPLEMENTED_BY");

    let via_alias = registry.resolve_as::<Mailer>("notifier").unwrap();
    let direct = registry.resolve_as::<Mailer>("app::Mailer").unwrap();
    assert!(std::sync::Arc::ptr_eq(&via_alias, &direct));
    assert_eq!(registry.stats().instances_created, 1);
    assert_eq!(registry.stats().aliases_consumed, 1);
    assert_eq!(registry.stats().bindings_followed, 1);
}

#[test]
fn test_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "aliases = [\"x\", \"y\"]").unwrap();

    match Config::load(file.path()) {
        Err(ConfigError::TomlParse(origin, _)) => {
            assert_eq!(origin, file.path().display().to_string());
        }
        other => panic!("expected TomlParse, got {:?}", other),
    }
}
