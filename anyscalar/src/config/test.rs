#![cfg(test)]

use crate::{convert::F_TEXT_CONVERSIONS, registry::W_SILENT_FALLBACK};

use super::{ConfigError, Configuration, ConfigurationCategory, Flag, WarningLevel};

#[test]
fn defaults() {
    let config = Configuration::new();

    assert_eq!(config.bool(F_TEXT_CONVERSIONS), Some(true));
    assert_eq!(config.warning_level(W_SILENT_FALLBACK), Some(WarningLevel::Warn));

    // wrong type of getter
    assert_eq!(config.warning_level(F_TEXT_CONVERSIONS), None);
    assert_eq!(config.bool(W_SILENT_FALLBACK), None);
}

#[test]
fn setters_map_between_types() {
    let mut config = Configuration::new();

    config.set_bool(W_SILENT_FALLBACK, false);
    assert_eq!(config.warning_level(W_SILENT_FALLBACK), Some(WarningLevel::Allow));

    config.set_bool(W_SILENT_FALLBACK, true);
    assert_eq!(config.warning_level(W_SILENT_FALLBACK), Some(WarningLevel::Warn));

    config.set_warning_level(F_TEXT_CONVERSIONS, WarningLevel::Deny);
    assert_eq!(config.bool(F_TEXT_CONVERSIONS), Some(false));

    config.set_warning_level(F_TEXT_CONVERSIONS, WarningLevel::Allow);
    assert_eq!(config.bool(F_TEXT_CONVERSIONS), Some(true));
}

#[test]
fn lookup_by_name() {
    let config = Configuration::new();

    assert_eq!(
        config.lookup(ConfigurationCategory::Registry, "text_conversions"),
        Some(F_TEXT_CONVERSIONS)
    );
    assert_eq!(
        config.lookup(ConfigurationCategory::Warning, "silent_fallback"),
        Some(W_SILENT_FALLBACK)
    );
    assert_eq!(config.lookup(ConfigurationCategory::Warning, "text_conversions"), None);
}

#[test]
fn iter_lists_known_and_set_flags() {
    static F_EXTRA: Flag = Flag::new(ConfigurationCategory::Registry, "extra").bool(false);

    let mut config = Configuration::new();
    assert_eq!(config.iter().count(), 2);

    config.set_bool(F_TEXT_CONVERSIONS, false);
    assert_eq!(config.iter().count(), 2);

    config.set_bool(F_EXTRA, true);
    assert_eq!(config.iter().count(), 3);
    assert_eq!(config.lookup(ConfigurationCategory::Registry, "extra"), Some(F_EXTRA));
}

#[test]
fn set_from_text() {
    let mut config = Configuration::new();

    assert_eq!(config.set_from_str(W_SILENT_FALLBACK, "Deny"), Ok(()));
    assert_eq!(config.warning_level(W_SILENT_FALLBACK), Some(WarningLevel::Deny));

    assert_eq!(config.set_from_str(F_TEXT_CONVERSIONS, " false "), Ok(()));
    assert_eq!(config.bool(F_TEXT_CONVERSIONS), Some(false));

    assert_eq!(
        config.set_from_str(F_TEXT_CONVERSIONS, "maybe"),
        Err(ConfigError::InvalidValue {
            name: "text_conversions",
            value: "maybe".to_string(),
            expected: "`true` or `false`",
        })
    );
}

#[test]
fn set_option_by_name() {
    let mut config = Configuration::new();

    assert_eq!(config.set_option("warning:silent_fallback", "allow"), Ok(()));
    assert_eq!(config.warning_level(W_SILENT_FALLBACK), Some(WarningLevel::Allow));

    assert_eq!(
        config.set_option("registry:unknown", "true"),
        Err(ConfigError::UnknownFlag {
            name: "registry:unknown".to_string()
        })
    );
    assert!(matches!(
        config.set_option("silent_fallback", "allow"),
        Err(ConfigError::UnknownFlag { .. })
    ));
}

#[test]
fn flag_accessors() {
    assert_eq!(W_SILENT_FALLBACK.name(), "silent_fallback");
    assert_eq!(W_SILENT_FALLBACK.category(), ConfigurationCategory::Warning);
    assert!(!F_TEXT_CONVERSIONS.help_text().is_empty());
    assert_eq!(WarningLevel::Deny.to_string(), "deny");
}
