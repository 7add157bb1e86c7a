#![cfg(test)]

use crate::{
    config::{Configuration, WarningLevel},
    convert::F_TEXT_CONVERSIONS,
    error::ScalarError,
    kind::{Kind, KindName},
    value::AnyScalar,
};

use super::{Registry, W_SILENT_FALLBACK};

fn not_comparable() -> ScalarError {
    ScalarError::NotComparable {
        left: KindName::Kind(Kind::Text),
        right: KindName::Empty,
    }
}

#[test]
fn default_registry_sizes() {
    let registry = Registry::new();

    assert_eq!(registry.conversions().len(), 143);
    assert_eq!(registry.comparisons().len(), 122);
    assert_eq!(registry.arithmetic().len(), 121);
}

#[test]
fn configuration_is_applied() {
    let mut config = Configuration::new();
    config.set_bool(F_TEXT_CONVERSIONS, false);

    let registry = Registry::with_config(config);

    assert_eq!(registry.conversions().len(), 121);
    assert_eq!(registry.config().bool(F_TEXT_CONVERSIONS), Some(false));
}

#[test]
fn explicit_registry_reads() {
    let mut config = Configuration::new();
    config.set_bool(F_TEXT_CONVERSIONS, false);
    let registry = Registry::with_config(config);

    let scalar = AnyScalar::new(5i32);

    assert_eq!(scalar.get_converted_in::<f64>(&registry), Ok(5.0));
    assert!(matches!(
        scalar.get_converted_in::<String>(&registry),
        Err(ScalarError::ConversionUnavailable { .. })
    ));
}

#[test]
fn global_registry_is_shared() {
    let first = Registry::global() as *const Registry;
    let second = std::thread::spawn(|| Registry::global() as *const Registry as usize).join();

    assert_eq!(second.ok(), Some(first as usize));
}

#[test]
fn install_after_first_use_fails() {
    let _ = Registry::global();

    assert!(matches!(
        Registry::install(Configuration::new()),
        Err(ScalarError::AlreadyInitialized)
    ));
}

#[test]
fn allowed_fallbacks_are_quiet() {
    let mut config = Configuration::new();
    config.set_warning_level(W_SILENT_FALLBACK, WarningLevel::Allow);

    Registry::with_config(config).report_fallback(&not_comparable());
}

#[test]
fn warned_fallbacks_do_not_panic() {
    Registry::new().report_fallback(&not_comparable());
}

#[test]
#[should_panic(expected = "cannot be compared")]
fn denied_fallbacks_panic() {
    let mut config = Configuration::new();
    config.set_warning_level(W_SILENT_FALLBACK, WarningLevel::Deny);

    Registry::with_config(config).report_fallback(&not_comparable());
}
