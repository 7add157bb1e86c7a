//! The global registry can only be installed once per process, so this file
//! holds a single test.

use std::panic;

use anyhow::Result;
use pretty_assertions::assert_eq;

use anyscalar::{
    config::{Configuration, WarningLevel},
    convert::F_TEXT_CONVERSIONS,
    registry::W_SILENT_FALLBACK,
    AnyScalar, Registry, ScalarError,
};

#[derive(Debug, Clone)]
struct Opaque;

#[test]
fn install_strict_registry() -> Result<()> {
    let mut config = Configuration::new();
    config.set_option("warning:silent_fallback", "deny")?;
    config.set_bool(F_TEXT_CONVERSIONS, false);

    let registry = Registry::install(config.clone())?;
    assert_eq!(registry.config(), &config);
    assert_eq!(
        Registry::global().config().warning_level(W_SILENT_FALLBACK),
        Some(WarningLevel::Deny)
    );

    let second = Registry::install(Configuration::new());
    assert!(matches!(second, Err(ScalarError::AlreadyInitialized)));

    // numeric conversions are still registered
    assert_eq!(AnyScalar::new(7u8).get_converted::<i64>()?, 7);
    assert!(matches!(
        AnyScalar::new(7u8).get_converted::<String>(),
        Err(ScalarError::ConversionUnavailable { .. })
    ));

    let incomparable = panic::catch_unwind(|| AnyScalar::new(1i32) == AnyScalar::custom(Opaque));
    assert!(incomparable.is_err());

    let unsupported = panic::catch_unwind(|| AnyScalar::from("a") + AnyScalar::new(1i32));
    assert!(unsupported.is_err());

    // explicit forms report errors instead of panicking
    assert!(AnyScalar::new(1i32)
        .try_compare(&AnyScalar::custom(Opaque))
        .is_err());

    Ok(())
}
