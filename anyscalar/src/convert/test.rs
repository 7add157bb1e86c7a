#![cfg(test)]

use crate::{
    config::Configuration,
    error::{ParseError, ScalarError},
    kind::{Kind, KindName},
    numerics::LongDouble,
    value::{AnyScalar, ScalarContents},
};

use super::{ConversionRegistry, F_TEXT_CONVERSIONS};

fn registry() -> ConversionRegistry {
    ConversionRegistry::new(&Configuration::new())
}

#[test]
fn registry_size() {
    let registry = registry();
    assert_eq!(registry.len(), 11 * 11 + 2 * 11);

    let mut config = Configuration::new();
    config.set_bool(F_TEXT_CONVERSIONS, false);
    assert_eq!(ConversionRegistry::new(&config).len(), 11 * 11);
}

#[test]
fn every_numeric_pair_is_registered() {
    let registry = registry();

    for from in Kind::numeric() {
        for to in Kind::numeric() {
            assert!(registry.find(from.id(), to.id()).is_some(), "{} -> {}", from, to);
        }

        assert!(registry.find(from.id(), Kind::Text.id()).is_some());
        assert!(registry.find(Kind::Text.id(), from.id()).is_some());
    }

    assert!(registry.find(Kind::Text.id(), Kind::Text.id()).is_none());
}

#[test]
fn numeric_conversions() {
    let registry = registry();

    let converted = registry.convert(&AnyScalar::new(-1i32), Kind::U16);
    assert_eq!(converted.and_then(|val| val.get_exact::<u16>()), Ok(u16::MAX));

    let converted = registry.convert(&AnyScalar::new(7u64), Kind::LongDouble);
    assert_eq!(
        converted.and_then(|val| val.get_exact::<LongDouble>()),
        Ok(LongDouble(7.0))
    );

    let converted = registry.convert(&AnyScalar::new(f32::MAX), Kind::I8);
    assert_eq!(converted.and_then(|val| val.get_exact::<i8>()), Ok(i8::MAX));
}

#[test]
fn same_kind_is_copied() {
    let registry = registry();

    let converted = registry.convert(&AnyScalar::from("same"), Kind::Text);
    assert_eq!(
        converted.and_then(|val| val.get_exact::<String>()),
        Ok("same".to_string())
    );
}

#[test]
fn numbers_to_text() {
    let registry = registry();

    let text = |val: AnyScalar| {
        registry
            .convert(&val, Kind::Text)
            .and_then(|val| val.get_exact::<String>())
    };

    assert_eq!(text(AnyScalar::new(42i32)), Ok("42".to_string()));
    assert_eq!(text(AnyScalar::new(-128i8)), Ok("-128".to_string()));
    assert_eq!(text(AnyScalar::new(0.1f64)), Ok("0.1".to_string()));
    assert_eq!(text(AnyScalar::new(LongDouble(-2.5))), Ok("-2.5".to_string()));
}

#[test]
fn text_to_numbers() {
    let registry = registry();

    let converted = registry.convert(&AnyScalar::from("3.14"), Kind::F64);
    let val = converted.and_then(|val| val.get_exact::<f64>());
    assert!(val.map_or(false, |val| (val - 3.14).abs() < f64::EPSILON));

    let converted = registry.convert(&AnyScalar::from("\t-12\n"), Kind::I64);
    assert_eq!(converted.and_then(|val| val.get_exact::<i64>()), Ok(-12));
}

#[test]
fn malformed_text() {
    let registry = registry();

    let converted = registry.convert(&AnyScalar::from("abc"), Kind::I32);
    assert!(matches!(
        converted,
        Err(ScalarError::ParseFailure {
            kind: KindName::Kind(Kind::I32),
            source: ParseError::Integer { .. },
            ..
        })
    ));

    let converted = registry.convert(&AnyScalar::from("-3"), Kind::U8);
    assert_eq!(
        converted.map(|val| val.kind()),
        Err(ScalarError::ParseFailure {
            text: "-3".to_string(),
            kind: KindName::Kind(Kind::U8),
            source: ParseError::NegativeUnsigned,
        })
    );
}

#[test]
fn text_conversions_can_be_disabled() {
    let mut config = Configuration::new();
    config.set_bool(F_TEXT_CONVERSIONS, false);
    let registry = ConversionRegistry::new(&config);

    assert_eq!(
        registry.convert(&AnyScalar::new(1i32), Kind::Text).map(|val| val.kind()),
        Err(ScalarError::ConversionUnavailable {
            from: KindName::Kind(Kind::I32),
            to: KindName::Kind(Kind::Text),
        })
    );
}

#[test]
fn convert_into_reuses_text() {
    let registry = registry();

    let mut dst = ScalarContents::Text(String::with_capacity(64));
    let ptr = match &dst {
        ScalarContents::Text(text) => text.as_ptr(),
        _ => unreachable!(),
    };

    let result = registry.convert_into(&ScalarContents::U32(123), Kind::Text, &mut dst);
    assert_eq!(result, Ok(()));

    match &dst {
        ScalarContents::Text(text) => {
            assert_eq!(text, "123");
            assert_eq!(text.as_ptr(), ptr);
        }
        other => panic!("expected text, found {:?}", other),
    }
}
