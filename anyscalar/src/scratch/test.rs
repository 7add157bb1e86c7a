#![cfg(test)]

use std::thread;

use crate::{error::ScalarError, kind::Kind, registry::Registry, value::ScalarContents};

use super::{cell_kind, with_converted};

#[test]
fn conversion_lands_in_scratch_cell() {
    let registry = Registry::new();

    let text = with_converted::<String, _>(&ScalarContents::I32(42), &registry, |val| val.clone());
    assert_eq!(text, Ok("42".to_string()));
    assert_eq!(cell_kind(Kind::Text), Some(Kind::Text));

    let val = with_converted::<u8, _>(&ScalarContents::F64(9.9), &registry, |val| *val);
    assert_eq!(val, Ok(9));
    assert_eq!(cell_kind(Kind::U8), Some(Kind::U8));
}

#[test]
fn later_reads_see_their_own_value() {
    let registry = Registry::new();

    let first = with_converted::<String, _>(&ScalarContents::U8(1), &registry, |val| val.clone());
    let second = with_converted::<String, _>(&ScalarContents::U8(2), &registry, |val| val.clone());

    assert_eq!(first, Ok("1".to_string()));
    assert_eq!(second, Ok("2".to_string()));
}

#[test]
fn nested_reads_of_same_kind() {
    let registry = Registry::new();

    let result = with_converted::<String, _>(&ScalarContents::I64(10), &registry, |outer| {
        let inner =
            with_converted::<String, _>(&ScalarContents::I64(20), &registry, |inner| inner.clone());
        (outer.clone(), inner)
    });

    assert_eq!(result, Ok(("10".to_string(), Ok("20".to_string()))));
}

#[test]
fn failed_conversion() {
    let registry = Registry::new();

    let result = with_converted::<i32, _>(&ScalarContents::Text("x".into()), &registry, |val| *val);
    assert!(matches!(result, Err(ScalarError::ParseFailure { .. })));
}

#[test]
fn cells_are_per_thread() {
    let registry = Registry::new();

    let _ = with_converted::<f32, _>(&ScalarContents::I8(3), &registry, |val| *val);
    assert_eq!(cell_kind(Kind::F32), Some(Kind::F32));

    let other = thread::spawn(|| cell_kind(Kind::F32)).join();
    assert_eq!(other.ok(), Some(None));
}
