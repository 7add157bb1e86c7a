//! Per-thread scratch cells for converted reads.
//!
//! Each thread owns one cell per target kind.  A converted read writes into
//! the cell for its target kind and lends it to the caller's closure, so
//! repeated reads reuse the same storage (and the same text allocation)
//! instead of building a new value each time.  The borrow cannot outlive the
//! closure, so a later read can never change a value the caller still holds.

use std::cell::RefCell;

use crate::{
    error::ScalarError,
    kind::Kind,
    registry::Registry,
    value::{ScalarContents, ScalarType},
};

thread_local! {
    static SCRATCH: [RefCell<ScalarContents>; Kind::COUNT] = Default::default();
}

/// Convert `src` to `T` inside this thread's scratch cell and call `f` with
/// the result.  A nested read of the same kind while the cell is lent out
/// converts into a temporary instead.
pub(crate) fn with_converted<T: ScalarType, R>(
    src: &ScalarContents,
    registry: &Registry,
    f: impl FnOnce(&T) -> R,
) -> Result<R, ScalarError> {
    SCRATCH.with(|cells| match cells[T::KIND as usize].try_borrow_mut() {
        Ok(mut cell) => convert_and_call(src, registry, &mut cell, f),
        Err(_) => {
            tracing::trace!(kind = %T::KIND, "scratch cell busy, converting into a temporary");
            convert_and_call(src, registry, &mut ScalarContents::Empty, f)
        }
    })
}

fn convert_and_call<T: ScalarType, R>(
    src: &ScalarContents,
    registry: &Registry,
    cell: &mut ScalarContents,
    f: impl FnOnce(&T) -> R,
) -> Result<R, ScalarError> {
    registry.conversions().convert_into(src, T::KIND, cell)?;

    let val = T::peek(cell).ok_or_else(|| cell.mismatch(T::KIND))?;
    Ok(f(val))
}

/// Kind currently held by this thread's scratch cell for `kind`
#[cfg(test)]
pub(crate) fn cell_kind(kind: Kind) -> Option<Kind> {
    SCRATCH.with(|cells| cells[kind as usize].borrow().kind())
}

mod test;
