use std::any::TypeId;

use crate::kind::Kind;

/// Opaque identity of a concrete type, used as the key of every registry.
/// Only meaningful inside the running process: two ids are equal when they
/// were derived from the same type in the same build, and they must never be
/// written anywhere that outlives the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct KindId(TypeId);

impl KindId {
    /// Get the identity of any type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(TypeId::of::<T>())
    }

    /// Reverse lookup into the closed set of registered kinds, returns `None`
    /// for the identity of any other type
    pub fn kind(self) -> Option<Kind> {
        Kind::iter().find(|kind| kind.id() == self)
    }
}

impl From<Kind> for KindId {
    fn from(kind: Kind) -> Self {
        kind.id()
    }
}
