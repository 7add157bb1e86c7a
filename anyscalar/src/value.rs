use std::{
    any::Any,
    cmp::Ordering,
    fmt, mem,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign},
};

use crate::{
    arithmetic::Operator,
    error::ScalarError,
    identity::KindId,
    kind::{Kind, KindName},
    numerics::LongDouble,
    registry::Registry,
    scratch,
};

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A type that can be stored in an [`AnyScalar`] as one of the registered
/// kinds.  Implemented for the numeric primitives, [`LongDouble`] and
/// `String`; the set cannot be extended.
pub trait ScalarType: sealed::Sealed + Clone + 'static {
    const KIND: Kind;

    fn into_contents(self) -> ScalarContents;

    fn peek(contents: &ScalarContents) -> Option<&Self>;

    fn take(contents: ScalarContents) -> Option<Self>;
}

impl sealed::Sealed for String {}

impl ScalarType for String {
    const KIND: Kind = Kind::Text;

    fn into_contents(self) -> ScalarContents {
        ScalarContents::Text(self)
    }

    fn peek(contents: &ScalarContents) -> Option<&Self> {
        match contents {
            ScalarContents::Text(val) => Some(val),
            _ => None,
        }
    }

    fn take(contents: ScalarContents) -> Option<Self> {
        match contents {
            ScalarContents::Text(val) => Some(val),
            _ => None,
        }
    }
}

/// Any other value that can be stored in a container.  Custom values keep
/// their identity and can be read back exactly, but no registry has entries
/// for them, so they never convert, compare or take part in arithmetic.
pub trait CustomScalar: Any + fmt::Debug + Send + Sync {
    fn clone_box(&self) -> Box<dyn CustomScalar>;

    fn as_any(&self) -> &dyn Any;

    fn kind_id(&self) -> KindId;

    fn type_name(&self) -> &'static str;

    fn size(&self) -> usize;
}

impl<T: Any + Clone + fmt::Debug + Send + Sync> CustomScalar for T {
    fn clone_box(&self) -> Box<dyn CustomScalar> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_id(&self) -> KindId {
        KindId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn size(&self) -> usize {
        mem::size_of::<T>()
    }
}

/// The stored value, one variant per kind
#[derive(Debug)]
pub enum ScalarContents {
    Empty,
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    LongDouble(LongDouble),
    Text(String),
    Custom(Box<dyn CustomScalar>),
}

impl ScalarContents {
    pub fn kind(&self) -> Option<Kind> {
        Some(match self {
            ScalarContents::I8(_) => Kind::I8,
            ScalarContents::I16(_) => Kind::I16,
            ScalarContents::I32(_) => Kind::I32,
            ScalarContents::I64(_) => Kind::I64,
            ScalarContents::U8(_) => Kind::U8,
            ScalarContents::U16(_) => Kind::U16,
            ScalarContents::U32(_) => Kind::U32,
            ScalarContents::U64(_) => Kind::U64,
            ScalarContents::F32(_) => Kind::F32,
            ScalarContents::F64(_) => Kind::F64,
            ScalarContents::LongDouble(_) => Kind::LongDouble,
            ScalarContents::Text(_) => Kind::Text,
            ScalarContents::Empty | ScalarContents::Custom(_) => return None,
        })
    }

    pub fn kind_id(&self) -> Option<KindId> {
        match self {
            ScalarContents::Empty => None,
            ScalarContents::Custom(val) => Some((**val).kind_id()),
            other => other.kind().map(Kind::id),
        }
    }

    pub fn kind_name(&self) -> KindName {
        match self {
            ScalarContents::Empty => KindName::Empty,
            ScalarContents::Custom(val) => KindName::Custom((**val).type_name()),
            other => other.kind().map_or(KindName::Empty, KindName::Kind),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            ScalarContents::Empty => 0,
            ScalarContents::Custom(val) => (**val).size(),
            other => other.kind().map_or(0, Kind::size),
        }
    }

    /// Error for a read that expected `expected` but found these contents
    pub(crate) fn mismatch(&self, expected: impl Into<KindName>) -> ScalarError {
        ScalarError::KindMismatch {
            expected: expected.into(),
            found: self.kind_name(),
        }
    }
}

impl Default for ScalarContents {
    fn default() -> Self {
        ScalarContents::Empty
    }
}

impl Clone for ScalarContents {
    fn clone(&self) -> Self {
        match self {
            ScalarContents::Empty => ScalarContents::Empty,
            ScalarContents::I8(val) => ScalarContents::I8(*val),
            ScalarContents::I16(val) => ScalarContents::I16(*val),
            ScalarContents::I32(val) => ScalarContents::I32(*val),
            ScalarContents::I64(val) => ScalarContents::I64(*val),
            ScalarContents::U8(val) => ScalarContents::U8(*val),
            ScalarContents::U16(val) => ScalarContents::U16(*val),
            ScalarContents::U32(val) => ScalarContents::U32(*val),
            ScalarContents::U64(val) => ScalarContents::U64(*val),
            ScalarContents::F32(val) => ScalarContents::F32(*val),
            ScalarContents::F64(val) => ScalarContents::F64(*val),
            ScalarContents::LongDouble(val) => ScalarContents::LongDouble(*val),
            ScalarContents::Text(val) => ScalarContents::Text(val.clone()),
            ScalarContents::Custom(val) => ScalarContents::Custom((**val).clone_box()),
        }
    }
}

impl fmt::Display for ScalarContents {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScalarContents::Empty => Ok(()),
            ScalarContents::I8(val) => write!(f, "{}", val),
            ScalarContents::I16(val) => write!(f, "{}", val),
            ScalarContents::I32(val) => write!(f, "{}", val),
            ScalarContents::I64(val) => write!(f, "{}", val),
            ScalarContents::U8(val) => write!(f, "{}", val),
            ScalarContents::U16(val) => write!(f, "{}", val),
            ScalarContents::U32(val) => write!(f, "{}", val),
            ScalarContents::U64(val) => write!(f, "{}", val),
            ScalarContents::F32(val) => write!(f, "{}", val),
            ScalarContents::F64(val) => write!(f, "{}", val),
            ScalarContents::LongDouble(val) => write!(f, "{}", val),
            ScalarContents::Text(val) => write!(f, "{}", val),
            ScalarContents::Custom(val) => write!(f, "{:?}", val),
        }
    }
}

/// A scalar whose kind is only known at runtime.  Reads, comparisons and
/// arithmetic between different kinds are resolved through a [`Registry`],
/// the global one unless a method taking an explicit registry is used.
/// Cloning always copies the stored value, two containers never share
/// storage.
#[derive(Clone, Default)]
pub struct AnyScalar {
    contents: ScalarContents,
    #[cfg(feature = "type-names")]
    type_name: Option<&'static str>,
}

impl AnyScalar {
    /// Create a container holding nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a container holding one of the registered kinds
    pub fn new<T: ScalarType>(value: T) -> Self {
        let mut scalar = Self::empty();
        scalar.set(value);
        scalar
    }

    /// Create a container holding a value of any other type
    pub fn custom<T: Any + Clone + fmt::Debug + Send + Sync>(value: T) -> Self {
        Self {
            contents: ScalarContents::Custom(Box::new(value)),
            #[cfg(feature = "type-names")]
            type_name: Some(std::any::type_name::<T>()),
        }
    }

    pub(crate) fn from_contents(contents: ScalarContents) -> Self {
        Self {
            #[cfg(feature = "type-names")]
            type_name: contents.kind().map(type_name_of),
            contents,
        }
    }

    /// Replace both the kind and the value
    pub fn set<T: ScalarType>(&mut self, value: T) {
        self.contents = value.into_contents();

        #[cfg(feature = "type-names")]
        {
            self.type_name = Some(std::any::type_name::<T>());
        }
    }

    /// Store text, overwriting existing text in place so its allocation is
    /// reused
    pub fn set_text(&mut self, value: &str) {
        match &mut self.contents {
            ScalarContents::Text(text) => {
                text.clear();
                text.push_str(value);
            }
            _ => self.set(value.to_string()),
        }
    }

    /// Read the stored value when it is exactly of kind `T`
    pub fn get_exact<T: ScalarType>(&self) -> Result<T, ScalarError> {
        self.get_ref::<T>().map(T::clone)
    }

    /// Borrow the stored value when it is exactly of kind `T`
    pub fn get_ref<T: ScalarType>(&self) -> Result<&T, ScalarError> {
        T::peek(&self.contents).ok_or_else(|| self.contents.mismatch(T::KIND))
    }

    /// Borrow a custom value when it is exactly of type `T`
    pub fn get_custom<T: Any>(&self) -> Result<&T, ScalarError> {
        let custom = match &self.contents {
            ScalarContents::Custom(val) => (**val).as_any().downcast_ref::<T>(),
            _ => None,
        };

        custom.ok_or_else(|| {
            self.contents
                .mismatch(KindName::Custom(std::any::type_name::<T>()))
        })
    }

    /// Read the stored value as kind `T`, converting through the global
    /// registry when the stored kind differs
    pub fn get_converted<T: ScalarType>(&self) -> Result<T, ScalarError> {
        self.get_converted_in(Registry::global())
    }

    /// Read the stored value as kind `T`, converting through `registry` when
    /// the stored kind differs
    pub fn get_converted_in<T: ScalarType>(&self, registry: &Registry) -> Result<T, ScalarError> {
        if let Some(val) = T::peek(&self.contents) {
            return Ok(val.clone());
        }

        let mut converted = ScalarContents::Empty;
        registry
            .conversions()
            .convert_into(&self.contents, T::KIND, &mut converted)?;

        T::take(converted).ok_or_else(|| self.contents.mismatch(T::KIND))
    }

    /// Borrow the stored value as kind `T` for the duration of `f`.  A
    /// conversion is written into this thread's scratch cell for `T`'s kind
    /// instead of allocating a new value.
    pub fn with_converted<T: ScalarType, R>(
        &self,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, ScalarError> {
        match T::peek(&self.contents) {
            Some(val) => Ok(f(val)),
            None => scratch::with_converted(&self.contents, Registry::global(), f),
        }
    }

    pub fn contents(&self) -> &ScalarContents {
        &self.contents
    }

    pub fn kind(&self) -> Option<Kind> {
        self.contents.kind()
    }

    pub fn kind_id(&self) -> Option<KindId> {
        self.contents.kind_id()
    }

    pub fn kind_name(&self) -> KindName {
        self.contents.kind_name()
    }

    /// Size in bytes of the stored value's type, 0 when empty
    pub fn size(&self) -> usize {
        self.contents.size()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.contents, ScalarContents::Empty)
    }

    /// Name of the type that was stored, only retained with the
    /// `type-names` feature
    #[cfg(feature = "type-names")]
    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    /// Compare against another container, failing when no comparator is
    /// registered for the pair.  `Ok(None)` means the values are unordered
    /// (a NaN was involved).
    pub fn try_compare(&self, other: &AnyScalar) -> Result<Option<Ordering>, ScalarError> {
        Registry::global().comparisons().compare(self, other)
    }

    pub fn try_apply(&self, op: Operator, rhs: &AnyScalar) -> Result<AnyScalar, ScalarError> {
        self.try_apply_in(Registry::global(), op, rhs)
    }

    pub fn try_apply_in(
        &self,
        registry: &Registry,
        op: Operator,
        rhs: &AnyScalar,
    ) -> Result<AnyScalar, ScalarError> {
        registry.arithmetic().apply(op, self, rhs)
    }

    pub fn try_add(&self, rhs: &AnyScalar) -> Result<AnyScalar, ScalarError> {
        self.try_apply(Operator::Add, rhs)
    }

    pub fn try_sub(&self, rhs: &AnyScalar) -> Result<AnyScalar, ScalarError> {
        self.try_apply(Operator::Subtract, rhs)
    }

    pub fn try_mul(&self, rhs: &AnyScalar) -> Result<AnyScalar, ScalarError> {
        self.try_apply(Operator::Multiply, rhs)
    }

    pub fn try_div(&self, rhs: &AnyScalar) -> Result<AnyScalar, ScalarError> {
        self.try_apply(Operator::Divide, rhs)
    }

    /// Apply an operator for the `std::ops` impls.  A pair without an entry
    /// leaves the left operand unchanged.
    fn apply_or_keep(&self, op: Operator, rhs: &AnyScalar) -> AnyScalar {
        let registry = Registry::global();
        registry
            .arithmetic()
            .apply(op, self, rhs)
            .unwrap_or_else(|err| {
                registry.report_fallback(&err);
                self.clone()
            })
    }
}

#[cfg(feature = "type-names")]
fn type_name_of(kind: Kind) -> &'static str {
    match kind {
        Kind::I8 => std::any::type_name::<i8>(),
        Kind::I16 => std::any::type_name::<i16>(),
        Kind::I32 => std::any::type_name::<i32>(),
        Kind::I64 => std::any::type_name::<i64>(),
        Kind::U8 => std::any::type_name::<u8>(),
        Kind::U16 => std::any::type_name::<u16>(),
        Kind::U32 => std::any::type_name::<u32>(),
        Kind::U64 => std::any::type_name::<u64>(),
        Kind::F32 => std::any::type_name::<f32>(),
        Kind::F64 => std::any::type_name::<f64>(),
        Kind::LongDouble => std::any::type_name::<LongDouble>(),
        Kind::Text => std::any::type_name::<String>(),
    }
}

impl<T: ScalarType> From<T> for AnyScalar {
    fn from(val: T) -> Self {
        Self::new(val)
    }
}

impl From<&str> for AnyScalar {
    fn from(val: &str) -> Self {
        Self::new(val.to_string())
    }
}

impl fmt::Display for AnyScalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.contents)
    }
}

impl fmt::Debug for AnyScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.contents {
            ScalarContents::Empty => write!(f, "empty"),
            ScalarContents::Text(val) => write!(f, "text({:?})", val),
            ScalarContents::Custom(val) => write!(f, "{:?}", val),
            other => write!(f, "{}({})", self.kind_name(), other),
        }
    }
}

/// Containers without a comparator for their pair of kinds are neither
/// equal nor ordered, every operator returns `false`
impl PartialEq for AnyScalar {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for AnyScalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let registry = Registry::global();
        match registry.comparisons().compare(self, other) {
            Ok(ordering) => ordering,
            Err(err) => {
                registry.report_fallback(&err);
                None
            }
        }
    }
}

macro_rules! compare_plain {
    ($($ty:ty),*) => {
        $(
            impl PartialEq<$ty> for AnyScalar {
                fn eq(&self, other: &$ty) -> bool {
                    self.get_converted::<$ty>().map_or(false, |val| val == *other)
                }
            }

            impl PartialOrd<$ty> for AnyScalar {
                fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
                    self.get_converted::<$ty>().ok()?.partial_cmp(other)
                }
            }
        )*
    };
}

compare_plain!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, LongDouble, String);

impl PartialEq<str> for AnyScalar {
    fn eq(&self, other: &str) -> bool {
        self.with_converted::<String, _>(|val| val == other)
            .unwrap_or(false)
    }
}

impl PartialEq<&str> for AnyScalar {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialOrd<str> for AnyScalar {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        self.with_converted::<String, _>(|val| val.as_str().partial_cmp(other))
            .ok()
            .flatten()
    }
}

impl PartialOrd<&str> for AnyScalar {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.partial_cmp(*other)
    }
}

macro_rules! operator {
    ($op:ident, $method:ident, $assign_op:ident, $assign:ident, $operator:expr) => {
        impl $op<&AnyScalar> for &AnyScalar {
            type Output = AnyScalar;

            fn $method(self, rhs: &AnyScalar) -> AnyScalar {
                self.apply_or_keep($operator, rhs)
            }
        }

        impl $op for AnyScalar {
            type Output = AnyScalar;

            fn $method(self, rhs: AnyScalar) -> AnyScalar {
                self.apply_or_keep($operator, &rhs)
            }
        }

        impl $assign_op<&AnyScalar> for AnyScalar {
            fn $assign(&mut self, rhs: &AnyScalar) {
                *self = self.apply_or_keep($operator, rhs);
            }
        }

        impl $assign_op for AnyScalar {
            fn $assign(&mut self, rhs: AnyScalar) {
                *self = self.apply_or_keep($operator, &rhs);
            }
        }
    };
}

operator!(Add, add, AddAssign, add_assign, Operator::Add);
operator!(Sub, sub, SubAssign, sub_assign, Operator::Subtract);
operator!(Mul, mul, MulAssign, mul_assign, Operator::Multiply);
operator!(Div, div, DivAssign, div_assign, Operator::Divide);
