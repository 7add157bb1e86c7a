use std::{cmp::Ordering, fmt, marker::PhantomData};

use num_traits::AsPrimitive;

use crate::{
    error::ParseError,
    kind::Kind,
    value::{sealed::Sealed, ScalarContents, ScalarType},
};

/// The extended floating point kind.  Rust has no native 80-bit float, so
/// this follows the platforms where `long double` has the same
/// representation as `double`, while still being a kind of its own.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct LongDouble(pub f64);

impl fmt::Display for LongDouble {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for LongDouble {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl From<LongDouble> for f64 {
    fn from(val: LongDouble) -> Self {
        val.0
    }
}

/// A numeric value promoted to the widest type of its category.  Every
/// integer kind fits into an `i128` exactly and every float kind into an
/// `f64`, so casting through this type matches a direct `as` cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wide {
    Int(i128),
    Float(f64),
}

/// The type both operands of a mixed pair are converted to before they are
/// compared or combined, following the usual arithmetic conversions: kinds
/// narrower than `i32` promote to `i32`, then the higher of the two wins in
/// declaration order.  A signed and an unsigned integer of the same width
/// meet in the unsigned type, so `-1i32` equals `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Promotion {
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl Promotion {
    /// Common type of a pair of numeric types
    pub fn of<A: Numeric, B: Numeric>() -> Self {
        A::PROMOTION.max(B::PROMOTION)
    }

    /// Compare two values after converting both to this type
    pub fn compare(self, left: Wide, right: Wide) -> Option<Ordering> {
        match self {
            Promotion::I32 => compare_as::<i32>(left, right),
            Promotion::U32 => compare_as::<u32>(left, right),
            Promotion::I64 => compare_as::<i64>(left, right),
            Promotion::U64 => compare_as::<u64>(left, right),
            Promotion::F32 => compare_as::<f32>(left, right),
            Promotion::F64 => compare_as::<f64>(left, right),
        }
    }
}

fn compare_as<T: Numeric>(left: Wide, right: Wide) -> Option<Ordering> {
    T::narrow(left).partial_cmp(&T::narrow(right))
}

/// A scalar type belonging to one of the numeric kinds.  The registries are
/// populated from generic functions over pairs of these types.
pub trait Numeric: ScalarType + Copy + PartialOrd + fmt::Display {
    /// Type this kind is promoted to on its own, before meeting the other
    /// side of a pair
    const PROMOTION: Promotion;

    /// Promote to the widest type of the same category
    fn widen(self) -> Wide;

    /// Cast from a promoted value with `as` semantics
    fn narrow(wide: Wide) -> Self;

    /// Parse decimal text using the widest parser for this kind's category
    fn parse(text: &str) -> Result<Self, ParseError>;
}

macro_rules! numeric {
    ($ty:ty, $variant:ident, $widen:ident, $promotion:ident, $parse:ident) => {
        impl Sealed for $ty {}

        impl ScalarType for $ty {
            const KIND: Kind = Kind::$variant;

            fn into_contents(self) -> ScalarContents {
                ScalarContents::$variant(self)
            }

            fn peek(contents: &ScalarContents) -> Option<&Self> {
                match contents {
                    ScalarContents::$variant(val) => Some(val),
                    _ => None,
                }
            }

            fn take(contents: ScalarContents) -> Option<Self> {
                match contents {
                    ScalarContents::$variant(val) => Some(val),
                    _ => None,
                }
            }
        }

        impl Numeric for $ty {
            const PROMOTION: Promotion = Promotion::$promotion;

            fn widen(self) -> Wide {
                Wide::$widen(self.as_())
            }

            fn narrow(wide: Wide) -> Self {
                match wide {
                    Wide::Int(val) => val.as_(),
                    Wide::Float(val) => val.as_(),
                }
            }

            fn parse(text: &str) -> Result<Self, ParseError> {
                $parse(text).map(Self::narrow)
            }
        }
    };
}

fn parse_signed(text: &str) -> Result<Wide, ParseError> {
    Ok(Wide::Int(text.parse::<i64>()?.into()))
}

fn parse_unsigned(text: &str) -> Result<Wide, ParseError> {
    if text.starts_with('-') {
        return Err(ParseError::NegativeUnsigned);
    }

    Ok(Wide::Int(text.parse::<u64>()?.into()))
}

fn parse_float(text: &str) -> Result<Wide, ParseError> {
    Ok(Wide::Float(text.parse::<f64>()?))
}

numeric!(i8, I8, Int, I32, parse_signed);
numeric!(i16, I16, Int, I32, parse_signed);
numeric!(i32, I32, Int, I32, parse_signed);
numeric!(i64, I64, Int, I64, parse_signed);
numeric!(u8, U8, Int, I32, parse_unsigned);
numeric!(u16, U16, Int, I32, parse_unsigned);
numeric!(u32, U32, Int, U32, parse_unsigned);
numeric!(u64, U64, Int, U64, parse_unsigned);
numeric!(f32, F32, Float, F32, parse_float);
numeric!(f64, F64, Float, F64, parse_float);

impl Sealed for LongDouble {}

impl ScalarType for LongDouble {
    const KIND: Kind = Kind::LongDouble;

    fn into_contents(self) -> ScalarContents {
        ScalarContents::LongDouble(self)
    }

    fn peek(contents: &ScalarContents) -> Option<&Self> {
        match contents {
            ScalarContents::LongDouble(val) => Some(val),
            _ => None,
        }
    }

    fn take(contents: ScalarContents) -> Option<Self> {
        match contents {
            ScalarContents::LongDouble(val) => Some(val),
            _ => None,
        }
    }
}

impl Numeric for LongDouble {
    const PROMOTION: Promotion = Promotion::F64;

    fn widen(self) -> Wide {
        Wide::Float(self.0)
    }

    fn narrow(wide: Wide) -> Self {
        Self(f64::narrow(wide))
    }

    fn parse(text: &str) -> Result<Self, ParseError> {
        f64::parse(text).map(Self)
    }
}

/// Callback for [`for_each_numeric`], called once per numeric type
pub(crate) trait NumericVisitor {
    fn visit<T: Numeric>(&mut self);
}

/// Callback for [`for_each_pair`], called once per ordered pair of numeric
/// types
pub(crate) trait PairVisitor {
    fn visit<A: Numeric, B: Numeric>(&mut self);
}

/// Walk the closed list of numeric types.  This is the only place the list
/// is spelled out, every registry is derived from it.
pub(crate) fn for_each_numeric(visitor: &mut impl NumericVisitor) {
    visitor.visit::<i8>();
    visitor.visit::<i16>();
    visitor.visit::<i32>();
    visitor.visit::<i64>();
    visitor.visit::<u8>();
    visitor.visit::<u16>();
    visitor.visit::<u32>();
    visitor.visit::<u64>();
    visitor.visit::<f32>();
    visitor.visit::<f64>();
    visitor.visit::<LongDouble>();
}

/// Walk every ordered pair of numeric types, including each type paired
/// with itself
pub(crate) fn for_each_pair(visitor: &mut impl PairVisitor) {
    struct Rows<'a, V>(&'a mut V);

    struct Columns<'a, A, V>(&'a mut V, PhantomData<A>);

    impl<V: PairVisitor> NumericVisitor for Rows<'_, V> {
        fn visit<A: Numeric>(&mut self) {
            for_each_numeric(&mut Columns::<A, V>(&mut *self.0, PhantomData));
        }
    }

    impl<A: Numeric, V: PairVisitor> NumericVisitor for Columns<'_, A, V> {
        fn visit<B: Numeric>(&mut self) {
            self.0.visit::<A, B>();
        }
    }

    for_each_numeric(&mut Rows(visitor));
}
