use std::{fmt, mem};

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::{identity::KindId, numerics::LongDouble};

/// Every kind of value that has registry entries.  The set is closed, new
/// kinds cannot be added at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
#[repr(u8)]
pub enum Kind {
    I8 = 0,
    I16 = 1,
    I32 = 2,
    I64 = 3,
    U8 = 4,
    U16 = 5,
    U32 = 6,
    U64 = 7,
    F32 = 8,
    F64 = 9,
    LongDouble = 10,
    Text = 11,
}

impl Kind {
    /// Number of kinds in the closed set
    pub const COUNT: usize = 12;

    /// Iterate over all kinds in declaration order
    pub fn iter() -> impl Iterator<Item = Kind> {
        (0..).map_while(Kind::from_u8)
    }

    /// Iterate over the numeric kinds only
    pub fn numeric() -> impl Iterator<Item = Kind> {
        Self::iter().filter(|kind| kind.is_numeric())
    }

    /// The runtime identity used to key registry lookups
    pub fn id(self) -> KindId {
        match self {
            Kind::I8 => KindId::of::<i8>(),
            Kind::I16 => KindId::of::<i16>(),
            Kind::I32 => KindId::of::<i32>(),
            Kind::I64 => KindId::of::<i64>(),
            Kind::U8 => KindId::of::<u8>(),
            Kind::U16 => KindId::of::<u16>(),
            Kind::U32 => KindId::of::<u32>(),
            Kind::U64 => KindId::of::<u64>(),
            Kind::F32 => KindId::of::<f32>(),
            Kind::F64 => KindId::of::<f64>(),
            Kind::LongDouble => KindId::of::<LongDouble>(),
            Kind::Text => KindId::of::<String>(),
        }
    }

    /// In-memory size of the native type backing this kind
    pub fn size(self) -> usize {
        match self {
            Kind::I8 => mem::size_of::<i8>(),
            Kind::I16 => mem::size_of::<i16>(),
            Kind::I32 => mem::size_of::<i32>(),
            Kind::I64 => mem::size_of::<i64>(),
            Kind::U8 => mem::size_of::<u8>(),
            Kind::U16 => mem::size_of::<u16>(),
            Kind::U32 => mem::size_of::<u32>(),
            Kind::U64 => mem::size_of::<u64>(),
            Kind::F32 => mem::size_of::<f32>(),
            Kind::F64 => mem::size_of::<f64>(),
            Kind::LongDouble => mem::size_of::<LongDouble>(),
            Kind::Text => mem::size_of::<String>(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::LongDouble => "long double",
            Kind::Text => "text",
        }
    }

    pub fn is_numeric(self) -> bool {
        self != Kind::Text
    }

    pub fn is_integer(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Kind::F32 | Kind::F64 | Kind::LongDouble)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Description of whatever a container holds, used in error messages.
/// Unlike [`Kind`] this also covers empty containers and custom values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindName {
    Empty,
    Kind(Kind),
    Custom(&'static str),
}

impl From<Kind> for KindName {
    fn from(kind: Kind) -> Self {
        KindName::Kind(kind)
    }
}

impl fmt::Display for KindName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KindName::Empty => write!(f, "empty"),
            KindName::Kind(kind) => write!(f, "{}", kind),
            KindName::Custom(name) => write!(f, "custom `{}`", name),
        }
    }
}
