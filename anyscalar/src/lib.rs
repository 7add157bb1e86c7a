pub mod arithmetic;
pub mod compare;
pub mod config;
pub mod convert;
pub mod error;
pub mod identity;
pub mod kind;
pub mod numerics;
pub mod registry;
pub mod value;

mod scratch;

pub use arithmetic::Operator;
pub use error::{ParseError, ScalarError};
pub use identity::KindId;
pub use kind::{Kind, KindName};
pub use numerics::{LongDouble, Numeric};
pub use registry::Registry;
pub use value::{AnyScalar, CustomScalar, ScalarContents, ScalarType};
