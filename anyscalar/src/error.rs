use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::{arithmetic::Operator, kind::KindName};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScalarError {
    #[error("Expected a value of kind {expected}, found {found}")]
    KindMismatch { expected: KindName, found: KindName },

    #[error("No conversion registered from {from} to {to}")]
    ConversionUnavailable { from: KindName, to: KindName },

    #[error("Unable to parse {text:?} as {kind}: {source}")]
    ParseFailure {
        text: String,
        kind: KindName,
        #[source]
        source: ParseError,
    },

    #[error("Values of kind {left} and {right} cannot be compared")]
    NotComparable { left: KindName, right: KindName },

    #[error("Operator `{op}` is not supported between {left} and {right}")]
    UnsupportedOperator {
        op: Operator,
        left: KindName,
        right: KindName,
    },

    #[error("The global registry has already been initialized")]
    AlreadyInitialized,
}

/// Reason a text value could not be read as a number
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{source}")]
    Integer {
        #[from]
        source: ParseIntError,
    },

    #[error("{source}")]
    Float {
        #[from]
        source: ParseFloatError,
    },

    #[error("negative number cannot be stored in an unsigned kind")]
    NegativeUnsigned,
}
