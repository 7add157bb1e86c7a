use std::fmt::{self, Write};

use rustc_hash::FxHashMap;

use crate::{
    config::{Configuration, ConfigurationCategory, Flag},
    error::ScalarError,
    identity::KindId,
    kind::{Kind, KindName},
    numerics::{for_each_numeric, for_each_pair, Numeric, NumericVisitor, PairVisitor},
    value::{AnyScalar, ScalarContents},
};

/// Writes `src` converted to the converter's target kind into `dst`
pub type Converter = fn(&ScalarContents, &mut ScalarContents) -> Result<(), ScalarError>;

/// Conversions between every pair of numeric kinds and between numeric kinds
/// and text, keyed by (source, target)
#[derive(Clone)]
pub struct ConversionRegistry {
    converters: FxHashMap<(KindId, KindId), Converter>,
}

impl ConversionRegistry {
    pub fn new(config: &Configuration) -> Self {
        let mut registry = Self {
            converters: FxHashMap::default(),
        };

        for_each_pair(&mut registry);

        if config.bool(F_TEXT_CONVERSIONS).unwrap_or(true) {
            for_each_numeric(&mut TextConversions(&mut registry));
        }

        tracing::trace!(entries = registry.len(), "conversion registry built");

        registry
    }

    /// Get the converter for a pair of kinds
    pub fn find(&self, from: KindId, to: KindId) -> Option<Converter> {
        self.converters.get(&(from, to)).copied()
    }

    /// Convert a container's value into a new container of kind `to`.  A
    /// value that already has the requested kind is copied.
    pub fn convert(&self, value: &AnyScalar, to: Kind) -> Result<AnyScalar, ScalarError> {
        if value.kind() == Some(to) {
            return Ok(value.clone());
        }

        let mut converted = ScalarContents::Empty;
        self.convert_into(value.contents(), to, &mut converted)?;
        Ok(AnyScalar::from_contents(converted))
    }

    /// Convert `src` to kind `to`, writing the result into `dst`.  When `dst`
    /// already holds text its allocation is reused.
    pub(crate) fn convert_into(
        &self,
        src: &ScalarContents,
        to: Kind,
        dst: &mut ScalarContents,
    ) -> Result<(), ScalarError> {
        let converter = src
            .kind_id()
            .and_then(|from| self.find(from, to.id()))
            .ok_or_else(|| ScalarError::ConversionUnavailable {
                from: src.kind_name(),
                to: KindName::Kind(to),
            })?;

        converter(src, dst)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    fn insert(&mut self, from: Kind, to: Kind, converter: Converter) {
        self.converters.insert((from.id(), to.id()), converter);
    }
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

impl PairVisitor for ConversionRegistry {
    fn visit<A: Numeric, B: Numeric>(&mut self) {
        self.insert(A::KIND, B::KIND, cast::<A, B>);
    }
}

struct TextConversions<'a>(&'a mut ConversionRegistry);

impl NumericVisitor for TextConversions<'_> {
    fn visit<T: Numeric>(&mut self) {
        self.0.insert(T::KIND, Kind::Text, to_text::<T>);
        self.0.insert(Kind::Text, T::KIND, from_text::<T>);
    }
}

fn cast<A: Numeric, B: Numeric>(
    src: &ScalarContents,
    dst: &mut ScalarContents,
) -> Result<(), ScalarError> {
    let val = A::peek(src).ok_or_else(|| src.mismatch(A::KIND))?;
    *dst = B::narrow(val.widen()).into_contents();
    Ok(())
}

fn to_text<T: Numeric>(src: &ScalarContents, dst: &mut ScalarContents) -> Result<(), ScalarError> {
    let val = T::peek(src).ok_or_else(|| src.mismatch(T::KIND))?;

    match dst {
        ScalarContents::Text(text) => {
            text.clear();
            write!(text, "{}", val).ok();
        }
        _ => *dst = ScalarContents::Text(val.to_string()),
    }

    Ok(())
}

fn from_text<T: Numeric>(
    src: &ScalarContents,
    dst: &mut ScalarContents,
) -> Result<(), ScalarError> {
    let text = match src {
        ScalarContents::Text(text) => text,
        other => return Err(other.mismatch(Kind::Text)),
    };

    let val = T::parse(text.trim()).map_err(|source| ScalarError::ParseFailure {
        text: text.clone(),
        kind: KindName::Kind(T::KIND),
        source,
    })?;

    *dst = val.into_contents();
    Ok(())
}

pub static F_TEXT_CONVERSIONS: Flag =
    Flag::new(ConfigurationCategory::Registry, "text_conversions")
        .bool(true)
        .help("Should conversions between numeric kinds and text be registered");

mod test;
