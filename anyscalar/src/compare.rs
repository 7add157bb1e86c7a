use std::{cmp::Ordering, fmt};

use rustc_hash::FxHashMap;

use crate::{
    error::ScalarError,
    identity::KindId,
    kind::Kind,
    numerics::{for_each_pair, Numeric, PairVisitor, Promotion},
    value::{AnyScalar, ScalarContents},
};

/// Three way comparison of two values, `None` when they are unordered
pub type Comparator = fn(&ScalarContents, &ScalarContents) -> Option<Ordering>;

/// Comparators for every pair of numeric kinds and for text against text
#[derive(Clone)]
pub struct ComparisonRegistry {
    comparators: FxHashMap<(KindId, KindId), Comparator>,
}

impl ComparisonRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            comparators: FxHashMap::default(),
        };

        for_each_pair(&mut registry);
        registry
            .comparators
            .insert((Kind::Text.id(), Kind::Text.id()), compare_text);

        tracing::trace!(entries = registry.len(), "comparison registry built");

        registry
    }

    /// Get the comparator for a pair of kinds
    pub fn find(&self, left: KindId, right: KindId) -> Option<Comparator> {
        self.comparators.get(&(left, right)).copied()
    }

    /// Compare two containers.  Fails when no comparator exists for their
    /// kinds, including when either is empty.
    pub fn compare(
        &self,
        left: &AnyScalar,
        right: &AnyScalar,
    ) -> Result<Option<Ordering>, ScalarError> {
        let (left, right) = (left.contents(), right.contents());

        let comparator = left
            .kind_id()
            .zip(right.kind_id())
            .and_then(|(a, b)| self.find(a, b))
            .ok_or_else(|| ScalarError::NotComparable {
                left: left.kind_name(),
                right: right.kind_name(),
            })?;

        Ok(comparator(left, right))
    }

    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }
}

impl Default for ComparisonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComparisonRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

impl PairVisitor for ComparisonRegistry {
    fn visit<A: Numeric, B: Numeric>(&mut self) {
        self.comparators
            .insert((A::KIND.id(), B::KIND.id()), compare_numeric::<A, B>);
    }
}

/// Both sides are converted to the pair's common type before comparing
fn compare_numeric<A: Numeric, B: Numeric>(
    left: &ScalarContents,
    right: &ScalarContents,
) -> Option<Ordering> {
    let left = A::peek(left)?.widen();
    let right = B::peek(right)?.widen();
    Promotion::of::<A, B>().compare(left, right)
}

fn compare_text(left: &ScalarContents, right: &ScalarContents) -> Option<Ordering> {
    match (left, right) {
        (ScalarContents::Text(left), ScalarContents::Text(right)) => {
            Some(left.as_bytes().cmp(right.as_bytes()))
        }
        _ => None,
    }
}
