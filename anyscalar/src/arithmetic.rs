use std::fmt;

use num_traits::{Float, PrimInt, WrappingAdd, WrappingMul, WrappingSub};
use rustc_hash::FxHashMap;

use crate::{
    error::ScalarError,
    identity::KindId,
    numerics::{for_each_pair, Numeric, PairVisitor, Promotion, Wide},
    value::{AnyScalar, ScalarContents},
};

/// The binary operators supported between containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Subtract => write!(f, "-"),
            Operator::Multiply => write!(f, "*"),
            Operator::Divide => write!(f, "/"),
        }
    }
}

/// Combines a left and a right value into a value of the left kind, `None`
/// if either side is not of the kind the function was registered for
pub type BinaryOp = fn(&ScalarContents, &ScalarContents) -> Option<ScalarContents>;

/// The four operators registered for a single pair of kinds
#[derive(Clone, Copy)]
pub struct Operators {
    add: BinaryOp,
    subtract: BinaryOp,
    multiply: BinaryOp,
    divide: BinaryOp,
}

impl Operators {
    fn of<A: Numeric, B: Numeric>() -> Self {
        Self {
            add: binary::<A, B, Add>,
            subtract: binary::<A, B, Subtract>,
            multiply: binary::<A, B, Multiply>,
            divide: binary::<A, B, Divide>,
        }
    }

    pub fn get(&self, op: Operator) -> BinaryOp {
        match op {
            Operator::Add => self.add,
            Operator::Subtract => self.subtract,
            Operator::Multiply => self.multiply,
            Operator::Divide => self.divide,
        }
    }
}

/// Arithmetic for every ordered pair of numeric kinds.  The result always
/// has the kind of the left operand.
#[derive(Clone)]
pub struct ArithmeticRegistry {
    operators: FxHashMap<(KindId, KindId), Operators>,
}

impl ArithmeticRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            operators: FxHashMap::default(),
        };

        for_each_pair(&mut registry);

        tracing::trace!(entries = registry.len(), "arithmetic registry built");

        registry
    }

    /// Get the operators for a pair of kinds
    pub fn find(&self, left: KindId, right: KindId) -> Option<Operators> {
        self.operators.get(&(left, right)).copied()
    }

    /// Apply an operator to two containers, producing a container of the
    /// left operand's kind.  Integer division by zero panics.
    pub fn apply(
        &self,
        op: Operator,
        left: &AnyScalar,
        right: &AnyScalar,
    ) -> Result<AnyScalar, ScalarError> {
        let unsupported = || ScalarError::UnsupportedOperator {
            op,
            left: left.kind_name(),
            right: right.kind_name(),
        };

        let operators = left
            .kind_id()
            .zip(right.kind_id())
            .and_then(|(a, b)| self.find(a, b))
            .ok_or_else(unsupported)?;

        let apply = operators.get(op);
        let result = apply(left.contents(), right.contents()).ok_or_else(unsupported)?;

        Ok(AnyScalar::from_contents(result))
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for ArithmeticRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArithmeticRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArithmeticRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

impl PairVisitor for ArithmeticRegistry {
    fn visit<A: Numeric, B: Numeric>(&mut self) {
        self.operators
            .insert((A::KIND.id(), B::KIND.id()), Operators::of::<A, B>());
    }
}

/// Selects the operation a [`binary`] instance performs
trait WideOp {
    fn integer<T: PrimInt + WrappingAdd + WrappingSub + WrappingMul>(left: T, right: T) -> T;

    fn float<T: Float>(left: T, right: T) -> T;
}

struct Add;
struct Subtract;
struct Multiply;
struct Divide;

impl WideOp for Add {
    fn integer<T: PrimInt + WrappingAdd + WrappingSub + WrappingMul>(left: T, right: T) -> T {
        left.wrapping_add(&right)
    }

    fn float<T: Float>(left: T, right: T) -> T {
        left + right
    }
}

impl WideOp for Subtract {
    fn integer<T: PrimInt + WrappingAdd + WrappingSub + WrappingMul>(left: T, right: T) -> T {
        left.wrapping_sub(&right)
    }

    fn float<T: Float>(left: T, right: T) -> T {
        left - right
    }
}

impl WideOp for Multiply {
    fn integer<T: PrimInt + WrappingAdd + WrappingSub + WrappingMul>(left: T, right: T) -> T {
        left.wrapping_mul(&right)
    }

    fn float<T: Float>(left: T, right: T) -> T {
        left * right
    }
}

impl WideOp for Divide {
    /// Truncates, and panics on a zero divisor like the native operator
    fn integer<T: PrimInt + WrappingAdd + WrappingSub + WrappingMul>(left: T, right: T) -> T {
        left / right
    }

    fn float<T: Float>(left: T, right: T) -> T {
        left / right
    }
}

/// Both operands are converted to the pair's common type, combined there,
/// and the result is cast back to the left operand's kind
fn binary<A: Numeric, B: Numeric, Op: WideOp>(
    left: &ScalarContents,
    right: &ScalarContents,
) -> Option<ScalarContents> {
    let left = A::peek(left)?.widen();
    let right = B::peek(right)?.widen();

    let result = match Promotion::of::<A, B>() {
        Promotion::I32 => integer::<i32, Op>(left, right),
        Promotion::U32 => integer::<u32, Op>(left, right),
        Promotion::I64 => integer::<i64, Op>(left, right),
        Promotion::U64 => integer::<u64, Op>(left, right),
        Promotion::F32 => float::<f32, Op>(left, right),
        Promotion::F64 => float::<f64, Op>(left, right),
    };

    Some(A::narrow(result).into_contents())
}

fn integer<T, Op>(left: Wide, right: Wide) -> Wide
where
    T: Numeric + PrimInt + WrappingAdd + WrappingSub + WrappingMul,
    Op: WideOp,
{
    Op::integer(T::narrow(left), T::narrow(right)).widen()
}

fn float<T: Numeric + Float, Op: WideOp>(left: Wide, right: Wide) -> Wide {
    Op::float(T::narrow(left), T::narrow(right)).widen()
}
