//! Math functions, reducers and casts on numeric nodes.

use crate::{
    eval::context::Context,
    eval::node::{Formula, FormulaWriter, Node, Operation},
    foundation::{
        basal::Basal,
        error::{FormuloidError, FormuloidResult},
    },
    ops::lambda::{binary, ternary, unary},
};

/// Basal types supporting the numeric reducers.
///
/// Integer implementations wrap on overflow.
pub trait Numeric: Basal + Copy + PartialOrd {
    /// Short type name used in formulas (`f64`, `i32`, ...).
    const TYPE_NAME: &'static str;
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// `self + other`.
    fn plus(self, other: Self) -> Self;
    /// `self * other`.
    fn times(self, other: Self) -> Self;
    /// `self` divided by a non-zero element count.
    fn per(self, count: usize) -> Self;
}

macro_rules! numeric_float {
    ($($t:ty),*) => {$(
        impl Numeric for $t {
            const TYPE_NAME: &'static str = stringify!($t);
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            fn plus(self, other: Self) -> Self {
                self + other
            }
            fn times(self, other: Self) -> Self {
                self * other
            }
            fn per(self, count: usize) -> Self {
                self / count as $t
            }
        }
    )*};
}

macro_rules! numeric_integer {
    ($($t:ty),*) => {$(
        impl Numeric for $t {
            const TYPE_NAME: &'static str = stringify!($t);
            const ZERO: Self = 0;
            const ONE: Self = 1;
            fn plus(self, other: Self) -> Self {
                self.wrapping_add(other)
            }
            fn times(self, other: Self) -> Self {
                self.wrapping_mul(other)
            }
            fn per(self, count: usize) -> Self {
                self / count as $t
            }
        }
    )*};
}

numeric_float!(f32, f64);
numeric_integer!(i32, i64);

/// Numeric conversion with `as` semantics.
pub trait CastTo<U>: Numeric {
    /// Convert `self` to `U`.
    fn cast_to(self) -> U;
}

macro_rules! cast_impls {
    ($($from:ty => $($to:ty),+;)+) => {$($(
        impl CastTo<$to> for $from {
            fn cast_to(self) -> $to {
                self as $to
            }
        }
    )+)+};
}

cast_impls! {
    f32 => f32, f64, i32, i64;
    f64 => f32, f64, i32, i64;
    i32 => f32, f64, i32, i64;
    i64 => f32, f64, i32, i64;
}

impl<T: Numeric> Node<T> {
    /// Convert to another numeric type; prints as `(as_<type> x)`.
    pub fn cast<U: Numeric>(&self) -> Node<U>
    where
        T: CastTo<U>,
    {
        unary(format!("as_{}", U::TYPE_NAME), self.clone(), |v: T| {
            Ok(v.cast_to())
        })
    }
}

fn pmin<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

fn pmax<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { b } else { a }
}

fn median3<T: PartialOrd + Copy>(a: T, b: T, c: T) -> T {
    pmax(pmin(a, b), pmin(pmax(a, b), c))
}

macro_rules! float_unary {
    ($t:ty; $($name:ident => $f:expr),* $(,)?) => {
        impl Node<$t> {$(
            #[doc = concat!("`", stringify!($name), "` of this node.")]
            pub fn $name(&self) -> Node<$t> {
                unary(stringify!($name), self.clone(), |v: $t| Ok($f(v)))
            }
        )*}
    };
}

macro_rules! float_binary {
    ($t:ty; $($name:ident => $f:expr),* $(,)?) => {
        impl Node<$t> {$(
            #[doc = concat!("`", stringify!($name), "` of this node and `rhs`.")]
            pub fn $name(&self, rhs: impl Into<Node<$t>>) -> Node<$t> {
                binary(stringify!($name), self.clone(), rhs.into(), |a: $t, b: $t| Ok($f(a, b)))
            }
        )*}
    };
}

macro_rules! float_math {
    ($($t:ty),*) => {$(
        float_unary! { $t;
            abs => <$t>::abs,
            sin => <$t>::sin,
            cos => <$t>::cos,
            tan => <$t>::tan,
            asin => <$t>::asin,
            acos => <$t>::acos,
            atan => <$t>::atan,
            sind => |v: $t| v.to_radians().sin(),
            cosd => |v: $t| v.to_radians().cos(),
            tand => |v: $t| v.to_radians().tan(),
            asind => |v: $t| v.asin().to_degrees(),
            acosd => |v: $t| v.acos().to_degrees(),
            atand => |v: $t| v.atan().to_degrees(),
            sinh => <$t>::sinh,
            cosh => <$t>::cosh,
            tanh => <$t>::tanh,
            asinh => <$t>::asinh,
            acosh => <$t>::acosh,
            atanh => <$t>::atanh,
            floor => <$t>::floor,
            ceil => <$t>::ceil,
            trunc => <$t>::trunc,
            round => <$t>::round,
            floor_dist => |v: $t| v - v.floor(),
            ceil_dist => |v: $t| v.ceil() - v,
            sqrt => <$t>::sqrt,
            cbrt => <$t>::cbrt,
            log => <$t>::ln,
            log2 => <$t>::log2,
            log10 => <$t>::log10,
            exp => <$t>::exp,
            exp2 => <$t>::exp2,
        }

        float_binary! { $t;
            atan2 => <$t>::atan2,
            fmod => |a: $t, b: $t| a % b,
            floor_fmod => |a: $t, b: $t| a - (a / b).floor() * b,
            pow => <$t>::powf,
            remainder => |a: $t, b: $t| a - (a / b).round_ties_even() * b,
            hypot => <$t>::hypot,
        }

        impl Node<$t> {
            /// Euclidean norm of three values; prints as `hypot`.
            pub fn hypot3(&self, b: impl Into<Node<$t>>, c: impl Into<Node<$t>>) -> Node<$t> {
                ternary("hypot", self.clone(), b.into(), c.into(), |a: $t, b: $t, c: $t| {
                    Ok((a * a + b * b + c * c).sqrt())
                })
            }
        }
    )*};
}

float_math!(f32, f64);

macro_rules! integer_math {
    ($($t:ty),*) => {$(
        impl Node<$t> {
            /// Absolute value (wrapping for the minimum value).
            pub fn abs(&self) -> Node<$t> {
                unary("abs", self.clone(), |v: $t| Ok(v.wrapping_abs()))
            }
        }
    )*};
}

integer_math!(i32, i64);

/// Median of three values.
pub fn middle<T: Numeric>(
    a: impl Into<Node<T>>,
    b: impl Into<Node<T>>,
    c: impl Into<Node<T>>,
) -> Node<T> {
    ternary("middle", a.into(), b.into(), c.into(), |a: T, b: T, c: T| {
        Ok(median3(a, b, c))
    })
}

#[derive(Clone, Copy)]
enum Reducer {
    Sum,
    Product,
    Mean,
    Min,
    Max,
}

impl Reducer {
    fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    fn apply<T: Numeric>(self, values: &[T]) -> FormuloidResult<T> {
        let Some((&first, rest)) = values.split_first() else {
            return match self {
                Self::Sum => Ok(T::ZERO),
                Self::Product => Ok(T::ONE),
                _ => Err(FormuloidError::arithmetic(format!(
                    "{} of no values",
                    self.name()
                ))),
            };
        };
        Ok(match self {
            Self::Sum => rest.iter().fold(first, |acc, &v| acc.plus(v)),
            Self::Product => rest.iter().fold(first, |acc, &v| acc.times(v)),
            Self::Mean => rest
                .iter()
                .fold(first, |acc, &v| acc.plus(v))
                .per(values.len()),
            Self::Min => rest.iter().fold(first, |acc, &v| pmin(acc, v)),
            Self::Max => rest.iter().fold(first, |acc, &v| pmax(acc, v)),
        })
    }
}

struct Reduce<T: Basal> {
    reducer: Reducer,
    args: Vec<Node<T>>,
}

impl<T: Numeric> Operation<T> for Reduce<T> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<T> {
        let values = self
            .args
            .iter()
            .map(|a| a.eval(ctxt))
            .collect::<FormuloidResult<Vec<_>>>()?;
        self.reducer.apply(&values)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        let args: Vec<&dyn Formula> = self.args.iter().map(|a| a as &dyn Formula).collect();
        w.call(self.reducer.name(), &args);
    }
}

fn reduce<T: Numeric>(reducer: Reducer, args: impl IntoIterator<Item = Node<T>>) -> Node<T> {
    let args: Vec<Node<T>> = args.into_iter().collect();
    let constants: Option<Vec<T>> = args.iter().map(Node::constant_value).collect();
    if let Some(values) = constants {
        if let Ok(v) = reducer.apply(&values) {
            return Node::constant(v);
        }
    }
    Node::from_operation(Reduce { reducer, args })
}

/// Sum of all nodes (`0` for none).
pub fn sum<T: Numeric>(args: impl IntoIterator<Item = Node<T>>) -> Node<T> {
    reduce(Reducer::Sum, args)
}

/// Product of all nodes (`1` for none).
pub fn product<T: Numeric>(args: impl IntoIterator<Item = Node<T>>) -> Node<T> {
    reduce(Reducer::Product, args)
}

/// Arithmetic mean; integer means truncate.
pub fn mean<T: Numeric>(args: impl IntoIterator<Item = Node<T>>) -> Node<T> {
    reduce(Reducer::Mean, args)
}

/// Smallest value.
pub fn min<T: Numeric>(args: impl IntoIterator<Item = Node<T>>) -> Node<T> {
    reduce(Reducer::Min, args)
}

/// Largest value.
pub fn max<T: Numeric>(args: impl IntoIterator<Item = Node<T>>) -> Node<T> {
    reduce(Reducer::Max, args)
}

struct Clamp<T: Basal> {
    v: Node<T>,
    lo: Node<T>,
    hi: Node<T>,
}

impl<T: Numeric> Operation<T> for Clamp<T> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<T> {
        let v = self.v.eval(ctxt)?;
        let lo = self.lo.eval(ctxt)?;
        if v <= lo {
            return Ok(lo);
        }
        let hi = self.hi.eval(ctxt)?;
        Ok(pmin(v, hi))
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        w.call("clamp", &[&self.v, &self.lo, &self.hi]);
    }
}

/// Restrict `v` to `[lo, hi]`; `hi` is not evaluated when `v <= lo`.
pub fn clamp<T: Numeric>(
    v: impl Into<Node<T>>,
    lo: impl Into<Node<T>>,
    hi: impl Into<Node<T>>,
) -> Node<T> {
    let (v, lo, hi) = (v.into(), lo.into(), hi.into());
    if let (Some(cv), Some(clo), Some(chi)) =
        (v.constant_value(), lo.constant_value(), hi.constant_value())
    {
        return Node::constant(if cv <= clo { clo } else { pmin(cv, chi) });
    }
    Node::from_operation(Clamp { v, lo, hi })
}

#[cfg(test)]
#[path = "../../tests/unit/ops/math.rs"]
mod tests;
