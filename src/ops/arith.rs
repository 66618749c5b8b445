//! Operator overloads, comparisons and short-circuit logic on [`Node`].
//!
//! Operands of one operator share a basal type; use [`Node::cast`] to mix them. Integer
//! arithmetic wraps on overflow and reports division by zero as
//! [`FormuloidError::Arithmetic`].

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};

use crate::{
    eval::context::Context,
    eval::node::{FormulaWriter, Node, Operation},
    foundation::{
        basal::Basal,
        error::{FormuloidError, FormuloidResult},
    },
    ops::lambda::{binary, unary},
};

macro_rules! binary_operator {
    ($t:ty, $trait:ident, $method:ident, $name:literal, $f:expr) => {
        impl $trait<Node<$t>> for Node<$t> {
            type Output = Node<$t>;
            fn $method(self, rhs: Node<$t>) -> Node<$t> {
                binary($name, self, rhs, $f)
            }
        }

        impl $trait<&Node<$t>> for Node<$t> {
            type Output = Node<$t>;
            fn $method(self, rhs: &Node<$t>) -> Node<$t> {
                binary($name, self, rhs.clone(), $f)
            }
        }

        impl $trait<Node<$t>> for &Node<$t> {
            type Output = Node<$t>;
            fn $method(self, rhs: Node<$t>) -> Node<$t> {
                binary($name, self.clone(), rhs, $f)
            }
        }

        impl $trait<&Node<$t>> for &Node<$t> {
            type Output = Node<$t>;
            fn $method(self, rhs: &Node<$t>) -> Node<$t> {
                binary($name, self.clone(), rhs.clone(), $f)
            }
        }

        impl $trait<$t> for Node<$t> {
            type Output = Node<$t>;
            fn $method(self, rhs: $t) -> Node<$t> {
                binary($name, self, Node::constant(rhs), $f)
            }
        }

        impl $trait<$t> for &Node<$t> {
            type Output = Node<$t>;
            fn $method(self, rhs: $t) -> Node<$t> {
                binary($name, self.clone(), Node::constant(rhs), $f)
            }
        }

        impl $trait<Node<$t>> for $t {
            type Output = Node<$t>;
            fn $method(self, rhs: Node<$t>) -> Node<$t> {
                binary($name, Node::constant(self), rhs, $f)
            }
        }

        impl $trait<&Node<$t>> for $t {
            type Output = Node<$t>;
            fn $method(self, rhs: &Node<$t>) -> Node<$t> {
                binary($name, Node::constant(self), rhs.clone(), $f)
            }
        }
    };
}

macro_rules! unary_operator {
    ($t:ty, $trait:ident, $method:ident, $name:literal, $f:expr) => {
        impl $trait for Node<$t> {
            type Output = Node<$t>;
            fn $method(self) -> Node<$t> {
                unary($name, self, $f)
            }
        }

        impl $trait for &Node<$t> {
            type Output = Node<$t>;
            fn $method(self) -> Node<$t> {
                unary($name, self.clone(), $f)
            }
        }
    };
}

macro_rules! float_operators {
    ($($t:ty),*) => {$(
        binary_operator!($t, Add, add, "+", |a: $t, b: $t| Ok(a + b));
        binary_operator!($t, Sub, sub, "-", |a: $t, b: $t| Ok(a - b));
        binary_operator!($t, Mul, mul, "*", |a: $t, b: $t| Ok(a * b));
        binary_operator!($t, Div, div, "/", |a: $t, b: $t| Ok(a / b));
        unary_operator!($t, Neg, neg, "-", |a: $t| Ok(-a));
    )*};
}

macro_rules! integer_operators {
    ($($t:ty),*) => {$(
        binary_operator!($t, Add, add, "+", |a: $t, b: $t| Ok(a.wrapping_add(b)));
        binary_operator!($t, Sub, sub, "-", |a: $t, b: $t| Ok(a.wrapping_sub(b)));
        binary_operator!($t, Mul, mul, "*", |a: $t, b: $t| Ok(a.wrapping_mul(b)));
        binary_operator!($t, Div, div, "/", |a: $t, b: $t| {
            a.checked_div(b).ok_or_else(|| {
                FormuloidError::arithmetic(format!("{a} / {b} has no {} result", stringify!($t)))
            })
        });
        binary_operator!($t, Rem, rem, "%", |a: $t, b: $t| {
            a.checked_rem(b).ok_or_else(|| {
                FormuloidError::arithmetic(format!("{a} % {b} has no {} result", stringify!($t)))
            })
        });
        binary_operator!($t, BitAnd, bitand, "&", |a: $t, b: $t| Ok(a & b));
        binary_operator!($t, BitOr, bitor, "|", |a: $t, b: $t| Ok(a | b));
        binary_operator!($t, BitXor, bitxor, "^", |a: $t, b: $t| Ok(a ^ b));
        unary_operator!($t, Neg, neg, "-", |a: $t| Ok(a.wrapping_neg()));
        unary_operator!($t, Not, not, "~", |a: $t| Ok(!a));
    )*};
}

float_operators!(f32, f64);
integer_operators!(i32, i64);
unary_operator!(bool, Not, not, "not", |a: bool| Ok(!a));

impl<T: Basal + PartialOrd> Node<T> {
    /// `self < rhs`.
    pub fn lt(&self, rhs: impl Into<Node<T>>) -> Node<bool> {
        binary("<", self.clone(), rhs.into(), |a: T, b: T| Ok(a < b))
    }

    /// `self <= rhs`.
    pub fn le(&self, rhs: impl Into<Node<T>>) -> Node<bool> {
        binary("<=", self.clone(), rhs.into(), |a: T, b: T| Ok(a <= b))
    }

    /// `self > rhs`.
    pub fn gt(&self, rhs: impl Into<Node<T>>) -> Node<bool> {
        binary(">", self.clone(), rhs.into(), |a: T, b: T| Ok(a > b))
    }

    /// `self >= rhs`.
    pub fn ge(&self, rhs: impl Into<Node<T>>) -> Node<bool> {
        binary(">=", self.clone(), rhs.into(), |a: T, b: T| Ok(a >= b))
    }
}

impl<T: Basal + PartialEq> Node<T> {
    /// `self == rhs`, with IEEE semantics for floats (NaN is not equal to itself).
    pub fn equals(&self, rhs: impl Into<Node<T>>) -> Node<bool> {
        binary("==", self.clone(), rhs.into(), |a: T, b: T| Ok(a == b))
    }

    /// `self != rhs`.
    pub fn not_equals(&self, rhs: impl Into<Node<T>>) -> Node<bool> {
        binary("!=", self.clone(), rhs.into(), |a: T, b: T| Ok(a != b))
    }
}

/// Short-circuit conjunction or disjunction.
struct Logic {
    conjunction: bool,
    a: Node<bool>,
    b: Node<bool>,
}

impl Operation<bool> for Logic {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<bool> {
        let a = self.a.eval(ctxt)?;
        if a != self.conjunction {
            return Ok(a);
        }
        self.b.eval(ctxt)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        let name = if self.conjunction { "and" } else { "or" };
        w.call(name, &[&self.a, &self.b]);
    }
}

fn logic(conjunction: bool, a: Node<bool>, b: Node<bool>) -> Node<bool> {
    match a.constant_value() {
        Some(va) if va != conjunction => Node::constant(va),
        Some(_) => b,
        None => Node::from_operation(Logic { conjunction, a, b }),
    }
}

impl Node<bool> {
    /// Logical and; `rhs` is not evaluated when `self` is false.
    pub fn and(&self, rhs: impl Into<Node<bool>>) -> Node<bool> {
        logic(true, self.clone(), rhs.into())
    }

    /// Logical or; `rhs` is not evaluated when `self` is true.
    pub fn or(&self, rhs: impl Into<Node<bool>>) -> Node<bool> {
        logic(false, self.clone(), rhs.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/arith.rs"]
mod tests;
