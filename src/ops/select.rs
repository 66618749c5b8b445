use crate::{
    eval::context::Context,
    eval::node::{FormulaWriter, Node, Operation},
    foundation::{basal::Basal, error::FormuloidResult},
    ops::lambda::id,
};

struct Select<T: Basal> {
    cond: Node<bool>,
    a: Node<T>,
    b: Node<T>,
}

impl<T: Basal> Operation<T> for Select<T> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<T> {
        if self.cond.eval(ctxt)? {
            self.a.eval(ctxt)
        } else {
            self.b.eval(ctxt)
        }
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        w.call("select", &[&self.cond, &self.a, &self.b]);
    }
}

/// `a` when `cond` holds, `b` otherwise.
///
/// Only the taken branch is evaluated. A constant condition discards the other branch at
/// construction.
pub fn select<T: Basal>(
    cond: impl Into<Node<bool>>,
    a: impl Into<Node<T>>,
    b: impl Into<Node<T>>,
) -> Node<T> {
    let cond = cond.into();
    match cond.constant_value() {
        Some(true) => a.into(),
        Some(false) => b.into(),
        None => Node::from_operation(Select {
            cond,
            a: a.into(),
            b: b.into(),
        }),
    }
}

/// Piecewise formuloid over ordered thresholds.
///
/// `join(f1, [(pos1, f2), (pos2, f3)])` is `f1` below `pos1`, `f2` below `pos2` and `f3`
/// above. Thresholds are expected in non-decreasing order but are not checked: with a smaller
/// threshold after a larger one, the segment between them never shows.
pub fn join<T: Basal>(
    first: impl Into<Node<T>>,
    rest: impl IntoIterator<Item = (f64, Node<T>)>,
) -> Node<T> {
    join_from(first.into(), &mut rest.into_iter())
}

fn join_from<T: Basal>(
    current: Node<T>,
    rest: &mut impl Iterator<Item = (f64, Node<T>)>,
) -> Node<T> {
    match rest.next() {
        None => current,
        Some((pos, next)) => select(id().lt(pos), current, join_from(next, rest)),
    }
}

impl<T: Basal> Node<T> {
    /// Switch from `self` to `next` once the parameter reaches `pos`.
    ///
    /// With `a <= b`, chaining `f.join(a, x).join(b, y)` matches [`join`]`(f, [(a, x), (b, y)])`.
    /// With `b < a`, the later call wins for every parameter at or above `b`.
    pub fn join(&self, pos: f64, next: impl Into<Node<T>>) -> Node<T> {
        select(id().lt(pos), self.clone(), next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/select.rs"]
mod tests;
