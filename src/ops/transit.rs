use crate::{
    easing::window::Easing,
    eval::context::Context,
    eval::node::{FormulaWriter, Node, Operation},
    foundation::error::FormuloidResult,
    ops::lambda::id,
    ops::select::select,
};

struct Transit {
    t0: Node<f64>,
    t1: Node<f64>,
    before: Node<f64>,
    after: Node<f64>,
    ease: Node<f64>,
}

impl Operation<f64> for Transit {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<f64> {
        let p = ctxt.read_param()?;
        let mut t0 = self.t0.eval(ctxt)?;
        let mut t1 = self.t1.eval(ctxt)?;

        // A reversed window runs the transition backwards.
        let inverted = t0 > t1;
        if inverted {
            std::mem::swap(&mut t0, &mut t1);
        }

        if p < t0 {
            return self.before.eval(ctxt);
        }
        let dt = t1 - t0;
        if p >= t1 || dt == 0.0 {
            return self.after.eval(ctxt);
        }

        let mut u = ((p - t0) / dt).clamp(0.0, 1.0);
        if inverted {
            u = 1.0 - u;
        }

        // `u` derives from values already accounted for in `ctxt`.
        let mut ease_ctxt = Context::with_param(u);
        let e = self.ease.eval(&mut ease_ctxt)?;
        ctxt.merge_without_param(&ease_ctxt);

        let (coef_before, coef_after) = if inverted { (e, 1.0 - e) } else { (1.0 - e, e) };

        let mut v = 0.0;
        if coef_before != 0.0 {
            v += coef_before * self.before.eval(ctxt)?;
        }
        if coef_after != 0.0 {
            v += coef_after * self.after.eval(ctxt)?;
        }
        Ok(v)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        w.call(
            "transit",
            &[&self.t0, &self.t1, &self.before, &self.after, &self.ease],
        );
    }
}

/// Blend from `before` to `after` over the parameter window `[t0, t1]`.
///
/// Below the window only `before` is evaluated, at or above it only `after`. Inside, the ease
/// curve is evaluated at the normalized position `u` in `[0, 1]` and the result is
/// `(1 - e) * before + e * after`, skipping any side whose coefficient is zero. A window given
/// as `t0 > t1` is swapped and the blend inverted; an empty window behaves like `after`.
pub fn transit(
    t0: impl Into<Node<f64>>,
    t1: impl Into<Node<f64>>,
    before: impl Into<Node<f64>>,
    after: impl Into<Node<f64>>,
    ease: impl Into<Node<f64>>,
) -> Node<f64> {
    Node::from_operation(Transit {
        t0: t0.into(),
        t1: t1.into(),
        before: before.into(),
        after: after.into(),
        ease: ease.into(),
    })
}

/// [`transit`] with a linear ease.
pub fn transit_linear(
    t0: impl Into<Node<f64>>,
    t1: impl Into<Node<f64>>,
    before: impl Into<Node<f64>>,
    after: impl Into<Node<f64>>,
) -> Node<f64> {
    transit(t0, t1, before, after, id())
}

/// Morph from `before` to `after` around parameter `t` following `easing`.
///
/// The transition spans `[t + easing.start, t + easing.end]`; a zero-width easing switches
/// abruptly at `t`.
pub fn morph(
    before: impl Into<Node<f64>>,
    t: f64,
    after: impl Into<Node<f64>>,
    easing: &Easing,
) -> Node<f64> {
    if easing.start == easing.end {
        return select(id().lt(t), before, after);
    }
    transit(
        t + easing.start,
        t + easing.end,
        before,
        after,
        easing.function.clone(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/ops/transit.rs"]
mod tests;
