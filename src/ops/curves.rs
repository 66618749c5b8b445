//! Reparameterization, interpolation, bezier curves and periodic waveforms.

use std::f64::consts::PI;

use crate::{
    eval::context::Context,
    eval::node::{FormulaWriter, Node, Operation},
    foundation::{basal::Basal, error::FormuloidResult},
    ops::lambda::{id, with_context},
    ops::select::select,
};

struct Apply<T: Basal> {
    f: Node<T>,
    p: Node<f64>,
}

impl<T: Basal> Operation<T> for Apply<T> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<T> {
        let mut param_ctxt = ctxt.derive();
        let p = self.p.eval(&mut param_ctxt)?;
        let mut inner = Context::with_param(p);
        let value = self.f.eval(&mut inner)?;
        ctxt.merge_other_param(&inner, &param_ctxt);
        if !inner.param_was_read() {
            // Bindings reached while computing `p` still count toward their frame.
            ctxt.merge_without_param(&param_ctxt);
        }
        Ok(value)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        w.call("->", &[&self.f, &self.p]);
    }
}

impl<T: Basal> Node<T> {
    /// Evaluate `self` with the value of `p` as parameter.
    ///
    /// `f.apply(id() * 2.0)` runs `f` twice as fast. Applying a constant returns it unchanged.
    pub fn apply(&self, p: impl Into<Node<f64>>) -> Node<T> {
        if self.is_pure_constant() {
            return self.clone();
        }
        Node::from_operation(Apply {
            f: self.clone(),
            p: p.into(),
        })
    }
}

fn lerp_values(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Linear interpolation between `a` and `b`.
///
/// Only `a` is evaluated when `t == 0` and only `b` when `t == 1`.
pub fn lerp(
    a: impl Into<Node<f64>>,
    b: impl Into<Node<f64>>,
    t: impl Into<Node<f64>>,
) -> Node<f64> {
    let (a, b, t) = (a.into(), b.into(), t.into());
    if let (Some(a), Some(b), Some(t)) = (a.constant_value(), b.constant_value(), t.constant_value())
    {
        return Node::constant(lerp_values(a, b, t));
    }
    with_context("lerp", [a, b, t], |ctxt: &mut Context, args: &[Node<f64>]| {
        let t = args[2].eval(ctxt)?;
        if t == 0.0 {
            return args[0].eval(ctxt);
        }
        if t == 1.0 {
            return args[1].eval(ctxt);
        }
        Ok(lerp_values(args[0].eval(ctxt)?, args[1].eval(ctxt)?, t))
    })
}

/// [`lerp`] with `t` clamped to `[0, 1]`.
pub fn clerp(
    a: impl Into<Node<f64>>,
    b: impl Into<Node<f64>>,
    t: impl Into<Node<f64>>,
) -> Node<f64> {
    let (a, b, t) = (a.into(), b.into(), t.into());
    if let Some(t) = t.constant_value() {
        if t <= 0.0 {
            return a;
        }
        if t >= 1.0 {
            return b;
        }
    }
    with_context("clerp", [a, b, t], |ctxt: &mut Context, args: &[Node<f64>]| {
        let t = args[2].eval(ctxt)?;
        if t <= 0.0 {
            return args[0].eval(ctxt);
        }
        if t >= 1.0 {
            return args[1].eval(ctxt);
        }
        Ok(lerp_values(args[0].eval(ctxt)?, args[1].eval(ctxt)?, t))
    })
}

fn bezier_quad_01(t: f64, p0: f64, p1: f64, p2: f64) -> f64 {
    let s = 1.0 - t;
    s * (p0 + t * (2.0 * p1 - p0)) + t * t * p2
}

fn bezier_cubic_01(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let s = 1.0 - t;
    s * s * (s * p0 + t * 3.0 * p1) + t * t * (s * 3.0 * p2 + t * p3)
}

/// Evaluate the control points at `t` and run `curve` on the normalized position.
///
/// `args` is `[start, end, p0, .., pn, t]`. Control points see `t` as their parameter; their
/// parameter use is already covered by the evaluation of `t` itself.
fn bezier_eval(
    ctxt: &mut Context,
    args: &[Node<f64>],
    curve: fn(f64, &[f64]) -> f64,
) -> FormuloidResult<f64> {
    let (bounds, rest) = args.split_at(2);
    let (points, t_node) = rest.split_at(rest.len() - 1);
    let t = t_node[0].eval(ctxt)?;
    let mut point_ctxt = Context::with_param(t);

    let start = bounds[0].eval(ctxt)?;
    let result = if t <= start {
        points[0].eval(&mut point_ctxt)?
    } else {
        let end = bounds[1].eval(ctxt)?;
        if t >= end {
            points[points.len() - 1].eval(&mut point_ctxt)?
        } else {
            let values = points
                .iter()
                .map(|p| p.eval(&mut point_ctxt))
                .collect::<FormuloidResult<Vec<_>>>()?;
            curve((t - start) / (end - start), &values)
        }
    };

    ctxt.merge_without_param(&point_ctxt);
    Ok(result)
}

/// Quadratic bezier from `p0` at `t0` to `p2` at `t2` with control point `p1`, driven by `t`.
pub fn bezier_quad(
    t0: impl Into<Node<f64>>,
    t2: impl Into<Node<f64>>,
    p0: impl Into<Node<f64>>,
    p1: impl Into<Node<f64>>,
    p2: impl Into<Node<f64>>,
    t: impl Into<Node<f64>>,
) -> Node<f64> {
    let args = [t0.into(), t2.into(), p0.into(), p1.into(), p2.into(), t.into()];
    with_context("bezier_quad", args, |ctxt: &mut Context, args: &[Node<f64>]| {
        bezier_eval(ctxt, args, |u, p| bezier_quad_01(u, p[0], p[1], p[2]))
    })
}

/// Cubic bezier from `p0` at `t0` to `p3` at `t3` with control points `p1` and `p2`.
#[allow(clippy::too_many_arguments)]
pub fn bezier_cubic(
    t0: impl Into<Node<f64>>,
    t3: impl Into<Node<f64>>,
    p0: impl Into<Node<f64>>,
    p1: impl Into<Node<f64>>,
    p2: impl Into<Node<f64>>,
    p3: impl Into<Node<f64>>,
    t: impl Into<Node<f64>>,
) -> Node<f64> {
    let args = [
        t0.into(),
        t3.into(),
        p0.into(),
        p1.into(),
        p2.into(),
        p3.into(),
        t.into(),
    ];
    with_context("bezier_cubic", args, |ctxt: &mut Context, args: &[Node<f64>]| {
        bezier_eval(ctxt, args, |u, p| bezier_cubic_01(u, p[0], p[1], p[2], p[3]))
    })
}

/// Sine wave in `[0, 1]` with half-period `t2 - t1`: `0` at `t1`, `1` at `t2`.
pub fn sine_wave(t1: f64, t2: f64) -> Node<f64> {
    sine_wave_at(t1, t2, id())
}

/// [`sine_wave`] driven by `t` instead of the parameter.
pub fn sine_wave_at(t1: f64, t2: f64, t: impl Into<Node<f64>>) -> Node<f64> {
    let t: Node<f64> = t.into();
    0.5 * (((t - t2) * (PI / (t2 - t1))).cos() + 1.0)
}

/// Interpolate from `f1` to `f2` following [`sine_wave`]`(t1, t2)`.
pub fn sine_wave_between(
    t1: f64,
    f1: impl Into<Node<f64>>,
    t2: f64,
    f2: impl Into<Node<f64>>,
) -> Node<f64> {
    lerp(f1, f2, sine_wave(t1, t2))
}

/// Square wave with half-period `|t2 - t1|`: `0` on `[t1, t1 + p)`, `1` on `[t1 - p, t1)`.
pub fn square_wave(t1: f64, t2: f64) -> Node<f64> {
    square_wave_at(t1, t2, id())
}

/// [`square_wave`] driven by `t` instead of the parameter.
pub fn square_wave_at(t1: f64, t2: f64, t: impl Into<Node<f64>>) -> Node<f64> {
    let t: Node<f64> = t.into();
    let p = (t2 - t1).abs();
    let phase = ((t - t1) / p).floor_fmod(2.0);
    select(phase.lt(1.0), 0.0, 1.0)
}

/// Sawtooth wave with period `|t2 - t1|`, rising from `0` at `t1` towards `1`.
pub fn sawtooth_wave(t1: f64, t2: f64) -> Node<f64> {
    sawtooth_wave_at(t1, t2, id())
}

/// [`sawtooth_wave`] driven by `t` instead of the parameter.
pub fn sawtooth_wave_at(t1: f64, t2: f64, t: impl Into<Node<f64>>) -> Node<f64> {
    let t: Node<f64> = t.into();
    ((t - t1) / (t2 - t1).abs()).floor_dist()
}

#[cfg(test)]
#[path = "../../tests/unit/ops/curves.rs"]
mod tests;
