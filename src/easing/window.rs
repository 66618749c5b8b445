use std::ops::{Div, Mul};

use crate::{easing::catalog::EaseKind, eval::node::Node};

/// How to perform a transition between two formuloids around an arbitrary point `t`.
///
/// `function` maps `[0, 1]` onto `[0, 1]`; the transition spans `[t + start, t + end]`.
#[derive(Clone, Debug)]
pub struct Easing {
    /// Transition curve over `[0, 1]`.
    pub function: Node<f64>,
    /// Start offset relative to the transition point.
    pub start: f64,
    /// End offset relative to the transition point.
    pub end: f64,
}

impl Easing {
    /// Easing over the centered window `[-0.5, 0.5]`.
    pub fn new(function: impl Into<Node<f64>>) -> Self {
        Self::with_window(function, -0.5, 0.5)
    }

    /// Easing over `[start, end]`.
    pub fn with_window(function: impl Into<Node<f64>>, start: f64, end: f64) -> Self {
        Self {
            function: function.into(),
            start,
            end,
        }
    }

    /// Width of the window.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Same window shifted to `[0, duration]`.
    pub fn after(&self) -> Self {
        self.shifted(0.0, self.duration())
    }

    /// Same window shifted to `[-duration, 0]`.
    pub fn before(&self) -> Self {
        self.shifted(-self.duration(), 0.0)
    }

    /// Same window centered on `0`.
    pub fn center(&self) -> Self {
        let half = self.duration() * 0.5;
        self.shifted(-half, half)
    }

    /// Window with both offsets multiplied by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        self.shifted(self.start * factor, self.end * factor)
    }

    /// Window scaled to the given duration.
    ///
    /// An empty window cannot be scaled and grows by `length / 2` on both sides instead.
    pub fn resize(&self, length: f64) -> Self {
        let d = self.duration();
        if d == 0.0 {
            return self.shifted(self.start - length / 2.0, self.end + length / 2.0);
        }
        self.scale(length / d)
    }

    fn shifted(&self, start: f64, end: f64) -> Self {
        Self::with_window(self.function.clone(), start, end)
    }
}

impl Default for Easing {
    fn default() -> Self {
        EaseKind::default().easing()
    }
}

impl Mul<f64> for &Easing {
    type Output = Easing;

    fn mul(self, factor: f64) -> Easing {
        self.scale(factor)
    }
}

impl Mul<f64> for Easing {
    type Output = Easing;

    fn mul(self, factor: f64) -> Easing {
        self.scale(factor)
    }
}

impl Div<f64> for &Easing {
    type Output = Easing;

    fn div(self, factor: f64) -> Easing {
        self.scale(1.0 / factor)
    }
}

impl Div<f64> for Easing {
    type Output = Easing;

    fn div(self, factor: f64) -> Easing {
        self.scale(1.0 / factor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/easing/window.rs"]
mod tests;
