//! Named easing curves.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]` (the "back" curves overshoot on the way) and comes
//! with the centered window `[-0.5, 0.5]`, except [`EaseKind::None`] which switches instantly.
//! "Out" curves are `1 - in(1 - u)`; "in-out" curves run the "in" curve twice as fast on
//! `[0, 0.5)` and its mirrored complement on `[0.5, 1]`.

use std::f64::consts::PI;

use crate::{
    easing::window::Easing,
    eval::node::Node,
    ops::lambda::id,
    ops::select::{join, select},
};

/// Catalog of standard easing curves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EaseKind {
    /// Instant switch.
    None,
    /// Constant speed.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    #[default]
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in.
    InQuart,
    /// Quartic ease-out.
    OutQuart,
    /// Quartic ease-in/out.
    InOutQuart,
    /// Quintic ease-in.
    InQuint,
    /// Quintic ease-out.
    OutQuint,
    /// Quintic ease-in/out.
    InOutQuint,
    /// Quarter sine ease-in.
    InSine,
    /// Quarter sine ease-out.
    OutSine,
    /// Half cosine ease-in/out.
    InOutSine,
    /// Bouncing ease-in.
    InBounce,
    /// Bouncing ease-out.
    OutBounce,
    /// Bouncing ease-in/out.
    InOutBounce,
    /// Slight backwards overshoot, ease-in.
    InBack05,
    /// Slight backwards overshoot, ease-out.
    OutBack05,
    /// Slight backwards overshoot, ease-in/out.
    InOutBack05,
    /// Moderate backwards overshoot, ease-in.
    InBack10,
    /// Moderate backwards overshoot, ease-out.
    OutBack10,
    /// Moderate backwards overshoot, ease-in/out.
    InOutBack10,
    /// Strong backwards overshoot, ease-in.
    InBack20,
    /// Strong backwards overshoot, ease-out.
    OutBack20,
    /// Strong backwards overshoot, ease-in/out.
    InOutBack20,
    /// Strongest backwards overshoot, ease-in.
    InBack30,
    /// Strongest backwards overshoot, ease-out.
    OutBack30,
    /// Strongest backwards overshoot, ease-in/out.
    InOutBack30,
}

#[derive(Clone, Copy)]
enum Shape {
    Power(f64),
    Sine,
    Bounce,
    Back(f64),
}

#[derive(Clone, Copy)]
enum Mode {
    In,
    Out,
    InOut,
}

impl EaseKind {
    /// Every curve of the catalog.
    pub const ALL: [EaseKind; 32] = [
        Self::None,
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InBounce,
        Self::OutBounce,
        Self::InOutBounce,
        Self::InBack05,
        Self::OutBack05,
        Self::InOutBack05,
        Self::InBack10,
        Self::OutBack10,
        Self::InOutBack10,
        Self::InBack20,
        Self::OutBack20,
        Self::InOutBack20,
        Self::InBack30,
        Self::OutBack30,
        Self::InOutBack30,
    ];

    /// The easing with this curve and its conventional window.
    pub fn easing(self) -> Easing {
        match self {
            Self::None => Easing::with_window(id(), 0.0, 0.0),
            _ => Easing::new(self.function()),
        }
    }

    /// The curve alone, as a formuloid of `u` in `[0, 1]`.
    pub fn function(self) -> Node<f64> {
        match self.shape() {
            None => id(),
            Some((shape, mode)) => curve(shape, mode),
        }
    }

    fn shape(self) -> Option<(Shape, Mode)> {
        use Mode::{In, InOut, Out};
        let shape = match self {
            Self::None | Self::Linear => return None,
            Self::InQuad => (Shape::Power(2.0), In),
            Self::OutQuad => (Shape::Power(2.0), Out),
            Self::InOutQuad => (Shape::Power(2.0), InOut),
            Self::InCubic => (Shape::Power(3.0), In),
            Self::OutCubic => (Shape::Power(3.0), Out),
            Self::InOutCubic => (Shape::Power(3.0), InOut),
            Self::InQuart => (Shape::Power(4.0), In),
            Self::OutQuart => (Shape::Power(4.0), Out),
            Self::InOutQuart => (Shape::Power(4.0), InOut),
            Self::InQuint => (Shape::Power(5.0), In),
            Self::OutQuint => (Shape::Power(5.0), Out),
            Self::InOutQuint => (Shape::Power(5.0), InOut),
            Self::InSine => (Shape::Sine, In),
            Self::OutSine => (Shape::Sine, Out),
            Self::InOutSine => (Shape::Sine, InOut),
            Self::InBounce => (Shape::Bounce, In),
            Self::OutBounce => (Shape::Bounce, Out),
            Self::InOutBounce => (Shape::Bounce, InOut),
            Self::InBack05 => (Shape::Back(0.5), In),
            Self::OutBack05 => (Shape::Back(0.5), Out),
            Self::InOutBack05 => (Shape::Back(0.5), InOut),
            Self::InBack10 => (Shape::Back(0.7), In),
            Self::OutBack10 => (Shape::Back(0.7), Out),
            Self::InOutBack10 => (Shape::Back(0.7), InOut),
            Self::InBack20 => (Shape::Back(0.9), In),
            Self::OutBack20 => (Shape::Back(0.9), Out),
            Self::InOutBack20 => (Shape::Back(0.9), InOut),
            Self::InBack30 => (Shape::Back(1.1), In),
            Self::OutBack30 => (Shape::Back(1.1), Out),
            Self::InOutBack30 => (Shape::Back(1.1), InOut),
        };
        Some(shape)
    }
}

fn curve(shape: Shape, mode: Mode) -> Node<f64> {
    match (shape, mode) {
        (Shape::Power(p), Mode::In) => id().pow(p),
        (Shape::Power(p), Mode::Out) => 1.0 - (1.0 - id()).pow(p),
        (Shape::Power(p), Mode::InOut) => {
            let k = 2f64.powf(p - 1.0);
            select(
                id().lt(0.5),
                k * id().pow(p),
                1.0 - k * (1.0 - id()).pow(p),
            )
        }
        (Shape::Sine, Mode::In) => ((id() - 1.0) * (PI / 2.0)).sin() + 1.0,
        (Shape::Sine, Mode::Out) => (id() * (PI / 2.0)).sin(),
        (Shape::Sine, Mode::InOut) => 0.5 * (1.0 - (id() * PI).cos()),
        // The bounce is naturally written as an ease-out.
        (Shape::Bounce, Mode::Out) => bounce_out(),
        (Shape::Bounce, Mode::In) => mirror(&bounce_out()),
        (Shape::Bounce, Mode::InOut) => in_out(&mirror(&bounce_out())),
        (Shape::Back(k), Mode::In) => back_in(k),
        (Shape::Back(k), Mode::Out) => mirror(&back_in(k)),
        (Shape::Back(k), Mode::InOut) => in_out(&back_in(k)),
    }
}

/// `1 - f(1 - u)`.
fn mirror(f: &Node<f64>) -> Node<f64> {
    1.0 - f.apply(1.0 - id())
}

fn in_out(ease_in: &Node<f64>) -> Node<f64> {
    join(
        ease_in.apply(2.0 * id()) * 0.5,
        [(0.5, 0.5 * (1.0 - ease_in.apply(2.0 - 2.0 * id())) + 0.5)],
    )
}

fn back_in(k: f64) -> Node<f64> {
    let u = id();
    &u * &u - &u * (&u * PI).sin() * k
}

fn bounce_out() -> Node<f64> {
    let u = id();
    let sq = &u * &u;
    join(
        121.0 * &sq / 16.0,
        [
            (
                4.0 / 11.0,
                363.0 / 40.0 * &sq - 99.0 / 10.0 * &u + 17.0 / 5.0,
            ),
            (
                8.0 / 11.0,
                4356.0 / 361.0 * &sq - 35442.0 / 1805.0 * &u + 16061.0 / 1805.0,
            ),
            (
                9.0 / 10.0,
                54.0 / 5.0 * &sq - 513.0 / 25.0 * &u + 268.0 / 25.0,
            ),
        ],
    )
}

#[cfg(test)]
#[path = "../../tests/unit/easing/catalog.rs"]
mod tests;
