//! Formuloid builds and evaluates expression graphs over a single `f64` parameter.
//!
//! A [`Node<T>`] is a function of the parameter producing a basal value (`f64`, `i32`,
//! `bool`, `String`, ...). Nodes are combined with operators, math functions and
//! combinators such as [`select`], [`transit`] or [`morph`], then evaluated at any parameter
//! with [`evaluate`]:
//!
//! ```
//! use formuloid::{evaluate, id, select};
//!
//! let f = select(id().lt(0.0), -id(), id() * 2.0);
//! assert_eq!(evaluate(&f, -3.0).unwrap(), 3.0);
//! assert_eq!(evaluate(&f, 3.0).unwrap(), 6.0);
//! ```
//!
//! Subexpressions that turn out not to depend on the parameter are folded into constants the
//! first time they are evaluated. Parameter-dependent subexpressions used in several places
//! can be shared within one evaluation through a [`FrameBuilder`] and [`let_`].
//!
//! Nodes use single-threaded shared ownership and are neither `Send` nor `Sync`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod easing;
pub(crate) mod eval;
mod foundation;
pub(crate) mod ops;
pub(crate) mod pretty;
pub(crate) mod scope;

pub use crate::foundation::basal::Basal;
pub use crate::foundation::error::{FormuloidError, FormuloidResult};

pub use crate::eval::context::Context;
pub use crate::eval::node::{
    Formula, FormulaWriter, Node, Operation, evaluate, evaluate_unoptimized,
};

pub use crate::ops::curves::{
    bezier_cubic, bezier_quad, clerp, lerp, sawtooth_wave, sawtooth_wave_at, sine_wave,
    sine_wave_at, sine_wave_between, square_wave, square_wave_at,
};
pub use crate::ops::lambda::{
    id, map_param0, map_param1, map_param2, map1, map2, map3, with_context,
};
pub use crate::ops::math::{CastTo, Numeric, clamp, max, mean, middle, min, product, sum};
pub use crate::ops::select::{join, select};
pub use crate::ops::transit::{morph, transit, transit_linear};

pub use crate::easing::catalog::EaseKind;
pub use crate::easing::window::Easing;
pub use crate::pretty::layout::{PrettyOpts, pretty, pretty_with};
pub use crate::scope::frame::{FrameBuilder, let_};
