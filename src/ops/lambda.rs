//! User-extensible operations built from closures.
//!
//! Three schemes are offered:
//! - value scheme (`map1`..`map3`): the closure sees child values only;
//! - parameter scheme (`map_param0`..`map_param2`): the closure also sees the parameter;
//! - context scheme (`with_context`): the closure drives evaluation of its children itself.
//!
//! The built-in operators reuse the value scheme with fixed names.

use std::borrow::Cow;

use crate::{
    eval::context::Context,
    eval::node::{Formula, FormulaWriter, Node, Operation},
    foundation::{basal::Basal, error::FormuloidResult},
};

type Name = Cow<'static, str>;

type Fn1<A, R> = Box<dyn Fn(A) -> FormuloidResult<R>>;
type Fn2<A, B, R> = Box<dyn Fn(A, B) -> FormuloidResult<R>>;
type Fn3<A, B, C, R> = Box<dyn Fn(A, B, C) -> FormuloidResult<R>>;

fn write_named(w: &mut FormulaWriter, name: &str, args: &[&dyn Formula]) {
    if args.is_empty() && name.starts_with('@') {
        w.push_str(name);
    } else {
        w.call(name, args);
    }
}

struct Map1<A: Basal, R> {
    name: Name,
    a: Node<A>,
    f: Fn1<A, R>,
}

impl<A: Basal, R: Basal> Operation<R> for Map1<A, R> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<R> {
        let a = self.a.eval(ctxt)?;
        (self.f)(a)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        write_named(w, &self.name, &[&self.a]);
    }
}

struct Map2<A: Basal, B: Basal, R> {
    name: Name,
    a: Node<A>,
    b: Node<B>,
    f: Fn2<A, B, R>,
}

impl<A: Basal, B: Basal, R: Basal> Operation<R> for Map2<A, B, R> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<R> {
        let a = self.a.eval(ctxt)?;
        let b = self.b.eval(ctxt)?;
        (self.f)(a, b)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        write_named(w, &self.name, &[&self.a, &self.b]);
    }
}

struct Map3<A: Basal, B: Basal, C: Basal, R> {
    name: Name,
    a: Node<A>,
    b: Node<B>,
    c: Node<C>,
    f: Fn3<A, B, C, R>,
}

impl<A: Basal, B: Basal, C: Basal, R: Basal> Operation<R> for Map3<A, B, C, R> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<R> {
        let a = self.a.eval(ctxt)?;
        let b = self.b.eval(ctxt)?;
        let c = self.c.eval(ctxt)?;
        (self.f)(a, b, c)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        write_named(w, &self.name, &[&self.a, &self.b, &self.c]);
    }
}

/// Value-scheme node with one child, folded at construction when the child is constant.
///
/// A constant input whose computation fails is kept as an operation so the error surfaces at
/// evaluation time.
pub(crate) fn unary<A, R>(
    name: impl Into<Name>,
    a: Node<A>,
    f: impl Fn(A) -> FormuloidResult<R> + 'static,
) -> Node<R>
where
    A: Basal,
    R: Basal,
{
    if let Some(va) = a.constant_value() {
        if let Ok(v) = f(va) {
            return Node::constant(v);
        }
    }
    Node::from_operation(Map1 {
        name: name.into(),
        a,
        f: Box::new(f),
    })
}

/// Two-child counterpart of [`unary`].
pub(crate) fn binary<A, B, R>(
    name: impl Into<Name>,
    a: Node<A>,
    b: Node<B>,
    f: impl Fn(A, B) -> FormuloidResult<R> + 'static,
) -> Node<R>
where
    A: Basal,
    B: Basal,
    R: Basal,
{
    if let (Some(va), Some(vb)) = (a.constant_value(), b.constant_value()) {
        if let Ok(v) = f(va, vb) {
            return Node::constant(v);
        }
    }
    Node::from_operation(Map2 {
        name: name.into(),
        a,
        b,
        f: Box::new(f),
    })
}

/// Three-child counterpart of [`unary`].
pub(crate) fn ternary<A, B, C, R>(
    name: impl Into<Name>,
    a: Node<A>,
    b: Node<B>,
    c: Node<C>,
    f: impl Fn(A, B, C) -> FormuloidResult<R> + 'static,
) -> Node<R>
where
    A: Basal,
    B: Basal,
    C: Basal,
    R: Basal,
{
    if let (Some(va), Some(vb), Some(vc)) =
        (a.constant_value(), b.constant_value(), c.constant_value())
    {
        if let Ok(v) = f(va, vb, vc) {
            return Node::constant(v);
        }
    }
    Node::from_operation(Map3 {
        name: name.into(),
        a,
        b,
        c,
        f: Box::new(f),
    })
}

/// Apply `f` to the value of `a`.
pub fn map1<A, R>(
    name: impl Into<Cow<'static, str>>,
    a: impl Into<Node<A>>,
    f: impl Fn(A) -> R + 'static,
) -> Node<R>
where
    A: Basal,
    R: Basal,
{
    unary(name, a.into(), move |a| Ok(f(a)))
}

/// Apply `f` to the values of `a` and `b`.
pub fn map2<A, B, R>(
    name: impl Into<Cow<'static, str>>,
    a: impl Into<Node<A>>,
    b: impl Into<Node<B>>,
    f: impl Fn(A, B) -> R + 'static,
) -> Node<R>
where
    A: Basal,
    B: Basal,
    R: Basal,
{
    binary(name, a.into(), b.into(), move |a, b| Ok(f(a, b)))
}

/// Apply `f` to the values of `a`, `b` and `c`.
pub fn map3<A, B, C, R>(
    name: impl Into<Cow<'static, str>>,
    a: impl Into<Node<A>>,
    b: impl Into<Node<B>>,
    c: impl Into<Node<C>>,
    f: impl Fn(A, B, C) -> R + 'static,
) -> Node<R>
where
    A: Basal,
    B: Basal,
    C: Basal,
    R: Basal,
{
    ternary(name, a.into(), b.into(), c.into(), move |a, b, c| Ok(f(a, b, c)))
}

struct MapParam0<R> {
    name: Name,
    f: Box<dyn Fn(f64) -> R>,
}

impl<R: Basal> Operation<R> for MapParam0<R> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<R> {
        let p = ctxt.read_param()?;
        Ok((self.f)(p))
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        write_named(w, &self.name, &[]);
    }
}

struct MapParam1<A: Basal, R> {
    name: Name,
    a: Node<A>,
    f: Box<dyn Fn(f64, A) -> R>,
}

impl<A: Basal, R: Basal> Operation<R> for MapParam1<A, R> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<R> {
        let p = ctxt.read_param()?;
        let a = self.a.eval(ctxt)?;
        Ok((self.f)(p, a))
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        write_named(w, &self.name, &[&self.a]);
    }
}

struct MapParam2<A: Basal, B: Basal, R> {
    name: Name,
    a: Node<A>,
    b: Node<B>,
    f: Box<dyn Fn(f64, A, B) -> R>,
}

impl<A: Basal, B: Basal, R: Basal> Operation<R> for MapParam2<A, B, R> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<R> {
        let p = ctxt.read_param()?;
        let a = self.a.eval(ctxt)?;
        let b = self.b.eval(ctxt)?;
        Ok((self.f)(p, a, b))
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        write_named(w, &self.name, &[&self.a, &self.b]);
    }
}

/// Parameter-dependent node computing `f(p)`.
///
/// Names starting with `@` print bare, e.g. `@` for [`id`].
pub fn map_param0<R: Basal>(
    name: impl Into<Cow<'static, str>>,
    f: impl Fn(f64) -> R + 'static,
) -> Node<R> {
    Node::from_operation(MapParam0 {
        name: name.into(),
        f: Box::new(f),
    })
}

/// Parameter-dependent node computing `f(p, a)`.
pub fn map_param1<A, R>(
    name: impl Into<Cow<'static, str>>,
    a: impl Into<Node<A>>,
    f: impl Fn(f64, A) -> R + 'static,
) -> Node<R>
where
    A: Basal,
    R: Basal,
{
    Node::from_operation(MapParam1 {
        name: name.into(),
        a: a.into(),
        f: Box::new(f),
    })
}

/// Parameter-dependent node computing `f(p, a, b)`.
pub fn map_param2<A, B, R>(
    name: impl Into<Cow<'static, str>>,
    a: impl Into<Node<A>>,
    b: impl Into<Node<B>>,
    f: impl Fn(f64, A, B) -> R + 'static,
) -> Node<R>
where
    A: Basal,
    B: Basal,
    R: Basal,
{
    Node::from_operation(MapParam2 {
        name: name.into(),
        a: a.into(),
        b: b.into(),
        f: Box::new(f),
    })
}

/// The identity formuloid: evaluates to the parameter itself.
pub fn id() -> Node<f64> {
    map_param0("@", |p| p)
}

type ContextFn<A, R> = Box<dyn Fn(&mut Context, &[Node<A>]) -> FormuloidResult<R>>;

struct WithContext<A: Basal, R> {
    name: Name,
    args: Vec<Node<A>>,
    f: ContextFn<A, R>,
}

impl<A: Basal, R: Basal> Operation<R> for WithContext<A, R> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<R> {
        (self.f)(ctxt, &self.args)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        let args: Vec<&dyn Formula> = self.args.iter().map(|a| a as &dyn Formula).collect();
        write_named(w, &self.name, &args);
    }
}

/// Context-scheme node: `f` receives the evaluation context and the children.
///
/// `f` decides which children to evaluate and with which context; it must merge every nested
/// context it creates back into the one it receives.
pub fn with_context<A, R>(
    name: impl Into<Cow<'static, str>>,
    args: impl IntoIterator<Item = Node<A>>,
    f: impl Fn(&mut Context, &[Node<A>]) -> FormuloidResult<R> + 'static,
) -> Node<R>
where
    A: Basal,
    R: Basal,
{
    Node::from_operation(WithContext {
        name: name.into(),
        args: args.into_iter().collect(),
        f: Box::new(f),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/ops/lambda.rs"]
mod tests;
