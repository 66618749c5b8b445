use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{
    eval::context::Context,
    foundation::{basal::Basal, error::FormuloidResult},
};

/// A typed unit of a formuloid graph.
///
/// Implementations own their child nodes and must merge every nested evaluation back into
/// `ctxt` with the appropriate [`Context`] merge rule.
pub trait Operation<T: Basal> {
    /// Compute the value of this operation.
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<T>;

    /// Append the prefix-notation formula of this operation.
    fn write_formula(&self, w: &mut FormulaWriter);
}

/// Anything that can print itself into a formula.
///
/// Implemented by every [`Node`], whatever its value type, so operations can print
/// heterogeneous children through [`FormulaWriter::call`].
pub trait Formula {
    /// Append the formula text of `self`.
    fn write_formula(&self, w: &mut FormulaWriter);
}

/// Output sink for one formula rendering pass.
///
/// Frame identifiers are allocated from the writer, so two renderings of the same graph
/// produce the same text.
#[derive(Debug, Default)]
pub struct FormulaWriter {
    out: String,
    next_frame_id: usize,
}

impl FormulaWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw text.
    pub fn push_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Append one character.
    pub fn push(&mut self, c: char) {
        self.out.push(c);
    }

    /// Append the basal text of a constant.
    pub fn basal<T: Basal>(&mut self, v: &T) {
        v.write_basal(&mut self.out);
    }

    /// Write `(name arg1 arg2 ...)`.
    pub fn call(&mut self, name: &str, args: &[&dyn Formula]) {
        self.out.push('(');
        self.out.push_str(name);
        for arg in args {
            self.out.push(' ');
            arg.write_formula(self);
        }
        self.out.push(')');
    }

    /// Allocate the next frame identifier of this rendering pass (starting at 1).
    pub fn next_frame_id(&mut self) -> usize {
        self.next_frame_id += 1;
        self.next_frame_id
    }

    /// Consume the writer and return the formula text.
    pub fn finish(self) -> String {
        self.out
    }
}

enum NodeState<T: Basal> {
    Value(T),
    Op(Rc<dyn Operation<T>>),
}

impl<T: Basal> Clone for NodeState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(v) => Self::Value(v.clone()),
            Self::Op(op) => Self::Op(Rc::clone(op)),
        }
    }
}

/// Handle to either a constant or a shared [`Operation`].
///
/// A node rewrites itself into a constant the first time an evaluation proves that its result
/// can never change. Cloning a node shares the operation but not this rewrite: each handle folds
/// on its own.
///
/// Nodes are neither `Send` nor `Sync`; a graph is evaluated by one caller at a time.
pub struct Node<T: Basal> {
    state: RefCell<NodeState<T>>,
}

impl<T: Basal> Node<T> {
    /// Build a pure-constant node.
    pub fn constant(value: T) -> Self {
        Self {
            state: RefCell::new(NodeState::Value(value)),
        }
    }

    /// Build a node backed by `op`.
    pub fn from_operation(op: impl Operation<T> + 'static) -> Self {
        Self::from_shared(Rc::new(op))
    }

    /// Build a node sharing an already allocated operation.
    pub fn from_shared(op: Rc<dyn Operation<T>>) -> Self {
        Self {
            state: RefCell::new(NodeState::Op(op)),
        }
    }

    /// True when the node holds a value rather than an operation.
    pub fn is_pure_constant(&self) -> bool {
        matches!(&*self.state.borrow(), NodeState::Value(_))
    }

    /// The held value if the node is a pure constant.
    pub fn constant_value(&self) -> Option<T> {
        match &*self.state.borrow() {
            NodeState::Value(v) => Some(v.clone()),
            NodeState::Op(_) => None,
        }
    }

    /// Evaluate with constant folding enabled.
    pub fn eval(&self, ctxt: &mut Context) -> FormuloidResult<T> {
        self.eval_with(ctxt, true)
    }

    /// Evaluate this node in `ctxt`.
    ///
    /// With `optimize`, a result that neither read the parameter nor saw a mutable event
    /// replaces the operation for good.
    pub fn eval_with(&self, ctxt: &mut Context, optimize: bool) -> FormuloidResult<T> {
        let op = match &*self.state.borrow() {
            NodeState::Value(v) => return Ok(v.clone()),
            NodeState::Op(op) => Rc::clone(op),
        };

        let mut sub = ctxt.derive();
        let value = op.evaluate(&mut sub)?;
        ctxt.merge_same_param(&sub);

        if optimize && sub.is_invariant() {
            tracing::trace!(value = ?value, "folding node into constant");
            *self.state.borrow_mut() = NodeState::Value(value.clone());
        }
        Ok(value)
    }

    /// Render the prefix-notation formula of this node.
    pub fn formula(&self) -> String {
        let mut w = FormulaWriter::new();
        Formula::write_formula(self, &mut w);
        w.finish()
    }

    /// Render the formula and re-layout it with the default pretty-printer options.
    pub fn pretty(&self) -> String {
        crate::pretty::layout::pretty(&self.formula())
    }
}

impl<T: Basal> Formula for Node<T> {
    fn write_formula(&self, w: &mut FormulaWriter) {
        match &*self.state.borrow() {
            NodeState::Value(v) => w.basal(v),
            NodeState::Op(op) => op.write_formula(w),
        }
    }
}

impl<T: Basal> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            state: RefCell::new(self.state.borrow().clone()),
        }
    }
}

impl<T: Basal> Default for Node<T> {
    fn default() -> Self {
        Self::constant(T::default())
    }
}

impl<T: Basal> From<T> for Node<T> {
    fn from(value: T) -> Self {
        Self::constant(value)
    }
}

impl<T: Basal> From<&Node<T>> for Node<T> {
    fn from(node: &Node<T>) -> Self {
        node.clone()
    }
}

impl<T: Basal> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Node").field(&self.formula()).finish()
    }
}

impl<T: Basal> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

/// Evaluate `f` at parameter `p`.
#[tracing::instrument(level = "trace", skip(f))]
pub fn evaluate<T: Basal>(f: &Node<T>, p: f64) -> FormuloidResult<T> {
    let mut ctxt = Context::with_param(p);
    f.eval(&mut ctxt)
}

/// Evaluate `f` at parameter `p` without folding the root node.
///
/// Nested nodes still fold as usual; this only keeps the root handle unchanged, which is useful
/// when inspecting a graph's formula before and after evaluation.
pub fn evaluate_unoptimized<T: Basal>(f: &Node<T>, p: f64) -> FormuloidResult<T> {
    let mut ctxt = Context::with_param(p);
    f.eval_with(&mut ctxt, false)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/node.rs"]
mod tests;
