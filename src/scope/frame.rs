//! Explicit once-per-evaluation reuse of shared subexpressions.
//!
//! Constant folding only caches parameter-free results. A parameter-dependent subexpression
//! used in several places is recomputed at each use unless it is bound in a frame:
//!
//! ```
//! use formuloid::{FrameBuilder, id, let_, evaluate};
//!
//! let fb = FrameBuilder::new();
//! let s = fb.bind("s", id().sin());
//! let f = let_(fb, &s * &s + &s);
//! let v = 0.5f64.sin();
//! assert_eq!(evaluate(&f, 0.5).unwrap(), v * v + v);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::{
    eval::context::Context,
    eval::node::{Formula, FormulaWriter, Node, Operation},
    foundation::{
        basal::Basal,
        error::{FormuloidError, FormuloidResult},
    },
};

/// Printing side of a binding, independent of its value type.
trait BindingDef {
    fn write_definition(&self, w: &mut FormulaWriter);
}

/// Scope shared by one `Let` and its bindings.
///
/// While open, `active` accumulates the evaluations of binding children; it is merged into
/// the Let context on close.
#[derive(Default)]
struct Frame {
    timestamp: Cell<u64>,
    active: Cell<Option<Context>>,
    mutable_count: Cell<usize>,
    bindings: RefCell<Vec<Rc<dyn BindingDef>>>,
    print_id: Cell<usize>,
}

impl Frame {
    fn open(&self, ctxt: &Context) -> FormuloidResult<()> {
        if self.active.get().is_some() {
            return Err(FormuloidError::frame("frame opened twice"));
        }
        self.timestamp.set(self.timestamp.get().wrapping_add(1));
        self.active.set(Some(ctxt.derive()));
        self.mutable_count.set(0);
        Ok(())
    }

    fn close(&self, ctxt: &mut Context) -> FormuloidResult<()> {
        if let Some(active) = self.active.take() {
            ctxt.merge_same_param(&active);
        }
        ctxt.discard_mutable_events(self.mutable_count.replace(0))
    }

    fn record_mutable_event(&self) {
        self.mutable_count.set(self.mutable_count.get() + 1);
    }
}

struct Binding<T: Basal> {
    name: String,
    frame: Weak<Frame>,
    child: Node<T>,
    cache: RefCell<Option<(u64, T)>>,
}

impl<T: Basal> Binding<T> {
    fn write_name(&self, w: &mut FormulaWriter) {
        w.push_str(&self.name);
        w.push('_');
        match self.frame.upgrade() {
            Some(frame) => w.push_str(&frame.print_id.get().to_string()),
            None => w.push('?'),
        }
    }
}

impl<T: Basal> Operation<T> for Binding<T> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<T> {
        let frame = self.frame.upgrade().ok_or_else(|| {
            FormuloidError::frame(format!("binding `{}` outlived its frame", self.name))
        })?;
        let Some(active) = frame.active.get() else {
            return Err(FormuloidError::frame(format!(
                "binding `{}` evaluated outside of its let",
                self.name
            )));
        };

        let stamp = frame.timestamp.get();
        let cached = match &*self.cache.borrow() {
            Some((at, v)) if *at == stamp => Some(v.clone()),
            _ => None,
        };
        let value = match cached {
            Some(v) => v,
            None => {
                // The child may itself use other bindings of this frame: merge into the
                // current accumulator only once it is done.
                let mut sub = active.derive();
                let v = self.child.eval(&mut sub)?;
                if let Some(mut acc) = frame.active.get() {
                    acc.merge_same_param(&sub);
                    frame.active.set(Some(acc));
                }
                *self.cache.borrow_mut() = Some((stamp, v.clone()));
                v
            }
        };

        if !self.child.is_pure_constant() {
            ctxt.record_mutable_event();
            frame.record_mutable_event();
        }
        Ok(value)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        self.write_name(w);
    }
}

impl<T: Basal> BindingDef for Binding<T> {
    fn write_definition(&self, w: &mut FormulaWriter) {
        w.push('(');
        self.write_name(w);
        w.push(' ');
        self.child.write_formula(w);
        w.push(')');
    }
}

/// Collects the bindings of a single frame, consumed by [`let_`].
pub struct FrameBuilder {
    frame: Rc<Frame>,
}

impl FrameBuilder {
    /// Start an empty frame.
    pub fn new() -> Self {
        Self {
            frame: Rc::new(Frame::default()),
        }
    }

    /// Whether at least one binding was registered.
    pub fn has_bindings(&self) -> bool {
        !self.frame.bindings.borrow().is_empty()
    }

    /// Bind `node` under `name` and return a node that evaluates it at most once per
    /// activation of the frame.
    ///
    /// `name` appears in formulas suffixed by a frame number and should be a plain word.
    /// Pure constants need no binding and are returned as is.
    pub fn bind<T: Basal>(&self, name: impl Into<String>, node: impl Into<Node<T>>) -> Node<T> {
        let node = node.into();
        if node.is_pure_constant() {
            return node;
        }
        let name = name.into();
        tracing::debug!(name = %name, "binding registered");
        let binding = Rc::new(Binding {
            name,
            frame: Rc::downgrade(&self.frame),
            child: node,
            cache: RefCell::new(None),
        });
        self.frame
            .bindings
            .borrow_mut()
            .push(Rc::clone(&binding) as Rc<dyn BindingDef>);
        Node::from_shared(binding)
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct Let<T: Basal> {
    frame: Rc<Frame>,
    body: Node<T>,
}

impl<T: Basal> Operation<T> for Let<T> {
    fn evaluate(&self, ctxt: &mut Context) -> FormuloidResult<T> {
        self.frame.open(ctxt)?;
        let result = self.body.eval(ctxt);
        let closed = self.frame.close(ctxt);
        let value = result?;
        closed?;
        Ok(value)
    }

    fn write_formula(&self, w: &mut FormulaWriter) {
        self.frame.print_id.set(w.next_frame_id());
        w.push_str("(let (");
        for (i, binding) in self.frame.bindings.borrow().iter().enumerate() {
            if i > 0 {
                w.push(' ');
            }
            binding.write_definition(w);
        }
        w.push_str(") ");
        self.body.write_formula(w);
        w.push(')');
    }
}

/// Evaluate `body` within the frame built by `builder`.
///
/// Each binding of the frame is computed at most once per evaluation of the returned node.
/// Without bindings this is just `body`.
pub fn let_<T: Basal>(builder: FrameBuilder, body: impl Into<Node<T>>) -> Node<T> {
    let body = body.into();
    let count = builder.frame.bindings.borrow().len();
    tracing::debug!(bindings = count, "let frame built");
    if count == 0 {
        return body;
    }
    Node::from_operation(Let {
        frame: builder.frame,
        body,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scope/frame.rs"]
mod tests;
