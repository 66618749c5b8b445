use crate::foundation::error::{FormuloidError, FormuloidResult};

/// Per-evaluation bookkeeping threaded through a formuloid graph.
///
/// A context carries the parameter (if any) and records two facts about the evaluation it was
/// used for: whether the parameter was read, and how many mutable events happened. A result that
/// neither read the parameter nor saw a mutable event can never change and may be folded into a
/// constant.
///
/// Contexts are created per top-level evaluation and per nested sub-evaluation and are merged
/// back into their parent with one of the `merge_*` rules.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Context {
    param: f64,
    has_param: bool,
    param_was_read: bool,
    mutable_count: usize,
}

impl Context {
    /// Create a root context carrying parameter `p`.
    pub fn with_param(p: f64) -> Self {
        Self {
            param: p,
            has_param: true,
            param_was_read: false,
            mutable_count: 0,
        }
    }

    /// Create a root context without a parameter.
    pub fn without_param() -> Self {
        Self::default()
    }

    /// Create a sub-context sharing this context's parameter, with fresh counters.
    pub fn derive(&self) -> Self {
        Self {
            param: self.param,
            has_param: self.has_param,
            param_was_read: false,
            mutable_count: 0,
        }
    }

    /// Whether this context carries a parameter at all.
    pub fn has_param(&self) -> bool {
        self.has_param
    }

    /// Read the parameter and mark it as read.
    pub fn read_param(&mut self) -> FormuloidResult<f64> {
        if !self.has_param {
            return Err(FormuloidError::param_unavailable(
                "parameter-dependent formuloid evaluated in a context without a parameter",
            ));
        }
        self.param_was_read = true;
        Ok(self.param)
    }

    /// Whether the parameter was read at least once.
    pub fn param_was_read(&self) -> bool {
        self.param_was_read
    }

    /// Record one event that may change the result of a future evaluation.
    pub fn record_mutable_event(&mut self) {
        self.mutable_count += 1;
    }

    /// Number of recorded mutable events.
    pub fn mutable_count(&self) -> usize {
        self.mutable_count
    }

    /// Whether at least one mutable event was recorded.
    pub fn is_mutable(&self) -> bool {
        self.mutable_count > 0
    }

    /// True when the evaluation recorded in this context can be cached forever.
    pub fn is_invariant(&self) -> bool {
        !self.param_was_read && self.mutable_count == 0
    }

    /// Forget `n` previously recorded mutable events.
    pub fn discard_mutable_events(&mut self, n: usize) -> FormuloidResult<()> {
        if n > self.mutable_count {
            return Err(FormuloidError::accounting_underflow(n, self.mutable_count));
        }
        self.mutable_count -= n;
        Ok(())
    }

    /// Merge a sub-context that was evaluated with the same parameter.
    pub fn merge_same_param(&mut self, sub: &Context) {
        self.mutable_count += sub.mutable_count;
        self.param_was_read |= sub.param_was_read;
    }

    /// Merge a sub-context evaluated with a derived parameter.
    ///
    /// `param_ctxt` is the context used to compute that derived parameter from this context's
    /// parameter. It only taints this context when `other` actually read the derived parameter.
    pub fn merge_other_param(&mut self, other: &Context, param_ctxt: &Context) {
        self.mutable_count += other.mutable_count;
        if other.param_was_read {
            self.merge_same_param(param_ctxt);
        }
    }

    /// Merge a sub-context whose parameter use is irrelevant to this context.
    pub fn merge_without_param(&mut self, sub: &Context) {
        self.mutable_count += sub.mutable_count;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/context.rs"]
mod tests;
