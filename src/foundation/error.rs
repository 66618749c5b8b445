/// Convenience result type used across the crate.
pub type FormuloidResult<T> = Result<T, FormuloidError>;

/// Errors raised while evaluating a formuloid graph.
///
/// Numeric outcomes such as NaN or infinities are values, never errors.
#[derive(thiserror::Error, Debug)]
pub enum FormuloidError {
    /// The parameter was read from a context that does not carry one.
    #[error("parameter unavailable: {0}")]
    ParamUnavailable(String),

    /// A frame tried to discard more mutable events than were recorded.
    #[error("mutable event accounting underflow: cannot discard {requested} of {available}")]
    AccountingUnderflow {
        /// Number of events the frame asked to discard.
        requested: usize,
        /// Number of events recorded in the context at that time.
        available: usize,
    },

    /// A binding was evaluated outside of its frame.
    #[error("frame error: {0}")]
    Frame(String),

    /// Integer arithmetic without a representable result.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FormuloidError {
    /// Build a [`FormuloidError::ParamUnavailable`] value.
    pub fn param_unavailable(msg: impl Into<String>) -> Self {
        Self::ParamUnavailable(msg.into())
    }

    /// Build a [`FormuloidError::AccountingUnderflow`] value.
    pub fn accounting_underflow(requested: usize, available: usize) -> Self {
        Self::AccountingUnderflow {
            requested,
            available,
        }
    }

    /// Build a [`FormuloidError::Frame`] value.
    pub fn frame(msg: impl Into<String>) -> Self {
        Self::Frame(msg.into())
    }

    /// Build a [`FormuloidError::Arithmetic`] value.
    pub fn arithmetic(msg: impl Into<String>) -> Self {
        Self::Arithmetic(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
