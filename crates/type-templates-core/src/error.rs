//! Error types for template declaration and instantiation.
//!
//! All errors are synchronous and local to the offending declaration or
//! application call. Nothing here is retried: every operation in this
//! crate is pure, deterministic, in-memory work.

use thiserror::Error;

/// Errors raised while declaring, applying, or constructing templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// An application supplied the wrong number of arguments.
    ///
    /// Reported at the application call site, before the instantiation
    /// cache is touched.
    #[error("{template} expected {expected} template argument(s) ({params}), got {got}")]
    ArityMismatch {
        template: String,
        params: String,
        expected: usize,
        got: usize,
    },

    /// Substitution was invoked with a binding that does not cover a
    /// parameter still referenced by an expression. This is an internal
    /// consistency error and fails fast.
    #[error("no value bound for template parameter '{param}' while resolving {expr}")]
    UnboundParameter { param: String, expr: String },

    /// The composed base list has no consistent ancestor ordering.
    #[error("cannot linearize the bases of {name}: inconsistent base ordering")]
    Linearization { name: String },

    /// A template instantiation re-entered itself with identical
    /// arguments while its bases were still being resolved.
    #[error("cyclic instantiation of {name}")]
    CyclicInstantiation { name: String },

    /// A parameter used directly as a declared base was bound to a
    /// value that is not a type.
    #[error("base parameter '{param}' of {template} was bound to {value}, which is not a type")]
    BaseNotAType {
        template: String,
        param: String,
        value: String,
    },

    /// The type-inference hook returned an instance of an unrelated type.
    #[error("inference hook for {template} returned a {returned}, which is not an instance of {template}")]
    InferenceContract { template: String, returned: String },

    /// A template was invoked as a constructor without type arguments
    /// and without an inference hook.
    #[error("no type arguments passed to {template}, and no inference hook is defined")]
    NoInferenceHook { template: String },
}
