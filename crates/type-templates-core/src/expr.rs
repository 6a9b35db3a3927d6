//! Unresolved template applications.

use std::fmt;

use crate::error::TemplateError;
use crate::template::{Binding, Template, resolve};
use crate::type_info::Type;
use crate::value::Arg;

/// A template applied to arguments where at least one argument is still
/// an open parameter.
///
/// Expressions exist transiently: as declared-base references inside a
/// template declaration, or as the result of applying a template with a
/// parameter among the arguments. Only fully concrete instantiations
/// are cached; expressions themselves never are.
#[derive(Clone)]
pub struct TemplateExpression {
    template: Template,
    args: Vec<Arg>,
}

impl TemplateExpression {
    pub(crate) fn new(template: Template, args: Vec<Arg>) -> Self {
        TemplateExpression { template, args }
    }

    /// The template being applied.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The argument slots, in positional order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Replace remaining parameters with values from `bindings` and
    /// resolve to a concrete type.
    ///
    /// Every parameter still referenced by this expression must be
    /// present in the binding; a missing entry is an internal
    /// consistency error and fails fast. The operation works uniformly
    /// when no parameters remain.
    pub fn substitute(&self, bindings: &Binding) -> Result<Type, TemplateError> {
        let mut values = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            match arg {
                Arg::Value(v) => values.push(v.clone()),
                Arg::Param(p) => match bindings.get(p) {
                    Some(v) => values.push(v.clone()),
                    None => {
                        return Err(TemplateError::UnboundParameter {
                            param: p.name().to_string(),
                            expr: self.to_string(),
                        });
                    }
                },
            }
        }
        resolve(&self.template, values)
    }
}

impl fmt::Display for TemplateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.template.name())?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for TemplateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateExpression({self})")
    }
}
