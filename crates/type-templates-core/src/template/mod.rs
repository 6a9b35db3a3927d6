//! Templates: named type factories with free parameters.
//!
//! A template is declared once with its parameter list, bases, and
//! members, then applied to arguments on demand. Application with any
//! parameterized argument yields a [`TemplateExpression`]; a fully
//! concrete application resolves (and memoizes) an instantiated
//! [`Type`].

mod cache;
mod instantiation;
mod substitution;

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHashMap;

pub use instantiation::format_instance_name;
pub(crate) use instantiation::resolve;
pub use substitution::Binding;
use substitution::param_list;

use crate::error::TemplateError;
use crate::expr::TemplateExpression;
use crate::instance::Instance;
use crate::param::TemplateParam;
use crate::type_hash::TypeHash;
use crate::type_info::{ConstructorFn, InferFn, Type};
use crate::value::{Arg, Value};

use cache::InstanceCache;

/// Result of applying a template to an argument list.
#[derive(Debug, Clone)]
pub enum Applied {
    /// All arguments were concrete; the instantiation resolved to a type.
    Concrete(Type),
    /// At least one argument was a free parameter.
    Partial(TemplateExpression),
}

impl Applied {
    pub fn concrete(self) -> Option<Type> {
        match self {
            Applied::Concrete(ty) => Some(ty),
            Applied::Partial(_) => None,
        }
    }

    pub fn partial(self) -> Option<TemplateExpression> {
        match self {
            Applied::Concrete(_) => None,
            Applied::Partial(expr) => Some(expr),
        }
    }
}

/// A base declared on a template builder.
#[derive(Debug, Clone)]
pub enum BaseSpec {
    /// An ordinary concrete type, attached to every instantiation as-is.
    Concrete(Type),
    /// A parameterized application of another template, resolved per
    /// instantiation under that instantiation's binding.
    Expr(TemplateExpression),
    /// A bare parameter; the bound value must be a type at
    /// instantiation time.
    Param(TemplateParam),
}

impl From<Type> for BaseSpec {
    fn from(ty: Type) -> Self {
        BaseSpec::Concrete(ty)
    }
}

impl From<&Type> for BaseSpec {
    fn from(ty: &Type) -> Self {
        BaseSpec::Concrete(ty.clone())
    }
}

impl From<TemplateExpression> for BaseSpec {
    fn from(expr: TemplateExpression) -> Self {
        BaseSpec::Expr(expr)
    }
}

impl From<&TemplateExpression> for BaseSpec {
    fn from(expr: &TemplateExpression) -> Self {
        BaseSpec::Expr(expr.clone())
    }
}

impl From<TemplateParam> for BaseSpec {
    fn from(param: TemplateParam) -> Self {
        BaseSpec::Param(param)
    }
}

impl From<&TemplateParam> for BaseSpec {
    fn from(param: &TemplateParam) -> Self {
        BaseSpec::Param(param.clone())
    }
}

/// A parameterized base kept unresolved until instantiation.
#[derive(Debug, Clone)]
pub(crate) enum UnresolvedBase {
    Expr(TemplateExpression),
    Param(TemplateParam),
}

pub(crate) struct TemplateData {
    name: String,
    type_hash: TypeHash,
    params: Vec<TemplateParam>,
    /// The implementation base carrying this template's members,
    /// constructor, and inference hook. Every instantiation derives
    /// from it, and subtype tests walk back to the template through
    /// the instantiation's back-reference rather than through it.
    base: Type,
    pub(crate) unresolved_bases: Vec<UnresolvedBase>,
    pub(crate) concrete_bases: Vec<Type>,
    pub(crate) instantiations: RefCell<InstanceCache>,
}

/// A named type factory with free parameters.
///
/// Cheap to clone; clones share the declaration and the instantiation
/// cache. Equality and hashing are by identity.
#[derive(Clone)]
pub struct Template(pub(crate) Rc<TemplateData>);

impl Template {
    /// Start declaring a template.
    pub fn builder(name: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn type_hash(&self) -> TypeHash {
        self.0.type_hash
    }

    /// Declared parameters, in positional order.
    pub fn params(&self) -> &[TemplateParam] {
        &self.0.params
    }

    /// The implementation base shared by every instantiation of this
    /// template.
    pub fn base(&self) -> &Type {
        &self.0.base
    }

    /// Number of memoized instantiations so far.
    pub fn instantiation_count(&self) -> usize {
        self.0.instantiations.borrow().len()
    }

    /// Apply this template to an argument list.
    ///
    /// Arity is checked up front. If every argument is a concrete
    /// value the instantiation resolves immediately; if any argument
    /// is a free parameter the application stays partial.
    pub fn apply(&self, args: &[Arg]) -> Result<Applied, TemplateError> {
        self.check_arity(args.len())?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Arg::Param(_) => {
                    let expr = TemplateExpression::new(self.clone(), args.to_vec());
                    return Ok(Applied::Partial(expr));
                }
                Arg::Value(value) => values.push(value.clone()),
            }
        }
        resolve(self, values).map(Applied::Concrete)
    }

    /// Resolve this template against fully concrete arguments.
    ///
    /// Equal argument tuples return the identical `Type`.
    pub fn instantiate(&self, args: &[Value]) -> Result<Type, TemplateError> {
        self.check_arity(args.len())?;
        resolve(self, args.to_vec())
    }

    /// Build an instance through this template's inference hook,
    /// deducing the type arguments from the constructor arguments.
    ///
    /// The hook is looked up along the implementation base's chain, so
    /// a derived template inherits its ancestor's hook. The returned
    /// instance must belong to some instantiation of this template.
    pub fn construct(&self, args: &[Value]) -> Result<Instance, TemplateError> {
        let Some(hook) = self.0.base.infer_hook() else {
            return Err(TemplateError::NoInferenceHook {
                template: self.0.name.clone(),
            });
        };
        let instance = hook(self, args)?;
        if !self.is_instance(&instance) {
            return Err(TemplateError::InferenceContract {
                template: self.0.name.clone(),
                returned: instance.ty().name().to_string(),
            });
        }
        Ok(instance)
    }

    /// True if `candidate` is an instantiation of this template or
    /// derives from one, directly or transitively.
    pub fn is_subtype(&self, candidate: &Type) -> bool {
        candidate.chain().any(|ty| ty.template() == Some(self))
    }

    /// True if `instance` belongs to an instantiation of this template.
    pub fn is_instance(&self, instance: &Instance) -> bool {
        self.is_subtype(instance.ty())
    }

    fn check_arity(&self, got: usize) -> Result<(), TemplateError> {
        let expected = self.0.params.len();
        if got != expected {
            return Err(TemplateError::ArityMismatch {
                template: self.0.name.clone(),
                params: param_list(&self.0.params),
                expected,
                got,
            });
        }
        Ok(())
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Template {}

impl Hash for Template {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.0.name)
            .field("params", &self.0.params)
            .field("instantiations", &self.0.instantiations.borrow().len())
            .finish()
    }
}

/// Builder for [`Template`] declarations.
pub struct TemplateBuilder {
    name: String,
    params: Vec<TemplateParam>,
    bases: Vec<BaseSpec>,
    members: FxHashMap<String, Value>,
    constructor: Option<ConstructorFn>,
    infer: Option<InferFn>,
}

impl TemplateBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            bases: Vec::new(),
            members: FxHashMap::default(),
            constructor: None,
            infer: None,
        }
    }

    /// Append one positional parameter.
    pub fn param(mut self, param: &TemplateParam) -> Self {
        self.params.push(param.clone());
        self
    }

    /// Append positional parameters in order.
    pub fn params(mut self, params: impl IntoIterator<Item = TemplateParam>) -> Self {
        self.params.extend(params);
        self
    }

    /// Declare a base: a concrete type, a partial application of
    /// another template, or a bare parameter.
    pub fn base(mut self, base: impl Into<BaseSpec>) -> Self {
        self.bases.push(base.into());
        self
    }

    /// Declare a member shared by every instantiation.
    pub fn member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), value.into());
        self
    }

    /// Install the constructor run by `Type::construct` on
    /// instantiations of this template.
    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Result<(), TemplateError> + 'static,
    {
        self.constructor = Some(Rc::new(f));
        self
    }

    /// Install the inference hook used by `Template::construct` to
    /// deduce type arguments from constructor arguments.
    pub fn infer<F>(mut self, f: F) -> Self
    where
        F: Fn(&Template, &[Value]) -> Result<Instance, TemplateError> + 'static,
    {
        self.infer = Some(Rc::new(f));
        self
    }

    /// Finish the declaration.
    ///
    /// The implementation base is created here; it derives from the
    /// implementation bases of every template applied in a
    /// parameterized base, so member lookup and hook lookup work
    /// before any instantiation exists.
    pub fn build(self) -> Result<Template, TemplateError> {
        let mut unresolved_bases = Vec::new();
        let mut concrete_bases = Vec::new();
        let mut impl_bases = Vec::new();
        for base in self.bases {
            match base {
                BaseSpec::Concrete(ty) => concrete_bases.push(ty),
                BaseSpec::Expr(expr) => {
                    impl_bases.push(expr.template().base().clone());
                    unresolved_bases.push(UnresolvedBase::Expr(expr));
                }
                BaseSpec::Param(param) => unresolved_bases.push(UnresolvedBase::Param(param)),
            }
        }

        let base = Type::implementation_base(
            format!("{}::base", self.name),
            impl_bases,
            self.members,
            self.constructor,
            self.infer,
        )?;
        let type_hash = TypeHash::from_name(&self.name);

        Ok(Template(Rc::new(TemplateData {
            name: self.name,
            type_hash,
            params: self.params,
            base,
            unresolved_bases,
            concrete_bases,
            instantiations: RefCell::new(InstanceCache::new()),
        })))
    }
}
