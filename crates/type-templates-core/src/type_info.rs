//! Concrete type objects and ancestry linearization.
//!
//! A [`Type`] is a nominal, runtime-built type descriptor: plain types
//! declared by the host program, private implementation bases built from
//! template class bodies, and the concrete types produced by template
//! instantiation. Equality and hashing are object identity, which is
//! what makes the instantiation cache's "same arguments, same type
//! object" guarantee observable.
//!
//! Multiple inheritance is flattened with C3 linearization at
//! construction time. The linearized ancestry backs member lookup,
//! binding recovery, and every subtype test in the crate; a
//! contradictory base list is a declaration error, not something this
//! module papers over.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::TemplateError;
use crate::instance::Instance;
use crate::param::TemplateParam;
use crate::template::{Binding, Template};
use crate::type_hash::TypeHash;
use crate::value::Value;

/// Constructor hook attached to a template's class body.
///
/// Runs against the freshly created instance; the concrete type (and
/// through it, the argument binding) is reachable via
/// [`Instance::ty`].
pub type ConstructorFn = Rc<dyn Fn(&Instance, &[Value]) -> Result<(), TemplateError>>;

/// Type-inference hook attached to a template's class body.
///
/// Called when the template itself is invoked as a constructor without
/// explicit type arguments; must return an already-constructed instance
/// of the invoking template.
pub type InferFn = Rc<dyn Fn(&Template, &[Value]) -> Result<Instance, TemplateError>>;

/// A concrete, runtime-built type.
///
/// Cloning the handle preserves identity; two types are equal only if
/// they are the same object.
#[derive(Clone)]
pub struct Type(Rc<TypeData>);

struct TypeData {
    name: String,
    type_hash: TypeHash,
    /// Direct bases, declared order.
    bases: Vec<Type>,
    /// C3-linearized ancestry, self excluded.
    ancestry: Vec<Type>,
    /// Back-reference to the template that produced this type, if any.
    template: Option<Template>,
    /// Argument binding for instantiated types; reachable only through
    /// the accessors on this type.
    binding: Option<Binding>,
    members: FxHashMap<String, Value>,
    ctor: Option<ConstructorFn>,
    infer: Option<InferFn>,
}

impl Type {
    /// Declare a plain type with no bases.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Type(Rc::new(TypeData {
            name,
            type_hash,
            bases: Vec::new(),
            ancestry: Vec::new(),
            template: None,
            binding: None,
            members: FxHashMap::default(),
            ctor: None,
            infer: None,
        }))
    }

    /// Declare a plain type deriving from `bases`, in declared order.
    pub fn with_bases(name: impl Into<String>, bases: Vec<Type>) -> Result<Self, TemplateError> {
        let name = name.into();
        let ancestry = linearize(&name, &bases)?;
        let type_hash = TypeHash::from_name(&name);
        Ok(Type(Rc::new(TypeData {
            name,
            type_hash,
            bases,
            ancestry,
            template: None,
            binding: None,
            members: FxHashMap::default(),
            ctor: None,
            infer: None,
        })))
    }

    /// Build the private implementation base for a template class body.
    pub(crate) fn implementation_base(
        name: String,
        bases: Vec<Type>,
        members: FxHashMap<String, Value>,
        ctor: Option<ConstructorFn>,
        infer: Option<InferFn>,
    ) -> Result<Self, TemplateError> {
        let ancestry = linearize(&name, &bases)?;
        let type_hash = TypeHash::from_name(&name);
        Ok(Type(Rc::new(TypeData {
            name,
            type_hash,
            bases,
            ancestry,
            template: None,
            binding: None,
            members,
            ctor,
            infer,
        })))
    }

    /// Build a concrete instantiated type. Only the resolver calls this.
    pub(crate) fn instantiated(
        name: String,
        type_hash: TypeHash,
        bases: Vec<Type>,
        template: Template,
        binding: Binding,
    ) -> Result<Self, TemplateError> {
        let ancestry = linearize(&name, &bases)?;
        Ok(Type(Rc::new(TypeData {
            name,
            type_hash,
            bases,
            ancestry,
            template: Some(template),
            binding: Some(binding),
            members: FxHashMap::default(),
            ctor: None,
            infer: None,
        })))
    }

    /// The display name, e.g. `int` or `Pair[1, 2]`.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Deterministic identity hash (display/diagnostic use).
    pub fn type_hash(&self) -> TypeHash {
        self.0.type_hash
    }

    /// Direct bases, in declared order.
    pub fn bases(&self) -> &[Type] {
        &self.0.bases
    }

    /// Linearized ancestry, nearest first, self excluded.
    pub fn ancestry(&self) -> &[Type] {
        &self.0.ancestry
    }

    /// Full method-resolution chain: self, then linearized ancestry.
    pub fn chain(&self) -> impl Iterator<Item = &Type> {
        std::iter::once(self).chain(self.0.ancestry.iter())
    }

    /// Ordinary ancestry-based subtype test.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        self.chain().any(|t| t == other)
    }

    /// The template that produced this type, if it is an instantiation.
    pub fn template(&self) -> Option<&Template> {
        self.0.template.as_ref()
    }

    /// This type's own argument binding, if it is an instantiation.
    pub fn binding(&self) -> Option<&Binding> {
        self.0.binding.as_ref()
    }

    /// Recover the binding attached by `template`, searching the chain.
    ///
    /// A derived instantiation finds the first base in resolution order
    /// that the given template produced, so argument choices flow the
    /// way method resolution does.
    pub fn binding_for(&self, template: &Template) -> Option<&Binding> {
        self.chain().find_map(|t| match &t.0.template {
            Some(owner) if owner == template => t.0.binding.as_ref(),
            _ => None,
        })
    }

    /// Recover a single argument value attached by `template`.
    pub fn arg_for(&self, template: &Template, param: &TemplateParam) -> Option<&Value> {
        self.binding_for(template).and_then(|b| b.get(param))
    }

    /// Find the first value bound to `param` anywhere in the chain.
    ///
    /// Convenient inside constructor hooks, where the declaring
    /// template handle is not yet in scope. When the same parameter
    /// object is shared across templates, resolution order decides
    /// which binding wins; use [`Type::arg_for`] to be precise.
    pub fn find_arg(&self, param: &TemplateParam) -> Option<&Value> {
        self.chain()
            .find_map(|t| t.0.binding.as_ref().and_then(|b| b.get(param)))
    }

    /// Look up a class-body member by name, searching the chain.
    pub fn member(&self, name: &str) -> Option<&Value> {
        self.chain().find_map(|t| t.0.members.get(name))
    }

    /// Construct an instance of this type.
    ///
    /// Runs the nearest constructor hook in the resolution chain, if
    /// any; with no hook the instance is created bare.
    pub fn construct(&self, args: &[Value]) -> Result<Instance, TemplateError> {
        let instance = Instance::new(self.clone());
        if let Some(ctor) = self.chain().find_map(|t| t.0.ctor.clone()) {
            ctor(&instance, args)?;
        }
        Ok(instance)
    }

    /// Nearest inference hook in the resolution chain.
    pub(crate) fn infer_hook(&self) -> Option<InferFn> {
        self.chain().find_map(|t| t.0.infer.clone())
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.0.name)
            .field("type_hash", &self.0.type_hash)
            .field("bases", &self.0.bases.len())
            .finish()
    }
}

/// C3 linearization of `bases`, self excluded from the result.
///
/// Merges each base's own linearization plus the declared base list.
/// Fails when no consistent ordering exists (contradictory base orders,
/// or a repeated base).
fn linearize(name: &str, bases: &[Type]) -> Result<Vec<Type>, TemplateError> {
    if bases.is_empty() {
        return Ok(Vec::new());
    }

    let mut sequences: Vec<Vec<Type>> = bases
        .iter()
        .map(|b| {
            let mut seq = Vec::with_capacity(1 + b.ancestry().len());
            seq.push(b.clone());
            seq.extend(b.ancestry().iter().cloned());
            seq
        })
        .collect();
    sequences.push(bases.to_vec());

    let mut result = Vec::new();
    while sequences.iter().any(|s| !s.is_empty()) {
        // A good head appears in no sequence's tail.
        let candidate = sequences
            .iter()
            .filter_map(|s| s.first())
            .find(|head| {
                !sequences
                    .iter()
                    .any(|s| s.iter().skip(1).any(|t| t == *head))
            })
            .cloned();

        let Some(head) = candidate else {
            return Err(TemplateError::Linearization {
                name: name.to_string(),
            });
        };
        // The head is in no tail, so retain only strips heads.
        for seq in &mut sequences {
            seq.retain(|t| *t != head);
        }
        result.push(head);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_type_has_empty_ancestry() {
        let int = Type::new("int");
        assert_eq!(int.name(), "int");
        assert!(int.ancestry().is_empty());
        assert!(int.template().is_none());
        assert!(int.binding().is_none());
    }

    #[test]
    fn identity_equality() {
        let a = Type::new("int");
        let b = Type::new("int");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.type_hash(), b.type_hash()); // hash identity is advisory
    }

    #[test]
    fn single_inheritance_chain() {
        let entity = Type::new("Entity");
        let actor = Type::with_bases("Actor", vec![entity.clone()]).unwrap();
        let player = Type::with_bases("Player", vec![actor.clone()]).unwrap();

        assert_eq!(player.ancestry(), &[actor.clone(), entity.clone()]);
        assert!(player.is_subtype_of(&player));
        assert!(player.is_subtype_of(&actor));
        assert!(player.is_subtype_of(&entity));
        assert!(!entity.is_subtype_of(&player));
    }

    #[test]
    fn diamond_linearizes() {
        let root = Type::new("Root");
        let left = Type::with_bases("Left", vec![root.clone()]).unwrap();
        let right = Type::with_bases("Right", vec![root.clone()]).unwrap();
        let bottom = Type::with_bases("Bottom", vec![left.clone(), right.clone()]).unwrap();

        assert_eq!(
            bottom.ancestry(),
            &[left.clone(), right.clone(), root.clone()]
        );
    }

    #[test]
    fn contradictory_base_order_is_an_error() {
        let a = Type::new("A");
        let b = Type::new("B");
        let ab = Type::with_bases("AB", vec![a.clone(), b.clone()]).unwrap();
        let ba = Type::with_bases("BA", vec![b.clone(), a.clone()]).unwrap();

        let err = Type::with_bases("Conflict", vec![ab, ba]).unwrap_err();
        assert!(matches!(err, TemplateError::Linearization { name } if name == "Conflict"));
    }

    #[test]
    fn repeated_base_is_an_error() {
        let a = Type::new("A");
        let err = Type::with_bases("Twice", vec![a.clone(), a.clone()]).unwrap_err();
        assert!(matches!(err, TemplateError::Linearization { .. }));
    }

    #[test]
    fn construct_without_hook_gives_bare_instance() {
        let int = Type::new("int");
        let instance = int.construct(&[]).unwrap();
        assert_eq!(instance.ty(), &int);
    }

    #[test]
    fn member_lookup_follows_chain() {
        let mut members = FxHashMap::default();
        members.insert("kind".to_string(), Value::from("base"));
        let base =
            Type::implementation_base("Base::base".to_string(), Vec::new(), members, None, None)
                .unwrap();
        let derived = Type::with_bases("Derived", vec![base.clone()]).unwrap();

        assert_eq!(derived.member("kind"), Some(&Value::from("base")));
        assert_eq!(derived.member("missing"), None);
    }
}
