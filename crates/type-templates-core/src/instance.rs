//! Runtime instances of concrete types.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::type_info::Type;
use crate::value::Value;

/// An object of a concrete type.
///
/// Instances carry a mutable field map so constructor hooks have
/// somewhere to put state. The handle is cheap to clone and shares the
/// underlying object.
#[derive(Clone)]
pub struct Instance(Rc<InstanceData>);

struct InstanceData {
    ty: Type,
    fields: RefCell<FxHashMap<String, Value>>,
}

impl Instance {
    pub(crate) fn new(ty: Type) -> Self {
        Instance(Rc::new(InstanceData {
            ty,
            fields: RefCell::new(FxHashMap::default()),
        }))
    }

    /// The concrete type of this instance.
    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    /// Set a named field.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.fields.borrow_mut().insert(name.into(), value.into());
    }

    /// Read a named field.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.fields.borrow().get(name).cloned()
    }

    /// Ordinary ancestry-based instance test against a concrete type.
    ///
    /// Template-level instance tests (which follow the back-reference
    /// instead of ancestry) live on `Template`.
    pub fn is_instance_of(&self, ty: &Type) -> bool {
        self.0.ty.is_subtype_of(ty)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("ty", &self.0.ty.name())
            .field("fields", &self.0.fields.borrow().len())
            .finish()
    }
}
