//! Concrete template argument values.

use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::param::TemplateParam;
use crate::template::Template;
use crate::type_hash::{TypeHash, hash_constants};
use crate::type_info::Type;

/// A concrete value usable as a template argument.
///
/// Values are the cache keys of the instantiation cache, so every
/// variant supports equality and hashing. Types and templates compare
/// by object identity; the scalar variants compare by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    /// A concrete type, plain or instantiated.
    Type(Type),
    /// A template used as an argument to another template.
    Template(Template),
}

impl Value {
    /// Fold this value into the hash domain used for instance naming.
    ///
    /// Types and templates contribute their own hash; other values hash
    /// under a dedicated domain marker so `Pair[1]` and `Pair[int]`
    /// stay distinct even if a type were named "1".
    pub fn type_hash(&self) -> TypeHash {
        match self {
            Value::Bool(b) => TypeHash(hash_constants::VALUE ^ (*b as u64 + 1)),
            Value::Int(i) => {
                TypeHash(hash_constants::VALUE ^ (*i as u64).wrapping_mul(hash_constants::SEP))
            }
            Value::Str(s) => TypeHash(hash_constants::VALUE ^ xxh64(s.as_bytes(), 1)),
            Value::List(items) => items.iter().fold(
                TypeHash(hash_constants::VALUE ^ hash_constants::SEP),
                |acc, item| {
                    TypeHash(
                        acc.0
                            .wrapping_mul(hash_constants::SEP)
                            .wrapping_add(item.type_hash().0),
                    )
                },
            ),
            Value::Type(ty) => ty.type_hash(),
            Value::Template(template) => template.type_hash(),
        }
    }

    /// The concrete type, if this value is one.
    pub fn as_type(&self) -> Option<&Type> {
        match self {
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// The integer, if this value is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The string, if this value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The list, if this value is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Type(ty) => f.write_str(ty.name()),
            Value::Template(template) => f.write_str(template.name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Type> for Value {
    fn from(ty: Type) -> Self {
        Value::Type(ty)
    }
}

impl From<&Type> for Value {
    fn from(ty: &Type) -> Self {
        Value::Type(ty.clone())
    }
}

impl From<Template> for Value {
    fn from(template: Template) -> Self {
        Value::Template(template)
    }
}

impl From<&Template> for Value {
    fn from(template: &Template) -> Self {
        Value::Template(template.clone())
    }
}

/// One slot of a template application: either a still-open parameter or
/// a concrete value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    Param(TemplateParam),
    Value(Value),
}

impl Arg {
    /// True if this slot is a still-open parameter.
    pub fn is_param(&self) -> bool {
        matches!(self, Arg::Param(_))
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Param(p) => f.write_str(p.name()),
            Arg::Value(v) => write!(f, "{v}"),
        }
    }
}

impl From<TemplateParam> for Arg {
    fn from(p: TemplateParam) -> Self {
        Arg::Param(p)
    }
}

impl From<&TemplateParam> for Arg {
    fn from(p: &TemplateParam) -> Self {
        Arg::Param(p.clone())
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Value(Value::Bool(b))
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Arg::Value(Value::Int(i))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Value(Value::from(s))
    }
}

impl From<Type> for Arg {
    fn from(ty: Type) -> Self {
        Arg::Value(Value::Type(ty))
    }
}

impl From<&Type> for Arg {
    fn from(ty: &Type) -> Self {
        Arg::Value(Value::Type(ty.clone()))
    }
}

impl From<Template> for Arg {
    fn from(template: Template) -> Self {
        Arg::Value(Value::Template(template))
    }
}

impl From<&Template> for Arg {
    fn from(template: &Template) -> Self {
        Arg::Value(Value::Template(template.clone()))
    }
}
