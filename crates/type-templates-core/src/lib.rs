//! Runtime type templating: named type factories with free parameters,
//! lazy memoized instantiation, and template-aware subtype tests.
//!
//! A [`Template`] is declared once with its parameters, bases, and
//! class-body members. Applying it to concrete arguments resolves a
//! [`Type`]; equal argument tuples always return the identical type
//! object. Applying it with a free parameter among the arguments yields
//! a [`TemplateExpression`], which a derived template can declare as a
//! base so that its own arguments flow into the ancestor at
//! instantiation time.
//!
//! ```
//! use type_templates_core::{Arg, Template, TemplateParam, Type, Value};
//!
//! let t = TemplateParam::new("T");
//! let n = TemplateParam::new("N");
//!
//! let sequence = Template::builder("Sequence").param(&t).build()?;
//!
//! // MyList[T, N] derives Sequence[T]: the T handed to MyList is the
//! // T handed on to Sequence.
//! let my_list = Template::builder("MyList")
//!     .params([t.clone(), n.clone()])
//!     .base(sequence.apply(&[Arg::from(&t)])?.partial().unwrap())
//!     .build()?;
//!
//! let int = Type::new("int");
//! let list_int_3 = my_list.instantiate(&[Value::from(&int), Value::Int(3)])?;
//!
//! assert_eq!(list_int_3.name(), "MyList[int, 3]");
//! assert!(my_list.is_subtype(&list_int_3));
//! assert!(sequence.is_subtype(&list_int_3));
//!
//! // Sequence[int] was resolved while building MyList[int, 3]; asking
//! // for it again hits the cache and returns the same type object.
//! let seq_int = sequence.instantiate(&[Value::from(&int)])?;
//! assert!(list_int_3.is_subtype_of(&seq_int));
//! assert_eq!(list_int_3.arg_for(&sequence, &t), Some(&Value::from(&int)));
//! # Ok::<(), type_templates_core::TemplateError>(())
//! ```

mod error;
mod expr;
mod instance;
mod param;
mod template;
mod type_hash;
mod type_info;
mod value;

pub use error::TemplateError;
pub use expr::TemplateExpression;
pub use instance::Instance;
pub use param::TemplateParam;
pub use template::{Applied, BaseSpec, Binding, Template, TemplateBuilder, format_instance_name};
pub use type_hash::{TypeHash, hash_constants};
pub use type_info::{ConstructorFn, InferFn, Type};
pub use value::{Arg, Value};
