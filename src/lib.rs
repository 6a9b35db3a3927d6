//! Facade over [`type_templates_core`].
//!
//! Re-exports the whole public API; most users only need the prelude:
//!
//! ```
//! use type_templates::prelude::*;
//!
//! let t = TemplateParam::new("T");
//! let boxed = Template::builder("Box").param(&t).build()?;
//! let box_of_3 = boxed.instantiate(&[Value::Int(3)])?;
//! assert_eq!(box_of_3.name(), "Box[3]");
//! # Ok::<(), TemplateError>(())
//! ```

pub use type_templates_core::*;

pub mod prelude {
    pub use type_templates_core::{
        Applied, Arg, BaseSpec, Binding, Instance, Template, TemplateBuilder, TemplateError,
        TemplateExpression, TemplateParam, Type, Value,
    };
}
