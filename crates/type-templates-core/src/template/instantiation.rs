//! Lazy, memoized resolution of a template against concrete arguments.

use crate::error::TemplateError;
use crate::template::substitution::build_binding;
use crate::template::{Template, UnresolvedBase};
use crate::type_hash::TypeHash;
use crate::type_info::Type;
use crate::value::Value;

/// Resolve a template against a fully concrete argument tuple.
///
/// A cache hit returns the previously built type, so two resolutions
/// with equal arguments yield the same `Type` handle. A miss builds
/// the instance, resolving parameterized bases recursively, and caches
/// it under the argument tuple.
pub(crate) fn resolve(template: &Template, args: Vec<Value>) -> Result<Type, TemplateError> {
    {
        let cache = template.0.instantiations.borrow();
        if let Some(existing) = cache.get(&args) {
            log::trace!("instantiation cache hit for {existing}");
            return Ok(existing.clone());
        }
        if cache.is_pending(&args) {
            return Err(TemplateError::CyclicInstantiation {
                name: format_instance_name(template.name(), &args),
            });
        }
    }

    template.0.instantiations.borrow_mut().mark_pending(args.clone());
    let built = build_instance(template, &args);
    let mut cache = template.0.instantiations.borrow_mut();
    cache.clear_pending(&args);

    let instance = built?;
    cache.insert(args, instance.clone());
    Ok(instance)
}

fn build_instance(template: &Template, args: &[Value]) -> Result<Type, TemplateError> {
    let binding = build_binding(template.name(), &template.0.params, args)?;

    // Resolution order for the instance: resolved parameterized bases
    // first, then concrete declared bases, then the template's own
    // implementation base.
    let mut bases = Vec::new();
    for base in &template.0.unresolved_bases {
        match base {
            UnresolvedBase::Expr(expr) => bases.push(expr.substitute(&binding)?),
            UnresolvedBase::Param(param) => {
                let Some(value) = binding.get(param) else {
                    return Err(TemplateError::UnboundParameter {
                        param: param.name().to_string(),
                        expr: format_instance_name(template.name(), args),
                    });
                };
                match value.as_type() {
                    Some(ty) => bases.push(ty.clone()),
                    None => {
                        return Err(TemplateError::BaseNotAType {
                            template: template.name().to_string(),
                            param: param.name().to_string(),
                            value: value.to_string(),
                        });
                    }
                }
            }
        }
    }
    bases.extend(template.0.concrete_bases.iter().cloned());
    bases.push(template.0.base.clone());

    let name = format_instance_name(template.name(), args);
    let arg_hashes: Vec<TypeHash> = args.iter().map(Value::type_hash).collect();
    let type_hash = TypeHash::from_template_instance(template.type_hash(), &arg_hashes);

    log::debug!("instantiating {name}");
    Type::instantiated(name, type_hash, bases, template.clone(), binding)
}

/// Render the canonical display name of an instantiation: `Foo[1, 2]`.
pub fn format_instance_name(template: &str, args: &[Value]) -> String {
    let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("{template}[{}]", rendered.join(", "))
}
