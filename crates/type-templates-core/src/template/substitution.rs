//! Parameter-to-value bindings for template instantiation.

use rustc_hash::FxHashMap;

use crate::error::TemplateError;
use crate::param::TemplateParam;
use crate::value::Value;

/// Map from template parameter to the concrete value used for one
/// instantiation.
///
/// Built positionally by the resolver and attached to every concrete
/// instantiated type; recoverable through `Type::binding_for`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    map: FxHashMap<TemplateParam, Value>,
}

impl Binding {
    /// Look up the value bound to a parameter.
    pub fn get(&self, param: &TemplateParam) -> Option<&Value> {
        self.map.get(param)
    }

    /// Bind a parameter to a value.
    pub fn insert(&mut self, param: TemplateParam, value: Value) {
        self.map.insert(param, value);
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no parameters are bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over bound (parameter, value) pairs, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (&TemplateParam, &Value)> {
        self.map.iter()
    }
}

/// Build a binding from a template's parameters and a fully concrete
/// argument tuple, positionally.
pub(crate) fn build_binding(
    template: &str,
    params: &[TemplateParam],
    args: &[Value],
) -> Result<Binding, TemplateError> {
    if params.len() != args.len() {
        return Err(TemplateError::ArityMismatch {
            template: template.to_string(),
            params: param_list(params),
            expected: params.len(),
            got: args.len(),
        });
    }

    let mut binding = Binding::default();
    for (param, arg) in params.iter().zip(args.iter()) {
        binding.insert(param.clone(), arg.clone());
    }
    Ok(binding)
}

/// Render a parameter list for error messages: `K, V`.
pub(crate) fn param_list(params: &[TemplateParam]) -> String {
    params
        .iter()
        .map(TemplateParam::name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_is_positional() {
        let k = TemplateParam::new("K");
        let v = TemplateParam::new("V");

        let binding =
            build_binding("Pair", &[k.clone(), v.clone()], &[Value::Int(1), Value::Int(2)])
                .unwrap();

        assert_eq!(binding.len(), 2);
        assert_eq!(binding.get(&k), Some(&Value::Int(1)));
        assert_eq!(binding.get(&v), Some(&Value::Int(2)));
    }

    #[test]
    fn count_mismatch_is_an_arity_error() {
        let k = TemplateParam::new("K");

        let err = build_binding("Pair", &[k], &[]).unwrap_err();
        match err {
            TemplateError::ArityMismatch { expected, got, .. } => {
                assert_eq!(expected, 1);
                assert_eq!(got, 0);
            }
            other => panic!("expected ArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn same_parameter_twice_binds_once() {
        let k = TemplateParam::new("K");

        // Declaring [K, K] is legal; the last positional value wins,
        // matching a plain map build.
        let binding = build_binding(
            "Odd",
            &[k.clone(), k.clone()],
            &[Value::Int(1), Value::Int(2)],
        )
        .unwrap();
        assert_eq!(binding.len(), 1);
        assert_eq!(binding.get(&k), Some(&Value::Int(2)));
    }

    #[test]
    fn distinct_same_named_params_stay_distinct() {
        let a = TemplateParam::new("T");
        let b = TemplateParam::new("T");

        let binding = build_binding(
            "Two",
            &[a.clone(), b.clone()],
            &[Value::Int(1), Value::Int(2)],
        )
        .unwrap();
        assert_eq!(binding.get(&a), Some(&Value::Int(1)));
        assert_eq!(binding.get(&b), Some(&Value::Int(2)));
    }

    #[test]
    fn param_list_rendering() {
        let k = TemplateParam::new("K");
        let v = TemplateParam::new("V");
        assert_eq!(param_list(&[k, v]), "K, V");
        assert_eq!(param_list(&[]), "");
    }
}
