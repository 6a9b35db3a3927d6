//! Template parameters.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A named placeholder standing for a future concrete value in a
/// template declaration.
///
/// The name is used only for display. Equality and hashing are by
/// object identity: two parameters declared with the same name remain
/// distinct, which is what keeps expression substitution unambiguous.
/// Cloning the handle preserves identity.
///
/// # Examples
///
/// ```
/// use type_templates_core::TemplateParam;
///
/// let t = TemplateParam::new("T");
/// let other_t = TemplateParam::new("T");
/// assert_eq!(t, t.clone());
/// assert_ne!(t, other_t);
/// ```
#[derive(Clone)]
pub struct TemplateParam(Rc<ParamData>);

struct ParamData {
    name: String,
}

impl TemplateParam {
    /// Create a fresh, globally unique parameter with a display name.
    pub fn new(name: impl Into<String>) -> Self {
        TemplateParam(Rc::new(ParamData { name: name.into() }))
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.0.name
    }
}

impl PartialEq for TemplateParam {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TemplateParam {}

impl Hash for TemplateParam {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Display for TemplateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl fmt::Debug for TemplateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateParam({})", self.0.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn identity_not_name_equality() {
        let a = TemplateParam::new("T");
        let b = TemplateParam::new("T");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn usable_as_map_key() {
        let a = TemplateParam::new("T");
        let b = TemplateParam::new("T");

        let mut map = FxHashMap::default();
        map.insert(a.clone(), 1);
        map.insert(b.clone(), 2);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&a), Some(&1));
        assert_eq!(map.get(&b), Some(&2));
    }

    #[test]
    fn display_is_name() {
        let n = TemplateParam::new("N");
        assert_eq!(n.to_string(), "N");
    }
}
