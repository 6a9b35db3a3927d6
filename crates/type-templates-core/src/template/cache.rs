//! Per-template instantiation cache.
//!
//! Every template owns one of these. Instantiating with an argument
//! tuple already present returns the cached type, so repeated
//! instantiations are pointer-identical. The pending set tracks
//! argument tuples currently being resolved, which turns
//! self-referential base chains into an error instead of a hang.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::type_info::Type;
use crate::value::Value;

#[derive(Debug, Default)]
pub(crate) struct InstanceCache {
    instances: FxHashMap<Vec<Value>, Type>,
    pending: FxHashSet<Vec<Value>>,
}

impl InstanceCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, args: &[Value]) -> Option<&Type> {
        self.instances.get(args)
    }

    pub(crate) fn insert(&mut self, args: Vec<Value>, instance: Type) {
        self.instances.insert(args, instance);
    }

    pub(crate) fn is_pending(&self, args: &[Value]) -> bool {
        self.pending.contains(args)
    }

    pub(crate) fn mark_pending(&mut self, args: Vec<Value>) {
        self.pending.insert(args);
    }

    pub(crate) fn clear_pending(&mut self, args: &[Value]) {
        self.pending.remove(args);
    }

    pub(crate) fn len(&self) -> usize {
        self.instances.len()
    }
}
