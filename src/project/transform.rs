//! Per-class transformation registration.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::Name;
use crate::rewrite::ClassModule;

/// A callback that rewrites one class module in place.
pub type Transformation = Box<dyn Fn(&mut ClassModule) + Send + Sync>;

/// Accepts transformations keyed by binary class name (`a.b.C`).
pub trait TransformRegistry {
    fn register(&self, class_name: &str, transformation: Transformation);
}

type SharedTransformation = Arc<dyn Fn(&mut ClassModule) + Send + Sync>;

/// A registry that keeps transformations in memory and applies them on
/// demand, in registration order.
///
/// Transformations run without the table locked, so one may register
/// further transformations on the same table.
#[derive(Default)]
pub struct TransformTable {
    transforms: RwLock<FxHashMap<Name, Vec<SharedTransformation>>>,
}

impl TransformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every transformation registered for `class_name` on `module`.
    /// Returns how many ran.
    pub fn apply(&self, class_name: &str, module: &mut ClassModule) -> usize {
        let list = match self.transforms.read().get(class_name) {
            Some(list) => list.clone(),
            None => return 0,
        };
        for transform in &list {
            transform(module);
        }
        list.len()
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.transforms.read().contains_key(class_name)
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .transforms
            .read()
            .keys()
            .map(|name| name.to_string())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.transforms.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.read().is_empty()
    }
}

impl TransformRegistry for TransformTable {
    fn register(&self, class_name: &str, transformation: Transformation) {
        self.transforms
            .write()
            .entry(Name::new(class_name))
            .or_default()
            .push(Arc::from(transformation));
    }
}
