//! Per-module type name overrides.

use rustc_hash::FxHashMap;

use crate::base::Name;

/// Substitutes one internal class name for another before any tree lookup.
///
/// Used when a module was built against relocated (shaded) copies of mapped
/// classes. Substitution is a single step: the replacement is never looked
/// up again. Dotted names are stored in internal (`/`) form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    aliases: FxHashMap<Name, Name>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: &str, to: &str) {
        self.aliases
            .insert(internal_form(from), internal_form(to));
    }

    /// The replacement for `name`, or `name` itself.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, Name::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(Name::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (from, to) in iter {
            map.insert(from.as_ref(), to.as_ref());
        }
        map
    }
}

fn internal_form(name: &str) -> Name {
    if name.contains('.') {
        Name::from(name.replace('.', "/"))
    } else {
        Name::new(name)
    }
}
