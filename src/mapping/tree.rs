//! The multi-namespace mapping tree.
//!
//! A [`MappingTree`] stores every class, field and method of a mapping table
//! with one (optional) name per namespace. Namespace 0 is the source
//! namespace: the column every member row's owner and descriptor are written
//! in. The tree is built once by [`MappingTreeBuilder`] and is immutable
//! afterwards, so it can be shared between threads without locking.
//!
//! ## Indices
//!
//! For every namespace the builder precomputes:
//! - class name → [`ClassId`]
//! - per class, member name → `[(descriptor in that namespace, member)]`
//!
//! so a lookup in any registered namespace is an exact hash lookup plus a
//! short scan over overloads.

use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::MappingError;
use crate::base::{DescriptorError, Interner, Name, remap_descriptor, validate_descriptor};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Index of a namespace within one [`MappingTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u16);

impl NamespaceId {
    /// The first declared namespace; member keys are written in it.
    pub const SOURCE: Self = Self(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a class within one [`MappingTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(u32);

impl ClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

/// A field or method with one name per namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    kind: MemberKind,
    descriptor: Name,
    names: Box<[Option<Name>]>,
}

impl MemberEntry {
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Descriptor in the source namespace.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Name in `ns`, or `None` when the table records no name there.
    pub fn name(&self, ns: NamespaceId) -> Option<&str> {
        self.names.get(ns.index())?.as_deref()
    }

    /// Name in the source namespace (always present).
    pub fn source_name(&self) -> &str {
        self.names[0].as_deref().unwrap_or_default()
    }
}

/// A class with one name per namespace and its members.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    names: Box<[Option<Name>]>,
    fields: Vec<MemberEntry>,
    methods: Vec<MemberEntry>,
}

/// Member name → overloads as `(descriptor, member index)`.
type MemberIndex = FxHashMap<Name, Vec<(Name, u32)>>;

#[derive(Debug, Default)]
struct NamespaceIndex {
    classes: FxHashMap<Name, ClassId>,
    fields: Vec<MemberIndex>,
    methods: Vec<MemberIndex>,
}

/// A member reference fully expressed in one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedMember {
    pub owner: String,
    pub name: String,
    pub descriptor: String,
}

/// Immutable multi-namespace symbol table.
#[derive(Debug)]
pub struct MappingTree {
    id: u64,
    namespaces: Box<[Name]>,
    classes: Vec<ClassEntry>,
    indices: Box<[NamespaceIndex]>,
}

impl MappingTree {
    /// Identity of this tree, unique within the process.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Declared namespaces in column order.
    pub fn namespaces(&self) -> &[Name] {
        &self.namespaces
    }

    pub fn namespace_index(&self, name: &str) -> Result<NamespaceId, MappingError> {
        self.namespaces
            .iter()
            .position(|ns| ns == name)
            .map(|i| NamespaceId(i as u16))
            .ok_or_else(|| MappingError::unknown_namespace(name))
    }

    pub fn namespace_name(&self, ns: NamespaceId) -> Option<&str> {
        self.namespaces.get(ns.index()).map(Name::as_str)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> impl Iterator<Item = ClassRef<'_>> + '_ {
        (0..self.classes.len()).map(move |i| self.class(ClassId(i as u32)))
    }

    /// # Panics
    ///
    /// If `id` was not issued by this tree.
    pub fn class(&self, id: ClassId) -> ClassRef<'_> {
        ClassRef {
            tree: self,
            id,
            entry: &self.classes[id.index()],
        }
    }

    /// Exact class lookup by its name in `ns`. No aliasing, no hierarchy.
    pub fn class_by_name(&self, name: &str, ns: NamespaceId) -> Option<ClassRef<'_>> {
        let id = *self.indices.get(ns.index())?.classes.get(name)?;
        Some(self.class(id))
    }

    /// Look up a method by owner, name and descriptor written in `src`, and
    /// express it in `dst`.
    pub fn method_by_owner_name_desc(
        &self,
        owner: &str,
        name: &str,
        descriptor: &str,
        src: NamespaceId,
        dst: NamespaceId,
    ) -> Option<QualifiedMember> {
        let class = self.class_by_name(owner, src)?;
        let member = class.method(name, descriptor, src)?;
        self.qualify(class, member, dst)
    }

    /// Look up a field by owner, name and descriptor written in `src`, and
    /// express it in `dst`.
    pub fn field_by_owner_name_desc(
        &self,
        owner: &str,
        name: &str,
        descriptor: &str,
        src: NamespaceId,
        dst: NamespaceId,
    ) -> Option<QualifiedMember> {
        let class = self.class_by_name(owner, src)?;
        let member = class.field(name, descriptor, src)?;
        self.qualify(class, member, dst)
    }

    fn qualify(
        &self,
        class: ClassRef<'_>,
        member: &MemberEntry,
        dst: NamespaceId,
    ) -> Option<QualifiedMember> {
        let name = member.name(dst)?;
        let owner = class.name(dst).unwrap_or(class.source_name());
        let descriptor = self
            .map_descriptor(member.descriptor(), NamespaceId::SOURCE, dst)
            .unwrap_or_else(|_| member.descriptor().to_string());
        Some(QualifiedMember {
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor,
        })
    }

    /// Map a class name from `src` to `dst`.
    ///
    /// `None` when the class is absent under `src` or has no name in `dst`.
    pub fn map_type_name(&self, name: &str, src: NamespaceId, dst: NamespaceId) -> Option<&str> {
        self.class_by_name(name, src)?.name(dst)
    }

    /// Rewrite the class names of a descriptor from `src` to `dst`, keeping
    /// names the tree cannot map.
    pub fn map_descriptor(
        &self,
        descriptor: &str,
        src: NamespaceId,
        dst: NamespaceId,
    ) -> Result<String, DescriptorError> {
        remap_descriptor(descriptor, |name| self.map_type_name(name, src, dst))
    }

    /// Whether both trees describe the same classes and members, comparing
    /// namespaces by name rather than by column position.
    pub fn same_entities(&self, other: &MappingTree) -> bool {
        if self.class_count() != other.class_count() {
            return false;
        }

        let mut column_map = Vec::with_capacity(self.namespaces.len());
        for ns in self.namespaces.iter() {
            match other.namespace_index(ns) {
                Ok(id) => column_map.push(id),
                Err(_) => return false,
            }
        }
        if other.namespaces.len() != column_map.len() {
            return false;
        }
        let other_src = column_map[0];

        self.classes().all(|class| {
            let Some(theirs) = other.class_by_name(class.source_name(), other_src) else {
                return false;
            };
            let names_match = column_map
                .iter()
                .enumerate()
                .all(|(i, &id)| class.name(NamespaceId(i as u16)) == theirs.name(id));

            names_match
                && class.entry.fields.len() == theirs.entry.fields.len()
                && class.entry.methods.len() == theirs.entry.methods.len()
                && class.fields().all(|field| {
                    theirs
                        .field(field.source_name(), field.descriptor(), other_src)
                        .is_some_and(|other_field| same_names(field, other_field, &column_map))
                })
                && class.methods().all(|method| {
                    theirs
                        .method(method.source_name(), method.descriptor(), other_src)
                        .is_some_and(|other_method| same_names(method, other_method, &column_map))
                })
        })
    }
}

fn same_names(ours: &MemberEntry, theirs: &MemberEntry, column_map: &[NamespaceId]) -> bool {
    column_map
        .iter()
        .enumerate()
        .all(|(i, &id)| ours.name(NamespaceId(i as u16)) == theirs.name(id))
}

/// Borrowed view of one class in a [`MappingTree`].
#[derive(Debug, Clone, Copy)]
pub struct ClassRef<'a> {
    tree: &'a MappingTree,
    id: ClassId,
    entry: &'a ClassEntry,
}

impl<'a> ClassRef<'a> {
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Name in `ns`, or `None` when the table records no name there.
    pub fn name(&self, ns: NamespaceId) -> Option<&'a str> {
        self.entry.names.get(ns.index())?.as_deref()
    }

    /// Name in the source namespace (always present).
    pub fn source_name(&self) -> &'a str {
        self.entry.names[0].as_deref().unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'a MemberEntry> + 'a {
        self.entry.fields.iter()
    }

    pub fn methods(&self) -> impl Iterator<Item = &'a MemberEntry> + 'a {
        self.entry.methods.iter()
    }

    /// Field declared directly on this class, keyed by name and descriptor
    /// written in `ns`.
    pub fn field(&self, name: &str, descriptor: &str, ns: NamespaceId) -> Option<&'a MemberEntry> {
        let index = self.tree.indices.get(ns.index())?;
        let slot = find_overload(&index.fields[self.id.index()], name, descriptor)?;
        self.entry.fields.get(slot)
    }

    /// Method declared directly on this class, keyed by name and descriptor
    /// written in `ns`.
    pub fn method(&self, name: &str, descriptor: &str, ns: NamespaceId) -> Option<&'a MemberEntry> {
        let index = self.tree.indices.get(ns.index())?;
        let slot = find_overload(&index.methods[self.id.index()], name, descriptor)?;
        self.entry.methods.get(slot)
    }
}

fn find_overload(index: &MemberIndex, name: &str, descriptor: &str) -> Option<usize> {
    index
        .get(name)?
        .iter()
        .find(|(desc, _)| desc == descriptor)
        .map(|(_, slot)| *slot as usize)
}

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Debug)]
struct ClassDraft {
    names: Vec<Option<Name>>,
    fields: IndexMap<(Name, Name), Vec<Option<Name>>>,
    methods: IndexMap<(Name, Name), Vec<Option<Name>>>,
}

impl ClassDraft {
    fn new(source_name: Name, namespace_count: usize) -> Self {
        let mut names = vec![None; namespace_count];
        names[0] = Some(source_name);
        Self {
            names,
            fields: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }
}

/// Accumulates rows from a mapping reader, then freezes them into a
/// [`MappingTree`].
///
/// Rows for the same class or member merge: a later non-empty name replaces
/// an earlier one, empty names never erase.
#[derive(Debug)]
pub struct MappingTreeBuilder {
    namespaces: Vec<Name>,
    interner: Interner,
    classes: IndexMap<Name, ClassDraft>,
}

impl MappingTreeBuilder {
    /// Start a tree over `namespaces`, in column order.
    ///
    /// Requires at least two distinct, non-empty namespace names.
    pub fn new<S: AsRef<str>>(namespaces: impl IntoIterator<Item = S>) -> Result<Self, String> {
        let mut interner = Interner::new();
        let mut declared: Vec<Name> = Vec::new();
        for ns in namespaces {
            let ns = ns.as_ref();
            if ns.is_empty() {
                return Err("empty namespace name".to_string());
            }
            if declared.iter().any(|existing| existing == ns) {
                return Err(format!("duplicate namespace `{}`", ns));
            }
            declared.push(interner.intern(ns));
        }
        if declared.len() < 2 {
            return Err(format!(
                "expected at least 2 namespaces, found {}",
                declared.len()
            ));
        }
        if declared.len() > u16::MAX as usize {
            return Err("too many namespaces".to_string());
        }
        Ok(Self {
            namespaces: declared,
            interner,
            classes: IndexMap::new(),
        })
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Record a class row, one name per namespace.
    pub fn visit_class<S: AsRef<str>>(
        &mut self,
        names: impl IntoIterator<Item = Option<S>>,
    ) -> Result<(), String> {
        let names = self.collect_names(names)?;
        let source = names[0].clone().ok_or("missing source class name")?;
        let draft = self.draft(source);
        merge_names(&mut draft.names, names);
        Ok(())
    }

    /// Record a field row. `owner` and `descriptor` are in the source namespace.
    pub fn visit_field<S: AsRef<str>>(
        &mut self,
        owner: &str,
        descriptor: &str,
        names: impl IntoIterator<Item = Option<S>>,
    ) -> Result<(), String> {
        self.visit_member(MemberKind::Field, owner, descriptor, names)
    }

    /// Record a method row. `owner` and `descriptor` are in the source namespace.
    pub fn visit_method<S: AsRef<str>>(
        &mut self,
        owner: &str,
        descriptor: &str,
        names: impl IntoIterator<Item = Option<S>>,
    ) -> Result<(), String> {
        self.visit_member(MemberKind::Method, owner, descriptor, names)
    }

    fn visit_member<S: AsRef<str>>(
        &mut self,
        kind: MemberKind,
        owner: &str,
        descriptor: &str,
        names: impl IntoIterator<Item = Option<S>>,
    ) -> Result<(), String> {
        if owner.is_empty() {
            return Err("missing member owner".to_string());
        }
        validate_descriptor(descriptor).map_err(|e| e.to_string())?;
        if kind == MemberKind::Method && !descriptor.starts_with('(') {
            return Err(format!("`{}` is not a method descriptor", descriptor));
        }
        if kind == MemberKind::Field && descriptor.starts_with('(') {
            return Err(format!("`{}` is not a field descriptor", descriptor));
        }

        let names = self.collect_names(names)?;
        let source = names[0].clone().ok_or("missing source member name")?;
        let owner = self.interner.intern(owner);
        let descriptor = self.interner.intern(descriptor);
        let namespace_count = self.namespaces.len();

        let draft = self.draft(owner);
        let members = match kind {
            MemberKind::Field => &mut draft.fields,
            MemberKind::Method => &mut draft.methods,
        };
        let slot = members
            .entry((source, descriptor))
            .or_insert_with(|| vec![None; namespace_count]);
        merge_names(slot, names);
        Ok(())
    }

    fn collect_names<S: AsRef<str>>(
        &mut self,
        names: impl IntoIterator<Item = Option<S>>,
    ) -> Result<Vec<Option<Name>>, String> {
        let names: Vec<Option<Name>> = names
            .into_iter()
            .map(|name| {
                name.filter(|n| !n.as_ref().is_empty())
                    .map(|n| self.interner.intern(n.as_ref()))
            })
            .collect();
        if names.len() != self.namespaces.len() {
            return Err(format!(
                "expected {} names, found {}",
                self.namespaces.len(),
                names.len()
            ));
        }
        Ok(names)
    }

    fn draft(&mut self, source_name: Name) -> &mut ClassDraft {
        let namespace_count = self.namespaces.len();
        self.classes
            .entry(source_name.clone())
            .or_insert_with(|| ClassDraft::new(source_name, namespace_count))
    }

    /// Freeze the accumulated rows and build every namespace index.
    pub fn build(mut self) -> MappingTree {
        let namespace_count = self.namespaces.len();

        let classes: Vec<ClassEntry> = std::mem::take(&mut self.classes)
            .into_values()
            .map(|draft| ClassEntry {
                names: draft.names.into_boxed_slice(),
                fields: freeze_members(MemberKind::Field, draft.fields),
                methods: freeze_members(MemberKind::Method, draft.methods),
            })
            .collect();

        let by_source: FxHashMap<Name, ClassId> = classes
            .iter()
            .enumerate()
            .filter_map(|(i, class)| Some((class.names[0].clone()?, ClassId(i as u32))))
            .collect();

        let indices = (0..namespace_count)
            .map(|ns| {
                index_namespace(
                    &classes,
                    NamespaceId(ns as u16),
                    &self.namespaces[ns],
                    &by_source,
                    &mut self.interner,
                )
            })
            .collect();
        debug!(
            "[INTERMAP] indexed {} classes, {} distinct names",
            classes.len(),
            self.interner.len()
        );

        MappingTree {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            namespaces: self.namespaces.into_boxed_slice(),
            classes,
            indices,
        }
    }
}

fn merge_names(slot: &mut [Option<Name>], names: Vec<Option<Name>>) {
    for (existing, name) in slot.iter_mut().zip(names) {
        if name.is_some() {
            *existing = name;
        }
    }
}

fn freeze_members(
    kind: MemberKind,
    members: IndexMap<(Name, Name), Vec<Option<Name>>>,
) -> Vec<MemberEntry> {
    members
        .into_iter()
        .map(|((_, descriptor), names)| MemberEntry {
            kind,
            descriptor,
            names: names.into_boxed_slice(),
        })
        .collect()
}

fn index_namespace(
    classes: &[ClassEntry],
    ns: NamespaceId,
    namespace: &str,
    by_source: &FxHashMap<Name, ClassId>,
    interner: &mut Interner,
) -> NamespaceIndex {
    let mut index = NamespaceIndex {
        classes: FxHashMap::default(),
        fields: Vec::with_capacity(classes.len()),
        methods: Vec::with_capacity(classes.len()),
    };

    for (i, class) in classes.iter().enumerate() {
        if let Some(name) = &class.names[ns.index()] {
            // First declaration keeps the name; later ones stay reachable
            // through their other namespaces only.
            match index.classes.entry(name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(ClassId(i as u32));
                }
                Entry::Occupied(first) => warn!(
                    "[INTERMAP] '{}' in namespace '{}' already names '{}', ignoring it for '{}'",
                    name,
                    namespace,
                    source_name(&classes[first.get().index()]),
                    source_name(class)
                ),
            }
        }
        index
            .fields
            .push(index_members(&class.fields, ns, classes, by_source, interner));
        index
            .methods
            .push(index_members(&class.methods, ns, classes, by_source, interner));
    }
    index
}

fn source_name(class: &ClassEntry) -> &str {
    class.names[NamespaceId::SOURCE.index()]
        .as_deref()
        .unwrap_or("<unnamed>")
}

fn index_members(
    members: &[MemberEntry],
    ns: NamespaceId,
    classes: &[ClassEntry],
    by_source: &FxHashMap<Name, ClassId>,
    interner: &mut Interner,
) -> MemberIndex {
    let mut index = MemberIndex::default();
    for (slot, member) in members.iter().enumerate() {
        let Some(name) = member.names[ns.index()].clone() else {
            continue;
        };
        let descriptor = if ns == NamespaceId::SOURCE {
            member.descriptor.clone()
        } else {
            // Descriptors were validated on insert.
            match remap_descriptor(&member.descriptor, |class| {
                let id = by_source.get(class)?;
                classes[id.index()].names[ns.index()].clone()
            }) {
                Ok(mapped) => interner.intern_string(mapped),
                Err(_) => member.descriptor.clone(),
            }
        };
        index
            .entry(name)
            .or_default()
            .push((descriptor, slot as u32));
    }
    index
}
