//! In-memory class module.
//!
//! Byte-level reading and writing belong to the host; this model keeps
//! exactly the parts of a class that carry symbolic names, plus opaque
//! attributes that are passed through untouched.

use std::collections::BTreeSet;

use crate::base::{DescriptorError, Name, descriptor_classes};
use crate::hierarchy::HierarchyEntry;

/// One compiled class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassModule {
    pub access: u16,
    /// Internal name, `a/b/C`.
    pub name: String,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldNode>,
    pub methods: Vec<MethodNode>,
    pub inner_classes: Vec<InnerClass>,
    pub nest_host: Option<String>,
    pub nest_members: Vec<String>,
    pub permitted_subclasses: Vec<String>,
    pub visible_annotations: Vec<Annotation>,
    pub invisible_annotations: Vec<Annotation>,
    pub visible_type_annotations: Vec<Annotation>,
    pub invisible_type_annotations: Vec<Annotation>,
    /// Non-standard attributes, carried verbatim.
    pub attrs: Vec<RawAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNode {
    pub access: u16,
    pub name: String,
    pub descriptor: String,
    pub visible_annotations: Vec<Annotation>,
    pub invisible_annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodNode {
    pub access: u16,
    pub name: String,
    pub descriptor: String,
    pub exceptions: Vec<String>,
    pub instructions: Vec<Instruction>,
    pub visible_annotations: Vec<Annotation>,
    pub invisible_annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClass {
    pub name: String,
    pub outer_name: Option<String>,
    pub inner_name: Option<String>,
    pub access: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOp {
    New,
    ANewArray,
    CheckCast,
    InstanceOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    GetStatic,
    PutStatic,
    GetField,
    PutField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeOp {
    Virtual,
    Special,
    Static,
    Interface,
}

/// A method body instruction. Only instructions that reference symbols are
/// modelled; everything else is an opaque opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `operand` is an internal name or an array descriptor.
    Type { op: TypeOp, operand: String },
    Field {
        op: FieldOp,
        owner: String,
        name: String,
        descriptor: String,
    },
    Method {
        op: InvokeOp,
        owner: String,
        name: String,
        descriptor: String,
        interface: bool,
    },
    MultiANewArray { descriptor: String, dimensions: u8 },
    Other(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub descriptor: String,
    pub values: Vec<(String, AnnotationValue)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    /// Primitive or string constant, stored in its textual form.
    Const(String),
    Enum { descriptor: String, value: String },
    /// A class literal, as a descriptor (`V` for `void.class`).
    Class(String),
    Nested(Annotation),
    Array(Vec<AnnotationValue>),
}

impl Annotation {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.push((name.into(), value));
        self
    }
}

impl ClassModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Drop metadata that may still name pre-rewrite symbols: annotations,
    /// inner classes, nest members, permitted subclasses and raw attributes.
    pub fn clear_reflective_metadata(&mut self) {
        self.inner_classes.clear();
        self.nest_members.clear();
        self.permitted_subclasses.clear();
        self.visible_annotations.clear();
        self.invisible_annotations.clear();
        self.visible_type_annotations.clear();
        self.invisible_type_annotations.clear();
        self.attrs.clear();
    }

    pub fn clear_members(&mut self) {
        self.fields.clear();
        self.methods.clear();
    }

    /// Feed `other` into this module the way a class reader feeds an
    /// existing node: header values are replaced, every list is appended to.
    pub fn absorb(&mut self, other: ClassModule) {
        self.access = other.access;
        self.name = other.name;
        self.super_name = other.super_name;
        self.interfaces = other.interfaces;
        if other.nest_host.is_some() {
            self.nest_host = other.nest_host;
        }
        self.fields.extend(other.fields);
        self.methods.extend(other.methods);
        self.inner_classes.extend(other.inner_classes);
        self.nest_members.extend(other.nest_members);
        self.permitted_subclasses.extend(other.permitted_subclasses);
        self.visible_annotations.extend(other.visible_annotations);
        self.invisible_annotations.extend(other.invisible_annotations);
        self.visible_type_annotations.extend(other.visible_type_annotations);
        self.invisible_type_annotations.extend(other.invisible_type_annotations);
        self.attrs.extend(other.attrs);
    }

    /// Every internal class name this module mentions, including names
    /// embedded in descriptors.
    pub fn referenced_types(&self) -> Result<BTreeSet<String>, DescriptorError> {
        let mut names = BTreeSet::new();
        names.insert(self.name.clone());
        names.extend(self.super_name.iter().cloned());
        names.extend(self.interfaces.iter().cloned());
        names.extend(self.nest_host.iter().cloned());
        names.extend(self.nest_members.iter().cloned());
        names.extend(self.permitted_subclasses.iter().cloned());
        for inner in &self.inner_classes {
            names.insert(inner.name.clone());
            names.extend(inner.outer_name.iter().cloned());
        }

        for field in &self.fields {
            names.extend(descriptor_classes(&field.descriptor)?);
        }
        for method in &self.methods {
            names.extend(descriptor_classes(&method.descriptor)?);
            names.extend(method.exceptions.iter().cloned());
            for insn in &method.instructions {
                match insn {
                    Instruction::Type { operand, .. } => {
                        if operand.starts_with('[') {
                            names.extend(descriptor_classes(operand)?);
                        } else {
                            names.insert(operand.clone());
                        }
                    }
                    Instruction::Field { owner, descriptor, .. }
                    | Instruction::Method { owner, descriptor, .. } => {
                        if !owner.starts_with('[') {
                            names.insert(owner.clone());
                        }
                        names.extend(descriptor_classes(descriptor)?);
                    }
                    Instruction::MultiANewArray { descriptor, .. } => {
                        names.extend(descriptor_classes(descriptor)?);
                    }
                    Instruction::Other(_) => {}
                }
            }
        }
        Ok(names)
    }
}

impl From<&ClassModule> for HierarchyEntry {
    fn from(module: &ClassModule) -> Self {
        Self {
            super_name: module.super_name.as_deref().map(Name::new),
            interfaces: module.interfaces.iter().map(Name::new).collect(),
            excluded: false,
        }
    }
}
