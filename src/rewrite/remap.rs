//! Structural remapping of a [`ClassModule`] through a [`Remapper`].

use super::module::{
    Annotation, AnnotationValue, ClassModule, FieldNode, InnerClass, Instruction, MethodNode,
};
use super::{Remapper, RewriteError};
use crate::base::DescriptorError;
use crate::base::constants::{CONSTRUCTOR_NAME, STATIC_INIT_NAME};

/// Produce a remapped copy of `module`. Raw attributes are copied verbatim.
pub fn remap_module(module: &ClassModule, remapper: &dyn Remapper) -> Result<ClassModule, RewriteError> {
    let pass = ModulePass {
        class: &module.name,
        remapper,
    };
    pass.module(module)
}

struct ModulePass<'a> {
    class: &'a str,
    remapper: &'a dyn Remapper,
}

impl ModulePass<'_> {
    fn err(&self, context: String, source: DescriptorError) -> RewriteError {
        RewriteError::Descriptor {
            class: self.class.to_string(),
            context,
            source,
        }
    }

    fn internal_name(&self, name: &str) -> Result<String, RewriteError> {
        self.remapper
            .map_internal_name(name)
            .map_err(|e| self.err(format!("type `{}`", name), e))
    }

    fn types(&self, names: &[String]) -> Result<Vec<String>, RewriteError> {
        names.iter().map(|name| self.internal_name(name)).collect()
    }

    fn module(&self, module: &ClassModule) -> Result<ClassModule, RewriteError> {
        let remapper = self.remapper;
        Ok(ClassModule {
            access: module.access,
            name: remapper.map_type(&module.name),
            super_name: module.super_name.as_deref().map(|s| remapper.map_type(s)),
            interfaces: self.types(&module.interfaces)?,
            fields: module
                .fields
                .iter()
                .map(|field| self.field(field))
                .collect::<Result<_, _>>()?,
            methods: module
                .methods
                .iter()
                .map(|method| self.method(method))
                .collect::<Result<_, _>>()?,
            inner_classes: module
                .inner_classes
                .iter()
                .map(|inner| self.inner_class(inner))
                .collect(),
            nest_host: module.nest_host.as_deref().map(|s| remapper.map_type(s)),
            nest_members: self.types(&module.nest_members)?,
            permitted_subclasses: self.types(&module.permitted_subclasses)?,
            visible_annotations: self.annotations(&module.visible_annotations)?,
            invisible_annotations: self.annotations(&module.invisible_annotations)?,
            visible_type_annotations: self.annotations(&module.visible_type_annotations)?,
            invisible_type_annotations: self.annotations(&module.invisible_type_annotations)?,
            attrs: module.attrs.clone(),
        })
    }

    fn field(&self, field: &FieldNode) -> Result<FieldNode, RewriteError> {
        Ok(FieldNode {
            access: field.access,
            name: self
                .remapper
                .map_field_name(self.class, &field.name, &field.descriptor),
            descriptor: self
                .remapper
                .map_descriptor(&field.descriptor)
                .map_err(|e| self.err(format!("field `{}`", field.name), e))?,
            visible_annotations: self.annotations(&field.visible_annotations)?,
            invisible_annotations: self.annotations(&field.invisible_annotations)?,
        })
    }

    fn method(&self, method: &MethodNode) -> Result<MethodNode, RewriteError> {
        let name = if is_initializer(&method.name) {
            method.name.clone()
        } else {
            self.remapper
                .map_method_name(self.class, &method.name, &method.descriptor)
        };
        Ok(MethodNode {
            access: method.access,
            name,
            descriptor: self
                .remapper
                .map_method_descriptor(&method.descriptor)
                .map_err(|e| self.err(format!("method `{}{}`", method.name, method.descriptor), e))?,
            exceptions: self.types(&method.exceptions)?,
            instructions: method
                .instructions
                .iter()
                .map(|insn| self.instruction(insn))
                .collect::<Result<_, _>>()?,
            visible_annotations: self.annotations(&method.visible_annotations)?,
            invisible_annotations: self.annotations(&method.invisible_annotations)?,
        })
    }

    fn instruction(&self, insn: &Instruction) -> Result<Instruction, RewriteError> {
        let remapper = self.remapper;
        Ok(match insn {
            Instruction::Type { op, operand } => Instruction::Type {
                op: *op,
                operand: self.internal_name(operand)?,
            },
            Instruction::Field {
                op,
                owner,
                name,
                descriptor,
            } => Instruction::Field {
                op: *op,
                owner: self.internal_name(owner)?,
                name: remapper.map_field_name(owner, name, descriptor),
                descriptor: remapper
                    .map_descriptor(descriptor)
                    .map_err(|e| self.err(format!("field reference `{}.{}`", owner, name), e))?,
            },
            Instruction::Method {
                op,
                owner,
                name,
                descriptor,
                interface,
            } => Instruction::Method {
                op: *op,
                owner: self.internal_name(owner)?,
                name: if is_initializer(name) {
                    name.clone()
                } else {
                    remapper.map_method_name(owner, name, descriptor)
                },
                descriptor: remapper
                    .map_method_descriptor(descriptor)
                    .map_err(|e| self.err(format!("method reference `{}.{}`", owner, name), e))?,
                interface: *interface,
            },
            Instruction::MultiANewArray {
                descriptor,
                dimensions,
            } => Instruction::MultiANewArray {
                descriptor: remapper
                    .map_descriptor(descriptor)
                    .map_err(|e| self.err("multianewarray".to_string(), e))?,
                dimensions: *dimensions,
            },
            Instruction::Other(opcode) => Instruction::Other(*opcode),
        })
    }

    fn inner_class(&self, inner: &InnerClass) -> InnerClass {
        let remapper = self.remapper;
        InnerClass {
            name: remapper.map_type(&inner.name),
            outer_name: inner.outer_name.as_deref().map(|s| remapper.map_type(s)),
            inner_name: inner
                .inner_name
                .as_deref()
                .map(|simple| inner_simple_name(remapper, &inner.name, simple)),
            access: inner.access,
        }
    }

    fn annotations(&self, annotations: &[Annotation]) -> Result<Vec<Annotation>, RewriteError> {
        annotations.iter().map(|a| self.annotation(a)).collect()
    }

    fn annotation(&self, annotation: &Annotation) -> Result<Annotation, RewriteError> {
        Ok(Annotation {
            descriptor: self
                .remapper
                .map_descriptor(&annotation.descriptor)
                .map_err(|e| self.err(format!("annotation `{}`", annotation.descriptor), e))?,
            values: annotation
                .values
                .iter()
                .map(|(name, value)| {
                    self.annotation_value(value)
                        .map(|mapped| (name.clone(), mapped))
                })
                .collect::<Result<_, _>>()?,
        })
    }

    fn annotation_value(&self, value: &AnnotationValue) -> Result<AnnotationValue, RewriteError> {
        let remapper = self.remapper;
        Ok(match value {
            AnnotationValue::Const(constant) => AnnotationValue::Const(constant.clone()),
            AnnotationValue::Enum { descriptor, value } => AnnotationValue::Enum {
                descriptor: remapper
                    .map_descriptor(descriptor)
                    .map_err(|e| self.err(format!("enum constant `{}`", value), e))?,
                value: value.clone(),
            },
            AnnotationValue::Class(descriptor) if descriptor == "V" => {
                AnnotationValue::Class(descriptor.clone())
            }
            AnnotationValue::Class(descriptor) => AnnotationValue::Class(
                remapper
                    .map_descriptor(descriptor)
                    .map_err(|e| self.err("class literal".to_string(), e))?,
            ),
            AnnotationValue::Nested(nested) => AnnotationValue::Nested(self.annotation(nested)?),
            AnnotationValue::Array(values) => AnnotationValue::Array(
                values
                    .iter()
                    .map(|v| self.annotation_value(v))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

fn is_initializer(name: &str) -> bool {
    name == CONSTRUCTOR_NAME || name == STATIC_INIT_NAME
}

/// Simple name of a remapped inner class: the part of its new name after
/// the last `$`, skipping the digits of anonymous classes. Falls back to
/// the old simple name when the new name has no `$`.
fn inner_simple_name(remapper: &dyn Remapper, name: &str, simple: &str) -> String {
    let mapped = remapper.map_type(name);
    match mapped.rfind('$') {
        Some(index) => mapped[index + 1..]
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .to_string(),
        None => simple.to_string(),
    }
}
