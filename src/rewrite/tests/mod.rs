#![allow(clippy::unwrap_used, clippy::expect_used)]


use std::sync::Arc;

use super::*;
use crate::hierarchy::StaticHierarchy;
use crate::mapping::MappingReader;

pub(super) const MAPPINGS: &str = "tiny\t2\t0\tnamed\ttarget
c\tFoo\tC1
\tf\tLBase;\tpartner\tf_partner
\tm\t()V\tdoWork\tm1
\tm\t(LBase;)LFoo;\tlink\tm_link
c\tBase\tC0
\tf\tI\tcount\tf_count
\tm\t()V\ttick\tm_tick
c\tIface\tI1
c\tFoo$Inner\tC1$C3
c\tFoo$1\tC1$5
c\tAnno\tA1
c\tKind\tK1
";

pub(super) fn driver() -> RewriteDriver {
    let tree = Arc::new(MappingReader::read_str(MAPPINGS).unwrap());
    let hierarchy = StaticHierarchy::new()
        .with_class("FooSubclass", Some("Foo"), Vec::<&str>::new())
        .with_class("Foo", Some("Base"), ["Iface"]);
    RewriteDriver::new(tree, Arc::new(hierarchy), "named", "target").unwrap()
}

/// `FooSubclass extends Foo implements Iface`, touching every kind of
/// reference the rewrite pass handles.
pub(super) fn sample_module() -> ClassModule {
    let init = MethodNode {
        name: "<init>".to_string(),
        descriptor: "()V".to_string(),
        instructions: vec![
            Instruction::Other(0x2a),
            Instruction::Method {
                op: InvokeOp::Special,
                owner: "Foo".to_string(),
                name: "<init>".to_string(),
                descriptor: "()V".to_string(),
                interface: false,
            },
            Instruction::Other(0xb1),
        ],
        ..MethodNode::default()
    };
    let do_work = MethodNode {
        access: 0x0001,
        name: "doWork".to_string(),
        descriptor: "()V".to_string(),
        ..MethodNode::default()
    };
    let run = MethodNode {
        name: "run".to_string(),
        descriptor: "(LFoo;)LBase;".to_string(),
        exceptions: vec!["java/io/IOException".to_string()],
        instructions: vec![
            Instruction::Field {
                op: FieldOp::GetField,
                owner: "FooSubclass".to_string(),
                name: "count".to_string(),
                descriptor: "I".to_string(),
            },
            Instruction::Method {
                op: InvokeOp::Virtual,
                owner: "FooSubclass".to_string(),
                name: "tick".to_string(),
                descriptor: "()V".to_string(),
                interface: false,
            },
            Instruction::Type {
                op: TypeOp::CheckCast,
                operand: "[LFoo;".to_string(),
            },
            Instruction::Type {
                op: TypeOp::New,
                operand: "Foo".to_string(),
            },
            Instruction::MultiANewArray {
                descriptor: "[[LBase;".to_string(),
                dimensions: 2,
            },
            Instruction::Other(0xb0),
        ],
        ..MethodNode::default()
    };

    ClassModule {
        access: 0x0021,
        name: "FooSubclass".to_string(),
        super_name: Some("Foo".to_string()),
        interfaces: vec!["Iface".to_string()],
        fields: vec![FieldNode {
            name: "extra".to_string(),
            descriptor: "LBase;".to_string(),
            ..FieldNode::default()
        }],
        methods: vec![init, do_work, run],
        inner_classes: vec![
            InnerClass {
                name: "Foo$Inner".to_string(),
                outer_name: Some("Foo".to_string()),
                inner_name: Some("Inner".to_string()),
                access: 0x0008,
            },
            InnerClass {
                name: "Foo$1".to_string(),
                outer_name: None,
                inner_name: None,
                access: 0,
            },
        ],
        nest_host: Some("Foo".to_string()),
        visible_annotations: vec![
            Annotation::new("LAnno;")
                .with_value(
                    "kind",
                    AnnotationValue::Enum {
                        descriptor: "LKind;".to_string(),
                        value: "A".to_string(),
                    },
                )
                .with_value("type", AnnotationValue::Class("LFoo;".to_string()))
                .with_value("none", AnnotationValue::Class("V".to_string()))
                .with_value(
                    "names",
                    AnnotationValue::Array(vec![AnnotationValue::Const("x".to_string())]),
                ),
        ],
        attrs: vec![RawAttribute {
            name: "SourceDebugExtension".to_string(),
            data: b"Foo".to_vec(),
        }],
        ..ClassModule::default()
    }
}
