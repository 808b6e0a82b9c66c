#![allow(clippy::unwrap_used, clippy::expect_used)]

mod tests_source;

pub(super) const RUNTIME_MAPPINGS: &str = "v1\tnamed\tintermediary
CLASS\tcom/example/Foo\tnet/minecraft/class_1
CLASS\tcom/example/Base\tnet/minecraft/class_2
METHOD\tcom/example/Foo\t()V\tdoWork\tmethod_1
METHOD\tcom/example/Base\t()V\ttick\tmethod_2
FIELD\tcom/example/Base\tI\tcount\tfield_1
";
