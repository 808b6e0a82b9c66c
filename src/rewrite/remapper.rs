//! The renaming strategy the rewrite pass is written against.

use crate::base::{DescriptorError, remap_descriptor};
use crate::resolve::SymbolResolver;

/// Maps the three kinds of symbolic reference found in a class module.
///
/// Implementations only decide names; walking descriptors and the module
/// itself is done by the provided methods and the rewrite pass.
pub trait Remapper {
    /// Map an internal class name (`a/b/C`). Unmapped names come back
    /// unchanged.
    fn map_type(&self, internal_name: &str) -> String;

    /// Map a method name referenced through `owner`.
    fn map_method_name(&self, owner: &str, name: &str, descriptor: &str) -> String;

    /// Map a field name referenced through `owner`.
    fn map_field_name(&self, owner: &str, name: &str, descriptor: &str) -> String;

    /// Map an internal name that may also be an array descriptor, as found
    /// in type instructions (`[Ljava/lang/String;`).
    fn map_internal_name(&self, name: &str) -> Result<String, DescriptorError> {
        if name.starts_with('[') {
            self.map_descriptor(name)
        } else {
            Ok(self.map_type(name))
        }
    }

    /// Map every class name embedded in a field or method descriptor.
    fn map_descriptor(&self, descriptor: &str) -> Result<String, DescriptorError> {
        remap_descriptor(descriptor, |name| Some(self.map_type(name)))
    }

    /// Like [`map_descriptor`](Self::map_descriptor), but rejects field
    /// descriptors.
    fn map_method_descriptor(&self, descriptor: &str) -> Result<String, DescriptorError> {
        if !descriptor.starts_with('(') {
            return Err(DescriptorError::Malformed {
                descriptor: descriptor.to_string(),
                offset: 0,
            });
        }
        self.map_descriptor(descriptor)
    }
}

impl Remapper for SymbolResolver<'_> {
    fn map_type(&self, internal_name: &str) -> String {
        self.resolve_type(internal_name)
            .unwrap_or(internal_name)
            .to_string()
    }

    fn map_method_name(&self, owner: &str, name: &str, descriptor: &str) -> String {
        self.resolve_method(owner, name, descriptor).to_string()
    }

    fn map_field_name(&self, owner: &str, name: &str, descriptor: &str) -> String {
        self.resolve_field(owner, name, descriptor).to_string()
    }
}

impl<R: Remapper + ?Sized> Remapper for &R {
    fn map_type(&self, internal_name: &str) -> String {
        (**self).map_type(internal_name)
    }

    fn map_method_name(&self, owner: &str, name: &str, descriptor: &str) -> String {
        (**self).map_method_name(owner, name, descriptor)
    }

    fn map_field_name(&self, owner: &str, name: &str, descriptor: &str) -> String {
        (**self).map_field_name(owner, name, descriptor)
    }
}
