//! Field and method descriptor walking.
//!
//! Descriptors embed internal class names as `L<name>;`. Remapping a
//! descriptor means substituting each embedded name while validating the
//! surrounding grammar:
//!
//! ```text
//! FieldType  := B | C | D | F | I | J | S | Z | L<name>; | [FieldType
//! Method     := ( FieldType* ) ( FieldType | V )
//! ```

use thiserror::Error;

/// A descriptor that does not follow the field/method descriptor grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("Empty descriptor")]
    Empty,

    #[error("Malformed descriptor `{descriptor}` at offset {offset}")]
    Malformed { descriptor: String, offset: usize },
}

fn malformed(descriptor: &str, offset: usize) -> DescriptorError {
    DescriptorError::Malformed {
        descriptor: descriptor.to_string(),
        offset,
    }
}

/// Rewrite every class name embedded in `descriptor`.
///
/// `map` receives each internal name and returns its replacement, or `None`
/// to keep the name as written.
pub fn remap_descriptor<F, S>(descriptor: &str, mut map: F) -> Result<String, DescriptorError>
where
    F: FnMut(&str) -> Option<S>,
    S: AsRef<str>,
{
    let bytes = descriptor.as_bytes();
    if bytes.is_empty() {
        return Err(DescriptorError::Empty);
    }

    let mut out = String::with_capacity(descriptor.len());
    let mut pos = 0;

    if bytes[0] == b'(' {
        out.push('(');
        pos = 1;
        loop {
            match bytes.get(pos) {
                Some(b')') => {
                    out.push(')');
                    pos += 1;
                    break;
                }
                Some(_) => pos = remap_field_type(descriptor, pos, false, &mut out, &mut map)?,
                None => return Err(malformed(descriptor, pos)),
            }
        }
        pos = remap_field_type(descriptor, pos, true, &mut out, &mut map)?;
    } else {
        pos = remap_field_type(descriptor, pos, false, &mut out, &mut map)?;
    }

    if pos != bytes.len() {
        return Err(malformed(descriptor, pos));
    }
    Ok(out)
}

fn remap_field_type<F, S>(
    descriptor: &str,
    start: usize,
    allow_void: bool,
    out: &mut String,
    map: &mut F,
) -> Result<usize, DescriptorError>
where
    F: FnMut(&str) -> Option<S>,
    S: AsRef<str>,
{
    let bytes = descriptor.as_bytes();
    let mut pos = start;
    while bytes.get(pos) == Some(&b'[') {
        out.push('[');
        pos += 1;
    }
    let is_array = pos > start;

    match bytes.get(pos) {
        Some(&tag @ (b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z')) => {
            out.push(tag as char);
            Ok(pos + 1)
        }
        Some(b'V') if allow_void && !is_array => {
            out.push('V');
            Ok(pos + 1)
        }
        Some(b'L') => {
            let name_start = pos + 1;
            let end = descriptor[name_start..]
                .find(';')
                .map(|i| name_start + i)
                .ok_or_else(|| malformed(descriptor, pos))?;
            let name = &descriptor[name_start..end];
            if name.is_empty() {
                return Err(malformed(descriptor, name_start));
            }
            out.push('L');
            match map(name) {
                Some(mapped) => out.push_str(mapped.as_ref()),
                None => out.push_str(name),
            }
            out.push(';');
            Ok(end + 1)
        }
        _ => Err(malformed(descriptor, pos)),
    }
}

/// Check a descriptor against the grammar without rewriting it.
pub fn validate_descriptor(descriptor: &str) -> Result<(), DescriptorError> {
    remap_descriptor(descriptor, |_| None::<&str>).map(|_| ())
}

/// Collect the internal class names a descriptor references, in order.
pub fn descriptor_classes(descriptor: &str) -> Result<Vec<String>, DescriptorError> {
    let mut names = Vec::new();
    remap_descriptor(descriptor, |name| {
        names.push(name.to_string());
        None::<&str>
    })?;
    Ok(names)
}
