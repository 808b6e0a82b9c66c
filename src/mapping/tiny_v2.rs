//! Tiny v2 reader.
//!
//! ```text
//! tiny	2	0	named	intermediary
//! 	escaped-names
//! c	com/example/Foo	net/minecraft/class_1
//! 	c	A class comment
//! 	f	I	count	field_1
//! 	m	()V	doWork	method_1
//! 		p	1	arg
//! 		v	2	0	-1	local
//! 			c	A variable comment
//! ```
//!
//! Indentation depth encodes nesting. Parameters, local variables and
//! comments are checked for shape and then dropped: only classes, fields and
//! methods reach the tree.

use std::borrow::Cow;
use std::io::BufRead;

use super::format::LineReader;
use super::tree::{MappingTree, MappingTreeBuilder, MemberKind};
use super::MappingError;
use crate::base::Name;

const ESCAPED_NAMES: &str = "escaped-names";

/// What the most recent line at each depth opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Header,
    Class,
    Member(MemberKind),
    /// A comment line, which cannot have children.
    Leaf,
    /// A parameter or local variable, which may carry a comment.
    Variable,
}

pub(crate) fn read<B: BufRead>(reader: B) -> Result<MappingTree, MappingError> {
    let mut lines = LineReader::new(reader);

    let mut builder = {
        let (line_no, header) = lines
            .next_line()?
            .ok_or_else(|| MappingError::parse(1, "missing header"))?;
        let columns: Vec<&str> = header.split('\t').collect();
        if columns.len() < 3 || columns[0] != "tiny" || columns[1] != "2" {
            return Err(MappingError::parse(line_no, "expected `tiny\\t2` header"));
        }
        if columns[2].parse::<u32>().is_err() {
            return Err(MappingError::parse(
                line_no,
                format!("invalid minor version `{}`", columns[2]),
            ));
        }
        MappingTreeBuilder::new(&columns[3..])
            .map_err(|message| MappingError::parse(line_no, message))?
    };
    let namespace_count = builder.namespace_count();

    let mut escaped = false;
    let mut current_class: Option<Name> = None;
    // scopes[d] is what the last line at depth d opened.
    let mut scopes: Vec<Scope> = vec![Scope::Header];

    while let Some((line_no, line)) = lines.next_line()? {
        if line.is_empty() {
            continue;
        }
        let depth = line.len() - line.trim_start_matches('\t').len();
        let columns: Vec<&str> = line[depth..].split('\t').collect();
        let parse_err = |message: String| MappingError::parse(line_no, message);

        let parent = match depth {
            0 => None,
            _ => Some(*scopes.get(depth - 1).ok_or_else(|| {
                parse_err(format!("unexpected indentation depth {}", depth))
            })?),
        };

        let opened = match (parent, columns[0]) {
            (None, "c") => {
                expect_columns(&columns, 1 + namespace_count, line_no)?;
                let names = unescape_all(&columns[1..], escaped).map_err(parse_err)?;
                builder
                    .visit_class(names.iter().map(|name| Some(name.as_ref())))
                    .map_err(parse_err)?;
                current_class = Some(Name::new(names[0].as_ref()));
                Scope::Class
            }
            (Some(Scope::Header), key) => {
                if columns.len() > 2 {
                    return Err(parse_err(format!("malformed property `{}`", key)));
                }
                if key == ESCAPED_NAMES {
                    escaped = true;
                }
                Scope::Leaf
            }
            (Some(Scope::Class), kind @ ("f" | "m")) => {
                let owner = current_class
                    .clone()
                    .ok_or_else(|| parse_err("member outside of a class".to_string()))?;
                expect_columns(&columns, 2 + namespace_count, line_no)?;
                let descriptor = unescape(columns[1], escaped).map_err(parse_err)?;
                let names = unescape_all(&columns[2..], escaped).map_err(parse_err)?;
                let names = names.iter().map(|name| Some(name.as_ref()));
                if kind == "f" {
                    builder.visit_field(&owner, &descriptor, names).map_err(parse_err)?;
                    Scope::Member(MemberKind::Field)
                } else {
                    builder.visit_method(&owner, &descriptor, names).map_err(parse_err)?;
                    Scope::Member(MemberKind::Method)
                }
            }
            (Some(Scope::Class | Scope::Member(_) | Scope::Variable), "c") => {
                expect_columns(&columns, 2, line_no)?;
                unescape(columns[1], true).map_err(parse_err)?;
                Scope::Leaf
            }
            (Some(Scope::Member(MemberKind::Method)), "p") => {
                expect_columns(&columns, 2 + namespace_count, line_no)?;
                parse_index(columns[1], "parameter index", false).map_err(parse_err)?;
                unescape_all(&columns[2..], escaped).map_err(parse_err)?;
                Scope::Variable
            }
            (Some(Scope::Member(MemberKind::Method)), "v") => {
                expect_columns(&columns, 4 + namespace_count, line_no)?;
                parse_index(columns[1], "local variable index", false).map_err(parse_err)?;
                parse_index(columns[2], "local variable start offset", false).map_err(parse_err)?;
                parse_index(columns[3], "local variable table index", true).map_err(parse_err)?;
                unescape_all(&columns[4..], escaped).map_err(parse_err)?;
                Scope::Variable
            }
            (_, kind) => {
                return Err(parse_err(format!(
                    "unexpected `{}` at depth {}",
                    kind, depth
                )));
            }
        };

        scopes.truncate(depth + 1);
        scopes.resize(depth + 1, Scope::Leaf);
        scopes[depth] = opened;
    }

    Ok(builder.build())
}

fn expect_columns(columns: &[&str], expected: usize, line_no: usize) -> Result<(), MappingError> {
    if columns.len() == expected {
        Ok(())
    } else {
        Err(MappingError::parse(
            line_no,
            format!("expected {} columns, found {}", expected, columns.len()),
        ))
    }
}

fn parse_index(value: &str, what: &str, allow_negative_one: bool) -> Result<(), String> {
    if allow_negative_one && value == "-1" {
        return Ok(());
    }
    value
        .parse::<u32>()
        .map(|_| ())
        .map_err(|_| format!("invalid {} `{}`", what, value))
}

fn unescape_all<'s>(values: &[&'s str], escaped: bool) -> Result<Vec<Cow<'s, str>>, String> {
    values.iter().map(|&value| unescape(value, escaped)).collect()
}

/// Undo tiny v2 name escaping (`\\ \n \r \t \0`).
fn unescape(value: &str, escaped: bool) -> Result<Cow<'_, str>, String> {
    if !escaped || !value.contains('\\') {
        return Ok(Cow::Borrowed(value));
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some(other) => return Err(format!("invalid escape `\\{}`", other)),
            None => return Err("dangling escape".to_string()),
        }
    }
    Ok(Cow::Owned(out))
}
