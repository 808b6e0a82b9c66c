//! Tiny v1 reader.
//!
//! ```text
//! v1	named	intermediary
//! # INTERMEDIARY-COUNTER class 42
//! CLASS	com/example/Foo	net/minecraft/class_1
//! FIELD	com/example/Foo	I	count	field_1
//! METHOD	com/example/Foo	()V	doWork	method_1
//! ```
//!
//! Member owners and descriptors are written in the first namespace. Member
//! rows may appear before the row of the class that owns them.

use std::io::BufRead;

use super::format::LineReader;
use super::tree::{MappingTree, MappingTreeBuilder};
use super::MappingError;

pub(crate) fn read<B: BufRead>(reader: B) -> Result<MappingTree, MappingError> {
    let mut lines = LineReader::new(reader);

    let mut builder = {
        let (line_no, header) = lines
            .next_line()?
            .ok_or_else(|| MappingError::parse(1, "missing header"))?;
        let mut columns = header.split('\t');
        if columns.next() != Some("v1") {
            return Err(MappingError::parse(line_no, "expected `v1` header"));
        }
        MappingTreeBuilder::new(columns).map_err(|message| MappingError::parse(line_no, message))?
    };
    let namespace_count = builder.namespace_count();

    while let Some((line_no, line)) = lines.next_line()? {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        let result = match columns[0] {
            "CLASS" => {
                expect_columns(&columns, 1 + namespace_count, line_no)?;
                builder.visit_class(columns[1..].iter().map(|name| Some(*name)))
            }
            "FIELD" => {
                expect_columns(&columns, 3 + namespace_count, line_no)?;
                builder.visit_field(
                    columns[1],
                    columns[2],
                    columns[3..].iter().map(|name| Some(*name)),
                )
            }
            "METHOD" => {
                expect_columns(&columns, 3 + namespace_count, line_no)?;
                builder.visit_method(
                    columns[1],
                    columns[2],
                    columns[3..].iter().map(|name| Some(*name)),
                )
            }
            other => Err(format!("unknown row kind `{}`", other)),
        };
        result.map_err(|message| MappingError::parse(line_no, message))?;
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
