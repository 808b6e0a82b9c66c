//! Mapping format detection and the top-level reader.

use std::fmt;
use std::io::{BufRead, BufReader, Cursor, ErrorKind, Read};

use tracing::debug;

use super::tree::MappingTree;
use super::{MappingError, tiny_v1, tiny_v2};
use crate::base::constants::DETECT_LIMIT;

/// Mapping file formats recognized by [`detect_format`].
///
/// Only the tiny formats can be read; the others are recognized so that the
/// error names what was actually supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingFormat {
    TinyV1,
    TinyV2,
    Enigma,
    Srg,
    Xsrg,
    Tsrg,
    Tsrg2,
    Proguard,
    Unknown,
}

impl MappingFormat {
    /// Human-readable name of the format.
    pub fn name(self) -> &'static str {
        match self {
            Self::TinyV1 => "Tiny v1",
            Self::TinyV2 => "Tiny v2",
            Self::Enigma => "Enigma",
            Self::Srg => "SRG",
            Self::Xsrg => "XSRG",
            Self::Tsrg => "TSRG",
            Self::Tsrg2 => "TSRG2",
            Self::Proguard => "ProGuard",
            Self::Unknown => "unknown",
        }
    }

    /// Whether [`MappingReader`] can read this format.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::TinyV1 | Self::TinyV2)
    }
}

impl fmt::Display for MappingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detect the format of a mapping stream from its first bytes.
///
/// At most [`DETECT_LIMIT`] bytes of `prefix` are inspected.
pub fn detect_format(prefix: &[u8]) -> MappingFormat {
    let prefix = &prefix[..prefix.len().min(DETECT_LIMIT)];

    if prefix.starts_with(b"v1\t") {
        return MappingFormat::TinyV1;
    }
    if prefix.starts_with(b"tiny\t2\t") {
        return MappingFormat::TinyV2;
    }
    if prefix.starts_with(b"tsrg2 ") {
        return MappingFormat::Tsrg2;
    }
    if prefix.starts_with(b"CLASS ") {
        return MappingFormat::Enigma;
    }

    let text = String::from_utf8_lossy(prefix);
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let Some(first) = lines.next() else {
        return MappingFormat::Unknown;
    };

    if ["PK: ", "CL: ", "FD: ", "MD: "]
        .iter()
        .any(|tag| first.starts_with(tag))
    {
        let xsrg = text
            .lines()
            .filter(|line| line.starts_with("FD: "))
            .any(|line| line.split_whitespace().count() == 5);
        return if xsrg {
            MappingFormat::Xsrg
        } else {
            MappingFormat::Srg
        };
    }

    if first.contains(" -> ") && first.trim_end().ends_with(':') {
        return MappingFormat::Proguard;
    }

    if !first.contains('\t') && first.split(' ').count() == 2 && !first.starts_with(' ') {
        return MappingFormat::Tsrg;
    }

    MappingFormat::Unknown
}

/// Reads a mapping stream into a [`MappingTree`].
///
/// ## Usage
///
/// ```ignore
/// let file = std::fs::File::open("intermap_mappings/1.21.1.tiny")?;
/// let tree = MappingReader::read(file)?;
/// let named = tree.namespace_index("named")?;
/// ```
pub struct MappingReader;

impl MappingReader {
    /// Detect the format from a bounded prefix of `reader`, then parse the
    /// whole stream.
    ///
    /// The prefix is read once and replayed in front of the remaining bytes,
    /// so the stream never needs to be seekable.
    pub fn read<R: Read>(mut reader: R) -> Result<MappingTree, MappingError> {
        let mut prefix = Vec::with_capacity(DETECT_LIMIT);
        (&mut reader)
            .take(DETECT_LIMIT as u64)
            .read_to_end(&mut prefix)?;

        let format = detect_format(&prefix);
        debug!("detected mapping format: {}", format);

        let stream = BufReader::new(Cursor::new(prefix).chain(reader));
        Self::read_with_format(stream, format)
    }

    /// Parse a stream whose format is already known.
    pub fn read_with_format<B: BufRead>(
        reader: B,
        format: MappingFormat,
    ) -> Result<MappingTree, MappingError> {
        let tree = match format {
            MappingFormat::TinyV1 => tiny_v1::read(reader)?,
            MappingFormat::TinyV2 => tiny_v2::read(reader)?,
            other => return Err(MappingError::UnsupportedFormat(other)),
        };
        debug!(
            "loaded {} classes across namespaces {:?}",
            tree.class_count(),
            tree.namespaces()
        );
        Ok(tree)
    }

    /// Parse mapping content held in memory.
    pub fn read_str(content: &str) -> Result<MappingTree, MappingError> {
        Self::read(content.as_bytes())
    }
}

/// Line-at-a-time reader that tracks 1-based line numbers.
pub(crate) struct LineReader<B> {
    inner: B,
    buf: String,
    line: usize,
}

impl<B: BufRead> LineReader<B> {
    pub(crate) fn new(inner: B) -> Self {
        Self {
            inner,
            buf: String::new(),
            line: 0,
        }
    }

    /// Next line without its terminator, paired with its line number.
    pub(crate) fn next_line(&mut self) -> Result<Option<(usize, &str)>, MappingError> {
        self.buf.clear();
        let read = self.inner.read_line(&mut self.buf).map_err(|e| {
            if e.kind() == ErrorKind::InvalidData {
                MappingError::parse(self.line + 1, "invalid UTF-8")
            } else {
                MappingError::Io(e)
            }
        })?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        let line = self.buf.trim_end_matches(['\n', '\r']);
        Ok(Some((self.line, line)))
    }
}
