//! Line classification and record segmentation for UniProt flat files.
//!
//! Both the DAT distribution and the keyword list share one line grammar: a
//! two-letter type code, three blanks, then content. Lines that do not fit the
//! pattern continue the most recently opened block, and a `//` line ends a record.

use std::fmt;
use std::io::{BufRead, Lines};

use tracing::warn;

use crate::error::Error;

/// Record delimiter line.
pub const TERMINATOR: &str = "//";

/// Two-letter line type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCode {
    /// Identity line (`ID`).
    Id,
    /// Keyword-list category identity line (`IC`).
    Ic,
    /// Accessions (`AC`).
    Ac,
    /// Descriptions (`DE`).
    De,
    /// Gene names (`GN`).
    Gn,
    /// Organism species (`OS`).
    Os,
    /// Taxonomy cross-reference (`OX`).
    Ox,
    /// Free-text comments (`CC`).
    Cc,
    /// Database cross-references (`DR`).
    Dr,
    /// Keywords (`KW`).
    Kw,
    /// Keyword-list synonyms (`SY`).
    Sy,
    /// Keyword-list Gene Ontology mapping (`GO`).
    Go,
    /// Keyword-list category (`CA`).
    Ca,
    /// Keyword-list hierarchy (`HI`).
    Hi,
    /// Keyword-list web link (`WW`).
    Ww,
    /// Any other alphabetic code; ignored by the extractors.
    Other([u8; 2]),
}

impl LineCode {
    #[must_use]
    pub fn from_bytes(code: [u8; 2]) -> Self {
        match &code {
            b"ID" => Self::Id,
            b"IC" => Self::Ic,
            b"AC" => Self::Ac,
            b"DE" => Self::De,
            b"GN" => Self::Gn,
            b"OS" => Self::Os,
            b"OX" => Self::Ox,
            b"CC" => Self::Cc,
            b"DR" => Self::Dr,
            b"KW" => Self::Kw,
            b"SY" => Self::Sy,
            b"GO" => Self::Go,
            b"CA" => Self::Ca,
            b"HI" => Self::Hi,
            b"WW" => Self::Ww,
            _ => Self::Other(code),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id => "ID",
            Self::Ic => "IC",
            Self::Ac => "AC",
            Self::De => "DE",
            Self::Gn => "GN",
            Self::Os => "OS",
            Self::Ox => "OX",
            Self::Cc => "CC",
            Self::Dr => "DR",
            Self::Kw => "KW",
            Self::Sy => "SY",
            Self::Go => "GO",
            Self::Ca => "CA",
            Self::Hi => "HI",
            Self::Ww => "WW",
            // Other codes are built from two ASCII letters
            Self::Other(code) => std::str::from_utf8(code).unwrap_or("??"),
        }
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Coded { code: LineCode, content: &'a str },
    Continuation(&'a str),
    Terminator,
}

/// Classifies one line by its first five characters.
///
/// Two leading letters followed by blanks in columns 3-5 open a block; the content
/// starts at column 6. A line that ends early counts as blank-padded.
#[must_use]
pub fn classify_line(line: &str) -> Line<'_> {
    let line = line.trim_end();
    if line == TERMINATOR {
        return Line::Terminator;
    }

    let bytes = line.as_bytes();
    let is_coded = bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1].is_ascii_alphabetic()
        && bytes[2..bytes.len().min(5)].iter().all(|&b| b == b' ');

    if is_coded {
        let code = LineCode::from_bytes([bytes[0], bytes[1]]);
        let content = if line.len() > 5 { &line[5..] } else { "" };
        Line::Coded { code, content }
    } else {
        Line::Continuation(line)
    }
}

/// One record's lines, with the offset where each type code first appears.
#[derive(Debug, Clone, Default)]
pub struct Record {
    lines: Vec<String>,
    index: Vec<(LineCode, usize)>,
}

impl Record {
    /// Builds a record from its lines (terminator excluded) and indexes it.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut index: Vec<(LineCode, usize)> = Vec::new();
        for (offset, line) in lines.iter().enumerate() {
            if let Line::Coded { code, .. } = classify_line(line) {
                if !index.iter().any(|(seen, _)| *seen == code) {
                    index.push((code, offset));
                }
            }
        }
        Self { lines, index }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// First-seen type codes in order of appearance, with their line offsets.
    #[must_use]
    pub fn index(&self) -> &[(LineCode, usize)] {
        &self.index
    }

    #[must_use]
    pub fn offset(&self, code: LineCode) -> Option<usize> {
        self.index
            .iter()
            .find(|(seen, _)| *seen == code)
            .map(|&(_, offset)| offset)
    }

    /// The lines from the first occurrence of `code` to the end of the record.
    #[must_use]
    pub fn lines_from(&self, code: LineCode) -> &[String] {
        match self.offset(code) {
            Some(offset) => &self.lines[offset..],
            None => &[],
        }
    }

    /// Contents of the contiguous block that starts at the first `code` line.
    ///
    /// The scan stops at the first line carrying a different code. A code that
    /// re-opens later in the record is not revisited.
    pub fn block(&self, code: LineCode) -> impl Iterator<Item = &str> + '_ {
        self.lines_from(code)
            .iter()
            .map(|line| classify_line(line))
            .take_while(move |line| match line {
                Line::Coded { code: seen, .. } => *seen == code,
                Line::Continuation(_) => true,
                Line::Terminator => false,
            })
            .map(|line| match line {
                Line::Coded { content, .. } => content,
                Line::Continuation(text) => text.trim(),
                Line::Terminator => "",
            })
    }
}

/// Lines of one type code, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub code: LineCode,
    pub lines: Vec<String>,
}

/// Blocks keyed by type code, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct BlockSet {
    blocks: Vec<Block>,
    last: Option<usize>,
}

impl BlockSet {
    /// Adds a line to its block, or to the last opened block for continuations.
    /// Continuations before any block is opened and terminators are ignored.
    pub fn push_line(&mut self, line: &str) {
        match classify_line(line) {
            Line::Coded { code, content } => {
                let position = match self.blocks.iter().position(|b| b.code == code) {
                    Some(position) => position,
                    None => {
                        self.blocks.push(Block {
                            code,
                            lines: Vec::new(),
                        });
                        self.blocks.len() - 1
                    }
                };
                self.blocks[position].lines.push(content.to_string());
                self.last = Some(position);
            }
            Line::Continuation(text) => {
                if let Some(position) = self.last {
                    self.blocks[position].lines.push(text.trim().to_string());
                }
            }
            Line::Terminator => {}
        }
    }

    pub fn reset(&mut self) {
        self.blocks.clear();
        self.last = None;
    }

    #[must_use]
    pub fn get(&self, code: LineCode) -> Option<&Block> {
        self.blocks.iter().find(|b| b.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Splits a line stream into records at `//` lines.
///
/// Blank lines are dropped. Lines after the final terminator do not form a
/// record and are discarded with a warning.
pub struct RecordReader<R> {
    lines: Lines<R>,
    buffer: Vec<String>,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e.into())),
                None => {
                    if !self.buffer.is_empty() {
                        warn!(
                            lines = self.buffer.len(),
                            "discarding trailing lines without a record terminator"
                        );
                        self.buffer.clear();
                    }
                    return None;
                }
            };

            let line = line.trim_end();
            if line == TERMINATOR {
                let lines = std::mem::take(&mut self.buffer);
                return Some(Ok(Record::from_lines(lines)));
            }
            if !line.is_empty() {
                self.buffer.push(line.to_string());
            }
        }
    }
}
