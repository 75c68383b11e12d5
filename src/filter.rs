//! Species filtering of DAT streams by NCBI taxonomy number.

use std::collections::HashSet;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Error;
use crate::segment::{LineCode, Record, RecordReader, TERMINATOR};

/// Human, mouse and Arabidopsis.
pub const DEFAULT_TAXA: [u32; 3] = [3702, 9606, 10090];

/// Records kept out of records read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub total: usize,
}

/// Taxonomy number of a record, from the first `NCBI_TaxID=` of its OX block.
#[must_use]
pub fn record_taxonomy(record: &Record) -> Option<u32> {
    record.block(LineCode::Ox).find_map(|content| {
        let (_, rest) = content.split_once("NCBI_TaxID=")?;
        let digits: &str = &rest[..rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len())];
        digits.parse().ok()
    })
}

/// Copies the records whose taxonomy is in `taxa` from `reader` to `writer`.
pub fn filter_by_taxonomy<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    taxa: &HashSet<u32>,
) -> Result<FilterStats, Error> {
    let mut stats = FilterStats::default();

    for record in RecordReader::new(reader) {
        let record = record?;
        stats.total += 1;

        let taxonomy = record_taxonomy(&record);
        if taxonomy.is_some_and(|id| taxa.contains(&id)) {
            for line in record.lines() {
                writeln!(writer, "{line}")?;
            }
            writeln!(writer, "{TERMINATOR}")?;
            stats.kept += 1;
        } else {
            debug!(taxonomy = ?taxonomy, "record filtered out");
        }
    }

    writer.flush()?;
    Ok(stats)
}
