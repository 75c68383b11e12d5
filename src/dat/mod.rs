//! UniProt DAT entries: record assembly and corpus construction.
//!
//! Each record from the [`RecordReader`] is walked through its line-code index
//! and every known block is handed to its field extractor. Field failures leave
//! the field at its default; records that cannot be keyed are skipped.

pub mod entry;
pub mod fields;
pub mod go;
pub mod pathway;

use std::io::{BufRead, BufReader, Read};

use flate2::read::MultiGzDecoder;
use tracing::{debug, warn};

use crate::corpus::Corpus;
use crate::error::Error;
use crate::segment::{LineCode, Record, RecordReader};

use self::entry::{AnnotationBuilder, AnnotationRecord};
use self::fields::{
    DEFAULT_EXCLUDED_KEYWORDS, extract_accessions, extract_comments, extract_cross_references,
    extract_gene, extract_identity, extract_keywords, extract_names, extract_organism,
    extract_taxonomy,
};

/// Options applied while extracting fields.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Keywords dropped from every record, compared without a trailing period.
    pub excluded_keywords: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            excluded_keywords: DEFAULT_EXCLUDED_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Counters collected over one DAT stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Records assembled and added to the corpus.
    pub records: usize,
    /// Records dropped because they lacked an identifier or accession.
    pub skipped_records: usize,
    /// Fields left at their default after an extraction failure.
    pub field_failures: usize,
}

/// A parsed DAT stream.
#[derive(Debug)]
pub struct DatParse {
    pub corpus: Corpus,
    pub stats: ParseStats,
}

/// Builds the annotation record of one segmented entry.
///
/// Returns `None` when the entry has no identifier, status or primary accession.
pub fn assemble_record(
    record: &Record,
    options: &ExtractOptions,
    stats: &mut ParseStats,
) -> Option<AnnotationRecord> {
    let mut builder = AnnotationBuilder::default();

    for &(code, offset) in record.index() {
        let contents = record.block(code);
        let outcome = match code {
            LineCode::Id => extract_identity(contents, &mut builder),
            LineCode::Ac => extract_accessions(contents, &mut builder),
            LineCode::De => extract_names(contents, &mut builder),
            LineCode::Gn => extract_gene(contents, &mut builder),
            LineCode::Os => extract_organism(contents, &mut builder),
            LineCode::Ox => extract_taxonomy(contents, &mut builder),
            LineCode::Cc => extract_comments(contents, &mut builder),
            LineCode::Dr => extract_cross_references(contents, &mut builder),
            LineCode::Kw => extract_keywords(contents, &options.excluded_keywords, &mut builder),
            _ => Ok(()),
        };

        if let Err(e) = outcome {
            stats.field_failures += 1;
            debug!(
                record = builder.identifier.as_deref().unwrap_or("?"),
                offset,
                error = %e,
                "field left at default"
            );
        }
    }

    match builder.build() {
        Ok(annotation) => Some(annotation),
        Err(e) => {
            stats.skipped_records += 1;
            let first_line = record.lines().first().map(String::as_str).unwrap_or("");
            warn!(first_line, error = %e, "skipping record");
            None
        }
    }
}

/// Parses a plain-text DAT stream into a corpus.
///
/// I/O and decoding errors abort the parse; per-record problems are counted in
/// [`ParseStats`].
pub fn parse_dat<R: BufRead>(reader: R, options: &ExtractOptions) -> Result<DatParse, Error> {
    let mut corpus = Corpus::new();
    let mut stats = ParseStats::default();

    for record in RecordReader::new(reader) {
        let record = record?;
        if let Some(annotation) = assemble_record(&record, options, &mut stats) {
            corpus.insert(annotation);
            stats.records += 1;
        }
    }

    Ok(DatParse { corpus, stats })
}

/// Parses a gzip-compressed DAT stream.
pub fn parse_dat_gz<R: Read>(reader: R, options: &ExtractOptions) -> Result<DatParse, Error> {
    let decoder = MultiGzDecoder::new(reader);
    parse_dat(BufReader::new(decoder), options)
}
