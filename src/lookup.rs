//! Resolution of user-supplied accession lists against a corpus.

use tracing::warn;

use crate::corpus::Corpus;
use crate::dat::entry::AnnotationRecord;

const FAMILY_SUFFIX: &str = "_family";
const HEADER_TOKENS: [&str; 2] = ["accession", "acc"];

/// Reads a pasted accession column.
///
/// Takes the first whitespace-separated token of every line, skipping blank lines
/// and `Accession`/`acc` header cells, and removes a `_family` suffix.
#[must_use]
pub fn parse_accession_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|token| !HEADER_TOKENS.iter().any(|h| token.eq_ignore_ascii_case(h)))
        .map(|token| token.strip_suffix(FAMILY_SUFFIX).unwrap_or(token))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Result of resolving one query.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    pub query: &'a str,
    pub record: Option<&'a AnnotationRecord>,
}

/// Found/failed counts over a batch of queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupSummary {
    pub found: usize,
    pub failed: usize,
}

impl LookupSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.found + self.failed
    }
}

/// Resolves every query in order. Failed lookups are kept as `None` rows so the
/// output lines up with the input.
pub fn annotate<'a, S: AsRef<str>>(
    corpus: &'a Corpus,
    queries: &'a [S],
) -> (Vec<Lookup<'a>>, LookupSummary) {
    let mut summary = LookupSummary::default();
    let lookups = queries
        .iter()
        .map(|query| {
            let query = query.as_ref();
            let record = corpus.resolve(query);
            if record.is_some() {
                summary.found += 1;
            } else {
                summary.failed += 1;
                warn!(query, "no record found");
            }
            Lookup { query, record }
        })
        .collect();
    (lookups, summary)
}
