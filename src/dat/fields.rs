//! Field extractors, one per DAT line type.
//!
//! Each extractor receives the contents of one contiguous block and fills its
//! fields on the builder. An `Err` reports that a sub-field fell back to its
//! default; whatever was extracted before the failure stays on the builder.

use crate::error::Error;
use crate::evidence::strip_evidence;
use crate::segment::LineCode;

use super::entry::{AnnotationBuilder, Dataset, GeneXref};
use super::go::extract_go_terms;
use super::pathway::{extract_narrative, extract_reactome};

/// Keywords that carry no information about the protein itself.
pub const DEFAULT_EXCLUDED_KEYWORDS: [&str; 3] = [
    "Reference proteome",
    "Complete proteome",
    "Direct protein sequencing",
];

/// `ID   1433B_HUMAN   Reviewed;   246 AA.`
pub fn extract_identity<'a, I>(contents: I, builder: &mut AnnotationBuilder) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let line = contents
        .into_iter()
        .next()
        .ok_or_else(|| Error::field(LineCode::Id, "empty identity block"))?;
    let mut tokens = line.split_whitespace();
    let identifier = tokens
        .next()
        .ok_or_else(|| Error::field(LineCode::Id, "missing identifier"))?;
    let status = tokens
        .next()
        .ok_or_else(|| Error::field(LineCode::Id, format!("missing status for {identifier}")))?;

    builder.identifier = Some(identifier.to_string());
    builder.dataset = Some(Dataset::from_status(status));
    Ok(())
}

/// Semicolon-separated accessions over all contiguous `AC` lines; the first is primary.
pub fn extract_accessions<'a, I>(contents: I, builder: &mut AnnotationBuilder) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut accessions = contents
        .into_iter()
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|acc| !acc.is_empty())
        .map(str::to_string);

    let primary = accessions
        .next()
        .ok_or_else(|| Error::field(LineCode::Ac, "no accession found"))?;
    builder.accession = Some(primary);
    builder.secondary_accessions = accessions.collect();
    Ok(())
}

/// Name currently receiving queued short names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameSlot {
    Unset,
    Primary,
    Alternative(usize),
    /// A component name (`Contains:`/`Includes:`) that is not kept.
    Detached,
}

/// Protein names from the `DE` block.
///
/// The first `RecName:` (or `SubName:` for unreviewed entries) gives the primary
/// name, every `AltName:` opens a new alternative name, and `Short=` lines are
/// appended in parentheses to the name they follow.
pub fn extract_names<'a, I>(contents: I, builder: &mut AnnotationBuilder) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut slot = NameSlot::Unset;
    let mut short_names: Vec<String> = Vec::new();
    let mut failure: Option<Error> = None;

    for content in contents {
        let line = strip_evidence(content);

        if let Some(rest) = after_marker(&line, "RecName:").or_else(|| after_marker(&line, "SubName:")) {
            flush_short_names(&mut short_names, slot, builder);
            if builder.name.is_some() {
                slot = NameSlot::Detached;
                continue;
            }
            match full_name(rest) {
                Some(name) => {
                    builder.name = Some(name);
                    slot = NameSlot::Primary;
                }
                None => {
                    slot = NameSlot::Detached;
                    failure.get_or_insert_with(|| {
                        Error::field(LineCode::De, format!("no full name in '{}'", line.trim()))
                    });
                }
            }
        } else if let Some(rest) = after_marker(&line, "AltName:") {
            flush_short_names(&mut short_names, slot, builder);
            let name = full_name(rest).unwrap_or_else(|| clean_value(rest));
            if name.is_empty() {
                slot = NameSlot::Detached;
                failure.get_or_insert_with(|| {
                    Error::field(LineCode::De, format!("empty alternative name in '{}'", line.trim()))
                });
            } else {
                builder.alternative_names.push(name);
                slot = NameSlot::Alternative(builder.alternative_names.len() - 1);
            }
        } else if let Some(rest) = after_marker(&line, "Flags:") {
            builder.flags = rest
                .split(';')
                .map(str::trim)
                .filter(|flag| !flag.is_empty())
                .map(str::to_string)
                .collect();
        } else if let Some(rest) = after_marker(&line, "Short=") {
            short_names.push(clean_value(rest));
        }
    }

    flush_short_names(&mut short_names, slot, builder);

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|pos| &line[pos + marker.len()..])
}

fn full_name(text: &str) -> Option<String> {
    after_marker(text, "Full=").map(clean_value)
}

fn clean_value(text: &str) -> String {
    text.trim().trim_end_matches(';').trim_end().to_string()
}

fn flush_short_names(short_names: &mut Vec<String>, slot: NameSlot, builder: &mut AnnotationBuilder) {
    if short_names.is_empty() {
        return;
    }
    let suffix = format!(" ({})", short_names.join("; "));
    match slot {
        NameSlot::Primary => {
            if let Some(name) = builder.name.as_mut() {
                name.push_str(&suffix);
            }
        }
        NameSlot::Alternative(index) => {
            if let Some(name) = builder.alternative_names.get_mut(index) {
                name.push_str(&suffix);
            }
        }
        NameSlot::Unset | NameSlot::Detached => {}
    }
    short_names.clear();
}

/// Gene name and synonyms from the first gene of the `GN` block.
///
/// `Name=YWHAB; Synonyms=KCIP1, P29;` yields `YWHAB` and `[KCIP1, P29]`.
/// Wrapped lines are joined; a lone `and` line starts a further gene, which is
/// not extracted.
pub fn extract_gene<'a, I>(contents: I, builder: &mut AnnotationBuilder) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = contents
        .into_iter()
        .map(str::trim)
        .take_while(|line| *line != "and")
        .collect::<Vec<_>>()
        .join(" ");
    let line = strip_evidence(&joined);
    let segments: Vec<&str> = line.split(';').map(str::trim).collect();

    let first = segments.first().copied().unwrap_or("");
    let gene = first.strip_prefix("Name=").unwrap_or(first).trim();
    if gene.is_empty() {
        return Err(Error::field(LineCode::Gn, "no gene name"));
    }
    builder.gene = Some(gene.to_string());

    if let Some(synonyms) = segments.iter().find(|s| s.contains("Synonyms")) {
        builder.gene_synonyms = synonyms
            .replace("Synonyms=", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
    Ok(())
}

/// Organism name with its trailing period removed; wrapped lines are joined.
pub fn extract_organism<'a, I>(contents: I, builder: &mut AnnotationBuilder) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = contents
        .into_iter()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let organism = joined.trim_end_matches('.').trim();
    if organism.is_empty() {
        return Err(Error::field(LineCode::Os, "empty organism"));
    }
    builder.organism = Some(organism.to_string());
    Ok(())
}

/// Taxonomy number from `OX   NCBI_TaxID=9606;`.
pub fn extract_taxonomy<'a, I>(contents: I, builder: &mut AnnotationBuilder) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let line = contents.into_iter().next().unwrap_or("");
    let value = line
        .split_once('=')
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .map(|token| token.trim_end_matches(';'))
        .ok_or_else(|| Error::field(LineCode::Ox, format!("no taxonomy in '{line}'")))?;
    let taxonomy_id = value
        .parse()
        .map_err(|e| Error::field(LineCode::Ox, format!("invalid taxonomy '{value}': {e}")))?;
    builder.taxonomy_id = Some(taxonomy_id);
    Ok(())
}

/// Cross-references: the MGI entry, Reactome pathways and GO terms.
pub fn extract_cross_references<'a, I>(contents: I, builder: &mut AnnotationBuilder) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let lines: Vec<String> = contents.into_iter().map(strip_evidence).collect();

    builder.pathways.reactome = extract_reactome(lines.iter().map(String::as_str));
    builder.go_terms = extract_go_terms(lines.iter().map(String::as_str));

    match lines.iter().find(|line| line.starts_with("MGI;")) {
        Some(line) => {
            builder.mgi = Some(parse_mgi_xref(line)?);
            Ok(())
        }
        None => Ok(()),
    }
}

/// `MGI; MGI:1891917; Ywhab.`
fn parse_mgi_xref(line: &str) -> Result<GeneXref, Error> {
    let parts: Vec<&str> = line.split(';').map(str::trim).collect();
    if parts.len() < 3 || parts[1].is_empty() {
        return Err(Error::field(LineCode::Dr, format!("malformed MGI reference '{line}'")));
    }
    Ok(GeneXref {
        accession: parts[1].to_string(),
        symbol: parts[2].trim_end_matches('.').to_string(),
    })
}

/// The PATHWAY narrative of the comment block.
pub fn extract_comments<'a, I>(contents: I, builder: &mut AnnotationBuilder) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    builder.pathways.narrative = extract_narrative(contents);
    Ok(())
}

/// Keywords over all contiguous `KW` lines.
///
/// Lines are joined before evidence removal so wrapped citations are caught.
/// Empty and excluded tokens are dropped, and the trailing period is removed from
/// the last keyword.
pub fn extract_keywords<'a, I>(
    contents: I,
    excluded: &[String],
    builder: &mut AnnotationBuilder,
) -> Result<(), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = contents
        .into_iter()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    let line = strip_evidence(&joined);

    let mut keywords: Vec<String> = line
        .split(';')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .filter(|k| {
            let normalized = k.trim_end_matches('.');
            !excluded.iter().any(|e| e == normalized)
        })
        .map(str::to_string)
        .collect();

    if let Some(last) = keywords.last_mut() {
        let trimmed = last.trim_end_matches('.').len();
        last.truncate(trimmed);
    }
    keywords.retain(|k| !k.is_empty());

    builder.keywords = keywords;
    Ok(())
}
